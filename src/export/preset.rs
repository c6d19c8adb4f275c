//! Page geometry and typography presets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A4 width in points
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 height in points
pub const PAGE_HEIGHT: f32 = 841.89;

/// Named export layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// Dense layout, no cover page, topic printed in the section header
    Compact,
    /// Cover page followed by generously spaced content pages
    #[default]
    CoverPage,
}

impl LayoutPreset {
    /// Fixed geometry for this preset
    pub fn metrics(self) -> PageMetrics {
        match self {
            LayoutPreset::CoverPage => PageMetrics {
                margin: 20.0,
                line_height: 18.0,
                bottom_reserve: 100.0,
                cover_page: true,
                header_size: 16.0,
                header_gap: 25.0,
                title_size: 14.0,
                meta_size: 11.0,
                body_size: 12.0,
                footer_size: 10.0,
                summary_gap: 5.0,
                link_gap: 25.0,
                divider_gap: 20.0,
            },
            LayoutPreset::Compact => PageMetrics {
                margin: 40.0,
                line_height: 14.0,
                bottom_reserve: 70.0,
                cover_page: false,
                header_size: 14.0,
                header_gap: 20.0,
                title_size: 12.0,
                meta_size: 9.0,
                body_size: 10.0,
                footer_size: 8.0,
                summary_gap: 3.0,
                link_gap: 16.0,
                divider_gap: 14.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutPreset::Compact => "compact",
            LayoutPreset::CoverPage => "cover-page",
        }
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LayoutPreset::Compact),
            "cover-page" | "cover_page" | "cover" => Ok(LayoutPreset::CoverPage),
            other => Err(format!("unknown layout preset: {}", other)),
        }
    }
}

/// Geometry of a preset, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    /// Left, right and top margin
    pub margin: f32,
    /// Advance per wrapped line
    pub line_height: f32,
    /// Distance from the page bottom that content must stay above
    pub bottom_reserve: f32,
    /// Whether a cover page precedes the content
    pub cover_page: bool,
    pub header_size: f32,
    pub header_gap: f32,
    pub title_size: f32,
    pub meta_size: f32,
    pub body_size: f32,
    pub footer_size: f32,
    /// Gap between the summary and the link line
    pub summary_gap: f32,
    /// Gap between the link line and the divider
    pub link_gap: f32,
    /// Gap after the divider
    pub divider_gap: f32,
}

impl PageMetrics {
    pub fn page_width(&self) -> f32 {
        PAGE_WIDTH
    }

    pub fn page_height(&self) -> f32 {
        PAGE_HEIGHT
    }

    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - self.margin * 2.0
    }

    /// Lowest baseline content may use before a page break
    pub fn content_limit(&self) -> f32 {
        PAGE_HEIGHT - self.bottom_reserve
    }

    /// Baseline of the footer line
    pub fn footer_y(&self) -> f32 {
        PAGE_HEIGHT - 30.0
    }
}
