//! Settings structures for news-thread configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::export::LayoutPreset;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub outgoing: OutgoingSettings,
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (NEWS_THREAD_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("NEWS_THREAD_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("NEWS_THREAD_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("NEWS_THREAD_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("NEWS_THREAD_EXPORT_PRESET") {
            if let Ok(preset) = val.parse() {
                self.export.preset = preset;
            }
        }
    }

    /// Full URL of the summarization endpoint
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            self.api.endpoint.trim_start_matches('/')
        )
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Summarization API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the summarization backend
    pub base_url: String,
    /// Path of the news-thread endpoint
    pub endpoint: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            endpoint: "/api/news-thread".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = transport default)
    pub request_timeout: Option<f64>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Local persistence settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the history and cache slots
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Configured directory, or the platform data directory
    pub fn resolved_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|p| p.join("news-thread"))
                .unwrap_or_else(|| PathBuf::from(".news-thread"))
        })
    }
}

/// Document export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Layout preset used by the exporter
    pub preset: LayoutPreset,
    /// Directory exported documents are written to
    pub output_dir: PathBuf,
    /// Attribution printed in every content page footer
    pub attribution: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            preset: LayoutPreset::CoverPage,
            output_dir: PathBuf::from("."),
            attribution: "Generated by FactsOnly AI".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.general.debug);
        assert_eq!(settings.api.base_url, "http://localhost:5000");
        assert!(settings.outgoing.request_timeout.is_none());
        assert_eq!(settings.export.preset, LayoutPreset::CoverPage);
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let mut settings = Settings::default();
        settings.api.base_url = "https://only-facts.example.com/".to_string();
        assert_eq!(
            settings.endpoint_url(),
            "https://only-facts.example.com/api/news-thread"
        );
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
api:
  base_url: "https://summaries.example.org"
export:
  preset: compact
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.api.base_url, "https://summaries.example.org");
        assert_eq!(settings.api.endpoint, "/api/news-thread");
        assert_eq!(settings.export.preset, LayoutPreset::Compact);
        assert_eq!(settings.export.attribution, "Generated by FactsOnly AI");
    }
}
