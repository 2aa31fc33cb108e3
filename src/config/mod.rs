//! Configuration management.
//!
//! Settings come from an optional TOML file with environment variable
//! fallbacks for the contact email. Every section has serde defaults, so an
//! empty or missing file yields a fully usable configuration.
//!
//! # Configuration File Format
//!
//! ```toml
//! [paths]
//! materials_dir = "materials"
//! urls_file = "materials/urls.txt"
//! references_file = "materials/references.txt"
//! output_dir = "extracted"
//!
//! [http]
//! html_timeout_secs = 30
//! pdf_timeout_secs = 60
//! api_timeout_secs = 15
//! html_max_chars = 200000
//!
//! [contact]
//! email = "you@example.org"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// HTTP timeouts and bounds
    #[serde(default)]
    pub http: HttpConfig,

    /// Contact details for polite API use
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory of local files, enumerated non-recursively
    #[serde(default = "default_materials_dir")]
    pub materials_dir: PathBuf,

    /// Line-oriented file of URLs, one per line
    #[serde(default = "default_urls_file")]
    pub urls_file: PathBuf,

    /// Line-oriented file of free-text citations, one per line
    #[serde(default = "default_references_file")]
    pub references_file: PathBuf,

    /// Flat output directory for `.txt` artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            materials_dir: default_materials_dir(),
            urls_file: default_urls_file(),
            references_file: default_references_file(),
            output_dir: default_output_dir(),
        }
    }
}

/// HTTP timeouts and bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for buffered HTML page fetches
    #[serde(default = "default_html_timeout")]
    pub html_timeout_secs: u64,

    /// Timeout for streamed PDF downloads
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,

    /// Timeout for metadata API calls
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// Hard character bound on extracted remote content
    #[serde(default = "default_html_max_chars")]
    pub html_max_chars: usize,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn html_timeout(&self) -> Duration {
        Duration::from_secs(self.html_timeout_secs)
    }

    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            html_timeout_secs: default_html_timeout(),
            pdf_timeout_secs: default_pdf_timeout(),
            api_timeout_secs: default_api_timeout(),
            html_max_chars: default_html_max_chars(),
            user_agent: default_user_agent(),
        }
    }
}

/// Contact details for polite API use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Email sent to the open-access lookup service (it requires one)
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
        }
    }
}

fn default_materials_dir() -> PathBuf {
    PathBuf::from("materials")
}

fn default_urls_file() -> PathBuf {
    PathBuf::from("materials/urls.txt")
}

fn default_references_file() -> PathBuf {
    PathBuf::from("materials/references.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("extracted")
}

fn default_html_timeout() -> u64 {
    30
}

fn default_pdf_timeout() -> u64 {
    60
}

fn default_api_timeout() -> u64 {
    15
}

fn default_html_max_chars() -> usize {
    200_000
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_email() -> String {
    std::env::var("PAPERHARVEST_EMAIL").unwrap_or_else(|_| "paperharvest@example.com".to_string())
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Find a config file in the default locations:
///
/// 1. `./paperharvest.toml`
/// 2. `$CONFIG_DIR/paperharvest/config.toml`
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("paperharvest.toml");
    if local.exists() {
        return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("paperharvest").join("config.toml");
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.html_timeout_secs, 30);
        assert_eq!(config.http.pdf_timeout_secs, 60);
        assert_eq!(config.http.api_timeout_secs, 15);
        assert_eq!(config.http.html_max_chars, 200_000);
        assert_eq!(config.paths.output_dir, PathBuf::from("extracted"));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http.html_timeout_secs, 30);
        assert_eq!(config.paths.materials_dir, PathBuf::from("materials"));
    }

    #[test]
    fn test_partial_file_overrides() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            output_dir = "corpus"

            [http]
            html_max_chars = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.output_dir, PathBuf::from("corpus"));
        assert_eq!(config.http.html_max_chars, 5000);
        // Untouched fields keep their defaults
        assert_eq!(config.http.html_timeout_secs, 30);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[contact]\nemail = \"ops@example.org\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.contact.email, "ops@example.org");
    }
}
