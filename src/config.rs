//! `config.toml`: church identity, content API location, server settings, colors.
//!
//! The file lives in the site directory (`--root`). It is layered over the
//! stock defaults, so it only needs the keys a church actually changes.
//!
//! ## Keys and Defaults
//!
//! ```toml
//!
//! [site]
//! name = "Community Baptist Church"
//! tagline = "I can do all things through Christ who strengthens me."
//! verse_reference = "Philippians 4:13"
//! address = "297 Fuller Road\nSpartanburg, SC 29307"   # Footer contact block
//! phone = "(803) 659-5555"
//! email = "info@cbcspartanburg.org"
//! utc_offset_minutes = 0     # Offset used to display event times
//!
//! [api]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 10          # Per-request timeout
//!
//! [server]
//! address = "127.0.0.1"
//! port = 3000
//! public_url = ""            # Origin the static render posts the contact form to
//! ready_wait_ms = 15000      # How long a request waits for page data
//!
//! [colors]
//! primary = "#663399"
//! primary_dark = "#4A1B7F"
//! primary_light = "#8A4FBE"
//! accent = "#FFD700"
//! accent_dark = "#B8860B"
//! ```
//!
//! A misspelled key is an error, not a silently ignored setting.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot encode default config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config value: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Church identity and footer contact details.
    pub site: SiteInfo,
    /// Content API connection.
    pub api: ApiConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Brand palette.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.site.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::Validation(
                "site.utc_offset_minutes must be within ±1439".into(),
            ));
        }
        match url::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => {
                return Err(ConfigError::Validation(
                    "api.base_url must be an http(s) URL".into(),
                ));
            }
            Err(e) => {
                return Err(ConfigError::Validation(format!(
                    "api.base_url is not a valid URL: {e}"
                )));
            }
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.server.ready_wait_ms == 0 {
            return Err(ConfigError::Validation(
                "server.ready_wait_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Church identity shown in the header, hero and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Verse quoted in the hero and footer.
    pub tagline: String,
    pub verse_reference: String,
    /// Footer address; newlines separate lines.
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Offset from UTC, in minutes, used to display event dates and times.
    pub utc_offset_minutes: i32,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Community Baptist Church".to_string(),
            tagline: "I can do all things through Christ who strengthens me.".to_string(),
            verse_reference: "Philippians 4:13".to_string(),
            address: "297 Fuller Road\nSpartanburg, SC 29307".to_string(),
            phone: "(803) 659-5555".to_string(),
            email: "info@cbcspartanburg.org".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the content API; endpoint paths resolve beneath it.
    pub base_url: String,
    /// Per-request timeout. A timed-out request counts as a failed one.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Public origin of the server (e.g. `https://example.org`). Static
    /// renders post the contact form there; empty means same origin.
    pub public_url: String,
    /// How long a page request waits for its data before answering with the
    /// loading view.
    pub ready_wait_ms: u64,
}

impl ServerConfig {
    pub fn ready_wait(&self) -> Duration {
        Duration::from_millis(self.ready_wait_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            public_url: String::new(),
            ready_wait_ms: 15_000,
        }
    }
}

/// Brand palette, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub primary: String,
    pub primary_dark: String,
    pub primary_light: String,
    pub accent: String,
    pub accent_dark: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#663399".to_string(),
            primary_dark: "#4A1B7F".to_string(),
            primary_light: "#8A4FBE".to_string(),
            accent: "#FFD700".to_string(),
            accent_dark: "#B8860B".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the bottom layer of every load.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Layer `overlay` over `base`.
///
/// Tables merge per key, recursively. Any other overlay value, arrays
/// included, replaces the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// The site directory's `config.toml` as an untyped value, `None` when absent.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply `overlay` (if any) to `base` and produce a validated [`SiteConfig`].
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Resolve the configuration for the site directory `root`.
///
/// A missing `config.toml` yields the stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Documented `config.toml` printed by `gen-config`. Every value is the default.
pub fn stock_config_toml() -> &'static str {
    r##"# Church Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Church identity
# ---------------------------------------------------------------------------
[site]
name = "Community Baptist Church"

# Verse quoted in the hero and the footer.
tagline = "I can do all things through Christ who strengthens me."
verse_reference = "Philippians 4:13"

# Contact block in the footer. Newlines separate address lines.
address = "297 Fuller Road\nSpartanburg, SC 29307"
phone = "(803) 659-5555"
email = "info@cbcspartanburg.org"

# Event dates and times are shown at this offset from UTC, in minutes.
# Eastern Standard Time is -300.
utc_offset_minutes = 0

# ---------------------------------------------------------------------------
# Content API
# ---------------------------------------------------------------------------
[api]
# Endpoints live beneath this URL: church-info/, staff/, services/,
# events/, events/featured/, contact/.
base_url = "http://localhost:8000/api"

# Per-request timeout in seconds. A request that times out is treated like
# any other failure: the page shows its built-in content for that section.
timeout_secs = 10

# ---------------------------------------------------------------------------
# HTTP server (`church-site serve`)
# ---------------------------------------------------------------------------
[server]
address = "127.0.0.1"
port = 3000

# Public origin of the running server. Pages produced by `church-site render`
# post the contact form to <public_url>/contact. Leave empty for same origin.
public_url = ""

# Milliseconds a page request waits for content before answering with a
# loading page that refreshes itself.
ready_wait_ms = 15000

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
primary = "#663399"
primary_dark = "#4A1B7F"
primary_light = "#8A4FBE"
accent = "#FFD700"
accent_dark = "#B8860B"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-primary-dark: {primary_dark};
    --color-primary-light: {primary_light};
    --color-accent: {accent};
    --color-accent-dark: {accent_dark};
}}"#,
        primary = colors.primary,
        primary_dark = colors.primary_dark,
        primary_light = colors.primary_light,
        accent = colors.accent,
        accent_dark = colors.accent_dark,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Community Baptist Church");
        assert_eq!(config.site.verse_reference, "Philippians 4:13");
        assert_eq!(config.site.utc_offset_minutes, 0);
    }

    #[test]
    fn default_config_has_api_and_server_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.ready_wait(), Duration::from_secs(15));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#ffcc00"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent, "#ffcc00");
        assert_eq!(config.colors.primary, "#663399");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn parse_server_address() {
        let toml = r#"
[server]
address = "0.0.0.0"
port = 8080
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.address.to_string(), "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let colors = ColorConfig {
            primary: "#123456".into(),
            ..ColorConfig::default()
        };
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-primary: #123456"));
        assert!(css.contains("--color-accent: #FFD700"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Community Baptist Church");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
name = "Grace Chapel"

[api]
base_url = "https://content.example.org/api"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "Grace Chapel");
        assert_eq!(config.api.base_url, "https://content.example.org/api");
        // Unspecified values stay at their defaults
        assert_eq!(config.site.phone, "(803) 659-5555");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[api]
base_url = "http://a"
timeout_secs = 10
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[api]
timeout_secs = 3
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let api = merged.get("api").unwrap();
        assert_eq!(api.get("timeout_secs").unwrap().as_integer(), Some(3));
        assert_eq!(api.get("base_url").unwrap().as_str(), Some("http://a"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("port = 3000").unwrap();
        let overlay: toml::Value = toml::from_str("port = 8080").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("port").unwrap().as_integer(), Some(8080));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[api]
timeout = 5
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[theme]\ngap = 1\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let mut config = SiteConfig::default();
        config.api.base_url = "/api".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut config = SiteConfig::default();
        config.api.base_url = "ftp://example.org/api".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let mut config = SiteConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.server.ready_wait_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_offset_bounds() {
        let mut config = SiteConfig::default();
        config.site.utc_offset_minutes = -300;
        assert!(config.validate().is_ok());
        config.site.utc_offset_minutes = 1440;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_blank_name() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[api]
timeout_secs = 0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.site.address, defaults.site.address);
        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.server.address, defaults.server.address);
        assert_eq!(config.server.ready_wait_ms, defaults.server.ready_wait_ms);
        assert_eq!(config.colors.accent_dark, defaults.colors.accent_dark);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[site]", "[api]", "[server]", "[colors]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for section in ["site", "api", "server", "colors"] {
            assert!(val.get(section).is_some(), "missing {section}");
        }
    }
}
