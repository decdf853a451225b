use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::color::css::parse_color;
use crate::color::palette::{ControlPoint, Palette};
use crate::regions::RegionLookup;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Environment variable overriding `[api] base_url`.
pub const BASE_URL_ENV: &str = "FLOODCAST_API_URL";

/// Root configuration structure, deserialized from `.floodcast/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub map: MapConfig,
    /// Ward identifier → region display name. Falls back to the Kochi table.
    #[serde(default)]
    pub regions: Option<HashMap<String, String>>,
    /// Replaces the built-in flood-risk gradient.
    #[serde(default)]
    pub palette: Option<PaletteConfig>,
}

/// Where the forecast service lives and how long to wait for it.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for the forecast request, in seconds. Must be at least 1.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct MapConfig {
    /// Render the built-in mock wards when the forecast cannot be loaded.
    #[serde(default = "default_true")]
    pub fallback_to_mock: bool,
    /// PNG map size in pixels.
    #[serde(default = "default_png_size")]
    pub png_size: (u32, u32),
}

/// `[palette]` table:
///
/// ```toml
/// [palette]
/// stops = [
///     { threshold = 0.0, color = "#008000" },
///     { threshold = 1.0, color = "rgb(139, 0, 0)" },
/// ]
/// ```
#[derive(Debug, Deserialize)]
pub struct PaletteConfig {
    pub stops: Vec<StopConfig>,
}

#[derive(Debug, Deserialize)]
pub struct StopConfig {
    /// Fraction of the probability range, `0.0` to `1.0`.
    pub threshold: f64,
    pub color: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_png_size() -> (u32, u32) {
    (900, 700)
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            fallback_to_mock: true,
            png_size: default_png_size(),
        }
    }
}

impl Default for Config {
    /// Local development service, one-minute timeout, mock fallback enabled.
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            map: MapConfig::default(),
            regions: None,
            palette: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn region_lookup(&self) -> RegionLookup {
        match &self.regions {
            Some(names) => RegionLookup::new(names.clone()),
            None => RegionLookup::kochi(),
        }
    }

    /// The configured gradient, or [`Palette::flood_risk`] when none is set.
    pub fn palette(&self) -> Result<Palette> {
        let Some(custom) = &self.palette else {
            return Ok(Palette::flood_risk());
        };

        let points = custom
            .stops
            .iter()
            .enumerate()
            .map(|(i, stop)| {
                let color = parse_color(&stop.color)
                    .with_context(|| format!("Invalid color in [palette] stop {}", i))?;
                Ok(ControlPoint::new(stop.threshold, color))
            })
            .collect::<Result<Vec<_>>>()?;

        Palette::new(points).context("Invalid [palette] stops")
    }

    /// Apply `FLOODCAST_API_URL` / `--api-url`; the flag wins.
    pub fn with_overrides(mut self, env_url: Option<String>, flag_url: Option<String>) -> Self {
        if let Some(url) = flag_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<working_dir>/.floodcast/config.toml`
/// 3. `~/.config/floodcast/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = working_dir.join(".floodcast").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("floodcast").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    ensure!(
        config.api.timeout_secs > 0,
        "Invalid config {}: [api] timeout_secs must be at least 1",
        path.display()
    );
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(cfg.timeout(), Duration::from_secs(60));
        assert!(cfg.map.fallback_to_mock);
        assert_eq!(cfg.region_lookup(), RegionLookup::kochi());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[api]
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api.timeout_secs, 5);
        assert_eq!(cfg.map.png_size, (900, 700));
    }

    #[test]
    fn test_regions_table() {
        let cfg: Config = toml::from_str(
            r#"
[regions]
"Ward-1" = "Fort Kochi"
"#,
        )
        .unwrap();
        let lookup = cfg.region_lookup();
        assert_eq!(lookup.region_for("Ward-1"), "Fort Kochi");
        // Ward-8 is only in the built-in table
        assert_eq!(lookup.region_for("Ward-8"), "Ward-8");
    }

    #[test]
    fn test_override_precedence() {
        let cfg = Config::default().with_overrides(
            Some("http://env.example/api".into()),
            Some("http://flag.example/api/".into()),
        );
        assert_eq!(cfg.api.base_url, "http://flag.example/api");

        let cfg = Config::default().with_overrides(Some("http://env.example/api".into()), None);
        assert_eq!(cfg.api.base_url, "http://env.example/api");

        let cfg = Config::default().with_overrides(Some("  ".into()), None);
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".floodcast")).unwrap();
        std::fs::write(
            dir.path().join(".floodcast").join("config.toml"),
            "[map]\nfallback_to_mock = false\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert!(!cfg.map.fallback_to_mock);
    }

    #[test]
    fn test_explicit_override_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://10.0.0.2:5000/api\"\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(cfg.api.base_url, "http://10.0.0.2:5000/api");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_default_palette() {
        let palette = Config::default().palette().unwrap();
        assert_eq!(palette, Palette::flood_risk());
    }

    #[test]
    fn test_custom_palette() {
        let cfg: Config = toml::from_str(
            r##"
[palette]
stops = [
    { threshold = 0.0, color = "#000000" },
    { threshold = 1.0, color = "rgb(200, 100, 50)" },
]
"##,
        )
        .unwrap();
        let palette = cfg.palette().unwrap();
        assert_eq!(palette.css_color(50.0), "rgb(100,50,25)");
    }

    #[test]
    fn test_invalid_palette_is_an_error() {
        let descending: Config = toml::from_str(
            r##"
[palette]
stops = [
    { threshold = 0.0, color = "#000000" },
    { threshold = 0.6, color = "#ff0000" },
    { threshold = 0.4, color = "#00ff00" },
    { threshold = 1.0, color = "#ffffff" },
]
"##,
        )
        .unwrap();
        let err = descending.palette().unwrap_err();
        assert!(format!("{:#}", err).contains("ascending"));

        let bad_color: Config = toml::from_str(
            r##"
[palette]
stops = [
    { threshold = 0.0, color = "green" },
    { threshold = 1.0, color = "#ffffff" },
]
"##,
        )
        .unwrap();
        assert!(bad_color.palette().is_err());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[api\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }
}
