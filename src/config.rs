use crate::Args;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub render: Render,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Http {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Render {
    #[serde(rename = "legacyStringMarker", default)]
    pub legacy_string_marker: bool,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9595
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from {}", path.display());

        let config = std::fs::read_to_string(path)?;

        // An empty file is a valid config with every default
        if config.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_norway::from_str(&config)?)
    }

    /// Build the effective configuration: the config file (if any), then command line and
    /// environment overrides
    pub fn load(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(config.with_overrides(args))
    }

    /// Apply command line and environment overrides
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(host) = &args.host {
            self.http.host = host.clone();
        }

        if let Some(port) = args.port {
            self.http.port = port;
        }

        if let Some(legacy_string_marker) = args.legacy_string_marker {
            self.render.legacy_string_marker = legacy_string_marker;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_a_file() {
        let config = Config::load(&Args::default()).unwrap();

        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 9595);
        assert!(!config.render.legacy_string_marker);
    }

    #[test]
    fn reads_yaml_file() {
        let file = write_config(
            "http:\n  host: 127.0.0.1\n  port: 8080\nrender:\n  legacyStringMarker: true\n",
        );

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert!(config.render.legacy_string_marker);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("http:\n  port: 9000\n");

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 9000);
        assert!(!config.render.legacy_string_marker);
    }

    #[test]
    fn empty_file_is_default() {
        let file = write_config("");

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.http.port, 9595);
    }

    #[test]
    fn arguments_override_file() {
        let file = write_config("http:\n  host: 127.0.0.1\n  port: 8080\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            host: Some("::".to_string()),
            port: Some(9999),
            legacy_string_marker: Some(true),
        };

        let config = Config::load(&args).unwrap();

        assert_eq!(config.http.host, "::");
        assert_eq!(config.http.port, 9999);
        assert!(config.render.legacy_string_marker);
    }

    #[test]
    fn arguments_can_switch_marker_off() {
        let file = write_config("render:\n  legacyStringMarker: true\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            legacy_string_marker: Some(false),
            ..Args::default()
        };

        let config = Config::load(&args).unwrap();

        assert!(!config.render.legacy_string_marker);
    }

    #[test]
    fn unset_marker_argument_keeps_file_value() {
        let file = write_config("render:\n  legacyStringMarker: true\n");
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };

        let config = Config::load(&args).unwrap();

        assert!(config.render.legacy_string_marker);
    }

    #[test]
    fn parses_marker_argument() {
        use clap::Parser;

        let args = Args::try_parse_from(["alert-log-receiver", "--legacy-string-marker", "false"])
            .unwrap();
        assert_eq!(args.legacy_string_marker, Some(false));

        let args = Args::try_parse_from(["alert-log-receiver", "--port", "8080"]).unwrap();
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = Args {
            config: Some("/nonexistent/alert-log-receiver.yaml".into()),
            ..Args::default()
        };

        assert!(Config::load(&args).is_err());
    }
}
