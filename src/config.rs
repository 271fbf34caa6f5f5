// SPDX-License-Identifier: GPL-3.0-only

use anywho::anywho;
use serde::{Deserialize, Serialize};

use crate::app::core::{Registry, Secret};

/// Contents of `config.ron`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Secrets shown by the automatic display, in this order
    #[serde(default)]
    pub secrets: Vec<NamedSecret>,
    /// Secret used when "Generate" is pressed with an empty input.
    /// Left unset, an empty input is reported as an error.
    #[serde(default)]
    pub fallback_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedSecret {
    pub label: String,
    pub secret: String,
}

impl Config {
    pub async fn load(app_id: &str) -> Result<Self, anywho::Error> {
        use dirs;
        use std::fs;

        let app_id = app_id.to_string();

        smol::unblock(move || {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| anywho!("Could not determine config directory"))?
                .join(&app_id);

            let config_path = config_dir.join("config.ron");

            if config_path.exists() {
                log::info!("loading config from {}", config_path.display());
                let config_content = fs::read_to_string(&config_path)
                    .map_err(|e| anywho!("Failed to read config file: {}", e))?;

                Config::from_ron(&config_content)
            } else {
                // The default holds no secret, so writing it out is harmless and
                // shows the user where to put theirs
                let config = Config::default();

                if !config_dir.exists() {
                    fs::create_dir_all(&config_dir)
                        .map_err(|e| anywho!("Failed to create config directory: {}", e))?;
                }

                let config_content =
                    ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
                        .map_err(|e| anywho!("Failed to serialize config: {}", e))?;

                fs::write(&config_path, config_content)
                    .map_err(|e| anywho!("Failed to write config file: {}", e))?;

                log::info!("wrote default config to {}", config_path.display());
                Ok(config)
            }
        })
        .await
    }

    pub fn from_ron(content: &str) -> Result<Self, anywho::Error> {
        ron::from_str(content).map_err(|e| anywho!("Failed to parse config file: {}", e))
    }

    pub fn registry(&self) -> Registry {
        Registry::from_entries(
            self.secrets
                .iter()
                .map(|named| (named.label.clone(), Secret::new(named.secret.clone()))),
        )
    }

    /// The fallback secret, if one is configured and not blank
    pub fn fallback(&self) -> Option<Secret> {
        self.fallback_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
            .map(Secret::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_secrets_in_order() {
        let config = Config::from_ron(
            r#"(
                secrets: [
                    (label: "Key one", secret: "ABCDEFGHIJKLMNOP"),
                    (label: "Key two", secret: "ABCDEFGHIJKLMNOQ"),
                ],
                fallback_secret: Some("ABCDEFGHIJKLMNOP"),
            )"#,
        )
        .unwrap();

        let labels: Vec<_> = config.registry().iter().map(|s| s.label.clone()).collect();
        assert_eq!(labels, ["Key one", "Key two"]);
        assert_eq!(config.fallback().unwrap().expose(), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn missing_fields_default() {
        let config = Config::from_ron("()").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.registry().is_empty());
        assert!(config.fallback().is_none());
    }

    #[test]
    fn blank_fallback_counts_as_unset() {
        let config = Config {
            secrets: Vec::new(),
            fallback_secret: Some("   ".to_string()),
        };
        assert!(config.fallback().is_none());
    }

    #[test]
    fn rejects_malformed_file() {
        assert!(Config::from_ron("(secrets: [oops])").is_err());
    }

    #[test]
    fn default_config_round_trips() {
        let content =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::default())
                .unwrap();
        assert_eq!(Config::from_ron(&content).unwrap(), Config::default());
    }
}
