#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use strum::IntoStaticStr;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    Model,
    StorageDir,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    fn app_dir() -> path::PathBuf {
        return dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("explain-buddy");
    }

    pub fn default(key: ConfigKey) -> String {
        let app_dir = Config::app_dir();

        let res = match key {
            ConfigKey::ApiURL => "https://generativelanguage.googleapis.com".to_string(),
            ConfigKey::Model => "gemini-2.5-flash".to_string(),
            ConfigKey::StorageDir => app_dir.to_string_lossy().to_string(),

            // Special
            ConfigKey::ConfigFile => app_dir.join("config.toml").to_string_lossy().to_string(),
        };

        return res;
    }

    pub fn description(key: ConfigKey) -> &'static str {
        match key {
            ConfigKey::ApiURL => return "Base URL of the Gemini API. Can be swapped to a compatible proxy.",
            ConfigKey::ConfigFile => return "Path to configuration file.",
            ConfigKey::Model => return "Gemini model used to generate explanations.",
            ConfigKey::StorageDir => return "Directory where the synced settings, such as the API key, are stored.",
        }
    }

    /// The key as used for CLI flags and in the config file.
    pub fn name(key: ConfigKey) -> &'static str {
        return key.into();
    }

    pub fn env_var(key: ConfigKey) -> &'static str {
        match key {
            ConfigKey::ApiURL => return "EXPLAIN_BUDDY_API_URL",
            ConfigKey::ConfigFile => return "EXPLAIN_BUDDY_CONFIG_FILE",
            ConfigKey::Model => return "EXPLAIN_BUDDY_MODEL",
            ConfigKey::StorageDir => return "EXPLAIN_BUDDY_STORAGE_DIR",
        }
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}', expected a string"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            model = Config::get(ConfigKey::Model),
            storage_dir = Config::get(ConfigKey::StorageDir),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default() -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let description = Config::description(key);
                let val = Config::default(key);
                return Some(format!("# {description}\n{key} = \"{val}\""));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
