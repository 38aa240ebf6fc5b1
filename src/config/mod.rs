use crate::constants::{DEFAULT_MAX_ATTEMPTS, env_vars};
use crate::error::AppError;
use crate::names::{PairKey, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_history_path, get_log_dir_path};
use validation::validate_roster;

/// How the generated team list is carved into two labeled display sets.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SplitConfig {
    /// Positional split: the first `position` teams form Set 1, the
    /// remainder Set 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Composed split for 3-group rosters: Set 1 = first 3 cross-group
    /// teams + first 2 same-group teams, Set 2 = next 4 + next 1.
    #[serde(default)]
    pub composed: bool,
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing the roster and generator settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// First roster group. Members are cross-paired with group B.
    #[serde(default)]
    pub group_a: Vec<String>,
    /// Second roster group. Members are cross-paired with group A.
    #[serde(default)]
    pub group_b: Vec<String>,
    /// Optional third group whose members are paired within themselves.
    #[serde(default)]
    pub group_c: Vec<String>,
    /// Name pairs that must never land on the same team. Compared
    /// case-insensitively in either order.
    #[serde(default)]
    pub forbidden_pairs: Vec<[String; 2]>,
    /// Number of complete shuffle attempts before reporting exhaustion.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Optional display-set split applied after generation succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitConfig>,
    /// Path to the pairing-history file. Defaults to history.json next
    /// to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<String>,
    /// Path to the log file. If not specified, logs go to the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

/// Default attempt budget
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            group_a: Vec::new(),
            group_b: Vec::new(),
            group_c: Vec::new(),
            forbidden_pairs: Vec::new(),
            max_attempts: default_max_attempts(),
            split: None,
            history_file: None,
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing config file is not an error: generation falls back to
    /// ungrouped, unconstrained pairing with an empty roster.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `PAIRUP_HISTORY_FILE` - Override history file path
    /// - `PAIRUP_LOG_FILE` - Override log file path
    /// - `PAIRUP_MAX_ATTEMPTS` - Override attempt budget
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded (or defaulted) configuration
    /// * `Err(AppError)` - Config file exists but cannot be read or parsed
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(history_file) = std::env::var(env_vars::HISTORY_FILE) {
            config.history_file = Some(history_file);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(max_attempts) = std::env::var(env_vars::MAX_ATTEMPTS)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.max_attempts = max_attempts;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_attempts == 0 {
            return Err(AppError::config_error("max_attempts must be at least 1"));
        }
        validate_roster(
            &[&self.group_a, &self.group_b, &self.group_c],
            &self.forbidden_pairs,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Returns the effective history file path, honoring the
    /// `history_file` override.
    pub fn history_path(&self) -> String {
        self.history_file
            .clone()
            .unwrap_or_else(get_history_path)
    }

    /// The configured groups with every member normalized, in A/B/C
    /// order. Empty groups stay empty.
    pub fn normalized_groups(&self) -> [Vec<String>; 3] {
        let norm = |group: &Vec<String>| -> Vec<String> {
            group.iter().map(|n| normalize(n)).collect()
        };
        [norm(&self.group_a), norm(&self.group_b), norm(&self.group_c)]
    }

    /// Union of all configured group members, normalized, in
    /// configuration order. Empty when no roster is configured.
    pub fn roster(&self) -> Vec<String> {
        let [a, b, c] = self.normalized_groups();
        a.into_iter().chain(b).chain(c).collect()
    }

    /// The forbidden pairs as an O(1)-lookup set of unordered keys.
    pub fn forbidden_set(&self) -> HashSet<PairKey> {
        self.forbidden_pairs
            .iter()
            .map(|[a, b]| PairKey::new(&normalize(a), &normalize(b)))
            .collect()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Group A ({} members):", config.group_a.len());
            println!("{}", config.group_a.join(", "));
            println!("Group B ({} members):", config.group_b.len());
            println!("{}", config.group_b.join(", "));
            if !config.group_c.is_empty() {
                println!("Group C ({} members):", config.group_c.len());
                println!("{}", config.group_c.join(", "));
            }
            println!("────────────────────────────────────");
            println!("Forbidden Pairs:");
            if config.forbidden_pairs.is_empty() {
                println!("(none)");
            } else {
                for [a, b] in &config.forbidden_pairs {
                    println!("{a} / {b}");
                }
            }
            println!("────────────────────────────────────");
            println!("Max Attempts:");
            println!("{}", config.max_attempts);
            println!("────────────────────────────────────");
            println!("History File:");
            println!("{}", config.history_path());
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/pairup.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Generation will use free random pairing with no constraints.");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Arguments
    /// * `path` - The file path where the configuration should be saved
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path (for testing).
    #[allow(dead_code)] // Used in tests
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
