//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{OdkError, Result};

/// Full Outreach Desk configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub display: DisplayConfig,
    pub account: AccountConfig,
    pub paths: PathsConfig,
}

/// List-page display tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per page on list views.
    pub page_size: usize,
    /// Default sort field for the leads page.
    pub lead_sort_field: String,
    /// Default sort field for the campaigns page.
    pub campaign_sort_field: String,
    /// Default sort field for the email-activity page.
    pub email_sort_field: String,
    /// Sort descending by default (newest first).
    pub sort_descending: bool,
}

/// Account settings: the profile the settings page edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccountConfig {
    pub name: String,
    pub email: String,
    pub company: String,
    /// Pricing plan id; must exist in the plan catalog.
    pub plan: String,
    /// Remaining email credits.
    pub credits: u64,
}

/// Filesystem paths used by odk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub leads_file: PathBuf,
    pub campaigns_file: PathBuf,
    pub emails_file: PathBuf,
    pub jsonl_log: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            lead_sort_field: "created_at".to_string(),
            campaign_sort_field: "created_at".to_string(),
            email_sort_field: "sent_at".to_string(),
            sort_descending: true,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            company: String::new(),
            plan: "free".to_string(),
            credits: 0,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[ODK-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        let cfg = home_dir.join(".config").join("odk").join("config.toml");
        let data = home_dir.join(".local").join("share").join("odk");
        Self {
            config_file: cfg,
            data_dir: data.clone(),
            leads_file: data.join("leads.json"),
            campaigns_file: data.join("campaigns.json"),
            emails_file: data.join("email_activity.json"),
            jsonl_log: data.join("activity.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| OdkError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(OdkError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize and write the config to its own `paths.config_file`.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let rendered = toml::to_string_pretty(self).map_err(|e| OdkError::Serialization {
            context: "toml",
            details: e.to_string(),
        })?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).map_err(|source| OdkError::io(parent, source))?;
        }
        fs::write(&self.paths.config_file, rendered)
            .map_err(|source| OdkError::io(&self.paths.config_file, source))
    }

    /// Deterministic hash of the effective config for logging.
    ///
    /// Uses FNV-1a for cross-process-stable hashing (no `DefaultHasher`
    /// whose seed may vary across Rust releases).
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        // display
        set_env_usize("ODK_DISPLAY_PAGE_SIZE", &mut self.display.page_size)?;
        set_env_string("ODK_DISPLAY_LEAD_SORT_FIELD", &mut self.display.lead_sort_field);
        set_env_string(
            "ODK_DISPLAY_CAMPAIGN_SORT_FIELD",
            &mut self.display.campaign_sort_field,
        );
        set_env_string(
            "ODK_DISPLAY_EMAIL_SORT_FIELD",
            &mut self.display.email_sort_field,
        );
        set_env_bool("ODK_DISPLAY_SORT_DESCENDING", &mut self.display.sort_descending)?;

        // account
        set_env_string("ODK_ACCOUNT_NAME", &mut self.account.name);
        set_env_string("ODK_ACCOUNT_EMAIL", &mut self.account.email);
        set_env_string("ODK_ACCOUNT_COMPANY", &mut self.account.company);
        set_env_string("ODK_ACCOUNT_PLAN", &mut self.account.plan);
        set_env_u64("ODK_ACCOUNT_CREDITS", &mut self.account.credits)?;

        // paths
        if let Some(raw) = env_var("ODK_DATA_DIR") {
            let data = PathBuf::from(raw);
            self.paths.leads_file = data.join("leads.json");
            self.paths.campaigns_file = data.join("campaigns.json");
            self.paths.emails_file = data.join("email_activity.json");
            self.paths.jsonl_log = data.join("activity.jsonl");
            self.paths.data_dir = data;
        }
        if let Some(raw) = env_var("ODK_JSONL_LOG") {
            self.paths.jsonl_log = PathBuf::from(raw);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.display.page_size == 0 {
            return Err(OdkError::InvalidConfig {
                details: "display.page_size must be >= 1".to_string(),
            });
        }

        if crate::records::catalog::plan(&self.account.plan).is_none() {
            return Err(OdkError::InvalidConfig {
                details: format!(
                    "account.plan {:?} is not a known plan id",
                    self.account.plan
                ),
            });
        }

        for (name, field) in [
            ("lead_sort_field", &self.display.lead_sort_field),
            ("campaign_sort_field", &self.display.campaign_sort_field),
            ("email_sort_field", &self.display.email_sort_field),
        ] {
            if field.trim().is_empty() {
                return Err(OdkError::InvalidConfig {
                    details: format!("display.{name} must not be empty"),
                });
            }
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn set_env_string(name: &str, slot: &mut String) {
    if let Some(raw) = env_var(name) {
        *slot = raw;
    }
}

fn set_env_u64(name: &str, slot: &mut u64) -> Result<()> {
    if let Some(raw) = env_var(name) {
        *slot = raw.parse::<u64>().map_err(|error| OdkError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })?;
    }
    Ok(())
}

fn set_env_usize(name: &str, slot: &mut usize) -> Result<()> {
    if let Some(raw) = env_var(name) {
        *slot = raw
            .parse::<usize>()
            .map_err(|error| OdkError::ConfigParse {
                context: "env",
                details: format!("{name}={raw:?}: {error}"),
            })?;
    }
    Ok(())
}

fn set_env_bool(name: &str, slot: &mut bool) -> Result<()> {
    if let Some(raw) = env_var(name) {
        *slot = raw.parse::<bool>().map_err(|error| OdkError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })?;
    }
    Ok(())
}
