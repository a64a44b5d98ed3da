use std::path::{Path, PathBuf};

use forklift_wizard::DraftSettings;
use serde::{Deserialize, Serialize};

/// Version written by this build. Raising it needs a matching step in
/// [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// 0 (or absent) for files written before versioning.
    #[serde(default)]
    pub config_version: u32,
    /// Defaults applied to every new plan draft. Added in v1.
    #[serde(default)]
    pub settings: DraftSettings,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            settings: DraftSettings::default(),
            log_filter: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("io.forklift.console"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or the default location when `None`. A
/// missing file yields the default config.
pub fn load_config(path: Option<&Path>) -> eyre::Result<ConsoleConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConsoleConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<ConsoleConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Migrations operate on the untyped value.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("configVersion")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(on_disk_version)
        .map_err(|_| eyre::eyre!("configVersion {on_disk_version} is out of range"))?;

    let migrated = migrate(json, on_disk_version)?;
    let config: ConsoleConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Bring a raw config from `from_version` to [`CURRENT_VERSION`], one
/// step at a time.
///
/// Steps only reshape JSON. Values a step cannot know (a namespace the user
/// has not picked yet) get the `DraftSettings` defaults and are changed by
/// editing the file or rerunning `init-config --force`.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "configVersion {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add draft settings (defaults; a partial `settings` object
    // written by hand is kept and its missing keys filled by serde)
    if from_version < 1 {
        let settings = serde_json::to_value(DraftSettings::default())?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("settings").or_insert(settings);
        obj.insert(
            "configVersion".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added settings)");
    }

    Ok(json)
}

pub fn save_config_to(config: &ConsoleConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
