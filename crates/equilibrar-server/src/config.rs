use std::path::Path;

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use equilibrar_core::locale::Locale;
use equilibrar_views::context::DashboardConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const CONFIG_ENV: &str = "EQUILIBRAR_CONFIG";
pub const BIND_ENV: &str = "EQUILIBRAR_BIND";
pub const TZ_ENV: &str = "EQUILIBRAR_TZ";
pub const LOCALE_ENV: &str = "EQUILIBRAR_LOCALE";
pub const LOG_JSON_ENV: &str = "EQUILIBRAR_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub bind: String,
    /// IANA name of the zone meetings are scheduled in.
    pub time_zone: String,
    pub locale: Locale,
    pub log_json: bool,
    pub dashboard: DashboardConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind: "127.0.0.1:3000".to_string(),
            time_zone: "America/Santiago".to_string(),
            locale: Locale::Es,
            log_json: false,
            dashboard: DashboardConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn time_zone(&self) -> eyre::Result<TimeZone> {
        if self.time_zone.eq_ignore_ascii_case("UTC") {
            return Ok(TimeZone::UTC);
        }
        TimeZone::get(&self.time_zone)
            .map_err(|e| eyre::eyre!("unknown time zone {:?}: {e}", self.time_zone))
    }

    /// Apply `EQUILIBRAR_*` overrides read through `var`.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        if let Some(bind) = var(BIND_ENV) {
            self.bind = bind;
        }
        if let Some(tz) = var(TZ_ENV) {
            self.time_zone = tz;
        }
        if let Some(tag) = var(LOCALE_ENV) {
            self.locale = Locale::parse(&tag)
                .ok_or_else(|| eyre::eyre!("{LOCALE_ENV}={tag:?} is not a supported locale"))?;
        }
        if let Some(flag) = var(LOG_JSON_ENV) {
            self.log_json = matches!(flag.trim(), "1" | "true" | "yes");
        }
        Ok(self)
    }
}

/// Load the config file named by `EQUILIBRAR_CONFIG`, if any, then apply
/// environment overrides.
pub fn load_config() -> eyre::Result<ServerConfig> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_from(Path::new(&path))?,
        None => ServerConfig::default(),
    };
    config.with_overrides(|name| std::env::var(name).ok())
}

pub fn load_from(path: &Path) -> eyre::Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let config = parse_config(&contents)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn parse_config(contents: &str) -> eyre::Result<ServerConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    let migrated = migrate(json, on_disk_version)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u64) -> eyre::Result<serde_json::Value> {
    if from_version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Equilibrar."
        ));
    }

    // v0 → v1: dashboard tunables moved under "dashboard".
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let mut dashboard = match obj.remove("dashboard") {
            Some(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        for key in ["patient_list_limit", "coordinator_capacity", "advance_delay_ms"] {
            if let Some(value) = obj.remove(key) {
                dashboard.entry(key).or_insert(value);
            }
        }
        obj.insert("dashboard".to_string(), serde_json::Value::Object(dashboard));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested dashboard settings)");
    }

    Ok(json)
}
