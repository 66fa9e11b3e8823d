use crate::error::ConfigError;
use chrono::{FixedOffset, Local, Offset};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const LOCAL_KEYWORD: &str = "local";

/// The process's local UTC offset, captured once on first use.
static LOCAL_OFFSET: Lazy<FixedOffset> = Lazy::new(|| Local::now().offset().fix());

/// Returns the local UTC offset captured for this process.
pub fn local_offset() -> FixedOffset {
    *LOCAL_OFFSET
}

/// Configuration for the coercion engine, stored in `config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoercerConfig {
    /// Offset that parsed and epoch-based times are normalized to.
    /// `None` or `"local"` uses the process's local offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

impl CoercerConfig {
    pub fn with_utc_offset(offset: impl Into<String>) -> Self {
        Self {
            utc_offset: Some(offset.into()),
        }
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CoercerConfig = serde_json::from_str(&content)?;
        config.resolve_offset()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<(), ConfigError> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// The configured offset, falling back to the process's local offset.
    pub fn resolve_offset(&self) -> Result<FixedOffset, ConfigError> {
        match self.utc_offset.as_deref() {
            None => Ok(local_offset()),
            Some(raw) => parse_offset(raw),
        }
    }
}

/// Parses `local`, `Z`, `UTC`, `+HH:MM`, `+HHMM` or `+HH` (and `-` forms).
pub fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidOffset(raw.to_string());
    let s = raw.trim();

    if s.eq_ignore_ascii_case(LOCAL_KEYWORD) {
        return Ok(local_offset());
    }
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = if let Some(rest) = s.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = s.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
