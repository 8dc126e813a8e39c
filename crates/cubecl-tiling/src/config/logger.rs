use core::sync::atomic::{AtomicU8, Ordering};

use super::TilingConfig;

/// Configuration for the log output of tiling operations.
///
/// Messages go through the `log` crate; the installed logger decides where they end up.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LoggerConfig {
    /// How much the tiling operations log.
    #[serde(default)]
    pub level: TilingLogLevel,
}

/// Verbosity of the tiling operations.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TilingLogLevel {
    /// Nothing is logged.
    #[serde(rename = "disabled")]
    Disabled,
    /// Derived tilings (`canonicalize`, `remove_dimension`) are logged at `debug`.
    #[default]
    #[serde(rename = "basic")]
    Basic,
    /// Every transform is also logged at `trace`.
    #[serde(rename = "full")]
    Full,
}

const UNINIT: u8 = u8::MAX;

static LOG_LEVEL: AtomicU8 = AtomicU8::new(UNINIT);

impl TilingLogLevel {
    /// The configured level, read once from the global config.
    pub fn current() -> Self {
        let level = LOG_LEVEL.load(Ordering::Relaxed);
        if level != UNINIT {
            return Self::from_u8(level);
        }

        let level = TilingConfig::get().logger.level;
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
        level
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Disabled,
            1 => Self::Basic,
            _ => Self::Full,
        }
    }

    pub(crate) fn logs_derivations() -> bool {
        Self::current() != Self::Disabled
    }

    pub(crate) fn logs_transforms() -> bool {
        Self::current() == Self::Full
    }
}
