use std::sync::LazyLock;

use derive_from_env::FromEnv;
use log::LevelFilter;

/// Settings read once from `TIMBER_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "TIMBER")]
#[allow(non_snake_case)]
pub struct TimberConfig {
    /// Frames skipped above the binding boundary when resolving the caller.
    #[from_env(default = "0")]
    pub FRAME_OFFSET: usize,
    /// Max level installed on the `log` facade by `init_global`.
    #[from_env(default = "trace")]
    pub MAX_LEVEL: LevelFilter,
    /// Colored level tags for the console stand-in.
    #[from_env(default = "true")]
    pub COLOR: bool,
}

impl Default for TimberConfig {
    fn default() -> Self {
        Self {
            FRAME_OFFSET: 0,
            MAX_LEVEL: LevelFilter::Trace,
            COLOR: true,
        }
    }
}

/// A malformed `TIMBER_*` variable falls back to the defaults with a warning.
fn config_or_default<E: std::fmt::Debug>(loaded: Result<TimberConfig, E>) -> TimberConfig {
    loaded.unwrap_or_else(|e| {
        log::warn!("Invalid TIMBER_* environment configuration, using defaults: {e:?}");
        TimberConfig::default()
    })
}

pub static TIMBER_CONFIG: LazyLock<TimberConfig> =
    LazyLock::new(|| config_or_default(TimberConfig::from_env()));
