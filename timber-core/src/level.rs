use std::fmt;

use crate::error::TimberError;

/// Severity tag forwarded to the native logger.
///
/// Discriminants are the ordinals of the `TMB_LOG_LEVEL_*` enum in `tmb.h`,
/// `Fatal` being the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

pub const LEVEL_FATAL: i32 = LogLevel::Fatal.ordinal();
pub const LEVEL_ERROR: i32 = LogLevel::Error.ordinal();
pub const LEVEL_WARNING: i32 = LogLevel::Warning.ordinal();
pub const LEVEL_INFO: i32 = LogLevel::Info.ordinal();
pub const LEVEL_DEBUG: i32 = LogLevel::Debug.ordinal();
pub const LEVEL_TRACE: i32 = LogLevel::Trace.ordinal();

impl LogLevel {
    /// All levels, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = TimberError;

    fn try_from(ordinal: i32) -> Result<Self, TimberError> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.ordinal() == ordinal)
            .ok_or(TimberError::UnknownLevel(ordinal))
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

#[test]
fn test_level_ordinals_and_names() {
    let exported = [
        (LEVEL_FATAL, "FATAL"),
        (LEVEL_ERROR, "ERROR"),
        (LEVEL_WARNING, "WARNING"),
        (LEVEL_INFO, "INFO"),
        (LEVEL_DEBUG, "DEBUG"),
        (LEVEL_TRACE, "TRACE"),
    ];
    for (level, (ordinal, name)) in LogLevel::ALL.into_iter().zip(exported) {
        assert_eq!(level.ordinal(), ordinal);
        assert_eq!(level.name(), name);
        assert_eq!(level.to_string(), name);
        assert_eq!(LogLevel::try_from(ordinal), Ok(level));
    }
    assert!(LogLevel::Fatal < LogLevel::Trace);
}

#[test]
fn test_unknown_ordinal() {
    assert_eq!(LogLevel::try_from(6), Err(TimberError::UnknownLevel(6)));
    assert_eq!(LogLevel::try_from(-1), Err(TimberError::UnknownLevel(-1)));
}

#[test]
fn test_from_log_level() {
    assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warning);
    assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Trace);
    assert_eq!(LogLevel::from(log::Level::Error), LogLevel::Error);
}
