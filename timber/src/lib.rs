//! # timber
//! Rust bindings for the timber-c logging library.
//!
//! All formatting, sinks and filtering happen in the native library; this
//! crate resolves who is calling, packs that into a log context and hands the
//! message over untouched. Build with the `native` feature to link `libtmb`;
//! without it, messages go to a console stand-in with the same line layout.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! timber = "0.1.0"
//! ```
//!
//! ```rust
//! timber::info("Hello, world!").unwrap();
//! timber::warning("disk usage at 93%").unwrap();
//! println!("timber {}", timber::get_version());
//! ```
//!
//! ## Attribution
//! The six level functions are `#[track_caller]`: the file and line of the
//! call expression end up in the log context. The macros additionally capture
//! the enclosing function name.
//!
//! ```rust
//! fn connect() -> timber::Result<()> {
//!     timber::error!("connection refused")?; // funcname = "connect"
//!     Ok(())
//! }
//! connect().unwrap();
//! ```
//!
//! ## Injecting a backend
//! ```rust
//! use std::sync::Arc;
//! use timber::{CaptureBackend, LogLevel, timber_config};
//!
//! let backend = Arc::new(CaptureBackend::default());
//! let logger = timber_config().build(Arc::clone(&backend));
//! logger.debug("cache warmed").unwrap();
//! assert_eq!(backend.logs()[0].level, LogLevel::Debug);
//! ```
//!
//! ## The `log` facade
//! ```rust
//! timber::timber_config().init_global().unwrap();
//! log::info!("routed through timber");
//! ```

mod bridge;
mod macros;

use std::{panic::Location, sync::LazyLock};

use log::{LevelFilter, SetLoggerError};

pub use bridge::TimberLogger;
#[cfg(feature = "native")]
pub use timber_core::NativeBackend;
pub use timber_core::{
    Backend, CallSiteProvider, CaptureBackend, CapturedLog, ConsoleBackend, DefaultBackend,
    LEVEL_DEBUG, LEVEL_ERROR, LEVEL_FATAL, LEVEL_INFO, LEVEL_TRACE, LEVEL_WARNING, LogContext,
    LogLevel, Result, Site, TIMBER_CONFIG, TimberError, UNKNOWN, basename, resolve,
    short_function_name,
};

/// A handle on a logging backend: the binding's entry points.
#[derive(Debug)]
pub struct Timber<B> {
    backend: B,
    frame_offset: usize,
}

impl<B: Backend + Default> Default for Timber<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Backend> Timber<B> {
    /// Wraps `backend`, with the frame offset from `TIMBER_FRAME_OFFSET`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            frame_offset: TIMBER_CONFIG.FRAME_OFFSET,
        }
    }

    pub fn with_frame_offset(self, frame_offset: usize) -> Self {
        Self {
            frame_offset,
            ..self
        }
    }

    pub fn frame_offset(&self) -> usize {
        self.frame_offset
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Prints the library version to the backend's output.
    pub fn print_version(&self) {
        self.backend.print_version()
    }

    pub fn get_version(&self) -> String {
        self.backend.get_version()
    }

    /// Logs `message` at `level`, attributed to the site `provider` reports at
    /// this handle's frame offset (or the sentinel site if it has none).
    ///
    /// A message that cannot cross the C boundary is rejected before the
    /// backend sees anything.
    pub fn log_from<P: CallSiteProvider + ?Sized>(
        &self,
        provider: &P,
        level: LogLevel,
        message: &str,
    ) -> Result<()> {
        timber_core::validate_message(message)?;
        let site = resolve(provider, self.frame_offset);
        self.emit(&site, level, message);
        Ok(())
    }

    /// Logs `message` attributed to an already resolved `site`.
    pub fn log_site(&self, site: &Site<'_>, level: LogLevel, message: &str) -> Result<()> {
        timber_core::validate_message(message)?;
        self.emit(site, level, message);
        Ok(())
    }

    fn emit(&self, site: &Site<'_>, level: LogLevel, message: &str) {
        let ctx = LogContext::new(level, site);
        self.backend.log(&ctx, message);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str) -> Result<()> {
        self.log_from(Location::caller(), level, message)
    }

    #[track_caller]
    pub fn fatal(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    #[track_caller]
    pub fn error(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    #[track_caller]
    pub fn warning(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    #[track_caller]
    pub fn info(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[track_caller]
    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[track_caller]
    pub fn trace(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Trace, message)
    }
}

/// Process-wide handle on the library's default logger.
static DEFAULT_LOGGER: LazyLock<Timber<DefaultBackend>> = LazyLock::new(Timber::default);

pub fn default_logger() -> &'static Timber<DefaultBackend> {
    &DEFAULT_LOGGER
}

pub fn print_version() {
    default_logger().print_version()
}

pub fn get_version() -> String {
    default_logger().get_version()
}

#[track_caller]
pub fn fatal(message: &str) -> Result<()> {
    default_logger().fatal(message)
}

#[track_caller]
pub fn error(message: &str) -> Result<()> {
    default_logger().error(message)
}

#[track_caller]
pub fn warning(message: &str) -> Result<()> {
    default_logger().warning(message)
}

#[track_caller]
pub fn info(message: &str) -> Result<()> {
    default_logger().info(message)
}

#[track_caller]
pub fn debug(message: &str) -> Result<()> {
    default_logger().debug(message)
}

#[track_caller]
pub fn trace(message: &str) -> Result<()> {
    default_logger().trace(message)
}

/// Builder for timber handles and for the `log` facade bridge.
pub struct ConfigBuilder {
    frame_offset: usize,
    max_level: LevelFilter,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            frame_offset: TIMBER_CONFIG.FRAME_OFFSET,
            max_level: TIMBER_CONFIG.MAX_LEVEL,
        }
    }
}

impl ConfigBuilder {
    /// Frames to skip above the binding boundary.
    pub fn with_frame_offset(self, frame_offset: usize) -> Self {
        Self {
            frame_offset,
            ..self
        }
    }
    /// Max level set on the `log` facade by `init_global`.
    pub fn with_max_level(self, max_level: LevelFilter) -> Self {
        Self { max_level, ..self }
    }
    pub fn build<B: Backend>(self, backend: B) -> Timber<B> {
        Timber::new(backend).with_frame_offset(self.frame_offset)
    }
    /// Routes the `log` facade into the default logger.
    pub fn init_global(self) -> std::result::Result<(), SetLoggerError> {
        self.init_global_with(DefaultBackend::default())
    }
    /// Routes the `log` facade into `backend`.
    pub fn init_global_with<B>(self, backend: B) -> std::result::Result<(), SetLoggerError>
    where
        B: Backend + Send + Sync + 'static,
    {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(TimberLogger::new(self.build(backend))))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// Returns a default ConfigBuilder.
pub fn timber_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn capture() -> (Arc<CaptureBackend>, Timber<Arc<CaptureBackend>>) {
        let backend = Arc::new(CaptureBackend::new("1.2.3"));
        let logger = Timber::new(Arc::clone(&backend)).with_frame_offset(0);
        (backend, logger)
    }

    #[test]
    fn test_entry_points_tag_levels() {
        let (backend, logger) = capture();
        logger.fatal("same").unwrap();
        logger.error("same").unwrap();
        logger.warning("same").unwrap();
        logger.info("same").unwrap();
        logger.debug("same").unwrap();
        logger.trace("same").unwrap();
        let logs = backend.take();
        let levels: Vec<_> = logs.iter().map(|log| log.level).collect();
        assert_eq!(levels, LogLevel::ALL);
        for log in &logs {
            assert_eq!(log.message, "same");
            assert_eq!(log.filename, file!());
            assert_eq!(log.filename_base, "lib.rs");
            assert_eq!(log.funcname, UNKNOWN);
            assert_eq!(log.filename_len, log.filename.len());
            assert_eq!(log.filename_base_len, log.filename_base.len());
            assert_eq!(log.funcname_len, log.funcname.len());
        }
    }

    #[test]
    fn test_contexts_differ_only_in_level() {
        let (backend, logger) = capture();
        for level in LogLevel::ALL {
            logger.log_site(&Site::new("svc/app.py", 9, "tick"), level, "tick").unwrap();
        }
        let logs = backend.take();
        let first = &logs[0];
        for (log, level) in logs.iter().zip(LogLevel::ALL) {
            assert_eq!(log.level, level);
            let retagged = CapturedLog {
                level: first.level,
                ..log.clone()
            };
            assert_eq!(&retagged, first);
        }
    }

    #[test]
    fn test_caller_line_is_recorded() {
        let (backend, logger) = capture();
        let line = line!() + 1;
        logger.info("here").unwrap();
        assert_eq!(backend.logs()[0].line_no, line);
    }

    #[test]
    fn test_invalid_message_is_not_forwarded() {
        let (backend, logger) = capture();
        for level in LogLevel::ALL {
            let result = logger.log(level, "nul\0byte");
            assert!(matches!(result, Err(TimberError::InvalidArgument(_))));
        }
        assert!(backend.logs().is_empty());
    }

    #[test]
    fn test_message_is_not_a_format_string() {
        let (backend, logger) = capture();
        logger.info("%s %d %n {}").unwrap();
        assert_eq!(backend.logs()[0].message, "%s %d %n {}");
    }

    #[test]
    fn test_frame_offset_beyond_stack() {
        let (backend, logger) = capture();
        let logger = logger.with_frame_offset(1);
        logger.warning("deep").unwrap();
        let frames = [Site::new("inner.py", 1, "inner"), Site::new("outer.py", 2, "outer")];
        logger.log_from(&frames[..], LogLevel::Info, "walk").unwrap();
        let logs = backend.take();
        assert_eq!(logs[0].filename, UNKNOWN);
        assert_eq!(logs[0].line_no, 0);
        assert_eq!(logs[0].funcname, UNKNOWN);
        assert_eq!(logs[0].filename_len, UNKNOWN.len());
        assert_eq!(logs[1].funcname, "outer");
        assert_eq!(logs[1].line_no, 2);
    }

    #[test]
    fn test_version_reporting() {
        let (backend, logger) = capture();
        let first = logger.get_version();
        assert_eq!(first, "1.2.3");
        for _ in 0..10 {
            assert_eq!(logger.get_version(), first);
        }
        logger.print_version();
        logger.print_version();
        assert_eq!(backend.version_prints(), 2);
    }

    #[test]
    fn test_default_logger_version_is_stable() {
        assert_eq!(get_version(), get_version());
        assert!(std::ptr::eq(default_logger(), default_logger()));
    }

    #[test]
    fn test_builder_sets_frame_offset() {
        let logger = timber_config()
            .with_frame_offset(3)
            .build(CaptureBackend::default());
        assert_eq!(logger.frame_offset(), 3);
    }
}
