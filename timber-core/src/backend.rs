use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::Utc;
use colored::{ColoredString, Colorize};

use crate::{config::TIMBER_CONFIG, context::LogContext, level::LogLevel};

/// The external logging library as seen by the binding: print the version,
/// report the version, and log one message with its attribution context.
///
/// `message` never contains a NUL; callers validate it first.
pub trait Backend {
    fn print_version(&self);
    fn get_version(&self) -> String;
    fn log(&self, ctx: &LogContext<'_>, message: &str);
}

impl<B: Backend + ?Sized> Backend for &B {
    fn print_version(&self) {
        (**self).print_version()
    }
    fn get_version(&self) -> String {
        (**self).get_version()
    }
    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        (**self).log(ctx, message)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn print_version(&self) {
        (**self).print_version()
    }
    fn get_version(&self) -> String {
        (**self).get_version()
    }
    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        (**self).log(ctx, message)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn print_version(&self) {
        (**self).print_version()
    }
    fn get_version(&self) -> String {
        (**self).get_version()
    }
    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        (**self).log(ctx, message)
    }
}

/// The default logger of `libtmb`.
#[cfg(feature = "native")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

#[cfg(feature = "native")]
impl Backend for NativeBackend {
    fn print_version(&self) {
        // SAFETY: takes no arguments and only writes to the library's output target.
        unsafe { crate::ffi::tmb_print_version() }
    }

    fn get_version(&self) -> String {
        // SAFETY: returns a pointer to a static NUL-terminated string or null.
        let version = unsafe { crate::ffi::tmb_get_version() };
        if version.is_null() {
            return crate::site::UNKNOWN.into();
        }
        // SAFETY: non-null and NUL-terminated, see above.
        unsafe { std::ffi::CStr::from_ptr(version) }
            .to_string_lossy()
            .into_owned()
    }

    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        let Ok(message) = std::ffi::CString::new(message) else {
            return;
        };
        let marshaled = crate::ffi::MarshaledContext::new(ctx);
        // SAFETY: every pointer in the raw context and `message` stays alive
        // until the call returns; the message goes through "%s" so it is never
        // read as a format string.
        unsafe { crate::ffi::tmb_log_default(marshaled.as_raw(), c"%s".as_ptr(), message.as_ptr()) }
    }
}

/// Stand-in for the native default logger when `libtmb` is not linked.
///
/// Writes one line per call to stderr in the native layout and reports this
/// crate's version.
#[derive(Debug, Clone)]
pub struct ConsoleBackend {
    color: bool,
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self {
            color: TIMBER_CONFIG.COLOR,
        }
    }
}

impl ConsoleBackend {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn level_tag(&self, level: LogLevel) -> ColoredString {
        let tag = level.name();
        if !self.color {
            return tag.normal();
        }
        match level {
            LogLevel::Fatal => tag.red().bold(),
            LogLevel::Error => tag.red(),
            LogLevel::Warning => tag.yellow(),
            LogLevel::Info => tag.green(),
            LogLevel::Debug => tag.blue(),
            LogLevel::Trace => tag.purple(),
        }
    }

    pub fn format_line(&self, ctx: &LogContext<'_>, message: &str) -> String {
        let time = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        let level = self.level_tag(ctx.level());
        let base = ctx.filename_base();
        let line = ctx.line_no();
        let func = ctx.funcname();
        format!("[{time} {level} {base}:{line} {func}] {message}")
    }
}

impl Backend for ConsoleBackend {
    fn print_version(&self) {
        writeln!(std::io::stderr().lock(), "timber v{}", self.get_version()).ok();
    }

    fn get_version(&self) -> String {
        env!("CARGO_PKG_VERSION").into()
    }

    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        let line = self.format_line(ctx, message);
        writeln!(std::io::stderr().lock(), "{line}").ok();
    }
}

#[cfg(feature = "native")]
pub type DefaultBackend = NativeBackend;
#[cfg(not(feature = "native"))]
pub type DefaultBackend = ConsoleBackend;

/// One call received by a [`CaptureBackend`], with owned copies of the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: LogLevel,
    pub line_no: u32,
    pub filename: String,
    pub filename_len: usize,
    pub filename_base: String,
    pub filename_base_len: usize,
    pub funcname: String,
    pub funcname_len: usize,
    pub message: String,
}

impl From<(&LogContext<'_>, &str)> for CapturedLog {
    fn from((ctx, message): (&LogContext<'_>, &str)) -> Self {
        Self {
            level: ctx.level(),
            line_no: ctx.line_no(),
            filename: ctx.filename().into(),
            filename_len: ctx.filename_len(),
            filename_base: ctx.filename_base().into(),
            filename_base_len: ctx.filename_base_len(),
            funcname: ctx.funcname().into(),
            funcname_len: ctx.funcname_len(),
            message: message.into(),
        }
    }
}

/// Backend that records every call instead of emitting it. Meant for tests of
/// code that logs through timber.
#[derive(Debug)]
pub struct CaptureBackend {
    version: String,
    logs: Mutex<Vec<CapturedLog>>,
    version_prints: Mutex<usize>,
}

impl Default for CaptureBackend {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl CaptureBackend {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.into(),
            logs: Mutex::new(Vec::new()),
            version_prints: Mutex::new(0),
        }
    }

    pub fn logs(&self) -> Vec<CapturedLog> {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<CapturedLog> {
        std::mem::take(&mut *self.logs.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn version_prints(&self) -> usize {
        *self
            .version_prints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for CaptureBackend {
    fn print_version(&self) {
        *self
            .version_prints
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
    }

    fn get_version(&self) -> String {
        self.version.clone()
    }

    fn log(&self, ctx: &LogContext<'_>, message: &str) {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedLog::from((ctx, message)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Site;

    #[test]
    fn test_console_line_layout() {
        let backend = ConsoleBackend::new(false);
        let site = Site::new("/opt/svc/handlers/api.py", 17, "get_user");
        let ctx = LogContext::new(LogLevel::Warning, &site);
        let line = backend.format_line(&ctx, "100% of quota used");
        assert!(line.starts_with('['));
        assert!(line.ends_with(" WARNING api.py:17 get_user] 100% of quota used"));
    }

    #[test]
    fn test_console_version_is_stable() {
        let backend = ConsoleBackend::new(false);
        assert_eq!(backend.get_version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(backend.get_version(), backend.get_version());
    }

    #[test]
    fn test_capture_backend_records_calls() {
        let backend = Arc::new(CaptureBackend::new("9.9.9"));
        let shared: Box<dyn Backend> = Box::new(Arc::clone(&backend));
        let site = Site::new("a/b.py", 3, "f");
        shared.log(&LogContext::new(LogLevel::Info, &site), "hello");
        shared.print_version();
        assert_eq!(shared.get_version(), "9.9.9");
        assert_eq!(backend.version_prints(), 1);
        let logs = backend.take();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "hello");
        assert_eq!(logs[0].filename_base, "b.py");
        assert!(backend.logs().is_empty());
    }
}
