//! Logging macros that capture the full call site at the call expression.

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::short_function_name(type_name_of(__f))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {
        $crate::Site::new(::core::file!(), ::core::line!(), $crate::__function_name!())
    };
}

/// Logs a message at the given level with `file!()`, `line!()` and the
/// enclosing function name as attribution. Evaluates to `timber::Result<()>`.
///
/// ```rust
/// use timber::{CaptureBackend, LogLevel, Timber};
///
/// fn rebuild_index(logger: &Timber<CaptureBackend>) {
///     timber::emit!(logger: logger, LogLevel::Info, "index rebuilt").unwrap();
/// }
///
/// let logger = Timber::new(CaptureBackend::default());
/// rebuild_index(&logger);
/// assert_eq!(logger.backend().logs()[0].funcname, "rebuild_index");
/// ```
#[macro_export]
macro_rules! emit {
    (logger: $logger:expr, $level:expr, $message:expr $(,)?) => {
        ($logger).log_site(&$crate::__call_site!(), $level, $message)
    };
    ($level:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $crate::default_logger(), $level, $message)
    };
}

/// Logs a fatal message. Does not terminate the process.
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Fatal, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Fatal, $message)
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Error, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Error, $message)
    };
}

#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Warning, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Warning, $message)
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Info, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Info, $message)
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Debug, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Debug, $message)
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $message:expr $(,)?) => {
        $crate::emit!(logger: $logger, $crate::LogLevel::Trace, $message)
    };
    ($message:expr $(,)?) => {
        $crate::emit!($crate::LogLevel::Trace, $message)
    };
}
