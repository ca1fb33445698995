//! # _timber
//! Python bindings for the timber-c logging library.
//!
//! ```python
//! import _timber
//!
//! _timber.info("service started")   # attributed to the calling Python frame
//! if _timber.LEVEL_DEBUG <= threshold:
//!     _timber.debug("verbose details")
//! print(_timber.get_version())
//! ```

mod frames;

use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyString, PyTuple},
};
use timber::{
    Backend, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_FATAL, LEVEL_INFO, LEVEL_TRACE, LEVEL_WARNING,
    LogLevel, Timber, TimberError,
};

pub use frames::PyFrames;

fn map_err(e: TimberError) -> PyErr {
    match e {
        TimberError::InvalidArgument(msg) => PyValueError::new_err(msg),
        TimberError::UnknownLevel(ordinal) => {
            PyValueError::new_err(format!("unknown log level {ordinal}"))
        }
    }
}

/// The single `str` positional argument of a logging call.
fn message_arg<'py>(args: &Bound<'py, PyTuple>) -> PyResult<Bound<'py, PyString>> {
    if args.len() != 1 {
        return Err(PyTypeError::new_err(format!(
            "function takes exactly 1 argument ({} given)",
            args.len()
        )));
    }
    let arg = args.get_item(0)?;
    match arg.downcast_into::<PyString>() {
        Ok(message) => Ok(message),
        Err(e) => Err(PyTypeError::new_err(format!(
            "argument 1 must be str, not {}",
            e.into_inner().get_type().qualname()?
        ))),
    }
}

/// Validates `args` and logs through `timber`, attributed to the calling
/// Python frame. Nothing reaches the backend when validation fails.
pub fn emit_with<B: Backend>(
    timber: &Timber<B>,
    py: Python<'_>,
    level: LogLevel,
    args: &Bound<'_, PyTuple>,
) -> PyResult<()> {
    let message = message_arg(args)?;
    let message = message.to_str()?;
    timber
        .log_from(&PyFrames::new(py), level, message)
        .map_err(map_err)
}

/// Print the Timber library version
#[pyfunction]
fn print_version() {
    timber::print_version()
}

/// Get the Timber library version string
#[pyfunction]
fn get_version() -> String {
    timber::get_version()
}

/// Log a fatal message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn fatal(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Fatal, args)
}

/// Log an error message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn error(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Error, args)
}

/// Log a warning message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn warning(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Warning, args)
}

/// Log an info message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn info(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Info, args)
}

/// Log a debug message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn debug(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Debug, args)
}

/// Log a trace message using the default logger
#[pyfunction]
#[pyo3(signature = (*args))]
fn trace(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<()> {
    emit_with(timber::default_logger(), py, LogLevel::Trace, args)
}

/// Registers the functions and `LEVEL_*` constants on `m`.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(print_version, m)?)?;
    m.add_function(wrap_pyfunction!(get_version, m)?)?;

    m.add_function(wrap_pyfunction!(fatal, m)?)?;
    m.add_function(wrap_pyfunction!(error, m)?)?;
    m.add_function(wrap_pyfunction!(warning, m)?)?;
    m.add_function(wrap_pyfunction!(info, m)?)?;
    m.add_function(wrap_pyfunction!(debug, m)?)?;
    m.add_function(wrap_pyfunction!(trace, m)?)?;

    m.add("LEVEL_FATAL", LEVEL_FATAL)?;
    m.add("LEVEL_ERROR", LEVEL_ERROR)?;
    m.add("LEVEL_WARNING", LEVEL_WARNING)?;
    m.add("LEVEL_INFO", LEVEL_INFO)?;
    m.add("LEVEL_DEBUG", LEVEL_DEBUG)?;
    m.add("LEVEL_TRACE", LEVEL_TRACE)?;

    m.add("__doc__", "Python bindings for Timber logging library")?;
    Ok(())
}

#[pymodule]
fn _timber(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register(m)
}
