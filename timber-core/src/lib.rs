//! # timber-core
//! Core types for timber - call-site resolution, log contexts and the boundary
//! to the timber-c logging library.

mod backend;
mod config;
mod context;
mod error;
pub mod ffi;
mod level;
mod site;

#[cfg(feature = "native")]
pub use backend::NativeBackend;
pub use backend::{Backend, CaptureBackend, CapturedLog, ConsoleBackend, DefaultBackend};
pub use config::{TIMBER_CONFIG, TimberConfig};
pub use context::{LogContext, validate_message};
pub use error::{Result, TimberError};
pub use level::{
    LEVEL_DEBUG, LEVEL_ERROR, LEVEL_FATAL, LEVEL_INFO, LEVEL_TRACE, LEVEL_WARNING, LogLevel,
};
pub use site::{CallSiteProvider, Site, UNKNOWN, basename, resolve, short_function_name};
