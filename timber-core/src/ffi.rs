//! The C boundary of the timber-c library (`libtmb`).

use std::ffi::{CString, c_char, c_int};

use crate::{context::LogContext, level::LogLevel};

/// Layout of `tmb_log_ctx_t`. Field order and types must match `tmb.h`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawLogContext {
    pub log_level: c_int,
    pub line_no: c_int,
    pub filename: *const c_char,
    pub filename_len: c_int,
    pub filename_base: *const c_char,
    pub filename_base_len: c_int,
    pub funcname: *const c_char,
    pub funcname_len: c_int,
}

/// NUL-terminated copies of a [`LogContext`], kept alive for the duration of
/// one native call.
#[derive(Debug)]
pub struct MarshaledContext {
    level: LogLevel,
    line_no: c_int,
    filename: CString,
    filename_base: CString,
    funcname: CString,
}

impl MarshaledContext {
    pub fn new(ctx: &LogContext<'_>) -> Self {
        Self {
            level: ctx.level(),
            line_no: c_int::try_from(ctx.line_no()).unwrap_or(c_int::MAX),
            filename: c_string(ctx.filename()),
            filename_base: c_string(ctx.filename_base()),
            funcname: c_string(ctx.funcname()),
        }
    }

    /// Raw view whose pointers borrow from `self`.
    pub fn as_raw(&self) -> RawLogContext {
        RawLogContext {
            log_level: self.level.ordinal(),
            line_no: self.line_no,
            filename: self.filename.as_ptr(),
            filename_len: c_len(&self.filename),
            filename_base: self.filename_base.as_ptr(),
            filename_base_len: c_len(&self.filename_base),
            funcname: self.funcname.as_ptr(),
            funcname_len: c_len(&self.funcname),
        }
    }
}

/// C sees a string up to its first NUL, so cut there.
fn c_string(s: &str) -> CString {
    let end = s.find('\0').unwrap_or(s.len());
    CString::new(&s[..end]).unwrap_or_default()
}

fn c_len(s: &CString) -> c_int {
    c_int::try_from(s.as_bytes().len()).unwrap_or(c_int::MAX)
}

#[cfg(feature = "native")]
#[link(name = "tmb")]
unsafe extern "C" {
    pub fn tmb_print_version();
    pub fn tmb_get_version() -> *const c_char;
    pub fn tmb_log_default(ctx: RawLogContext, fmt: *const c_char, ...);
}
