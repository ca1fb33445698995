use std::borrow::Cow;

use pyo3::{prelude::*, types::PyString};
use timber::{CallSiteProvider, Site, UNKNOWN};

/// Call sites read from the live Python frame chain.
///
/// `current_site(0)` is the Python frame that called into the extension;
/// every skip follows `f_back` once. Frame references are dropped before
/// returning.
pub struct PyFrames<'py> {
    py: Python<'py>,
}

impl<'py> PyFrames<'py> {
    pub fn new(py: Python<'py>) -> Self {
        Self { py }
    }

    /// The innermost executing Python frame, if any.
    fn top_frame(&self) -> Option<Bound<'py, PyAny>> {
        let sys = self.py.import_bound("sys").ok()?;
        // Raises ValueError when no Python code is executing.
        sys.call_method0("_getframe").ok()
    }
}

impl CallSiteProvider for PyFrames<'_> {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        let mut frame = self.top_frame()?;
        for _ in 0..skip {
            frame = frame.getattr("f_back").ok()?;
            if frame.is_none() {
                return None;
            }
        }
        let line_no = frame
            .getattr("f_lineno")
            .and_then(|line| line.extract::<u32>())
            .unwrap_or(0);
        let code = frame.getattr("f_code").ok();
        let text = |attr: &str| -> Cow<'static, str> {
            code.as_ref()
                .and_then(|code| code.getattr(attr).ok())
                .and_then(|value| value.downcast_into::<PyString>().ok())
                .and_then(|value| value.to_str().map(str::to_owned).ok())
                .map_or(Cow::Borrowed(UNKNOWN), Cow::Owned)
        };
        Some(Site::new(text("co_filename"), line_no, text("co_name")))
    }
}
