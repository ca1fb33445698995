use crate::{
    error::{Result, TimberError},
    level::LogLevel,
    site::{Site, basename},
};

/// Attribution record handed to the backend with every message.
///
/// Built right before the log call and dropped right after it. Each length is
/// the byte length of its string, computed once here; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext<'a> {
    level: LogLevel,
    line_no: u32,
    filename: &'a str,
    filename_len: usize,
    filename_base: &'a str,
    filename_base_len: usize,
    funcname: &'a str,
    funcname_len: usize,
}

impl<'a> LogContext<'a> {
    pub fn new(level: LogLevel, site: &'a Site<'_>) -> Self {
        let filename: &'a str = &site.filename;
        let filename_base = basename(filename);
        let funcname: &'a str = &site.funcname;
        Self {
            level,
            line_no: site.line_no,
            filename,
            filename_len: filename.len(),
            filename_base,
            filename_base_len: filename_base.len(),
            funcname,
            funcname_len: funcname.len(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn line_no(&self) -> u32 {
        self.line_no
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    pub fn filename_len(&self) -> usize {
        self.filename_len
    }

    pub fn filename_base(&self) -> &'a str {
        self.filename_base
    }

    pub fn filename_base_len(&self) -> usize {
        self.filename_base_len
    }

    pub fn funcname(&self) -> &'a str {
        self.funcname
    }

    pub fn funcname_len(&self) -> usize {
        self.funcname_len
    }
}

/// Checks that `message` can be handed to the native logger as a C string.
pub fn validate_message(message: &str) -> Result<()> {
    match message.find('\0') {
        Some(pos) => Err(TimberError::InvalidArgument(format!(
            "message contains a null character at byte {pos}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::UNKNOWN;

    fn assert_lengths(ctx: &LogContext<'_>) {
        assert_eq!(ctx.filename_len(), ctx.filename().len());
        assert_eq!(ctx.filename_base_len(), ctx.filename_base().len());
        assert_eq!(ctx.funcname_len(), ctx.funcname().len());
    }

    #[test]
    fn test_context_from_site() {
        let site = Site::new("/srv/app/jobs/worker.py", 42, "handle");
        let ctx = LogContext::new(LogLevel::Warning, &site);
        assert_eq!(ctx.level(), LogLevel::Warning);
        assert_eq!(ctx.line_no(), 42);
        assert_eq!(ctx.filename(), "/srv/app/jobs/worker.py");
        assert_eq!(ctx.filename_base(), "worker.py");
        assert_eq!(ctx.funcname(), "handle");
        assert_eq!(ctx.filename_len(), 23);
        assert_eq!(ctx.filename_base_len(), 9);
        assert_eq!(ctx.funcname_len(), 6);
        assert_lengths(&ctx);
    }

    #[test]
    fn test_context_from_sentinel_site() {
        let site = Site::unknown();
        let ctx = LogContext::new(LogLevel::Trace, &site);
        assert_eq!(ctx.filename(), UNKNOWN);
        assert_eq!(ctx.filename_base(), UNKNOWN);
        assert_eq!(ctx.funcname(), UNKNOWN);
        assert_eq!(ctx.line_no(), 0);
        assert_eq!(ctx.filename_len(), UNKNOWN.len());
        assert_lengths(&ctx);
    }

    #[test]
    fn test_lengths_count_bytes() {
        let site = Site::new("données/journal.py", 7, "écrire");
        let ctx = LogContext::new(LogLevel::Info, &site);
        assert_eq!(ctx.filename_len(), "données/journal.py".len());
        assert_eq!(ctx.funcname_len(), 7);
        assert_lengths(&ctx);
    }

    #[test]
    fn test_validate_message() {
        assert!(validate_message("disk usage at 93%").is_ok());
        assert!(validate_message("").is_ok());
        assert!(matches!(
            validate_message("bad\0message"),
            Err(TimberError::InvalidArgument(_))
        ));
    }
}
