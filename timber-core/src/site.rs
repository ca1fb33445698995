//! Caller-location resolution.
//!
//! A [`CallSiteProvider`] hands out the source location of the frame `skip`
//! levels above the binding boundary. Rust callers capture their location at
//! the call expression (`#[track_caller]` or the crate macros); host runtimes
//! with a live frame chain implement the trait by walking it.

use std::{borrow::Cow, panic::Location};

/// Placeholder for a filename or function name that could not be determined.
pub const UNKNOWN: &str = "<unknown>";

/// Source location of one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Site<'a> {
    pub filename: Cow<'a, str>,
    /// 0 when unknown.
    pub line_no: u32,
    pub funcname: Cow<'a, str>,
}

impl<'a> Site<'a> {
    pub fn new(
        filename: impl Into<Cow<'a, str>>,
        line_no: u32,
        funcname: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            line_no,
            funcname: funcname.into(),
        }
    }

    /// The sentinel site `("<unknown>", 0, "<unknown>")`.
    pub const fn unknown() -> Self {
        Self {
            filename: Cow::Borrowed(UNKNOWN),
            line_no: 0,
            funcname: Cow::Borrowed(UNKNOWN),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.line_no == 0 && self.filename == UNKNOWN && self.funcname == UNKNOWN
    }

    /// Reborrows this site without copying its strings.
    pub fn borrowed(&self) -> Site<'_> {
        Site {
            filename: Cow::Borrowed(&self.filename),
            line_no: self.line_no,
            funcname: Cow::Borrowed(&self.funcname),
        }
    }

    pub fn into_owned(self) -> Site<'static> {
        Site {
            filename: Cow::Owned(self.filename.into_owned()),
            line_no: self.line_no,
            funcname: Cow::Owned(self.funcname.into_owned()),
        }
    }

    /// Base name of [`Site::filename`].
    pub fn filename_base(&self) -> &str {
        basename(&self.filename)
    }
}

impl<'a> From<&Location<'a>> for Site<'a> {
    /// `Location` carries no function name, so it is left as the sentinel.
    fn from(location: &Location<'a>) -> Self {
        Site::new(location.file(), location.line(), UNKNOWN)
    }
}

/// Source of call sites for log attribution.
///
/// `current_site(0)` is the immediate caller of the binding; each increment of
/// `skip` moves one frame toward the bottom of the stack. `None` means the
/// frame is not available, either because there is no executing context or
/// because the chain ran out before `skip` steps.
pub trait CallSiteProvider {
    fn current_site(&self, skip: usize) -> Option<Site<'_>>;
}

impl<P: CallSiteProvider + ?Sized> CallSiteProvider for &P {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        (**self).current_site(skip)
    }
}

/// A location captured with `#[track_caller]` is a single frame.
impl CallSiteProvider for Location<'_> {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        (skip == 0).then(|| Site::from(self))
    }
}

impl CallSiteProvider for Site<'_> {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        (skip == 0).then(|| self.borrowed())
    }
}

/// An explicit frame chain, innermost frame first.
impl CallSiteProvider for [Site<'_>] {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        self.get(skip).map(Site::borrowed)
    }
}

impl CallSiteProvider for Vec<Site<'_>> {
    fn current_site(&self, skip: usize) -> Option<Site<'_>> {
        self.as_slice().current_site(skip)
    }
}

/// Resolves the call site `frame_offset` frames above the binding, falling
/// back to [`Site::unknown`] when the provider has nothing there.
pub fn resolve<P: CallSiteProvider + ?Sized>(provider: &P, frame_offset: usize) -> Site<'_> {
    provider
        .current_site(frame_offset)
        .unwrap_or_else(Site::unknown)
}

/// Everything after the last `/` or `\` of `path`, or `path` itself when it
/// holds neither.
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        // Both separators are single bytes.
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Short function name out of the `type_name` of an item nested in it.
///
/// `"my_crate::handlers::on_event::__f"` becomes `"on_event"`; closure
/// segments are skipped.
pub fn short_function_name(nested_item_path: &'static str) -> &'static str {
    let Some((mut path, _)) = nested_item_path.rsplit_once("::") else {
        return UNKNOWN;
    };
    while let Some(parent) = path.strip_suffix("::{{closure}}") {
        path = parent;
    }
    match path.rsplit_once("::") {
        Some((_, name)) => name,
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename("a/b/c.py"), "c.py");
        assert_eq!(basename("c.py"), "c.py");
        assert_eq!(basename(""), "");
        assert_eq!(basename("a/b/"), "");
        assert_eq!(basename("C:\\work\\app\\main.py"), "main.py");
        assert_eq!(basename("mixed/dir\\file.rs"), "file.rs");
        assert_eq!(basename("mixed\\dir/file.rs"), "file.rs");
        assert_eq!(basename("/"), "");
        assert_eq!(basename(UNKNOWN), UNKNOWN);
        assert_eq!(basename("dossier/é.py"), "é.py");
    }

    #[test]
    fn test_resolve_single_frame() {
        let site = Site::new("src/app/main.rs", 12, "run");
        assert_eq!(resolve(&site, 0), site);
        assert_eq!(resolve(&site, 1), Site::unknown());
    }

    #[test]
    fn test_resolve_walks_frame_chain() {
        let frames = vec![
            Site::new("pkg/inner.py", 3, "inner"),
            Site::new("pkg/middle.py", 30, "middle"),
            Site::new("main.py", 300, "<module>"),
        ];
        assert_eq!(resolve(&frames, 0).funcname, "inner");
        assert_eq!(resolve(&frames, 1).line_no, 30);
        assert_eq!(resolve(&frames, 2).filename, "main.py");
        assert!(resolve(&frames, 3).is_unknown());
        assert!(resolve(&frames, usize::MAX).is_unknown());
    }

    #[test]
    fn test_resolve_without_frames() {
        let frames: [Site<'static>; 0] = [];
        let site = resolve(&frames[..], 0);
        assert_eq!(site.filename, UNKNOWN);
        assert_eq!(site.line_no, 0);
        assert_eq!(site.funcname, UNKNOWN);
    }

    #[test]
    fn test_resolve_location() {
        let location = Location::caller();
        let site = resolve(location, 0);
        assert_eq!(site.filename, file!());
        assert_eq!(site.line_no, location.line());
        assert_eq!(site.funcname, UNKNOWN);
        assert!(resolve(location, 1).is_unknown());
    }

    #[test]
    fn test_short_function_name() {
        assert_eq!(short_function_name("app::handlers::on_event::__f"), "on_event");
        assert_eq!(
            short_function_name("app::main::{{closure}}::{{closure}}::__f"),
            "main"
        );
        assert_eq!(short_function_name("app::Server::start::__f"), "start");
        assert_eq!(short_function_name("main::__f"), "main");
        assert_eq!(short_function_name("__f"), UNKNOWN);
    }

    #[test]
    fn test_into_owned_outlives_source() {
        let owned = {
            let filename = String::from("jobs/worker.py");
            let funcname = String::from("run");
            Site::new(filename.as_str(), 31, funcname.as_str()).into_owned()
        };
        assert!(matches!(owned.filename, Cow::Owned(_)));
        assert_eq!(owned.filename, "jobs/worker.py");
        assert_eq!(owned.filename_base(), "worker.py");
        assert_eq!(owned.line_no, 31);
        assert_eq!(owned.funcname, "run");
    }
}
