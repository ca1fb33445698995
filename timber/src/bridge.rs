use log::{Log, Metadata, Record};
use timber_core::{Backend, Site, UNKNOWN};

use crate::Timber;

/// `log` facade implementation that forwards every record to a timber backend.
///
/// The record's module path stands in for the function name. Filtering is left
/// to the backend, so `enabled` accepts everything the facade lets through.
pub struct TimberLogger<B> {
    timber: Timber<B>,
}

impl<B: Backend> TimberLogger<B> {
    pub fn new(timber: Timber<B>) -> Self {
        Self { timber }
    }

    pub fn timber(&self) -> &Timber<B> {
        &self.timber
    }
}

impl<B: Backend + Send + Sync> Log for TimberLogger<B> {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let site = Site::new(
            record.file().unwrap_or(UNKNOWN),
            record.line().unwrap_or(0),
            record.module_path().unwrap_or(UNKNOWN),
        );
        let message = record.args().to_string();
        // The facade has no error channel; a message with a NUL is dropped.
        self.timber
            .log_site(&site, record.level().into(), &message)
            .ok();
    }

    fn flush(&self) {}
}
