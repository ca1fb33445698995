use std::thread;

use timber::{LogLevel, Site};

fn load_settings(path: &str) -> timber::Result<()> {
    timber::info!(path)?;
    timber::warning!("settings file missing, using defaults")?;
    Ok(())
}

fn main() -> timber::Result<()> {
    timber::print_version();
    println!("library version: {}", timber::get_version());

    // file and line of this call, no function name
    timber::info("Hello, world!")?;
    // file, line and "load_settings"
    load_settings("/etc/app/settings.toml")?;

    // a host runtime that keeps its own frames hands them over innermost first
    let frames = [
        Site::new("scripts/jobs/cleanup.py", 14, "purge"),
        Site::new("scripts/main.py", 3, "<module>"),
    ];
    timber::default_logger().log_from(&frames[..], LogLevel::Debug, "purging stale entries")?;

    // the default logger is shared by every thread
    let handles: Vec<_> = (0..4)
        .map(|i| thread::spawn(move || timber::trace(&format!("worker {i} started"))))
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked")?;
    }

    // messages are passed through, never interpreted
    timber::error("100% %s %n {} literally")?;
    timber::fatal("fatal is only a severity, the process keeps running")?;

    timber::timber_config().init_global().expect("logger already set");
    log::info!("log facade records go through timber too");
    Ok(())
}
