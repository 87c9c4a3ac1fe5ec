// This file sets up the application's logging.
// Every module emits `tracing` events; this is the one place that decides
// where they go and how verbose they are. The core algorithms never log.

use tracing::Level;

/// Installs the process-wide `tracing` subscriber.
/// This function should be called once at application startup, before any work is done.
/// Calling it again is harmless: the second installation attempt is ignored.
///
/// # Arguments
/// * `debug`: If `true`, debug events are printed; otherwise only info, warn and error.
pub fn init(debug: bool) {
    let max_level = if debug { Level::DEBUG } else { Level::INFO };

    // Logs go to stderr so that stdout stays clean for anything a caller might pipe.
    let installed = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("logger initialized in DEBUG mode");
    }
}
