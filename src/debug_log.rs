//! Opt-in debug logging for load and report timings.
//!
//! Enable by setting environment variable: SALESRAIL_DEBUG_LOG=1
//! Logs are written to salesrail-debug.log in the system temp directory.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static START_TIME: OnceLock<Instant> = OnceLock::new();
static LOG_FILE: OnceLock<Mutex<std::fs::File>> = OnceLock::new();

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("salesrail-debug.log")
}

/// Initialize debug logging. Call once at startup.
pub fn init() {
    if std::env::var("SALESRAIL_DEBUG_LOG").is_err() {
        return;
    }

    let file = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path())
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("⚠️  Could not open debug log {}: {e}", log_path().display());
            return;
        }
    };

    START_TIME.get_or_init(Instant::now);
    LOG_FILE.get_or_init(|| Mutex::new(file));
    ENABLED.store(true, Ordering::SeqCst);
    log("DEBUG", "init", "Debug logging initialized");
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Log a debug message with elapsed time since `init`.
pub fn log(category: &str, action: &str, detail: &str) {
    if !is_enabled() {
        return;
    }

    let elapsed = START_TIME
        .get()
        .map(|s| s.elapsed().as_millis())
        .unwrap_or(0);

    let msg = format!("[{:>8}ms] [{}] {} - {}\n", elapsed, category, action, detail);

    if let Some(file_mutex) = LOG_FILE.get()
        && let Ok(mut file) = file_mutex.lock()
    {
        let _ = file.write_all(msg.as_bytes());
        let _ = file.flush();
    }
}

/// RAII guard that logs how long a span took when dropped.
pub struct TimedSpan {
    category: &'static str,
    label: String,
    started: Instant,
}

impl TimedSpan {
    pub fn new(category: &'static str, label: impl Into<String>) -> Self {
        let label = label.into();
        log(category, "START", &label);
        Self {
            category,
            label,
            started: Instant::now(),
        }
    }
}

impl Drop for TimedSpan {
    fn drop(&mut self) {
        if is_enabled() {
            let detail = format!("{} ({} ms)", self.label, self.started.elapsed().as_millis());
            log(self.category, "DONE", &detail);
        }
    }
}
