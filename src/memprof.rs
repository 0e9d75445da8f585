//! Memory and timing profiling utilities
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status (0 elsewhere)
//! - Timing: Uses std::time::Instant for precise measurements
//!
//! Everything is reported at debug level under the `memprof` target, so
//! `RUST_LOG=memprof=debug` turns it on without other noise.

use std::fs;
use std::time::Instant;
use tracing::debug;

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
pub fn get_rss_bytes() -> u64 {
    let Ok(status) = fs::read_to_string("/proc/self/status") else {
        return 0;
    };
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        // Format: "VmRSS:    123456 kB"
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Memory checkpoint that returns the value for comparison
pub fn checkpoint(label: &str) -> f64 {
    let rss = get_rss_mb();
    debug!(target: "memprof", rss_mb = rss, "{}", label);
    rss
}

/// Log the RSS change since a previous checkpoint, returns the current RSS
pub fn delta(label: &str, previous: f64) -> f64 {
    let current = get_rss_mb();
    debug!(
        target: "memprof",
        rss_mb = current,
        delta_mb = current - previous,
        "{}",
        label
    );
    current
}

/// Start a new timing checkpoint, returns the Instant
pub fn time_start(label: &str) -> Instant {
    debug!(target: "memprof", "{} ...", label);
    Instant::now()
}

/// Log elapsed time since `section_start` and since `start`, returns a new Instant for chaining
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    debug!(
        target: "memprof",
        section_s = section_start.elapsed().as_secs_f64(),
        total_s = start.elapsed().as_secs_f64(),
        "{}",
        label
    );
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_returns_current_rss() {
        let before = checkpoint("before");
        let after = delta("after", before);
        assert!(after >= 0.0);
        if cfg!(target_os = "linux") {
            assert!(before > 0.0);
        }
    }
}
