// Process-lifetime traffic counters and the human formatting used by the
// status page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Traffic counters shared by all request handlers. Monotonic, reset only by
/// a process restart.
#[derive(Debug)]
pub struct Stats {
    requests_served: AtomicU64,
    bytes_served: AtomicU64,
    started: Instant,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            requests_served: AtomicU64::new(0),
            bytes_served: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    /// Bytes-served counter. Displayed on the status page; nothing feeds it
    /// yet.
    pub fn bytes_served(&self) -> u64 {
        self.bytes_served.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a duration in seconds as `N years N days N hours N minutes N seconds `,
/// showing each unit only when non-zero and carrying the remainder down.
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let years = days / 365;

    let mut out = String::new();
    if years > 0 {
        out.push_str(&format!("{} years ", years));
    }
    if days > 0 {
        out.push_str(&format!("{} days ", days % 365));
    }
    if hours > 0 {
        out.push_str(&format!("{} hours ", hours % 24));
    }
    if minutes > 0 {
        out.push_str(&format!("{} minutes ", minutes % 60));
    }
    out.push_str(&format!("{} seconds ", seconds % 60));
    out
}

/// Render a count reduced to its `floor(log10(n)/3)` magnitude group, with an
/// SI suffix (`k`/`M`/`G`/`T`) or the spelled-out English name.
pub fn format_count(number: u64, si: bool) -> String {
    if number == 0 {
        return "0 ".to_string();
    }

    let group = ((number as f64).log10() as usize) / 3;
    let mut n = number;
    for _ in 0..group {
        n /= 1000;
    }

    let mut out = format!("{} ", n);
    let suffix = if si {
        match group {
            1 => "k",
            2 => "M",
            3 => "G",
            4 => "T",
            _ => "",
        }
    } else {
        match group {
            1 => "thousand ",
            2 => "million ",
            3 => "billion ",
            4 => "trillion ",
            _ => "",
        }
    };
    out.push_str(suffix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let stats = Stats::new();
        assert_eq!(stats.requests_served(), 0);
        stats.record_request();
        stats.record_request();
        assert_eq!(stats.requests_served(), 2);
    }

    #[test]
    fn test_bytes_counter_is_never_incremented() {
        // Known quirk: the counter exists and is displayed, but nothing
        // feeds it.
        let stats = Stats::new();
        stats.record_request();
        assert_eq!(stats.bytes_served(), 0);
    }

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0), "0 seconds ");
    }

    #[test]
    fn test_format_duration_carries_units() {
        // 1 hour, 1 minute, 1 second
        assert_eq!(format_duration(3661), "1 hours 1 minutes 1 seconds ");
        assert_eq!(format_duration(59), "59 seconds ");
        assert_eq!(format_duration(60), "1 minutes 0 seconds ");
    }

    #[test]
    fn test_format_duration_years() {
        // 2 years + 3 days + 4 hours
        let secs = (2 * 365 + 3) * 24 * 3600 + 4 * 3600;
        assert_eq!(
            format_duration(secs),
            "2 years 3 days 4 hours 0 minutes 0 seconds "
        );
    }

    #[test]
    fn test_format_count_zero() {
        assert_eq!(format_count(0, true), "0 ");
        assert_eq!(format_count(0, false), "0 ");
    }

    #[test]
    fn test_format_count_si_groups() {
        assert_eq!(format_count(999, true), "999 ");
        assert_eq!(format_count(1_500, true), "1 k");
        assert_eq!(format_count(2_000_000, true), "2 M");
        assert_eq!(format_count(3_000_000_000, true), "3 G");
        assert_eq!(format_count(4_000_000_000_000, true), "4 T");
    }

    #[test]
    fn test_format_count_spelled_out() {
        assert_eq!(format_count(1_500, false), "1 thousand ");
        assert_eq!(format_count(2_000_000, false), "2 million ");
        assert_eq!(format_count(7, false), "7 ");
    }
}
