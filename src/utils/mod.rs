// meridian-service/src/utils/mod.rs
use chrono::{DateTime, Utc};

pub mod roster_storage;

// Parsing and formatting of wall-clock text
pub mod clock_text {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref HHMM: Regex = Regex::new(r"^([01]?\d|2[0-4]):([0-5]\d)$").unwrap();
    }

    // Parse "HH:MM" (24-hour) into minutes since midnight; "24:00" is the only 24 hour value
    pub fn parse_hhmm(value: &str) -> Option<u16> {
        let caps = HHMM.captures(value.trim())?;
        let hours: u16 = caps[1].parse().ok()?;
        let minutes: u16 = caps[2].parse().ok()?;

        if hours == 24 && minutes != 0 {
            return None;
        }

        Some(hours * 60 + minutes)
    }

    // Render minutes since midnight as "H:MM AM/PM"
    pub fn format_12h(minutes_since_midnight: u32) -> String {
        let minutes = minutes_since_midnight % (24 * 60);
        let hour = minutes / 60;
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, minutes % 60, suffix)
    }

    // Compact hour label used on the scheduler ruler: "12AM", "2PM"
    pub fn format_hour_label(hour: u32) -> String {
        match hour % 24 {
            0 => "12AM".to_string(),
            h if h < 12 => format!("{}AM", h),
            12 => "12PM".to_string(),
            h => format!("{}PM", h - 12),
        }
    }

    // "UTC+5:30", "UTC-4", "UTC+0"
    pub fn format_utc_offset(hours: f64) -> String {
        let total_minutes = (hours * 60.0).round() as i64;
        let sign = if total_minutes < 0 { '-' } else { '+' };
        let abs = total_minutes.abs();
        if abs % 60 == 0 {
            format!("UTC{}{}", sign, abs / 60)
        } else {
            format!("UTC{}{}:{:02}", sign, abs / 60, abs % 60)
        }
    }
}

// Source of "now" for every time computation
pub mod clock {
    use super::*;

    pub trait Clock: Send + Sync {
        fn now(&self) -> DateTime<Utc>;
    }

    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    // Always reports the same instant; used by tests and replayed requests
    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }
}

pub use clock::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests {
    use super::clock_text::*;

    #[test]
    fn parses_twenty_four_hour_text() {
        assert_eq!(parse_hhmm("08:00"), Some(480));
        assert_eq!(parse_hhmm("8:05"), Some(485));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), Some(1440));
        assert_eq!(parse_hhmm("24:30"), None);
        assert_eq!(parse_hhmm("25:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("noon"), None);
        assert_eq!(parse_hhmm(""), None);
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_12h(0), "12:00 AM");
        assert_eq!(format_12h(14 * 60 + 5), "2:05 PM");
        assert_eq!(format_12h(12 * 60 + 30), "12:30 PM");
        assert_eq!(format_12h(24 * 60), "12:00 AM");
    }

    #[test]
    fn formats_hour_labels() {
        assert_eq!(format_hour_label(0), "12AM");
        assert_eq!(format_hour_label(10), "10AM");
        assert_eq!(format_hour_label(12), "12PM");
        assert_eq!(format_hour_label(22), "10PM");
    }

    #[test]
    fn formats_offsets() {
        assert_eq!(format_utc_offset(5.5), "UTC+5:30");
        assert_eq!(format_utc_offset(-4.0), "UTC-4");
        assert_eq!(format_utc_offset(0.0), "UTC+0");
        assert_eq!(format_utc_offset(-9.5), "UTC-9:30");
    }
}
