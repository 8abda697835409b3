// meridian-service/src/services/time_resolver.rs
//! Local time and working-hours status for teammates.
//!
//! Every function takes the current instant as a parameter; nothing here
//! reads the system clock.
use crate::models::{OnlineStatus, ServiceError, Teammate, TeammateZone};
use crate::utils::clock_text;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

/// Offset of `zone` from UTC at `now`, in seconds east of Greenwich.
pub fn utc_offset_seconds(zone: &TeammateZone, now: DateTime<Utc>) -> i32 {
    match zone {
        TeammateZone::Iana(tz) => tz.offset_from_utc_datetime(&now.naive_utc()).fix().local_minus_utc(),
        TeammateZone::FixedOffset(hours) => (hours * 3600.0).round() as i32,
    }
}

/// Offset of `zone` from UTC at `now`, in (possibly fractional) hours.
pub fn current_utc_offset(zone: &TeammateZone, now: DateTime<Utc>) -> f64 {
    f64::from(utc_offset_seconds(zone, now)) / 3600.0
}

/// Wall-clock reading of `zone` at `now`, with no zone attached.
pub fn zone_local_time(zone: &TeammateZone, now: DateTime<Utc>) -> NaiveDateTime {
    match zone {
        TeammateZone::Iana(tz) => now.with_timezone(tz).naive_local(),
        // Legacy path: a constant offset ignores daylight saving entirely
        TeammateZone::FixedOffset(_) => {
            now.naive_utc() + Duration::seconds(i64::from(utc_offset_seconds(zone, now)))
        }
    }
}

pub fn local_time(teammate: &Teammate, now: DateTime<Utc>) -> NaiveDateTime {
    zone_local_time(&teammate.zone, now)
}

// Resolve an identifier first; unknown names are an error, never passed through
pub fn local_time_in(timezone: &str, now: DateTime<Utc>) -> Result<NaiveDateTime, ServiceError> {
    let zone = TeammateZone::from_iana(timezone)?;
    Ok(zone_local_time(&zone, now))
}

pub fn minutes_since_midnight(time: &NaiveDateTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn is_online(teammate: &Teammate, now: DateTime<Utc>) -> bool {
    let local = local_time(teammate, now);
    teammate.working_hours.contains(minutes_since_midnight(&local))
}

pub fn online_status(teammate: &Teammate, now: DateTime<Utc>) -> OnlineStatus {
    if is_online(teammate, now) {
        OnlineStatus::Online
    } else {
        OnlineStatus::Offline
    }
}

/// `H:MM AM/PM`, e.g. `2:05 PM`.
pub fn format_display_time(time: &NaiveDateTime) -> String {
    clock_text::format_12h(minutes_since_midnight(time))
}

/// Short zone name in effect at `now` (`EST` or `EDT`, `GMT` or `BST`).
pub fn timezone_abbreviation(zone: &TeammateZone, now: DateTime<Utc>) -> String {
    match zone {
        TeammateZone::Iana(tz) => now.with_timezone(tz).format("%Z").to_string(),
        TeammateZone::FixedOffset(hours) => clock_text::format_utc_offset(*hours),
    }
}

pub fn abbreviation_for(timezone: &str, now: DateTime<Utc>) -> Result<String, ServiceError> {
    let zone = TeammateZone::from_iana(timezone)?;
    Ok(timezone_abbreviation(&zone, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeammateRecord, WorkingHoursRecord};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn teammate(timezone: Option<&str>, utc_offset: Option<f64>) -> Teammate {
        Teammate::from_record(
            1,
            TeammateRecord {
                id: None,
                name: "Gambloor".to_string(),
                role: "COO".to_string(),
                timezone: timezone.map(str::to_string),
                utc_offset,
                timezone_display: None,
                avatar: None,
                working_hours: WorkingHoursRecord {
                    start: "08:00".to_string(),
                    end: "22:00".to_string(),
                },
            },
        )
        .unwrap()
    }

    #[test]
    fn online_boundaries_are_half_open() {
        let ny = teammate(Some("America/New_York"), None);
        // January: New York is UTC-5
        assert!(!is_online(&ny, utc(2024, 1, 15, 12, 59)));
        assert!(is_online(&ny, utc(2024, 1, 15, 13, 0)));
        assert!(is_online(&ny, utc(2024, 1, 16, 2, 59)));
        assert!(!is_online(&ny, utc(2024, 1, 16, 3, 0)));
        assert_eq!(online_status(&ny, utc(2024, 1, 16, 3, 0)), OnlineStatus::Offline);
    }

    #[test]
    fn fixed_offset_round_trips() {
        let teammate = teammate(None, Some(5.5));
        let now = utc(2024, 6, 1, 20, 45);
        let local = local_time(&teammate, now);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-06-02 02:15");

        let back = local - Duration::seconds(i64::from(utc_offset_seconds(&teammate.zone, now)));
        assert_eq!(back, now.naive_utc());
    }

    #[test]
    fn iana_zone_follows_daylight_saving() {
        let iana = teammate(Some("America/New_York"), None);
        let naive = teammate(None, Some(-5.0));
        // US clocks went forward on 2024-03-10
        let before = utc(2024, 3, 9, 12, 0);
        let after = utc(2024, 3, 11, 12, 0);

        assert_eq!(local_time(&iana, before).hour(), 7);
        assert_eq!(local_time(&naive, before).hour(), 7);
        assert_eq!(local_time(&iana, after).hour(), 8);
        assert_eq!(local_time(&naive, after).hour(), 7);

        let drift_before = local_time(&iana, before) - local_time(&naive, before);
        let drift_after = local_time(&iana, after) - local_time(&naive, after);
        assert_eq!(drift_after - drift_before, Duration::hours(1));
    }

    #[test]
    fn current_offset_is_fractional_and_dst_aware() {
        let kolkata = TeammateZone::from_iana("Asia/Kolkata").unwrap();
        assert_eq!(current_utc_offset(&kolkata, utc(2024, 1, 1, 0, 0)), 5.5);

        let london = TeammateZone::from_iana("Europe/London").unwrap();
        assert_eq!(current_utc_offset(&london, utc(2024, 1, 1, 0, 0)), 0.0);
        assert_eq!(current_utc_offset(&london, utc(2024, 7, 1, 0, 0)), 1.0);
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let now = utc(2024, 1, 1, 0, 0);
        assert_eq!(
            local_time_in("Atlantis/Capital", now),
            Err(ServiceError::InvalidTimezone("Atlantis/Capital".to_string()))
        );
        assert!(abbreviation_for("Atlantis/Capital", now).is_err());
        assert!(local_time_in("Europe/Warsaw", now).is_ok());
    }

    #[test]
    fn abbreviations_track_the_season() {
        assert_eq!(abbreviation_for("America/New_York", utc(2024, 1, 15, 12, 0)).unwrap(), "EST");
        assert_eq!(abbreviation_for("America/New_York", utc(2024, 7, 15, 12, 0)).unwrap(), "EDT");
        assert_eq!(
            timezone_abbreviation(&TeammateZone::FixedOffset(-4.0), utc(2024, 7, 15, 12, 0)),
            "UTC-4"
        );
    }

    #[test]
    fn display_time_is_twelve_hour() {
        let time = utc(2024, 1, 1, 14, 5).naive_utc();
        assert_eq!(format_display_time(&time), "2:05 PM");
        let midnight = utc(2024, 1, 1, 0, 7).naive_utc();
        assert_eq!(format_display_time(&midnight), "12:07 AM");
    }
}
