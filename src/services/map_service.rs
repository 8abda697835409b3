// meridian-service/src/services/map_service.rs
use crate::models::{MapMarker, Teammate};
use crate::services::time_resolver;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Pin position `[longitude, latitude]` for the zones the team lives in.
pub fn location_coordinates(tz: Tz) -> Option<[f64; 2]> {
    let coordinates = match tz.name() {
        "Asia/Dubai" => [55.2708, 25.2048],
        "America/New_York" => [-74.0059, 40.7128],
        "Europe/Zurich" => [8.5417, 47.3769],
        "Europe/Paris" => [2.3522, 48.8566],
        "Europe/London" => [-0.1276, 51.5074],
        "Pacific/Honolulu" => [-157.8583, 21.3099],
        "America/Los_Angeles" => [-118.2437, 34.0522],
        "America/Argentina/Buenos_Aires" => [-58.3816, -34.6037],
        "Europe/Sofia" => [23.3219, 42.6977],
        "Europe/Berlin" => [13.4050, 52.5200],
        "America/Chicago" => [-87.6298, 41.8781],
        "Europe/Warsaw" => [21.0122, 52.2297],
        _ => return None,
    };
    Some(coordinates)
}

// Teammates without a known location (fixed offsets included) get no pin
pub fn map_markers(teammates: &[Teammate], now: DateTime<Utc>) -> Vec<MapMarker> {
    teammates
        .iter()
        .filter_map(|teammate| {
            let coordinates = teammate.zone.iana().and_then(location_coordinates)?;
            let local = time_resolver::local_time(teammate, now);

            Some(MapMarker {
                id: teammate.id,
                name: teammate.name.clone(),
                initial: teammate.initial(),
                role: teammate.role.clone(),
                timezone_display: teammate.timezone_display.clone(),
                coordinates,
                local_time: time_resolver::format_display_time(&local),
                online: time_resolver::is_online(teammate, now),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeammateRecord, WorkingHoursRecord};
    use crate::utils::roster_storage::Roster;
    use chrono::TimeZone;

    #[test]
    fn every_builtin_teammate_gets_a_pin() {
        let roster = Roster::builtin().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let markers = map_markers(roster.teammates(), now);
        assert_eq!(markers.len(), roster.len());

        let reethmos = &markers[0];
        assert_eq!(reethmos.initial, "R");
        assert_eq!(reethmos.coordinates, [55.2708, 25.2048]);
        // 16:00 in Dubai
        assert_eq!(reethmos.local_time, "4:00 PM");
        assert!(reethmos.online);
    }

    #[test]
    fn fixed_offset_and_unmapped_zones_are_skipped() {
        let mut roster = Roster::new();
        for (timezone, utc_offset) in [(None, Some(3.0)), (Some("Asia/Tokyo"), None)] {
            roster
                .add_teammate(TeammateRecord {
                    id: None,
                    name: "Nomad".to_string(),
                    role: "BD".to_string(),
                    timezone: timezone.map(str::to_string),
                    utc_offset,
                    timezone_display: None,
                    avatar: None,
                    working_hours: WorkingHoursRecord {
                        start: "08:00".to_string(),
                        end: "22:00".to_string(),
                    },
                })
                .unwrap();
        }
        assert!(map_markers(roster.teammates(), Utc::now()).is_empty());
    }
}
