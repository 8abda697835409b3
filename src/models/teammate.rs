// meridian-service/src/models/teammate.rs
use crate::models::ServiceError;
use crate::utils::clock_text;
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

// Fixed offsets outside this range do not exist on any civil clock
pub const MIN_UTC_OFFSET_HOURS: f64 = -12.0;
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// A wall-clock time of day, stored as minutes since local midnight.
///
/// `24:00` is representable so that a working day can end at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const END_OF_DAY: ClockTime = ClockTime(24 * 60);

    pub fn parse(value: &str) -> Result<Self, ServiceError> {
        clock_text::parse_hhmm(value)
            .map(ClockTime)
            .ok_or_else(|| ServiceError::InvalidWorkingHoursFormat(value.to_string()))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Daily window `[start, end)` in the teammate's own local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl WorkingHours {
    pub fn parse(start: &str, end: &str) -> Result<Self, ServiceError> {
        let start_time = ClockTime::parse(start)?;
        if start_time == ClockTime::END_OF_DAY {
            return Err(ServiceError::InvalidWorkingHoursFormat(start.to_string()));
        }
        Ok(Self {
            start: start_time,
            end: ClockTime::parse(end)?,
        })
    }

    /// Half-open membership test: `start` is inside, `end` is not.
    pub fn contains(&self, minutes_since_midnight: u32) -> bool {
        let start = u32::from(self.start.minutes());
        let end = u32::from(self.end.minutes());
        minutes_since_midnight >= start && minutes_since_midnight < end
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: ClockTime(8 * 60),
            end: ClockTime(22 * 60),
        }
    }
}

/// Where a teammate's clock comes from. A record resolves to exactly one of
/// these; the fixed offset exists only for people with no IANA mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeammateZone {
    Iana(Tz),
    FixedOffset(f64),
}

impl TeammateZone {
    pub fn from_iana(name: &str) -> Result<Self, ServiceError> {
        name.trim()
            .parse::<Tz>()
            .map(TeammateZone::Iana)
            .map_err(|_| ServiceError::InvalidTimezone(name.to_string()))
    }

    pub fn from_offset_hours(hours: f64) -> Result<Self, ServiceError> {
        if !hours.is_finite() || !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&hours) {
            return Err(ServiceError::InvalidTimezone(hours.to_string()));
        }
        Ok(TeammateZone::FixedOffset(hours))
    }

    // IANA identifier wins whenever one is present
    pub fn resolve(timezone: Option<&str>, utc_offset: Option<f64>) -> Result<Self, ServiceError> {
        match (timezone, utc_offset) {
            (Some(name), offset) => {
                if let Some(ignored) = offset {
                    debug!("Ignoring utc_offset {} in favour of timezone {}", ignored, name);
                }
                Self::from_iana(name)
            }
            (None, Some(hours)) => Self::from_offset_hours(hours),
            (None, None) => Err(ServiceError::InvalidTimezone(
                "neither timezone nor utc_offset given".to_string(),
            )),
        }
    }

    pub fn iana(&self) -> Option<Tz> {
        match self {
            TeammateZone::Iana(tz) => Some(*tz),
            TeammateZone::FixedOffset(_) => None,
        }
    }

    /// IANA identifier, or `UTC+h:mm` for a fixed offset.
    pub fn name(&self) -> String {
        match self {
            TeammateZone::Iana(tz) => tz.name().to_string(),
            TeammateZone::FixedOffset(hours) => clock_text::format_utc_offset(*hours),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TeammateRecord", into = "TeammateRecord")]
pub struct Teammate {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub zone: TeammateZone,
    pub timezone_display: Option<String>,
    pub working_hours: WorkingHours,
    pub avatar: Option<String>,
}

impl Teammate {
    // Build a validated teammate from its wire form under a chosen id
    pub fn from_record(id: u32, record: TeammateRecord) -> Result<Self, ServiceError> {
        let zone = TeammateZone::resolve(record.timezone.as_deref(), record.utc_offset)?;
        let working_hours =
            WorkingHours::parse(&record.working_hours.start, &record.working_hours.end)?;

        Ok(Self {
            id,
            name: record.name,
            role: record.role,
            zone,
            timezone_display: record.timezone_display,
            working_hours,
            avatar: record.avatar,
        })
    }

    /// First character of the name, upper-cased, for avatar fallbacks and map pins.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    pub fn apply(&mut self, patch: TeammatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(zone) = patch.zone {
            self.zone = zone;
        }
        if let Some(display) = patch.timezone_display {
            self.timezone_display = Some(display);
        }
        if let Some(hours) = patch.working_hours {
            self.working_hours = hours;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
    }
}

// Wire form of a working-hours window
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkingHoursRecord {
    pub start: String,
    pub end: String,
}

impl From<WorkingHours> for WorkingHoursRecord {
    fn from(hours: WorkingHours) -> Self {
        Self {
            start: hours.start.to_string(),
            end: hours.end.to_string(),
        }
    }
}

// Wire form of a teammate, as found in roster files and request bodies
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeammateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub working_hours: WorkingHoursRecord,
}

impl TryFrom<TeammateRecord> for Teammate {
    type Error = ServiceError;

    fn try_from(record: TeammateRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .ok_or_else(|| ServiceError::BadRequest("teammate record has no id".to_string()))?;
        Teammate::from_record(id, record)
    }
}

impl From<Teammate> for TeammateRecord {
    fn from(teammate: Teammate) -> Self {
        let (timezone, utc_offset) = match teammate.zone {
            TeammateZone::Iana(tz) => (Some(tz.name().to_string()), None),
            TeammateZone::FixedOffset(hours) => (None, Some(hours)),
        };

        Self {
            id: Some(teammate.id),
            name: teammate.name,
            role: teammate.role,
            timezone,
            utc_offset,
            timezone_display: teammate.timezone_display,
            avatar: teammate.avatar,
            working_hours: teammate.working_hours.into(),
        }
    }
}

/// Field-wise replacement for an existing teammate; `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeammatePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub zone: Option<TeammateZone>,
    pub timezone_display: Option<String>,
    pub working_hours: Option<WorkingHours>,
    pub avatar: Option<String>,
}

// Request body for partial teammate updates
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateTeammateRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub timezone: Option<String>,
    pub utc_offset: Option<f64>,
    pub timezone_display: Option<String>,
    pub avatar: Option<String>,
    pub working_hours: Option<WorkingHoursRecord>,
}

impl TryFrom<UpdateTeammateRequest> for TeammatePatch {
    type Error = ServiceError;

    fn try_from(request: UpdateTeammateRequest) -> Result<Self, Self::Error> {
        // Either representation replaces the zone wholesale
        let zone = if request.timezone.is_some() || request.utc_offset.is_some() {
            Some(TeammateZone::resolve(request.timezone.as_deref(), request.utc_offset)?)
        } else {
            None
        };

        let working_hours = match request.working_hours {
            Some(ref hours) => Some(WorkingHours::parse(&hours.start, &hours.end)?),
            None => None,
        };

        Ok(Self {
            name: request.name,
            role: request.role,
            zone,
            timezone_display: request.timezone_display,
            working_hours,
            avatar: request.avatar,
        })
    }
}
