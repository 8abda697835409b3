// meridian-service/src/services/timeline_service.rs
use crate::models::{
    OnlineStatus, Teammate, TeammateCard, TeammateZone, TimelineResponse, TimelineView,
    TimezoneGroup, ViewerClock,
};
use crate::services::time_resolver;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

const UNKNOWN_ROLE_PRIORITY: u32 = 999;
const UNKNOWN_ROLE_COLOR: &str = "gray";

// Regions in display order: (name, utc range label, lowest offset, highest offset)
const REGIONS: [(&str, &str, f64, f64); 6] = [
    ("Pacific", "UTC-12 to UTC-9", -12.0, -9.0),
    ("Americas", "UTC-8 to UTC-5", -8.0, -5.0),
    ("Atlantic", "UTC-4 to UTC-1", -4.0, -1.0),
    ("Europe/Africa", "UTC+0 to UTC+3", 0.0, 3.0),
    ("Asia/Middle East", "UTC+4 to UTC+7", 4.0, 7.0),
    ("Asia/Pacific", "UTC+8 to UTC+12", 8.0, 12.0),
];
const OTHER_REGION: (&str, &str) = ("Other", "Various");

/// Position of a role in the team hierarchy; unknown roles sort last.
pub fn role_priority(role: &str) -> u32 {
    match role {
        "Founder" => 1,
        "COO" => 2,
        "Operations & PM" => 3,
        "Art Director" => 4,
        "UI/UX Designer" => 5,
        "Dashboard Guy" => 6,
        "BD" => 7,
        "PR" => 8,
        "Support" => 9,
        _ => UNKNOWN_ROLE_PRIORITY,
    }
}

pub fn role_color(role: &str) -> &'static str {
    match role {
        "Founder" => "amber",
        "COO" => "violet",
        "Operations & PM" => "indigo",
        "Art Director" => "pink",
        "UI/UX Designer" => "rose",
        "Dashboard Guy" => "cyan",
        "BD" => "emerald",
        "PR" => "sky",
        "Support" => "orange",
        _ => UNKNOWN_ROLE_COLOR,
    }
}

// Name order for display lists; case-insensitive first so "alice" sits next to "Alice"
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub fn hierarchy_sorted(teammates: &[Teammate]) -> Vec<&Teammate> {
    let mut sorted: Vec<&Teammate> = teammates.iter().collect();
    sorted.sort_by(|a, b| {
        role_priority(&a.role)
            .cmp(&role_priority(&b.role))
            .then_with(|| compare_names(&a.name, &b.name))
    });
    sorted
}

/// Region name and range label for a UTC offset in hours.
pub fn region_for_offset(offset: f64) -> (&'static str, &'static str) {
    REGIONS
        .iter()
        .find(|(_, _, low, high)| offset >= *low && offset <= *high)
        .map(|(name, range, _, _)| (*name, *range))
        .unwrap_or(OTHER_REGION)
}

pub fn teammate_card(teammate: &Teammate, now: DateTime<Utc>) -> TeammateCard {
    let local = time_resolver::local_time(teammate, now);
    let status = time_resolver::online_status(teammate, now);

    TeammateCard {
        id: teammate.id,
        name: teammate.name.clone(),
        initial: teammate.initial(),
        role: teammate.role.clone(),
        role_color: role_color(&teammate.role).to_string(),
        timezone: teammate.zone.name(),
        timezone_display: teammate.timezone_display.clone(),
        abbreviation: time_resolver::timezone_abbreviation(&teammate.zone, now),
        utc_offset: time_resolver::current_utc_offset(&teammate.zone, now),
        local_time: time_resolver::format_display_time(&local),
        online: status == OnlineStatus::Online,
        status,
        avatar: teammate.avatar.clone(),
    }
}

// Group by the offset in effect at `now`; empty regions are left out
pub fn timezone_groups(teammates: &[Teammate], now: DateTime<Utc>) -> Vec<TimezoneGroup> {
    let region_names = REGIONS
        .iter()
        .map(|(name, range, _, _)| (*name, *range))
        .chain(std::iter::once(OTHER_REGION));

    region_names
        .filter_map(|(name, range)| {
            let mut members: Vec<&Teammate> = teammates
                .iter()
                .filter(|t| {
                    region_for_offset(time_resolver::current_utc_offset(&t.zone, now)).0 == name
                })
                .collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by(|a, b| compare_names(&a.name, &b.name));

            Some(TimezoneGroup {
                name: name.to_string(),
                utc_range: range.to_string(),
                member_count: members.len(),
                teammates: members.into_iter().map(|t| teammate_card(t, now)).collect(),
            })
        })
        .collect()
}

pub fn viewer_clock(viewer_zone: &TeammateZone, now: DateTime<Utc>) -> ViewerClock {
    let local = time_resolver::zone_local_time(viewer_zone, now);
    ViewerClock {
        timezone: viewer_zone.name(),
        local_time: time_resolver::format_display_time(&local),
    }
}

pub fn build_timeline(
    teammates: &[Teammate],
    view: TimelineView,
    viewer_zone: &TeammateZone,
    now: DateTime<Utc>,
) -> TimelineResponse {
    let (cards, groups) = match view {
        TimelineView::Hierarchy => (
            hierarchy_sorted(teammates)
                .into_iter()
                .map(|t| teammate_card(t, now))
                .collect(),
            Vec::new(),
        ),
        TimelineView::Timezone => (Vec::new(), timezone_groups(teammates, now)),
    };

    TimelineResponse {
        viewer: viewer_clock(viewer_zone, now),
        view,
        teammates: cards,
        groups,
    }
}
