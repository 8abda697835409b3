// meridian-service/src/services/slot_grid.rs
//! Half-hour grid over the viewer's day, projected onto each teammate's clock.
//!
//! Projections wrap around midnight but never report a date change: a slot
//! near the viewer's midnight may land on the teammate's previous or next
//! calendar day, and callers only ever see the wrapped hour.
use crate::models::{
    GridCell, SchedulerGrid, SelectionState, ServiceError, SlotSelection, Teammate, TeammateStrip,
    Viewer, ViewerStrip, SLOTS_PER_DAY, SLOT_MINUTES,
};
use crate::services::time_resolver;
use crate::utils::clock_text;
use crate::utils::roster_storage::Roster;
use chrono::{DateTime, Utc};
use log::warn;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Teammate's UTC offset minus the viewer's, in hours, evaluated at `now`.
pub fn teammate_offset_from_viewer(teammate: &Teammate, viewer: &Viewer, now: DateTime<Utc>) -> f64 {
    time_resolver::current_utc_offset(&teammate.zone, now)
        - time_resolver::current_utc_offset(&viewer.zone, now)
}

fn offset_minutes_from_viewer(teammate: &Teammate, viewer: &Viewer, now: DateTime<Utc>) -> i64 {
    let seconds = time_resolver::utc_offset_seconds(&teammate.zone, now)
        - time_resolver::utc_offset_seconds(&viewer.zone, now);
    i64::from(seconds) / 60
}

fn slot_start_minutes(slot: usize) -> i64 {
    slot as i64 * i64::from(SLOT_MINUTES)
}

/// Teammate's hour (fractional for half-hour zones) at the top of the slot's hour.
pub fn projected_local_hour(teammate: &Teammate, viewer: &Viewer, slot: usize, now: DateTime<Utc>) -> f64 {
    let slot_hour = (slot_start_minutes(slot) / 60) as f64;
    let hour = (slot_hour + teammate_offset_from_viewer(teammate, viewer, now)).rem_euclid(24.0);
    // rem_euclid can round a tiny negative up to exactly 24.0
    if hour >= 24.0 {
        0.0
    } else {
        hour
    }
}

/// Teammate's minutes since midnight at the start of `slot`, wrapped into one day.
pub fn projected_local_minutes(teammate: &Teammate, viewer: &Viewer, slot: usize, now: DateTime<Utc>) -> u32 {
    let minutes = slot_start_minutes(slot) + offset_minutes_from_viewer(teammate, viewer, now);
    minutes.rem_euclid(MINUTES_PER_DAY) as u32
}

pub fn slot_is_offline(teammate: &Teammate, viewer: &Viewer, slot: usize, now: DateTime<Utc>) -> bool {
    !teammate
        .working_hours
        .contains(projected_local_minutes(teammate, viewer, slot, now))
}

// Slot containing the given minutes since midnight
pub fn slot_for_minutes(minutes_since_midnight: u32) -> usize {
    (minutes_since_midnight / SLOT_MINUTES) as usize % SLOTS_PER_DAY
}

fn hhmm(minutes_since_midnight: u32) -> String {
    format!("{:02}:{:02}", minutes_since_midnight / 60, minutes_since_midnight % 60)
}

// "9:00 AM - 10:30 AM"; the end is the start of the slot after the last selected one
fn range_label(start_minutes: u32, end_minutes: u32) -> String {
    format!(
        "{} - {}",
        clock_text::format_12h(start_minutes),
        clock_text::format_12h(end_minutes)
    )
}

// Ruler labels every two hours, both midnights included
pub fn hour_labels() -> Vec<String> {
    (0..=12).map(|i| clock_text::format_hour_label(i * 2)).collect()
}

pub fn viewer_strip(viewer: &Viewer, selection: &SlotSelection, now: DateTime<Utc>) -> ViewerStrip {
    let local = time_resolver::zone_local_time(&viewer.zone, now);
    let current_slot = slot_for_minutes(time_resolver::minutes_since_midnight(&local));

    let cells = (0..SLOTS_PER_DAY)
        .map(|slot| {
            let minutes = slot_start_minutes(slot) as u32;
            GridCell {
                slot,
                label: hhmm(minutes),
                hour: minutes / 60,
                offline: !viewer.working_hours.contains(minutes),
                current: slot == current_slot,
                selected: selection.contains(slot),
            }
        })
        .collect();

    let selected_range = selection.bounds().map(|(start, end)| {
        let end_minutes = (slot_start_minutes(end + 1) % MINUTES_PER_DAY) as u32;
        range_label(slot_start_minutes(start) as u32, end_minutes)
    });

    ViewerStrip {
        timezone: viewer.zone.name(),
        local_time: time_resolver::format_display_time(&local),
        cells,
        selected_range,
    }
}

pub fn teammate_strip(
    teammate: &Teammate,
    viewer: &Viewer,
    selection: &SlotSelection,
    now: DateTime<Utc>,
) -> TeammateStrip {
    let local = time_resolver::local_time(teammate, now);
    let current_slot = slot_for_minutes(time_resolver::minutes_since_midnight(&local));

    let cells = (0..SLOTS_PER_DAY)
        .map(|slot| {
            let minutes = projected_local_minutes(teammate, viewer, slot, now);
            GridCell {
                slot,
                label: hhmm(minutes),
                hour: minutes / 60,
                offline: !teammate.working_hours.contains(minutes),
                current: slot_for_minutes(minutes) == current_slot,
                selected: selection.contains(slot),
            }
        })
        .collect();

    let selected_range = selection.bounds().map(|(start, end)| {
        range_label(
            projected_local_minutes(teammate, viewer, start, now),
            projected_local_minutes(teammate, viewer, end + 1, now),
        )
    });

    TeammateStrip {
        id: teammate.id,
        name: teammate.name.clone(),
        role: teammate.role.clone(),
        timezone_display: teammate.timezone_display.clone(),
        offset_from_viewer: teammate_offset_from_viewer(teammate, viewer, now),
        local_time: time_resolver::format_display_time(&local),
        online: time_resolver::is_online(teammate, now),
        cells,
        selected_range,
    }
}

// Build the scheduler view for the requested teammates, in request order
pub fn build_grid(
    roster: &Roster,
    ids: &[u32],
    viewer: &Viewer,
    state: &SelectionState,
    now: DateTime<Utc>,
) -> Result<SchedulerGrid, ServiceError> {
    state.validate()?;

    let mut teammates = Vec::new();
    let mut missing_ids = Vec::new();
    for id in ids {
        match roster.find(*id) {
            Some(teammate) => teammates.push(teammate_strip(teammate, viewer, &state.selection, now)),
            None => {
                warn!("Scheduler requested unknown teammate: {}", id);
                missing_ids.push(*id);
            }
        }
    }

    Ok(SchedulerGrid {
        hour_labels: hour_labels(),
        selection: state.selection,
        viewer: viewer_strip(viewer, &state.selection, now),
        teammates,
        missing_ids,
    })
}
