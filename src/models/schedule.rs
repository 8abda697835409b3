// meridian-service/src/models/schedule.rs
use crate::models::{TeammateZone, WorkingHours};
use serde::{Deserialize, Serialize};

// 48 half-hour cells cover the viewer's local day
pub const SLOTS_PER_DAY: usize = 48;
pub const SLOT_MINUTES: u32 = 30;

/// The person looking at the scheduler: their zone and the hours their own
/// strip is shaded by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub zone: TeammateZone,
    pub working_hours: WorkingHours,
}

/// Selected cells on the viewer's strip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotSelection {
    #[default]
    Empty,
    SingleSlot { slot: usize },
    Range { start: usize, end: usize },
}

impl SlotSelection {
    // Inclusive (first, last) slot, if anything is selected
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match *self {
            SlotSelection::Empty => None,
            SlotSelection::SingleSlot { slot } => Some((slot, slot)),
            SlotSelection::Range { start, end } => Some((start, end)),
        }
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.bounds()
            .map_or(false, |(start, end)| slot >= start && slot <= end)
    }
}

/// Selection plus the anchor of an in-progress drag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    #[serde(default)]
    pub selection: SlotSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_anchor: Option<usize>,
}

// Abstract pointer input, independent of any UI toolkit
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    Click { slot: usize },
    Press { slot: usize },
    Move { slot: usize },
    Release,
}

// Request body for POST /scheduler/selection
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectionRequest {
    #[serde(default)]
    pub state: SelectionState,
    pub event: SelectionEvent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GridCell {
    pub slot: usize,
    // "HH:MM" on the strip owner's clock
    pub label: String,
    // Whole hour of `label`
    pub hour: u32,
    pub offline: bool,
    pub current: bool,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ViewerStrip {
    pub timezone: String,
    pub local_time: String,
    pub cells: Vec<GridCell>,
    pub selected_range: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeammateStrip {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub timezone_display: Option<String>,
    pub offset_from_viewer: f64,
    pub local_time: String,
    pub online: bool,
    pub cells: Vec<GridCell>,
    pub selected_range: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SchedulerGrid {
    pub hour_labels: Vec<String>,
    pub selection: SlotSelection,
    pub viewer: ViewerStrip,
    pub teammates: Vec<TeammateStrip>,
    pub missing_ids: Vec<u32>,
}
