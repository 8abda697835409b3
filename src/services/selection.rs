// meridian-service/src/services/selection.rs
//! Click and drag selection over the viewer's slot strip.
use crate::models::{SelectionEvent, SelectionState, ServiceError, SlotSelection, SLOTS_PER_DAY};
use log::debug;

fn check_slot(slot: usize) -> Result<usize, ServiceError> {
    if slot < SLOTS_PER_DAY {
        Ok(slot)
    } else {
        Err(ServiceError::BadRequest(format!(
            "slot {} is outside 0..{}",
            slot, SLOTS_PER_DAY
        )))
    }
}

impl SelectionState {
    /// Rejects states no sequence of events could produce: bounds past the
    /// last slot, an inverted range, or a drag anchor off the grid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some((start, end)) = self.selection.bounds() {
            check_slot(end)?;
            if start > end {
                return Err(ServiceError::BadRequest(format!(
                    "selection {}..={} is inverted",
                    start, end
                )));
            }
        }
        if let Some(anchor) = self.drag_anchor {
            check_slot(anchor)?;
        }
        Ok(())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    // Clicks arriving mid-drag belong to the drag and are ignored
    pub fn click(self, slot: usize) -> Self {
        if self.is_dragging() {
            return self;
        }

        let selection = match self.selection {
            SlotSelection::SingleSlot { slot: first } => SlotSelection::Range {
                start: first.min(slot),
                end: first.max(slot),
            },
            // A finished range never grows; the next click starts over
            SlotSelection::Empty | SlotSelection::Range { .. } => SlotSelection::SingleSlot { slot },
        };

        Self {
            selection,
            drag_anchor: None,
        }
    }

    pub fn press(self, slot: usize) -> Self {
        Self {
            selection: SlotSelection::Range {
                start: slot,
                end: slot,
            },
            drag_anchor: Some(slot),
        }
    }

    pub fn move_to(self, slot: usize) -> Self {
        match self.drag_anchor {
            Some(anchor) => Self {
                selection: SlotSelection::Range {
                    start: anchor.min(slot),
                    end: anchor.max(slot),
                },
                drag_anchor: Some(anchor),
            },
            None => self,
        }
    }

    pub fn release(self) -> Self {
        Self {
            selection: self.selection,
            drag_anchor: None,
        }
    }

    pub fn apply(self, event: SelectionEvent) -> Result<Self, ServiceError> {
        self.validate()?;
        let next = match event {
            SelectionEvent::Click { slot } => self.click(check_slot(slot)?),
            SelectionEvent::Press { slot } => self.press(check_slot(slot)?),
            SelectionEvent::Move { slot } => self.move_to(check_slot(slot)?),
            SelectionEvent::Release => self.release(),
        };
        debug!("Selection {:?} --{:?}--> {:?}", self.selection, event, next.selection);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> SlotSelection {
        SlotSelection::Range { start, end }
    }

    #[test]
    fn click_from_empty_selects_one_slot() {
        let state = SelectionState::default().click(7);
        assert_eq!(state.selection, SlotSelection::SingleSlot { slot: 7 });
    }

    #[test]
    fn second_click_closes_range_in_order() {
        let state = SelectionState::default().click(20).click(4);
        assert_eq!(state.selection, range(4, 20));
    }

    #[test]
    fn click_after_range_restarts() {
        let state = SelectionState::default().click(2).click(5).click(30);
        assert_eq!(state.selection, SlotSelection::SingleSlot { slot: 30 });
    }

    #[test]
    fn drag_sets_range_around_anchor() {
        let mut state = SelectionState::default().press(10);
        assert_eq!(state.selection, range(10, 10));

        state = state.move_to(14);
        assert_eq!(state.selection, range(10, 14));
        state = state.move_to(6);
        assert_eq!(state.selection, range(6, 10));
        state = state.move_to(12);
        assert_eq!(state.selection, range(10, 12));

        state = state.release();
        assert!(!state.is_dragging());
        assert_eq!(state.selection, range(10, 12));
    }

    #[test]
    fn drag_never_passes_through_single_slot() {
        let state = SelectionState::default().click(3).press(8).move_to(9);
        assert_eq!(state.selection, range(8, 9));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let state = SelectionState::default().click(3).move_to(9);
        assert_eq!(state.selection, SlotSelection::SingleSlot { slot: 3 });
    }

    #[test]
    fn click_during_drag_is_ignored() {
        let state = SelectionState::default().press(1).click(40);
        assert_eq!(state.selection, range(1, 1));
        assert!(state.is_dragging());
    }

    #[test]
    fn apply_rejects_out_of_grid_slots() {
        let result = SelectionState::default().apply(SelectionEvent::Click { slot: 48 });
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn apply_rejects_impossible_states() {
        let past_grid = SelectionState {
            selection: SlotSelection::SingleSlot { slot: 100 },
            drag_anchor: None,
        };
        assert!(matches!(
            past_grid.apply(SelectionEvent::Click { slot: 3 }),
            Err(ServiceError::BadRequest(_))
        ));

        let stray_anchor = SelectionState {
            selection: SlotSelection::Empty,
            drag_anchor: Some(500),
        };
        assert!(stray_anchor.apply(SelectionEvent::Move { slot: 3 }).is_err());

        let inverted = SelectionState {
            selection: range(30, 2),
            drag_anchor: None,
        };
        assert!(inverted.apply(SelectionEvent::Release).is_err());
    }

    #[test]
    fn last_slot_is_a_valid_state() {
        let state = SelectionState {
            selection: range(40, 47),
            drag_anchor: Some(47),
        };
        assert!(state.validate().is_ok());
        assert_eq!(state.apply(SelectionEvent::Release).unwrap().selection, range(40, 47));
    }

    #[test]
    fn selection_membership() {
        assert!(!SlotSelection::Empty.contains(0));
        assert!(SlotSelection::SingleSlot { slot: 4 }.contains(4));
        assert!(range(4, 6).contains(6));
        assert!(!range(4, 6).contains(7));
    }
}
