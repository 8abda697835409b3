// meridian-service/src/utils/roster_storage.rs
use crate::models::{ServiceError, Teammate, TeammatePatch, TeammateRecord};
use log::{error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_ROSTER: &str = include_str!("../data/roster.json");

/// In-memory, ordered team roster. Records are validated on the way in, so
/// everything handed out by the roster has a resolvable zone and parsed hours.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teammates: Vec<Teammate>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    // Validate records in order. Explicit ids are claimed first; records
    // without one then take ids past the largest explicit id, in file order.
    pub fn from_records(records: Vec<TeammateRecord>) -> Result<Self, ServiceError> {
        let mut seen = HashSet::new();
        for id in records.iter().filter_map(|r| r.id) {
            if !seen.insert(id) {
                error!("❌ Duplicate teammate id in roster: {}", id);
                return Err(ServiceError::BadRequest(format!("duplicate teammate id {}", id)));
            }
        }

        let mut next_free = seen.iter().max().map_or(1, |max| max + 1);
        let mut roster = Roster::new();
        for record in records {
            let id = match record.id {
                Some(id) => id,
                None => {
                    let id = next_free;
                    next_free += 1;
                    id
                }
            };

            let teammate = Teammate::from_record(id, record).map_err(|e| {
                error!("❌ Rejecting roster record {}: {}", id, e);
                e
            })?;
            roster.teammates.push(teammate);
        }

        Ok(roster)
    }

    // The roster compiled into the binary
    pub fn builtin() -> Result<Self, ServiceError> {
        Self::from_json(BUILTIN_ROSTER)
    }

    pub fn from_json(content: &str) -> Result<Self, ServiceError> {
        let records: Vec<TeammateRecord> = serde_json::from_str(content).map_err(|e| {
            error!("Failed to parse roster JSON: {:?}", e);
            ServiceError::BadRequest(format!("roster is not valid JSON: {}", e))
        })?;
        Self::from_records(records)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read roster file {}: {:?}", path.display(), e);
            ServiceError::InternalServerError
        })?;

        let roster = Self::from_json(&content)?;
        info!("✅ Loaded {} teammates from {}", roster.len(), path.display());
        Ok(roster)
    }

    pub fn teammates(&self) -> &[Teammate] {
        &self.teammates
    }

    pub fn find(&self, id: u32) -> Option<&Teammate> {
        self.teammates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.teammates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teammates.is_empty()
    }

    /// One past the largest id in use; 1 for an empty roster.
    pub fn next_id(&self) -> u32 {
        self.teammates.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }

    // Append a teammate; any id on the record is ignored
    pub fn add_teammate(&mut self, record: TeammateRecord) -> Result<Teammate, ServiceError> {
        let id = self.next_id();
        let teammate = Teammate::from_record(id, record)?;
        self.teammates.push(teammate.clone());

        info!("✅ Added teammate {} ({})", teammate.id, teammate.name);
        Ok(teammate)
    }

    // Replace fields of an existing teammate; None when the id is unknown
    pub fn update_teammate(&mut self, id: u32, patch: TeammatePatch) -> Option<Teammate> {
        match self.teammates.iter_mut().find(|t| t.id == id) {
            Some(teammate) => {
                teammate.apply(patch);
                info!("✅ Updated teammate {}", id);
                Some(teammate.clone())
            }
            None => {
                warn!("Teammate not found for update: {}", id);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeammateZone, WorkingHoursRecord};

    fn new_record(name: &str) -> TeammateRecord {
        TeammateRecord {
            id: None,
            name: name.to_string(),
            role: "BD".to_string(),
            timezone: Some("Europe/Sofia".to_string()),
            utc_offset: None,
            timezone_display: None,
            avatar: None,
            working_hours: WorkingHoursRecord {
                start: "09:00".to_string(),
                end: "17:00".to_string(),
            },
        }
    }

    #[test]
    fn builtin_roster_loads() {
        let roster = Roster::builtin().unwrap();
        assert_eq!(roster.len(), 14);
        assert_eq!(roster.next_id(), 15);
        assert_eq!(roster.teammates()[0].name, "Reethmos");
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut roster = Roster::builtin().unwrap();
        let added = roster.add_teammate(new_record("Nova")).unwrap();
        assert_eq!(added.id, 15);
        assert_eq!(roster.find(15).map(|t| t.name.as_str()), Some("Nova"));
        assert_eq!(roster.teammates().last().map(|t| t.id), Some(15));
    }

    #[test]
    fn add_to_empty_roster_starts_at_one() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.add_teammate(new_record("First")).unwrap().id, 1);
    }

    #[test]
    fn add_rejects_bad_hours() {
        let mut roster = Roster::new();
        let mut record = new_record("Broken");
        record.working_hours.start = "9".to_string();
        assert_eq!(
            roster.add_teammate(record),
            Err(ServiceError::InvalidWorkingHoursFormat("9".to_string()))
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn update_changes_only_patched_fields() {
        let mut roster = Roster::builtin().unwrap();
        roster.add_teammate(new_record("Nova")).unwrap();
        let before = roster.find(15).cloned().unwrap();

        let updated = roster
            .update_teammate(
                15,
                TeammatePatch {
                    role: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.role, "X");
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.zone, before.zone);
        assert_eq!(updated.working_hours, before.working_hours);
        assert_eq!(roster.find(15), Some(&updated));
    }

    #[test]
    fn update_unknown_id_is_none() {
        let mut roster = Roster::builtin().unwrap();
        assert_eq!(roster.update_teammate(999, TeammatePatch::default()), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut first = new_record("A");
        first.id = Some(2);
        let mut second = new_record("B");
        second.id = Some(2);
        assert!(matches!(
            Roster::from_records(vec![first, second]),
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[test]
    fn missing_ids_never_collide_with_later_explicit_ids() {
        let unnumbered = new_record("A");
        let mut first = new_record("B");
        first.id = Some(1);
        let second_unnumbered = new_record("C");

        let roster = Roster::from_records(vec![unnumbered, first, second_unnumbered]).unwrap();
        let ids: Vec<(u32, &str)> = roster
            .teammates()
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect();
        assert_eq!(ids, vec![(2, "A"), (1, "B"), (3, "C")]);
        assert_eq!(roster.next_id(), 4);
    }

    #[test]
    fn invalid_zone_fails_load() {
        let json = r#"[{"id": 1, "name": "Q", "role": "PR", "timezone": "Nowhere/Special",
            "working_hours": {"start": "08:00", "end": "22:00"}}]"#;
        assert_eq!(
            Roster::from_json(json).unwrap_err(),
            ServiceError::InvalidTimezone("Nowhere/Special".to_string())
        );
    }

    #[test]
    fn fixed_offset_records_load() {
        let json = r#"[{"name": "Q", "role": "PR", "utc_offset": -4,
            "working_hours": {"start": "08:00", "end": "22:00"}}]"#;
        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.teammates()[0].id, 1);
        assert_eq!(roster.teammates()[0].zone, TeammateZone::FixedOffset(-4.0));
    }
}
