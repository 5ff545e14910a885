//! Per-monster respawn records, one per catalog entry.

use crate::catalog::Catalog;
use crate::error::{InputError, Result};
use crate::time_math::{compute_window, parse_death_time, RespawnWindow};
use chrono::NaiveDateTime;
use tracing::debug;

/// Auxiliary per-row coordinate inputs, stored as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespawnRecord {
    pub monster_id: String,
    /// Death time exactly as entered (datetime-local form)
    pub raw_death_time: String,
    pub death_time: Option<NaiveDateTime>,
    /// Derived from `death_time`; `None` exactly when `death_time` is `None`
    pub window: Option<RespawnWindow>,
    pub x_coordinate: String,
    pub y_coordinate: String,
}

impl RespawnRecord {
    pub fn new(monster_id: &str) -> Self {
        Self {
            monster_id: monster_id.to_string(),
            raw_death_time: String::new(),
            death_time: None,
            window: None,
            x_coordinate: String::new(),
            y_coordinate: String::new(),
        }
    }

    pub fn window_start(&self) -> Option<NaiveDateTime> {
        self.window.map(|w| w.start)
    }

    pub fn window_end(&self) -> Option<NaiveDateTime> {
        self.window.map(|w| w.end)
    }

    /// Records without a death time take no part in countdowns.
    pub fn is_inert(&self) -> bool {
        self.death_time.is_none()
    }

    pub fn coordinate(&self, field: CoordinateField) -> &str {
        match field {
            CoordinateField::X => &self.x_coordinate,
            CoordinateField::Y => &self.y_coordinate,
        }
    }
}

/// What a death-time update did to its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new window was computed
    Started(RespawnWindow),
    /// Death time cleared; window removed
    Cleared,
    /// Same value as before; nothing changed
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct RespawnRegistry {
    catalog: Catalog,
    records: Vec<RespawnRecord>,
}

impl RespawnRegistry {
    pub fn new(catalog: Catalog) -> Self {
        let records = catalog.iter().map(|m| RespawnRecord::new(&m.name)).collect();
        Self { catalog, records }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All records in catalog order.
    pub fn get_all(&self) -> &[RespawnRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&RespawnRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sets the death time for the monster at catalog position `row`.
    ///
    /// Unparsable input leaves the record untouched. A blank value clears the
    /// death time and window together.
    pub fn update(&mut self, row: usize, raw: &str) -> Result<UpdateOutcome> {
        let spec = self.catalog.get(row).ok_or(InputError::UnknownRow(row))?;
        if self.records[row].raw_death_time == raw {
            return Ok(UpdateOutcome::Unchanged);
        }
        let death_time = parse_death_time(raw)?;
        let window = death_time
            .map(|t| compute_window(t, spec.min_respawn_minutes, spec.max_respawn_minutes))
            .transpose()?;
        let record = &mut self.records[row];

        record.raw_death_time = raw.to_string();
        record.death_time = death_time;
        record.window = window;

        match record.window {
            Some(window) => {
                debug!(monster = %record.monster_id, start = %window.start, end = %window.end, "respawn window computed");
                Ok(UpdateOutcome::Started(window))
            }
            None => {
                debug!(monster = %record.monster_id, "death time cleared");
                Ok(UpdateOutcome::Cleared)
            }
        }
    }

    /// Reapplies a persisted row. Coordinates come back as stored; the death
    /// time goes through [`update`](Self::update). A stored value that no
    /// longer parses is kept as raw text on an inert row, so the next save
    /// writes it back unchanged.
    pub fn restore(
        &mut self,
        row: usize,
        raw_death_time: &str,
        x_coordinate: &str,
        y_coordinate: &str,
    ) -> Result<UpdateOutcome> {
        let record = self.records.get_mut(row).ok_or(InputError::UnknownRow(row))?;
        record.x_coordinate = x_coordinate.to_string();
        record.y_coordinate = y_coordinate.to_string();
        self.update(row, raw_death_time).inspect_err(|_| {
            let record = &mut self.records[row];
            record.raw_death_time = raw_death_time.to_string();
            record.death_time = None;
            record.window = None;
        })
    }

    /// Same as [`update`](Self::update), addressing the monster by name.
    pub fn update_by_name(&mut self, monster_id: &str, raw: &str) -> Result<UpdateOutcome> {
        let row = self
            .catalog
            .index_of(monster_id)
            .ok_or_else(|| InputError::UnknownMonster(monster_id.to_string()))?;
        self.update(row, raw)
    }

    /// Stores a coordinate input as typed. Blank is allowed; anything else
    /// must be a number, as a numeric input control would enforce.
    pub fn set_coordinate(&mut self, row: usize, field: CoordinateField, raw: &str) -> Result<bool> {
        let record = self.records.get_mut(row).ok_or(InputError::UnknownRow(row))?;
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.parse::<f64>().map(|v| !v.is_finite()).unwrap_or(true) {
            return Err(InputError::Coordinate(raw.to_string()).into());
        }

        let slot = match field {
            CoordinateField::X => &mut record.x_coordinate,
            CoordinateField::Y => &mut record.y_coordinate,
        };
        if *slot == raw {
            return Ok(false);
        }
        *slot = raw.to_string();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MonsterSpec;
    use chrono::NaiveDate;

    fn registry() -> RespawnRegistry {
        RespawnRegistry::new(Catalog::default())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_registry_is_blank() {
        let reg = registry();
        assert_eq!(reg.len(), 9);
        assert!(reg.get_all().iter().all(|r| r.is_inert() && r.window.is_none()));
        assert_eq!(reg.get(2).unwrap().monster_id, "Memory of Thanatos");
    }

    #[test]
    fn test_update_computes_window() {
        let mut reg = registry();
        let outcome = reg.update(0, "2024-01-01T00:00").unwrap();
        let record = reg.get(0).unwrap();
        assert_eq!(record.window_start(), Some(at(1, 0)));
        assert_eq!(record.window_end(), Some(at(1, 10)));
        assert_eq!(outcome, UpdateOutcome::Started(record.window.unwrap()));
        assert_eq!(record.raw_death_time, "2024-01-01T00:00");
    }

    #[test]
    fn test_update_twice_is_unchanged() {
        let mut reg = registry();
        reg.update(4, "2024-01-01T10:00").unwrap();
        let before = reg.get(4).unwrap().clone();
        let outcome = reg.update(4, "2024-01-01T10:00").unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert_eq!(reg.get(4).unwrap(), &before);
    }

    #[test]
    fn test_clear_removes_window() {
        let mut reg = registry();
        reg.update(1, "2024-01-01T10:00").unwrap();
        assert_eq!(reg.update(1, "").unwrap(), UpdateOutcome::Cleared);
        let record = reg.get(1).unwrap();
        assert!(record.death_time.is_none());
        assert!(record.window_start().is_none() && record.window_end().is_none());
    }

    #[test]
    fn test_bad_input_leaves_record_untouched() {
        let mut reg = registry();
        reg.update(3, "2024-01-01T10:00").unwrap();
        let before = reg.get(3).unwrap().clone();

        assert!(reg.update(3, "not a date").unwrap_err().is_invalid_input());
        assert!(reg.update(42, "2024-01-01T10:00").unwrap_err().is_invalid_input());
        assert_eq!(reg.get(3).unwrap(), &before);
    }

    #[test]
    fn test_update_by_name() {
        let mut reg = registry();
        reg.update_by_name("LHZ3", "2024-01-01T00:00").unwrap();
        assert_eq!(reg.get(8).unwrap().window_end(), Some(at(3, 30)));
        assert!(reg.update_by_name("Poring", "2024-01-01T00:00").is_err());
    }

    #[test]
    fn test_window_start_not_after_end() {
        let catalog = Catalog::new(vec![
            MonsterSpec::new("A", 0, 0, "a.png"),
            MonsterSpec::new("B", 5, 500, "b.png"),
        ])
        .unwrap();
        let mut reg = RespawnRegistry::new(catalog);
        reg.update(0, "2024-01-01T00:00").unwrap();
        reg.update(1, "2024-01-01T00:00").unwrap();
        for record in reg.get_all() {
            let window = record.window.unwrap();
            assert!(window.start <= window.end);
        }
        assert_eq!(reg.get(0).unwrap().window_start(), Some(at(0, 0)));
    }

    #[test]
    fn test_restore_row() {
        let mut reg = registry();
        reg.restore(0, "2024-01-01T00:00", "120", "80").unwrap();
        let record = reg.get(0).unwrap();
        assert_eq!(record.window_start(), Some(at(1, 0)));
        assert_eq!(record.x_coordinate, "120");
        assert_eq!(record.y_coordinate, "80");
    }

    #[test]
    fn test_restore_bad_death_time_keeps_raw_text() {
        let mut reg = registry();
        assert!(reg.restore(1, "garbage", "1", "2").is_err());
        let record = reg.get(1).unwrap();
        assert!(record.is_inert());
        assert!(record.window.is_none());
        assert_eq!(record.raw_death_time, "garbage");
        assert_eq!(record.x_coordinate, "1");

        assert!(matches!(reg.update(1, "2024-01-01T00:00"), Ok(UpdateOutcome::Started(_))));
        assert_eq!(reg.get(1).unwrap().raw_death_time, "2024-01-01T00:00");
    }

    #[test]
    fn test_death_time_past_max_date_is_rejected() {
        let mut reg = registry();
        reg.update(7, "2024-01-01T10:00").unwrap();
        let before = reg.get(7).unwrap().clone();

        let err = reg.update(7, "+262142-12-31T23:00").unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(reg.get(7).unwrap(), &before);

        assert!(reg.update(7, "2024-01-01T11:00").is_ok());
        assert_eq!(reg.get(7).unwrap().window_start(), Some(at(12, 0)));
    }

    #[test]
    fn test_set_coordinate() {
        let mut reg = registry();
        assert!(reg.set_coordinate(0, CoordinateField::X, "150").unwrap());
        assert!(reg.set_coordinate(0, CoordinateField::Y, "-42.5").unwrap());
        assert!(!reg.set_coordinate(0, CoordinateField::X, "150").unwrap());
        assert_eq!(reg.get(0).unwrap().coordinate(CoordinateField::X), "150");
        assert_eq!(reg.get(0).unwrap().y_coordinate, "-42.5");

        assert!(reg.set_coordinate(0, CoordinateField::X, "abc").is_err());
        assert!(reg.set_coordinate(0, CoordinateField::X, "NaN").is_err());
        assert!(reg.set_coordinate(99, CoordinateField::X, "1").is_err());
        assert_eq!(reg.get(0).unwrap().x_coordinate, "150");

        assert!(reg.set_coordinate(0, CoordinateField::X, "").unwrap());
        assert_eq!(reg.get(0).unwrap().x_coordinate, "");
    }

    #[test]
    fn test_set_coordinate_keeps_raw_text() {
        let mut reg = registry();
        assert!(reg.set_coordinate(2, CoordinateField::X, " 150 ").unwrap());
        assert_eq!(reg.get(2).unwrap().x_coordinate, " 150 ");
        assert!(!reg.set_coordinate(2, CoordinateField::X, " 150 ").unwrap());
        assert!(reg.set_coordinate(2, CoordinateField::X, "150").unwrap());
        assert_eq!(reg.get(2).unwrap().x_coordinate, "150");
    }
}
