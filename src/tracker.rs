//! The tracker context: owns every component and handles the events coming
//! from the presentation layer.
//!
//! A single `Tracker` is built at startup and passed to whoever needs it.
//! Each event handler runs to completion; a rejected event leaves all rows as
//! they were, and one row's failure never blocks events for other rows.

use crate::catalog::Catalog;
use crate::config::TrackerConfig;
use crate::countdown::{CountdownEvent, CountdownScheduler, CountdownStatus};
use crate::error::Result;
use crate::markers::{MarkerPosition, MarkerStore};
use crate::ordering::sort_rows;
use crate::persistence::PersistenceAdapter;
use crate::registry::{CoordinateField, RespawnRegistry, UpdateOutcome};
use crate::store::KeyValueStore;
use crate::time_math::format_clock_range;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

/// Everything the presentation layer shows for one monster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Catalog index; pass this back in events
    pub row: usize,
    pub name: String,
    pub delay_label: String,
    pub death_time: String,
    pub x_coordinate: String,
    pub y_coordinate: String,
    /// "h:mm AM - h:mm PM", blank without a death time
    pub window_label: String,
    /// "HH:MM:SS", "Respawned", or blank
    pub remaining_label: String,
    pub status: CountdownStatus,
    pub map_id: String,
}

pub struct Tracker<S: KeyValueStore> {
    registry: RespawnRegistry,
    countdowns: CountdownScheduler,
    markers: MarkerStore,
    persistence: PersistenceAdapter<S>,
    config: TrackerConfig,
    /// Catalog indices in display order
    order: Vec<usize>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Blank tracker; does not read `store`.
    pub fn new(catalog: Catalog, store: S, config: TrackerConfig) -> Self {
        let rows = catalog.len();
        Self {
            registry: RespawnRegistry::new(catalog),
            countdowns: CountdownScheduler::new(rows),
            markers: MarkerStore::new(),
            persistence: PersistenceAdapter::new(store),
            config,
            order: (0..rows).collect(),
        }
    }

    /// Builds a tracker from whatever `store` holds, restarting countdowns
    /// for restored death times.
    pub fn load(catalog: Catalog, store: S, config: TrackerConfig, now: NaiveDateTime) -> Self {
        let mut tracker = Self::new(catalog, store, config);
        let persisted = tracker.persistence.load();

        if let Some(saved_rows) = &persisted.records {
            if saved_rows.len() > tracker.registry.len() {
                warn!(
                    stored = saved_rows.len(),
                    catalog = tracker.registry.len(),
                    "ignoring stored rows beyond the catalog"
                );
            }
            for (row, saved) in saved_rows.iter().enumerate().take(tracker.registry.len()) {
                if tracker.registry.get(row).map(|r| r.monster_id.as_str()) != Some(saved.monster_name.as_str()) {
                    debug!(row, stored = %saved.monster_name, "stored name differs from catalog; aligning by position");
                }
                match tracker.registry.restore(
                    row,
                    &saved.death_time,
                    &saved.x_coordinate,
                    &saved.y_coordinate,
                ) {
                    Ok(UpdateOutcome::Started(window)) => {
                        tracker.countdowns.start(row, window.start, now);
                    }
                    Ok(_) => {}
                    Err(e) => warn!(row, error = %e, "stored death time ignored"),
                }
            }
        }
        if let Some(markers) = persisted.markers {
            tracker.markers = markers;
        }

        tracker.resort();
        info!(
            active = tracker.countdowns.active_count(),
            markers = tracker.markers.len(),
            "tracker state loaded"
        );
        tracker
    }

    /// Death time edited for the monster at catalog index `row`.
    pub fn on_death_time_changed(&mut self, row: usize, raw: &str, now: NaiveDateTime) -> Result<UpdateOutcome> {
        let outcome = self.registry.update(row, raw)?;
        match outcome {
            UpdateOutcome::Started(window) => {
                self.countdowns.start(row, window.start, now);
            }
            UpdateOutcome::Cleared => {
                self.countdowns.cancel(row);
            }
            UpdateOutcome::Unchanged => return Ok(outcome),
        }
        self.persistence.save_records(self.registry.get_all());
        self.resort();
        Ok(outcome)
    }

    /// X or Y input edited. Returns whether the stored value changed.
    pub fn on_coordinate_changed(&mut self, row: usize, field: CoordinateField, raw: &str) -> Result<bool> {
        let changed = self.registry.set_coordinate(row, field, raw)?;
        if changed {
            self.persistence.save_records(self.registry.get_all());
        }
        Ok(changed)
    }

    /// Marker dropped at pixel (x, y) on `map_id`.
    pub fn on_marker_dropped(&mut self, map_id: &str, x: f64, y: f64) -> Result<MarkerPosition> {
        let position = self.markers.drop_at(
            map_id,
            x,
            y,
            self.config.marker_width_px,
            self.config.marker_height_px,
        )?;
        debug!(map = map_id, left = %position.left, top = %position.top, "marker moved");
        self.persistence.save_markers(&self.markers);
        Ok(position)
    }

    /// Where to place the marker when the viewer opens `map_id`.
    pub fn on_map_opened(&self, map_id: &str) -> MarkerPosition {
        self.markers.get(map_id)
    }

    /// Recomputes every running countdown and reorders rows.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<CountdownEvent> {
        let events = self.countdowns.tick(now);
        for CountdownEvent::Respawned { row } in &events {
            if let Some(record) = self.registry.get(*row) {
                info!(monster = %record.monster_id, "respawn window open");
            }
        }
        self.resort();
        events
    }

    fn resort(&mut self) {
        self.order = sort_rows(self.countdowns.statuses(), self.config.sort_policy);
    }

    /// Catalog indices in display order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Catalog index shown at display position `position`.
    pub fn row_at(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    pub fn row_view(&self, row: usize) -> Option<RowView> {
        let record = self.registry.get(row)?;
        let spec = self.registry.catalog().get(row)?;
        let status = self.countdowns.status(row);
        Some(RowView {
            row,
            name: spec.name.clone(),
            delay_label: spec.delay_label(),
            death_time: record.raw_death_time.clone(),
            x_coordinate: record.x_coordinate.clone(),
            y_coordinate: record.y_coordinate.clone(),
            window_label: record
                .window
                .map(|w| format_clock_range(w.start, w.end))
                .unwrap_or_default(),
            remaining_label: status.label(),
            status,
            map_id: spec.map_id.clone(),
        })
    }

    /// Rows in display order.
    pub fn rows(&self) -> Vec<RowView> {
        self.order.iter().filter_map(|&row| self.row_view(row)).collect()
    }

    pub fn registry(&self) -> &RespawnRegistry {
        &self.registry
    }

    pub fn countdowns(&self) -> &CountdownScheduler {
        &self.countdowns
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }
}
