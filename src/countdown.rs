//! Cooperative per-row countdowns.
//!
//! Each row owns at most one task. Starting a new task for a row replaces the
//! old one and bumps its generation, so a handle to the old task goes stale
//! and can no longer change anything. A task ends on its own when the time
//! left reaches zero; the row then stays `Respawned` until restarted.

use crate::core::constants::RESPAWNED_LABEL;
use crate::time_math::{format_duration, remaining};
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownStatus {
    /// No death time recorded
    #[default]
    Idle,
    /// Time left until the window opens
    Counting(Duration),
    /// Window has opened; terminal until the next death time
    Respawned,
}

impl CountdownStatus {
    /// Text for the time-remaining column.
    pub fn label(&self) -> String {
        match self {
            CountdownStatus::Idle => String::new(),
            CountdownStatus::Counting(left) => format_duration(*left),
            CountdownStatus::Respawned => RESPAWNED_LABEL.to_string(),
        }
    }

    /// Whole seconds left; respawned and idle rows count as zero.
    pub fn seconds_left(&self) -> i64 {
        match self {
            CountdownStatus::Counting(left) => left.num_seconds(),
            _ => 0,
        }
    }

    pub fn is_counting(&self) -> bool {
        matches!(self, CountdownStatus::Counting(_))
    }
}

/// Identifies one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownHandle {
    pub row: usize,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Respawned { row: usize },
}

#[derive(Debug, Clone, Copy)]
struct CountdownTask {
    generation: u64,
    target: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CountdownScheduler {
    tasks: Vec<Option<CountdownTask>>,
    statuses: Vec<CountdownStatus>,
    next_generation: u64,
}

impl CountdownScheduler {
    pub fn new(rows: usize) -> Self {
        Self {
            tasks: vec![None; rows],
            statuses: vec![CountdownStatus::Idle; rows],
            next_generation: 1,
        }
    }

    /// Starts (or restarts) the countdown for `row` toward `target` and
    /// evaluates it once right away.
    pub fn start(&mut self, row: usize, target: NaiveDateTime, now: NaiveDateTime) -> Option<CountdownHandle> {
        let slot = self.tasks.get_mut(row)?;
        let generation = self.next_generation;
        self.next_generation += 1;

        if slot.is_some() {
            debug!(row, generation, "superseding running countdown");
        }
        *slot = Some(CountdownTask { generation, target });
        self.advance(row, now);

        Some(CountdownHandle { row, generation })
    }

    /// Stops the countdown for `row` and blanks its status.
    pub fn cancel(&mut self, row: usize) -> bool {
        let Some(slot) = self.tasks.get_mut(row) else {
            return false;
        };
        let was_active = slot.take().is_some();
        self.statuses[row] = CountdownStatus::Idle;
        was_active
    }

    /// True while `handle` still names the row's running task.
    pub fn is_current(&self, handle: CountdownHandle) -> bool {
        matches!(
            self.tasks.get(handle.row),
            Some(Some(task)) if task.generation == handle.generation
        )
    }

    pub fn is_active(&self, row: usize) -> bool {
        matches!(self.tasks.get(row), Some(Some(_)))
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_some()).count()
    }

    pub fn status(&self, row: usize) -> CountdownStatus {
        self.statuses.get(row).copied().unwrap_or_default()
    }

    pub fn statuses(&self) -> &[CountdownStatus] {
        &self.statuses
    }

    /// Recomputes one task through its handle. Stale handles do nothing.
    pub fn poll(&mut self, handle: CountdownHandle, now: NaiveDateTime) -> Option<CountdownStatus> {
        if !self.is_current(handle) {
            return None;
        }
        self.advance(handle.row, now);
        Some(self.statuses[handle.row])
    }

    /// Recomputes every running task, reporting rows that just respawned.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<CountdownEvent> {
        (0..self.tasks.len())
            .filter(|&row| self.advance(row, now))
            .map(|row| CountdownEvent::Respawned { row })
            .collect()
    }

    /// Returns true when this call moved the row to `Respawned`.
    fn advance(&mut self, row: usize, now: NaiveDateTime) -> bool {
        let Some(task) = self.tasks[row] else {
            return false;
        };
        let left = remaining(task.target, now);
        if left > Duration::zero() {
            self.statuses[row] = CountdownStatus::Counting(left);
            false
        } else {
            self.statuses[row] = CountdownStatus::Respawned;
            self.tasks[row] = None;
            debug!(row, "countdown finished");
            true
        }
    }
}
