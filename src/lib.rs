//! Bosswatch - Terminal World Boss Respawn Tracker Library
//!
//! Respawn-window math, countdowns, row ordering, marker positions and their
//! persistence. The terminal front end in `main.rs` drives all of it through
//! [`tracker::Tracker`].

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod core;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod markers;
pub mod ordering;
pub mod persistence;
pub mod registry;
pub mod store;
pub mod time_math;
pub mod tracker;
pub mod utils;

pub use catalog::{Catalog, MonsterSpec};
pub use config::TrackerConfig;
pub use error::{InputError, TrackerError};
pub use tracker::{RowView, Tracker};
