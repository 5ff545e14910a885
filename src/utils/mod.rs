//! Utility modules: data directory and JSON file helpers.

pub mod persistence;
