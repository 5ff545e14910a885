//! Last-known boss positions, one marker per map image.

use crate::core::constants::DEFAULT_MARKER_PERCENT;
use crate::error::InputError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A CSS-style offset from the map's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Px(f64),
    Percent(f64),
}

impl Offset {
    /// Offset in pixels along an axis `extent` pixels long.
    pub fn to_pixels(self, extent: f64) -> f64 {
        match self {
            Offset::Px(v) => v,
            Offset::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Px(v) => write!(f, "{}px", v),
            Offset::Percent(p) => write!(f, "{}%", p),
        }
    }
}

impl FromStr for Offset {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if let Some(v) = trimmed.strip_suffix("px") {
            v.trim().parse().ok().map(Offset::Px)
        } else if let Some(p) = trimmed.strip_suffix('%') {
            p.trim().parse().ok().map(Offset::Percent)
        } else {
            None
        };
        parsed
            .filter(|o| match o {
                Offset::Px(v) | Offset::Percent(v) => v.is_finite(),
            })
            .ok_or_else(|| InputError::Coordinate(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub left: Offset,
    pub top: Offset,
}

impl MarkerPosition {
    pub fn px(left: f64, top: f64) -> Self {
        Self {
            left: Offset::Px(left),
            top: Offset::Px(top),
        }
    }

    /// (x, y) in pixels on a map of the given size.
    pub fn to_pixels(&self, map_width: f64, map_height: f64) -> (f64, f64) {
        (self.left.to_pixels(map_width), self.top.to_pixels(map_height))
    }
}

impl Default for MarkerPosition {
    /// Centered on the map.
    fn default() -> Self {
        Self {
            left: Offset::Percent(DEFAULT_MARKER_PERCENT),
            top: Offset::Percent(DEFAULT_MARKER_PERCENT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStore {
    positions: BTreeMap<String, MarkerPosition>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites any earlier position for `map_id`.
    pub fn set(&mut self, map_id: &str, position: MarkerPosition) {
        self.positions.insert(map_id.to_string(), position);
    }

    /// Last position set for `map_id`, or the centered default.
    pub fn get(&self, map_id: &str) -> MarkerPosition {
        self.positions.get(map_id).copied().unwrap_or_default()
    }

    pub fn contains(&self, map_id: &str) -> bool {
        self.positions.contains_key(map_id)
    }

    /// Places the marker so its center sits on the drop point (x, y).
    /// Non-finite offsets are rejected and leave the store unchanged.
    pub fn drop_at(
        &mut self,
        map_id: &str,
        x: f64,
        y: f64,
        marker_width: f64,
        marker_height: f64,
    ) -> Result<MarkerPosition, InputError> {
        let left = x - marker_width / 2.0;
        let top = y - marker_height / 2.0;
        for value in [left, top] {
            if !value.is_finite() {
                return Err(InputError::Coordinate(value.to_string()));
            }
        }
        let position = MarkerPosition::px(left, top);
        self.set(map_id, position);
        Ok(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MarkerPosition)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_map_is_centered() {
        let store = MarkerStore::new();
        let pos = store.get("map-gtb.png");
        assert_eq!(pos, MarkerPosition::default());
        assert_eq!(pos.left.to_string(), "50%");
        assert_eq!(pos.top.to_string(), "50%");
        assert!(!store.contains("map-gtb.png"));
    }

    #[test]
    fn test_set_then_get_returns_last_value() {
        let mut store = MarkerStore::new();
        store.set("map-ifrit.png", MarkerPosition::px(10.0, 20.0));
        store.set("map-ifrit.png", MarkerPosition::px(30.0, 40.0));
        assert_eq!(store.get("map-ifrit.png"), MarkerPosition::px(30.0, 40.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_maps_are_independent() {
        let mut store = MarkerStore::new();
        store.set("a.png", MarkerPosition::px(1.0, 1.0));
        assert_eq!(store.get("b.png"), MarkerPosition::default());
    }

    #[test]
    fn test_drop_centers_marker() {
        let mut store = MarkerStore::new();
        let pos = store.drop_at("map-valk.png", 100.0, 60.0, 24.0, 32.0).unwrap();
        assert_eq!(pos, MarkerPosition::px(88.0, 44.0));
        assert_eq!(store.get("map-valk.png"), pos);
    }

    #[test]
    fn test_drop_rejects_non_finite_point() {
        let mut store = MarkerStore::new();
        store.drop_at("map-valk.png", 100.0, 60.0, 24.0, 32.0).unwrap();

        assert!(store.drop_at("map-valk.png", f64::NAN, 60.0, 24.0, 32.0).is_err());
        assert!(store.drop_at("map-ifrit.png", 10.0, f64::INFINITY, 24.0, 24.0).is_err());
        assert_eq!(store.get("map-valk.png"), MarkerPosition::px(88.0, 44.0));
        assert!(!store.contains("map-ifrit.png"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_offset_strings() {
        assert_eq!(Offset::Px(88.0).to_string(), "88px");
        assert_eq!(Offset::Px(12.5).to_string(), "12.5px");
        assert_eq!(Offset::Percent(50.0).to_string(), "50%");
        assert_eq!("88px".parse::<Offset>().unwrap(), Offset::Px(88.0));
        assert_eq!("-4.5px".parse::<Offset>().unwrap(), Offset::Px(-4.5));
        assert_eq!(" 50% ".parse::<Offset>().unwrap(), Offset::Percent(50.0));
        assert!("50".parse::<Offset>().is_err());
        assert!("abcpx".parse::<Offset>().is_err());
        assert!("NaN%".parse::<Offset>().is_err());
    }

    #[test]
    fn test_to_pixels() {
        let pos = MarkerPosition::default();
        assert_eq!(pos.to_pixels(400.0, 200.0), (200.0, 100.0));
        assert_eq!(MarkerPosition::px(3.0, 4.0).to_pixels(400.0, 200.0), (3.0, 4.0));
    }
}
