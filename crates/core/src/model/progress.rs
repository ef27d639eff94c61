use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::ModuleId;

/// Scroll position and extents sampled from the reading view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollGeometry {
    #[must_use]
    pub fn new(scroll_top: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            document_height,
            viewport_height,
        }
    }
}

/// Reading progress in percent, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct ProgressPercent(f64);

impl ProgressPercent {
    pub const ZERO: Self = Self(0.0);
    pub const COMPLETE: Self = Self(100.0);

    /// Clamp an arbitrary value into range. Non-finite input maps to zero.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Derive reading progress from scroll geometry.
    ///
    /// When the document fits inside the viewport there is nothing left to
    /// scroll, so the whole content counts as read.
    #[must_use]
    pub fn from_geometry(geometry: ScrollGeometry) -> Self {
        let scrollable = geometry.document_height - geometry.viewport_height;
        if !scrollable.is_finite() || !geometry.scroll_top.is_finite() {
            return Self::ZERO;
        }
        if scrollable <= 0.0 {
            return Self::COMPLETE;
        }
        Self::clamped(geometry.scroll_top / scrollable * 100.0)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ProgressPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// Whether a tracker still accepts updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Active,
    Flushed,
}

/// Local reading state for one module view.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    module_id: ModuleId,
    percent: ProgressPercent,
    phase: TrackerPhase,
}

impl ProgressState {
    #[must_use]
    pub fn new(module_id: ModuleId) -> Self {
        Self {
            module_id,
            percent: ProgressPercent::ZERO,
            phase: TrackerPhase::Active,
        }
    }

    #[must_use]
    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    #[must_use]
    pub fn percent(&self) -> ProgressPercent {
        self.percent
    }

    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == TrackerPhase::Active
    }

    /// Apply a scroll sample. Returns `None` once the state has been flushed.
    pub fn apply_scroll(&mut self, geometry: ScrollGeometry) -> Option<ProgressPercent> {
        if !self.is_active() {
            return None;
        }
        self.percent = ProgressPercent::from_geometry(geometry);
        Some(self.percent)
    }

    /// Move to `Flushed`. Returns `false` if it was already flushed.
    pub fn mark_flushed(&mut self) -> bool {
        let was_active = self.is_active();
        self.phase = TrackerPhase::Flushed;
        was_active
    }

    /// Body for the `update-progress` endpoint.
    #[must_use]
    pub fn sync_payload(&self, time_spent_minutes: u32) -> ProgressSync {
        ProgressSync {
            progress: self.percent,
            time_spent: time_spent_minutes,
        }
    }
}

/// Payload pushed to the backend on every flush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSync {
    pub progress: ProgressPercent,
    pub time_spent: u32,
}

/// Whole minutes contained in `elapsed`.
#[must_use]
pub fn elapsed_minutes(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_secs() / 60).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_stays_in_range_for_any_scroll_position() {
        for top in [-500.0, 0.0, 250.0, 1000.0, 5000.0] {
            let percent = ProgressPercent::from_geometry(ScrollGeometry::new(top, 1800.0, 800.0));
            assert!((0.0..=100.0).contains(&percent.value()), "{top} -> {percent:?}");
        }
    }

    #[test]
    fn percent_is_proportional_to_scrollable_distance() {
        let percent = ProgressPercent::from_geometry(ScrollGeometry::new(250.0, 1800.0, 800.0));
        assert!((percent.value() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn document_that_fits_viewport_is_complete_not_nan() {
        let percent = ProgressPercent::from_geometry(ScrollGeometry::new(0.0, 800.0, 800.0));
        assert_eq!(percent, ProgressPercent::COMPLETE);

        let percent = ProgressPercent::from_geometry(ScrollGeometry::new(0.0, 600.0, 800.0));
        assert_eq!(percent, ProgressPercent::COMPLETE);
    }

    #[test]
    fn non_finite_geometry_maps_to_zero() {
        let percent =
            ProgressPercent::from_geometry(ScrollGeometry::new(f64::NAN, 1800.0, 800.0));
        assert_eq!(percent, ProgressPercent::ZERO);
        let percent =
            ProgressPercent::from_geometry(ScrollGeometry::new(10.0, f64::INFINITY, 800.0));
        assert_eq!(percent, ProgressPercent::ZERO);
    }

    #[test]
    fn flushed_state_ignores_scroll() {
        let mut state = ProgressState::new(ModuleId::new(1));
        assert!(state.apply_scroll(ScrollGeometry::new(500.0, 1500.0, 500.0)).is_some());
        assert!(state.mark_flushed());
        assert!(!state.mark_flushed());
        assert!(state.apply_scroll(ScrollGeometry::new(0.0, 1500.0, 500.0)).is_none());
        assert!((state.percent().value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn elapsed_minutes_floors() {
        assert_eq!(elapsed_minutes(Duration::from_secs(59)), 0);
        assert_eq!(elapsed_minutes(Duration::from_secs(60)), 1);
        assert_eq!(elapsed_minutes(Duration::from_secs(125)), 2);
    }

    #[test]
    fn sync_payload_serializes_expected_shape() {
        let mut state = ProgressState::new(ModuleId::new(3));
        state.apply_scroll(ScrollGeometry::new(100.0, 500.0, 300.0));
        let json = serde_json::to_value(state.sync_payload(4)).unwrap();
        assert_eq!(json, serde_json::json!({ "progress": 50.0, "time_spent": 4 }));
    }
}
