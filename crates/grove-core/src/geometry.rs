//! Plane geometry for the arena: positions, headings and the garden layout.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A point in the arena's continuous 2D plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// The point `distance` away from this one along `heading`.
    pub fn offset(&self, heading: Heading, distance: f64) -> Position {
        Position::new(
            self.x + heading.dx() * distance,
            self.y + heading.dy() * distance,
        )
    }

    /// Heading from this point toward `other`.
    ///
    /// Coincident points yield [`Heading::EAST`].
    pub fn heading_to(&self, other: &Position) -> Heading {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return Heading::EAST;
        }
        Heading::from_radians(dy.atan2(dx))
    }
}

/// A direction in the plane, stored as radians normalized to `[0, 2π)`.
///
/// Positive rotation is counter-clockwise, so `EAST.rotate_degrees(90.0)`
/// is `NORTH`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    radians: f64,
}

impl Heading {
    pub const EAST: Heading = Heading { radians: 0.0 };
    pub const NORTH: Heading = Heading { radians: std::f64::consts::FRAC_PI_2 };
    pub const WEST: Heading = Heading { radians: std::f64::consts::PI };
    pub const SOUTH: Heading = Heading { radians: 3.0 * std::f64::consts::FRAC_PI_2 };

    pub fn from_radians(radians: f64) -> Self {
        let mut normalized = radians.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if normalized >= TAU {
            normalized = 0.0;
        }
        Self { radians: normalized }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn dx(&self) -> f64 {
        self.radians.cos()
    }

    pub fn dy(&self) -> f64 {
        self.radians.sin()
    }

    /// Rotate by `degrees`; positive is counter-clockwise.
    pub fn rotate_degrees(&self, degrees: f64) -> Heading {
        Heading::from_radians(self.radians + degrees.to_radians())
    }

    pub fn opposite(&self) -> Heading {
        Heading::from_radians(self.radians + std::f64::consts::PI)
    }

    /// Smallest absolute angle between two headings, in degrees (`0..=180`).
    pub fn degrees_between(&self, other: &Heading) -> f64 {
        let diff = (self.radians - other.radians).abs() % TAU;
        diff.min(TAU - diff).to_degrees()
    }
}

/// Number of planted slots in a garden.
pub const GARDEN_SLOTS: usize = 5;

/// Angular spacing between adjacent garden slots.
pub const SLOT_SPACING_DEGREES: f64 = 60.0;

/// The hexagonal garden layout around a settled gardener.
///
/// Slots sit at `entrance + k·60°` for `k` in `0..5`. The sixth hex
/// position, `entrance − 60°`, stays unplanted: it is the gap units are
/// produced through and the gardener's only way out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GardenPattern {
    entrance: Heading,
}

impl GardenPattern {
    pub fn new(entrance: Heading) -> Self {
        Self { entrance }
    }

    pub fn entrance(&self) -> Heading {
        self.entrance
    }

    /// Heading of slot `slot` (0-based). Slots past the last wrap around.
    pub fn slot_heading(&self, slot: usize) -> Heading {
        self.entrance
            .rotate_degrees(SLOT_SPACING_DEGREES * (slot % GARDEN_SLOTS) as f64)
    }

    pub fn slot_headings(&self) -> [Heading; GARDEN_SLOTS] {
        std::array::from_fn(|slot| self.slot_heading(slot))
    }

    /// The unplanted hex position used for egress and unit production.
    pub fn gap_heading(&self) -> Heading {
        self.entrance.rotate_degrees(-SLOT_SPACING_DEGREES)
    }

    /// Point `distance` from `centre` along slot `slot`'s heading.
    pub fn slot_position(&self, centre: Position, slot: usize, distance: f64) -> Position {
        centre.offset(self.slot_heading(slot), distance)
    }
}
