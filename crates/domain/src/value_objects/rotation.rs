//! Wheel geometry.
//!
//! The wheel is split into `len` equal contiguous slices in pool order, slice `i`
//! spanning `[i * 360/len, (i + 1) * 360/len)` degrees clockwise from the top.
//! The pointer is fixed at the top. Rotation is absolute and clockwise, so a
//! rotation of `r` brings the wheel angle `(360 - r) mod 360` under the pointer.

use serde::{Deserialize, Serialize};

/// Degrees in one full turn of the wheel.
pub const FULL_TURN: f64 = 360.0;

/// Absolute wheel rotation in degrees. Only ever grows within a session.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rotation(f64);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0.0);

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Angle covered by a single candidate when the pool has `len` members.
    pub fn slice_angle(len: usize) -> f64 {
        FULL_TURN / len.max(1) as f64
    }

    /// Rotation (mod 360) that puts the center of slice `index` under the pointer.
    pub fn landing_angle(index: usize, len: usize) -> f64 {
        let slice = Self::slice_angle(len);
        (FULL_TURN - (index as f64 + 0.5) * slice).rem_euclid(FULL_TURN)
    }

    /// Target rotation for a spin that lands on slice `index`.
    ///
    /// Continues from the current absolute rotation: adds `full_turns` whole
    /// turns (at least one) plus whatever is needed to reach the landing angle,
    /// so the result is always strictly greater than `self`.
    pub fn spin_to(self, index: usize, len: usize, full_turns: u32) -> Rotation {
        let current = self.0;
        let base = current - current.rem_euclid(FULL_TURN);
        let turns = f64::from(full_turns.max(1));
        let mut target = base + turns * FULL_TURN + Self::landing_angle(index, len);
        if target <= current {
            target += FULL_TURN;
        }
        Rotation(target)
    }

    /// Index of the slice currently under the pointer.
    pub fn slice_under_pointer(self, len: usize) -> usize {
        let len = len.max(1);
        let wheel_angle = (FULL_TURN - self.0.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
        let index = (wheel_angle / Self::slice_angle(len)).floor() as usize;
        index.min(len - 1)
    }
}
