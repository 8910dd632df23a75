//! Visual grouping of wheel slices into colour bands.
//!
//! A wheel with thousands of names cannot give every slice its own colour, so
//! above `max_bands` adjacent candidates share a band. Bands are purely visual:
//! selection always works on the per-candidate partition of `360 / len`
//! degrees, see [`Rotation`](super::Rotation).

use serde::{Deserialize, Serialize};

use super::rotation::Rotation;

/// A contiguous run of pool indices drawn in one colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBand {
    /// First pool index in the band
    pub start: usize,
    /// One past the last pool index in the band
    pub end: usize,
    pub palette_index: usize,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl ColorBand {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorBands {
    bands: Vec<ColorBand>,
    members_per_band: usize,
}

impl ColorBands {
    /// Partition `len` slices into at most `max_bands` bands coloured from a
    /// palette of `palette_size` entries.
    ///
    /// With three or more colours no two neighbouring bands share a colour,
    /// including the seam between the last and the first band.
    pub fn partition(len: usize, max_bands: usize, palette_size: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        let max_bands = max_bands.max(1);
        let palette_size = palette_size.max(1);
        let members_per_band = if len <= max_bands {
            1
        } else {
            len.div_ceil(max_bands)
        };
        let slice = Rotation::slice_angle(len);

        let mut bands: Vec<ColorBand> = (0..len)
            .step_by(members_per_band)
            .enumerate()
            .map(|(band_index, start)| {
                let end = (start + members_per_band).min(len);
                ColorBand {
                    start,
                    end,
                    palette_index: band_index % palette_size,
                    start_angle: start as f64 * slice,
                    sweep_angle: (end - start) as f64 * slice,
                }
            })
            .collect();

        let count = bands.len();
        if count > 1 && palette_size >= 3 {
            let first = bands[0].palette_index;
            let previous = bands[count - 2].palette_index;
            let last = &mut bands[count - 1];
            if last.palette_index == first {
                if let Some(colour) = (0..palette_size).find(|c| *c != first && *c != previous) {
                    last.palette_index = colour;
                }
            }
        }

        Self {
            bands,
            members_per_band,
        }
    }

    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    pub fn into_bands(self) -> Vec<ColorBand> {
        self.bands
    }

    /// True when several candidates share a band.
    pub fn is_grouped(&self) -> bool {
        self.members_per_band > 1
    }

    pub fn band_for(&self, index: usize) -> Option<&ColorBand> {
        self.bands.get(index / self.members_per_band.max(1))
    }
}
