//! Value objects - Immutable objects defined by their attributes

mod color_bands;
mod names;
mod restore_policy;
mod rotation;

pub use color_bands::{ColorBand, ColorBands};
pub use names::{CandidateName, GroupTag};
pub use restore_policy::RestorePolicy;
pub use rotation::{Rotation, FULL_TURN};
