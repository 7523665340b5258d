//! Pure per-recording stages, applied in the order
//! align → truncate → remove offset → smooth.

pub mod align;
pub mod offset;
pub mod savgol;
pub mod window;

pub use align::{align, AlignmentResult};
pub use offset::{remove_offset, OffsetRemoval};
pub use savgol::{
    savgol_filter, smooth, smooth_with_outcome, SmoothOutcome, SmoothingParams,
};
pub use window::truncate;

use serde::{Deserialize, Serialize};

/// Everything the stages after alignment need to know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditioningParams {
    /// Keep at most this many seconds after the trigger.
    pub time_limit_sec: Option<f64>,
    /// Subtract the first sample from the whole series.
    pub remove_offset: bool,
    pub smoothing: SmoothingParams,
}

