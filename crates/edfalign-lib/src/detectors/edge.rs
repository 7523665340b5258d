use serde::{Deserialize, Serialize};

/// Outcome of a falling-edge search on a trigger channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSearch {
    /// Index of the last sample at or above the threshold before the drop.
    Found(usize),
    /// The signal never crosses from at/above the threshold to below it.
    NotFound,
}

impl EdgeSearch {
    /// Index to align on; a missing edge aligns on the first sample.
    pub fn index(self) -> usize {
        match self {
            EdgeSearch::Found(idx) => idx,
            EdgeSearch::NotFound => 0,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, EdgeSearch::Found(_))
    }
}

/// Midpoint between the signal extremes, suited to two-level trigger lines.
pub fn midpoint_threshold(signal: &[f64]) -> f64 {
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    (max + min) / 2.0
}

/// Locate the first high→low transition across `threshold`.
///
/// Samples strictly below the threshold count as low; everything else,
/// including samples equal to it, counts as high. Without an explicit
/// threshold the midpoint of the signal range is used.
pub fn detect_falling_edge(signal: &[f64], threshold: Option<f64>) -> EdgeSearch {
    if signal.is_empty() {
        return EdgeSearch::NotFound;
    }
    let threshold = threshold.unwrap_or_else(|| midpoint_threshold(signal));
    signal
        .windows(2)
        .position(|pair| pair[0] >= threshold && pair[1] < threshold)
        .map_or(EdgeSearch::NotFound, EdgeSearch::Found)
}

/// Same as [`detect_falling_edge`] but collapses "no edge" to index 0.
pub fn find_falling_edge(signal: &[f64], threshold: Option<f64>) -> usize {
    detect_falling_edge(signal, threshold).index()
}
