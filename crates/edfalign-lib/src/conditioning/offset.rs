/// Result of the DC-offset stage.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetRemoval {
    pub data: Vec<f64>,
    /// Value subtracted from every sample, if the stage ran.
    pub removed: Option<f64>,
}

/// Subtract the first sample from every sample when `enabled`.
///
/// Only the first value is used as the baseline; this is not a detrend.
pub fn remove_offset(mut signal: Vec<f64>, enabled: bool) -> OffsetRemoval {
    let offset = match signal.first() {
        Some(&first) if enabled => first,
        _ => {
            return OffsetRemoval {
                data: signal,
                removed: None,
            }
        }
    };
    for sample in &mut signal {
        *sample -= offset;
    }
    OffsetRemoval {
        data: signal,
        removed: Some(offset),
    }
}
