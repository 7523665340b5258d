use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Basic typed time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Uniform sampling frequency in Hz
    pub fs: f64,
    /// Samples
    pub data: Vec<f64>,
}

/// One input file together with the channels to read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingDescriptor {
    pub path: PathBuf,
    pub label: String,
    pub trigger_channel: usize,
    pub data_channel: usize,
}

/// Raw trigger and data channels of a single recording, as read from disk.
///
/// Both channels are assumed to share the start time; `fs` is taken from the
/// data channel.
#[derive(Debug, Clone)]
pub struct Recording {
    pub descriptor: RecordingDescriptor,
    pub trigger: Vec<f64>,
    pub data: Vec<f64>,
    pub fs: f64,
}

/// Final, plottable form of one conditioned recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Time since the trigger, in microseconds.
    pub time_us: Vec<f64>,
    pub values: Vec<f64>,
    pub label: String,
    pub line_width: f64,
}

impl PlotSeries {
    /// Build a series with an evenly spaced time axis starting at 0.
    pub fn from_samples(
        values: Vec<f64>,
        fs: f64,
        label: impl Into<String>,
        line_width: f64,
    ) -> Self {
        let time_us = time_axis_us(values.len(), fs);
        Self {
            time_us,
            values,
            label: label.into(),
            line_width,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_us.iter().copied().zip(self.values.iter().copied())
    }
}

/// `len` timestamps in microseconds, `i / fs * 1e6`.
pub fn time_axis_us(len: usize, fs: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / fs * 1_000_000.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_axis_is_microseconds_from_zero() {
        assert_eq!(time_axis_us(4, 1.0), vec![0.0, 1e6, 2e6, 3e6]);
        let axis = time_axis_us(3, 2000.0);
        assert_eq!(axis, vec![0.0, 500.0, 1000.0]);
    }

    #[test]
    fn plot_series_axes_have_equal_length() {
        let series = PlotSeries::from_samples(vec![1.0, 2.0, 3.0], 10.0, "a", 1.0);
        assert_eq!(series.time_us.len(), series.values.len());
        assert_eq!(series.points().last(), Some((200_000.0, 3.0)));
    }
}
