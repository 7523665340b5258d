use crate::conditioning::{
    align, remove_offset, smooth_with_outcome, truncate, ConditioningParams, SmoothOutcome,
};
use crate::config::Settings;
use crate::detectors::edge::EdgeSearch;
use crate::signal::{PlotSeries, Recording};
use log::{debug, info, warn};

/// Something that happened while conditioning one recording.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    TriggerFound { index: usize },
    TriggerMissing,
    Truncated { from: usize, to: usize },
    OffsetRemoved { value: f64 },
    SmoothingSkipped { len: usize, window: usize },
    SmoothingRejected { window: usize, poly: usize },
    Smoothed { window: usize, poly: usize },
}

/// Receives pipeline diagnostics; it only observes, the data is not shared.
pub trait PipelineObserver {
    fn on_event(&mut self, label: &str, event: &PipelineEvent);
}

impl<F> PipelineObserver for F
where
    F: FnMut(&str, &PipelineEvent),
{
    fn on_event(&mut self, label: &str, event: &PipelineEvent) {
        self(label, event)
    }
}

/// Default observer: forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_event(&mut self, label: &str, event: &PipelineEvent) {
        match event {
            PipelineEvent::TriggerFound { index } => {
                info!("{}: trigger falling edge at sample {}", label, index)
            }
            PipelineEvent::TriggerMissing => {
                warn!("{}: no trigger falling edge found, plotting from sample 0", label)
            }
            PipelineEvent::Truncated { from, to } => {
                debug!("{}: truncated {} -> {} samples", label, from, to)
            }
            PipelineEvent::OffsetRemoved { value } => {
                info!("Removing offset: {} from {}", value, label)
            }
            PipelineEvent::SmoothingSkipped { len, window } => debug!(
                "{}: {} samples do not exceed smoothing window {}, skipping",
                label, len, window
            ),
            PipelineEvent::SmoothingRejected { window, poly } => warn!(
                "{}: smoothing window {} / order {} is not usable, skipping",
                label, window, poly
            ),
            PipelineEvent::Smoothed { window, poly } => {
                debug!("{}: smoothed (window {}, order {})", label, window, poly)
            }
        }
    }
}

/// Turns raw recordings into plot series: align → truncate → offset → smooth.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder {
    pub params: ConditioningParams,
    pub line_width: f64,
}

impl SeriesBuilder {
    pub fn new(params: ConditioningParams, line_width: f64) -> Self {
        Self { params, line_width }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.conditioning(), settings.visual.line_width)
    }

    /// Condition a recording, logging diagnostics through [`LogObserver`].
    pub fn build(&self, recording: Recording) -> PlotSeries {
        self.build_observed(recording, &mut LogObserver)
    }

    pub fn build_observed(
        &self,
        recording: Recording,
        observer: &mut dyn PipelineObserver,
    ) -> PlotSeries {
        let Recording {
            descriptor,
            trigger,
            data,
            fs,
        } = recording;
        let label = descriptor.label;
        let values = self.condition(&trigger, data, fs, &label, observer);
        PlotSeries::from_samples(values, fs, label, self.line_width)
    }

    /// Run the four stages on raw samples and return the conditioned values.
    pub fn condition(
        &self,
        trigger: &[f64],
        data: Vec<f64>,
        fs: f64,
        label: &str,
        observer: &mut dyn PipelineObserver,
    ) -> Vec<f64> {
        let aligned = align(trigger, data, fs);
        let found = match aligned.trigger {
            EdgeSearch::Found(index) => PipelineEvent::TriggerFound { index },
            EdgeSearch::NotFound => PipelineEvent::TriggerMissing,
        };
        observer.on_event(label, &found);

        let before = aligned.data.len();
        let windowed = truncate(aligned.data, aligned.fs, self.params.time_limit_sec);
        if windowed.len() < before {
            observer.on_event(
                label,
                &PipelineEvent::Truncated {
                    from: before,
                    to: windowed.len(),
                },
            );
        }

        let normalized = remove_offset(windowed, self.params.remove_offset);
        if let Some(value) = normalized.removed {
            observer.on_event(label, &PipelineEvent::OffsetRemoved { value });
        }

        let smoothing = &self.params.smoothing;
        let len = normalized.data.len();
        let (smoothed, outcome) = smooth_with_outcome(normalized.data, smoothing);
        let event = match outcome {
            SmoothOutcome::Disabled => None,
            SmoothOutcome::TooShort => Some(PipelineEvent::SmoothingSkipped {
                len,
                window: smoothing.window,
            }),
            SmoothOutcome::InvalidParams => Some(PipelineEvent::SmoothingRejected {
                window: smoothing.window,
                poly: smoothing.poly,
            }),
            SmoothOutcome::Filtered => Some(PipelineEvent::Smoothed {
                window: smoothing.window,
                poly: smoothing.poly,
            }),
        };
        if let Some(event) = event {
            observer.on_event(label, &event);
        }
        smoothed
    }
}
