/// Keep at most `time_limit_sec` seconds of samples.
///
/// Missing, zero, negative and non-finite limits disable truncation. The
/// sample budget is `floor(limit * fs)`; the signal is never padded.
pub fn truncate(mut signal: Vec<f64>, fs: f64, time_limit_sec: Option<f64>) -> Vec<f64> {
    let limit = match time_limit_sec {
        Some(limit) if limit.is_finite() && limit > 0.0 => limit,
        _ => return signal,
    };
    let max_samples = (limit * fs).floor() as usize;
    signal.truncate(max_samples);
    signal
}
