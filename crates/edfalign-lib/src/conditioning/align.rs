use crate::detectors::edge::{detect_falling_edge, EdgeSearch};

/// Data channel re-based so that index 0 is the trigger sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    pub data: Vec<f64>,
    pub fs: f64,
    pub trigger: EdgeSearch,
}

impl AlignmentResult {
    /// Number of samples dropped from the front of the data channel.
    pub fn trigger_index(&self) -> usize {
        self.trigger.index()
    }
}

/// Drop every data sample before the first falling edge of `trigger`.
///
/// Both channels must share the time base. Without an edge the data is
/// returned untouched; an edge past the end of `data` leaves it empty.
pub fn align(trigger: &[f64], mut data: Vec<f64>, fs: f64) -> AlignmentResult {
    let search = detect_falling_edge(trigger, None);
    let idx = search.index().min(data.len());
    data.drain(..idx);
    AlignmentResult {
        data,
        fs,
        trigger: search,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_samples_before_trigger() {
        let trigger = [5.0, 5.0, 5.0, 1.0, 1.0, 1.0];
        let data = vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        let aligned = align(&trigger, data.clone(), 1.0);
        assert_eq!(aligned.trigger, EdgeSearch::Found(2));
        assert_eq!(aligned.data, vec![30.0, 40.0, 50.0, 60.0]);
        assert_eq!(aligned.data.len(), data.len() - aligned.trigger_index());
    }

    #[test]
    fn missing_trigger_passes_data_through() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let aligned = align(&[5.0; 4], data.clone(), 250.0);
        assert_eq!(aligned.trigger, EdgeSearch::NotFound);
        assert_eq!(aligned.data, data);
        assert_eq!(aligned.fs, 250.0);
    }

    #[test]
    fn realigning_without_edge_is_identity() {
        let trigger = [5.0, 5.0, 0.0, 0.0, 0.0];
        let first = align(&trigger, vec![1.0, 2.0, 3.0, 4.0, 5.0], 1.0);
        let again = align(&[1.0; 4], first.data.clone(), 1.0);
        assert_eq!(again.data, first.data);
    }

    #[test]
    fn edge_beyond_short_data_yields_empty() {
        let trigger = [5.0, 5.0, 5.0, 5.0, 0.0];
        let aligned = align(&trigger, vec![1.0, 2.0], 1.0);
        assert!(aligned.data.is_empty());
    }
}
