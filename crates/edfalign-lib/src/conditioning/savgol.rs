use serde::{Deserialize, Serialize};

/// Savitzky–Golay smoothing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    pub apply: bool,
    /// Window length in samples; must be odd.
    pub window: usize,
    /// Polynomial order; must be below `window`.
    pub poly: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            apply: false,
            window: 401,
            poly: 3,
        }
    }
}

/// What [`smooth_with_outcome`] did to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothOutcome {
    Disabled,
    /// The signal is not longer than the window.
    TooShort,
    /// Even window or `poly >= window`; the signal passed through.
    InvalidParams,
    Filtered,
}

/// Smooth `signal` unless disabled or not longer than the window.
pub fn smooth(signal: Vec<f64>, params: &SmoothingParams) -> Vec<f64> {
    smooth_with_outcome(signal, params).0
}

/// Like [`smooth`], also reporting whether the filter actually ran.
pub fn smooth_with_outcome(
    signal: Vec<f64>,
    params: &SmoothingParams,
) -> (Vec<f64>, SmoothOutcome) {
    if !params.apply {
        return (signal, SmoothOutcome::Disabled);
    }
    if signal.len() <= params.window {
        return (signal, SmoothOutcome::TooShort);
    }
    match savgol_filter(&signal, params.window, params.poly) {
        Some(smoothed) => (smoothed, SmoothOutcome::Filtered),
        None => (signal, SmoothOutcome::InvalidParams),
    }
}

/// Least-squares polynomial smoothing over a sliding window.
///
/// Interior samples use the centred fit. The first and last `window / 2`
/// samples are read off a single polynomial fitted to the first (last)
/// `window` samples. Returns `None` when the window is even, `poly >= window`
/// or the signal is shorter than the window.
pub fn savgol_filter(signal: &[f64], window: usize, poly: usize) -> Option<Vec<f64>> {
    let n = signal.len();
    if window % 2 == 0 || poly >= window || n < window {
        return None;
    }
    let fit = projection_matrix(window, poly)?;
    let half = window / 2;
    let apply_row = |row: &[f64], start: usize| -> f64 {
        row.iter()
            .zip(&signal[start..start + window])
            .map(|(c, x)| c * x)
            .sum()
    };

    let mut out = Vec::with_capacity(n);
    for row in &fit[..half] {
        out.push(apply_row(row, 0));
    }
    let centre = &fit[half];
    for i in half..n - half {
        out.push(apply_row(centre, i - half));
    }
    let tail_start = n - window;
    for row in &fit[window - half..] {
        out.push(apply_row(row, tail_start));
    }
    Some(out)
}

/// Hat matrix `A (AᵀA)⁻¹ Aᵀ` of the window's Vandermonde matrix.
///
/// Row `r` holds the weights that produce the fitted value at window position
/// `r`. Positions are scaled to [-1, 1] to keep the normal equations
/// well-conditioned for long windows.
fn projection_matrix(window: usize, poly: usize) -> Option<Vec<Vec<f64>>> {
    let half = window / 2;
    let scale = half.max(1) as f64;
    let terms = poly + 1;
    let vander: Vec<Vec<f64>> = (0..window)
        .map(|k| {
            let t = (k as f64 - half as f64) / scale;
            (0..terms).map(|j| t.powi(j as i32)).collect()
        })
        .collect();

    let mut gram = vec![vec![0.0; terms]; terms];
    for row in &vander {
        for a in 0..terms {
            for b in 0..terms {
                gram[a][b] += row[a] * row[b];
            }
        }
    }
    // Columns of Aᵀ, one per window position.
    let rhs: Vec<Vec<f64>> = (0..terms)
        .map(|j| vander.iter().map(|row| row[j]).collect())
        .collect();
    let solved = solve(gram, rhs)?;

    let hat = vander
        .iter()
        .map(|row| {
            (0..window)
                .map(|k| (0..terms).map(|j| row[j] * solved[j][k]).sum())
                .collect()
        })
        .collect();
    Some(hat)
}

/// Gauss–Jordan elimination with partial pivoting, solving `m · X = rhs`.
fn solve(mut m: Vec<Vec<f64>>, mut rhs: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let size = m.len();
    for col in 0..size {
        let pivot =
            (col..size).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        let diag = m[col][col];
        m[col].iter_mut().for_each(|v| *v /= diag);
        rhs[col].iter_mut().for_each(|v| *v /= diag);

        let pivot_m = m[col].clone();
        let pivot_rhs = rhs[col].clone();
        for row in 0..size {
            let factor = m[row][col];
            if row == col || factor == 0.0 {
                continue;
            }
            for (v, p) in m[row].iter_mut().zip(&pivot_m) {
                *v -= factor * p;
            }
            for (v, p) in rhs[row].iter_mut().zip(&pivot_rhs) {
                *v -= factor * p;
            }
        }
    }
    Some(rhs)
}
