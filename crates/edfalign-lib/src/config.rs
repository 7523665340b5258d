use crate::conditioning::{ConditioningParams, SmoothingParams};
use crate::error::{OverlayError, Result};
use crate::signal::RecordingDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level TOML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub smoothing: SmoothingParams,
    pub visual: VisualSettings,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub trigger_ch_index: usize,
    pub data_ch_index: usize,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub time_limit_sec: Option<f64>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub remove_offset: bool,
    pub filename: PathBuf,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            trigger_ch_index: 0,
            data_ch_index: 1,
            time_limit_sec: None,
            x_label: None,
            y_label: None,
            remove_offset: false,
            filename: PathBuf::from("output.png"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    #[serde(deserialize_with = "lenient_f64")]
    pub line_width: f64,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self { line_width: 1.0 }
    }
}

/// TOML keeps integers and floats apart; `2` and `2.0` both mean seconds here.
#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

impl From<Number> for f64 {
    fn from(n: Number) -> f64 {
        match n {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<f64, D::Error> {
    Number::deserialize(de).map(f64::from)
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<f64>, D::Error> {
    Ok(Option::<Number>::deserialize(de)?.map(f64::from))
}

/// One `[[files]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
}

impl FileEntry {
    /// Configured label, or the file stem when none is given.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string())
        })
    }
}

impl Settings {
    /// Read, parse and validate a configuration file.
    ///
    /// Recording paths are kept as written, so relative ones resolve against
    /// the working directory like the output filename.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| OverlayError::config(path, e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            OverlayError::Config { reason, .. } => OverlayError::config(path, reason),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| OverlayError::config("<inline>", e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(OverlayError::config("<inline>", reason));
        let smoothing = &self.smoothing;
        if smoothing.window == 0 || smoothing.window % 2 == 0 {
            return invalid(format!(
                "smoothing.window must be a positive odd number, got {}",
                smoothing.window
            ));
        }
        if smoothing.poly >= smoothing.window {
            return invalid(format!(
                "smoothing.poly ({}) must be less than smoothing.window ({})",
                smoothing.poly, smoothing.window
            ));
        }
        if let Some(limit) = self.general.time_limit_sec {
            if !limit.is_finite() || limit < 0.0 {
                return invalid(format!(
                    "general.time_limit_sec must be a non-negative number, got {}",
                    limit
                ));
            }
        }
        if self.visual.line_width.is_nan() || self.visual.line_width <= 0.0 {
            return invalid(format!(
                "visual.line_width must be positive, got {}",
                self.visual.line_width
            ));
        }
        Ok(())
    }

    pub fn conditioning(&self) -> ConditioningParams {
        ConditioningParams {
            time_limit_sec: self.general.time_limit_sec,
            remove_offset: self.general.remove_offset,
            smoothing: self.smoothing,
        }
    }

    /// Recording descriptors in configuration order.
    pub fn recordings(&self) -> Vec<RecordingDescriptor> {
        self.files
            .iter()
            .map(|entry| RecordingDescriptor {
                path: entry.path.clone(),
                label: entry.display_label(),
                trigger_channel: self.general.trigger_ch_index,
                data_channel: self.general.data_ch_index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[general]
trigger_ch_index = 2
data_ch_index = 0
time_limit_sec = 0.5
x_label = "Time [us]"
y_label = "Amplitude"
remove_offset = true
filename = "overlay.png"

[smoothing]
apply = true
window = 51
poly = 2

[visual]
line_width = 1.5

[[files]]
path = "a.edf"
label = "first"

[[files]]
path = "data/b.edf"
"#;

    #[test]
    fn parses_all_sections() {
        let settings = Settings::from_toml_str(FULL).expect("valid config");
        assert_eq!(settings.general.trigger_ch_index, 2);
        assert_eq!(settings.general.filename, PathBuf::from("overlay.png"));
        assert_eq!(settings.smoothing.window, 51);
        assert_eq!(settings.visual.line_width, 1.5);
        let params = settings.conditioning();
        assert_eq!(params.time_limit_sec, Some(0.5));
        assert!(params.remove_offset);
        assert!(params.smoothing.apply);

        let recordings = settings.recordings();
        assert_eq!(recordings.len(), 2);
        assert_eq!(recordings[0].label, "first");
        assert_eq!(recordings[1].label, "b");
        assert_eq!(recordings[1].trigger_channel, 2);
        assert_eq!(recordings[1].data_channel, 0);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let settings = Settings::from_toml_str("[[files]]\npath = \"x.edf\"\n").unwrap();
        assert_eq!(settings.general.trigger_ch_index, 0);
        assert_eq!(settings.general.data_ch_index, 1);
        assert_eq!(settings.general.time_limit_sec, None);
        assert!(!settings.general.remove_offset);
        assert_eq!(settings.general.filename, PathBuf::from("output.png"));
        assert_eq!(settings.smoothing, SmoothingParams::default());
        assert_eq!(settings.smoothing.window, 401);
        assert_eq!(settings.smoothing.poly, 3);
        assert_eq!(settings.visual.line_width, 1.0);
    }

    #[test]
    fn rejects_even_window() {
        let err = Settings::from_toml_str("[smoothing]\nwindow = 10\n[[files]]\npath = \"x\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("odd"), "{}", err);
    }

    #[test]
    fn rejects_order_not_below_window() {
        let text = "[smoothing]\nwindow = 5\npoly = 5\n[[files]]\npath = \"x\"\n";
        assert!(matches!(
            Settings::from_toml_str(text),
            Err(OverlayError::Config { .. })
        ));
    }

    #[test]
    fn rejects_negative_time_limit_and_line_width() {
        let text = "[general]\ntime_limit_sec = -1.0\n[[files]]\npath = \"x\"\n";
        assert!(Settings::from_toml_str(text).is_err());
        let text = "[visual]\nline_width = 0.0\n[[files]]\npath = \"x\"\n";
        assert!(Settings::from_toml_str(text).is_err());
    }

    #[test]
    fn integer_numbers_are_accepted() {
        let text = "[general]\ntime_limit_sec = 2\n\
                    [visual]\nline_width = 3\n\
                    [[files]]\npath = \"x\"\n";
        let settings = Settings::from_toml_str(text).unwrap();
        assert_eq!(settings.general.time_limit_sec, Some(2.0));
        assert_eq!(settings.visual.line_width, 3.0);
    }

    #[test]
    fn zero_time_limit_is_accepted() {
        let text = "[general]\ntime_limit_sec = 0.0\n[[files]]\npath = \"x\"\n";
        assert!(Settings::from_toml_str(text).is_ok());
    }

    #[test]
    fn empty_file_list_is_accepted() {
        let settings = Settings::from_toml_str("[general]\n").expect("empty list is valid");
        assert!(settings.files.is_empty());
        assert!(settings.recordings().is_empty());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            Settings::from_toml_str("[general\n"),
            Err(OverlayError::Config { .. })
        ));
    }

    #[test]
    fn load_keeps_recording_paths_as_written() {
        let dir = tempfile::tempdir().unwrap();
        let configs = dir.path().join("configs");
        fs::create_dir(&configs).unwrap();
        let cfg = configs.join("plot.toml");
        fs::write(&cfg, FULL).unwrap();
        let settings = Settings::load(&cfg).unwrap();
        assert_eq!(settings.files[0].path, PathBuf::from("a.edf"));
        assert_eq!(settings.files[1].path, PathBuf::from("data/b.edf"));
        assert_eq!(settings.recordings()[1].path, PathBuf::from("data/b.edf"));
    }

    #[test]
    fn load_reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, OverlayError::Config { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
