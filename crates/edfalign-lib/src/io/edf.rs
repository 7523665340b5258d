use crate::error::{OverlayError, Result as OverlayResult};
use crate::signal::{Recording, RecordingDescriptor, TimeSeries};
use anyhow::{anyhow, Result};
use edf_reader::file_reader::SyncFileReader;
use edf_reader::sync_reader::SyncEDFReader;
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Helper implementing the EDF reader trait for on-disk files.
struct DiskFileReader {
    path: PathBuf,
}

impl DiskFileReader {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SyncFileReader for DiskFileReader {
    fn read(&self, offset: u64, length: u64) -> Result<Vec<u8>, std::io::Error> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; length as usize];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}

fn open(path: &Path) -> Result<SyncEDFReader<DiskFileReader>> {
    let reader = SyncEDFReader::init_with_file_reader(DiskFileReader::new(path))?;
    Ok(reader)
}

fn read_channels(
    reader: &SyncEDFReader<DiskFileReader>,
    channels: &[usize],
) -> Result<Vec<TimeSeries>> {
    let header = &reader.edf_header;
    for &channel in channels {
        if channel >= header.channels.len() {
            return Err(anyhow!(
                "EDF file has {} channels; channel {} is out of range",
                header.channels.len(),
                channel
            ));
        }
    }
    let total_duration = header.block_duration * header.number_of_blocks;
    let data_matrix = reader.read_data_window(0, total_duration)?;
    channels
        .iter()
        .map(|&channel| {
            let channel_data = data_matrix
                .get(channel)
                .ok_or_else(|| anyhow!("missing channel data"))?;
            let hdr_chan = &header.channels[channel];
            let fs = hdr_chan.number_of_samples_in_data_record as f64 * 1000.0
                / header.block_duration as f64;
            Ok(TimeSeries {
                fs,
                data: channel_data.iter().map(|value| *value as f64).collect(),
            })
        })
        .collect()
}

/// Load the trigger and data channels named by `descriptor`.
///
/// The file must exist; the data channel's rate becomes the recording rate.
pub fn load_recording(descriptor: &RecordingDescriptor) -> OverlayResult<Recording> {
    let path = &descriptor.path;
    if !path.exists() {
        return Err(OverlayError::MissingFile(path.clone()));
    }
    let reader = open(path).map_err(|e| OverlayError::parse(path, format!("{:#}", e)))?;
    let mut series = read_channels(
        &reader,
        &[descriptor.trigger_channel, descriptor.data_channel],
    )
    .map_err(|e| OverlayError::parse(path, format!("{:#}", e)))?;
    let (data, trigger) = match (series.pop(), series.pop()) {
        (Some(data), Some(trigger)) => (data, trigger),
        _ => return Err(OverlayError::parse(path, "missing channel data")),
    };
    if trigger.fs != data.fs {
        debug!(
            "{}: trigger channel at {} Hz, data channel at {} Hz",
            path.display(),
            trigger.fs,
            data.fs
        );
    }
    info!(
        "Loaded {} ({} samples at {} Hz)",
        path.display(),
        data.data.len(),
        data.fs
    );
    Ok(Recording {
        descriptor: descriptor.clone(),
        trigger: trigger.data,
        data: data.data,
        fs: data.fs,
    })
}
