use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::generator::{Mrg32k3a, Snapshot};

impl Snapshot {
    pub fn to_ndjson(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Write `snapshot` to `path` as pretty-printed JSON.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create checkpoint file {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot).context("failed to encode checkpoint")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read a snapshot document from disk without validating it.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)
        .with_context(|| format!("failed to open checkpoint file {:?}", path))?;
    snapshot_from_reader(BufReader::new(file))
}

pub fn snapshot_from_reader<R: Read>(reader: R) -> Result<Snapshot> {
    serde_json::from_reader(reader).context("invalid checkpoint json")
}

/// Load a checkpoint and rebuild the generator it describes.
pub fn resume_from_path(path: &Path) -> Result<Mrg32k3a> {
    let snapshot = load_snapshot(path)?;
    Mrg32k3a::restore(&snapshot).with_context(|| format!("checkpoint {:?} is not usable", path))
}
