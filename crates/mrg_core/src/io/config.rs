use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RngError;
use crate::generator::Mrg32k3a;
use crate::hierarchy::StreamIndex;
use crate::params::DEFAULT_REF_SEED;

/// JSON description of where a generator should start.
///
/// Both fields are optional: the reference seed defaults to all-12345 and the
/// index to `[0, 0, 0]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_ref_seed")]
    pub ref_seed: Vec<u64>,
    #[serde(default)]
    pub index: StreamIndex,
}

fn default_ref_seed() -> Vec<u64> {
    DEFAULT_REF_SEED.to_vec()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ref_seed: default_ref_seed(),
            index: StreamIndex::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration document from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open config file {:?}", path))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Deserialize a configuration document from an arbitrary reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("invalid generator config json")
    }

    /// Validate the reference seed and position a generator at `index`.
    pub fn build(&self) -> Result<Mrg32k3a, RngError> {
        Mrg32k3a::new(&self.ref_seed, self.index)
    }
}
