use serde::{Deserialize, Serialize};

use crate::hierarchy::StreamIndex;

/// One emitted uniform, tagged with its position in the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Zero-based draw counter within the run.
    pub n: u64,
    pub u: f64,
    /// Address the draw was taken from; omitted when the run never moves.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<StreamIndex>,
}

impl DrawRecord {
    pub fn new(n: u64, u: f64) -> Self {
        Self { n, u, index: None }
    }

    pub fn at(n: u64, u: f64, index: StreamIndex) -> Self {
        Self {
            n,
            u,
            index: Some(index),
        }
    }

    pub fn to_ndjson(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string(self)?;
        json.push('\n');
        Ok(json)
    }
}
