//! Stream / substream / subsubstream bookkeeping.
//!
//! A [`StreamHierarchy`] records the state at the start of the current stream,
//! substream and subsubstream together with the index triplet labelling them.
//! Moving between levels multiplies an anchor by one of the fixed jump
//! matrices, so any address is reachable in a number of matrix-vector products
//! proportional to its index components.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::RngError;
use crate::matrix::{mat33_mat31_mod, Mat33};
use crate::params::{A1P141, A1P47, A1P94, A2P141, A2P47, A2P94, M1, M2};
use crate::state::State;

/// Logical address of a generator inside the hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamIndex {
    pub stream: u64,
    pub substream: u64,
    pub subsubstream: u64,
}

impl StreamIndex {
    pub fn new(stream: u64, substream: u64, subsubstream: u64) -> Self {
        Self {
            stream,
            substream,
            subsubstream,
        }
    }

    /// Parse a `[stream, substream, subsubstream]` triplet.
    pub fn from_slice(triplet: &[u64]) -> Result<Self, RngError> {
        match *triplet {
            [stream, substream, subsubstream] => Ok(Self::new(stream, substream, subsubstream)),
            _ => Err(RngError::configuration(format!(
                "stream index must have 3 components, got {}",
                triplet.len()
            ))),
        }
    }

    pub fn to_array(self) -> [u64; 3] {
        [self.stream, self.substream, self.subsubstream]
    }
}

impl fmt::Display for StreamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.stream, self.substream, self.subsubstream
        )
    }
}

/// One level of the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Streams start `2^141` steps apart.
    Stream,
    /// Substreams start `2^94` steps apart.
    Substream,
    /// Subsubstreams start `2^47` steps apart.
    Subsubstream,
}

impl Level {
    /// Base-2 logarithm of the number of steps between consecutive starts.
    pub fn log2_spacing(self) -> u32 {
        match self {
            Level::Stream => 141,
            Level::Substream => 94,
            Level::Subsubstream => 47,
        }
    }

    fn matrices(self) -> (&'static Mat33, &'static Mat33) {
        match self {
            Level::Stream => (&A1P141, &A2P141),
            Level::Substream => (&A1P94, &A2P94),
            Level::Subsubstream => (&A1P47, &A2P47),
        }
    }
}

/// Move `state` forward by one spacing of `level`.
pub fn jump(state: &State, level: Level) -> State {
    let (first, second) = state.halves();
    let (a1, a2) = level.matrices();
    State::from_halves(
        mat33_mat31_mod(a1, &first, M1),
        mat33_mat31_mod(a2, &second, M2),
    )
}

/// Apply the single `level` jump `count` times in sequence.
pub fn jump_repeated(state: &State, level: Level, count: u64) -> State {
    let mut state = *state;
    for _ in 0..count {
        state = jump(&state, level);
    }
    state
}

/// Start states of the current stream, substream and subsubstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    pub stream_start: State,
    pub substream_start: State,
    pub subsubstream_start: State,
}

impl Anchors {
    fn collapsed(state: State) -> Self {
        Self {
            stream_start: state,
            substream_start: state,
            subsubstream_start: state,
        }
    }

    pub fn get(&self, level: Level) -> State {
        match level {
            Level::Stream => self.stream_start,
            Level::Substream => self.substream_start,
            Level::Subsubstream => self.subsubstream_start,
        }
    }
}

/// Anchors plus the index triplet labelling them, rooted at a reference seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamHierarchy {
    ref_seed: State,
    anchors: Anchors,
    index: StreamIndex,
}

impl StreamHierarchy {
    /// Position the hierarchy at `index`, jumping from `ref_seed` one spacing
    /// at a time: streams first, then substreams, then subsubstreams.
    pub fn start_fixed(ref_seed: State, index: StreamIndex) -> Self {
        let stream_start = jump_repeated(&ref_seed, Level::Stream, index.stream);
        let substream_start = jump_repeated(&stream_start, Level::Substream, index.substream);
        let subsubstream_start =
            jump_repeated(&substream_start, Level::Subsubstream, index.subsubstream);
        debug!(%index, %ref_seed, "positioned stream hierarchy");
        Self {
            ref_seed,
            anchors: Anchors {
                stream_start,
                substream_start,
                subsubstream_start,
            },
            index,
        }
    }

    /// Rebuild from previously captured parts without re-deriving anchors.
    pub(crate) fn from_parts(ref_seed: State, anchors: Anchors, index: StreamIndex) -> Self {
        Self {
            ref_seed,
            anchors,
            index,
        }
    }

    pub fn ref_seed(&self) -> State {
        self.ref_seed
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn index(&self) -> StreamIndex {
        self.index
    }

    /// Jump the anchor of `level` to the next start at that level and return
    /// it. Anchors and index components below `level` restart at zero.
    pub fn advance(&mut self, level: Level) -> State {
        let next = jump(&self.anchors.get(level), level);
        match level {
            Level::Stream => {
                self.anchors = Anchors::collapsed(next);
                self.index = StreamIndex::new(self.index.stream + 1, 0, 0);
            }
            Level::Substream => {
                self.anchors.substream_start = next;
                self.anchors.subsubstream_start = next;
                self.index.substream += 1;
                self.index.subsubstream = 0;
            }
            Level::Subsubstream => {
                self.anchors.subsubstream_start = next;
                self.index.subsubstream += 1;
            }
        }
        trace!(?level, index = %self.index, "advanced");
        next
    }

    /// Return the anchor of `level` unchanged. Anchors below it are re-pointed
    /// at it and their index components zeroed so the triplet keeps labelling
    /// the anchors it describes.
    pub fn reset(&mut self, level: Level) -> State {
        let start = self.anchors.get(level);
        match level {
            Level::Stream => {
                self.anchors.substream_start = start;
                self.anchors.subsubstream_start = start;
                self.index.substream = 0;
                self.index.subsubstream = 0;
            }
            Level::Substream => {
                self.anchors.subsubstream_start = start;
                self.index.subsubstream = 0;
            }
            Level::Subsubstream => {}
        }
        trace!(?level, index = %self.index, "reset");
        start
    }
}
