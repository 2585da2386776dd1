use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RngError;
use crate::matrix::Vec3;
use crate::params::{DEFAULT_REF_SEED, M1, M2};

/// Number of words in an MRG32k3a state.
pub const STATE_LEN: usize = 6;

/// Six-word generator state `(x1, x2, x3, y1, y2, y3)`.
///
/// The first half lives in `[0, M1)`, the second in `[0, M2)`, and neither half
/// is all zero. Every constructor enforces this, so a `State` value is always
/// safe to step or jump.
///
/// The all-zero check is stricter than SimOpt's `MRG32k3a`, which accepts such
/// seeds. A zero half stays zero under its recursion, so the generator would
/// only ever see the other half's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u64; 6]", into = "[u64; 6]")]
pub struct State([u64; STATE_LEN]);

impl State {
    /// The default reference seed, `(12345, ..., 12345)`.
    pub const DEFAULT_REF_SEED: State = State(DEFAULT_REF_SEED);

    /// Validate six words as a generator state.
    pub fn new(words: [u64; STATE_LEN]) -> Result<Self, RngError> {
        for (position, &word) in words.iter().enumerate() {
            let modulus = (if position < 3 { M1 } else { M2 }) as u64;
            if word >= modulus {
                return Err(RngError::configuration(format!(
                    "state component {} = {} is outside [0, {})",
                    position, word, modulus
                )));
            }
        }
        if words[..3].iter().all(|&word| word == 0) {
            return Err(RngError::configuration(
                "first recursion components are all zero",
            ));
        }
        if words[3..].iter().all(|&word| word == 0) {
            return Err(RngError::configuration(
                "second recursion components are all zero",
            ));
        }
        Ok(Self(words))
    }

    /// Validate an arbitrary-length slice as a generator state.
    pub fn from_slice(words: &[u64]) -> Result<Self, RngError> {
        Self::new(Self::exact_words(words)?)
    }

    /// Check only the length of `words`; a wrong length is always a
    /// configuration error, whatever the caller.
    pub(crate) fn exact_words(words: &[u64]) -> Result<[u64; STATE_LEN], RngError> {
        words.try_into().map_err(|_| {
            RngError::configuration(format!(
                "state must have {} components, got {}",
                STATE_LEN,
                words.len()
            ))
        })
    }

    pub fn words(&self) -> [u64; STATE_LEN] {
        self.0
    }

    /// Split into the `M1` half and the `M2` half.
    pub(crate) fn halves(&self) -> (Vec3, Vec3) {
        let w = self.0;
        (
            [w[0] as i64, w[1] as i64, w[2] as i64],
            [w[3] as i64, w[4] as i64, w[5] as i64],
        )
    }

    /// Reassemble from halves already reduced into their modulus ranges.
    pub(crate) fn from_halves(first: Vec3, second: Vec3) -> Self {
        debug_assert!(first.iter().all(|v| (0..M1).contains(v)));
        debug_assert!(second.iter().all(|v| (0..M2).contains(v)));
        Self([
            first[0] as u64,
            first[1] as u64,
            first[2] as u64,
            second[0] as u64,
            second[1] as u64,
            second[2] as u64,
        ])
    }
}

impl TryFrom<[u64; STATE_LEN]> for State {
    type Error = RngError;

    fn try_from(words: [u64; STATE_LEN]) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<State> for [u64; STATE_LEN] {
    fn from(state: State) -> Self {
        state.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.0;
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            w[0], w[1], w[2], w[3], w[4], w[5]
        )
    }
}
