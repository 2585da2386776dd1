//! The generator façade held by simulation models, solvers and bootstrap code.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RngError;
use crate::hierarchy::{Anchors, Level, StreamHierarchy, StreamIndex};
use crate::state::{State, STATE_LEN};
use crate::step::mrg32k3a;
use crate::variates::UniformSource;

/// MRG32k3a generator positioned inside the stream hierarchy.
///
/// Every method that moves the generator takes `&mut self` and leaves it fully
/// updated before returning. Give each thread its own instance on a distinct
/// [`StreamIndex`] rather than sharing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mrg32k3a {
    current: State,
    hierarchy: StreamHierarchy,
}

/// Plain serializable image of a generator, suitable for checkpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ref_seed: [u64; STATE_LEN],
    pub current: [u64; STATE_LEN],
    pub stream_start: [u64; STATE_LEN],
    pub substream_start: [u64; STATE_LEN],
    pub subsubstream_start: [u64; STATE_LEN],
    pub index: StreamIndex,
}

impl Mrg32k3a {
    /// Build a generator from a reference seed of six words, positioned at `index`.
    pub fn new(ref_seed: &[u64], index: StreamIndex) -> Result<Self, RngError> {
        let ref_seed = State::from_slice(ref_seed)?;
        Ok(Self::from_ref_seed(ref_seed, index))
    }

    /// Generator on the default reference seed, positioned at `index`.
    pub fn with_index(index: StreamIndex) -> Self {
        Self::from_ref_seed(State::DEFAULT_REF_SEED, index)
    }

    pub fn from_ref_seed(ref_seed: State, index: StreamIndex) -> Self {
        let hierarchy = StreamHierarchy::start_fixed(ref_seed, index);
        Self {
            current: hierarchy.anchors().subsubstream_start,
            hierarchy,
        }
    }

    /// Rebuild a generator from a snapshot, rejecting out-of-range components.
    pub fn restore(snapshot: &Snapshot) -> Result<Self, RngError> {
        // Advancing increments the index, so the last value would overflow.
        if snapshot.index.to_array().contains(&u64::MAX) {
            return Err(RngError::invalid_state(format!(
                "index: component of {} cannot be advanced",
                snapshot.index
            )));
        }
        let field = |name: &str, words: [u64; STATE_LEN]| {
            State::new(words)
                .map_err(|err| RngError::invalid_state(format!("{}: {}", name, err.reason())))
        };
        let ref_seed = field("ref_seed", snapshot.ref_seed)?;
        let current = field("current", snapshot.current)?;
        let anchors = Anchors {
            stream_start: field("stream_start", snapshot.stream_start)?,
            substream_start: field("substream_start", snapshot.substream_start)?,
            subsubstream_start: field("subsubstream_start", snapshot.subsubstream_start)?,
        };
        debug!(index = %snapshot.index, %current, "restored generator");
        Ok(Self {
            current,
            hierarchy: StreamHierarchy::from_parts(ref_seed, anchors, snapshot.index),
        })
    }

    /// Overwrite the current state. Anchors and index are left untouched.
    ///
    /// A slice of the wrong length is a configuration error; six words that
    /// do not form a valid state are an invalid state.
    pub fn seed(&mut self, state: &[u64]) -> Result<(), RngError> {
        let words = State::exact_words(state)?;
        self.current =
            State::new(words).map_err(|err| RngError::invalid_state(err.reason()))?;
        Ok(())
    }

    /// Step the generator and return a uniform draw in `(0, 1)`.
    pub fn draw(&mut self) -> f64 {
        let (next, u) = mrg32k3a(&self.current);
        self.current = next;
        u
    }

    pub fn current_state(&self) -> State {
        self.current
    }

    pub fn ref_seed(&self) -> State {
        self.hierarchy.ref_seed()
    }

    pub fn index(&self) -> StreamIndex {
        self.hierarchy.index()
    }

    pub fn anchors(&self) -> &Anchors {
        self.hierarchy.anchors()
    }

    /// Capture everything needed to resume this generator later.
    pub fn snapshot(&self) -> Snapshot {
        let anchors = self.hierarchy.anchors();
        Snapshot {
            ref_seed: self.hierarchy.ref_seed().words(),
            current: self.current.words(),
            stream_start: anchors.stream_start.words(),
            substream_start: anchors.substream_start.words(),
            subsubstream_start: anchors.subsubstream_start.words(),
            index: self.hierarchy.index(),
        }
    }

    /// Replace the whole generator with the contents of `snapshot`.
    ///
    /// On error the generator is left unchanged.
    pub fn set_state(&mut self, snapshot: &Snapshot) -> Result<(), RngError> {
        *self = Self::restore(snapshot)?;
        Ok(())
    }

    /// Re-derive all anchors from the reference seed for `index`.
    pub fn start_fixed(&mut self, index: StreamIndex) {
        *self = Self::from_ref_seed(self.hierarchy.ref_seed(), index);
    }

    pub fn advance_stream(&mut self) {
        self.current = self.hierarchy.advance(Level::Stream);
    }

    pub fn advance_substream(&mut self) {
        self.current = self.hierarchy.advance(Level::Substream);
    }

    pub fn advance_subsubstream(&mut self) {
        self.current = self.hierarchy.advance(Level::Subsubstream);
    }

    pub fn reset_stream(&mut self) {
        self.current = self.hierarchy.reset(Level::Stream);
    }

    pub fn reset_substream(&mut self) {
        self.current = self.hierarchy.reset(Level::Substream);
    }

    pub fn reset_subsubstream(&mut self) {
        self.current = self.hierarchy.reset(Level::Subsubstream);
    }
}

impl Default for Mrg32k3a {
    fn default() -> Self {
        Self::with_index(StreamIndex::default())
    }
}

impl UniformSource for Mrg32k3a {
    fn draw(&mut self) -> f64 {
        Mrg32k3a::draw(self)
    }
}

/// Lets the generator drive `rand`-based code. Each 32-bit output consumes one
/// uniform draw.
impl RngCore for Mrg32k3a {
    fn next_u32(&mut self) -> u32 {
        const SCALE: f64 = 4_294_967_296.0;
        (self.draw() * SCALE) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
