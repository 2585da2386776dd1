//! MRG32k3a combined multiple-recursive generator with a three-level
//! stream / substream / subsubstream hierarchy.
//!
//! Generators are addressed by a [`StreamIndex`] triplet. Distinct triplets
//! under the same reference seed never overlap: streams are `2^141` draws
//! long, substreams `2^94` and subsubstreams `2^47`. Experiments relying on
//! common random numbers hand each random input its own generator and use
//! [`Mrg32k3a::reset_substream`] / [`Mrg32k3a::advance_substream`] to replay
//! or move past the draws a replication consumed.

pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod io;
pub mod matrix;
pub mod params;
pub mod state;
pub mod step;
pub mod variates;

#[cfg(any(test, feature = "proptest-support"))]
pub mod strategies;

pub use error::RngError;
pub use generator::{Mrg32k3a, Snapshot};
pub use hierarchy::{Level, StreamIndex};
pub use state::State;
pub use variates::UniformSource;
