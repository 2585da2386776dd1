//! Reusable `proptest` strategies for generator states and addresses.

use proptest::prelude::*;

use crate::hierarchy::StreamIndex;
use crate::params::{M1, M2};
use crate::state::State;

/// Any state accepted by [`State::new`].
pub fn valid_state() -> impl Strategy<Value = State> {
    (
        prop::array::uniform3(0..M1 as u64),
        prop::array::uniform3(0..M2 as u64),
    )
        .prop_filter("a recursion half is all zero", |(first, second)| {
            first.iter().any(|&w| w != 0) && second.iter().any(|&w| w != 0)
        })
        .prop_map(|(first, second)| {
            State::new([
                first[0], first[1], first[2], second[0], second[1], second[2],
            ])
            .expect("strategy only yields in-range states")
        })
}

/// Small stream addresses, cheap enough to reach by sequential jumps.
pub fn small_index(max: u64) -> impl Strategy<Value = StreamIndex> {
    (0..=max, 0..=max, 0..=max).prop_map(|(stream, substream, subsubstream)| {
        StreamIndex::new(stream, substream, subsubstream)
    })
}
