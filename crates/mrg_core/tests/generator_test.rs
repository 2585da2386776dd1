use mrg_core::params::{M1, M2};
use mrg_core::variates::{choices, poissonvariate};
use mrg_core::{Mrg32k3a, RngError, Snapshot, StreamIndex};
use proptest::prelude::*;

fn seed_words() -> impl Strategy<Value = [u64; 6]> {
    (
        prop::array::uniform3(1..M1 as u64),
        prop::array::uniform3(1..M2 as u64),
    )
        .prop_map(|(x, y)| [x[0], x[1], x[2], y[0], y[1], y[2]])
}

#[test]
fn hundred_thousand_draws_stay_inside_open_interval() {
    for index in [
        StreamIndex::new(0, 0, 0),
        StreamIndex::new(1, 0, 0),
        StreamIndex::new(3, 2, 1),
    ] {
        let mut rng = Mrg32k3a::with_index(index);
        for n in 0..100_000 {
            let u = rng.draw();
            assert!(u > 0.0 && u < 1.0, "draw {n} at {index} = {u}");
        }
    }
}

#[test]
fn independent_generators_are_bit_identical() {
    let run = || {
        let mut rng = Mrg32k3a::with_index(StreamIndex::new(2, 1, 0));
        let mut out = Vec::new();
        for round in 0..5 {
            out.extend((0..50).map(|_| rng.draw().to_bits()));
            if round % 2 == 0 {
                rng.advance_subsubstream();
            } else {
                rng.reset_substream();
            }
            out.push(poissonvariate(&mut rng, 12.0).expect("valid mean"));
            out.extend(
                choices(&mut rng, 30, 30)
                    .expect("non-empty population")
                    .into_iter()
                    .map(|i| i as u64),
            );
        }
        (out, rng.snapshot())
    };
    assert_eq!(run(), run());
}

#[test]
fn snapshot_json_round_trip_resumes_run() {
    let mut rng = Mrg32k3a::with_index(StreamIndex::new(0, 9, 2));
    rng.advance_subsubstream();
    for _ in 0..123 {
        rng.draw();
    }
    let json = serde_json::to_string(&rng.snapshot()).expect("snapshot serializes");
    let snapshot: Snapshot = serde_json::from_str(&json).expect("snapshot parses");

    let mut restored = Mrg32k3a::default();
    restored.set_state(&snapshot).expect("snapshot is valid");
    assert_eq!(restored.index(), StreamIndex::new(0, 9, 3));
    for _ in 0..100 {
        assert_eq!(restored.draw().to_bits(), rng.draw().to_bits());
    }
    restored.reset_stream();
    rng.reset_stream();
    assert_eq!(restored, rng);
}

#[test]
fn restored_snapshot_with_zero_half_is_rejected() {
    let mut snapshot = Mrg32k3a::default().snapshot();
    snapshot.stream_start = [0, 0, 0, 1, 1, 1];
    match Mrg32k3a::restore(&snapshot) {
        Err(RngError::InvalidState(reason)) => assert!(reason.contains("stream_start")),
        other => panic!("expected invalid state, got {:?}", other),
    }
}

#[test]
fn seed_overrides_current_state_only() {
    let mut rng = Mrg32k3a::with_index(StreamIndex::new(1, 0, 0));
    let anchors = *rng.anchors();
    rng.seed(&[12345; 6]).expect("valid state");
    assert_eq!(rng.anchors(), &anchors);
    let u = rng.draw();
    assert!((u - 0.127011).abs() < 5e-7);
    rng.reset_stream();
    assert_eq!(rng.current_state(), anchors.stream_start);
}

proptest! {
    #[test]
    fn any_valid_seed_draws_inside_unit_interval(words in seed_words()) {
        let mut rng = Mrg32k3a::default();
        rng.seed(&words).expect("strategy yields valid states");
        for _ in 0..64 {
            let u = rng.draw();
            prop_assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn malformed_seed_lengths_are_configuration_errors(len in 0usize..12) {
        prop_assume!(len != 6);
        let words = vec![1u64; len];
        let result = Mrg32k3a::new(&words, StreamIndex::default());
        prop_assert!(matches!(result, Err(RngError::Configuration(_))));
    }
}
