use crate::params::{A12, A13N, A21, A23N, M1, M2, NORM};
use crate::state::State;

/// Advance `state` by one MRG32k3a step and return the new state with its
/// uniform draw in `(0, 1)`.
///
/// Quotients use Rust's integer division, which truncates toward zero; the
/// sign fix-up afterwards depends on that rounding.
pub fn mrg32k3a(state: &State) -> (State, f64) {
    let ([x1, x2, x3], [y1, y2, y3]) = state.halves();

    // Component 1.
    let mut p1 = A12 * x2 - A13N * x1;
    let k1 = p1 / M1;
    p1 -= k1 * M1;
    if p1 < 0 {
        p1 += M1;
    }

    // Component 2.
    let mut p2 = A21 * y3 - A23N * y1;
    let k2 = p2 / M2;
    p2 -= k2 * M2;
    if p2 < 0 {
        p2 += M2;
    }

    let u = if p1 <= p2 {
        (p1 - p2 + M1) as f64 * NORM
    } else {
        (p1 - p2) as f64 * NORM
    };

    (State::from_halves([x2, x3, p1], [y2, y3, p2]), u)
}
