//! Fixed-size modular matrix arithmetic backing the jump-ahead machinery.
//!
//! Entries and state words are bounded by roughly `2^32`, so a single product
//! reaches `2^64` and a three-term row sum overflows `u64`. Every
//! multiply-accumulate therefore runs in an `i128` accumulator and is only
//! narrowed back to `i64` after a Euclidean reduction into `[0, m)`.

/// A 3x3 integer matrix.
pub type Mat33 = [[i64; 3]; 3];
/// A 3x1 integer column vector.
pub type Vec3 = [i64; 3];

/// Unreduced 3x1 product.
pub type WideVec3 = [i128; 3];
/// Unreduced 3x3 product.
pub type WideMat33 = [[i128; 3]; 3];

const IDENTITY: Mat33 = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

fn reduce(value: i128, m: i64) -> i64 {
    // rem_euclid keeps negative accumulators (from the base recursion
    // matrices) inside [0, m).
    value.rem_euclid(i128::from(m)) as i64
}

/// Reduce a 3-vector componentwise into `[0, m)`.
pub fn mat31_mod(v: WideVec3, m: i64) -> Vec3 {
    [reduce(v[0], m), reduce(v[1], m), reduce(v[2], m)]
}

/// Reduce every entry of a matrix into `[0, m)`.
pub fn mat33_mod(a: WideMat33, m: i64) -> Mat33 {
    let mut out = [[0i64; 3]; 3];
    for (row_out, row) in out.iter_mut().zip(a.iter()) {
        for (entry_out, &entry) in row_out.iter_mut().zip(row.iter()) {
            *entry_out = reduce(entry, m);
        }
    }
    out
}

/// Multiply a 3x3 matrix by a 3x1 vector without reduction.
pub fn mat33_mat31_mult(a: &Mat33, v: &Vec3) -> WideVec3 {
    let mut out = [0i128; 3];
    for (slot, row) in out.iter_mut().zip(a.iter()) {
        *slot = row
            .iter()
            .zip(v.iter())
            .map(|(&lhs, &rhs)| i128::from(lhs) * i128::from(rhs))
            .sum();
    }
    out
}

/// Multiply two 3x3 matrices without reduction.
pub fn mat33_mat33_mult(a: &Mat33, b: &Mat33) -> WideMat33 {
    let mut out = [[0i128; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = (0..3)
                .map(|k| i128::from(a[i][k]) * i128::from(b[k][j]))
                .sum();
        }
    }
    out
}

/// `(a * v) mod m`, the jump applied to one half of a generator state.
pub fn mat33_mat31_mod(a: &Mat33, v: &Vec3, m: i64) -> Vec3 {
    mat31_mod(mat33_mat31_mult(a, v), m)
}

/// `(a * b) mod m`.
pub fn mat33_mat33_mod(a: &Mat33, b: &Mat33, m: i64) -> Mat33 {
    mat33_mod(mat33_mat33_mult(a, b), m)
}

/// `a^n mod m` by binary exponentiation.
///
/// Only used to derive or verify the jump constants, never while drawing.
pub fn mat33_power_mod(a: &Mat33, n: u128, m: i64) -> Mat33 {
    let mut base = mat33_mod(widen(a), m);
    let mut result = IDENTITY;
    let mut exponent = n;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mat33_mat33_mod(&result, &base, m);
        }
        base = mat33_mat33_mod(&base, &base, m);
        exponent >>= 1;
    }
    result
}

/// `a^(2^k) mod m` by `k` successive squarings.
///
/// Covers exponents such as `2^141` that do not fit a `u128`.
pub fn mat33_power2_mod(a: &Mat33, k: u32, m: i64) -> Mat33 {
    let mut result = mat33_mod(widen(a), m);
    for _ in 0..k {
        result = mat33_mat33_mod(&result, &result, m);
    }
    result
}

fn widen(a: &Mat33) -> WideMat33 {
    let mut out = [[0i128; 3]; 3];
    for (row_out, row) in out.iter_mut().zip(a.iter()) {
        for (entry_out, &entry) in row_out.iter_mut().zip(row.iter()) {
            *entry_out = i128::from(entry);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        A1P0, A1P141, A1P47, A1P94, A2P0, A2P141, A2P47, A2P94, M1, M2,
    };
    use proptest::prelude::*;

    #[test]
    fn power_mod_reproduces_subsubstream_jump() {
        assert_eq!(mat33_power_mod(&A1P0, 1u128 << 47, M1), A1P47);
        assert_eq!(mat33_power_mod(&A2P0, 1u128 << 47, M2), A2P47);
    }

    #[test]
    fn power_mod_reproduces_substream_jump() {
        assert_eq!(mat33_power_mod(&A1P0, 1u128 << 94, M1), A1P94);
        assert_eq!(mat33_power_mod(&A2P0, 1u128 << 94, M2), A2P94);
    }

    #[test]
    fn repeated_squaring_reproduces_every_jump() {
        assert_eq!(mat33_power2_mod(&A1P0, 47, M1), A1P47);
        assert_eq!(mat33_power2_mod(&A2P0, 47, M2), A2P47);
        assert_eq!(mat33_power2_mod(&A1P0, 94, M1), A1P94);
        assert_eq!(mat33_power2_mod(&A2P0, 94, M2), A2P94);
        assert_eq!(mat33_power2_mod(&A1P0, 141, M1), A1P141);
        assert_eq!(mat33_power2_mod(&A2P0, 141, M2), A2P141);
    }

    #[test]
    fn jump_composition_matches_larger_jump() {
        // 2^47 squared 47 times is 2^94.
        assert_eq!(mat33_power2_mod(&A1P47, 47, M1), A1P94);
        assert_eq!(mat33_power2_mod(&A2P94, 47, M2), A2P141);
    }

    #[test]
    fn zero_exponent_is_identity() {
        assert_eq!(mat33_power_mod(&A1P141, 0, M1), IDENTITY);
    }

    #[test]
    fn negative_entries_reduce_into_range() {
        let reduced = mat31_mod([-1, -(i128::from(M1)), i128::from(M1) * 3 + 7], M1);
        assert_eq!(reduced, [M1 - 1, 0, 7]);
    }

    #[test]
    fn row_sums_beyond_u64_stay_exact() {
        let big = M1 - 1;
        let a = [[big; 3]; 3];
        let v = [big; 3];
        let wide = mat33_mat31_mult(&a, &v);
        let expected = 3 * i128::from(big) * i128::from(big);
        assert!(expected > i128::from(u64::MAX));
        assert_eq!(wide, [expected; 3]);
        // (m - 1)^2 = 1 (mod m), so three of them reduce to 3.
        assert_eq!(mat31_mod(wide, M1), [3, 3, 3]);
    }

    proptest! {
        #[test]
        fn matrix_vector_mod_stays_in_range(
            x in 0i64..M1,
            y in 0i64..M1,
            z in 0i64..M1,
        ) {
            let out = mat33_mat31_mod(&A1P141, &[x, y, z], M1);
            for value in out {
                prop_assert!((0..M1).contains(&value));
            }
        }

        #[test]
        fn matrix_product_is_associative_mod_m(x in 0i64..M2, y in 0i64..M2, z in 0i64..M2) {
            let v = [x, y, z];
            let composed = mat33_mat33_mod(&A2P94, &A2P47, M2);
            let lhs = mat33_mat31_mod(&composed, &v, M2);
            let rhs = mat33_mat31_mod(&A2P94, &mat33_mat31_mod(&A2P47, &v, M2), M2);
            prop_assert_eq!(lhs, rhs);
        }
    }
}
