//! Fixed MRG32k3a parameters and jump matrices.
//!
//! Values follow L'Ecuyer (1999) "Good Parameter Sets for Combined Multiple
//! Recursive Random Number Generators" and L'Ecuyer, Simard, Chen & Kelton
//! (2002) "An Object-Oriented Random-Number Package with Many Long Streams and
//! Substreams". They are part of the output compatibility contract and must
//! never be recomputed at runtime.

use crate::matrix::Mat33;

/// Modulus of the first recursion.
pub const M1: i64 = 4_294_967_087;
/// Modulus of the second recursion.
pub const M2: i64 = 4_294_944_443;

pub const A12: i64 = 1_403_580;
pub const A13N: i64 = 810_728;
pub const A21: i64 = 527_612;
pub const A23N: i64 = 1_370_589;

/// Scale mapping the combined residue onto `(0, 1)`.
pub const NORM: f64 = 2.328306549295727688e-10;

/// Reference seed anchoring the whole stream hierarchy by default.
pub const DEFAULT_REF_SEED: [u64; 6] = [12345; 6];

/// One-step transition matrix of the first recursion.
pub const A1P0: Mat33 = [[0, 1, 0], [0, 0, 1], [-A13N, A12, 0]];

/// One-step transition matrix of the second recursion.
pub const A2P0: Mat33 = [[0, 1, 0], [0, 0, 1], [-A23N, 0, A21]];

/// `A1P0^(2^47) mod M1`: subsubstream spacing for the first recursion.
pub const A1P47: Mat33 = [
    [1_362_557_480, 3_230_022_138, 4_278_720_212],
    [3_427_386_258, 3_848_976_950, 3_230_022_138],
    [2_109_817_045, 2_441_486_578, 3_848_976_950],
];

/// `A2P0^(2^47) mod M2`: subsubstream spacing for the second recursion.
pub const A2P47: Mat33 = [
    [2_920_112_852, 1_965_329_198, 1_177_141_043],
    [2_135_250_851, 2_920_112_852, 969_184_056],
    [296_035_385, 2_135_250_851, 4_267_827_987],
];

/// `A1P0^(2^94) mod M1`: substream spacing for the first recursion.
pub const A1P94: Mat33 = [
    [2_873_769_531, 2_081_104_178, 596_284_397],
    [4_153_800_443, 1_261_269_623, 2_081_104_178],
    [3_967_600_061, 1_830_023_157, 1_261_269_623],
];

/// `A2P0^(2^94) mod M2`: substream spacing for the second recursion.
pub const A2P94: Mat33 = [
    [1_347_291_439, 2_050_427_676, 736_113_023],
    [4_102_191_254, 1_347_291_439, 878_627_148],
    [1_293_500_383, 4_102_191_254, 745_646_810],
];

/// `A1P0^(2^141) mod M1`: stream spacing for the first recursion.
pub const A1P141: Mat33 = [
    [3_230_096_243, 2_131_723_358, 3_262_178_024],
    [2_882_890_127, 4_088_518_247, 2_131_723_358],
    [3_991_553_306, 1_282_224_087, 4_088_518_247],
];

/// `A2P0^(2^141) mod M2`: stream spacing for the second recursion.
pub const A2P141: Mat33 = [
    [2_196_438_580, 805_386_227, 4_266_375_092],
    [4_124_675_351, 2_196_438_580, 2_527_961_345],
    [94_452_540, 4_124_675_351, 2_825_656_399],
];
