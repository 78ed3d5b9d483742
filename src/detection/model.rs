//! MLP inference kernel.
//!
//! # Responsibilities
//! - Evaluate the pretrained feed-forward network over a scaled feature
//!   vector: Input(22) -> Hidden(8, ReLU) -> Output(1, Sigmoid)
//! - Threshold the resulting probability into a verdict
//!
//! # Design Decisions
//! - Weights and biases are the training export, immutable at runtime;
//!   there is no update or reload path
//! - Several columns of the input matrix are zero by calibration (pruned
//!   hidden units and the reserved feature slots); the layout stays 22x8
//!   regardless

use crate::detection::features::{FeatureVector, N_FEATURES};

pub const N_HIDDEN: usize = 8;

/// Default decision threshold: probabilities at or above it are blocked.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

#[rustfmt::skip]
const W_INPUT_HIDDEN: [[f32; N_HIDDEN]; N_FEATURES] = [
    [-0.02580648,  0.00000000, -0.00000000, -0.13380486, -0.02615760, -0.01911464, -0.02152441,  0.00708626], // f0
    [ 0.05277428, -0.00000000, -0.00000000,  0.06032659,  0.05328036,  0.04236865,  0.04623181, -0.03705439], // f1
    [ 0.03849424,  0.00000000,  0.00000000,  0.04409964,  0.03909504,  0.02190317,  0.02990477, -0.01920984], // f2
    [ 0.00595027, -0.00000000, -0.00000000,  0.02114522,  0.00592134,  0.00617592,  0.00602812, -0.00274485], // f3
    [ 0.05910762, -0.00000000, -0.00000000,  0.09971938,  0.05906010,  0.04451283,  0.04761006,  0.01340769], // f4
    [-0.15758881,  0.00000000,  0.00000000,  0.20426787, -0.16075350, -0.05850599, -0.11158283,  0.05441163], // f5
    [-0.00667709,  0.00000000,  0.00000000,  0.16598302, -0.00649620, -0.00280003, -0.01308896,  0.00266538], // f6
    [-0.36828470, -0.00000000,  0.00000000,  0.69547004, -0.37579054, -0.12780695, -0.25795749,  0.18690816], // f7
    [-0.66304809, -0.00000000,  0.00000000,  1.07773876, -0.67584515, -0.28017113, -0.48642433,  0.33792308], // f8
    [-0.03174516, -0.00000000, -0.00000000, -0.00009279, -0.03174482, -0.03176426, -0.03175100,  0.03173858], // f9
    [ 0.07508217, -0.00000000,  0.00000000,  0.01188201,  0.07707508,  0.02191169,  0.04348412, -0.01375682], // f10
    [ 0.18548061,  0.00000000,  0.00000000,  0.15452723,  0.18689314,  0.14027824,  0.15980206, -0.08753844], // f11
    [ 0.10626505,  0.00000000,  0.00000000,  0.06432641,  0.10716936,  0.07312536,  0.10202921,  0.01104577], // f12
    [ 0.00026963, -0.00000000,  0.00000000,  0.20311916, -0.00050656,  0.02890697,  0.01427433,  0.02218747], // f13
    [ 0.06330443, -0.00000000,  0.00000000,  0.06688815,  0.06354813,  0.05267796,  0.06138346,  0.00401171], // f14
    [ 0.21213293, -0.00000000, -0.00000000, -0.01944905,  0.21516028,  0.07936237,  0.15124947,  0.04215803], // f15
    [-0.00000000, -0.00000000,  0.00000000,  0.00000000,  0.00000000,  0.00000000, -0.00000000, -0.00000000], // f16
    [ 0.00000000,  0.00000000,  0.00000000, -0.00000000, -0.00000000, -0.00000000,  0.00000000, -0.00000000], // f17
    [ 0.03569849,  0.00000000,  0.00000000,  0.16383298,  0.03481509,  0.06993843,  0.05449110, -0.09321775], // f18
    [-0.00000000,  0.00000000,  0.00000000, -0.00000000,  0.00000000,  0.00000000, -0.00000000, -0.00000000], // f19
    [-0.00000000,  0.00000000,  0.00000000, -0.00000000,  0.00000000,  0.00000000, -0.00000000,  0.00000000], // f20
    [ 0.00000000, -0.00000000,  0.00000000,  0.00000000,  0.00000000, -0.00000000,  0.00000000, -0.00000000], // f21
];

#[rustfmt::skip]
const B_HIDDEN: [f32; N_HIDDEN] = [
    5.37964964,  // h0
   -0.06654064,  // h1
   -0.06352766,  // h2
    0.07770199,  // h3
    5.46953344,  // h4
    3.06691599,  // h5
    4.16657019,  // h6
    0.23368287,  // h7
];

#[rustfmt::skip]
const W_HIDDEN_OUTPUT: [f32; N_HIDDEN] = [
   -0.90135580,  // h0
    0.00000000,  // h1
    0.00000000,  // h2
    1.22498047,  // h3
   -0.92243838,  // h4
   -0.27609110,  // h5
   -0.59740412,  // h6
    0.45141309,  // h7
];

const B_OUTPUT: f32 = 0.00551107;

#[inline]
fn relu(x: f32) -> f32 {
    x.max(0.0)
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Evaluate the network over a scaled feature vector.
///
/// Returns the attack probability in `[0, 1]`.
pub fn infer(scaled: &FeatureVector) -> f32 {
    let mut hidden = [0.0f32; N_HIDDEN];
    for (h, unit) in hidden.iter_mut().enumerate() {
        let mut sum = B_HIDDEN[h];
        for i in 0..N_FEATURES {
            sum += scaled[i] * W_INPUT_HIDDEN[i][h];
        }
        *unit = relu(sum);
    }

    let mut out = B_OUTPUT;
    for h in 0..N_HIDDEN {
        out += hidden[h] * W_HIDDEN_OUTPUT[h];
    }
    sigmoid(out)
}

/// Threshold a probability into a block verdict.
pub fn classify(probability: f32, threshold: f32) -> bool {
    probability >= threshold
}
