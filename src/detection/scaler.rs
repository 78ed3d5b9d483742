//! Feature normalization.
//!
//! # Responsibilities
//! - Apply the per-slot affine normalization `(x - mean) / scale` that the
//!   offline training pipeline (StandardScaler) applied to its inputs
//!
//! # Design Decisions
//! - Constants are generated by the training export and must not be edited
//!   by hand; layout and precision match the trained model
//! - Slots with no observed variance carry a scale of 1.0, so the transform
//!   is uniform over all 22 slots with no per-slot branching

use crate::detection::features::{FeatureVector, N_FEATURES};

#[rustfmt::skip]
pub const SCALER_MEAN: [f32; N_FEATURES] = [
    0.98310267,     // f0
    0.01344694,     // f1
    0.00331132,     // f2
    0.00013907,     // f3
    37.25777055,    // f4
    0.45649920,     // f5
    23.22001498,    // f6
    0.00479160,     // f7
    0.02021610,     // f8
    0.00000028,     // f9
    3.94390001,     // f10
    2.16273576,     // f11
    110.46743201,   // f12
    0.10785737,     // f13
    12432.94574528, // f14
    0.32302424,     // f15
    0.00000000,     // f16
    0.00000000,     // f17
    78.45908637,    // f18
    0.00000000,     // f19
    0.00000000,     // f20
    0.00000000,     // f21
];

#[rustfmt::skip]
pub const SCALER_SCALE: [f32; N_FEATURES] = [
    0.12888682,     // f0
    0.11517864,     // f1
    0.05744875,     // f2
    0.01179192,     // f3
    49.75819181,    // f4
    1.47126715,     // f5
    153.38845091,   // f6
    0.06905534,     // f7
    0.14073879,     // f8
    0.00052503,     // f9
    0.49789058,     // f10
    0.50973948,     // f11
    37.80937948,    // f12
    0.31020019,     // f13
    28108.88553363, // f14
    0.46763189,     // f15
    1.00000000,     // f16
    1.00000000,     // f17
    71.07747217,    // f18
    1.00000000,     // f19
    1.00000000,     // f20
    1.00000000,     // f21
];

/// Normalize a raw feature vector. Returns the scaled copy, leaving the
/// input untouched.
pub fn scale(features: &FeatureVector) -> FeatureVector {
    let mut scaled = [0.0f32; N_FEATURES];
    for i in 0..N_FEATURES {
        scaled[i] = (features[i] - SCALER_MEAN[i]) / SCALER_SCALE[i];
    }
    scaled
}
