use num::traits::Float;
use std::fmt::Debug;

pub trait FromF64 {
    fn from_f64(f: f64) -> Self;
}

impl FromF64 for f64 {
    #[inline]
    fn from_f64(f: f64) -> Self {
        f
    }
}

impl FromF64 for f32 {
    #[inline]
    fn from_f64(f: f64) -> Self {
        f as f32
    }
}

/// Element type of every vector and matrix in a network.
///
/// Implemented for `f32` and `f64`. Networks are plain data over these, so they can be shared
/// across threads.
pub trait Scalar: Float + FromF64 + Debug + Send + Sync + 'static {}

impl<T: Float + FromF64 + Debug + Send + Sync + 'static> Scalar for T {}
