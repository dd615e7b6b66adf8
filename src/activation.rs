use crate::numeric::{FromF64, Scalar};
use serde::{Deserialize, Serialize};

/// Squashing function applied to the hidden pre-activation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ElmanActivation {
    /// Hyperbolic tangent, range (-1, 1).
    Tanh,
    /// `x / (1 + |x|)`. Same range as tanh, no exponentials.
    FastTanh,
    /// Logistic sigmoid, range (0, 1).
    LogisticSigmoid,
}

impl Default for ElmanActivation {
    fn default() -> Self {
        ElmanActivation::Tanh
    }
}

impl ElmanActivation {
    #[inline]
    pub fn apply<T: Scalar>(self, x: T) -> T {
        match self {
            ElmanActivation::Tanh => x.tanh(),
            ElmanActivation::FastTanh => fast_tanh(x),
            ElmanActivation::LogisticSigmoid => sigmoid(x),
        }
    }
}

#[inline]
pub fn sigmoid<T: Scalar>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

#[inline]
pub fn fast_sigmoid<T: Scalar>(x: T) -> T {
    let half = T::from_f64(0.5);
    half + (x / (T::one() + x.abs())) * half
}

#[inline]
pub fn fast_tanh<T: Scalar>(x: T) -> T {
    fast_sigmoid(x) * T::from_f64(2.0) - T::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    quickcheck! {
        fn fast_tanh_is_bounded(x: f64) -> bool {
            let y = fast_tanh(x);
            y > -1.0 && y < 1.0
        }
    }

    quickcheck! {
        fn fast_tanh_is_odd(x: f64) -> bool {
            (fast_tanh(x) + fast_tanh(-x)).abs() < 1e-12
        }
    }

    #[test]
    fn zero_maps_to_zero_for_tanh_variants() {
        assert_eq!(ElmanActivation::Tanh.apply(0.0f64), 0.0);
        assert_eq!(ElmanActivation::FastTanh.apply(0.0f64), 0.0);
        assert_eq!(ElmanActivation::LogisticSigmoid.apply(0.0f64), 0.5);
    }

    #[test]
    fn tanh_is_the_standard_one() {
        let y: f64 = ElmanActivation::Tanh.apply(0.5);
        assert_eq!(y, 0.5f64.tanh());
        assert!((y - 0.46211715726000974).abs() < 1e-15);
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(-1000.0f64), 0.0);
        assert_eq!(sigmoid(1000.0f64), 1.0);
        assert!((sigmoid(0.0f32) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn serializes_snake_case() {
        let s = serde_json::to_string(&ElmanActivation::FastTanh).unwrap();
        assert_eq!(s, "\"fast_tanh\"");
        let a: ElmanActivation = serde_json::from_str("\"logistic_sigmoid\"").unwrap();
        assert_eq!(a, ElmanActivation::LogisticSigmoid);
    }
}
