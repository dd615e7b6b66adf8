#![allow(clippy::needless_range_loop)]

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod activation;
pub mod config;
pub mod elman;
pub mod error;
pub mod matrix;
pub mod numeric;
pub mod rnn;
pub mod sequence;

pub use crate::activation::*;
pub use crate::config::*;
pub use crate::elman::*;
pub use crate::error::*;
pub use crate::matrix::*;
pub use crate::numeric::*;
pub use crate::rnn::*;
pub use crate::sequence::*;
