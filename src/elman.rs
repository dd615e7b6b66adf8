use crate::activation::ElmanActivation;
use crate::error::{RNNError, Result};
use crate::matrix::Matrix;
use crate::numeric::{FromF64, Scalar};
use crate::rnn::{RNNState, RNN};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Elman network: a single recurrent hidden layer without biases.
///
/// ```text
/// h[t] = tanh(W_hh * h[t-1] + W_xh * x[t])
/// y[t] = W_hy * h[t]
/// ```
///
/// The weights are fixed once the network is built; only the hidden state changes between steps.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct ElmanRNNBase<T> {
    pub(crate) w_hh: Matrix<T>,
    pub(crate) w_xh: Matrix<T>,
    pub(crate) w_hy: Matrix<T>,
    pub(crate) activation: ElmanActivation,
}

pub type ElmanRNN = ElmanRNNBase<f64>;
pub type ElmanRNNF32 = ElmanRNNBase<f32>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct ElmanStateBase<T> {
    network: ElmanRNNBase<T>,
    hidden: Vec<T>,
    storage: Vec<T>,
    outputs: Vec<T>,
    outputs32: Vec<f32>,
}

pub type ElmanState = ElmanStateBase<f64>;
pub type ElmanStateF32 = ElmanStateBase<f32>;

/// Checks that the three matrices fit together. Returns (hidden, inputs, outputs).
fn check_weight_shapes<T: Scalar>(
    w_hh: &Matrix<T>,
    w_xh: &Matrix<T>,
    w_hy: &Matrix<T>,
) -> Result<(usize, usize, usize)> {
    let hidden = w_hh.rows();
    if w_hh.cols() != hidden {
        return Err(RNNError::mismatch("W_hh columns", hidden, w_hh.cols()));
    }
    if w_xh.rows() != hidden {
        return Err(RNNError::mismatch("W_xh rows", hidden, w_xh.rows()));
    }
    if w_hy.cols() != hidden {
        return Err(RNNError::mismatch("W_hy columns", hidden, w_hy.cols()));
    }
    Ok((hidden, w_xh.cols(), w_hy.rows()))
}

/// One recurrent step on caller-owned buffers.
///
/// The new hidden state is built in `storage` and only copied into `hidden` once every shape
/// check has passed, so a failed call never touches `hidden`.
#[allow(clippy::too_many_arguments)]
fn transition<T: Scalar>(
    w_hh: &Matrix<T>,
    w_xh: &Matrix<T>,
    w_hy: &Matrix<T>,
    activation: ElmanActivation,
    hidden: &mut [T],
    inputs: &[T],
    storage: &mut Vec<T>,
    outputs: &mut Vec<T>,
) -> Result<()> {
    let (hidden_size, ninputs, noutputs) = check_weight_shapes(w_hh, w_xh, w_hy)?;
    if hidden.len() != hidden_size {
        warn!(expected = hidden_size, actual = hidden.len(), "rejected step: hidden state length");
        return Err(RNNError::mismatch("hidden state", hidden_size, hidden.len()));
    }
    if inputs.len() != ninputs {
        warn!(expected = ninputs, actual = inputs.len(), "rejected step: input length");
        return Err(RNNError::mismatch("input vector", ninputs, inputs.len()));
    }
    trace!(hidden_size, ninputs, noutputs, "elman step");

    storage.clear();
    storage.resize(hidden_size, T::zero());
    w_hh.mul_vec_add_into(hidden, storage)?;
    w_xh.mul_vec_add_into(inputs, storage)?;
    for v in storage.iter_mut() {
        *v = activation.apply(*v);
    }

    outputs.clear();
    outputs.resize(noutputs, T::zero());
    w_hy.mul_vec_add_into(storage, outputs)?;

    hidden.copy_from_slice(storage);
    Ok(())
}

/// Advances `hidden` by one step of `network` and returns the output vector.
///
/// This is the stateless form: the caller owns the hidden state and can keep as many
/// independent sequences around as it likes against one shared network.
pub fn step<T: Scalar>(hidden: &mut [T], inputs: &[T], network: &ElmanRNNBase<T>) -> Result<Vec<T>> {
    let mut storage = Vec::with_capacity(hidden.len());
    let mut outputs = Vec::with_capacity(network.num_outputs());
    network.step_into(hidden, inputs, &mut storage, &mut outputs)?;
    Ok(outputs)
}

/// Same as [`step`] but with loose weight matrices instead of a built network. Shapes are
/// validated on every call and the squashing function is always tanh.
pub fn step_with_weights<T: Scalar>(
    hidden: &mut [T],
    inputs: &[T],
    w_hh: &Matrix<T>,
    w_xh: &Matrix<T>,
    w_hy: &Matrix<T>,
) -> Result<Vec<T>> {
    let mut storage = Vec::with_capacity(hidden.len());
    let mut outputs = Vec::with_capacity(w_hy.rows());
    transition(
        w_hh,
        w_xh,
        w_hy,
        ElmanActivation::Tanh,
        hidden,
        inputs,
        &mut storage,
        &mut outputs,
    )?;
    Ok(outputs)
}

impl<T: Scalar> ElmanRNNBase<T> {
    /// Network with all weights set to zero.
    pub fn new(hidden_size: usize, ninputs: usize, noutputs: usize) -> Self {
        debug!(hidden_size, ninputs, noutputs, "new elman network");
        ElmanRNNBase {
            w_hh: Matrix::new(hidden_size, hidden_size),
            w_xh: Matrix::new(hidden_size, ninputs),
            w_hy: Matrix::new(noutputs, hidden_size),
            activation: ElmanActivation::default(),
        }
    }

    pub fn from_matrices(w_hh: Matrix<T>, w_xh: Matrix<T>, w_hy: Matrix<T>) -> Result<Self> {
        let (hidden_size, ninputs, noutputs) = check_weight_shapes(&w_hh, &w_xh, &w_hy)?;
        debug!(hidden_size, ninputs, noutputs, "elman network from matrices");
        Ok(ElmanRNNBase {
            w_hh,
            w_xh,
            w_hy,
            activation: ElmanActivation::default(),
        })
    }

    pub fn builder() -> ElmanRNNBuilder<T> {
        ElmanRNNBuilder::new()
    }

    /// Replaces all three weight matrices. The new matrices must have exactly the shapes of the
    /// current ones; otherwise nothing changes.
    pub fn set_weights(&mut self, w_hh: Matrix<T>, w_xh: Matrix<T>, w_hy: Matrix<T>) -> Result<()> {
        check_weight_shapes(&w_hh, &w_xh, &w_hy)?;
        for (what, old, new) in [
            ("W_hh", &self.w_hh, &w_hh),
            ("W_xh", &self.w_xh, &w_xh),
            ("W_hy", &self.w_hy, &w_hy),
        ]
        .iter()
        {
            if old.rows() != new.rows() {
                return Err(RNNError::mismatch(*what, old.rows(), new.rows()));
            }
            if old.cols() != new.cols() {
                return Err(RNNError::mismatch(*what, old.cols(), new.cols()));
            }
        }
        debug!("elman weights replaced");
        self.w_hh = w_hh;
        self.w_xh = w_xh;
        self.w_hy = w_hy;
        Ok(())
    }

    /// Sets the squashing function for the hidden layer. Defaults to tanh.
    pub fn set_activation_function(&mut self, activation: ElmanActivation) {
        self.activation = activation;
    }

    pub fn activation_function(&self) -> ElmanActivation {
        self.activation
    }

    pub fn hidden_size(&self) -> usize {
        self.w_hh.rows()
    }

    pub fn num_inputs(&self) -> usize {
        self.w_xh.cols()
    }

    pub fn num_outputs(&self) -> usize {
        self.w_hy.rows()
    }

    pub fn w_hh(&self) -> &Matrix<T> {
        &self.w_hh
    }

    pub fn w_xh(&self) -> &Matrix<T> {
        &self.w_xh
    }

    pub fn w_hy(&self) -> &Matrix<T> {
        &self.w_hy
    }

    pub fn walk<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut T),
    {
        self.w_hh.walk(&mut callback);
        self.w_xh.walk(&mut callback);
        self.w_hy.walk(&mut callback);
    }

    pub fn zero_like(&self) -> Self {
        let mut zero = Self::new(self.hidden_size(), self.num_inputs(), self.num_outputs());
        zero.activation = self.activation;
        zero
    }

    pub fn randomize(&mut self) {
        self.fill_uniform(&mut rand::rng(), 0.1);
    }

    /// Draws every weight uniformly from `[-scale, scale)`. `scale` must be finite and
    /// non-negative; zero gives all-zero weights.
    pub fn randomize_with_rng<R: Rng>(&mut self, rng: &mut R, scale: f64) -> Result<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(RNNError::InvalidConfig(format!(
                "uniform scale must be finite and non-negative, got {}",
                scale
            )));
        }
        self.fill_uniform(rng, scale);
        Ok(())
    }

    fn fill_uniform<R: Rng>(&mut self, rng: &mut R, scale: f64) {
        debug!(scale, "randomizing elman weights (uniform)");
        self.walk(|w| {
            *w = if scale > 0.0 {
                T::from_f64(rng.random_range(-scale..scale))
            } else {
                T::zero()
            };
        });
    }

    /// Draws every weight from a normal distribution with mean 0 and the given standard deviation.
    pub fn randomize_normal_with_rng<R: Rng>(&mut self, rng: &mut R, std: f64) -> Result<()> {
        let normal =
            Normal::new(0.0, std).map_err(|e| RNNError::InvalidConfig(format!("std {}: {}", std, e)))?;
        debug!(std, "randomizing elman weights (normal)");
        self.walk(|w| *w = T::from_f64(normal.sample(&mut *rng)));
        Ok(())
    }

    /// Starts a state with the given initial hidden vector instead of zeros.
    pub fn start_with_hidden(&self, hidden: &[T]) -> Result<ElmanStateBase<T>> {
        let mut st = self.start();
        st.set_hidden(hidden)?;
        Ok(st)
    }

    fn step_into(
        &self,
        hidden: &mut [T],
        inputs: &[T],
        storage: &mut Vec<T>,
        outputs: &mut Vec<T>,
    ) -> Result<()> {
        transition(
            &self.w_hh,
            &self.w_xh,
            &self.w_hy,
            self.activation,
            hidden,
            inputs,
            storage,
            outputs,
        )
    }
}

impl<T: Scalar> RNN for ElmanRNNBase<T> {
    type RNNState = ElmanStateBase<T>;

    fn start(&self) -> Self::RNNState {
        ElmanStateBase {
            network: self.clone(),
            hidden: vec![T::zero(); self.hidden_size()],
            storage: Vec::with_capacity(self.hidden_size()),
            outputs: Vec::with_capacity(self.num_outputs()),
            outputs32: vec![],
        }
    }
}

impl<T: Scalar> RNNState for ElmanStateBase<T> {
    type InputType = T;
    type OutputType = T;

    fn reset(&mut self) {
        for h in self.hidden.iter_mut() {
            *h = T::zero();
        }
    }

    fn propagate<'a, 'b>(&'a mut self, inputs: &'b [T]) -> Result<&'a [T]> {
        self.network
            .step_into(&mut self.hidden, inputs, &mut self.storage, &mut self.outputs)?;
        Ok(&self.outputs)
    }

    fn propagate32<'a, 'b>(&'a mut self, inputs: &'b [f32]) -> Result<&'a [f32]> {
        let inputs: Vec<T> = inputs.iter().map(|x| T::from_f64(*x as f64)).collect();
        self.propagate(&inputs)?;
        self.outputs32.clear();
        self.outputs32
            .extend(self.outputs.iter().map(|x| x.to_f32().unwrap_or(f32::NAN)));
        Ok(&self.outputs32)
    }
}

impl<T: Scalar> ElmanStateBase<T> {
    pub fn hidden(&self) -> &[T] {
        &self.hidden
    }

    pub fn set_hidden(&mut self, hidden: &[T]) -> Result<()> {
        if hidden.len() != self.hidden.len() {
            return Err(RNNError::mismatch("hidden state", self.hidden.len(), hidden.len()));
        }
        self.hidden.copy_from_slice(hidden);
        Ok(())
    }

    pub fn network(&self) -> &ElmanRNNBase<T> {
        &self.network
    }
}

/// Assembles a network one matrix at a time.
#[derive(Clone, Debug)]
pub struct ElmanRNNBuilder<T> {
    w_hh: Option<Matrix<T>>,
    w_xh: Option<Matrix<T>>,
    w_hy: Option<Matrix<T>>,
    activation: ElmanActivation,
}

impl<T: Scalar> Default for ElmanRNNBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> ElmanRNNBuilder<T> {
    pub fn new() -> Self {
        ElmanRNNBuilder {
            w_hh: None,
            w_xh: None,
            w_hy: None,
            activation: ElmanActivation::default(),
        }
    }

    pub fn hidden_to_hidden(self, w_hh: Matrix<T>) -> Self {
        Self {
            w_hh: Some(w_hh),
            ..self
        }
    }

    pub fn input_to_hidden(self, w_xh: Matrix<T>) -> Self {
        Self {
            w_xh: Some(w_xh),
            ..self
        }
    }

    pub fn hidden_to_output(self, w_hy: Matrix<T>) -> Self {
        Self {
            w_hy: Some(w_hy),
            ..self
        }
    }

    pub fn activation(self, activation: ElmanActivation) -> Self {
        Self { activation, ..self }
    }

    pub fn build(self) -> Result<ElmanRNNBase<T>> {
        let w_hh = self
            .w_hh
            .ok_or(RNNError::UninitializedState { what: "W_hh" })?;
        let w_xh = self
            .w_xh
            .ok_or(RNNError::UninitializedState { what: "W_xh" })?;
        let w_hy = self
            .w_hy
            .ok_or(RNNError::UninitializedState { what: "W_hy" })?;
        let mut network = ElmanRNNBase::from_matrices(w_hh, w_xh, w_hy)?;
        network.set_activation_function(self.activation);
        Ok(network)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for ElmanRNN {
    fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
        use quickcheck::Arbitrary;
        use rand::SeedableRng;

        let hidden_size = std::cmp::max(1, usize::arbitrary(g) % 9);
        let ninputs = std::cmp::max(1, usize::arbitrary(g) % 9);
        let noutputs = std::cmp::max(1, usize::arbitrary(g) % 9);
        let mut network = ElmanRNN::new(hidden_size, ninputs, noutputs);
        let mut rng = rand::rngs::StdRng::seed_from_u64(u64::arbitrary(g));
        network.randomize_with_rng(&mut rng, 0.5).unwrap();
        network
    }
}
