use crate::activation::ElmanActivation;
use crate::elman::ElmanRNNBase;
use crate::error::{RNNError, Result};
use crate::numeric::Scalar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the weights of a freshly built network are filled in.
#[derive(Clone, Debug, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    Zeros,
    Uniform { scale: f64 },
    Normal { std: f64 },
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform { scale: 0.1 }
    }
}

/// Everything needed to build a network: dimensions, squashing function and how to initialize
/// the weights.
///
/// ```
/// use elman_rnn::{ElmanConfig, ElmanRNN, RNN, RNNState};
///
/// let config = ElmanConfig::from_json_str(r#"{"hidden_size": 8, "input_size": 2, "output_size": 1, "seed": 3}"#).unwrap();
/// let network: ElmanRNN = config.build().unwrap();
/// let mut st = network.start();
/// assert_eq!(st.propagate(&[0.1, 0.2]).unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct ElmanConfig {
    pub(crate) hidden_size: usize,
    pub(crate) input_size: usize,
    pub(crate) output_size: usize,
    #[serde(default)]
    pub(crate) activation: ElmanActivation,
    #[serde(default)]
    pub(crate) init: WeightInit,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ElmanConfig {
    pub fn new(hidden_size: usize, input_size: usize, output_size: usize) -> Self {
        ElmanConfig {
            hidden_size,
            input_size,
            output_size,
            activation: ElmanActivation::default(),
            init: WeightInit::default(),
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ElmanConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn activation(self, activation: ElmanActivation) -> Self {
        Self { activation, ..self }
    }

    pub fn init(self, init: WeightInit) -> Self {
        Self { init, ..self }
    }

    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_size == 0 {
            return Err(RNNError::InvalidConfig(
                "hidden_size must be at least 1".to_string(),
            ));
        }
        match self.init {
            WeightInit::Zeros => {}
            WeightInit::Uniform { scale } => {
                if !scale.is_finite() || scale < 0.0 {
                    return Err(RNNError::InvalidConfig(format!(
                        "uniform init scale must be finite and non-negative, got {}",
                        scale
                    )));
                }
            }
            WeightInit::Normal { std } => {
                if !std.is_finite() || std < 0.0 {
                    return Err(RNNError::InvalidConfig(format!(
                        "normal init std must be finite and non-negative, got {}",
                        std
                    )));
                }
            }
        }
        Ok(())
    }

    /// Builds a network. Without a seed the weights come from a randomly seeded generator.
    pub fn build<T: Scalar>(&self) -> Result<ElmanRNNBase<T>> {
        self.validate()?;
        let mut network = ElmanRNNBase::new(self.hidden_size, self.input_size, self.output_size);
        network.set_activation_function(self.activation);

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(seed, init = ?self.init, "building elman network from config");
        match self.init {
            WeightInit::Zeros => {}
            WeightInit::Uniform { scale } => network.randomize_with_rng(&mut rng, scale)?,
            WeightInit::Normal { std } => network.randomize_normal_with_rng(&mut rng, std)?,
        }
        Ok(network)
    }
}
