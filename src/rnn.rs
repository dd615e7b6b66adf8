use crate::error::Result;

pub trait RNNState {
    type InputType;
    type OutputType;

    /// Advances the state by one time step and returns the outputs for that step.
    ///
    /// On error the state is left exactly as it was before the call.
    fn propagate<'a, 'b>(
        &'a mut self,
        inputs: &'b [Self::InputType],
    ) -> Result<&'a [Self::OutputType]>;
    fn propagate32<'a, 'b>(&'a mut self, inputs: &'b [f32]) -> Result<&'a [f32]>;
    fn reset(&mut self);
}

pub trait RNN {
    type RNNState;

    fn start(&self) -> Self::RNNState;
}
