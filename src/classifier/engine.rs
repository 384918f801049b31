use ndarray::{Array1, Array2};
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::error::ClassifierError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// The model boundary of the pipeline.
///
/// An engine consumes a fixed-length feature vector and produces one score
/// per class, in label-table order. Implementations must be deterministic
/// for a fixed loaded model: same input, same output. The production
/// implementation is [`OnnxEngine`]; tests substitute a fixed-matrix stub
/// through [`ClassifierBuilder::with_engine`](super::builder::ClassifierBuilder::with_engine).
pub trait InferenceEngine: Send + Sync + fmt::Debug {
    /// Runs the model synchronously on the caller's thread.
    fn infer(&self, features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError>;
}

/// Runs a bundled ONNX model through a shared `ort` session.
///
/// The session is created once at startup and held behind `Arc` for the
/// life of the process. `infer` writes the features into a `[1, N]` f32
/// tensor in index order, feeds it under the model's single declared
/// input name, and reads the output tensor from its start.
#[derive(Debug)]
pub struct OnnxEngine {
    session: Arc<Session>,
    input_name: String,
    output_len: usize,
}

impl OnnxEngine {
    /// Loads the model file and prepares a session for it.
    ///
    /// `output_len` is the number of scores the surrounding pipeline will
    /// read, which is the label-table length. A failure here is fatal to
    /// the feature, unlike a per-call inference failure.
    pub fn from_file<P: AsRef<Path>>(
        model_path: P,
        config: &RuntimeConfig,
        output_len: usize,
    ) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(ClassifierError::BuildError(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }

        let session = create_session_builder(config)?.commit_from_file(model_path)?;
        Self::validate_session(&session)?;

        let input_name = session.inputs[0].name.clone();
        Ok(Self {
            session: Arc::new(session),
            input_name,
            output_len,
        })
    }

    /// Checks that the model has the expected input/output structure:
    /// a single feature-vector input and at least one output.
    fn validate_session(session: &Session) -> Result<(), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::ModelError(format!(
                "Model must have exactly 1 input (the feature vector), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }

        Ok(())
    }
}

impl InferenceEngine for OnnxEngine {
    fn infer(&self, features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError> {
        let input_array = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input)
                .map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::ModelError(format!("Failed to extract output tensor: {}", e)))?;

        let scores: Vec<f32> = output_tensor.iter().copied().take(self.output_len).collect();
        if scores.len() < self.output_len {
            return Err(ClassifierError::ModelError(format!(
                "Model produced {} scores, expected {}",
                scores.len(),
                self.output_len
            )));
        }

        Ok(scores)
    }
}
