//! A text classification pipeline for capture-to-label applications: a photo
//! is OCR'd by an external engine, the recognized text lands here, and a
//! bundled ONNX model turns it into a predicted label.
//!
//! The pipeline is: normalize (lowercase, alphanumeric tokens) → vectorize
//! (bag-of-words counts over a fixed vocabulary) → infer (ONNX session) →
//! select (arg-max over the label table).
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use scantag::{ArtifactStore, Classifier, Prediction};
//!
//! let store = ArtifactStore::new_default()?;
//! let classifier = Classifier::builder()
//!     .with_bundle(&store)?
//!     .build()?;
//!
//! match classifier.predict("Buy now, limited offer!")? {
//!     Prediction::Class { label, score } => println!("{} ({:.3})", label, score),
//!     Prediction::Unknown => println!("no label"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is thread-safe and can be shared across threads using
//! `Arc`: the loaded model, vocabulary, and label table are all read-only
//! after construction, and `predict` takes `&self`.
//!
//! # Degraded operation
//!
//! A missing or malformed vocabulary artifact is not fatal: the classifier
//! falls back to an empty vocabulary and every input vectorizes to zeros.
//! A missing or malformed label artifact is fatal at build time, since
//! label lookups by model output index would otherwise be unsafe.

pub mod artifacts;
pub mod classifier;
pub mod recognition;
mod runtime;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use classifier::{
    load_labels, load_vocabulary, normalize, select, vectorize, Classifier, ClassifierBuilder,
    ClassifierError, ClassifierInfo, InferenceEngine, LabelTable, OnnxEngine, Prediction,
    Vocabulary, FEATURE_DIM, UNKNOWN_LABEL,
};
pub use recognition::{PendingText, RecognitionError, RecognitionHandle, TextRecognizer};
pub use runtime::{create_session_builder, OptLevel, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
