//! The seam between the external OCR engine and the classification
//! pipeline.
//!
//! Recognition is a single-shot producer: the engine runs on its own
//! thread or queue and reports success or failure exactly once. The seam
//! models that as a pair of halves from [`channel`]: the engine side gets
//! a [`RecognitionHandle`] whose completion methods consume it, so a
//! second completion cannot be expressed, and the application side gets a
//! [`PendingText`] to await. Classification must only run after the
//! pending side resolves with text; a failed or cancelled recognition
//! never reaches the classifier.

use std::fmt;
use tokio::sync::oneshot;

/// Why no recognized text arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The engine reported a failure.
    Failed(String),
    /// The engine went away without completing.
    Cancelled,
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(msg) => write!(f, "Text recognition failed: {}", msg),
            Self::Cancelled => write!(f, "Text recognition was cancelled"),
        }
    }
}

impl std::error::Error for RecognitionError {}

/// Producer half: completed exactly once, by value.
#[derive(Debug)]
pub struct RecognitionHandle {
    tx: oneshot::Sender<Result<String, RecognitionError>>,
}

/// Consumer half: resolves once with recognized text or a failure.
#[derive(Debug)]
pub struct PendingText {
    rx: oneshot::Receiver<Result<String, RecognitionError>>,
}

/// Creates a linked producer/consumer pair for one recognition attempt.
pub fn channel() -> (RecognitionHandle, PendingText) {
    let (tx, rx) = oneshot::channel();
    (RecognitionHandle { tx }, PendingText { rx })
}

impl RecognitionHandle {
    /// Reports recognized text. If the consumer already gave up, the
    /// result is discarded.
    pub fn succeed(self, text: impl Into<String>) {
        let _ = self.tx.send(Ok(text.into()));
    }

    /// Reports an engine failure.
    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(RecognitionError::Failed(reason.into())));
    }

    /// Whether the consumer has dropped its half. An engine can use this
    /// to skip work whose result nobody will read.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PendingText {
    /// Waits for the recognition outcome. A producer that disappears
    /// without completing resolves to [`RecognitionError::Cancelled`].
    pub async fn text(self) -> Result<String, RecognitionError> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(RecognitionError::Cancelled),
        }
    }
}

/// Implemented by recognition engines. The returned [`PendingText`]
/// resolves once the engine finishes with the image.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> PendingText;
}
