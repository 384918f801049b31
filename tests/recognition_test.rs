use ndarray::Array1;
use scantag::recognition::{self, RecognitionError, TextRecognizer};
use scantag::{Classifier, ClassifierError, InferenceEngine, LabelTable, PendingText, Vocabulary};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

/// Pretends to be the external OCR engine: completes off-thread with a
/// canned outcome, once.
struct CannedRecognizer {
    outcome: Result<String, String>,
}

impl TextRecognizer for CannedRecognizer {
    fn recognize(&self, _image: &[u8]) -> PendingText {
        let (handle, pending) = recognition::channel();
        let outcome = self.outcome.clone();
        thread::spawn(move || match outcome {
            Ok(text) => handle.succeed(text),
            Err(reason) => handle.fail(reason),
        });
        pending
    }
}

#[derive(Debug)]
struct ConstantEngine;

impl InferenceEngine for ConstantEngine {
    fn infer(&self, features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError> {
        // Score tracks how many known tokens were counted
        Ok(vec![features.sum(), 0.5])
    }
}

fn setup_classifier() -> Classifier {
    Classifier::builder()
        .with_engine(Arc::new(ConstantEngine))
        .unwrap()
        .with_vocabulary(Vocabulary::new(HashMap::from([
            ("total".to_string(), 0),
            ("receipt".to_string(), 1),
        ])))
        .with_labels(LabelTable::new(vec!["receipt".to_string(), "other".to_string()]))
        .with_feature_dim(2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_recognized_text_flows_into_classification() {
    let recognizer = CannedRecognizer {
        outcome: Ok("RECEIPT\nTOTAL: 12.50".to_string()),
    };
    let classifier = setup_classifier();

    let text = recognizer.recognize(b"fake image bytes").text().await.unwrap();
    let prediction = classifier.predict(&text).unwrap();
    assert_eq!(prediction.label(), "receipt");
}

#[tokio::test]
async fn test_failed_recognition_never_reaches_the_classifier() {
    let recognizer = CannedRecognizer {
        outcome: Err("no text in frame".to_string()),
    };

    let outcome = recognizer.recognize(b"fake image bytes").text().await;
    assert_eq!(
        outcome,
        Err(RecognitionError::Failed("no text in frame".to_string()))
    );
    // The caller stops here; classification only runs on the success arm
}

#[tokio::test]
async fn test_recognition_completes_exactly_once() {
    let (handle, pending) = recognition::channel();
    handle.succeed("first and only");
    // `succeed` consumed the handle, so a second completion cannot be
    // written; the consumer observes the single outcome
    assert_eq!(pending.text().await.unwrap(), "first and only");
}

#[tokio::test]
async fn test_engine_crash_surfaces_as_cancellation() {
    let (handle, pending) = recognition::channel();
    thread::spawn(move || {
        // Engine goes away without ever completing
        drop(handle);
    });
    assert_eq!(pending.text().await, Err(RecognitionError::Cancelled));
}
