use anyhow::Context;
use clap::Parser;
use log::info;
use scantag::{ArtifactStore, Classifier, Prediction};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bundle directory holding classifier.onnx, vocab.json, and labels.json
    #[arg(short, long)]
    bundle: Option<String>,

    /// Verify bundle files against the manifest before loading
    #[arg(long)]
    verify: bool,

    /// Texts to classify; built-in samples are used when none are given
    texts: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Text Classification Demo ===");

    let store = match &args.bundle {
        Some(dir) => ArtifactStore::new(dir)?,
        None => ArtifactStore::new_default()?,
    };
    info!("Using bundle at {:?}", store.bundle_dir());

    if args.verify && !store.verify_bundle()? {
        anyhow::bail!("Bundle verification failed at {:?}", store.bundle_dir());
    }

    let start_time = Instant::now();
    info!("Building classifier...");

    let classifier = Classifier::builder()
        .with_bundle(&store)
        .context("Failed to load the artifact bundle")?
        .build()
        .context("Failed to build the classifier")?;

    let build_time = start_time.elapsed();
    let classifier_info = classifier.info();
    info!(
        "=== Classifier Built Successfully ({} labels, {} vocabulary tokens, took {:.2?}) ===\n",
        classifier_info.num_labels,
        classifier_info.vocab_size,
        build_time
    );

    let inputs: Vec<String> = if args.texts.is_empty() {
        vec![
            // The kind of text an on-device OCR pass produces
            "TOTAL: 42.90\nThank you for shopping with us".to_string(),
            "Congratulations! You have been selected for a limited offer".to_string(),
            "Meeting rescheduled to Thursday 3pm, room 204".to_string(),
            // Edge cases
            "".to_string(),
            "@@@ ///".to_string(),
        ]
    } else {
        args.texts.clone()
    };

    info!("=== Running Classifications ({} inputs) ===\n", inputs.len());
    let classify_start = Instant::now();

    for (i, text) in inputs.iter().enumerate() {
        info!("\nTest {}/{} (elapsed: {:.2?}):", i + 1, inputs.len(), classify_start.elapsed());
        info!("Input: {}", text);
        process_input(&classifier, text)?;
    }

    let total_time = start_time.elapsed();
    let classify_time = classify_start.elapsed();

    info!("\n=== Demo Complete ===");
    info!("Total time: {:.2?}", total_time);
    info!("Build time: {:.2?}", build_time);
    info!("Classification time: {:.2?}", classify_time);
    info!(
        "Average time per classification: {:.2?}",
        classify_time / inputs.len() as u32
    );

    Ok(())
}

fn process_input(classifier: &Classifier, text: &str) -> anyhow::Result<()> {
    match classifier.predict(text) {
        Ok(Prediction::Class { label, score }) => {
            println!("\nResults:");
            println!("  Input: {:?}", text);
            println!("  Predicted class: {} (score {:.4})", label, score);
        }
        Ok(Prediction::Unknown) => {
            println!("\nResults:");
            println!("  Input: {:?}", text);
            println!("  No class could be named");
        }
        Err(e) => {
            eprintln!("\nError processing text: {}", e);
            eprintln!("Consider:");
            eprintln!("  - Checking that the bundle's model matches its label table");
            eprintln!("  - Running with RUST_LOG=info for artifact loading details");
            return Err(e.into());
        }
    }

    Ok(())
}
