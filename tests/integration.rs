use receipt_renamer::{
    ai::{InferenceService, MockInferenceClient},
    app::App,
    format::{self, ImageFormat},
    models::{ImageRecord, ProcessingResult},
    parser,
};
use std::fs;

fn record(name: &str, format: ImageFormat) -> ImageRecord {
    ImageRecord {
        file_name: name.to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
        format,
    }
}

#[tokio::test]
async fn test_full_workflow_with_mocks() {
    let inference = MockInferenceClient::new()
        .with_filename_response("2024-11-15_lodging_marriott".to_string());

    // Normalization and validation happen before any remote call.
    let token = format::normalize_extension("hotel-receipt.jpg");
    assert_eq!(token, "jpeg");
    let image_format = ImageFormat::from_token(&token).unwrap();

    // Inference yields the extracted stem; the final name re-attaches the
    // normalized extension.
    let stem = inference
        .suggest_filename(&record("hotel-receipt.jpg", image_format))
        .await
        .unwrap();
    let new_name = format!("{}.{}", stem, token);
    assert_eq!(new_name, "2024-11-15_lodging_marriott.jpeg");
}

#[tokio::test]
async fn test_extraction_from_model_prose() {
    let reply = "Some of the receipt is smudged, so I used a generic merchant\n\
                 description.\n\n<filename>2024-06-09_ground-transportation_taxi</filename>";
    assert_eq!(
        parser::extract_filename(reply).unwrap(),
        "2024-06-09_ground-transportation_taxi"
    );
}

#[tokio::test]
async fn test_end_to_end_batch_with_mixed_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("input");
    let output_dir = dir.path().join("output");
    fs::create_dir_all(&input_dir).unwrap();

    fs::write(input_dir.join("a.jpg"), b"jpeg bytes").unwrap();
    fs::write(input_dir.join("b.png"), b"png bytes").unwrap();
    fs::write(input_dir.join("c.txt"), b"notes").unwrap();

    let inference = MockInferenceClient::new()
        .with_filename_response("2024-11-15_lodging_marriott".to_string());

    let app = App::with_inference(Box::new(inference), input_dir, output_dir.clone());
    let summary = app.run().await.unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.successes(), 2);
    assert_eq!(summary.failures(), 1);
    assert!(!summary.majority_failed());

    assert!(output_dir.join("2024-11-15_lodging_marriott.jpeg").exists());
    assert!(output_dir.join("2024-11-15_lodging_marriott.png").exists());

    let failures: Vec<&ProcessingResult> = summary
        .results()
        .iter()
        .filter(|r| !r.is_success())
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].original_name, "c.txt");
}

#[tokio::test]
async fn test_batch_independence_with_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("input");
    let output_dir = dir.path().join("output");
    fs::create_dir_all(&input_dir).unwrap();

    for i in 0..3 {
        fs::write(input_dir.join(format!("receipt{}.png", i)), b"png").unwrap();
    }
    for i in 0..2 {
        fs::write(input_dir.join(format!("notes{}.txt", i)), b"txt").unwrap();
    }

    let inference = MockInferenceClient::new();
    let probe = inference.clone();

    let app = App::with_inference(Box::new(inference), input_dir, output_dir);
    let summary = app.run().await.unwrap();

    assert_eq!(summary.total(), 5);
    assert_eq!(summary.successes(), 3);
    assert_eq!(summary.failures(), 2);

    // Only the supported files reached the inference service.
    assert_eq!(probe.get_call_count(), 3);
}

#[tokio::test]
async fn test_mock_inference_cycles_responses() {
    let inference = MockInferenceClient::new()
        .with_filename_response("2024-01-01_transportation_united".to_string())
        .with_filename_response("2024-01-02_lodging_hilton".to_string());

    let image = record("a.jpg", ImageFormat::Jpeg);
    assert_eq!(
        inference.suggest_filename(&image).await.unwrap(),
        "2024-01-01_transportation_united"
    );
    assert_eq!(
        inference.suggest_filename(&image).await.unwrap(),
        "2024-01-02_lodging_hilton"
    );
    assert_eq!(inference.get_call_count(), 2);
}
