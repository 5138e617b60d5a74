//! Integration tests for the resume scorer

use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::ReportGenerator;
use resume_scorer::config::OutputFormat;
use resume_scorer::pipeline::{Delivery, ResumeLibrary};
use resume_scorer::storage::{BlobStore, FsBlobStore};
use resume_scorer::{AtsScorer, ResumeScorerError, ScoreRecord};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

const OWNER: &str = "jane@example.com";

fn set(items: &[String]) -> HashSet<&str> {
    items.iter().map(String::as_str).collect()
}

async fn read_fixture(name: &str) -> String {
    InputManager::new()
        .extract_text(&Path::new("tests/fixtures").join(name))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_score_fixture_files() {
    let resume = read_fixture("sample_resume.txt").await;
    let job = read_fixture("job_description.txt").await;

    let record = AtsScorer::builtin().score_document("sample_resume.txt", &resume, &job);

    assert_eq!(record.ats_score, 50);
    assert_eq!(record.rating, 2);
    assert_eq!(
        set(&record.matched_keywords),
        HashSet::from(["python", "django", "postgresql", "docker"])
    );
    assert_eq!(
        set(&record.suggested_keywords),
        HashSet::from(["kubernetes", "aws", "redis", "terraform"])
    );
}

#[tokio::test]
async fn test_markdown_and_text_resumes_score_alike() {
    let job = read_fixture("job_description.txt").await;
    let scorer = AtsScorer::builtin();

    let from_txt = scorer.score(&read_fixture("sample_resume.txt").await, &job);
    let from_md = scorer.score(&read_fixture("sample_resume.md").await, &job);

    assert_eq!(from_txt, from_md);
}

#[tokio::test]
async fn test_json_report_matches_record() {
    let resume = read_fixture("sample_resume.txt").await;
    let job = read_fixture("job_description.txt").await;
    let record = AtsScorer::builtin().score_document("sample_resume.txt", &resume, &job);

    let report = ReportGenerator::with_options(false, false, true)
        .generate(&record, &OutputFormat::Json)
        .unwrap();
    let parsed: ScoreRecord = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed, record);
}

#[tokio::test]
async fn test_upload_score_fetch_on_filesystem_store() {
    let dir = tempfile::tempdir().unwrap();
    let library = ResumeLibrary::new(Arc::new(FsBlobStore::new(dir.path())));

    let resume = std::fs::read("tests/fixtures/sample_resume.txt").unwrap();
    let job = read_fixture("job_description.txt").await;

    let receipt = library
        .upload(OWNER, "sample_resume.txt", &resume, &job)
        .await
        .unwrap();
    assert_eq!(receipt.resume_key, "files/jane@example.com/uploads/sample_resume.txt");
    assert!(dir
        .path()
        .join("files/jane@example.com/job_descriptions/sample_resume.txt.txt")
        .exists());

    let outcome = library
        .scoring_pipeline(AtsScorer::builtin(), true)
        .process_key(&receipt.resume_key)
        .await
        .unwrap();
    assert_eq!(outcome.delivery, Delivery::Primary);
    assert_eq!(outcome.owner, OWNER);
    assert_eq!(outcome.record.ats_score, 50);

    let stored = dir
        .path()
        .join("files/jane@example.com/results/sample_resume.txt.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(stored).unwrap()).unwrap();
    assert_eq!(json["filename"], "sample_resume.txt");
    assert_eq!(json["ats_score"], 50);
    assert_eq!(json["rating"], 2);

    let fetched = library.fetch_result(OWNER, "sample_resume.txt").await.unwrap();
    assert_eq!(fetched, outcome.record);

    assert_eq!(
        library.list_resumes(OWNER).await.unwrap(),
        vec!["sample_resume.txt"]
    );
}

#[tokio::test]
async fn test_unwritable_results_folder_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let library = ResumeLibrary::new(Arc::new(FsBlobStore::new(dir.path())));
    library
        .upload(OWNER, "cv.md", b"- Kubernetes\n- Terraform", "Kubernetes, Terraform and Helm")
        .await
        .unwrap();

    // A plain file where the results folder should be makes the primary write fail
    std::fs::write(dir.path().join("files/jane@example.com/results"), b"").unwrap();

    let outcome = library
        .scoring_pipeline(AtsScorer::builtin(), true)
        .process_key("files/jane@example.com/uploads/cv.md")
        .await
        .unwrap();
    assert_eq!(outcome.delivery, Delivery::Fallback);
    assert_eq!(outcome.record.ats_score, 66);
    assert_eq!(outcome.record.rating, 3);

    let fallback = library.store().get("results/cv.md.json").await.unwrap();
    let record: ScoreRecord = serde_json::from_slice(&fallback).unwrap();
    assert_eq!(record, outcome.record);

    let without_fallback = library
        .scoring_pipeline(AtsScorer::builtin(), false)
        .process_key("files/jane@example.com/uploads/cv.md")
        .await;
    assert!(matches!(without_fallback, Err(ResumeScorerError::Store(_))));
}

#[tokio::test]
async fn test_missing_job_description_aborts_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FsBlobStore::new(dir.path()));
    store
        .put("files/jane@example.com/uploads/cv.txt", b"Python")
        .await
        .unwrap();

    let library = ResumeLibrary::new(store);
    let result = library
        .scoring_pipeline(AtsScorer::builtin(), true)
        .process_key("files/jane@example.com/uploads/cv.txt")
        .await;

    assert!(matches!(result, Err(ResumeScorerError::NotFound(_))));
    assert!(library.store().list("results/").await.unwrap().is_empty());
    assert!(library
        .fetch_result(OWNER, "cv.txt")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_delete_on_filesystem_store() {
    let dir = tempfile::tempdir().unwrap();
    let library = ResumeLibrary::new(Arc::new(FsBlobStore::new(dir.path())));

    for name in ["one.txt", "two.txt"] {
        library.upload(OWNER, name, b"Python", "Python and Docker").await.unwrap();
    }
    library
        .scoring_pipeline(AtsScorer::builtin(), false)
        .process_key("files/jane@example.com/uploads/one.txt")
        .await
        .unwrap();

    let summary = library
        .delete_resumes(OWNER, &["one.txt".to_string()])
        .await
        .unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(summary.failed.is_empty());

    assert_eq!(library.list_resumes(OWNER).await.unwrap(), vec!["two.txt"]);
    assert!(!dir.path().join("files/jane@example.com/results/one.txt.json").exists());
    assert!(!dir
        .path()
        .join("files/jane@example.com/job_descriptions/one.txt.txt")
        .exists());
}

#[tokio::test]
async fn test_delete_failures_are_counted_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let library = ResumeLibrary::new(Arc::new(FsBlobStore::new(dir.path())));

    library.upload(OWNER, "ok.txt", b"Python", "Python and Docker").await.unwrap();
    library
        .scoring_pipeline(AtsScorer::builtin(), false)
        .process_key("files/jane@example.com/uploads/ok.txt")
        .await
        .unwrap();

    // A directory where an upload should be cannot be removed as a file
    std::fs::create_dir_all(dir.path().join("files/jane@example.com/uploads/bad.txt")).unwrap();

    let summary = library
        .delete_resumes(
            OWNER,
            &["ok.txt".to_string(), "bad.txt".to_string(), "../x".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(summary.requested, 3);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failed, vec!["../x", "bad.txt"]);

    let owner_dir = dir.path().join("files/jane@example.com");
    assert!(!owner_dir.join("uploads/ok.txt").exists());
    assert!(!owner_dir.join("job_descriptions/ok.txt.txt").exists());
    assert!(!owner_dir.join("results/ok.txt.json").exists());
    assert!(owner_dir.join("uploads/bad.txt").is_dir());
}
