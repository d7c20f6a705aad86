mod common;
use common::{create_test_pdf, prose_docx, write_file};

use pretty_assertions::assert_eq;

use docent::config::DocumentsConfig;
use docent::i18n::Translations;
use docent::library::DocumentLibrary;
use docent::models::LoadStatus;
use docent::processing::DocumentLoader;

fn loader(folder: &std::path::Path) -> DocumentLoader {
    DocumentLoader::new(&DocumentsConfig {
        data_folder: folder.to_path_buf(),
        ..Default::default()
    })
}

const POLICY: &[&str] = &[
    "Employees may work remotely up to three days per week.",
    "Requests must be approved by the team lead in advance.",
];

const HANDBOOK: &[&str] = &[
    "New starters receive a laptop and access badge on their first day.",
    "The onboarding buddy programme lasts for the first month.",
];

#[tokio::test]
async fn test_loads_every_docx_in_name_order() {
    common::init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "policy.docx", &prose_docx(POLICY));
    write_file(dir.path(), "Handbook.DOCX", &prose_docx(HANDBOOK));
    write_file(dir.path(), "notes.txt", b"ignored");

    let report = loader(dir.path()).load_all().await.unwrap();

    let names: Vec<_> = report.documents.keys().cloned().collect();
    assert_eq!(names, vec!["Handbook.DOCX".to_string(), "policy.docx".to_string()]);
    assert_eq!(
        report.status,
        LoadStatus::AllLoaded {
            success: 2,
            total: 2
        }
    );

    let summary = &report.summary;
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.successful_loads, 2);
    assert_eq!(summary.failed_loads, 0);
    assert_eq!(summary.total_pages, 4);
    let words: usize = report.documents.values().map(|d| d.metadata.word_count).sum();
    assert_eq!(summary.total_words, words);
    assert_eq!(summary.estimated_reading_time, 1);
    assert!(summary.total_size > 0);

    let policy = &report.documents["policy.docx"];
    assert!(policy.content.contains("three days per week"));
    assert_eq!(policy.file_path, dir.path().join("policy.docx"));
}

#[tokio::test]
async fn test_pdf_and_docx_load_together() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "annual-report.pdf",
        &create_test_pdf(&[
            "Revenue grew in every region during the year.",
            "The board approved a new travel policy.",
            "Headcount reached two hundred employees.",
        ]),
    );
    write_file(dir.path(), "policy.docx", &prose_docx(POLICY));

    let report = loader(dir.path()).load_all().await.unwrap();

    assert_eq!(
        report.status,
        LoadStatus::AllLoaded {
            success: 2,
            total: 2
        }
    );

    let pdf = &report.documents["annual-report.pdf"];
    assert!(pdf.content.contains("--- Page 1 ---"));
    assert!(pdf.content.contains("--- Page 3 ---"));
    assert!(pdf.content.contains("new travel policy"));
    assert_eq!(pdf.metadata.file_type, "PDF");
    assert_eq!(pdf.metadata.total_pages, Some(3));

    // three PDF pages plus two DOCX paragraphs
    assert_eq!(report.summary.total_pages, 5);
    let words: usize = report.documents.values().map(|d| d.metadata.word_count).sum();
    assert_eq!(report.summary.total_words, words);
}

#[tokio::test]
async fn test_broken_files_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "good.docx", &prose_docx(POLICY));
    write_file(dir.path(), "broken.docx", b"not a zip archive");
    write_file(dir.path(), "broken.pdf", b"%PDF-1.4 truncated");

    let report = loader(dir.path()).load_all().await.unwrap();

    assert!(report.is_loaded());
    assert_eq!(report.documents.len(), 1);
    assert_eq!(
        report.status,
        LoadStatus::Partial {
            success: 1,
            total: 3,
            failed: 2
        }
    );

    let failed: Vec<_> = report
        .summary
        .failed_files
        .iter()
        .map(|f| f.file.as_str())
        .collect();
    assert_eq!(failed, vec!["broken.docx", "broken.pdf"]);
    assert_eq!(report.summary.failed_files[0].reason, "No content extracted");

    let status = Translations::builtin().load_status("en", &report.status);
    assert_eq!(status, "Loaded 1 of 3 documents (2 failed)");
}

#[tokio::test]
async fn test_folder_with_only_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b.txt", b"text");
    write_file(dir.path(), "a.xlsx", b"sheet");

    let report = loader(dir.path()).load_all().await.unwrap();

    assert!(!report.is_loaded());
    match &report.status {
        LoadStatus::NoSupportedFiles { files, .. } => {
            assert_eq!(files, &vec!["a.xlsx".to_string(), "b.txt".to_string()]);
        }
        other => panic!("unexpected status {other:?}"),
    }
}

#[tokio::test]
async fn test_all_failed_lists_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "empty.docx", b"");

    let report = loader(dir.path()).load_all().await.unwrap();

    assert!(!report.is_loaded());
    assert!(matches!(report.status, LoadStatus::AllFailed { ref failures } if failures.len() == 1));
    assert_eq!(report.summary.estimated_reading_time, 1);
}

#[tokio::test]
async fn test_library_reload_picks_up_new_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "policy.docx", &prose_docx(POLICY));

    let library = DocumentLibrary::new(loader(dir.path()));
    assert!(library.cached().await.is_none());

    let first = library.snapshot().await.unwrap();
    assert_eq!(first.documents.len(), 1);

    write_file(dir.path(), "handbook.docx", &prose_docx(HANDBOOK));
    let cached = library.snapshot().await.unwrap();
    assert_eq!(cached.documents.len(), 1, "snapshot must not rescan");

    let reloaded = library.reload().await.unwrap();
    assert_eq!(reloaded.documents.len(), 2);
    assert_eq!(library.cached().await.unwrap().documents.len(), 2);
}
