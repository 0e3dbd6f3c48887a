use std::path::PathBuf;

use gpa_calculator::exemption::{ExemptionStore, default_exemptions};
use gpa_calculator::gpa::{Mode, compute_gpa, format_semester_label};
use gpa_calculator::output::GpaReport;
use gpa_calculator::transcript::{Status, load_transcript, normalize};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_full_pipeline_csv() {
    let table = load_transcript(&fixture("sample_transcript.csv")).expect("Failed to load transcript");
    let records = normalize(table);

    assert_eq!(records.len(), 9);
    let retake = records
        .iter()
        .find(|r| r.subject_code == "MAT102")
        .expect("sub-table row missing");
    assert_eq!(retake.term, 0);
    assert_eq!(retake.semester_label, "Spring2023");
    assert_eq!(retake.status, Status::Retaken);

    let exemptions = default_exemptions();
    assert_close(
        compute_gpa(&records, Mode::Overall, &exemptions, None).unwrap(),
        3.25,
    );

    let semester = format_semester_label("sp23").unwrap();
    assert_close(
        compute_gpa(&records, Mode::OneSemester, &exemptions, Some(&semester)).unwrap(),
        3.0,
    );

    let mut with_math = exemptions.clone();
    with_math.push("MAT".to_string());
    assert_close(
        compute_gpa(&records, Mode::Overall, &with_math, None).unwrap(),
        3.75,
    );
}

#[test]
fn test_full_pipeline_html_fallback() {
    let table = load_transcript(&fixture("sample_transcript.html")).expect("Failed to load transcript");
    let records = normalize(table);

    assert_eq!(records.len(), 4);
    assert_close(
        compute_gpa(&records, Mode::Overall, &default_exemptions(), None).unwrap(),
        3.25,
    );
}

#[test]
fn test_full_pipeline_xlsx() {
    let table = load_transcript(&fixture("sample_transcript.xlsx")).expect("Failed to load workbook");
    let records = normalize(table);

    assert_eq!(records.len(), 9);
    let csc101 = records
        .iter()
        .find(|r| r.subject_code == "CSC101")
        .expect("main table row missing");
    assert_eq!(csc101.sequence_number, Some(2));
    assert_eq!(csc101.credit, 3.0);
    assert_eq!(csc101.grade, 4.0);

    let exemptions = default_exemptions();
    assert_close(
        compute_gpa(&records, Mode::Overall, &exemptions, None).unwrap(),
        3.25,
    );
    assert_close(
        compute_gpa(&records, Mode::OneSemester, &exemptions, Some("Spring2023")).unwrap(),
        3.0,
    );
}

#[test]
fn test_semester_without_courses_is_zero() {
    let records = normalize(load_transcript(&fixture("sample_transcript.csv")).unwrap());
    let gpa = compute_gpa(&records, Mode::OneSemester, &default_exemptions(), Some("Summer2030"));
    assert_eq!(gpa, Ok(0.0));
}

#[test]
fn test_report_uses_saved_exemptions() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ExemptionStore::new(dir.path().join("exemption.json"));
    store
        .save(&["TRS".to_string(), "VOV".to_string(), "CSC".to_string()])
        .unwrap();

    let records = normalize(load_transcript(&fixture("sample_transcript.csv")).unwrap());
    let report = GpaReport::compute(
        "sample_transcript.csv",
        &records,
        Mode::Overall,
        &store.load(),
        None,
    );

    // MAT101 (3.0) and MAT102 (2.5), 3 credits each
    assert_eq!(report.counted_subjects, 2);
    assert_eq!(report.display_line(), "Your GPA score is: 2.75");
}
