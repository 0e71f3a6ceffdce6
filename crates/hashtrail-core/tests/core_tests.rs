use hashtrail_core::{
    ConfigError, DigestAlgorithm, FileMetadata, FileRecord, REPORT_COLUMNS, RunConfig,
    ScanWarning, Timestamps, WalkSummary, WarningKind,
};
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

#[test]
fn test_run_config_builder_and_validation() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let config = RunConfig::builder()
        .root(root.path())
        .report_dir(out.path())
        .algorithm(DigestAlgorithm::from_name("sha256").unwrap())
        .report_name("baseline.csv")
        .build()
        .unwrap();

    assert_eq!(config.report_path(), out.path().join("baseline.csv"));
    assert!(!config.verbose);
    config.validate().unwrap();

    // Validation must not leave a report behind.
    assert!(!config.report_path().exists());
}

#[test]
fn test_validation_failures_create_nothing() {
    let out = TempDir::new().unwrap();
    let config = RunConfig::new("/definitely/not/here", out.path(), DigestAlgorithm::Md5);

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::RootNotFound { .. }));
    assert!(err.to_string().contains("/definitely/not/here"));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_header_matches_report_columns() {
    let header = FileRecord::header(DigestAlgorithm::Md5);
    for (i, column) in REPORT_COLUMNS.iter().enumerate() {
        if i == 6 {
            assert_eq!(header[i], "MD5");
        } else {
            assert_eq!(&header[i], column);
        }
    }
}

#[test]
fn test_record_row_has_one_field_per_column() {
    let t = UNIX_EPOCH + Duration::from_secs(86_400);
    let record = FileRecord::new(
        "a.bin",
        PathBuf::from("/root/a.bin"),
        FileMetadata {
            size: 7,
            timestamps: Timestamps::new(Some(t), None, Some(t)),
            uid: 0,
            gid: 0,
            mode: 0o100600,
        },
        "D41D8CD98F00B204E9800998ECF8427E".to_string(),
    );

    let row = record.to_row();
    assert_eq!(row.len(), REPORT_COLUMNS.len());
    assert_eq!(row[3], "1970-01-02 00:00:00 UTC");
    assert_eq!(row[4], "");
    assert_eq!(row[5], "1970-01-02 00:00:00 UTC");
    assert_eq!(row[9], "100600");
}

#[test]
fn test_warning_classification() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

    let skips = [
        ScanWarning::vanished("/a"),
        ScanWarning::symlink("/b"),
        ScanWarning::not_a_file("/c"),
        ScanWarning::metadata_error("/d", &io),
    ];
    assert!(skips.iter().all(|w| !w.is_error()));

    let errors = [
        ScanWarning::open_error("/e", &io),
        ScanWarning::read_error("/f", &io),
    ];
    assert!(errors.iter().all(ScanWarning::is_error));
    assert_eq!(errors[1].kind, WarningKind::ReadError);
}

#[test]
fn test_summary_defaults() {
    let summary = WalkSummary::default();
    assert_eq!(summary.total_entries(), 0);
    assert!(summary.is_clean());
}
