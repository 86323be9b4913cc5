mod common;
use crate::common::TestResult;

use std::io::ErrorKind;

use confbox::fs::mock::MockFileSystem;
use confbox::{ConfboxError, ConfigLoader, file_size_label, size_label};
use confbox_test_utils::capture::capturing_loader;
use confbox_test_utils::fixtures::Workspace;

#[test]
fn exact_kibibytes() -> TestResult {
    let ws = Workspace::new()?;
    let path = ws.sized_file("two_kib.bin", 2048)?;

    assert_eq!(file_size_label(&path)?, "~ 2 KB");
    Ok(())
}

#[test]
fn tiny_file_rounds_down_to_zero() -> TestResult {
    let ws = Workspace::new()?;
    let one = ws.sized_file("one.bin", 1)?;
    let empty = ws.sized_file("empty.bin", 0)?;

    assert_eq!(file_size_label(&one)?, "~ 0 KB");
    assert_eq!(file_size_label(&empty)?, "~ 0 KB");
    Ok(())
}

#[test]
fn rounds_to_nearest_not_floor() -> TestResult {
    let ws = Workspace::new()?;
    let path = ws.sized_file("almost_two.bin", 2047)?;

    assert_eq!(file_size_label(&path)?, "~ 2 KB");
    Ok(())
}

#[test]
fn halves_round_to_even() {
    assert_eq!(size_label(512), "~ 0 KB");
    assert_eq!(size_label(513), "~ 1 KB");
    assert_eq!(size_label(1536), "~ 2 KB");
    assert_eq!(size_label(2560), "~ 2 KB");
    assert_eq!(size_label(3584), "~ 4 KB");
    assert_eq!(size_label(1024 * 1024), "~ 1024 KB");
}

#[test]
fn missing_file_is_io_error() {
    match file_size_label("/nonexistent/confbox/model.bin") {
        Err(ConfboxError::Io(e)) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn directory_is_io_error() -> TestResult {
    let ws = Workspace::new()?;

    let err = file_size_label(ws.path()).unwrap_err();

    assert!(err.is_io_error(), "got {err:?}");
    Ok(())
}

#[test]
fn does_not_log() -> TestResult {
    let ws = Workspace::new()?;
    let path = ws.sized_file("quiet.bin", 4096)?;
    let (loader, logs) = capturing_loader();

    assert_eq!(loader.file_size_label(&path)?, "~ 4 KB");
    assert!(logs.lines().is_empty());
    Ok(())
}

#[test]
fn works_against_the_mock_filesystem() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("artifacts/model.bin", vec![0u8; 10 * 1024 + 600]);
    fs.add_dir("artifacts/empty");
    let loader = ConfigLoader::new().with_filesystem(fs.clone());

    assert_eq!(loader.file_size_label("artifacts/model.bin")?, "~ 11 KB");
    match loader.file_size_label("artifacts/empty") {
        Err(ConfboxError::Io(e)) => assert_eq!(e.kind(), ErrorKind::IsADirectory),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert_eq!(
        fs.operations(),
        vec![
            "file_len artifacts/model.bin".to_string(),
            "file_len artifacts/empty".to_string(),
        ]
    );
    Ok(())
}
