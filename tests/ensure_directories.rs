mod common;
use crate::common::{TestResult, init_tracing};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use confbox::fs::mock::MockFileSystem;
use confbox::{ConfboxError, ConfigLoader, DirectoryList, ensure_directories, load_document};
use confbox_test_utils::capture::{capturing_dispatch, capturing_loader};
use confbox_test_utils::fixtures::Workspace;

#[test]
fn creates_nested_directories() -> TestResult {
    init_tracing();
    let ws = Workspace::new()?;
    let dirs = vec![
        ws.join("artifacts"),
        ws.join("artifacts/data_ingestion/raw/2024"),
        ws.join("logs/run/deep/er"),
    ];

    ensure_directories(&dirs, true)?;

    for dir in &dirs {
        assert!(dir.is_dir(), "{dir:?} should exist");
    }
    Ok(())
}

#[test]
fn second_call_is_a_no_op() -> TestResult {
    let ws = Workspace::new()?;
    let dirs = [ws.join("a/b/c"), ws.join("d")];
    let marker = ws.write("a/b/c/keep.txt", "keep")?;

    ensure_directories(&dirs, false)?;
    ensure_directories(&dirs, false)?;

    assert!(dirs.iter().all(|d| d.is_dir()));
    assert_eq!(std::fs::read_to_string(marker)?, "keep");
    Ok(())
}

#[test]
fn duplicate_entries_are_fine() -> TestResult {
    let ws = Workspace::new()?;
    let dir = ws.join("same");

    ensure_directories(&[&dir, &dir], true)?;

    assert!(dir.is_dir());
    Ok(())
}

#[test]
fn empty_list_does_nothing() -> TestResult {
    let (loader, logs) = capturing_loader();
    let none: [PathBuf; 0] = [];

    loader.ensure_directories(&none, true)?;

    assert!(logs.lines().is_empty());
    Ok(())
}

#[test]
fn verbose_logs_every_path_including_existing_ones() -> TestResult {
    let ws = Workspace::new()?;
    let existing = ws.join("existing");
    std::fs::create_dir(&existing)?;
    let fresh = ws.join("fresh/nested");
    let (loader, logs) = capturing_loader();

    loader.ensure_directories(&[&existing, &fresh], true)?;

    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].contains(&existing.display().to_string()));
    assert!(lines[1].contains(&fresh.display().to_string()));
    assert!(lines.iter().all(|l| l.contains("created directory")));
    Ok(())
}

#[test]
fn quiet_logs_nothing() -> TestResult {
    let ws = Workspace::new()?;
    let (loader, logs) = capturing_loader();

    loader.ensure_directories(&[ws.join("q1"), ws.join("q2")], false)?;

    assert!(logs.lines().is_empty());
    assert!(ws.join("q2").is_dir());
    Ok(())
}

#[test]
fn file_in_the_way_is_io_error() -> TestResult {
    let ws = Workspace::new()?;
    let blocker = ws.write("blocker", "i am a file")?;

    let result = ensure_directories(&[blocker.join("child")], true);

    match result {
        Err(ConfboxError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn empty_path_fails_before_touching_the_filesystem() {
    let fs = MockFileSystem::new();
    let (dispatch, logs) = capturing_dispatch();
    let loader = ConfigLoader::new()
        .with_filesystem(fs.clone())
        .with_dispatch(dispatch);

    let err = loader
        .ensure_directories(&["out/a", "", "out/b"], true)
        .unwrap_err();

    assert!(err.is_type_error(), "got {err:?}");
    assert!(fs.operations().is_empty(), "{:?}", fs.operations());
    assert!(!fs.exists(Path::new("out/a")));
    assert!(logs.lines().is_empty());
}

#[test]
fn failure_part_way_keeps_earlier_directories() {
    let fs = MockFileSystem::new();
    fs.add_file("out/blocker", "x");
    let loader = ConfigLoader::new().with_filesystem(fs.clone());

    let err = loader
        .ensure_directories(&["out/first", "out/blocker/inner", "out/never"], false)
        .unwrap_err();

    match err {
        ConfboxError::Io(e) => assert_eq!(e.kind(), ErrorKind::NotADirectory),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(fs.is_dir(Path::new("out/first")));
    assert!(!fs.exists(Path::new("out/never")));
    assert_eq!(
        fs.operations(),
        vec![
            "create_dir_all out/first".to_string(),
            "create_dir_all out/blocker/inner".to_string(),
        ]
    );
}

#[test]
fn directories_named_by_a_loaded_document() -> TestResult {
    let ws = Workspace::new()?;
    let root = ws.path().display().to_string();
    let config = ws.write(
        "config.yaml",
        &format!(
            "artifacts_root: {root}/artifacts\nstage_dirs:\n  - {root}/artifacts/ingest\n  - {root}/artifacts/train\n"
        ),
    )?;

    let doc = load_document(&config)?;
    let mut dirs = DirectoryList::new();
    dirs.push(doc.get_path("artifacts_root")?);
    dirs.extend(doc.get_directories("stage_dirs")?.into_inner());

    ensure_directories(&dirs, true)?;

    assert!(ws.join("artifacts/ingest").is_dir());
    assert!(ws.join("artifacts/train").is_dir());
    Ok(())
}
