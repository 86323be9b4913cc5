use std::io::ErrorKind;
use std::path::Path;

use confbox::fs::mock::MockFileSystem;
use confbox::fs::{FileSystem, RealFileSystem};
use confbox::{ConfboxError, ConfigLoader};
use confbox_test_utils::capture::capturing_dispatch;
use confbox_test_utils::fixtures::Workspace;

#[test]
fn test_mock_fs_load_document() {
    let fs = MockFileSystem::new();
    fs.add_file("config/config.yaml", "artifacts_root: artifacts\nepochs: 2\n");
    let (dispatch, logs) = capturing_dispatch();
    let loader = ConfigLoader::new()
        .with_filesystem(fs.clone())
        .with_dispatch(dispatch);

    let doc = loader.load_document("config/config.yaml").unwrap();

    assert_eq!(doc["artifacts_root"], "artifacts");
    assert_eq!(doc["epochs"], 2);
    assert_eq!(fs.operations(), vec!["read_to_string config/config.yaml"]);
    assert_eq!(logs.matching("config/config.yaml").len(), 1);
}

#[test]
fn test_mock_fs_missing_and_directory() {
    let fs = MockFileSystem::new();
    fs.add_dir("config");
    let loader = ConfigLoader::new().with_filesystem(fs);

    match loader.load_document("config/absent.yaml") {
        Err(ConfboxError::Io(e)) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("expected Io error, got {other:?}"),
    }
    match loader.load_document("config") {
        Err(ConfboxError::Io(e)) => assert_eq!(e.kind(), ErrorKind::IsADirectory),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_mock_fs_invalid_utf8_is_io_error() {
    let fs = MockFileSystem::new();
    fs.add_file("bad.yaml", vec![0xff, 0xfe, 0x00]);
    let loader = ConfigLoader::new().with_filesystem(fs);

    match loader.load_document("bad.yaml") {
        Err(ConfboxError::Io(e)) => assert_eq!(e.kind(), ErrorKind::InvalidData),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_mock_fs_create_dir_all() {
    let fs = MockFileSystem::new();
    fs.add_file("taken", "x");

    fs.create_dir_all(Path::new("a/b/c")).unwrap();
    fs.create_dir_all(Path::new("a/b")).unwrap();

    assert!(fs.is_dir(Path::new("a")));
    assert!(fs.is_dir(Path::new("a/b/c")));
    assert!(fs.is_file(Path::new("taken")));

    let err = fs.create_dir_all(Path::new("taken")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn test_loader_is_shareable_across_threads() {
    let fs = MockFileSystem::new();
    fs.add_file("c.yaml", "a: 1\n");
    let loader = ConfigLoader::new().with_filesystem(fs.clone());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let loader = loader.clone();
            std::thread::spawn(move || {
                loader
                    .ensure_directories(&["shared/dir".to_string(), format!("own/{i}")], false)
                    .unwrap();
                loader.load_document("c.yaml").unwrap()["a"].as_i64()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
    assert!(fs.is_dir(Path::new("shared/dir")));
    assert!(fs.is_dir(Path::new("own/3")));
}

#[test]
fn test_real_and_mock_fs_agree_through_the_trait() {
    let ws = Workspace::new().unwrap();
    ws.write("data/params.yaml", "lr: 0.1\n").unwrap();
    let mock = MockFileSystem::new();
    mock.add_file(ws.join("data/params.yaml"), "lr: 0.1\n");

    let backends: [Box<dyn FileSystem>; 2] = [Box::new(RealFileSystem), Box::new(mock)];
    for fs in &backends {
        let file = ws.join("data/params.yaml");
        assert_eq!(fs.file_len(&file).unwrap(), 8, "{fs:?}");
        assert_eq!(fs.read_to_string(&file).unwrap(), "lr: 0.1\n");

        let err = fs.file_len(&ws.join("data")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IsADirectory, "{fs:?}");
        let err = fs.file_len(&ws.join("data/missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound, "{fs:?}");
    }
}
