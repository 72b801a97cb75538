use covmap::builder::build;
use covmap::detect::Format;
use covmap::error::CovmapError;
use covmap::ingest::load;
use covmap::treemap::flatten;

#[test]
fn load_cobertura_fixture_and_flatten() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_cobertura.xml");
    let (data, format) = load(&path, None).unwrap();
    assert_eq!(format, Format::Cobertura);
    assert_eq!(data.files.len(), 3);

    let report = build(&data.files);
    assert_eq!(report.root().name(), "src");
    assert_eq!(report.root().total_lines(), 11);
    assert_eq!(report.root().covered_lines(), 7);

    let data = flatten(&report);
    assert_eq!(
        data.ids,
        vec!["src", "src/app", "src/app/main.py", "src/app/util.py", "src/cli.py"]
    );
    assert_eq!(data.parents, vec!["", "src", "src/app", "src/app", "src"]);
    assert_eq!(data.values, vec![11, 8, 6, 2, 3]);
}

#[test]
fn load_lcov_fixture_with_absolute_paths() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.lcov");
    let (data, format) = load(&path, None).unwrap();
    assert_eq!(format, Format::Lcov);

    let report = build(&data.files);
    assert_eq!(report.root().path(), "/repo/src");
    assert_eq!(report.root().name(), "src");

    let data = flatten(&report);
    assert_eq!(data.ids, vec!["src", "src/lib.rs", "src/util", "src/util/fmt.rs"]);
}

#[test]
fn load_with_format_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::write(&path, b"SF:/src/lib.rs\nDA:1,1\nend_of_record\n").unwrap();

    let (data, format) = load(&path, Some(Format::Lcov)).unwrap();
    assert_eq!(format, Format::Lcov);
    assert_eq!(data.files.len(), 1);
}

#[test]
fn load_unknown_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random.dat");
    std::fs::write(&path, b"hello world this is not coverage data").unwrap();

    let err = load(&path, None).unwrap_err();
    assert!(matches!(err, CovmapError::UnknownFormat));
}

#[test]
fn load_malformed_xml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coverage.xml");
    std::fs::write(&path, b"<?xml version=\"1.0\"?><coverage><packages></coverage>").unwrap();

    let err = load(&path, None).unwrap_err();
    assert!(matches!(err, CovmapError::Xml { .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("nope.xml"), None).unwrap_err();
    assert!(matches!(err, CovmapError::Io(_)));
}
