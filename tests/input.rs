use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use flate2::Compression;
use flate2::write::GzEncoder;

use geo_soft_json::input::InputSource;

#[test]
fn reads_gzipped_soft_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("GSE1_family.soft.gz")).unwrap();
    let file = std::fs::File::create(path.as_std_path()).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(b"^SAMPLE = GSM1\n!Sample_title = T1\n")
        .unwrap();
    encoder.finish().unwrap();

    let source: InputSource = path.as_str().parse().unwrap();
    let lines: Vec<String> = source.open().unwrap().lines().map(Result::unwrap).collect();
    assert_eq!(lines, vec!["^SAMPLE = GSM1", "!Sample_title = T1"]);
}

#[test]
fn reads_plain_soft_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("GSE1_family.soft");
    std::fs::write(&path, "^SAMPLE = GSM1\r\n").unwrap();

    let source: InputSource = path.to_str().unwrap().parse().unwrap();
    let lines: Vec<String> = source.open().unwrap().lines().map(Result::unwrap).collect();
    assert_eq!(lines, vec!["^SAMPLE = GSM1"]);
}
