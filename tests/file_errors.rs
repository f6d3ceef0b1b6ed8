use std::fs;

use symhuff::{
    compress_file, compressed_path, decompress_file, decompressed_path, Config, NoopHook, Phase,
    PhaseTimings, SymhuffError,
};

#[test]
fn file_roundtrip_with_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lecture.pdf");
    let data: Vec<u8> = (0..10_000u32).map(|i| (i * i % 97) as u8).collect();
    fs::write(&input, &data).unwrap();

    let container = compressed_path(&input);
    let config = Config::with_symbol_width(3);
    let report = compress_file(&input, &container, &config, &mut NoopHook).unwrap();
    assert_eq!(report.input_bytes, data.len() as u64);
    assert_eq!(report.output_bytes, fs::metadata(&container).unwrap().len());

    let restored = decompressed_path(&container).unwrap();
    assert_eq!(restored, dir.path().join("lecture_uncompressed.pdf"));
    let back = decompress_file(&container, &restored, &config, &mut NoopHook).unwrap();
    assert_eq!(back.output_bytes, data.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn small_buffers_do_not_change_the_result() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 13) as u8).collect();
    fs::write(&input, &data).unwrap();

    let a = dir.path().join("a.hc");
    let b = dir.path().join("b.hc");
    let big = Config::with_symbol_width(5);
    let small = Config {
        buffer_size: 3,
        ..big.clone()
    };
    compress_file(&input, &a, &big, &mut NoopHook).unwrap();
    compress_file(&input, &b, &small, &mut NoopHook).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn empty_input_creates_no_container() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, b"").unwrap();
    let output = compressed_path(&input);
    let err = compress_file(&input, &output, &Config::default(), &mut NoopHook).unwrap_err();
    assert!(matches!(err, SymhuffError::EmptyInput));
    assert!(!output.exists());
}

#[test]
fn zero_width_creates_no_container() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.txt");
    fs::write(&input, b"data").unwrap();
    let output = compressed_path(&input);
    let err = compress_file(&input, &output, &Config::with_symbol_width(0), &mut NoopHook).unwrap_err();
    assert!(matches!(err, SymhuffError::InvalidArgument(_)));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = compress_file(
        &dir.path().join("absent"),
        &dir.path().join("absent.hc"),
        &Config::default(),
        &mut NoopHook,
    )
    .unwrap_err();
    assert!(matches!(err, SymhuffError::Io(_)));
    assert!(err.to_string().contains("absent"));
}

#[test]
fn corrupt_header_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let container = dir.path().join("bad.hc");
    fs::write(&container, b"baddata").unwrap();
    let output = dir.path().join("out.bin");
    let err = decompress_file(&container, &output, &Config::default(), &mut NoopHook).unwrap_err();
    assert!(matches!(err, SymhuffError::CorruptStream(_)));
    assert!(!output.exists());
}

#[test]
fn input_and_output_must_differ() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("same.bin");
    fs::write(&input, b"keep me").unwrap();
    let err = compress_file(&input, &input, &Config::default(), &mut NoopHook).unwrap_err();
    assert!(matches!(err, SymhuffError::InvalidArgument(_)));
    assert_eq!(fs::read(&input).unwrap(), b"keep me");
}

#[test]
fn hooks_see_every_phase() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, b"hook me up").unwrap();
    let container = dir.path().join("in.txt.hc");
    let output = dir.path().join("out.txt");

    let mut timings = PhaseTimings::new();
    compress_file(&input, &container, &Config::default(), &mut timings).unwrap();
    decompress_file(&container, &output, &Config::default(), &mut timings).unwrap();

    let phases: Vec<Phase> = timings.entries().iter().map(|(p, _)| *p).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Frequencies,
            Phase::TreeBuild,
            Phase::CodeTable,
            Phase::Encode,
            Phase::ReadHeader,
            Phase::Decode,
        ]
    );
}
