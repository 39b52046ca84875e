//! RLE integration tests, including the whole-file contract.

use krunch_core::traits::FileCodec;
use krunch_rle::RleCodec;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("krunch-rle-tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn test_file_roundtrip() {
    let input = temp_path("roundtrip.txt");
    let compressed = temp_path("roundtrip.rle");
    let restored = temp_path("roundtrip.out");

    let original = b"wwwwwwwwwwbbbwwwwwwwwwwwwbbbwwwwwwwwwwwwwwwwwwwwwwwwb".repeat(20);
    std::fs::write(&input, &original).unwrap();

    let codec = RleCodec;
    codec.compress(&input, &compressed).unwrap();
    assert!(codec.is_valid(&compressed));
    codec.decompress(&compressed, &restored).unwrap();

    assert_eq!(std::fs::read(&restored).unwrap(), original);
}

#[test]
fn test_empty_file_roundtrip() {
    let input = temp_path("empty.txt");
    let compressed = temp_path("empty.rle");
    let restored = temp_path("empty.out");

    std::fs::write(&input, b"").unwrap();

    let codec = RleCodec;
    codec.compress(&input, &compressed).unwrap();
    assert_eq!(std::fs::metadata(&compressed).unwrap().len(), 0);
    // Zero bytes is an even size, so the empty file validates.
    assert!(codec.is_valid(&compressed));
    codec.decompress(&compressed, &restored).unwrap();
    assert_eq!(std::fs::metadata(&restored).unwrap().len(), 0);
}

#[test]
fn test_is_valid_rejects_odd_size() {
    let path = temp_path("odd.rle");
    std::fs::write(&path, [1, 2, 3]).unwrap();
    assert!(!RleCodec.is_valid(&path));
}

#[test]
fn test_is_valid_rejects_missing_file() {
    assert!(!RleCodec.is_valid(&temp_path("does-not-exist.rle")));
}

#[test]
fn test_missing_input_is_io_error() {
    let codec = RleCodec;
    let err = codec
        .compress(&temp_path("no-such-input.txt"), &temp_path("unused.rle"))
        .unwrap_err();
    assert!(matches!(err, krunch_core::KrunchError::Io(_)));
}

#[test]
fn test_decompression_idempotent() {
    let input = temp_path("idem.txt");
    let compressed = temp_path("idem.rle");
    let out_a = temp_path("idem.a");
    let out_b = temp_path("idem.b");

    std::fs::write(&input, b"aaaaabbbbbcccccaaaaa").unwrap();

    let codec = RleCodec;
    codec.compress(&input, &compressed).unwrap();
    codec.decompress(&compressed, &out_a).unwrap();
    codec.decompress(&compressed, &out_b).unwrap();

    assert_eq!(
        std::fs::read(&out_a).unwrap(),
        std::fs::read(&out_b).unwrap()
    );
}
