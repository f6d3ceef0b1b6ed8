use rand::Rng;
use symhuff::{compress, decompress, SymhuffError};

#[test]
fn every_truncation_fails() {
    let data: Vec<u8> = b"the decoder must notice missing bytes".to_vec();
    let packed = compress(&data, 2).unwrap();
    for cut in 0..packed.len() {
        let err = decompress(&packed[..cut]).unwrap_err();
        assert!(
            matches!(err, SymhuffError::CorruptStream(_)),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn empty_container_is_corrupt() {
    assert!(matches!(decompress(&[]), Err(SymhuffError::CorruptStream(_))));
}

#[test]
fn altered_bit_count_is_rejected() {
    let mut packed = compress(b"abcdefabcdef", 1).unwrap();
    packed[7] = packed[7].wrapping_add(1);
    assert!(matches!(decompress(&packed), Err(SymhuffError::CorruptStream(_))));
}

#[test]
fn random_bit_flips_never_panic() {
    let mut rng = rand::thread_rng();
    let data: Vec<u8> = (0..512).map(|_| rng.gen_range(0u8..16)).collect();
    let packed = compress(&data, 1).unwrap();
    let total_bits = packed.len() * 8;
    for _ in 0..200 {
        let mut buf = packed.clone();
        let bit = rng.gen_range(0..total_bits);
        buf[bit / 8] ^= 1u8 << (7 - (bit % 8));
        // Flips inside the payload can still decode to other bytes; the
        // decoder only has to fail cleanly or produce output.
        let _ = decompress(&buf);
    }
}

#[test]
fn random_garbage_never_panics() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let len = rng.gen_range(0..64);
        let junk: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let _ = decompress(&junk);
    }
}
