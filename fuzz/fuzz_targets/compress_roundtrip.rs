use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Some((&width, body)) = data.split_first() else {
                return;
            };
            let width = (width % 16) as usize + 1;
            match symhuff::compress(body, width) {
                Ok(packed) => {
                    let restored = symhuff::decompress(&packed).expect("own container must decode");
                    assert_eq!(restored, body);
                }
                Err(symhuff::SymhuffError::EmptyInput) => assert!(body.is_empty()),
                Err(e) => panic!("compress failed: {e}"),
            }
        });
    }
}
