#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use imohash::ImoHasher;

fuzz_target!(|input: (u8, u16, u16, Vec<u8>)| {
    let (size, threshold, claimed, data) = input;
    let hasher = ImoHasher::with_params(size as usize, threshold as usize);
    let claimed = claimed as u64;
    let actual = data.len() as u64;

    let result = hasher.sum_source(&mut Cursor::new(&data), claimed);

    if claimed <= actual {
        // Verify: a prefix hashes like the buffer it is a prefix of
        let digest = result.expect("source holds every claimed byte");
        assert_eq!(digest, hasher.sum(&data[..claimed as usize]));
    } else {
        // Verify: a source that comes up short is reported, never padded
        let err = result.expect_err("end window lies past the data");
        assert!(err.is_short_read());
    }
});
