#![no_main]

use libfuzzer_sys::fuzz_target;
use imohash::{ImoHasher, SampleConfig};

fuzz_target!(|data: Vec<u8>| {
    // Window sizes around the input length, plus the defaults
    let configs = vec![
        // Sampling off
        SampleConfig::new(0, 0),
        // Tiny windows, no threshold
        SampleConfig::new(1, 0),
        SampleConfig::new(3, 45),
        // Windows larger than most inputs
        SampleConfig::new(4096, 0),
        // Default config
        SampleConfig::default(),
    ];

    for config in configs {
        let hasher = ImoHasher::new(config);
        let digest = hasher.sum(&data);

        // Verify: determinism
        assert_eq!(digest, hasher.sum(&data));

        // Verify: windows never leave the input
        if let Some(windows) = hasher.strategy(data.len() as u64).windows() {
            for w in windows {
                assert!(w.end() <= data.len() as u64);
            }
        }

        // Verify: hex round trip
        assert_eq!(digest.to_hex().parse::<imohash::Digest>().unwrap(), digest);
    }
});
