#![no_main]

use libfuzzer_sys::fuzz_target;
use reqplot::summary::Summary;
use reqplot::timeline::Timeline;

fuzz_target!(|data: &[u8]| {
    // Loading and normalizing should fail cleanly, never panic
    if let Ok(summary) = Summary::from_slice(data, true) {
        let _ = Timeline::normalize(&summary.requests);
    }
});
