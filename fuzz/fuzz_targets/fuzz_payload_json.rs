//! Fuzz target: sensor payload decoding
//!
//! Feeds arbitrary bytes through the same path a sensor response takes and
//! verifies:
//! - No panics on any input
//! - A decoded payload either yields both channels or names the missing one
//! - Any channel pair that decodes converts to an on-scale AQI or a typed error
//!
//! cargo fuzz run fuzz_payload_json

#![no_main]

use aqimon::aqi::{convert, AQI_MAX};
use aqimon::error::PermanentError;
use aqimon::reading::RawPayload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = RawPayload::from_json(data) else {
        return;
    };
    match payload.channels() {
        Ok(pair) => {
            let _ = pair.confidence();
            if let Ok(aqi) = convert(pair.average()) {
                assert!(aqi <= AQI_MAX);
            }
        }
        Err(e) => assert!(matches!(e, PermanentError::MissingField(_))),
    }
});
