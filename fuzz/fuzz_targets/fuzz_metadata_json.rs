#![no_main]

use libfuzzer_sys::fuzz_target;
use maschine_meta::MetadataRecord;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(record) = MetadataRecord::from_json(s) {
            let _ = maschine_codec::build_id3_chunk(&record);
        }
    }
});
