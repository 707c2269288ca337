#![no_main]

use libfuzzer_sys::fuzz_target;
use maschine_codec::{decode_soundinfo, Id3Tag};

fuzz_target!(|data: &[u8]| {
    if let Ok(tag) = Id3Tag::parse(data) {
        let _ = decode_soundinfo(&tag);
    }
});
