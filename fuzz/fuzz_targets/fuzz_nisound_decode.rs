#![no_main]

use libfuzzer_sys::fuzz_target;
use maschine_codec::geob::{Id3Frame, SOUNDINFO_PREFIX};
use maschine_codec::nisound::{decode_nisound, NISOUND_TAG};

fuzz_target!(|data: &[u8]| {
    // Prepend a valid header so the fuzzer spends its time in the body layout.
    let mut payload = SOUNDINFO_PREFIX.to_vec();
    payload.extend_from_slice(NISOUND_TAG);
    payload.extend_from_slice(data);
    let _ = decode_nisound(&Id3Frame::geob(payload));
});
