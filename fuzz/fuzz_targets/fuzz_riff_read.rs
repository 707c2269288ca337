#![no_main]

use libfuzzer_sys::fuzz_target;
use maschine_codec::riff::{read_chunks, write_chunks, FourCc};

fuzz_target!(|data: &[u8]| {
    // Anything that reads cleanly must rebuild to a buffer that reads the same.
    if let Ok(chunks) = read_chunks(data, FourCc::WAVE) {
        let rebuilt = write_chunks(FourCc::WAVE, &chunks).expect("rebuild");
        assert_eq!(read_chunks(&rebuilt, FourCc::WAVE).expect("reread"), chunks);
    }
    let _ = maschine_codec::inspect_wav(data);
});
