//! NISound soundinfo record codec.
//!
//! The payload is a fixed binary layout:
//!
//! ```text
//! 00 00 00 | "com.native-instruments.nisound.soundinfo\0" | block A
//! name | author | vendor | comment                       (UCS-2 strings)
//! block B | device flag (u32 LE) | block C
//! bankchain | categories                                  (UCS-2 string arrays)
//! block D | properties                                    (key/value pairs)
//! ```
//!
//! The opaque blocks are reproduced byte-for-byte on encode and checked on
//! decode. A mismatch is reported as a [`CompatibilityWarning`] and decoding
//! carries on with the fixed layout.
//!
//! [`CompatibilityWarning`]: crate::error::CompatibilityWarning

mod decode;
mod encode;
mod layout;

#[cfg(test)]
mod tests;

// Re-export public API
pub use decode::{decode_nisound, decode_nisound_payload, is_nisound_frame, NiSoundInfo};
pub use encode::{build_nisound_frame, encode_nisound_payload, properties_for};
pub use layout::{
    device_flag, OpaqueBlock, BLOCK_A, BLOCK_B, BLOCK_C, BLOCK_D, DEVICE_FLAG_LOOP,
    DEVICE_FLAG_ONESHOT, NISOUND_TAG, OPAQUE_BLOCKS, PLUGIN_VERSION,
};
