//! Constants of the NISound binary layout.

use maschine_meta::DeviceType;

/// Tag string identifying an NISound soundinfo payload.
pub const NISOUND_TAG: &[u8] = b"com.native-instruments.nisound.soundinfo\0";

/// Version written to the `verl` and `verm` properties.
pub const PLUGIN_VERSION: &str = "1.7.14";

/// Device flag written for loops.
pub const DEVICE_FLAG_LOOP: u32 = 4;

/// Device flag written for one-shots.
pub const DEVICE_FLAG_ONESHOT: u32 = 3;

/// A named constant region whose meaning is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueBlock {
    /// Name used in warnings.
    pub name: &'static str,
    /// Expected bytes.
    pub bytes: &'static [u8],
}

/// Follows the tag string.
pub const BLOCK_A: OpaqueBlock = OpaqueBlock {
    name: "block_a",
    bytes: &[
        0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
};

/// Follows the comment string.
pub const BLOCK_B: OpaqueBlock = OpaqueBlock {
    name: "block_b",
    bytes: &[
        0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
};

/// Follows the device flag.
pub const BLOCK_C: OpaqueBlock = OpaqueBlock {
    name: "block_c",
    bytes: &[0x01, 0x00, 0x00, 0x00],
};

/// Follows the category list.
pub const BLOCK_D: OpaqueBlock = OpaqueBlock {
    name: "block_d",
    bytes: &[0x00, 0x00, 0x00, 0x00],
};

/// All opaque blocks in payload order.
pub const OPAQUE_BLOCKS: [OpaqueBlock; 4] = [BLOCK_A, BLOCK_B, BLOCK_C, BLOCK_D];

/// Device flag for a device type.
pub fn device_flag(device_type: DeviceType) -> u32 {
    match device_type {
        DeviceType::Loop => DEVICE_FLAG_LOOP,
        DeviceType::OneShot => DEVICE_FLAG_ONESHOT,
    }
}
