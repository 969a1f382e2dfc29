//! ICNS container encoder
//!
//! The macOS icon container: `icns` magic, a big-endian total length, then
//! one element per resolution, each a 4-byte type tag, a big-endian element
//! length (8 + payload) and a PNG payload. Elements are written smallest
//! size first; every size is requested from the resize provider, including
//! the master's own.

use crate::error::Result;
use crate::resize::ResizeProvider;

/// Element types with PNG payloads, in the fixed ascending size order
pub const ENTRIES: [(&[u8; 4], u32); 7] = [
    (b"icp4", 16),
    (b"icp5", 32),
    (b"icp6", 64),
    (b"ic07", 128),
    (b"ic08", 256),
    (b"ic09", 512),
    (b"ic10", 1024),
];

/// Build the `.icns` container from the encoded master image
pub fn encode(master_png: &[u8], provider: &dyn ResizeProvider) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for (tag, size) in ENTRIES {
        let payload = provider.resize(master_png, size)?;
        body.extend_from_slice(tag);
        body.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
        body.extend_from_slice(&payload);
    }

    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(b"icns");
    out.extend_from_slice(&((8 + body.len()) as u32).to_be_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}
