//! ICO container encoder
//!
//! The modern PNG-in-ICO layout: a 6-byte ICONDIR header, one 16-byte
//! directory entry per resolution, then the PNG payloads back to back.
//! Entry offsets must equal the running sum of preceding payload lengths
//! exactly; any drift produces an unreadable container.

use crate::error::Result;
use crate::resize::ResizeProvider;

/// Resolutions packed into the container, in directory order
pub const SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Build the `.ico` container from the encoded master image
pub fn encode(master_png: &[u8], provider: &dyn ResizeProvider) -> Result<Vec<u8>> {
    let mut payloads = Vec::with_capacity(SIZES.len());
    for size in SIZES {
        payloads.push(provider.resize(master_png, size)?);
    }

    let count = SIZES.len();
    let mut out = Vec::new();
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // resource type: icon
    out.extend_from_slice(&(count as u16).to_le_bytes());

    let mut offset = 6 + 16 * count;
    for (size, payload) in SIZES.iter().zip(&payloads) {
        // the one-byte dimension fields encode 256 as 0
        let edge = if *size == 256 { 0 } else { *size as u8 };
        out.push(edge); // width
        out.push(edge); // height
        out.push(0); // palette size
        out.push(0); // reserved
        out.extend_from_slice(&1u16.to_le_bytes()); // color planes
        out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += payload.len();
    }
    for payload in &payloads {
        out.extend_from_slice(payload);
    }
    Ok(out)
}
