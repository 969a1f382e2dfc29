//! Minimal PNG codec
//!
//! The encoder emits exactly the layout external viewers expect: the 8-byte
//! signature, an IHDR chunk, a single IDAT chunk holding the zlib stream of
//! filter-0 scanlines at maximum compression, and an empty IEND, with a
//! CRC-32 over type and payload on every chunk.
//!
//! The decoder accepts the same class of files back (8-bit RGBA,
//! non-interlaced, any of the five standard scanline filters). It exists
//! for the round-trip tests and the in-process resizer; it is not a general
//! PNG reader.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// Fixed 8-byte PNG signature
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// A decoded 8-bit RGBA image, row-major
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(payload);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Encode a row-major RGBA buffer as a PNG
///
/// `pixels` must hold `width * height * 4` interleaved bytes. Each scanline
/// is written with filter type 0 (none) and the whole stream is deflated at
/// the best compression level.
pub fn encode(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
    let stride = width as usize * 4;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    for row in pixels.chunks(stride) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    let compressed = encoder.finish()?;

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // depth 8, color type 6 (RGBA), compression 0, filter 0, interlace 0
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&SIGNATURE);
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", &compressed);
    push_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decode an 8-bit RGBA non-interlaced PNG
///
/// Verifies the signature and every chunk CRC, concatenates the IDAT
/// stream, inflates it and reverses the scanline filters. Ancillary chunks
/// are skipped.
pub fn decode(bytes: &[u8]) -> Result<Image> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(Error::InvalidImage("bad signature".into()));
    }

    let mut pos = SIGNATURE.len();
    let mut header: Option<(u32, u32)> = None;
    let mut idat = Vec::new();
    let mut saw_end = false;
    while pos + 8 <= bytes.len() {
        let len = be_u32(&bytes[pos..pos + 4]) as usize;
        if pos + 12 + len > bytes.len() {
            return Err(Error::InvalidImage("truncated chunk".into()));
        }
        let tag = [bytes[pos + 4], bytes[pos + 5], bytes[pos + 6], bytes[pos + 7]];
        let payload = &bytes[pos + 8..pos + 8 + len];
        let crc = be_u32(&bytes[pos + 8 + len..pos + 12 + len]);
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&tag);
        hasher.update(payload);
        if hasher.finalize() != crc {
            return Err(Error::InvalidImage(format!(
                "CRC mismatch in {} chunk",
                String::from_utf8_lossy(&tag)
            )));
        }
        match &tag {
            b"IHDR" => {
                if len != 13 {
                    return Err(Error::InvalidImage("malformed IHDR".into()));
                }
                if payload[8] != 8 || payload[9] != 6 {
                    return Err(Error::InvalidImage("only 8-bit RGBA is supported".into()));
                }
                if payload[12] != 0 {
                    return Err(Error::InvalidImage("interlaced images are not supported".into()));
                }
                header = Some((be_u32(&payload[0..4]), be_u32(&payload[4..8])));
            }
            b"IDAT" => idat.extend_from_slice(payload),
            b"IEND" => {
                saw_end = true;
                break;
            }
            _ => {}
        }
        pos += 12 + len;
    }
    if !saw_end {
        return Err(Error::InvalidImage("missing IEND".into()));
    }

    let (width, height) = header.ok_or_else(|| Error::InvalidImage("missing IHDR".into()))?;
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage("zero-sized image".into()));
    }

    let mut raw = Vec::new();
    ZlibDecoder::new(idat.as_slice()).read_to_end(&mut raw)?;
    let stride = width as usize * 4;
    if raw.len() != (stride + 1) * height as usize {
        return Err(Error::InvalidImage("scanline data size mismatch".into()));
    }

    let pixels = unfilter(&raw, width, height)?;
    Ok(Image {
        width,
        height,
        pixels,
    })
}

/// Reverse the per-scanline filters (types 0 through 4, 4 bytes per pixel)
fn unfilter(raw: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let stride = width as usize * 4;
    let mut out = vec![0u8; stride * height as usize];
    for y in 0..height as usize {
        let filter = raw[y * (stride + 1)];
        let line = &raw[y * (stride + 1) + 1..(y + 1) * (stride + 1)];
        for i in 0..stride {
            let x = line[i];
            let left = if i >= 4 { out[y * stride + i - 4] } else { 0 };
            let up = if y > 0 { out[(y - 1) * stride + i] } else { 0 };
            let up_left = if y > 0 && i >= 4 {
                out[(y - 1) * stride + i - 4]
            } else {
                0
            };
            let value = match filter {
                0 => x,
                1 => x.wrapping_add(left),
                2 => x.wrapping_add(up),
                3 => x.wrapping_add(((left as u16 + up as u16) / 2) as u8),
                4 => x.wrapping_add(paeth(left, up, up_left)),
                t => return Err(Error::InvalidImage(format!("unknown filter type {t}"))),
            };
            out[y * stride + i] = value;
        }
    }
    Ok(out)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
