//! Binary encoders for the three artifact formats
//!
//! `png` writes (and, for tests and the built-in resizer, reads back) the
//! master raster image; `icns` and `ico` pack the multi-resolution
//! containers. All three assemble whole artifacts in memory.

pub mod icns;
pub mod ico;
pub mod png;
