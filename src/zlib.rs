//! Zlib inflate for Palworld `.sav` payloads (save types 0x31 and 0x32).
//!
//! Built on `flate2::Decompress` rather than `ZlibDecoder` so that the end of
//! the stream is decided by the decompressor itself: a truncated stream is an
//! error instead of a short read, and anything after the zlib trailer is left
//! untouched.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{Result, SavError};

/// Minimum amount of spare output space handed to the decompressor per call.
const CHUNK: usize = 16 * 1024;

/// Inflate one zlib stream.
///
/// * `compressed` – bytes starting at a zlib header; trailing bytes after the
///   stream's end are ignored.
///
/// An empty input is a corrupt stream, not an empty payload.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut z = Decompress::new(true);
    let mut out: Vec<u8> = Vec::with_capacity(compressed.len().saturating_mul(4).max(CHUNK));

    loop {
        if out.capacity() - out.len() < CHUNK {
            out.reserve(CHUNK.max(out.len()));
        }
        let in_before = z.total_in();
        let out_before = z.total_out();
        let offset = usize::try_from(in_before)
            .map_err(|_| SavError::CorruptStream("input offset overflow".into()))?;
        let input = compressed.get(offset..).unwrap_or(&[]);

        let status = z
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| SavError::CorruptStream(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                // Spare output space was available, so no progress means the input ran dry.
                if z.total_in() == in_before && z.total_out() == out_before {
                    return Err(SavError::CorruptStream(format!(
                        "truncated stream after {} of {} input bytes",
                        in_before,
                        compressed.len()
                    )));
                }
            }
        }
    }
}
