//! Decoder for Palworld / Unreal Engine `.sav` containers.
//!
//! `decode` turns the bytes of a `.sav` into the GVAS stream inside it;
//! `decompress_sav_file` does the same for a path on disk.

mod error;
mod sav;
mod zlib;

use std::fs;
use std::path::Path;

pub use error::{LengthStage, Result, SavError};
pub use sav::{decode, DecodedSav, SavHeader, SaveType};
pub use zlib::inflate;

/// Read a `.sav` from disk and decode it.
///
/// Read failures come back as `SavError::Io`; decode failures are wrapped in
/// `SavError::File` with the path attached (use `SavError::root` to get at
/// the original kind).
pub fn decompress_sav_file(path: impl AsRef<Path>) -> Result<DecodedSav> {
  let path = path.as_ref();
  let data = fs::read(path).map_err(|source| {
    log::warn!("read {:?}: {source}", path);
    SavError::Io { path: path.to_path_buf(), source }
  })?;

  match decode(&data) {
    Ok(sav) => {
      log::debug!(
        "Decompressed {:?}: {}, {} -> {} bytes",
        path,
        sav.save_type(),
        data.len(),
        sav.gvas().len()
      );
      Ok(sav)
    }
    Err(e) => {
      log::warn!("Failed to decompress {:?}: {e}", path);
      Err(SavError::File { path: path.to_path_buf(), source: Box::new(e) })
    }
  }
}
