//! Error taxonomy for `.sav` container decoding.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout palsav.
pub type Result<T> = std::result::Result<T, SavError>;

/// Which header length check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthStage {
    /// After the first inflate pass of a double-zlib container.
    Intermediate,
    /// After the last inflate pass.
    Final,
}

impl fmt::Display for LengthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthStage::Intermediate => f.write_str("intermediate"),
            LengthStage::Final => f.write_str("final"),
        }
    }
}

/// Everything that can go wrong while turning a `.sav` into GVAS bytes.
///
/// ```text
///   SavError
///   ├── TruncatedHeader   ← fewer than 12 bytes
///   ├── UnknownSaveType   ← top magic byte is not 0x31 / 0x32
///   ├── CorruptStream     ← zlib header, data, checksum or truncation error
///   ├── LengthMismatch    ← header length disagrees with inflated length
///   ├── Io                ← reading the file failed
///   └── File              ← decode failure with the path attached
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SavError {
    #[error("SAV file too small: {len} bytes, header needs 12")]
    TruncatedHeader { len: usize },

    #[error("unknown save type byte 0x{0:02X}")]
    UnknownSaveType(u8),

    #[error("corrupt zlib stream: {0}")]
    CorruptStream(String),

    /// `expected` is the value declared in the header, `actual` the number of
    /// bytes the inflate pass produced.
    #[error("incorrect {stage} length: header says {expected}, got {actual}")]
    LengthMismatch {
        expected: u32,
        actual: usize,
        stage: LengthStage,
    },

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decompress {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<SavError>,
    },
}

impl SavError {
    /// The underlying error with any path context peeled off.
    pub fn root(&self) -> &SavError {
        match self {
            SavError::File { source, .. } => source.root(),
            other => other,
        }
    }
}
