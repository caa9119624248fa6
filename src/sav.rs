//! `.sav` container decoding.
//!
//! A Palworld `.sav` is a 12-byte header followed by one or two nested zlib
//! streams:
//!
//! ```text
//!   [0..4)   u32 LE  uncompressed (GVAS) length
//!   [4..8)   u32 LE  compressed length (length after pass 1 for 0x32)
//!   [8..12)  u32 LE  magic: top byte = save type, low 3 bytes = format marker ("PlZ")
//!   [12..)           zlib payload
//! ```
//!
//! Save types:
//!   - `0x31` – single zlib
//!   - `0x32` – double zlib (zlib of a zlib stream)

use byteorder::{LittleEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Cursor};

use crate::error::{LengthStage, Result, SavError};
use crate::zlib;

// ── Save type ────────────────────────────────────────────

/// Compression scheme selected by the top byte of the header magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveType {
    SingleZlib,
    DoubleZlib,
}

impl SaveType {
    pub fn from_byte(value: u8) -> Option<SaveType> {
        match value {
            0x31 => Some(SaveType::SingleZlib),
            0x32 => Some(SaveType::DoubleZlib),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            SaveType::SingleZlib => 0x31,
            SaveType::DoubleZlib => 0x32,
        }
    }

    /// Number of zlib passes needed to reach the GVAS bytes.
    pub fn inflate_passes(self) -> usize {
        match self {
            SaveType::SingleZlib => 1,
            SaveType::DoubleZlib => 2,
        }
    }
}

impl fmt::Display for SaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveType::SingleZlib => write!(f, "single zlib (0x{:02X})", self.as_byte()),
            SaveType::DoubleZlib => write!(f, "double zlib (0x{:02X})", self.as_byte()),
        }
    }
}

// ── Header ───────────────────────────────────────────────

/// The fixed 12-byte header at the start of every `.sav`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavHeader {
    pub uncompressed_len: u32,
    pub compressed_len: u32,
    pub save_type: SaveType,
    /// Low three bytes of the magic, most significant first. A file whose bytes
    /// 8..11 read `PlZ` yields `b"ZlP"`.
    pub magic: [u8; 3],
}

impl SavHeader {
    pub const HEADER_LEN: usize = 12;

    /// Read the header without touching the payload.
    pub fn parse(data: &[u8]) -> Result<SavHeader> {
        if data.len() < Self::HEADER_LEN {
            return Err(SavError::TruncatedHeader { len: data.len() });
        }
        let mut cur = Cursor::new(&data[..Self::HEADER_LEN]);
        let truncated = |_: io::Error| SavError::TruncatedHeader { len: data.len() };
        let uncompressed_len = cur.read_u32::<LittleEndian>().map_err(truncated)?;
        let compressed_len = cur.read_u32::<LittleEndian>().map_err(truncated)?;
        let magic = cur.read_u32::<LittleEndian>().map_err(truncated)?;

        let type_byte = (magic >> 24) as u8;
        let save_type = SaveType::from_byte(type_byte).ok_or(SavError::UnknownSaveType(type_byte))?;

        Ok(SavHeader {
            uncompressed_len,
            compressed_len,
            save_type,
            magic: magic_bytes(magic),
        })
    }
}

/// Bits 16..24, 8..16 and 0..8 of the magic, in that order. This is not
/// the little-endian byte order the field is stored in.
fn magic_bytes(magic: u32) -> [u8; 3] {
    [(magic >> 16) as u8, (magic >> 8) as u8, magic as u8]
}

// ── Decoded container ────────────────────────────────────

/// A fully inflated `.sav`: the GVAS bytes plus what the header said about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSav {
    gvas: Vec<u8>,
    save_type: SaveType,
    magic: [u8; 3],
}

impl DecodedSav {
    pub fn gvas(&self) -> &[u8] {
        &self.gvas
    }

    pub fn save_type(&self) -> SaveType {
        self.save_type
    }

    pub fn magic(&self) -> [u8; 3] {
        self.magic
    }

    pub fn into_gvas(self) -> Vec<u8> {
        self.gvas
    }

    /// Whether the payload starts with Unreal's `GVAS` signature. Informational;
    /// `decode` never checks it.
    pub fn has_gvas_magic(&self) -> bool {
        self.gvas.starts_with(b"GVAS")
    }
}

/// Decompress a `.sav` buffer into GVAS bytes.
///
/// For `0x32` the first pass must yield exactly `compressed_len` bytes before
/// it is inflated again; in both cases the final length must equal
/// `uncompressed_len`.
pub fn decode(data: &[u8]) -> Result<DecodedSav> {
    let header = SavHeader::parse(data)?;
    let payload = &data[SavHeader::HEADER_LEN..];

    let mut gvas = zlib::inflate(payload)?;
    if header.save_type == SaveType::DoubleZlib {
        check_len(header.compressed_len, gvas.len(), LengthStage::Intermediate)?;
        gvas = zlib::inflate(&gvas)?;
    }
    check_len(header.uncompressed_len, gvas.len(), LengthStage::Final)?;

    Ok(DecodedSav {
        gvas,
        save_type: header.save_type,
        magic: header.magic,
    })
}

fn check_len(expected: u32, actual: usize, stage: LengthStage) -> Result<()> {
    if u64::from(expected) != actual as u64 {
        return Err(SavError::LengthMismatch {
            expected,
            actual,
            stage,
        });
    }
    Ok(())
}
