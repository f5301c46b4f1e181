//! Byte order (endianness) handling
//!
//! TIFF files declare their byte order in the first two bytes of the
//! header: "II" for little-endian, "MM" for big-endian. Every multi-byte
//! value in the file, including IFD entries and tag data, follows that
//! declared order.

use std::io::{self, Read};

use crate::error::{Error, Result};

/// Byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (least significant byte first)
    LittleEndian,
    /// Big-endian byte order (most significant byte first)
    BigEndian,
}

impl ByteOrder {
    /// Detects byte order from TIFF magic bytes
    pub fn from_tiff_magic(magic: [u8; 2]) -> Option<Self> {
        match &magic {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Reads the first two bytes of a TIFF stream and detects the byte order
    pub fn detect<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;
        Self::from_tiff_magic(magic)
            .ok_or_else(|| Error::InvalidByteOrder(u16::from_be_bytes(magic)))
    }

    /// Reads an unsigned 16-bit integer
    pub fn read_u16<R: Read>(&self, reader: &mut R) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(buf),
            ByteOrder::BigEndian => u16::from_be_bytes(buf),
        })
    }

    /// Reads an unsigned 32-bit integer
    pub fn read_u32<R: Read>(&self, reader: &mut R) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(buf),
            ByteOrder::BigEndian => u32::from_be_bytes(buf),
        })
    }

    /// Reads an unsigned 64-bit integer
    pub fn read_u64<R: Read>(&self, reader: &mut R) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(buf),
            ByteOrder::BigEndian => u64::from_be_bytes(buf),
        })
    }

    /// Reads a 32-bit floating point number
    pub fn read_f32<R: Read>(&self, reader: &mut R) -> io::Result<f32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(match self {
            ByteOrder::LittleEndian => f32::from_le_bytes(buf),
            ByteOrder::BigEndian => f32::from_be_bytes(buf),
        })
    }

    /// Reads a 64-bit floating point number
    pub fn read_f64<R: Read>(&self, reader: &mut R) -> io::Result<f64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(match self {
            ByteOrder::LittleEndian => f64::from_le_bytes(buf),
            ByteOrder::BigEndian => f64::from_be_bytes(buf),
        })
    }
}
