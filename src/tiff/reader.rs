//! TIFF metadata reader
//!
//! Parses the container structure of classic TIFF and BigTIFF files in
//! either byte order: header, IFD chain and tag values. Only metadata is
//! touched; image data is never decoded.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

use super::endian::ByteOrder;
use super::ifd::{IFDEntry, IFD};
use super::tags::field_types;
use super::types::Tiff;
use super::{BIGTIFF_MAGIC, TIFF_MAGIC};

/// Reads TIFF structure and tag values from a file
pub struct TiffReader {
    reader: BufReader<File>,
    byte_order: ByteOrder,
    is_big_tiff: bool,
}

impl TiffReader {
    /// Opens a TIFF file and validates its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let byte_order = ByteOrder::detect(&mut reader)?;
        let magic = byte_order.read_u16(&mut reader)?;

        let is_big_tiff = match magic {
            TIFF_MAGIC => false,
            BIGTIFF_MAGIC => true,
            _ => return Err(Error::InvalidMagic(magic)),
        };

        if is_big_tiff {
            let offset_size = byte_order.read_u16(&mut reader)?;
            if offset_size != 8 {
                return Err(Error::InvalidFormat(format!(
                    "Invalid BigTIFF offset size: {}",
                    offset_size
                )));
            }
            let _reserved = byte_order.read_u16(&mut reader)?;
        }

        Ok(Self {
            reader,
            byte_order,
            is_big_tiff,
        })
    }

    /// Returns the detected byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns whether this is a BigTIFF file
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Reads the IFD chain and returns the TIFF structure
    pub fn read(&mut self) -> Result<Tiff> {
        let mut tiff = Tiff::new(self.is_big_tiff);
        let mut next_ifd_offset = self.read_first_ifd_offset()?;
        let mut ifd_number = 0;

        while next_ifd_offset != 0 {
            if ifd_number > 1000 {
                return Err(Error::InvalidFormat("Too many IFDs".to_string()));
            }

            let ifd = self.read_ifd(ifd_number, next_ifd_offset)?;
            let entries_end = self.entries_end(next_ifd_offset, ifd.entry_count() as u64);

            next_ifd_offset = self.read_offset_at(entries_end)?;
            tiff.add_ifd(ifd);
            ifd_number += 1;
        }

        Ok(tiff)
    }

    /// Reads tag values as f64 array
    ///
    /// Accepts DOUBLE and FLOAT fields; FLOAT values are widened to f64.
    pub fn read_tag_doubles(&mut self, entry: &IFDEntry) -> Result<Vec<f64>> {
        let order = self.byte_order;
        let read_one = |order: ByteOrder, mut r: &mut dyn Read| -> Result<f64> {
            match entry.field_type {
                field_types::DOUBLE => Ok(order.read_f64(&mut r)?),
                field_types::FLOAT => Ok(order.read_f32(&mut r)? as f64),
                other => Err(Error::InvalidFormat(format!(
                    "Tag {} holds field type {}, expected DOUBLE or FLOAT",
                    entry.tag, other
                ))),
            }
        };

        if entry.is_inline(self.is_big_tiff) {
            let mut cursor = Cursor::new(self.inline_bytes(entry));
            (0..entry.count)
                .map(|_| read_one(order, &mut cursor))
                .collect()
        } else {
            self.reader.seek(SeekFrom::Start(entry.value_offset))?;
            (0..entry.count)
                .map(|_| read_one(order, &mut self.reader))
                .collect()
        }
    }

    /// Reads tag values as u16 array
    pub fn read_tag_u16s(&mut self, entry: &IFDEntry) -> Result<Vec<u16>> {
        if entry.field_type != field_types::SHORT {
            return Err(Error::InvalidFormat(format!(
                "Tag {} holds field type {}, expected SHORT",
                entry.tag, entry.field_type
            )));
        }

        let order = self.byte_order;
        if entry.is_inline(self.is_big_tiff) {
            let mut cursor = Cursor::new(self.inline_bytes(entry));
            (0..entry.count)
                .map(|_| Ok(order.read_u16(&mut cursor)?))
                .collect()
        } else {
            self.reader.seek(SeekFrom::Start(entry.value_offset))?;
            (0..entry.count)
                .map(|_| Ok(order.read_u16(&mut self.reader)?))
                .collect()
        }
    }

    /// Reads ASCII string from tag, trimming trailing NULs
    pub fn read_tag_ascii(&mut self, entry: &IFDEntry) -> Result<String> {
        if entry.field_type != field_types::ASCII {
            return Err(Error::InvalidFormat(format!(
                "Tag {} holds field type {}, expected ASCII",
                entry.tag, entry.field_type
            )));
        }

        let mut bytes;
        if entry.is_inline(self.is_big_tiff) {
            let inline = self.inline_bytes(entry);
            bytes = inline[..entry.count as usize].to_vec();
        } else {
            // Validate the declared size against the file before allocating;
            // the count field is attacker-controlled.
            let file_len = self.reader.get_ref().metadata()?.len();
            if entry.count > file_len.saturating_sub(entry.value_offset) {
                return Err(Error::InvalidFormat(format!(
                    "Tag {} declares {} bytes past end of file",
                    entry.tag, entry.count
                )));
            }
            bytes = vec![0u8; entry.count as usize];
            self.reader.seek(SeekFrom::Start(entry.value_offset))?;
            self.reader.read_exact(&mut bytes)?;
        }

        Ok(String::from_utf8_lossy(&bytes)
            .trim_end_matches('\0')
            .to_string())
    }

    /// Reconstructs the raw file bytes of an inline value field.
    ///
    /// The value_offset was widened to u64 by reading it in the file's
    /// byte order, so the original bytes come back by encoding it the
    /// same way at the field's original width.
    fn inline_bytes(&self, entry: &IFDEntry) -> Vec<u8> {
        if self.is_big_tiff {
            match self.byte_order {
                ByteOrder::LittleEndian => entry.value_offset.to_le_bytes().to_vec(),
                ByteOrder::BigEndian => entry.value_offset.to_be_bytes().to_vec(),
            }
        } else {
            let value = entry.value_offset as u32;
            match self.byte_order {
                ByteOrder::LittleEndian => value.to_le_bytes().to_vec(),
                ByteOrder::BigEndian => value.to_be_bytes().to_vec(),
            }
        }
    }

    /// Reads the first IFD offset following the header
    fn read_first_ifd_offset(&mut self) -> Result<u64> {
        let order = self.byte_order;
        if self.is_big_tiff {
            Ok(order.read_u64(&mut self.reader)?)
        } else {
            Ok(order.read_u32(&mut self.reader)? as u64)
        }
    }

    /// Reads an IFD offset stored at the given file position
    fn read_offset_at(&mut self, position: u64) -> Result<u64> {
        self.reader.seek(SeekFrom::Start(position))?;
        let order = self.byte_order;
        if self.is_big_tiff {
            Ok(order.read_u64(&mut self.reader)?)
        } else {
            Ok(order.read_u32(&mut self.reader)? as u64)
        }
    }

    /// Returns the file position of the next-IFD pointer
    fn entries_end(&self, ifd_offset: u64, entry_count: u64) -> u64 {
        let entry_size = if self.is_big_tiff { 20 } else { 12 };
        let header_size = if self.is_big_tiff { 8 } else { 2 };
        ifd_offset + header_size + entry_count * entry_size
    }

    /// Reads a single IFD at the given offset
    fn read_ifd(&mut self, number: usize, offset: u64) -> Result<IFD> {
        self.reader.seek(SeekFrom::Start(offset))?;
        let order = self.byte_order;

        let entry_count = if self.is_big_tiff {
            order.read_u64(&mut self.reader)?
        } else {
            order.read_u16(&mut self.reader)? as u64
        };

        let mut ifd = IFD::new(number, offset);

        for _ in 0..entry_count {
            let tag = order.read_u16(&mut self.reader)?;
            let field_type = order.read_u16(&mut self.reader)?;

            let count = if self.is_big_tiff {
                order.read_u64(&mut self.reader)?
            } else {
                order.read_u32(&mut self.reader)? as u64
            };

            let value_offset = if self.is_big_tiff {
                order.read_u64(&mut self.reader)?
            } else {
                order.read_u32(&mut self.reader)? as u64
            };

            ifd.add_entry(IFDEntry::new(tag.into(), field_type, count, value_offset));
        }

        Ok(ifd)
    }
}
