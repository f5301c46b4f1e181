//! GeoKeyDirectory parsing
//!
//! The GeoKeyDirectory tag holds a SHORT array: a four-value header
//! (version, revision, minor revision, key count) followed by one
//! four-value entry per key (key id, location, count, value offset).
//! A location of zero means the value sits directly in the offset slot;
//! otherwise location names the TIFF tag that stores the values and the
//! offset indexes into that tag's data. Values of type SHORT with more
//! than one element are stored in the tail of the directory array itself.

use std::fmt;

use log::warn;

use crate::error::{Error, Result};
use crate::tiff::{tags, TiffReader, IFD};

use super::keys::{self, GeoKeyId, GeoKeyInfo, GeoKeyType, GeoKeyValue};

/// One entry of the GeoKeyDirectory
#[derive(Debug, Clone)]
pub struct GeoKeyEntry {
    /// Key identifier
    pub id: GeoKeyId,
    /// Tag the values live in (0 for inline storage)
    pub location: u16,
    /// Number of values
    pub count: u16,
    /// Value, or offset into the storage tag
    pub value_offset: u16,
}

/// Parsed GeoTIFF key directory with its parameter storage
#[derive(Debug, Clone)]
pub struct GeoKeyDirectory {
    /// Directory version
    pub version: u16,
    /// Revision as (major, minor)
    pub revision: (u16, u16),
    entries: Vec<GeoKeyEntry>,
    /// Raw directory values, kept for trailing SHORT storage
    values: Vec<u16>,
    double_params: Vec<f64>,
    ascii_params: String,
}

impl GeoKeyDirectory {
    /// Parses the key directory of an IFD.
    ///
    /// Returns `Ok(None)` if the IFD carries no GeoKeyDirectory tag, which
    /// is the "plain TIFF, not a GeoTIFF" case.
    pub fn parse(ifd: &IFD, reader: &mut TiffReader) -> Result<Option<Self>> {
        let entry = match ifd.get_entry(tags::GEO_KEY_DIRECTORY) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let values = reader.read_tag_u16s(entry)?;

        let double_params = match ifd.get_entry(tags::GEO_DOUBLE_PARAMS) {
            Some(entry) => reader.read_tag_doubles(entry)?,
            None => Vec::new(),
        };
        let ascii_params = match ifd.get_entry(tags::GEO_ASCII_PARAMS) {
            Some(entry) => reader.read_tag_ascii(entry)?,
            None => String::new(),
        };

        Self::from_raw(values, double_params, ascii_params).map(Some)
    }

    /// Builds a directory from raw tag contents
    pub fn from_raw(
        values: Vec<u16>,
        double_params: Vec<f64>,
        ascii_params: String,
    ) -> Result<Self> {
        if values.len() < 4 {
            return Err(Error::InvalidFormat(
                "Truncated geo key directory header".to_string(),
            ));
        }

        let version = values[0];
        let revision = (values[1], values[2]);
        let key_count = values[3] as usize;

        if version != 1 {
            warn!("Unexpected geo key directory version {}", version);
        }

        if values.len() < 4 + key_count * 4 {
            return Err(Error::InvalidFormat(format!(
                "Geo key directory declares {} keys but holds {} values",
                key_count,
                values.len()
            )));
        }

        let entries = (0..key_count)
            .map(|i| {
                let offset = 4 + i * 4;
                GeoKeyEntry {
                    id: GeoKeyId(values[offset]),
                    location: values[offset + 1],
                    count: values[offset + 2],
                    value_offset: values[offset + 3],
                }
            })
            .collect();

        Ok(Self {
            version,
            revision,
            entries,
            values,
            double_params,
            ascii_params,
        })
    }

    /// Returns the number of keys in the directory
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the directory holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the key ids present in the directory
    pub fn keys(&self) -> impl Iterator<Item = GeoKeyId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Finds the directory entry for a key
    pub fn find(&self, id: GeoKeyId) -> Option<&GeoKeyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Returns value count and value type recorded for a key.
    ///
    /// `None` if the key is absent or its location does not name a known
    /// storage tag.
    pub fn key_info(&self, id: GeoKeyId) -> Option<GeoKeyInfo> {
        let entry = self.find(id)?;
        let value_type = Self::value_type(entry.location)?;
        Some(GeoKeyInfo {
            count: entry.count,
            value_type,
        })
    }

    /// Resolves the value stored under a key
    pub fn value(&self, id: GeoKeyId) -> Option<GeoKeyValue> {
        let entry = self.find(id)?;
        let start = entry.value_offset as usize;
        let end = start + entry.count as usize;

        if entry.location == 0 {
            return Some(GeoKeyValue::Short(vec![entry.value_offset]));
        }
        match Self::value_type(entry.location)? {
            GeoKeyType::Short => self
                .values
                .get(start..end)
                .map(|v| GeoKeyValue::Short(v.to_vec())),
            GeoKeyType::Double => self
                .double_params
                .get(start..end)
                .map(|v| GeoKeyValue::Double(v.to_vec())),
            GeoKeyType::Ascii => self.ascii_params.get(start..end).map(|s| {
                GeoKeyValue::Ascii(
                    s.trim_end_matches(|c| c == '|' || c == '\0').to_string(),
                )
            }),
        }
    }

    /// Returns the code of a SHORT-valued key.
    ///
    /// A key holding several SHORTs yields its first value; DOUBLE and
    /// ASCII keys have no code to return.
    pub fn key_code(&self, id: GeoKeyId) -> Option<u16> {
        match self.value(id)? {
            GeoKeyValue::Short(values) => values.first().copied(),
            _ => None,
        }
    }

    fn value_type(location: u16) -> Option<GeoKeyType> {
        match location {
            0 => Some(GeoKeyType::Short),
            l if l == tags::GEO_KEY_DIRECTORY.0 => Some(GeoKeyType::Short),
            l if l == tags::GEO_DOUBLE_PARAMS.0 => Some(GeoKeyType::Double),
            l if l == tags::GEO_ASCII_PARAMS.0 => Some(GeoKeyType::Ascii),
            _ => None,
        }
    }
}

impl fmt::Display for GeoKeyDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GeoKeyDirectory {{version: {}, revision: {}.{}, {} keys}}",
            self.version,
            self.revision.0,
            self.revision.1,
            self.entries.len()
        )?;
        for entry in &self.entries {
            match self.value(entry.id) {
                Some(value) => {
                    writeln!(f, "  {} ({}): {}", keys::key_name(entry.id), entry.id, value)?
                }
                None => writeln!(
                    f,
                    "  {} ({}): <unresolved, location {}>",
                    keys::key_name(entry.id),
                    entry.id,
                    entry.location
                )?,
            }
        }
        Ok(())
    }
}
