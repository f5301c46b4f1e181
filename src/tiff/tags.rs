//! TIFF tag identifiers and constants

use std::fmt;

/// Identifier of a raw TIFF tag.
///
/// Raw tags and GeoTIFF keys live in two distinct integer id spaces: tags
/// address entries of the IFD itself, while [`GeoKeyId`](crate::geotiff::GeoKeyId)
/// addresses entries of the key directory embedded in the
/// [`GEO_KEY_DIRECTORY`] tag. The two must never be mixed up, so both are
/// separate newtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub u16);

impl From<u16> for TagId {
    fn from(code: u16) -> Self {
        TagId(code)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image width in pixels
pub const IMAGE_WIDTH: TagId = TagId(256);

/// Image height in pixels
pub const IMAGE_LENGTH: TagId = TagId(257);

/// Bits per sample
pub const BITS_PER_SAMPLE: TagId = TagId(258);

/// Compression scheme
pub const COMPRESSION: TagId = TagId(259);

/// Samples per pixel
pub const SAMPLES_PER_PIXEL: TagId = TagId(277);

/// GeoTIFF ModelPixelScaleTag
pub const MODEL_PIXEL_SCALE: TagId = TagId(33550);

/// GeoTIFF ModelTiepointTag
pub const MODEL_TIEPOINT: TagId = TagId(33922);

/// GeoTIFF ModelTransformationTag
pub const MODEL_TRANSFORMATION: TagId = TagId(34264);

/// GeoTIFF GeoKeyDirectoryTag
pub const GEO_KEY_DIRECTORY: TagId = TagId(34735);

/// GeoTIFF GeoDoubleParamsTag
pub const GEO_DOUBLE_PARAMS: TagId = TagId(34736);

/// GeoTIFF GeoAsciiParamsTag
pub const GEO_ASCII_PARAMS: TagId = TagId(34737);

/// Returns the name of a TIFF tag
pub fn tag_name(tag: TagId) -> &'static str {
    match tag {
        IMAGE_WIDTH => "ImageWidth",
        IMAGE_LENGTH => "ImageLength",
        BITS_PER_SAMPLE => "BitsPerSample",
        COMPRESSION => "Compression",
        SAMPLES_PER_PIXEL => "SamplesPerPixel",
        MODEL_PIXEL_SCALE => "ModelPixelScale",
        MODEL_TIEPOINT => "ModelTiepoint",
        MODEL_TRANSFORMATION => "ModelTransformation",
        GEO_KEY_DIRECTORY => "GeoKeyDirectory",
        GEO_DOUBLE_PARAMS => "GeoDoubleParams",
        GEO_ASCII_PARAMS => "GeoAsciiParams",
        _ => "Unknown",
    }
}

/// Field type constants
pub mod field_types {
    /// BYTE (8-bit unsigned)
    pub const BYTE: u16 = 1;

    /// ASCII string
    pub const ASCII: u16 = 2;

    /// SHORT (16-bit unsigned)
    pub const SHORT: u16 = 3;

    /// LONG (32-bit unsigned)
    pub const LONG: u16 = 4;

    /// RATIONAL (two LONGs: numerator, denominator)
    pub const RATIONAL: u16 = 5;

    /// SBYTE (8-bit signed)
    pub const SBYTE: u16 = 6;

    /// UNDEFINED (8-bit)
    pub const UNDEFINED: u16 = 7;

    /// SSHORT (16-bit signed)
    pub const SSHORT: u16 = 8;

    /// SLONG (32-bit signed)
    pub const SLONG: u16 = 9;

    /// SRATIONAL (two SLONGs)
    pub const SRATIONAL: u16 = 10;

    /// FLOAT (32-bit IEEE float)
    pub const FLOAT: u16 = 11;

    /// DOUBLE (64-bit IEEE double)
    pub const DOUBLE: u16 = 12;

    /// LONG8 (64-bit unsigned, BigTIFF)
    pub const LONG8: u16 = 16;

    /// SLONG8 (64-bit signed, BigTIFF)
    pub const SLONG8: u16 = 17;

    /// IFD8 (64-bit IFD offset, BigTIFF)
    pub const IFD8: u16 = 18;
}

/// Returns the name of a field type
pub fn field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::LONG8 => "LONG8",
        field_types::SLONG8 => "SLONG8",
        field_types::IFD8 => "IFD8",
        _ => "Unknown",
    }
}
