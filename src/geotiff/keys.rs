//! GeoTIFF key identifiers and value types
//!
//! Geo keys form their own id space defined by the GeoTIFF specification,
//! separate from raw TIFF tag ids. See OGC GeoTIFF 1.1, requirements class
//! GeoKeyDirectoryTag.

use std::fmt;

/// Identifier of a GeoTIFF key.
///
/// Not interchangeable with [`TagId`](crate::tiff::TagId): geo keys address
/// entries inside the GeoKeyDirectory, not entries of the TIFF IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoKeyId(pub u16);

impl From<u16> for GeoKeyId {
    fn from(code: u16) -> Self {
        GeoKeyId(code)
    }
}

impl fmt::Display for GeoKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// GTModelTypeGeoKey
pub const GT_MODEL_TYPE: GeoKeyId = GeoKeyId(1024);

/// GTRasterTypeGeoKey
pub const GT_RASTER_TYPE: GeoKeyId = GeoKeyId(1025);

/// GTCitationGeoKey
pub const GT_CITATION: GeoKeyId = GeoKeyId(1026);

/// GeographicTypeGeoKey
pub const GEOGRAPHIC_TYPE: GeoKeyId = GeoKeyId(2048);

/// GeogCitationGeoKey
pub const GEOG_CITATION: GeoKeyId = GeoKeyId(2049);

/// GeogAngularUnitsGeoKey
pub const GEOG_ANGULAR_UNITS: GeoKeyId = GeoKeyId(2054);

/// GeogInvFlatteningGeoKey
pub const GEOG_INV_FLATTENING: GeoKeyId = GeoKeyId(2059);

/// ProjectedCSTypeGeoKey
pub const PROJECTED_CS_TYPE: GeoKeyId = GeoKeyId(3072);

/// ProjLinearUnitsGeoKey
pub const PROJ_LINEAR_UNITS: GeoKeyId = GeoKeyId(3076);

/// VerticalCSTypeGeoKey
pub const VERTICAL_CS_TYPE: GeoKeyId = GeoKeyId(4096);

/// Returns the name of a GeoTIFF key
pub fn key_name(key: GeoKeyId) -> &'static str {
    match key {
        GT_MODEL_TYPE => "GTModelType",
        GT_RASTER_TYPE => "GTRasterType",
        GT_CITATION => "GTCitation",
        GEOGRAPHIC_TYPE => "GeographicType",
        GEOG_CITATION => "GeogCitation",
        GEOG_ANGULAR_UNITS => "GeogAngularUnits",
        GEOG_INV_FLATTENING => "GeogInvFlattening",
        PROJECTED_CS_TYPE => "ProjectedCSType",
        PROJ_LINEAR_UNITS => "ProjLinearUnits",
        VERTICAL_CS_TYPE => "VerticalCSType",
        _ => "Unknown",
    }
}

/// Storage type of a geo key's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoKeyType {
    /// 16-bit unsigned integers, stored inline or in the directory tail
    Short,
    /// 64-bit floats, stored in GeoDoubleParams
    Double,
    /// Characters, stored in GeoAsciiParams
    Ascii,
}

impl GeoKeyType {
    /// Returns the name of this value type
    pub fn name(&self) -> &'static str {
        match self {
            GeoKeyType::Short => "SHORT",
            GeoKeyType::Double => "DOUBLE",
            GeoKeyType::Ascii => "ASCII",
        }
    }
}

/// Metadata of a geo key: how many values it holds and of which type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyInfo {
    /// Number of values stored under the key
    pub count: u16,
    /// Storage type of the values
    pub value_type: GeoKeyType,
}

/// Value stored under a geo key
#[derive(Debug, Clone, PartialEq)]
pub enum GeoKeyValue {
    /// 16-bit unsigned integers
    Short(Vec<u16>),
    /// 64-bit floats
    Double(Vec<f64>),
    /// ASCII string, separators trimmed
    Ascii(String),
}

impl fmt::Display for GeoKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoKeyValue::Short(v) if v.len() == 1 => write!(f, "{}", v[0]),
            GeoKeyValue::Short(v) => write!(f, "{:?}", v),
            GeoKeyValue::Double(v) if v.len() == 1 => write!(f, "{}", v[0]),
            GeoKeyValue::Double(v) => write!(f, "{:?}", v),
            GeoKeyValue::Ascii(s) => write!(f, "{}", s.replace('\n', "\\n")),
        }
    }
}
