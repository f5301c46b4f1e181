//! GeoTIFF key directory support (OGC GeoTIFF 1.1)

pub mod directory;
pub mod keys;

pub use directory::{GeoKeyDirectory, GeoKeyEntry};
pub use keys::{GeoKeyId, GeoKeyInfo, GeoKeyType, GeoKeyValue};
