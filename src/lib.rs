//! rastermeta - GeoTIFF metadata reader
//!
//! rastermeta opens GeoTIFF-tagged raster files and answers read-only
//! metadata queries: individual geo keys, key metadata, and raw floating
//! point tag fields. Pixel data is never decoded.
//!
//! # Examples
//!
//! ```no_run
//! use rastermeta::{GeoImageReader, GeoKeyId, tiff::tags};
//!
//! let mut reader = GeoImageReader::new();
//! reader.open("image.tif")?;
//!
//! let model_type = reader.geo_key(GeoKeyId(1024))?;
//! println!("Model type: {}", model_type);
//!
//! let scale = reader.geo_field(tags::MODEL_PIXEL_SCALE)?;
//! println!("Pixel scale: {:?}", scale);
//! # Ok::<(), rastermeta::Error>(())
//! ```

pub mod error;
pub mod geotiff;
pub mod reader;
pub mod tiff;

pub use error::{Error, Result};
pub use geotiff::{GeoKeyDirectory, GeoKeyId, GeoKeyInfo, GeoKeyType, GeoKeyValue};
pub use reader::GeoImageReader;
pub use tiff::{ByteOrder, TagId, Tiff, TiffReader, IFD, IFDEntry};
