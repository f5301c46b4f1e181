//! TIFF and BigTIFF container parsing (metadata only)

pub mod endian;
pub mod ifd;
pub mod reader;
pub mod tags;
pub mod types;

pub use endian::ByteOrder;
pub use ifd::{IFDEntry, IFD};
pub use reader::TiffReader;
pub use tags::TagId;
pub use types::Tiff;

/// TIFF magic number (42)
pub const TIFF_MAGIC: u16 = 42;

/// BigTIFF magic number (43)
pub const BIGTIFF_MAGIC: u16 = 43;
