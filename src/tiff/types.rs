//! TIFF data structures

use std::fmt;

use super::ifd::IFD;
use super::tags;

/// Represents a TIFF or BigTIFF file
#[derive(Debug)]
pub struct Tiff {
    /// Whether this is BigTIFF format
    pub is_big_tiff: bool,
    /// Image File Directories
    pub ifds: Vec<IFD>,
}

impl Tiff {
    /// Creates a new TIFF structure
    pub fn new(is_big_tiff: bool) -> Self {
        Self {
            is_big_tiff,
            ifds: Vec::new(),
        }
    }

    /// Adds an IFD to this TIFF
    pub fn add_ifd(&mut self, ifd: IFD) {
        self.ifds.push(ifd);
    }

    /// Returns the main (first) IFD
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    /// Returns the number of IFDs
    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }
}

impl fmt::Display for Tiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File Information:")?;
        writeln!(
            f,
            "  Format: {}",
            if self.is_big_tiff { "BigTIFF" } else { "TIFF" }
        )?;
        writeln!(f, "  Number of IFDs: {}", self.ifds.len())?;

        if let Some(ifd) = self.main_ifd() {
            writeln!(f, "\nMain Image (IFD 0):")?;
            if let Some((width, height)) = ifd.dimensions() {
                writeln!(f, "  Dimensions: {} x {}", width, height)?;
            }
            writeln!(
                f,
                "  GeoTIFF: {}",
                if ifd.is_geotiff() { "Yes" } else { "No" }
            )?;

            if ifd.is_geotiff() {
                writeln!(f, "\nGeoTIFF Tags Found:")?;
                for tag in ifd.geotiff_tags() {
                    writeln!(
                        f,
                        "  Tag {}: {} ({} values)",
                        tag.tag,
                        tags::tag_name(tag.tag),
                        tag.count
                    )?;
                }
            }
        }

        Ok(())
    }
}
