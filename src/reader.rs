//! GeoTIFF reader session
//!
//! [`GeoImageReader`] owns at most one opened file at a time and answers
//! metadata queries against it. The reader is either unopened (no file,
//! every query fails with [`Error::NotOpen`]) or opened (TIFF handle and
//! parsed key directory both present). There is no in-between state: a
//! failed [`GeoImageReader::open`] releases anything it acquired and
//! leaves the reader unopened.

use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::geotiff::{GeoKeyDirectory, GeoKeyId, GeoKeyInfo, GeoKeyValue};
use crate::tiff::{TagId, TiffReader, IFD};

/// One opened file: the parsed key directory plus the TIFF handle it was
/// derived from.
///
/// Field order matters: fields drop in declaration order, so the key
/// directory is released before the TIFF handle it derives from.
struct Session {
    directory: GeoKeyDirectory,
    ifd: IFD,
    tiff: TiffReader,
}

/// Reader for GeoTIFF metadata of a single opened file
///
/// # Examples
///
/// ```no_run
/// use rastermeta::{GeoImageReader, GeoKeyId};
///
/// let mut reader = GeoImageReader::new();
/// reader.open("image.tif")?;
///
/// let epsg = reader.geo_key(GeoKeyId(3072))?;
/// println!("Projected CS: {}", epsg);
/// # Ok::<(), rastermeta::Error>(())
/// ```
#[derive(Default)]
pub struct GeoImageReader {
    session: Option<Session>,
}

impl GeoImageReader {
    /// Creates an unopened reader
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Returns whether a file is currently open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a file as a GeoTIFF.
    ///
    /// Fails with [`Error::NotATiff`] if the file does not parse as a
    /// TIFF, or [`Error::NotAGeoTiff`] if it parses but carries no usable
    /// GeoKeyDirectory. Either failure leaves the reader unopened with no
    /// file handle retained. Opening while a file is already open releases
    /// the previous file first.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.close();

        let mut tiff = TiffReader::open(path).map_err(Self::not_a_tiff)?;
        let parsed = tiff.read().map_err(Self::not_a_tiff)?;
        let ifd = parsed
            .main_ifd()
            .cloned()
            .ok_or_else(|| Error::NotATiff("No IFD present".to_string()))?;

        // A malformed key directory is reported the same as a missing one;
        // the TIFF handle acquired above drops on this return path.
        let directory = match GeoKeyDirectory::parse(&ifd, &mut tiff) {
            Ok(Some(directory)) => directory,
            Ok(None) => return Err(Error::NotAGeoTiff),
            Err(err) => {
                warn!("Rejecting {}: {}", path.display(), err);
                return Err(Error::NotAGeoTiff);
            }
        };

        debug!(
            "Opened {} with {} geo keys",
            path.display(),
            directory.len()
        );
        self.session = Some(Session {
            directory,
            ifd,
            tiff,
        });
        Ok(())
    }

    /// Closes the current file, if any. Idempotent.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!("Closed reader session");
        }
    }

    /// Returns value count and value type of a geo key
    pub fn geo_key_info(&self, key: GeoKeyId) -> Result<GeoKeyInfo> {
        let session = self.session.as_ref().ok_or(Error::NotOpen)?;
        session
            .directory
            .key_info(key)
            .ok_or(Error::KeyInfoUnavailable(key))
    }

    /// Returns the code stored under a geo key.
    ///
    /// SHORT keys yield their first value; DOUBLE and ASCII keys, like
    /// absent keys, fail with [`Error::KeyNotFound`].
    pub fn geo_key(&self, key: GeoKeyId) -> Result<u16> {
        let session = self.session.as_ref().ok_or(Error::NotOpen)?;
        session
            .directory
            .key_code(key)
            .ok_or(Error::KeyNotFound(key))
    }

    /// Returns the typed value stored under a geo key
    pub fn geo_key_value(&self, key: GeoKeyId) -> Result<GeoKeyValue> {
        let session = self.session.as_ref().ok_or(Error::NotOpen)?;
        session.directory.value(key).ok_or(Error::KeyNotFound(key))
    }

    /// Lists the geo key ids present in the opened file
    pub fn geo_keys(&self) -> Result<Vec<GeoKeyId>> {
        let session = self.session.as_ref().ok_or(Error::NotOpen)?;
        Ok(session.directory.keys().collect())
    }

    /// Reads a raw floating point tag field.
    ///
    /// `tag` addresses the TIFF tag id space, not the geo key space, so
    /// any DOUBLE or FLOAT array tag of the container is reachable. An
    /// absent tag is not an error and yields an empty vector; a present
    /// tag yields all its values in stored order.
    pub fn geo_field(&mut self, tag: TagId) -> Result<Vec<f64>> {
        let session = self.session.as_mut().ok_or(Error::NotOpen)?;
        match session.ifd.get_entry(tag) {
            None => Ok(Vec::new()),
            Some(entry) => session.tiff.read_tag_doubles(entry),
        }
    }

    fn not_a_tiff(err: Error) -> Error {
        Error::NotATiff(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geotiff::keys::{GT_CITATION, GT_MODEL_TYPE, PROJECTED_CS_TYPE};
    use crate::geotiff::GeoKeyType;
    use crate::tiff::tags;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_entry(file: &mut NamedTempFile, tag: u16, field_type: u16, count: u32, value: u32) {
        file.write_all(&tag.to_le_bytes()).unwrap();
        file.write_all(&field_type.to_le_bytes()).unwrap();
        file.write_all(&count.to_le_bytes()).unwrap();
        file.write_all(&value.to_le_bytes()).unwrap();
    }

    /// Little-endian GeoTIFF with pixel scale, key directory, double and
    /// ascii params. Data area starts at 8 + 2 + 6 * 12 + 4 = 86.
    fn create_geotiff() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();

        file.write_all(b"II").unwrap();
        file.write_all(&42u16.to_le_bytes()).unwrap();
        file.write_all(&8u32.to_le_bytes()).unwrap();

        file.write_all(&6u16.to_le_bytes()).unwrap();
        write_entry(&mut file, 256, 3, 1, 64);
        write_entry(&mut file, 257, 3, 1, 64);
        write_entry(&mut file, 33550, 12, 3, 86);
        write_entry(&mut file, 34735, 3, 27, 110);
        write_entry(&mut file, 34736, 12, 1, 164);
        write_entry(&mut file, 34737, 2, 7, 172);
        file.write_all(&0u32.to_le_bytes()).unwrap();

        for value in [2.0f64, 2.0, 0.0] {
            file.write_all(&value.to_le_bytes()).unwrap();
        }

        #[rustfmt::skip]
        let directory: [u16; 27] = [
            1, 1, 0, 5,
            1024, 0, 1, 2,
            1026, 34737, 7, 0,
            2059, 34736, 1, 0,
            2062, 34735, 3, 24,
            3072, 0, 1, 32633,
            7, 8, 9,
        ];
        for value in directory {
            file.write_all(&value.to_le_bytes()).unwrap();
        }

        file.write_all(&298.257223563f64.to_le_bytes()).unwrap();
        file.write_all(b"WGS 84|").unwrap();

        file.flush().unwrap();
        file
    }

    /// Valid TIFF without any GeoTIFF tags
    fn create_plain_tiff() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();

        file.write_all(b"II").unwrap();
        file.write_all(&42u16.to_le_bytes()).unwrap();
        file.write_all(&8u32.to_le_bytes()).unwrap();
        file.write_all(&1u16.to_le_bytes()).unwrap();
        write_entry(&mut file, 256, 4, 1, 1024);
        file.write_all(&0u32.to_le_bytes()).unwrap();

        file.flush().unwrap();
        file
    }

    fn create_garbage() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a tiff file").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_queries_fail_before_open() {
        let mut reader = GeoImageReader::new();
        assert!(!reader.is_open());
        assert!(matches!(
            reader.geo_key_info(GT_MODEL_TYPE),
            Err(Error::NotOpen)
        ));
        assert!(matches!(reader.geo_key(GT_MODEL_TYPE), Err(Error::NotOpen)));
        assert!(matches!(
            reader.geo_key_value(GT_MODEL_TYPE),
            Err(Error::NotOpen)
        ));
        assert!(matches!(reader.geo_keys(), Err(Error::NotOpen)));
        assert!(matches!(
            reader.geo_field(tags::MODEL_PIXEL_SCALE),
            Err(Error::NotOpen)
        ));
    }

    #[test]
    fn test_open_garbage_fails_with_not_a_tiff() {
        let file = create_garbage();
        let mut reader = GeoImageReader::new();
        assert!(matches!(
            reader.open(file.path()),
            Err(Error::NotATiff(_))
        ));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_missing_file_fails_with_not_a_tiff() {
        let mut reader = GeoImageReader::new();
        assert!(matches!(
            reader.open("/nonexistent/file.tif"),
            Err(Error::NotATiff(_))
        ));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_plain_tiff_fails_with_not_a_geotiff() {
        let file = create_plain_tiff();
        let mut reader = GeoImageReader::new();
        assert!(matches!(reader.open(file.path()), Err(Error::NotAGeoTiff)));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_succeeds_after_failed_open() {
        let plain = create_plain_tiff();
        let geotiff = create_geotiff();

        let mut reader = GeoImageReader::new();
        assert!(reader.open(plain.path()).is_err());
        reader.open(geotiff.path()).unwrap();
        assert!(reader.is_open());
        assert_eq!(reader.geo_key(PROJECTED_CS_TYPE).unwrap(), 32633);
    }

    #[test]
    fn test_geo_key() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        assert_eq!(reader.geo_key(GT_MODEL_TYPE).unwrap(), 2);
        assert_eq!(reader.geo_key(PROJECTED_CS_TYPE).unwrap(), 32633);
    }

    #[test]
    fn test_geo_key_missing_is_idempotent() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        for _ in 0..3 {
            assert!(matches!(
                reader.geo_key(GeoKeyId(9999)),
                Err(Error::KeyNotFound(GeoKeyId(9999)))
            ));
        }
        // Failed lookups leave the open file untouched.
        assert_eq!(reader.geo_key(GT_MODEL_TYPE).unwrap(), 2);
    }

    #[test]
    fn test_geo_key_multivalue_short_yields_first() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        assert_eq!(reader.geo_key(GeoKeyId(2062)).unwrap(), 7);
        assert_eq!(
            reader.geo_key_value(GeoKeyId(2062)).unwrap(),
            GeoKeyValue::Short(vec![7, 8, 9])
        );
    }

    #[test]
    fn test_geo_key_on_ascii_key_fails() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        assert!(matches!(
            reader.geo_key(GT_CITATION),
            Err(Error::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_geo_key_info() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        let info = reader.geo_key_info(GT_CITATION).unwrap();
        assert_eq!(info.count, 7);
        assert_eq!(info.value_type, GeoKeyType::Ascii);

        assert!(matches!(
            reader.geo_key_info(GeoKeyId(9999)),
            Err(Error::KeyInfoUnavailable(_))
        ));
    }

    #[test]
    fn test_geo_key_info_is_stable() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        let first = reader.geo_key_info(PROJECTED_CS_TYPE).unwrap();
        for _ in 0..3 {
            assert_eq!(reader.geo_key_info(PROJECTED_CS_TYPE).unwrap(), first);
        }
        assert_eq!(first.count, 1);
        assert_eq!(first.value_type, GeoKeyType::Short);
    }

    #[test]
    fn test_geo_key_value() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        assert_eq!(
            reader.geo_key_value(GT_CITATION).unwrap(),
            GeoKeyValue::Ascii("WGS 84".to_string())
        );
        assert_eq!(
            reader.geo_key_value(GeoKeyId(2059)).unwrap(),
            GeoKeyValue::Double(vec![298.257223563])
        );
    }

    #[test]
    fn test_geo_keys() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        let ids: Vec<u16> = reader.geo_keys().unwrap().iter().map(|k| k.0).collect();
        assert_eq!(ids, vec![1024, 1026, 2059, 2062, 3072]);
    }

    #[test]
    fn test_geo_field_returns_values_in_order() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        let values = reader.geo_field(tags::MODEL_PIXEL_SCALE).unwrap();
        assert_eq!(values, vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_geo_field_absent_tag_is_empty() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        let values = reader.geo_field(tags::MODEL_TIEPOINT).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_close_is_idempotent() {
        let file = create_geotiff();
        let mut reader = GeoImageReader::new();
        reader.open(file.path()).unwrap();

        reader.close();
        reader.close();
        assert!(!reader.is_open());
        assert!(matches!(reader.geo_key(GT_MODEL_TYPE), Err(Error::NotOpen)));
        assert!(matches!(
            reader.geo_key_info(GT_MODEL_TYPE),
            Err(Error::NotOpen)
        ));
        assert!(matches!(
            reader.geo_field(tags::MODEL_PIXEL_SCALE),
            Err(Error::NotOpen)
        ));

        reader.open(file.path()).unwrap();
        assert_eq!(reader.geo_key(GT_MODEL_TYPE).unwrap(), 2);
    }

    #[test]
    fn test_reopen_while_open() {
        let geotiff = create_geotiff();
        let plain = create_plain_tiff();

        let mut reader = GeoImageReader::new();
        reader.open(geotiff.path()).unwrap();
        reader.open(geotiff.path()).unwrap();
        assert_eq!(reader.geo_key(GT_MODEL_TYPE).unwrap(), 2);

        // A failed re-open releases the previous session too.
        assert!(reader.open(plain.path()).is_err());
        assert!(!reader.is_open());
    }
}
