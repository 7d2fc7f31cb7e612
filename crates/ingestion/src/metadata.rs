//! Source file classification and output naming.

use std::path::{Path, PathBuf};

/// Detected source format based on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// NetCDF format (Shangguan et al. 2013)
    NetCdf,
    /// Headerless f64 grid (Dai et al. 2019)
    Binary,
    /// Already a GeoTIFF (SoilGrids250m); needs no conversion
    GeoTiff,
    /// Unknown format
    Unknown,
}

impl SourceFormat {
    /// Whether files of this format go through a converter.
    pub fn needs_conversion(&self) -> bool {
        matches!(self, SourceFormat::NetCdf | SourceFormat::Binary)
    }
}

/// Detect source format from path.
pub fn detect_source_format(path: &Path) -> SourceFormat {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("nc" | "nc4" | "netcdf") => SourceFormat::NetCdf,
        Some("bin" | "dat" | "flt") => SourceFormat::Binary,
        Some("tif" | "tiff") => SourceFormat::GeoTiff,
        _ => SourceFormat::Unknown,
    }
}

/// Output raster path for a source file: `{output_dir}/{stem}.tif`.
///
/// With `variable` set (NetCDF sources holding several properties) the
/// variable name is used as the file stem instead.
pub fn raster_output_path(output_dir: &Path, input: &Path, variable: Option<&str>) -> PathBuf {
    let stem = variable
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "raster".to_string());

    output_dir.join(format!("{}.tif", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source_format() {
        assert_eq!(detect_source_format(Path::new("data/netcdf/SA.nc")), SourceFormat::NetCdf);
        assert_eq!(detect_source_format(Path::new("SA.NC4")), SourceFormat::NetCdf);
        assert_eq!(detect_source_format(Path::new("binary/theta_s_l1.bin")), SourceFormat::Binary);
        assert_eq!(detect_source_format(Path::new("k_s.flt")), SourceFormat::Binary);
        assert_eq!(detect_source_format(Path::new("SNDPPT_M_sl1_250m.tif")), SourceFormat::GeoTiff);
        assert_eq!(detect_source_format(Path::new("README")), SourceFormat::Unknown);
        assert_eq!(detect_source_format(Path::new("notes.txt")), SourceFormat::Unknown);
    }

    #[test]
    fn test_needs_conversion() {
        assert!(SourceFormat::NetCdf.needs_conversion());
        assert!(SourceFormat::Binary.needs_conversion());
        assert!(!SourceFormat::GeoTiff.needs_conversion());
        assert!(!SourceFormat::Unknown.needs_conversion());
    }

    #[test]
    fn test_raster_output_path() {
        let out = Path::new("out");
        assert_eq!(
            raster_output_path(out, Path::new("binary/theta_s.bin"), None),
            PathBuf::from("out/theta_s.tif")
        );
        assert_eq!(
            raster_output_path(out, Path::new("netcdf/soil.nc"), Some("SA")),
            PathBuf::from("out/SA.tif")
        );
    }
}
