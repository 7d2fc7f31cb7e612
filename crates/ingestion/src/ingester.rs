//! Batch conversion of soil source files into rasters.

use std::path::{Path, PathBuf};

use grid_processor::{GeoTiffWriter, RasterSink};
use soil_common::{CoordinateGrid, GridCatalog};
use tracing::{error, info};

use crate::binary::{convert_binary, BinaryGridSpec};
use crate::config::ConversionConfig;
use crate::error::{IngestionError, Result};
use crate::metadata::{detect_source_format, SourceFormat};
use crate::netcdf::convert_netcdf;

/// One conversion to perform.
#[derive(Debug, Clone)]
pub enum ConversionJob {
    /// Flat binary grid
    Binary {
        input: PathBuf,
        output: PathBuf,
        spec: BinaryGridSpec,
    },
    /// One variable of a NetCDF file
    NetCdf {
        input: PathBuf,
        variable: String,
        output: PathBuf,
        grid: CoordinateGrid,
    },
}

impl ConversionJob {
    /// NetCDF job on a named grid of `catalog`.
    pub fn netcdf(
        input: impl Into<PathBuf>,
        variable: impl Into<String>,
        output: impl Into<PathBuf>,
        catalog: &GridCatalog,
        grid_name: &str,
    ) -> Result<Self> {
        Ok(Self::NetCdf {
            input: input.into(),
            variable: variable.into(),
            output: output.into(),
            grid: *catalog.get(grid_name)?,
        })
    }

    /// Source file of the job.
    pub fn input(&self) -> &Path {
        match self {
            Self::Binary { input, .. } | Self::NetCdf { input, .. } => input,
        }
    }

    /// Raster file the job writes.
    pub fn output(&self) -> &Path {
        match self {
            Self::Binary { output, .. } | Self::NetCdf { output, .. } => output,
        }
    }

    fn expected_format(&self) -> SourceFormat {
        match self {
            Self::Binary { .. } => SourceFormat::Binary,
            Self::NetCdf { .. } => SourceFormat::NetCdf,
        }
    }
}

/// Result of one job of a batch.
#[derive(Debug)]
pub struct JobOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<()>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Converts source files and writes them through a [`RasterSink`].
pub struct Ingester<S: RasterSink> {
    config: ConversionConfig,
    sink: S,
}

impl Ingester<GeoTiffWriter> {
    /// Ingester writing GeoTIFFs with the raster settings of `config`.
    pub fn geotiff(config: ConversionConfig) -> Self {
        let sink = GeoTiffWriter::new(config.raster.clone());
        Self::new(config, sink)
    }
}

impl<S: RasterSink> Ingester<S> {
    pub fn new(config: ConversionConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run a single conversion.
    ///
    /// A job whose input extension names a different format is rejected
    /// before anything is read; unknown extensions are attempted.
    pub fn convert(&self, job: &ConversionJob) -> Result<()> {
        let detected = detect_source_format(job.input());
        if detected != SourceFormat::Unknown && detected != job.expected_format() {
            return Err(IngestionError::UnknownFileType(format!(
                "{} looks like {:?}, expected {:?}",
                job.input().display(),
                detected,
                job.expected_format()
            )));
        }

        match job {
            ConversionJob::Binary {
                input,
                output,
                spec,
            } => convert_binary(&self.sink, input, output, spec, self.config.missing_value),
            ConversionJob::NetCdf {
                input,
                variable,
                output,
                grid,
            } => convert_netcdf(&self.sink, input, variable, output, grid),
        }
    }

    /// Run every job, continuing past failures.
    ///
    /// Returns one outcome per job, in order.
    pub fn convert_all(&self, jobs: &[ConversionJob]) -> Vec<JobOutcome> {
        let outcomes: Vec<JobOutcome> = jobs
            .iter()
            .map(|job| {
                let result = self.convert(job);
                if let Err(e) = &result {
                    error!(
                        input = %job.input().display(),
                        output = %job.output().display(),
                        error = %e,
                        "Conversion failed"
                    );
                }
                JobOutcome {
                    input: job.input().to_path_buf(),
                    output: job.output().to_path_buf(),
                    result,
                }
            })
            .collect();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            jobs = outcomes.len(),
            succeeded = succeeded,
            failed = outcomes.len() - succeeded,
            "Batch conversion finished"
        );

        outcomes
    }
}
