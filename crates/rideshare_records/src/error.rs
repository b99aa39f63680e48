use std::path::PathBuf;

use rideshare_core::DispatchError;
use thiserror::Error;

/// Which of the three record files a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFile {
    Users,
    Drivers,
    Trips,
}

impl std::fmt::Display for RecordFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFile::Users => f.write_str("users"),
            RecordFile::Drivers => f.write_str("drivers"),
            RecordFile::Trips => f.write_str("trips"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file} csv: {source}")]
    Csv {
        file: RecordFile,
        #[source]
        source: csv::Error,
    },
    #[error("{file} row {row}: {message}")]
    Field {
        file: RecordFile,
        row: usize,
        message: String,
    },
    #[error("{file} row {row}: {source}")]
    Record {
        file: RecordFile,
        row: usize,
        #[source]
        source: DispatchError,
    },
}

impl LoadError {
    pub(crate) fn field(file: RecordFile, row: usize, message: impl Into<String>) -> Self {
        LoadError::Field {
            file,
            row,
            message: message.into(),
        }
    }

    pub(crate) fn record(file: RecordFile, row: usize) -> impl FnOnce(DispatchError) -> Self {
        move |source| LoadError::Record { file, row, source }
    }
}
