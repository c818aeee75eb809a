use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::table::TableError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Cannot access structure file '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record in '{path}': {source}")]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to export angle table: {0}")]
    Export(#[from] TableError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Attaches the source path to a structure read failure.
    pub fn from_pdb(path: impl Into<PathBuf>, error: PdbError) -> Self {
        let path = path.into();
        match error {
            PdbError::Io(source) => AnalysisError::FileAccess { path, source },
            other => AnalysisError::MalformedRecord {
                path,
                source: other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::{ColumnRange, PdbParseErrorKind};

    #[test]
    fn io_failures_become_file_access_errors() {
        let err = AnalysisError::from_pdb(
            "missing.pdb",
            PdbError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")),
        );
        match err {
            AnalysisError::FileAccess { path, source } => {
                assert_eq!(path, PathBuf::from("missing.pdb"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_failures_become_malformed_record_errors() {
        let err = AnalysisError::from_pdb(
            "bad.pdb",
            PdbError::Parse {
                line: 7,
                kind: PdbParseErrorKind::InvalidFloat {
                    columns: ColumnRange::new(31, 38),
                    value: "abc".to_string(),
                },
            },
        );
        assert!(matches!(
            err,
            AnalysisError::MalformedRecord {
                source: PdbError::Parse { line: 7, .. },
                ..
            }
        ));
        assert!(err.to_string().contains("bad.pdb"));
    }
}
