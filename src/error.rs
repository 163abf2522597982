use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SplitError {
    #[error("failed to read fastq manifest {path}: {message}")]
    ManifestRead { path: Utf8PathBuf, message: String },

    #[error("failed to open tracking workbook {path}: {message}")]
    WorkbookOpen { path: Utf8PathBuf, message: String },

    #[error("failed to parse tracking sheet {sheet}: {message}")]
    SheetParse { sheet: String, message: String },

    #[error("no valid year sheets found in tracking workbook {0}")]
    NoValidSheets(Utf8PathBuf),

    #[error("invalid phenotype: {0}")]
    InvalidPhenotype(String),

    #[error("failed to write csv {path}: {message}")]
    CsvWrite { path: Utf8PathBuf, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
