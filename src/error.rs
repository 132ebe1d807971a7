use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SoftError {
    #[error("failed to read SOFT input: {0}")]
    InputRead(String),

    #[error("invalid SOFT input at line {line}: {message}")]
    InvalidInput { line: usize, message: String },

    #[error("SRA request failed: {0}")]
    SraHttp(String),

    #[error("invalid SRA run accession: {0}")]
    InvalidRunAccession(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to write output: {0}")]
    Output(String),
}
