use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::str::FromStr;

use camino::Utf8PathBuf;
use flate2::read::MultiGzDecoder;

use crate::error::SoftError;

pub const STDIN_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(Utf8PathBuf),
}

impl InputSource {
    pub fn open(&self) -> Result<Box<dyn BufRead>, SoftError> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path.as_std_path())
                    .map_err(|err| SoftError::InputRead(format!("open {path}: {err}")))?;
                if path.extension() == Some("gz") {
                    Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{path}"),
        }
    }
}

impl FromStr for InputSource {
    type Err = SoftError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SoftError::InputRead("empty input path".to_string()));
        }
        if trimmed == STDIN_MARKER {
            return Ok(InputSource::Stdin);
        }
        Ok(InputSource::File(Utf8PathBuf::from(trimmed)))
    }
}
