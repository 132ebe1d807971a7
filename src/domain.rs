use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoftError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SraRunId(String);

impl SraRunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SraRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SraRunId {
    type Err = SoftError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix("SRR").unwrap_or("");
        let is_valid = !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(SoftError::InvalidRunAccession(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSample {
    pub identifier: String,
    pub title: Option<String>,
    pub organism: Option<String>,
    pub source: Option<String>,
    pub external_link: Option<String>,
    /// `None` until a relation line has been resolved.
    pub accession_ids: Option<Vec<SraRunId>>,
}

impl RawSample {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn has_accessions(&self) -> bool {
        self.accession_ids
            .as_ref()
            .map(|ids| !ids.is_empty())
            .unwrap_or(false)
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.organism.is_none() {
            missing.push("organism");
        }
        if self.source.is_none() {
            missing.push("source");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleEntry {
    pub id: String,
    pub name: String,
    pub sra: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Verbatim,
    Json,
}

pub fn display_name(organism: &str, source: &str, title: &str) -> String {
    [organism, source, title].join("_").replace(' ', "_")
}
