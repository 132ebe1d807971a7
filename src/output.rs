use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{OutputStyle, RawSample, SampleEntry, display_name};
use crate::error::SoftError;

const ENVELOPE_OPEN: &str = "{ \"samples\":[\n";
const ENVELOPE_CLOSE: &str = "]}\n";
const FRAGMENT_SEPARATOR: &str = ",\n\t";

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatPolicy {
    pub style: OutputStyle,
    pub require_complete: bool,
}

// Only accessions are checked by default; missing title, organism or source
// render as empty strings.
pub fn format_sample(sample: &RawSample, policy: &FormatPolicy) -> Option<SampleEntry> {
    if !sample.has_accessions() {
        tracing::warn!("can not find sra for {}", sample.identifier);
        return None;
    }
    if policy.require_complete && !sample.is_complete() {
        tracing::warn!(
            "skipping {}: missing {}",
            sample.identifier,
            sample.missing_fields().join(", ")
        );
        return None;
    }

    let title = sample.title.as_deref().unwrap_or_default();
    let name = display_name(
        sample.organism.as_deref().unwrap_or_default(),
        sample.source.as_deref().unwrap_or_default(),
        title,
    );
    let sra = sample
        .accession_ids
        .iter()
        .flatten()
        .map(|id| id.to_string())
        .collect();
    Some(SampleEntry {
        id: title.to_string(),
        name,
        sra,
    })
}

pub fn render_fragment(entry: &SampleEntry, style: OutputStyle) -> Result<String, SoftError> {
    match style {
        OutputStyle::Verbatim => Ok(format!(
            "{{\"id\": \"{}\", \"name\": \"{}\", \"sra\": [\"{}\"]}}",
            entry.id,
            entry.name,
            entry.sra.join("\", \"")
        )),
        OutputStyle::Json => {
            let id = json_string(&entry.id)?;
            let name = json_string(&entry.name)?;
            let sra = entry
                .sra
                .iter()
                .map(|run| json_string(run))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!(
                "{{\"id\": {id}, \"name\": {name}, \"sra\": [{}]}}",
                sra.join(", ")
            ))
        }
    }
}

fn json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, SoftError> {
    serde_json::to_string(value).map_err(|err| SoftError::Output(err.to_string()))
}

pub fn render_envelope(fragments: &[String]) -> String {
    let mut out = String::from(ENVELOPE_OPEN);
    if !fragments.is_empty() {
        out.push('\t');
        out.push_str(&fragments.join(FRAGMENT_SEPARATOR));
        out.push('\n');
    }
    out.push_str(ENVELOPE_CLOSE);
    out
}

pub fn write_envelope<W: Write>(writer: &mut W, fragments: &[String]) -> io::Result<()> {
    writer.write_all(render_envelope(fragments).as_bytes())?;
    writer.flush()
}
