use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::RawSample;
use crate::error::SoftError;
use crate::sra::{SraClient, resolve_runs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    RecordStart,
    Title,
    Organism,
    Source,
    Relation,
}

// Evaluated in order; the first match wins.
static LINE_PATTERNS: LazyLock<Vec<(LineKind, Regex)>> = LazyLock::new(|| {
    [
        (LineKind::RecordStart, r"^\^SAMPLE = (.+)"),
        (LineKind::Title, r"^!Sample_title = (.+)"),
        (LineKind::Organism, r"^!Sample_organism_ch1 = (.+)"),
        (LineKind::Source, r"^!Sample_source_name_ch1 = (.+)"),
        (LineKind::Relation, r"^!Sample_relation = SRA: (.+)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid SOFT line regex")))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftLine<'a> {
    RecordStart(&'a str),
    Title(&'a str),
    Organism(&'a str),
    Source(&'a str),
    Relation(&'a str),
    Unmatched,
}

impl<'a> SoftLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        for (kind, regex) in LINE_PATTERNS.iter() {
            let Some(value) = regex.captures(line).and_then(|caps| caps.get(1)) else {
                continue;
            };
            let value = value.as_str();
            return match kind {
                LineKind::RecordStart => SoftLine::RecordStart(value),
                LineKind::Title => SoftLine::Title(value),
                LineKind::Organism => SoftLine::Organism(value),
                LineKind::Source => SoftLine::Source(value),
                LineKind::Relation => SoftLine::Relation(value),
            };
        }
        SoftLine::Unmatched
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InSample(RawSample),
}

#[derive(Debug, Default)]
pub struct SampleAccumulator {
    state: State,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed<C: SraClient + ?Sized>(
        &mut self,
        line: &str,
        resolver: &C,
    ) -> Result<Option<RawSample>, SoftError> {
        let classified = SoftLine::classify(line);
        if let SoftLine::RecordStart(identifier) = classified {
            let previous = std::mem::replace(
                &mut self.state,
                State::InSample(RawSample::new(identifier)),
            );
            return Ok(match previous {
                State::Idle => None,
                State::InSample(sample) => Some(sample),
            });
        }

        let State::InSample(sample) = &mut self.state else {
            return Ok(None);
        };
        match classified {
            SoftLine::Title(value) => sample.title = Some(value.to_string()),
            SoftLine::Organism(value) => sample.organism = Some(value.to_string()),
            SoftLine::Source(value) => sample.source = Some(value.to_string()),
            SoftLine::Relation(link) => {
                let runs = resolve_runs(resolver, link)?;
                sample.external_link = Some(link.to_string());
                sample.accession_ids = Some(runs);
            }
            SoftLine::RecordStart(_) | SoftLine::Unmatched => {}
        }
        Ok(None)
    }

    pub fn finish(self) -> Option<RawSample> {
        match self.state {
            State::Idle => None,
            State::InSample(sample) => Some(sample),
        }
    }
}

pub fn parse_samples<R, C, F>(reader: R, resolver: &C, mut on_sample: F) -> Result<(), SoftError>
where
    R: BufRead,
    C: SraClient + ?Sized,
    F: FnMut(RawSample) -> Result<(), SoftError>,
{
    let mut accumulator = SampleAccumulator::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| match err.kind() {
            std::io::ErrorKind::InvalidData => SoftError::InvalidInput {
                line: index + 1,
                message: err.to_string(),
            },
            _ => SoftError::InputRead(err.to_string()),
        })?;
        if let Some(sample) = accumulator.feed(&line, resolver)? {
            on_sample(sample)?;
        }
    }
    if let Some(sample) = accumulator.finish() {
        on_sample(sample)?;
    }
    Ok(())
}
