use std::io::{BufRead, Write};

use serde::Serialize;

use crate::domain::SampleEntry;
use crate::error::SoftError;
use crate::output::{FormatPolicy, format_sample, render_fragment, write_envelope};
use crate::soft::parse_samples;
use crate::sra::SraClient;

#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub written: usize,
    pub skipped: Vec<String>,
    pub samples: Vec<SampleEntry>,
}

pub struct App<C> {
    client: C,
    policy: FormatPolicy,
}

impl<C: SraClient> App<C> {
    pub fn new(client: C, policy: FormatPolicy) -> Self {
        Self { client, policy }
    }

    pub fn convert<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<ConvertResult, SoftError> {
        let mut fragments = Vec::new();
        let mut samples = Vec::new();
        let mut skipped = Vec::new();

        parse_samples(reader, &self.client, |sample| {
            match format_sample(&sample, &self.policy) {
                Some(entry) => {
                    fragments.push(render_fragment(&entry, self.policy.style)?);
                    samples.push(entry);
                }
                None => skipped.push(sample.identifier),
            }
            Ok(())
        })?;

        write_envelope(writer, &fragments).map_err(|err| SoftError::Output(err.to_string()))?;
        tracing::info!(
            written = samples.len(),
            skipped = skipped.len(),
            "converted SOFT samples"
        );

        Ok(ConvertResult {
            written: samples.len(),
            skipped,
            samples,
        })
    }
}
