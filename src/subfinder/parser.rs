// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subfinder Output Parser
 * Line-oriented result normalization with plain-text fallback
 *
 * © 2026 Bountyy Oy
 */

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::errors::EnumerationError;

/// Structured line emitted by subfinder in `-json` mode.
#[derive(Debug, Deserialize)]
struct StructuredLine {
    #[serde(default)]
    host: String,
    #[serde(default)]
    source: String,
}

/// Classification of one non-empty output line. Malformed structured
/// lines degrade to `Plain` rather than failing the parse, so both
/// variants feed the same aggregation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Structured { host: String, source: Option<String> },
    Plain(String),
}

/// Classify a single line. Returns `None` for empty/whitespace lines.
/// Never fails: a line that is not a JSON object is a bare hostname.
pub fn classify_line(line: &str) -> Option<OutputLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<StructuredLine>(trimmed) {
        Ok(record) => Some(OutputLine::Structured {
            host: record.host,
            source: (!record.source.is_empty()).then(|| record.source),
        }),
        Err(_) => Some(OutputLine::Plain(trimmed.to_string())),
    }
}

/// Hostnames in file-emission order plus the set of contributing sources.
#[derive(Debug, Default)]
pub struct ParsedOutput {
    pub hostnames: Vec<String>,
    pub sources: HashSet<String>,
}

/// Read a subfinder result file line by line.
///
/// Only an I/O failure on the file itself is an error; individual
/// malformed lines are absorbed via the plain-text fallback. Hostname
/// order follows the file, so re-parsing the same file is reproducible.
pub async fn parse_output(path: &Path) -> Result<ParsedOutput, EnumerationError> {
    let file = File::open(path).await.map_err(EnumerationError::OutputParse)?;

    if let Ok(meta) = file.metadata().await {
        debug!(path = %path.display(), size = meta.len(), "parsing subfinder output");
    }

    let mut parsed = ParsedOutput::default();
    let mut lines = BufReader::new(file).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(EnumerationError::OutputParse)?
    {
        match classify_line(&line) {
            Some(OutputLine::Structured { host, source }) => {
                if host.is_empty() {
                    continue;
                }
                debug!(host = %host, source = ?source, "structured result");
                parsed.hostnames.push(host);
                if let Some(source) = source {
                    parsed.sources.insert(source);
                }
            }
            Some(OutputLine::Plain(host)) => {
                debug!(host = %host, "plain text result");
                parsed.hostnames.push(host);
            }
            None => {}
        }
    }

    debug!(
        hostnames = parsed.hostnames.len(),
        sources = parsed.sources.len(),
        "parsing complete"
    );

    Ok(parsed)
}
