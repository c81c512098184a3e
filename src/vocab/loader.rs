use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Subject, Vocabulary};
use crate::utils::cleanup_uri;

const ALT_LABEL_SEPARATOR: char = '|';

/// Load a vocabulary from a tab-separated file.
///
/// Each row holds a URI, a preferred label and optionally a `|`-separated
/// list of alternate labels. Blank lines and `#` comments are skipped.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let file =
        File::open(path).with_context(|| format!("Failed to open vocabulary {:?}", path))?;
    let vocab =
        parse_vocabulary(file).with_context(|| format!("Failed to parse vocabulary {:?}", path))?;
    info!("Loaded {} subjects from {:?}", vocab.len(), path);
    Ok(vocab)
}

/// Parse vocabulary rows from any reader.
pub fn parse_vocabulary<R: Read>(reader: R) -> Result<Vocabulary> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut subjects = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let uri = record.get(0).map(str::trim).unwrap_or_default();
        if uri.is_empty() {
            continue;
        }
        let pref_label = record.get(1).map(str::trim).unwrap_or_default();
        if pref_label.is_empty() {
            bail!("Subject on line {} has no label: {}", line, uri);
        }

        let alt_labels = record
            .get(2)
            .into_iter()
            .flat_map(|labels| labels.split(ALT_LABEL_SEPARATOR))
            .map(str::trim)
            .filter(|label| !label.is_empty());

        subjects.push(Subject::new(cleanup_uri(uri), pref_label).with_alt_labels(alt_labels));
    }

    Ok(Vocabulary::new(subjects))
}
