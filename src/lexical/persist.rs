//! Model artifact encoding.
//!
//! An artifact is the `LEXM` magic, a little-endian `u32` format version and
//! a zstd-compressed bincode payload. Version 1 artifacts stored each token
//! set as a raw token list next to an explicit key; they are upgraded to the
//! current representation right after decoding.

use anyhow::{Context, Result, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::lexical::index::dictionary::TokenDictionary;
use crate::lexical::index::token_set::{SubjectId, TokenId, TokenSet};
use crate::vocab::Vocabulary;

const MAGIC: &[u8; 4] = b"LEXM";

/// Format version written by [`write_model`].
pub const FORMAT_VERSION: u32 = 2;

const LEGACY_FORMAT_VERSION: u32 = 1;

const COMPRESSION_LEVEL: i32 = 3;

/// Borrowed view of a model, used for writing.
#[derive(Debug, Serialize)]
pub(crate) struct ModelRef<'a> {
    pub analyzer: &'a str,
    pub dictionary: &'a TokenDictionary,
    pub vocab: &'a Vocabulary,
    pub token_sets: Vec<&'a TokenSet>,
}

/// Owned model contents, produced by reading.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelData {
    pub analyzer: String,
    pub dictionary: TokenDictionary,
    pub vocab: Vocabulary,
    pub token_sets: Vec<TokenSet>,
}

/// Token set layout of version 1 artifacts.
#[derive(Debug, Serialize, Deserialize)]
struct LegacyTokenSet {
    tokens: Vec<TokenId>,
    key: Option<TokenId>,
    subject_id: Option<SubjectId>,
    is_pref: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct LegacyModelData {
    analyzer: String,
    dictionary: TokenDictionary,
    vocab: Vocabulary,
    token_sets: Vec<LegacyTokenSet>,
}

impl From<LegacyTokenSet> for TokenSet {
    fn from(legacy: LegacyTokenSet) -> Self {
        TokenSet::from_parts(
            legacy.tokens.into_iter().collect(),
            legacy.key,
            legacy.subject_id,
            legacy.is_pref,
        )
    }
}

impl From<LegacyModelData> for ModelData {
    fn from(legacy: LegacyModelData) -> Self {
        Self {
            analyzer: legacy.analyzer,
            dictionary: legacy.dictionary,
            vocab: legacy.vocab,
            token_sets: legacy.token_sets.into_iter().map(TokenSet::from).collect(),
        }
    }
}

fn bincode_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

fn write_payload<W: Write, T: Serialize>(mut writer: W, version: u32, payload: &T) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&version.to_le_bytes())?;

    let mut encoder = zstd::Encoder::new(writer, COMPRESSION_LEVEL)
        .context("Failed to create zstd encoder")?;
    bincode::serde::encode_into_std_write(payload, &mut encoder, bincode_config())
        .context("Failed to encode model")?;
    encoder.finish().context("Failed to finish zstd stream")?;
    Ok(())
}

pub(crate) fn write_model<W: Write>(writer: W, model: &ModelRef<'_>) -> Result<()> {
    write_payload(writer, FORMAT_VERSION, model)
}

pub(crate) fn read_model<R: Read>(mut reader: R) -> Result<ModelData> {
    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .context("Failed to read model header")?;
    if &magic != MAGIC {
        bail!("Not a lexical model file (bad magic {:?})", magic);
    }

    let mut version = [0u8; 4];
    reader
        .read_exact(&mut version)
        .context("Failed to read model version")?;
    let version = u32::from_le_bytes(version);

    let mut decoder = zstd::Decoder::new(reader).context("Failed to create zstd decoder")?;
    match version {
        FORMAT_VERSION => bincode::serde::decode_from_std_read(&mut decoder, bincode_config())
            .context("Failed to decode model"),
        LEGACY_FORMAT_VERSION => {
            let legacy: LegacyModelData =
                bincode::serde::decode_from_std_read(&mut decoder, bincode_config())
                    .context("Failed to decode legacy model")?;
            info!(
                "Upgrading {} token sets from model format version {}",
                legacy.token_sets.len(),
                LEGACY_FORMAT_VERSION
            );
            Ok(legacy.into())
        }
        other => bail!("Unsupported model format version {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Subject;

    fn sample_parts() -> (TokenDictionary, Vocabulary) {
        let mut dictionary = TokenDictionary::new();
        dictionary.get_or_assign("wild");
        dictionary.get_or_assign("cats");
        let vocab = Vocabulary::new(vec![Subject::new("http://example.org/w", "Wild cats")]);
        (dictionary, vocab)
    }

    fn sorted_tokens(ts: &TokenSet) -> Vec<TokenId> {
        let mut tokens: Vec<_> = ts.iter().collect();
        tokens.sort_unstable();
        tokens
    }

    #[test]
    fn test_write_and_read_model() {
        let (dictionary, vocab) = sample_parts();
        let tset = TokenSet::new(&[0, 1], Some(0), true);
        let model = ModelRef {
            analyzer: "simple",
            dictionary: &dictionary,
            vocab: &vocab,
            token_sets: vec![&tset],
        };

        let mut buf = Vec::new();
        write_model(&mut buf, &model).unwrap();
        assert_eq!(&buf[..4], MAGIC);
        assert_eq!(&buf[4..8], &FORMAT_VERSION.to_le_bytes());

        let data = read_model(buf.as_slice()).unwrap();
        assert_eq!(data.analyzer, "simple");
        assert_eq!(data.dictionary, dictionary);
        assert_eq!(data.vocab, vocab);
        assert_eq!(data.token_sets.len(), 1);
        assert_eq!(data.token_sets[0].key(), Some(0));
        assert_eq!(sorted_tokens(&data.token_sets[0]), vec![0, 1]);
    }

    #[test]
    fn test_read_legacy_model_upgrades_token_sets() {
        let (dictionary, vocab) = sample_parts();
        let legacy = LegacyModelData {
            analyzer: "simple".to_string(),
            dictionary: dictionary.clone(),
            vocab: vocab.clone(),
            token_sets: vec![LegacyTokenSet {
                tokens: vec![1, 0, 1],
                key: Some(1),
                subject_id: Some(0),
                is_pref: false,
            }],
        };

        let mut buf = Vec::new();
        write_payload(&mut buf, LEGACY_FORMAT_VERSION, &legacy).unwrap();

        let data = read_model(buf.as_slice()).unwrap();
        assert_eq!(data.token_sets.len(), 1);

        let ts = &data.token_sets[0];
        assert_eq!(ts.len(), 2);
        assert_eq!(ts.key(), Some(1));
        assert_eq!(ts.subject_id(), Some(0));
        assert!(!ts.is_pref());
        assert!(TokenSet::from_tokens(&[0, 1]).contains(ts));
    }

    #[test]
    fn test_read_model_rejects_bad_magic() {
        let err = read_model(&b"NOPE\x02\x00\x00\x00"[..]).unwrap_err();
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_read_model_rejects_unknown_version() {
        let (dictionary, vocab) = sample_parts();
        let model = ModelRef {
            analyzer: "simple",
            dictionary: &dictionary,
            vocab: &vocab,
            token_sets: Vec::new(),
        };
        let mut buf = Vec::new();
        write_payload(&mut buf, 99, &model).unwrap();

        let err = read_model(buf.as_slice()).unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_read_model_truncated() {
        assert!(read_model(&b"LE"[..]).is_err());
    }
}
