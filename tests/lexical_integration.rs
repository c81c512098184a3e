use lexicon::{LexicalEngine, TokenSet, TokenSetIndex, load_vocabulary};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const VOCAB: &str = "\
# sample vocabulary
<http://example.org/subjects/cats>\tCats\tFelines
http://example.org/subjects/wildcats\tWild cats\tWildcat populations
http://example.org/subjects/dogs\tDogs\tHounds|Canines
http://example.org/subjects/catdogs\tCats and dogs
";

fn write_vocab(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("vocab.tsv");
    fs::write(&path, VOCAB).expect("Failed to write vocabulary");
    path
}

fn found_by_uri(engine: &LexicalEngine, text: &str) -> HashMap<String, (bool, usize)> {
    engine
        .search(text)
        .into_iter()
        .map(|m| (m.uri, (m.is_pref, m.ambiguity)))
        .collect()
}

#[test]
fn test_build_save_load_and_search() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let vocab = load_vocabulary(&write_vocab(&dir)).expect("Vocabulary should load");
    assert_eq!(vocab.len(), 4);

    let engine = LexicalEngine::build(vocab, "simple").expect("Engine should build");
    let model_path = dir.path().join("lexical.model");
    engine.save(&model_path).expect("Model should save");

    let loaded = LexicalEngine::load(&model_path).expect("Model should load");
    let found = found_by_uri(&loaded, "Stray cats and wild dogs roam the streets.");

    // "cats" is included in both "wild cats" and "cats and dogs"
    assert_eq!(found.len(), 4);
    assert_eq!(found["http://example.org/subjects/cats"], (true, 2));
    assert_eq!(found["http://example.org/subjects/dogs"], (true, 1));
    assert_eq!(found["http://example.org/subjects/wildcats"], (true, 0));
    assert_eq!(found["http://example.org/subjects/catdogs"], (true, 0));
}

#[test]
fn test_alternate_labels_match() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let vocab = load_vocabulary(&write_vocab(&dir)).expect("Vocabulary should load");
    let engine = LexicalEngine::build(vocab, "simple").expect("Engine should build");

    let found = found_by_uri(&engine, "Hounds chased felines.");

    assert_eq!(found.len(), 2);
    assert_eq!(found["http://example.org/subjects/dogs"], (false, 0));
    assert_eq!(found["http://example.org/subjects/cats"], (false, 0));
}

#[test]
fn test_concurrent_search_on_shared_index() {
    let mut index = TokenSetIndex::new();
    for subject_id in 0..100u32 {
        index.add(TokenSet::new(
            &[subject_id, subject_id + 1],
            Some(subject_id),
            true,
        ));
    }
    let index = Arc::new(index);

    thread::scope(|scope| {
        for start in 0..4u32 {
            let index = Arc::clone(&index);
            scope.spawn(move || {
                let tokens: Vec<u32> = (start * 10..start * 10 + 5).collect();
                let matches = index.search(&TokenSet::from_tokens(&tokens));
                // a window of five consecutive tokens contains four pairs
                assert_eq!(matches.len(), 4);
                assert!(matches.iter().all(|(_, ambiguity)| *ambiguity == 0));
            });
        }
    });
}

#[test]
fn test_cli_build_and_suggest() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let vocab_path = write_vocab(&dir);
    let model_path = dir.path().join("cli.model");
    let doc_path = dir.path().join("doc.txt");
    fs::write(&doc_path, "Canines everywhere.").expect("Failed to write document");

    let status = Command::new(env!("CARGO_BIN_EXE_lexicon"))
        .arg("build")
        .arg("--vocab")
        .arg(&vocab_path)
        .arg("--output")
        .arg(&model_path)
        .arg("--analyzer")
        .arg("ascii")
        .status()
        .expect("Failed to run build");
    assert!(status.success());
    assert!(model_path.exists());

    let output = Command::new(env!("CARGO_BIN_EXE_lexicon"))
        .arg("suggest")
        .arg("--model")
        .arg(&model_path)
        .arg(&doc_path)
        .output()
        .expect("Failed to run suggest");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("Output should be UTF-8");
    let line: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("Output should be JSON");
    let matches = line["matches"]
        .as_array()
        .expect("matches should be an array");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["uri"], "http://example.org/subjects/dogs");
    assert_eq!(matches[0]["notation"], "dogs");
    assert_eq!(matches[0]["is_pref"], false);
    assert_eq!(matches[0]["ambiguity"], 0);
}

#[test]
fn test_cli_reports_missing_model() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_lexicon"))
        .arg("suggest")
        .arg("--model")
        .arg(dir.path().join("missing.model"))
        .output()
        .expect("Failed to run suggest");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
