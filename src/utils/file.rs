use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Save into `dir/filename` by writing a temporary file in `dir` first and
/// renaming it into place once `write` has succeeded.
///
/// Readers never observe a partially written file. If `write` fails the
/// temporary file is removed and the destination is left untouched.
pub fn atomic_save<F>(dir: &Path, filename: &str, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
{
    let temp = NamedTempFile::with_prefix_in(filename, dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
    debug!("saving {} to temporary file {:?}", filename, temp.path());

    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write temporary file {:?}", temp.path()))?;
    }

    let destination = dir.join(filename);
    debug!("renaming temporary file {:?} to {:?}", temp.path(), destination);
    temp.persist(&destination)
        .with_context(|| format!("Failed to move model into place at {:?}", destination))?;

    Ok(destination)
}
