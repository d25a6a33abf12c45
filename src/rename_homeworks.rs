use std::{
    fs::rename,
    io::{self, ErrorKind},
};

use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    types::{FilenameMapping, HomeworkError},
    util::list_candidates,
};

#[derive(Debug, Default)]
pub struct RenameSummary {
    /// (old name, new name) in the order they were applied.
    pub renamed: Vec<(String, String)>,
    /// Candidates the export does not mention, i.e. superseded submissions.
    pub untouched: Vec<String>,
}

/// Renames every attachment named in `mapping` to its canonical name.
///
/// An existing file at the destination is overwritten, same as `rename(2)`.
pub fn rename_homeworks(
    folder: &Utf8Path,
    mapping: &FilenameMapping,
    prefix: &str,
    extensions: &[String],
) -> Result<RenameSummary, HomeworkError> {
    let mut summary = RenameSummary::default();
    for old_name in list_candidates(folder, prefix, extensions)? {
        let Some(new_name) = mapping.get(&old_name) else {
            summary.untouched.push(old_name);
            continue;
        };
        if *new_name == old_name {
            continue;
        }

        let from = folder.join(&old_name);
        let to = folder.join(new_name);
        rename(&from, &to).map_err(|source| rename_error(from, to, source))?;
        log::info!("{} -> {}", old_name, new_name);
        summary.renamed.push((old_name, new_name.clone()));
    }
    Ok(summary)
}

/// A source missing at rename time means something else touched the folder mid-run.
fn rename_error(from: Utf8PathBuf, to: Utf8PathBuf, source: io::Error) -> HomeworkError {
    match source.kind() {
        ErrorKind::NotFound => HomeworkError::SourceVanished { from },
        _ => HomeworkError::Rename { from, to, source },
    }
}
