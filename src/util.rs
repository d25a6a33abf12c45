use std::fs;
use std::io::Result;

use camino::Utf8Path;
use csv::StringRecord;

use crate::types::HomeworkError;

/// Index of the first header cell containing `keyword`.
pub fn find_column(header: &StringRecord, keyword: &str) -> Option<usize> {
    header.iter().position(|cell| cell.contains(keyword))
}

pub fn require_column(
    path: &Utf8Path,
    header: &StringRecord,
    keyword: &str,
) -> std::result::Result<usize, HomeworkError> {
    find_column(header, keyword).ok_or_else(|| HomeworkError::ColumnNotFound {
        path: path.to_path_buf(),
        keyword: keyword.to_string(),
    })
}

pub fn field<'r>(
    path: &Utf8Path,
    record: &'r StringRecord,
    index: usize,
) -> std::result::Result<&'r str, HomeworkError> {
    record.get(index).ok_or_else(|| HomeworkError::MalformedRow {
        path: path.to_path_buf(),
        line: record_line(record),
        reason: format!("row has {} fields, expected at least {}", record.len(), index + 1),
    })
}

pub fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// Attachment names start with the ID prefix and end in `.` plus an allowed extension.
pub fn is_candidate(file_name: &str, prefix: &str, extensions: &[String]) -> bool {
    file_name.strip_prefix(prefix).is_some_and(|rest| {
        extensions.iter().any(|ext| {
            rest.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    })
}

/// Sorted names of the attachment files directly inside `folder`.
pub fn list_candidates(folder: &Utf8Path, prefix: &str, extensions: &[String]) -> Result<Vec<String>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                log::debug!("skipping non UTF-8 file name {:?}", name);
                continue;
            }
        };
        if entry.path().is_file() && is_candidate(&name, prefix, extensions) {
            candidates.push(name);
        }
    }
    candidates.sort();
    Ok(candidates)
}
