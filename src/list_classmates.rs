use camino::Utf8Path;
use csv::ReaderBuilder;

use crate::{
    homework_config::ColumnKeywords,
    types::{HomeworkError, Roster},
    util::{field, require_column},
};

/// Loads the class list with everyone marked as not yet submitted.
/// IDs are taken exactly as written; they are expected to already be normalized.
pub fn list_classmates(classmates_csv: &Utf8Path, keywords: &ColumnKeywords) -> Result<Roster, HomeworkError> {
    if !classmates_csv.exists() {
        return Err(HomeworkError::MissingRoster(classmates_csv.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(classmates_csv)?;
    let header = reader.headers()?.clone();
    let sid_idx = require_column(classmates_csv, &header, &keywords.student_id)?;
    let name_idx = require_column(classmates_csv, &header, &keywords.student_name)?;

    let mut roster = Roster::new();
    for record in reader.records() {
        let record = record?;
        let sid = field(classmates_csv, &record, sid_idx)?;
        let name = field(classmates_csv, &record, name_idx)?;
        roster.insert(sid.to_string(), name.to_string());
    }
    log::info!("{} classmates listed in {}", roster.len(), classmates_csv);
    Ok(roster)
}
