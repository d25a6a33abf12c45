use std::{fs::OpenOptions, io::BufWriter};

use camino::Utf8Path;
use serde::Serialize;

use crate::types::{HomeworkError, Roster, SubmissionStatus};

/// Column headers of the `--report` file, in `SubmissionRow` field order.
pub const REPORT_HEADER: [&str; 3] = ["Student ID", "Name", "Status"];

#[derive(Serialize)]
struct SubmissionRow<'a> {
    student_id: &'a str,
    name: &'a str,
    status: SubmissionStatus,
}

/// Writes one row per classmate, truncating `out_file` if it exists.
pub fn download_submission_report(out_file: &Utf8Path, roster: &Roster) -> Result<(), HomeworkError> {
    let out_file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(out_file)?;
    // header is written even for an empty class list
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(out_file));
    wtr.write_record(REPORT_HEADER)?;
    for classmate in roster.iter() {
        wtr.serialize(SubmissionRow {
            student_id: &classmate.student_id,
            name: &classmate.name,
            status: classmate.status(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// True for a file this tool wrote with `--report`. Unreadable files are not reports.
pub fn is_submission_report(path: &Utf8Path) -> bool {
    let Ok(mut rdr) = csv::Reader::from_path(path) else {
        return false;
    };
    let is_report = rdr.headers().is_ok_and(|header| header.iter().eq(REPORT_HEADER));
    is_report
}
