use std::fmt::Write;
use std::io::Result;

use camino::Utf8Path;

use crate::{types::Roster, util::list_candidates};

/// Marks every classmate with a canonically named attachment in `folder`.
/// The ID is whatever precedes the first `_` of the file name.
pub fn record_submissions(
    folder: &Utf8Path,
    roster: &mut Roster,
    prefix: &str,
    extensions: &[String],
) -> Result<()> {
    for file_name in list_candidates(folder, prefix, extensions)? {
        let sid = file_name.split('_').next().unwrap_or(&file_name);
        if !roster.mark_submitted(sid) {
            log::debug!("{} does not belong to anyone on the class list", file_name);
        }
    }
    Ok(())
}

pub fn build_report(label: &str, roster: &Roster, verbose: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} - {} received", label, roster.submitted().count());
    let _ = writeln!(output);

    if roster.missing().next().is_none() {
        let _ = writeln!(output, "All submissions received");
        return output;
    }

    let _ = writeln!(output, "Missing submissions");
    let _ = writeln!(output, "{}", "=".repeat(8));
    for classmate in roster.missing() {
        if verbose {
            let _ = writeln!(output, "{} {}", classmate.student_id, classmate.name);
        } else {
            let _ = writeln!(output, "{}", classmate.student_id);
        }
    }
    output
}
