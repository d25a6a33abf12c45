use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    config::latest_export,
    download_report::download_submission_report,
    filename_mapping::filename_mapping,
    homework_config::HomeworkConfig,
    list_classmates::list_classmates,
    rename_homeworks::rename_homeworks,
    submission_report::{build_report, record_submissions},
    types::{ExportSource, HomeworkError},
};

pub struct SortHomeworks {
    pub folder: Utf8PathBuf,
    pub classmates: Utf8PathBuf,
    pub source: ExportSource,
    pub verbose: bool,
    pub report: Option<Utf8PathBuf>,
}

/// Renames the attachments in the folder, then reports who is still missing.
pub fn sort_homeworks(job: &SortHomeworks, config: &HomeworkConfig) -> Result<(), HomeworkError> {
    let mut exclude = vec![job.classmates.as_path()];
    exclude.extend(job.report.as_deref());
    let export = latest_export(&job.folder, &exclude)?;
    log::info!("using export {} ({})", export, job.source);

    let mapping = filename_mapping(&export, config, job.source)?;
    let renamed = rename_homeworks(&job.folder, &mapping, &config.id_prefix, &config.extensions)?;
    log::info!(
        "renamed {} attachments, left {} older submissions untouched",
        renamed.renamed.len(),
        renamed.untouched.len()
    );

    let mut roster = match list_classmates(&job.classmates, &config.keywords) {
        Ok(roster) => roster,
        Err(HomeworkError::MissingRoster(path)) => {
            println!(
                "No class list at {}. Put the class list .csv (with student ID and name columns) there, or pass --classmates, to see who has submitted.",
                path
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if roster.is_empty() {
        log::warn!("class list {} has no classmates", job.classmates);
    }

    record_submissions(&job.folder, &mut roster, &config.id_prefix, &config.extensions)?;
    print!("{}", build_report(folder_label(&job.folder), &roster, job.verbose));

    if let Some(report) = &job.report {
        download_submission_report(report, &roster)?;
        log::info!("submission report written to {}", report);
    }
    Ok(())
}

fn folder_label(folder: &Utf8Path) -> &str {
    folder.file_name().unwrap_or(folder.as_str())
}
