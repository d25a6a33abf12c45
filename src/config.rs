use std::{fs, io};

use camino::{Utf8Path, Utf8PathBuf};

use crate::{download_report::is_submission_report, types::HomeworkError};

pub fn working_dir() -> io::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(std::env::current_dir()?).map_err(|e| e.into_io_error())
}

pub fn resolve(cwd: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn default_classmates_file(cwd: &Utf8Path) -> Utf8PathBuf {
    cwd.join("classmates.csv")
}

/// Picks the lexicographically last `*.csv` in `folder`, skipping the class list,
/// any other files in `exclude` and reports written by earlier runs.
/// Exports are named by timestamp, so this is the newest one.
pub fn latest_export(folder: &Utf8Path, exclude: &[&Utf8Path]) -> Result<Utf8PathBuf, HomeworkError> {
    let mut exports = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || !name.ends_with(".csv") || !entry.path().is_file() {
            continue;
        }
        let path = folder.join(&name);
        if exclude.contains(&path.as_path()) {
            continue;
        }
        if is_submission_report(&path) {
            log::debug!("{} is a submission report, not an export", path);
            continue;
        }
        exports.push(path);
    }
    exports.sort();
    exports
        .pop()
        .ok_or_else(|| HomeworkError::MissingExport(folder.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use camino::{Utf8Path, Utf8PathBuf};

    use super::{latest_export, resolve};
    use crate::types::HomeworkError;

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cwd = Utf8Path::new("/home/ta");
        assert_eq!(resolve(cwd, Utf8Path::new("week3")), Utf8PathBuf::from("/home/ta/week3"));
        assert_eq!(resolve(cwd, Utf8Path::new("/tmp/week3")), Utf8PathBuf::from("/tmp/week3"));
    }

    #[test]
    fn latest_export_skips_class_list() {
        let dir = tempfile::tempdir().unwrap();
        let folder = Utf8Path::from_path(dir.path()).unwrap();
        File::create(folder.join("20210301_export.csv")).unwrap();
        File::create(folder.join("20210322_export.csv")).unwrap();
        File::create(folder.join("classmates.csv")).unwrap();
        File::create(folder.join("notes.txt")).unwrap();

        let export = latest_export(folder, &[folder.join("classmates.csv").as_path()]).unwrap();
        assert_eq!(export, folder.join("20210322_export.csv"));
    }

    #[test]
    fn no_export_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let folder = Utf8Path::from_path(dir.path()).unwrap();
        File::create(folder.join("classmates.csv")).unwrap();

        let err = latest_export(folder, &[folder.join("classmates.csv").as_path()]).unwrap_err();
        assert!(matches!(err, HomeworkError::MissingExport(_)));
    }

    #[test]
    fn earlier_submission_report_is_not_an_export() {
        let dir = tempfile::tempdir().unwrap();
        let folder = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(folder.join("export.csv"), "学号,姓名,作业\n").unwrap();
        fs::write(folder.join("status.csv"), "Student ID,Name,Status\n20216123,Wang,received\n").unwrap();

        let export = latest_export(folder, &[]).unwrap();
        assert_eq!(export, folder.join("export.csv"));
    }
}
