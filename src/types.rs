use std::{collections::HashMap, io};

use camino::Utf8PathBuf;
use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Old platform file name -> canonical `ID_Name.ext` file name.
pub type FilenameMapping = HashMap<String, String>;

/// Where the attachments in the target folder were downloaded from.
/// The two channels name files differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExportSource {
    #[strum(serialize = "cloud storage")]
    CloudStorage,
    #[strum(serialize = "direct export")]
    Direct,
}

impl ExportSource {
    pub fn from_directly(directly: bool) -> Self {
        if directly {
            ExportSource::Direct
        } else {
            ExportSource::CloudStorage
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionStatus {
    Received,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classmate {
    pub student_id: String,
    pub name: String,
    pub submitted: bool,
}

impl Classmate {
    pub fn status(&self) -> SubmissionStatus {
        if self.submitted {
            SubmissionStatus::Received
        } else {
            SubmissionStatus::Missing
        }
    }
}

/// Class list keyed by student ID, kept in file order.
#[derive(Debug, Default)]
pub struct Roster {
    classmates: Vec<Classmate>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated ID keeps its original position and takes the new name.
    pub fn insert(&mut self, student_id: String, name: String) {
        match self.index.get(&student_id) {
            Some(&i) => {
                self.classmates[i].name = name;
                self.classmates[i].submitted = false;
            }
            None => {
                self.index.insert(student_id.clone(), self.classmates.len());
                self.classmates.push(Classmate {
                    student_id,
                    name,
                    submitted: false,
                });
            }
        }
    }

    /// Returns false when the ID is not on the roster.
    pub fn mark_submitted(&mut self, student_id: &str) -> bool {
        match self.index.get(student_id) {
            Some(&i) => {
                self.classmates[i].submitted = true;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn get(&self, student_id: &str) -> Option<&Classmate> {
        self.index.get(student_id).map(|&i| &self.classmates[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Classmate> {
        self.classmates.iter()
    }

    pub fn submitted(&self) -> impl Iterator<Item = &Classmate> {
        self.classmates.iter().filter(|c| c.submitted)
    }

    pub fn missing(&self) -> impl Iterator<Item = &Classmate> {
        self.classmates.iter().filter(|c| !c.submitted)
    }

    pub fn len(&self) -> usize {
        self.classmates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classmates.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum HomeworkError {
    #[error("no column of {path} has a header containing '{keyword}'")]
    ColumnNotFound { path: Utf8PathBuf, keyword: String },
    #[error("class list {0} does not exist")]
    MissingRoster(Utf8PathBuf),
    #[error("no exported .csv file found in {0}")]
    MissingExport(Utf8PathBuf),
    #[error("{path}, line {line}: {reason}")]
    MalformedRow {
        path: Utf8PathBuf,
        line: u64,
        reason: String,
    },
    #[error("{from} disappeared before it could be renamed")]
    SourceVanished { from: Utf8PathBuf },
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: Utf8PathBuf,
        to: Utf8PathBuf,
        source: io::Error,
    },
    #[error("failed to read config {path}: {source}")]
    Config {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
