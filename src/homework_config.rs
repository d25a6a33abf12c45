use std::fs::OpenOptions;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::types::HomeworkError;

/// Header fragments used to locate columns in the exported and class list CSVs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnKeywords {
    pub student_id: String,
    pub student_name: String,
    pub attachment: String,
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        ColumnKeywords {
            student_id: String::from("学号"),
            student_name: String::from("姓名"),
            attachment: String::from("作业"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HomeworkConfig {
    /// Institution-year prefix every normalized student ID starts with.
    pub id_prefix: String,
    /// How many trailing characters of a typed-in ID are trusted.
    pub id_suffix_len: usize,
    pub keywords: ColumnKeywords,
    /// Attachment extensions considered by the rename and report passes, without the dot.
    pub extensions: Vec<String>,
}

impl Default for HomeworkConfig {
    fn default() -> Self {
        HomeworkConfig {
            id_prefix: String::from("20216"),
            id_suffix_len: 3,
            keywords: ColumnKeywords::default(),
            extensions: ["pdf", "jpg", "png", "doc", "docx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

pub fn read_config(path: &Utf8Path) -> Result<HomeworkConfig, HomeworkError> {
    let file = OpenOptions::new().read(true).open(path)?;
    serde_json::from_reader(file).map_err(|source| HomeworkError::Config {
        path: path.to_path_buf(),
        source,
    })
}
