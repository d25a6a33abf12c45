use std::io::Read;

use camino::Utf8Path;
use csv::ReaderBuilder;

use crate::{
    homework_config::HomeworkConfig,
    types::{ExportSource, FilenameMapping, HomeworkError},
    util::{field, record_line, require_column},
};

#[derive(Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Name the file has on disk after download.
    pub old_name: String,
    pub extension: String,
}

/// Builds the `old name -> ID_Name.ext` mapping from the survey export.
///
/// The survey platform only keeps the latest submission per student in the
/// export, so when two rows name the same attachment the later row wins.
/// Older attachments that no row mentions stay untouched on disk.
pub fn filename_mapping(
    export: &Utf8Path,
    config: &HomeworkConfig,
    source: ExportSource,
) -> Result<FilenameMapping, HomeworkError> {
    let reader = ReaderBuilder::new().flexible(true).from_path(export)?;
    filename_mapping_from_reader(reader, export, config, source)
}

fn filename_mapping_from_reader<R: Read>(
    mut reader: csv::Reader<R>,
    export: &Utf8Path,
    config: &HomeworkConfig,
    source: ExportSource,
) -> Result<FilenameMapping, HomeworkError> {
    let header = reader.headers()?.clone();
    let sid_idx = require_column(export, &header, &config.keywords.student_id)?;
    let name_idx = require_column(export, &header, &config.keywords.student_name)?;
    let link_idx = require_column(export, &header, &config.keywords.attachment)?;

    let mut mapping = FilenameMapping::new();
    for record in reader.records() {
        let record = record?;
        let malformed = |reason: String| HomeworkError::MalformedRow {
            path: export.to_path_buf(),
            line: record_line(&record),
            reason,
        };

        let sid = normalize_student_id(
            field(export, &record, sid_idx)?,
            &config.id_prefix,
            config.id_suffix_len,
        );
        let name = field(export, &record, name_idx)?.trim();
        let attachment = parse_attachment(field(export, &record, link_idx)?, source).map_err(malformed)?;

        let new_name = format!("{}_{}.{}", sid, name, attachment.extension);
        if let Some(previous) = mapping.insert(attachment.old_name.clone(), new_name) {
            log::debug!("{} resubmitted, dropping mapping to {}", attachment.old_name, previous);
        }
    }
    log::info!("{} attachments listed in {}", mapping.len(), export);
    Ok(mapping)
}

/// Only the last `suffix_len` characters of a typed-in ID are trusted; the
/// leading institution-year digits are often mistyped, so they are replaced by `prefix`.
pub fn normalize_student_id(raw: &str, prefix: &str, suffix_len: usize) -> String {
    let raw = raw.trim();
    let tail_start = match suffix_len.checked_sub(1) {
        Some(n) => raw.char_indices().rev().nth(n).map_or(0, |(i, _)| i),
        None => raw.len(),
    };
    format!("{}{}", prefix, raw[tail_start..].trim())
}

/// Pulls the downloaded file name and extension out of an attachment cell.
///
/// The cell holds quoted segments. The second-to-last one is the display name
/// the student uploaded. For cloud storage downloads the first one is a link
/// whose 2nd to 4th `=`-separated values (survey, question, file) name the file.
pub fn parse_attachment(raw: &str, source: ExportSource) -> Result<Attachment, String> {
    let segments: Vec<&str> = raw.split('"').collect();
    if segments.len() < 2 {
        return Err(format!("attachment cell has no quoted file name: {:?}", raw));
    }
    let display_name = segments[segments.len() - 2];
    let extension = display_name
        .rsplit_once('.')
        .map_or(display_name, |(_, ext)| ext)
        .trim()
        .to_string();

    let old_name = match source {
        ExportSource::Direct => display_name.trim().to_string(),
        ExportSource::CloudStorage => {
            let link = segments[1].trim();
            let values: Vec<&str> = link
                .split('=')
                .skip(1)
                .take(3)
                .map(|v| v.split_once('&').map_or(v, |(value, _)| value))
                .collect();
            if values.len() < 3 {
                return Err(format!("cloud storage link has fewer than 3 parameters: {:?}", link));
            }
            values.join("_")
        }
    };

    Ok(Attachment { old_name, extension })
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;
    use csv::ReaderBuilder;

    use super::{filename_mapping_from_reader, normalize_student_id, parse_attachment, Attachment};
    use crate::{
        homework_config::HomeworkConfig,
        types::{ExportSource, HomeworkError},
    };

    const CLOUD_CELL: &str =
        r#"=HYPERLINK("https://share.weiyun.com/x?sid=S1&qid=Q2&file=file9&t=1","oldname123.pdf")"#;

    fn mapping_of(csv_text: &str, source: ExportSource) -> Result<crate::types::FilenameMapping, HomeworkError> {
        let reader = ReaderBuilder::new().flexible(true).from_reader(csv_text.as_bytes());
        filename_mapping_from_reader(reader, Utf8Path::new("export.csv"), &HomeworkConfig::default(), source)
    }

    #[test]
    fn normalized_id_is_prefix_plus_last_three() {
        assert_eq!(normalize_student_id("2021612345", "20216", 3), "20216345");
        assert_eq!(normalize_student_id(" 19216007 \t", "20216", 3), "20216007");
        assert_eq!(normalize_student_id("45", "20216", 3), "2021645");
        assert_eq!(normalize_student_id("12345", "20216", 0), "20216");
    }

    #[test]
    fn cloud_storage_name_is_built_from_link_parameters() {
        let attachment = parse_attachment(CLOUD_CELL, ExportSource::CloudStorage).unwrap();
        assert_eq!(
            attachment,
            Attachment {
                old_name: String::from("S1_Q2_file9"),
                extension: String::from("pdf"),
            }
        );
    }

    #[test]
    fn direct_export_uses_display_name() {
        let attachment = parse_attachment(CLOUD_CELL, ExportSource::Direct).unwrap();
        assert_eq!(attachment.old_name, "oldname123.pdf");
        assert_eq!(attachment.extension, "pdf");
    }

    #[test]
    fn unparseable_cells_are_rejected() {
        assert!(parse_attachment("no quotes here", ExportSource::Direct).is_err());
        assert!(parse_attachment(r#""https://x?a=1&b","a.pdf""#, ExportSource::CloudStorage).is_err());
    }

    #[test]
    fn export_rows_map_to_canonical_names() {
        let csv_text = format!(
            "序号,学号,姓名,上传作业\n1,2021612345, Li Hua ,\"{}\"\n",
            CLOUD_CELL.replace('"', "\"\"")
        );
        let mapping = mapping_of(&csv_text, ExportSource::CloudStorage).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["S1_Q2_file9"], "20216345_Li Hua.pdf");
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let csv_text = concat!(
            "学号,姓名,作业\n",
            "20216001,Wang,\"\"\"20216x.pdf\"\"\"\n",
            "20216002,Zhao,\"\"\"20216x.pdf\"\"\"\n",
        );
        let mapping = mapping_of(csv_text, ExportSource::Direct).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["20216x.pdf"], "20216002_Zhao.pdf");
    }

    #[test]
    fn missing_column_is_reported() {
        let err = mapping_of("学号,姓名\n20216001,Wang\n", ExportSource::Direct).unwrap_err();
        match err {
            HomeworkError::ColumnNotFound { keyword, .. } => assert_eq!(keyword, "作业"),
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn short_rows_are_malformed() {
        let err = mapping_of("学号,姓名,作业\n20216001,Wang\n", ExportSource::Direct).unwrap_err();
        assert!(matches!(err, HomeworkError::MalformedRow { line: 2, .. }));
    }
}
