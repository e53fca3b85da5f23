//! CSV output writer

use crate::output::record::OutputRecord;
use crate::output::OutputError;
use std::path::Path;

/// Writes records as CSV with the field list as the header row
///
/// Every projected record carries exactly the requested fields, so each
/// row lines up with the header by construction.
pub fn save_to_csv(
    records: &[OutputRecord],
    fields: &[String],
    path: &Path,
) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(fields)?;
    for record in records {
        let row: Vec<&str> = fields
            .iter()
            .map(|field| record.get(field).unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::record::{project, FIELD_NOT_FOUND};
    use crate::scrape::page::ScrapedPage;
    use tempfile::tempdir;

    fn page(url: &str) -> ScrapedPage {
        ScrapedPage {
            url: url.to_string(),
            title: "A Title".to_string(),
            description: "A description".to_string(),
            full_content: "Body text".to_string(),
        }
    }

    #[test]
    fn test_save_to_csv_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let fields = vec!["url".to_string(), "title".to_string()];
        let records = project(&[page("https://a"), page("https://b")], &fields);

        save_to_csv(&records, &fields, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "url,title");
        assert_eq!(lines[1], "https://a,A Title");
        assert_eq!(lines[2], "https://b,A Title");
    }

    #[test]
    fn test_missing_fields_carry_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let fields = vec!["url".to_string(), "snippet".to_string()];
        let records = project(&[page("https://a")], &fields);

        save_to_csv(&records, &fields, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().nth(1).unwrap().contains(FIELD_NOT_FOUND));
    }

    #[test]
    fn test_header_only_when_no_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let fields = vec!["url".to_string()];
        save_to_csv(&[], &fields, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "url");
    }
}
