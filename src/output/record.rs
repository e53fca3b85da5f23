//! Record projection
//!
//! Projects scraped records onto the caller-requested field list so
//! every record in a run shares one schema, in one order, regardless of
//! what each source record actually carried.

use crate::scrape::page::ScrapedPage;
use crate::scrape::search::SearchResult;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder for requested fields absent from the source record
pub const FIELD_NOT_FOUND: &str = "Field not found";

/// A record that can be projected onto a field list
pub trait Projectable {
    /// Returns the value of a named field, if the record carries it
    fn field(&self, name: &str) -> Option<&str>;
}

impl Projectable for ScrapedPage {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "url" => Some(&self.url),
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "full_content" => Some(&self.full_content),
            _ => None,
        }
    }
}

impl Projectable for SearchResult {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "url" => Some(&self.url),
            "title" => Some(&self.title),
            "snippet" => Some(&self.snippet),
            _ => None,
        }
    }
}

/// Uniform output record: the requested fields in the requested order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    fields: Vec<(String, String)>,
}

impl OutputRecord {
    /// Value of a field, if it was requested
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field (name, value) pairs in output order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialized as a map so JSON output preserves the caller's field order.
impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Projects records onto the requested field list
///
/// A record is retained only when its own url field is non-empty; other
/// fields may be legitimately missing, in which case they carry the
/// "Field not found" placeholder. Retained records keep their input
/// order.
pub fn project<R: Projectable>(records: &[R], fields: &[String]) -> Vec<OutputRecord> {
    records
        .iter()
        .filter(|record| record.field("url").map_or(false, |url| !url.is_empty()))
        .map(|record| OutputRecord {
            fields: fields
                .iter()
                .map(|name| {
                    let value = record.field(name).unwrap_or(FIELD_NOT_FOUND);
                    (name.clone(), value.to_string())
                })
                .collect(),
        })
        .collect()
}
