use crate::extract::PageRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Page records keyed by URL, remembering insertion order
///
/// Serializes as a map from URL to record, in visitation order.
#[derive(Debug, Clone, Default)]
pub struct PageMap {
    order: Vec<String>,
    records: HashMap<String, PageRecord>,
}

impl PageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record under its URL
    ///
    /// Records are never replaced; returns false if the URL already has one.
    pub fn insert(&mut self, record: PageRecord) -> bool {
        if self.records.contains_key(&record.url) {
            return false;
        }
        self.order.push(record.url.clone());
        self.records.insert(record.url.clone(), record);
        true
    }

    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.records.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.records.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in visitation order
    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.order.iter().filter_map(|url| self.records.get(url))
    }

    /// Number of records that carry any extracted content
    pub fn extracted_count(&self) -> usize {
        self.iter().filter(|record| !record.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.records.clear();
    }
}

impl Serialize for PageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for record in self.iter() {
            map.serialize_entry(&record.url, record)?;
        }
        map.end()
    }
}
