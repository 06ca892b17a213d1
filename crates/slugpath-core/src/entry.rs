//! Localized CMS entries.
//!
//! Content stores hand out entries whose fields are keyed by locale:
//! `{"sys": {"id": "c"}, "fields": {"slug": {"nl-NL": "c-slug"}}}`. The slug
//! and parent field names and the locale come from `EntryConfig`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::EntryConfig;
use crate::model::{Page, PageId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySys {
    pub id: PageId,
}

/// Raw entry as fetched from the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedEntry {
    pub sys: EntrySys,
    /// field name -> locale -> value
    pub fields: HashMap<String, HashMap<String, serde_json::Value>>,
}

impl LocalizedEntry {
    /// Value of `field` in `locale`; `null` counts as absent
    pub fn field(&self, field: &str, locale: &str) -> Option<&serde_json::Value> {
        self.fields
            .get(field)?
            .get(locale)
            .filter(|value| !value.is_null())
    }

    pub fn to_page(&self, config: &EntryConfig) -> Page {
        let id = self.sys.id.clone();

        let slug = match self.field(&config.slug_field, &config.locale) {
            Some(serde_json::Value::String(slug)) => Some(slug.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
            Some(other) => {
                log::warn!("entry {}: slug is not a string: {}", id, other);
                None
            }
            None => None,
        };

        let parent = self
            .field(&config.parent_field, &config.locale)
            .and_then(|value| match PageId::deserialize(value) {
                Ok(parent) => Some(parent),
                Err(e) => {
                    log::warn!("entry {}: unreadable parent link {}: {}", id, value, e);
                    None
                }
            });

        Page { id, slug, parent }
    }
}

/// One record in a page file: either a plain page or a localized entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageRecord {
    Entry(LocalizedEntry),
    Page(Page),
}

impl PageRecord {
    pub fn into_page(self, config: &EntryConfig) -> Page {
        match self {
            PageRecord::Entry(entry) => entry.to_page(config),
            PageRecord::Page(page) => page,
        }
    }
}
