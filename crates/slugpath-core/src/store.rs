use crate::model::{Page, PageId};
use std::collections::{HashMap, HashSet};

/// Identifier-keyed view over a page collection.
///
/// The first record for an identifier wins; later records with the same
/// identifier are kept out of the index and remembered as duplicates.
pub struct PageIndex<'a> {
    pages: HashMap<&'a PageId, &'a Page>,
    order: Vec<&'a Page>,
    children: HashMap<&'a PageId, Vec<&'a PageId>>,
    duplicates: HashSet<&'a PageId>,
}

impl<'a> PageIndex<'a> {
    pub fn new(pages: &'a [Page]) -> Self {
        let mut index = Self {
            pages: HashMap::with_capacity(pages.len()),
            order: Vec::with_capacity(pages.len()),
            children: HashMap::new(),
            duplicates: HashSet::new(),
        };

        for page in pages {
            if index.pages.contains_key(&page.id) {
                log::warn!("duplicate page id {}, keeping the first record", page.id);
                index.duplicates.insert(&page.id);
                continue;
            }
            index.pages.insert(&page.id, page);
            index.order.push(page);

            if let Some(parent) = &page.parent {
                index.children.entry(parent).or_default().push(&page.id);
            }
        }

        index
    }

    pub fn get(&self, id: &PageId) -> Option<&'a Page> {
        self.pages.get(id).copied()
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.pages.contains_key(id)
    }

    /// Direct children, in collection order
    pub fn children_of(&self, id: &PageId) -> &[&'a PageId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_duplicate(&self, id: &PageId) -> bool {
        self.duplicates.contains(id)
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &'a PageId> + '_ {
        self.duplicates.iter().copied()
    }

    /// Unique pages in collection order
    pub fn iter(&self) -> impl Iterator<Item = &'a Page> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_wins() {
        let pages = vec![
            Page::new("a", "first"),
            Page::new("b", "b"),
            Page::new("a", "second"),
        ];
        let index = PageIndex::new(&pages);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&PageId::new("a")).unwrap().slug(), Some("first"));
        assert!(index.is_duplicate(&PageId::new("a")));
        assert!(!index.is_duplicate(&PageId::new("b")));
        assert_eq!(index.duplicates().count(), 1);
    }

    #[test]
    fn test_children_follow_collection_order() {
        let pages = vec![
            Page::new("root", "root"),
            Page::new("z", "z").with_parent("root"),
            Page::new("y", "y").with_parent("root"),
            Page::new("leaf", "leaf").with_parent("z"),
        ];
        let index = PageIndex::new(&pages);

        let children: Vec<&str> = index
            .children_of(&PageId::new("root"))
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(children, vec!["z", "y"]);
        assert!(index.children_of(&PageId::new("leaf")).is_empty());
    }

    #[test]
    fn test_lookup_is_exact() {
        let pages = vec![Page::new("Home", "home")];
        let index = PageIndex::new(&pages);

        assert!(index.contains(&PageId::new("Home")));
        assert!(!index.contains(&PageId::new("home")));
        assert!(!index.contains(&PageId::new("Home ")));
    }
}
