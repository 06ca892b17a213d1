//! Parent-chain path resolution.
//!
//! A page's path is the slug of every page from the hierarchy root down to
//! the page itself. The walk follows `parent` references by exact id lookup
//! and stops at a root, at a parent missing from the collection, or at a
//! parent it has already visited.

use serde::Serialize;
use std::collections::{HashSet, VecDeque};

use crate::config::{PathFormat, Policy, ResolverConfig};
use crate::error::{Error, Result};
use crate::model::{Page, PageId};
use crate::store::PageIndex;
use crate::utils::{render_path, slugify};


/// Deviation from a well-formed hierarchy, recorded by lenient resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// `page` points at a parent that is not in the collection; the path is truncated
    DanglingParent { page: PageId, parent: PageId },
    /// `page` has no usable slug; its segment is left out
    MissingSlug { page: PageId },
    /// `page` points back at `parent`, which was already on the chain; the path is truncated
    Cycle { page: PageId, parent: PageId },
    /// More than one record carries `id`; the first one was used
    DuplicateId { id: PageId },
}

impl Anomaly {
    /// Whether this anomaly cut the walk short
    pub fn truncates(&self) -> bool {
        matches!(self, Anomaly::DanglingParent { .. } | Anomaly::Cycle { .. })
    }
}

/// Result of resolving one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub target: PageId,
    /// Slugs, root first, target last
    pub segments: Vec<String>,
    /// Visited page ids, root first, target last
    pub chain: Vec<PageId>,
    pub anomalies: Vec<Anomaly>,
}

impl Resolution {
    /// True when the walk reached a hierarchy root
    pub fn is_complete(&self) -> bool {
        !self.anomalies.iter().any(Anomaly::truncates)
    }

    pub fn render(&self, format: &PathFormat) -> String {
        render_path(&self.segments, format)
    }
}

/// Resolves page paths against one page collection
pub struct PathResolver<'a> {
    index: PageIndex<'a>,
    config: ResolverConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(pages: &'a [Page]) -> Self {
        Self::with_config(pages, ResolverConfig::default())
    }

    pub fn with_config(pages: &'a [Page], config: ResolverConfig) -> Self {
        Self {
            index: PageIndex::new(pages),
            config,
        }
    }

    pub fn index(&self) -> &PageIndex<'a> {
        &self.index
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the path of `target`.
    ///
    /// `target` does not have to be part of the collection; only its
    /// ancestors are looked up. Under `Policy::Lenient` this never fails.
    pub fn resolve(&self, target: &Page) -> Result<Resolution> {
        let mut walk = Walk::new(target);
        let mut visited: HashSet<&PageId> = HashSet::new();

        self.visit(target, &mut walk)?;
        visited.insert(&target.id);

        let mut current = target;
        while let Some(parent_id) = &current.parent {
            if visited.contains(parent_id) {
                self.anomaly(
                    &mut walk,
                    Anomaly::Cycle {
                        page: current.id.clone(),
                        parent: parent_id.clone(),
                    },
                )?;
                break;
            }

            let Some(parent) = self.index.get(parent_id) else {
                self.anomaly(
                    &mut walk,
                    Anomaly::DanglingParent {
                        page: current.id.clone(),
                        parent: parent_id.clone(),
                    },
                )?;
                break;
            };

            self.visit(parent, &mut walk)?;
            visited.insert(&parent.id);
            current = parent;
        }

        Ok(walk.finish())
    }

    /// Resolve the page with the given id
    pub fn resolve_id(&self, id: &PageId) -> Result<Resolution> {
        let page = self
            .index
            .get(id)
            .ok_or_else(|| Error::PageNotFound { id: id.clone() })?;
        self.resolve(page)
    }

    /// Resolve every page in collection order, duplicates excluded
    pub fn resolve_all(&self) -> Vec<(PageId, Result<Resolution>)> {
        self.index
            .iter()
            .map(|page| (page.id.clone(), self.resolve(page)))
            .collect()
    }

    /// Every page whose chain passes through `id`, breadth first.
    ///
    /// These are the paths that change when the page's slug or parent does.
    pub fn descendants_of(&self, id: &PageId) -> Vec<PageId> {
        let mut seen: HashSet<&PageId> = HashSet::from([id]);
        let mut queue: VecDeque<&PageId> = VecDeque::from([id]);
        let mut descendants = Vec::new();

        while let Some(current) = queue.pop_front() {
            for child in self.index.children_of(current) {
                if seen.insert(*child) {
                    descendants.push((*child).clone());
                    queue.push_back(*child);
                }
            }
        }

        descendants
    }

    /// Prepend `page` to the walk
    fn visit(&self, page: &Page, walk: &mut Walk) -> Result<()> {
        log::debug!("visiting {} (parent: {:?})", page.id, page.parent);

        if self.index.is_duplicate(&page.id) {
            self.anomaly(walk, Anomaly::DuplicateId { id: page.id.clone() })?;
        }

        walk.chain.push_front(page.id.clone());

        match self.segment(page) {
            Some(segment) => walk.segments.push_front(segment),
            None => self.anomaly(walk, Anomaly::MissingSlug { page: page.id.clone() })?,
        }

        Ok(())
    }

    fn segment(&self, page: &Page) -> Option<String> {
        let slug = page.slug()?;
        if !self.config.normalize_slugs {
            return Some(slug.to_string());
        }
        let normalized = slugify(slug);
        (!normalized.is_empty()).then_some(normalized)
    }

    /// Record an anomaly, or fail with it under the strict policy
    fn anomaly(&self, walk: &mut Walk, anomaly: Anomaly) -> Result<()> {
        if self.config.policy == Policy::Strict {
            return Err(anomaly.into());
        }
        log::warn!("resolving {}: {:?}", walk.target, anomaly);
        walk.anomalies.push(anomaly);
        Ok(())
    }
}

/// Accumulator for one resolution
struct Walk {
    target: PageId,
    segments: VecDeque<String>,
    chain: VecDeque<PageId>,
    anomalies: Vec<Anomaly>,
}

impl Walk {
    fn new(target: &Page) -> Self {
        Self {
            target: target.id.clone(),
            segments: VecDeque::new(),
            chain: VecDeque::new(),
            anomalies: Vec::new(),
        }
    }

    fn finish(self) -> Resolution {
        Resolution {
            target: self.target,
            segments: self.segments.into(),
            chain: self.chain.into(),
            anomalies: self.anomalies,
        }
    }
}

impl From<Anomaly> for Error {
    fn from(anomaly: Anomaly) -> Self {
        match anomaly {
            Anomaly::DanglingParent { page, parent } => {
                Error::DanglingParentReference { page, parent }
            }
            Anomaly::MissingSlug { page } => Error::MissingSlug { page },
            Anomaly::Cycle { page, parent } => Error::CyclicHierarchy { page, parent },
            Anomaly::DuplicateId { id } => Error::DuplicatePageId { id },
        }
    }
}

/// Resolve the slug chain of `target` against `all_pages`.
///
/// Lenient: a dangling parent or a cycle truncates the path, missing slugs are
/// left out.
///
/// ```
/// use slugpath_core::{resolve_path, Page};
///
/// let pages = vec![
///     Page::new("a", "a-slug"),
///     Page::new("b", "b-slug").with_parent("a"),
///     Page::new("c", "c-slug").with_parent("b"),
/// ];
/// assert_eq!(resolve_path(&pages[2], &pages), vec!["a-slug", "b-slug", "c-slug"]);
/// ```
pub fn resolve_path(target: &Page, all_pages: &[Page]) -> Vec<String> {
    // Lenient resolution records anomalies instead of failing.
    PathResolver::new(all_pages)
        .resolve(target)
        .map(|resolution| resolution.segments)
        .unwrap_or_default()
}
