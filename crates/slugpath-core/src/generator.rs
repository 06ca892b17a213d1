//! Fetch, resolve, write back.
//!
//! The content store is reached through `PageSource`; the computed path goes
//! out through `PathSink`. Each call fetches the collection once.

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::model::{Page, PageId};
use crate::resolver::{PathResolver, Resolution};
use crate::vfs::PageSource;

/// Receives computed paths, e.g. the path field of an entry
pub trait PathSink {
    fn write_path(&mut self, id: &PageId, segments: &[String]) -> Result<()>;

    /// Persist buffered writes
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct PathGenerator<S: PageSource> {
    source: S,
    config: ResolverConfig,
}

impl<S: PageSource> PathGenerator<S> {
    pub fn new(source: S, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve the stored page with the given id
    pub fn generate(&self, id: &PageId) -> Result<Resolution> {
        let pages = self.source.fetch_all()?;
        PathResolver::with_config(&pages, self.config.clone()).resolve_id(id)
    }

    /// Resolve a page as currently edited.
    ///
    /// The slug and parent come from `page`, not from the stored record with
    /// the same id; only ancestors are read from the source.
    pub fn generate_for(&self, page: &Page) -> Result<Resolution> {
        let pages = self.source.fetch_all()?;
        PathResolver::with_config(&pages, self.config.clone()).resolve(page)
    }

    /// Generate the path for `id` and write it to `sink`
    pub fn apply(&self, id: &PageId, sink: &mut dyn PathSink) -> Result<Resolution> {
        let resolution = self.generate(id)?;
        sink.write_path(&resolution.target, &resolution.segments)?;
        sink.flush()?;
        Ok(resolution)
    }

    /// Generate and write the path for `id` and for every page below it
    pub fn apply_with_descendants(
        &self,
        id: &PageId,
        sink: &mut dyn PathSink,
    ) -> Result<Vec<Resolution>> {
        let pages = self.source.fetch_all()?;
        let resolver = PathResolver::with_config(&pages, self.config.clone());

        let mut resolutions = vec![resolver.resolve_id(id)?];
        for descendant in resolver.descendants_of(id) {
            resolutions.push(resolver.resolve_id(&descendant)?);
        }

        for resolution in &resolutions {
            sink.write_path(&resolution.target, &resolution.segments)?;
        }
        sink.flush()?;
        log::info!("wrote {} paths below {}", resolutions.len(), id);

        Ok(resolutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Policy;
    use crate::error::Error;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct FieldStore {
        paths: BTreeMap<PageId, Vec<String>>,
    }

    impl PathSink for FieldStore {
        fn write_path(&mut self, id: &PageId, segments: &[String]) -> Result<()> {
            self.paths.insert(id.clone(), segments.to_vec());
            Ok(())
        }
    }

    fn pages() -> Vec<Page> {
        vec![
            Page::new("home", "home"),
            Page::new("blog", "blog").with_parent("home"),
            Page::new("post", "hello-world").with_parent("blog"),
            Page::new("about", "about").with_parent("home"),
        ]
    }

    #[test]
    fn test_apply_writes_segments() {
        let generator = PathGenerator::new(pages(), ResolverConfig::default());
        let mut sink = FieldStore::default();

        let resolution = generator.apply(&PageId::new("post"), &mut sink).unwrap();

        assert!(resolution.is_complete());
        assert_eq!(
            sink.paths[&PageId::new("post")],
            vec!["home", "blog", "hello-world"]
        );
    }

    #[test]
    fn test_generate_for_edited_page() {
        let generator = PathGenerator::new(pages(), ResolverConfig::default());
        // Post moved under "about" in the editor but not saved yet
        let edited = Page::new("post", "hello-world").with_parent("about");

        let resolution = generator.generate_for(&edited).unwrap();
        assert_eq!(resolution.segments, vec!["home", "about", "hello-world"]);
    }

    #[test]
    fn test_apply_with_descendants() {
        let generator = PathGenerator::new(pages(), ResolverConfig::default());
        let mut sink = FieldStore::default();

        let resolutions = generator
            .apply_with_descendants(&PageId::new("blog"), &mut sink)
            .unwrap();

        assert_eq!(resolutions.len(), 2);
        assert_eq!(sink.paths.len(), 2);
        assert_eq!(sink.paths[&PageId::new("blog")], vec!["home", "blog"]);
        assert!(!sink.paths.contains_key(&PageId::new("about")));
    }

    #[test]
    fn test_strict_generator_leaves_sink_untouched() {
        let mut pages = pages();
        pages.push(Page::new("orphan", "orphan").with_parent("deleted"));
        let config = ResolverConfig {
            policy: Policy::Strict,
            ..ResolverConfig::default()
        };
        let generator = PathGenerator::new(pages, config);
        let mut sink = FieldStore::default();

        let err = generator
            .apply(&PageId::new("orphan"), &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::DanglingParentReference { .. }));
        assert!(sink.paths.is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let generator = PathGenerator::new(pages(), ResolverConfig::default());
        let err = generator.generate(&PageId::new("nope")).unwrap_err();
        assert!(matches!(err, Error::PageNotFound { .. }));
    }
}
