//! Slugpath Core Library
//!
//! Resolves the hierarchical URL path of a page by walking its parent chain.
//! The resolver itself is pure; page sources and sinks live at the edges.
//!

mod config;
pub mod entry;
pub mod error;
pub mod generator;
pub mod model;
pub mod resolver;
pub mod store;
pub mod utils;
pub mod vfs;

pub use config::{
    EntryConfig, LoggingConfig, PathFormat, Policy, ResolverConfig, SlugpathConfig,
};
pub use error::{Error, Result};
pub use generator::{PathGenerator, PathSink};
pub use model::{Page, PageId};
pub use resolver::{resolve_path, Anomaly, PathResolver, Resolution};
pub use store::PageIndex;
pub use utils::{render_path, slugify};
pub use vfs::{DirectorySource, FileSource, PageSource};
