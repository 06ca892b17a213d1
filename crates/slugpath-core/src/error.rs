use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::model::PageId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("page {page} references parent {parent}, which is not in the collection")]
    DanglingParentReference { page: PageId, parent: PageId },

    #[error("page {page} has no slug")]
    MissingSlug { page: PageId },

    #[error("parent chain of {page} revisits {parent}")]
    CyclicHierarchy { page: PageId, parent: PageId },

    #[error("page id {id} appears more than once")]
    DuplicatePageId { id: PageId },

    #[error("page {id} not found")]
    PageNotFound { id: PageId },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported page file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}
