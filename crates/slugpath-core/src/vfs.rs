use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::EntryConfig;
use crate::entry::PageRecord;
use crate::error::{Error, Result};
use crate::model::Page;

/// Supplies the full page collection for a resolution
pub trait PageSource {
    fn fetch_all(&self) -> Result<Vec<Page>>;
}

/// Abstract interface for file system operations.
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// List all files with one of the given extensions under the root directory.
    /// This should be a recursive search. An unreadable entry is an error.
    fn list_files(&self, root: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>>;
}

/// Standard implementation of FileSystem using std::fs and walkdir.
pub struct PhysicalFileSystem;

impl FileSystem for PhysicalFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, root: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
                    if extensions.contains(&ext) {
                        files.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(files)
    }
}

const PAGE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Accepted layouts of a page file
#[derive(Deserialize)]
#[serde(untagged)]
enum PageDocument {
    List(Vec<PageRecord>),
    /// Collection response: { "items": [...] }
    Collection { items: Vec<PageRecord> },
    Single(PageRecord),
}

impl PageDocument {
    fn into_records(self) -> Vec<PageRecord> {
        match self {
            PageDocument::List(records) => records,
            PageDocument::Collection { items } => items,
            PageDocument::Single(record) => vec![record],
        }
    }
}

fn read_pages(fs: &dyn FileSystem, path: &Path, entry: &EntryConfig) -> Result<Vec<Page>> {
    let content = fs.read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: PageDocument = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    Ok(document
        .into_records()
        .into_iter()
        .map(|record| record.into_page(entry))
        .collect())
}

/// Pages from a single JSON or YAML file
pub struct FileSource {
    path: PathBuf,
    entry: EntryConfig,
    fs: Box<dyn FileSystem>,
}

impl FileSource {
    pub fn new(path: PathBuf, entry: EntryConfig) -> Self {
        Self::with_fs(path, entry, Box::new(PhysicalFileSystem))
    }

    pub fn with_fs(path: PathBuf, entry: EntryConfig, fs: Box<dyn FileSystem>) -> Self {
        Self { path, entry, fs }
    }
}

impl PageSource for FileSource {
    fn fetch_all(&self) -> Result<Vec<Page>> {
        let pages = read_pages(&*self.fs, &self.path, &self.entry)?;
        log::info!("loaded {} pages from {}", pages.len(), self.path.display());
        Ok(pages)
    }
}

/// Pages from every JSON or YAML file under a directory.
///
/// Files are read in sorted path order, so the first record of a
/// duplicated id is the same from run to run.
pub struct DirectorySource {
    root: PathBuf,
    entry: EntryConfig,
    fs: Box<dyn FileSystem>,
}

impl DirectorySource {
    pub fn new(root: PathBuf, entry: EntryConfig) -> Self {
        Self::with_fs(root, entry, Box::new(PhysicalFileSystem))
    }

    pub fn with_fs(root: PathBuf, entry: EntryConfig, fs: Box<dyn FileSystem>) -> Self {
        Self { root, entry, fs }
    }
}

impl PageSource for DirectorySource {
    fn fetch_all(&self) -> Result<Vec<Page>> {
        let mut files = self
            .fs
            .list_files(&self.root, PAGE_EXTENSIONS)
            .map_err(|source| Error::Io {
                path: self.root.clone(),
                source,
            })?;
        files.sort();

        let mut pages = Vec::new();
        for file in &files {
            pages.extend(read_pages(&*self.fs, file, &self.entry)?);
        }

        log::info!(
            "loaded {} pages from {} files under {}",
            pages.len(),
            files.len(),
            self.root.display()
        );
        Ok(pages)
    }
}

/// Pick a source for `path`: a directory or a single file
pub fn source_for_path(path: &Path, entry: EntryConfig) -> Box<dyn PageSource> {
    if path.is_dir() {
        Box::new(DirectorySource::new(path.to_path_buf(), entry))
    } else {
        Box::new(FileSource::new(path.to_path_buf(), entry))
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn fetch_all(&self) -> Result<Vec<Page>> {
        (**self).fetch_all()
    }
}

impl PageSource for Vec<Page> {
    fn fetch_all(&self) -> Result<Vec<Page>> {
        Ok(self.clone())
    }
}
