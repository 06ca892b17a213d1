//! Slugpath CLI Library
//!
//! Command-line front end: loads a page collection from disk, resolves paths
//! through slugpath-core and prints or stores the result.

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use std::io::Write;
use std::path::PathBuf;

use slugpath_core::generator::PathGenerator;
use slugpath_core::vfs::source_for_path;
use slugpath_core::{PageId, PageSource, PathResolver, PathSink, Policy, Resolution, SlugpathConfig};

pub mod config;
mod output;

#[cfg(test)]
mod tests;

pub use config::{LogLevel, OutputFormat};
pub use output::{DiscardSink, JsonFileSink, Printer};

#[derive(Debug, Parser)]
#[command(
    name = "slugpath",
    version,
    about = "Build hierarchical URL paths from page parent chains"
)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "all"])))]
pub struct Cli {
    /// Page file (JSON or YAML) or a directory of page files
    pub source: PathBuf,

    /// Id of the page to resolve
    pub id: Option<String>,

    /// Resolve every page in the collection
    #[arg(long)]
    pub all: bool,

    /// Also resolve every page below ID
    #[arg(long, requires = "id", conflicts_with = "all")]
    pub descendants: bool,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail on dangling parents, cycles, missing slugs and duplicate ids
    #[arg(long)]
    pub strict: bool,

    /// Slugify every segment
    #[arg(long)]
    pub normalize: bool,

    /// Locale of localized entry fields
    #[arg(long)]
    pub locale: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Path)]
    pub format: OutputFormat,

    /// Print the visited chain and anomalies
    #[arg(long)]
    pub debug: bool,

    /// Store computed paths in this JSON file
    #[arg(long)]
    pub write: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Configuration file merged with command-line overrides
    pub fn settings(&self) -> anyhow::Result<SlugpathConfig> {
        let mut config = match &self.config {
            Some(path) => SlugpathConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SlugpathConfig::default(),
        };

        if self.strict {
            config.resolver.policy = Policy::Strict;
        }
        if self.normalize {
            config.resolver.normalize_slugs = true;
        }
        if let Some(locale) = &self.locale {
            config.entry.locale = locale.clone();
        }
        if self.debug {
            config.logging.show_chain = true;
        }

        Ok(config)
    }
}

pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let config = cli.settings()?;
    log::debug!("settings: {:?}", config);

    let source = source_for_path(&cli.source, config.entry.clone());
    let generator = PathGenerator::new(source, config.resolver.clone());

    let mut sink: Box<dyn PathSink> = match &cli.write {
        Some(path) => Box::new(
            JsonFileSink::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(DiscardSink),
    };

    let (resolutions, failures) = match &cli.id {
        Some(id) if !cli.all => {
            let id = PageId::new(id.as_str());
            let resolutions = if cli.descendants {
                generator.apply_with_descendants(&id, sink.as_mut())
            } else {
                generator.apply(&id, sink.as_mut()).map(|resolution| vec![resolution])
            }
            .with_context(|| format!("resolving {}", id))?;
            (resolutions, 0)
        }
        _ => resolve_all(generator.source(), &config, sink.as_mut())?,
    };

    let printer = Printer {
        format: cli.format,
        path_format: &config.format,
        show_chain: config.logging.show_chain,
        with_ids: cli.all || cli.descendants,
    };
    printer.print(out, &resolutions)?;

    if failures > 0 {
        bail!("{} pages could not be resolved", failures);
    }
    Ok(())
}

/// Resolve every page, logging failures instead of stopping at the first
fn resolve_all(
    source: &dyn PageSource,
    config: &SlugpathConfig,
    sink: &mut dyn PathSink,
) -> anyhow::Result<(Vec<Resolution>, usize)> {
    let pages = source.fetch_all().context("loading pages")?;
    let resolver = PathResolver::with_config(&pages, config.resolver.clone());

    let mut resolutions = Vec::new();
    let mut failures = 0;
    for (id, result) in resolver.resolve_all() {
        match result {
            Ok(resolution) => {
                sink.write_path(&resolution.target, &resolution.segments)?;
                resolutions.push(resolution);
            }
            Err(e) => {
                log::error!("{}: {}", id, e);
                failures += 1;
            }
        }
    }
    sink.flush()?;

    Ok((resolutions, failures))
}
