use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use slugpath_core::{Error, PageId, PathFormat, PathSink, Resolution};

use crate::config::OutputFormat;

/// Writes resolutions to the terminal
pub struct Printer<'a> {
    pub format: OutputFormat,
    pub path_format: &'a PathFormat,
    /// Include the visited chain and anomalies
    pub show_chain: bool,
    /// Prefix each result with its page id
    pub with_ids: bool,
}

#[derive(Serialize)]
struct ResolutionView<'a> {
    id: &'a PageId,
    segments: &'a [String],
    path: String,
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain: Option<&'a [PageId]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anomalies: Option<&'a [slugpath_core::Anomaly]>,
}

impl Printer<'_> {
    pub fn print<W: Write>(&self, out: &mut W, resolutions: &[Resolution]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.print_json(out, resolutions),
            OutputFormat::Path | OutputFormat::Lines => {
                for (i, resolution) in resolutions.iter().enumerate() {
                    if self.format == OutputFormat::Lines && i > 0 {
                        writeln!(out)?;
                    }
                    self.print_text(out, resolution)?;
                }
                Ok(())
            }
        }
    }

    fn print_text<W: Write>(&self, out: &mut W, resolution: &Resolution) -> io::Result<()> {
        match self.format {
            OutputFormat::Lines => {
                if self.with_ids {
                    writeln!(out, "# {}", resolution.target)?;
                }
                for segment in &resolution.segments {
                    writeln!(out, "{}", segment)?;
                }
            }
            _ => {
                let path = resolution.render(self.path_format);
                if self.with_ids {
                    writeln!(out, "{}\t{}", resolution.target, path)?;
                } else {
                    writeln!(out, "{}", path)?;
                }
            }
        }

        if self.show_chain {
            let chain: Vec<&str> = resolution.chain.iter().map(PageId::as_str).collect();
            writeln!(out, "  chain: {}", chain.join(" -> "))?;
            for anomaly in &resolution.anomalies {
                writeln!(out, "  anomaly: {}", Error::from(anomaly.clone()))?;
            }
        }
        Ok(())
    }

    fn print_json<W: Write>(&self, out: &mut W, resolutions: &[Resolution]) -> io::Result<()> {
        let views: Vec<ResolutionView> = resolutions
            .iter()
            .map(|resolution| ResolutionView {
                id: &resolution.target,
                segments: &resolution.segments,
                path: resolution.render(self.path_format),
                complete: resolution.is_complete(),
                chain: self.show_chain.then_some(resolution.chain.as_slice()),
                anomalies: self.show_chain.then_some(resolution.anomalies.as_slice()),
            })
            .collect();

        let json = if self.with_ids {
            serde_json::to_string_pretty(&views)
        } else {
            match views.first() {
                Some(view) => serde_json::to_string_pretty(view),
                None => serde_json::to_string_pretty(&views),
            }
        }
        .map_err(io::Error::other)?;

        writeln!(out, "{}", json)
    }
}

/// Path field store kept in a JSON file: `{ "<page id>": ["slug", ...] }`.
///
/// Existing entries are loaded on open and kept unless overwritten.
pub struct JsonFileSink {
    path: PathBuf,
    fields: BTreeMap<String, Vec<String>>,
}

impl JsonFileSink {
    pub fn open(path: &Path) -> slugpath_core::Result<Self> {
        let fields = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }
}

impl PathSink for JsonFileSink {
    fn write_path(&mut self, id: &PageId, segments: &[String]) -> slugpath_core::Result<()> {
        self.fields.insert(id.to_string(), segments.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> slugpath_core::Result<()> {
        let json = serde_json::to_string_pretty(&self.fields).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("saved {} paths to {}", self.fields.len(), self.path.display());
        Ok(())
    }
}

/// Sink for runs that only print
pub struct DiscardSink;

impl PathSink for DiscardSink {
    fn write_path(&mut self, _: &PageId, _: &[String]) -> slugpath_core::Result<()> {
        Ok(())
    }
}
