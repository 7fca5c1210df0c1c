//! Figure destinations.
//!
//! A [`FigureSink`] is the hand-off point to the external renderer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RenderResult;
use crate::figure::Figure;

/// Figure output destination trait
pub trait FigureSink: Send + Sync {
    /// Deliver a named figure
    fn send(&self, name: &str, figure: &Figure) -> RenderResult<()>;
}

/// On-disk figure format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    /// Plotly JSON
    #[default]
    Json,
    /// Standalone HTML page
    Html,
}

impl FigureFormat {
    /// File extension
    pub fn extension(&self) -> &'static str {
        match self {
            FigureFormat::Json => "json",
            FigureFormat::Html => "html",
        }
    }
}

/// Record of a written figure
#[derive(Debug, Clone)]
pub struct WrittenFigure {
    /// File path
    pub path: PathBuf,
    /// Figure name
    pub name: String,
    /// Size in bytes
    pub size: usize,
    /// Written timestamp
    pub written_at: String,
}

/// Writes each figure to `<output_dir>/<name>.<ext>`.
pub struct FileSink {
    output_dir: PathBuf,
    format: FigureFormat,
    written: RwLock<Vec<WrittenFigure>>,
}

impl FileSink {
    /// Create a sink, creating the output directory if needed.
    pub fn new(output_dir: impl AsRef<Path>, format: FigureFormat) -> RenderResult<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            format,
            written: RwLock::new(Vec::new()),
        })
    }

    /// Write a figure and return its path.
    pub fn write(&self, name: &str, figure: &Figure) -> RenderResult<PathBuf> {
        let content = match self.format {
            FigureFormat::Json => figure.to_json()?,
            FigureFormat::Html => figure.to_html()?,
        };
        let path = self
            .output_dir
            .join(format!("{}.{}", name, self.format.extension()));
        fs::write(&path, &content)?;

        let record = WrittenFigure {
            path: path.clone(),
            name: name.to_string(),
            size: content.len(),
            written_at: chrono::Utc::now().to_rfc3339(),
        };
        self.written
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);

        info!(
            path = %path.display(),
            figure = name,
            size = content.len(),
            "Figure written to file"
        );
        Ok(path)
    }

    /// Figures written so far.
    pub fn written_files(&self) -> Vec<WrittenFigure> {
        self.written
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl FigureSink for FileSink {
    fn send(&self, name: &str, figure: &Figure) -> RenderResult<()> {
        self.write(name, figure)?;
        Ok(())
    }
}

/// Keeps figures in memory.
#[derive(Default)]
pub struct MemorySink {
    figures: RwLock<Vec<(String, Figure)>>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of figures received.
    pub fn len(&self) -> usize {
        self.figures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether no figures were received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Figure received under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Figure> {
        self.figures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f.clone())
    }

    /// Names in arrival order.
    pub fn names(&self) -> Vec<String> {
        self.figures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }
}

impl FigureSink for MemorySink {
    fn send(&self, name: &str, figure: &Figure) -> RenderResult<()> {
        self.figures
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((name.to_string(), figure.clone()));
        Ok(())
    }
}
