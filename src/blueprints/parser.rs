//! Blueprint parser owning one blueprint and everything derived from it.

use std::path::Path;

use crate::core::config::ParserConfig;
use crate::core::error::Result;

use super::cells::{expand_areas, process_layer_lines, Layer};
use super::header::{parse_header, Header};
use super::layers::{adjust_layer_order, group_lines_by_layer};

/// Parses blueprint text into a header and ordered layers.
///
/// Setting new text replaces all derived state at once; a failed parse
/// leaves the previous blueprint in place.
#[derive(Debug, Clone, Default)]
pub struct BlueprintParser {
    config: ParserConfig,
    text: String,
    header: Header,
    /// Data lines, trimmed, header line excluded
    lines: Vec<String>,
    layers: Vec<Layer>,
}

impl BlueprintParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a parser with default config and the given blueprint
    pub fn from_text(text: &str) -> Result<Self> {
        let mut parser = Self::new();
        parser.set_blueprint(text)?;
        Ok(parser)
    }

    /// Load a blueprint file from disk
    pub fn from_file(path: &Path, config: ParserConfig) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut parser = Self::with_config(config);
        parser.set_blueprint(&text)?;
        Ok(parser)
    }

    /// Replace the current blueprint and recompute header and layers
    pub fn set_blueprint(&mut self, text: &str) -> Result<()> {
        let mut lines = text_to_lines(text);
        let first = lines.first().map(String::as_str).unwrap_or("");
        let header = parse_header(first, self.config.start_block)?;

        if header.has_keyword() {
            lines.remove(0);
        }

        let layers = self.process_lines(&lines);
        tracing::debug!(
            command = header.command.as_deref().unwrap_or(""),
            lines = lines.len(),
            layers = layers.len(),
            "parsed blueprint"
        );

        self.text = text.to_string();
        self.header = header;
        self.lines = lines;
        self.layers = layers;
        Ok(())
    }

    /// The blueprint text exactly as given
    pub fn blueprint(&self) -> &str {
        &self.text
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Processed layers: grouped, reordered, filtered and expanded
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn process_lines(&self, lines: &[String]) -> Vec<Layer> {
        if lines.is_empty() {
            return Vec::new();
        }

        let groups = adjust_layer_order(group_lines_by_layer(lines));

        groups
            .iter()
            .map(|group| {
                let mut layer = process_layer_lines(group);
                expand_areas(&mut layer, self.config.max_expansion);
                layer
            })
            .collect()
    }
}

/// Split text into trimmed lines; blank text has no lines at all
fn text_to_lines(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split('\n').map(|line| line.trim().to_string()).collect()
}
