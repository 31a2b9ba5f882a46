//! Multi-section view output
//!
//! A view renders a title, a few labelled facts, one or more tables and
//! optional notes. JSON output skips all of that and serializes the view's
//! data payload instead.

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::Formattable;
use super::json::format_json;
use super::table::format_table;
use crate::cli::OutputFormat;
use crate::error::Result;

#[derive(Debug, Clone)]
struct Section {
    title: String,
    body: String,
}

/// Rendered view with a serializable payload
#[derive(Debug, Clone)]
pub struct Report<D> {
    title: String,
    facts: Vec<(String, String)>,
    sections: Vec<Section>,
    notes: Vec<String>,
    data: D,
}

impl<D: Serialize> Report<D> {
    pub fn new(title: impl Into<String>, data: D) -> Self {
        Self {
            title: title.into(),
            facts: Vec::new(),
            sections: Vec::new(),
            notes: Vec::new(),
            data,
        }
    }

    /// Add a `label: value` line under the title
    pub fn fact(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.facts.push((label.into(), value.into()));
        self
    }

    /// Add a titled table; empty rows render as "No data available."
    pub fn table<T: Tabled>(mut self, title: impl Into<String>, rows: &[T]) -> Self {
        self.sections.push(Section {
            title: title.into(),
            body: format_table(rows),
        });
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[cfg(test)]
    pub fn data(&self) -> &D {
        &self.data
    }

    fn render(&self, styled: bool) -> String {
        let heading = |text: &str| {
            if styled {
                text.bold().to_string()
            } else {
                text.to_string()
            }
        };

        let mut lines = vec![heading(&self.title)];

        if !self.facts.is_empty() {
            let width = self.facts.iter().map(|(l, _)| l.len()).max().unwrap_or(0) + 1;
            for (label, value) in &self.facts {
                lines.push(format!("{:<width$} {}", format!("{}:", label), value));
            }
        }

        for section in &self.sections {
            lines.push(String::new());
            lines.push(heading(&section.title));
            lines.push(section.body.clone());
        }

        if !self.notes.is_empty() {
            lines.push(String::new());
            for note in &self.notes {
                if styled {
                    lines.push(note.dimmed().to_string());
                } else {
                    lines.push(note.clone());
                }
            }
        }

        lines.join("\n")
    }
}

impl<D: Serialize> Formattable for Report<D> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(&self.data)?),
            OutputFormat::Pretty => Ok(self.render(true)),
            OutputFormat::Table => Ok(self.render(false)),
        }
    }
}
