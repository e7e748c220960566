//! Output shapes

use std::io::{self, Write};

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::table;
use super::{format, Flags, Output};

/// A single message, e.g. `Created domain with ID 42`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralOutput {
    pub message: String,
    #[serde(skip)]
    pub flags: Flags,
}

impl GeneralOutput {
    pub fn new(message: impl Into<String>, flags: Flags) -> Self {
        Self {
            message: message.into(),
            flags,
        }
    }
}

impl Output for GeneralOutput {
    fn output(&self, w: &mut dyn Write) -> Result<()> {
        write!(w, "{}", self.message)?;
        Ok(())
    }

    fn format(&self, w: &mut dyn Write) -> Result<bool> {
        format(self, &self.flags, w)
    }
}

/// Tabular listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    pub columns: Vec<String>,
    pub lines: Vec<Vec<String>>,
    #[serde(skip)]
    pub flags: Flags,
}

impl ListOutput {
    pub fn new(columns: Vec<String>, lines: Vec<Vec<String>>, flags: Flags) -> Self {
        Self {
            columns,
            lines,
            flags,
        }
    }

    /// Build rows by pulling `keys` out of each serialized item
    pub fn from_items<T: Serialize>(
        columns: &[&str],
        keys: &[&str],
        items: &[T],
        flags: Flags,
    ) -> Self {
        let lines = items
            .iter()
            .map(|item| {
                let value = serde_json::to_value(item).unwrap_or_default();
                keys.iter()
                    .map(|key| table::truncate(&table::describe_value(lookup(&value, key))))
                    .collect()
            })
            .collect();

        Self::new(columns.iter().map(|c| c.to_string()).collect(), lines, flags)
    }
}

impl Output for ListOutput {
    fn output(&self, w: &mut dyn Write) -> Result<()> {
        table::render_table(w, &self.columns, &self.lines, self.flags.color())?;
        Ok(())
    }

    fn format(&self, w: &mut dyn Write) -> Result<bool> {
        format(self, &self.flags, w)
    }
}

/// Field/value view of a single resource
#[derive(Debug, Clone)]
pub struct DescribeOutput {
    pub fields: Vec<(String, String)>,
    pub values: Value,
    pub flags: Flags,
}

impl DescribeOutput {
    /// `fields` pairs a display label with the key to read from the serialized resource
    pub fn new<T: Serialize + ?Sized>(resource: &T, fields: &[(&str, &str)], flags: Flags) -> Self {
        let values = serde_json::to_value(resource).unwrap_or_default();
        let fields = fields
            .iter()
            .map(|(label, key)| {
                (
                    label.to_string(),
                    table::describe_value(lookup(&values, key)),
                )
            })
            .collect();

        Self {
            fields,
            values,
            flags,
        }
    }
}

impl Output for DescribeOutput {
    fn output(&self, w: &mut dyn Write) -> Result<()> {
        table::render_fields(w, &self.fields, self.flags.color())?;
        Ok(())
    }

    fn format(&self, w: &mut dyn Write) -> Result<bool> {
        format(&self.values, &self.flags, w)
    }
}

/// Several messages printed one per line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceOutput {
    pub messages: Vec<String>,
    #[serde(skip)]
    pub flags: Flags,
}

impl SliceOutput {
    pub fn new(messages: Vec<String>, flags: Flags) -> Self {
        Self { messages, flags }
    }
}

impl Output for SliceOutput {
    fn output(&self, w: &mut dyn Write) -> Result<()> {
        for message in &self.messages {
            writeln!(w, "{}", message.trim_end_matches('\n'))?;
        }
        Ok(())
    }

    fn format(&self, w: &mut dyn Write) -> Result<bool> {
        format(self, &self.flags, w)
    }
}

/// Final error of a failed command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub error: String,
    #[serde(skip)]
    pub flags: Flags,
}

impl ErrorOutput {
    pub fn new(error: impl Into<String>, flags: Flags) -> Self {
        Self {
            error: error.into(),
            flags,
        }
    }

    /// Print to stderr and terminate with status 1
    pub fn exit(self) -> ! {
        let mut stderr = io::stderr();
        // Structured errors go to stderr, never to --out
        let flags = Flags {
            out: None,
            ..self.flags.clone()
        };
        let shown = ErrorOutput {
            error: self.error,
            flags,
        };
        if super::print(&shown, &mut stderr).is_err() {
            eprintln!("Error: {}", shown.error);
        }
        std::process::exit(1);
    }
}

impl Output for ErrorOutput {
    fn output(&self, w: &mut dyn Write) -> Result<()> {
        if self.flags.color() {
            writeln!(w, "{} {}", "Error:".red().bold(), self.error.red())?;
        } else {
            writeln!(w, "Error: {}", self.error)?;
        }
        Ok(())
    }

    fn format(&self, w: &mut dyn Write) -> Result<bool> {
        format(self, &self.flags, w)
    }
}

/// Resolve dotted keys such as `modules.cache.enabled`
fn lookup<'a>(value: &'a Value, key: &str) -> &'a Value {
    key.split('.')
        .try_fold(value, |v, part| v.get(part))
        .unwrap_or(&Value::Null)
}
