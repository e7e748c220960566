//! Output formatting module
//!
//! Every command result is one of a handful of output shapes. Each shape renders
//! either as colored terminal text or, when `--format`/`--out` is given, as JSON,
//! YAML or TOML written to stdout or to a file.

pub mod table;
mod types;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;

pub use types::{DescribeOutput, ErrorOutput, GeneralOutput, ListOutput, SliceOutput};

/// Rendering options shared by all outputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags {
    /// Structured format: json, yaml/yml, toml
    pub format: Option<String>,
    /// Write structured output to this file instead of stdout
    pub out: Option<PathBuf>,
    /// Disable ANSI colors
    pub no_color: bool,
}

impl Flags {
    pub fn new(format: Option<String>, out: Option<PathBuf>, no_color: bool) -> Self {
        let no_color = no_color || std::env::var_os("NO_COLOR").is_some();
        Self {
            format,
            out,
            no_color,
        }
    }

    pub fn color(&self) -> bool {
        !self.no_color
    }

    fn structured(&self) -> bool {
        self.format.as_deref().is_some_and(|f| !f.is_empty()) || self.out.is_some()
    }
}

/// Structured encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredFormat {
    Json,
    Yaml,
    Toml,
}

impl StructuredFormat {
    /// Unknown or missing names fall back to JSON
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::to_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// A renderable command result
pub trait Output {
    /// Human readable rendering
    fn output(&self, w: &mut dyn Write) -> Result<()>;

    /// Structured rendering. Returns `Ok(true)` when it produced the output.
    fn format(&self, w: &mut dyn Write) -> Result<bool>;
}

/// Render `v`, preferring the structured path when the flags ask for it
pub fn print(v: &dyn Output, w: &mut dyn Write) -> Result<()> {
    if v.format(w)? {
        return Ok(());
    }
    v.output(w)
}

/// Shared structured path used by every output shape
pub fn format<T: Serialize + ?Sized>(value: &T, flags: &Flags, w: &mut dyn Write) -> Result<bool> {
    if !flags.structured() {
        return Ok(false);
    }

    let text = encode(value, StructuredFormat::parse(flags.format.as_deref()))?;

    if let Some(ref path) = flags.out {
        write_details_to_file(path, text.as_bytes())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        writeln!(w, "File successfully written to: {}", path.display())?;
        return Ok(true);
    }

    w.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(true)
}

/// Encode a value in the requested structured format
pub fn encode<T: Serialize + ?Sized>(value: &T, format: StructuredFormat) -> Result<String> {
    let text = match format {
        StructuredFormat::Json => serde_json::to_string_pretty(value)?,
        StructuredFormat::Yaml => serde_yaml::to_string(value)?,
        StructuredFormat::Toml => {
            // TOML has no null
            let value = strip_nulls(serde_json::to_value(value)?);
            toml::to_string_pretty(&value)?
        }
    };
    Ok(text)
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

fn write_details_to_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)
}
