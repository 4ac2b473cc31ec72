//! Batch resolution of descriptor streams.
//!
//! The messaging backend exports attachment metadata as NDJSON (one
//! descriptor per line). This module resolves whole streams into render
//! plans, written either as NDJSON or as a human-readable table. Malformed
//! lines are skipped with a warning, never fatal.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use unicode_width::UnicodeWidthChar;

use crate::error::{PlanError, Result};
use crate::i18n;
use crate::model::attachment::AttachmentDescriptor;
use crate::resolver::{self, RenderPlan};

/// Output format for batch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON render plan per line (or indented, see [`BatchOptions::pretty`]).
    Json,
    /// Human-readable aligned table.
    Table,
}

impl OutputFormat {
    /// Parse a format name as given on the CLI or in the config file.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(PlanError::InvalidFormat(other.to_string())),
        }
    }
}

/// Rendering options for batch output.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub format: OutputFormat,
    /// Indented JSON instead of one object per line.
    pub pretty: bool,
    /// Maximum display width of the detail column in table output.
    pub detail_width: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: false,
            detail_width: 40,
        }
    }
}

/// Statistics from one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    /// Render plans written.
    pub resolved: usize,
    /// Malformed descriptor lines skipped.
    pub skipped: usize,
    /// Size of the input file in bytes (0 when reading from a stream).
    pub input_size: u64,
}

/// Resolve a descriptor stream line by line.
///
/// `progress`, when given, is called with the number of input bytes consumed
/// after each line. Blank lines are ignored; lines that fail to parse are
/// counted in [`BatchStats::skipped`] and logged, and processing continues.
pub fn resolve_lines<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    options: BatchOptions,
    progress: Option<&dyn Fn(u64)>,
) -> Result<BatchStats> {
    let mut stats = BatchStats::default();
    let mut consumed: u64 = 0;

    if options.format == OutputFormat::Table {
        write_table_header(writer, options.detail_width)?;
    }

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        consumed += line.len() as u64 + 1;
        if let Some(cb) = progress {
            cb(consumed);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let descriptor: AttachmentDescriptor = match serde_json::from_str(trimmed) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(
                    line = lineno + 1,
                    error = %e,
                    "Skipping malformed descriptor line"
                );
                stats.skipped += 1;
                continue;
            }
        };

        let plan = resolver::resolve(&descriptor);
        match options.format {
            OutputFormat::Json => {
                let json = if options.pretty {
                    serde_json::to_string_pretty(&plan)
                } else {
                    serde_json::to_string(&plan)
                }
                .map_err(|e| PlanError::Json {
                    line: lineno + 1,
                    source: e,
                })?;
                writeln!(writer, "{json}")?;
            }
            OutputFormat::Table => {
                write_table_row(writer, stats.resolved + 1, &plan, options.detail_width)?;
            }
        }
        stats.resolved += 1;
    }

    writer.flush()?;
    Ok(stats)
}

/// Resolve a descriptor file, writing plans to `output` (or stdout).
///
/// `progress` is called with `(bytes_consumed, total_bytes)`.
pub fn resolve_file(
    input: &Path,
    output: Option<&Path>,
    options: BatchOptions,
    progress: &dyn Fn(u64, u64),
) -> Result<BatchStats> {
    if !input.exists() {
        return Err(PlanError::FileNotFound(input.to_path_buf()));
    }

    let total = std::fs::metadata(input)
        .map_err(|e| PlanError::io(input, e))?
        .len();
    let file = std::fs::File::open(input).map_err(|e| PlanError::io(input, e))?;
    let reader = BufReader::new(file);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| PlanError::io(path, e))?;
            Box::new(std::io::BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let mut stats = resolve_lines(
        reader,
        &mut writer,
        options,
        Some(&|consumed| progress(consumed, total)),
    )?;
    stats.input_size = total;
    Ok(stats)
}

// ── Table output ────────────────────────────────────────────────

fn write_table_header<W: Write>(writer: &mut W, detail_width: usize) -> Result<()> {
    writeln!(
        writer,
        "  {:<4} {:<12} {} {}",
        "#",
        i18n::col_variant(),
        pad_truncate(i18n::col_detail(), detail_width),
        i18n::col_labels()
    )?;
    writeln!(writer, "  {}", "-".repeat(4 + 1 + 12 + 1 + detail_width + 20))?;
    Ok(())
}

fn write_table_row<W: Write>(
    writer: &mut W,
    index: usize,
    plan: &RenderPlan,
    detail_width: usize,
) -> Result<()> {
    writeln!(
        writer,
        "  {:<4} {:<12} {} {}",
        index,
        variant_name(plan),
        pad_truncate(&plan_detail(plan), detail_width),
        plan_labels(plan)
    )?;
    Ok(())
}

/// The variant tag, matching the serialized `"variant"` field.
fn variant_name(plan: &RenderPlan) -> &'static str {
    match plan {
        RenderPlan::Unavailable { .. } => "unavailable",
        RenderPlan::Image { .. } => "image",
        RenderPlan::Audio { .. } => "audio",
        RenderPlan::Video { .. } => "video",
        RenderPlan::Document { .. } => "document",
        RenderPlan::Fallback { .. } => "fallback",
    }
}

/// The most identifying field of the plan, for the table's detail column.
fn plan_detail(plan: &RenderPlan) -> String {
    match plan {
        RenderPlan::Unavailable { reason } => reason.clone(),
        RenderPlan::Image { alt_text, .. } => alt_text.clone(),
        RenderPlan::Audio { url, .. } => url.clone(),
        RenderPlan::Video { url, .. } => url.clone(),
        RenderPlan::Document { display_name, .. } => display_name.clone(),
        RenderPlan::Fallback { text } => text.clone(),
    }
}

/// Duration/size labels joined for the table's last column.
fn plan_labels(plan: &RenderPlan) -> String {
    let (duration, size) = match plan {
        RenderPlan::Audio {
            duration_label,
            size_label,
            ..
        }
        | RenderPlan::Video {
            duration_label,
            size_label,
            ..
        } => (duration_label.as_deref(), size_label.as_deref()),
        RenderPlan::Document { size_label, .. } => (None, size_label.as_deref()),
        _ => (None, None),
    };
    [duration, size]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pad or truncate a string to an exact display width (filenames and
/// captions are routinely non-ASCII).
fn pad_truncate(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    for _ in used..width {
        out.push(' ');
    }
    out
}
