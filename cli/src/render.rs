//! Rendering of decoded job results.
//!
//! Output is built completely in memory by [`render`] and only then written
//! out, so a failed render never leaves a half-drawn table on the terminal.

use clap::ValueEnum;
use comfy_table::{presets, Table};
use common::{format_time, JobDetail, JobList, ResultError, ResultKind, ShapedResult};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const LIST_HEADER: [&str; 6] = ["UUID", "CREATOR", "METHOD", "STATUS", "STARTTIME", "CLUSTERID"];

const NO_TIME: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Borderless columns
    #[default]
    Plain,
    /// Box-drawn table
    Utf8,
    /// Comma separated rows
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutput {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Table(TableOutput),
    Line(String),
}

impl Rendered {
    pub fn write_to<W: Write>(&self, out: &mut W, style: TableStyle) -> io::Result<()> {
        match self {
            Rendered::Line(text) => writeln!(out, "{}", text),
            Rendered::Table(table) => match style {
                TableStyle::Csv => write_csv(table, out),
                TableStyle::Plain => writeln!(out, "{}", to_comfy(table, presets::NOTHING)),
                TableStyle::Utf8 => writeln!(out, "{}", to_comfy(table, presets::UTF8_FULL)),
            },
        }
    }
}

fn to_comfy(output: &TableOutput, preset: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(preset);
    if let Some(header) = &output.header {
        table.set_header(header.clone());
    }
    for row in &output.rows {
        table.add_row(row.clone());
    }
    table
}

fn write_csv<W: Write>(output: &TableOutput, out: &mut W) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    if let Some(header) = &output.header {
        writer.write_record(header)?;
    }
    for row in &output.rows {
        writer.write_record(row)?;
    }
    writer.flush()
}

fn blank_row() -> Vec<String> {
    vec![String::new()]
}

fn list_table(list: &JobList) -> TableOutput {
    let mut rows: Vec<Vec<String>> = list
        .sorted()
        .iter()
        .map(|job| {
            vec![
                job.uuid.to_string(),
                job.creator.clone(),
                job.method.clone(),
                job.status.to_string(),
                format_time(&job.start_time),
                job.cluster_id.clone(),
            ]
        })
        .collect();
    rows.push(blank_row());

    TableOutput {
        header: Some(LIST_HEADER.iter().map(|h| h.to_string()).collect()),
        rows,
    }
}

fn detail_table(job: &JobDetail) -> TableOutput {
    log::debug!("job info: {:?}", job);

    let end_time = job
        .end_time
        .as_ref()
        .map(format_time)
        .unwrap_or_else(|| NO_TIME.to_string());

    let pairs = [
        ("UUID", job.uuid.to_string()),
        ("StartTime", format_time(&job.start_time)),
        ("EndTime", end_time),
        ("Status", job.status.to_string()),
        ("Creator", job.creator.clone()),
        ("ClusterId", job.cluster_id.clone()),
        ("Result", job.result.clone()),
        ("SubJobs", job.sub_jobs_text()),
    ];

    let mut rows: Vec<Vec<String>> = pairs
        .into_iter()
        .map(|(key, value)| vec![key.to_string(), value])
        .collect();
    rows.push(blank_row());

    TableOutput { header: None, rows }
}

/// Builds the output for `result`, which must carry the variant `kind` implies.
pub fn render(kind: ResultKind, result: &ShapedResult) -> Result<Rendered, ResultError> {
    match (kind, result) {
        (ResultKind::List, ShapedResult::List(list)) => Ok(Rendered::Table(list_table(list))),
        (ResultKind::Info, ShapedResult::Detail(job)) => Ok(Rendered::Table(detail_table(job))),
        (ResultKind::Message | ResultKind::JobSubmitted, ShapedResult::Message(text)) => {
            Ok(Rendered::Line(text.clone()))
        }
        (ResultKind::Error, ShapedResult::Error(text)) => Ok(Rendered::Line(text.clone())),
        (kind, other) => Err(ResultError::InternalShape { kind, found: other.shape() }),
    }
}

pub fn render_to<W: Write>(
    kind: ResultKind,
    result: &ShapedResult,
    out: &mut W,
    style: TableStyle,
) -> Result<(), ResultError> {
    let rendered = render(kind, result)?;
    match rendered.write_to(out, style) {
        Ok(()) => Ok(()),
        Err(e) if kind == ResultKind::Error => {
            // reporting an error must not turn into another error
            log::warn!("failed to write error result: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
