use std::io::Write;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use serde::Serialize;

use crate::seqio::error::{Result, SeqError};
use crate::seqio::stats::{RecordStats, SummaryStats};

impl From<arrow_schema::ArrowError> for SeqError {
    fn from(value: arrow_schema::ArrowError) -> Self {
        SeqError::Export(format!("arrow error: {value}"))
    }
}

impl From<parquet::errors::ParquetError> for SeqError {
    fn from(value: parquet::errors::ParquetError) -> Self {
        SeqError::Export(format!("parquet error: {value}"))
    }
}

impl From<csv::Error> for SeqError {
    fn from(value: csv::Error) -> Self {
        SeqError::Export(format!("csv error: {value}"))
    }
}

impl From<serde_json::Error> for SeqError {
    fn from(value: serde_json::Error) -> Self {
        SeqError::Export(format!("json error: {value}"))
    }
}

pub fn render_csv_stats(stats: &[RecordStats]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in stats {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| SeqError::Export(format!("csv error: {}", err.error())))?;
    String::from_utf8(bytes).map_err(|err| SeqError::Export(err.to_string()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: SummaryStats,
    records: &'a [RecordStats],
}

pub fn render_json_stats(stats: &[RecordStats], summary: SummaryStats) -> Result<String> {
    let report = JsonReport {
        summary,
        records: stats,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_parquet_stats<W: Write + Send>(stats: &[RecordStats], writer: W) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("comment", DataType::Utf8, false),
        Field::new("length", DataType::UInt64, false),
        Field::new("gc_content", DataType::Float64, false),
        Field::new("kind", DataType::Utf8, false),
    ]));

    let comments: Vec<&str> = stats.iter().map(|s| s.comment.as_str()).collect();
    let lengths: Vec<u64> = stats.iter().map(|s| s.length as u64).collect();
    let gc: Vec<f64> = stats.iter().map(|s| s.gc_content).collect();
    let kinds: Vec<&str> = stats.iter().map(|s| s.kind.as_str()).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(comments)),
        Arc::new(UInt64Array::from(lengths)),
        Arc::new(Float64Array::from(gc)),
        Arc::new(StringArray::from(kinds)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let mut arrow_writer = ArrowWriter::try_new(writer, schema, None)?;
    arrow_writer.write(&batch)?;
    arrow_writer.close()?;
    Ok(())
}
