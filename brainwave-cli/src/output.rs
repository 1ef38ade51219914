//! Presentation of decoded readings: CSV, JSON lines and a text dump.

use anyhow::Result;
use brainwave_lib::DecodedReading;
use clap::ValueEnum;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `signal,attention,meditation[,delta,...,mid_gamma]` per line
    Csv,
    /// One JSON object per line
    Json,
    /// Multi-line human-readable dump
    Text,
}

/// CSV fields of a reading. Band powers are only appended when present.
pub fn csv_fields(reading: &DecodedReading) -> Vec<String> {
    let mut fields = vec![
        reading.signal_quality.to_string(),
        reading.attention.to_string(),
        reading.meditation.to_string(),
    ];
    if let Some(power) = reading.power() {
        fields.extend(power.values().iter().map(u32::to_string));
    }
    fields
}

/// Multi-line dump of a reading.
pub struct TextDump<'a>(pub &'a DecodedReading);

impl fmt::Display for TextDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = self.0;
        writeln!(f)?;
        writeln!(f, "--- Start Packet ---")?;
        writeln!(f, "Signal Quality: {}", reading.signal_quality)?;
        writeln!(f, "Attention: {}", reading.attention)?;
        writeln!(f, "Meditation: {}", reading.meditation)?;

        if let Some(power) = reading.power() {
            writeln!(f)?;
            writeln!(f, "EEG POWER:")?;
            for (band, value) in power.iter() {
                writeln!(f, "{}: {}", band, value)?;
            }
        }

        writeln!(f, "--- End Packet ---")
    }
}

pub enum ReadingWriter<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
    Text(W),
}

impl<W: Write> ReadingWriter<W> {
    pub fn new(format: OutputFormat, inner: W) -> Self {
        match format {
            // Rows are 3 or 11 fields wide depending on band powers
            OutputFormat::Csv => ReadingWriter::Csv(
                csv::WriterBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .from_writer(inner),
            ),
            OutputFormat::Json => ReadingWriter::Json(inner),
            OutputFormat::Text => ReadingWriter::Text(inner),
        }
    }

    pub fn write(&mut self, reading: &DecodedReading) -> Result<()> {
        match self {
            ReadingWriter::Csv(writer) => writer.write_record(csv_fields(reading))?,
            ReadingWriter::Json(writer) => {
                serde_json::to_writer(&mut *writer, reading)?;
                writeln!(writer)?;
            }
            ReadingWriter::Text(writer) => write!(writer, "{}", TextDump(reading))?,
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match self {
            ReadingWriter::Csv(writer) => writer.flush()?,
            ReadingWriter::Json(writer) | ReadingWriter::Text(writer) => writer.flush()?,
        }
        Ok(())
    }
}
