use std::borrow::Borrow;
use std::io::{self, BufRead, BufReader, Read, Write};

use tracing::debug;

use crate::seqio::data::{Record, platform_linesep};
use crate::seqio::endpoint::{Endpoint, Handle};
use crate::seqio::error::{Result, SeqError};

const HEADER_MARKER: char = '@';
const SEPARATOR: &str = "+";

/// Reads four-line FASTQ blocks: header, sequence, separator, quality.
pub struct FastqReader<R: BufRead> {
    reader: R,
    name: String,
    line: String,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line: String::new(),
            line_number: 0,
            done: false,
        }
    }

    fn next_line(&mut self) -> io::Result<String> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? > 0 {
            self.line_number += 1;
        }
        Ok(self.line.trim().to_string())
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let header = self.next_line()?;
        if header.is_empty() {
            return Ok(None);
        }
        let header_line = self.line_number;
        let sequence = self.next_line()?;
        let separator = self.next_line()?;
        let quality = self.next_line()?;

        let Some(comment) = header.strip_prefix(HEADER_MARKER) else {
            return Err(SeqError::format(
                &self.name,
                header_line,
                "header line does not start with '@'",
            ));
        };
        if sequence.is_empty() {
            return Err(SeqError::format(&self.name, header_line + 1, "empty sequence line"));
        }
        if separator != SEPARATOR {
            return Err(SeqError::format(
                &self.name,
                header_line + 2,
                format!("expected '+' separator, found {separator:?}"),
            ));
        }
        if quality.is_empty() {
            return Err(SeqError::format(&self.name, header_line + 3, "empty quality line"));
        }
        Ok(Some(Record::new(comment, sequence).with_quality(quality)))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                debug!(source = %self.name, lines = self.line_number, "fastq stream exhausted");
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

pub fn read<T: Read>(endpoint: Endpoint<T>) -> Result<FastqReader<BufReader<Handle<T>>>> {
    let handle = endpoint.open_read()?;
    let name = handle.name();
    Ok(FastqReader::new(BufReader::with_capacity(1 << 20, handle), name))
}

pub fn read_one<T: Read>(endpoint: Endpoint<T>) -> Result<Option<Record>> {
    read(endpoint)?.next().transpose()
}

/// Writes one unwrapped four-line block per record.
pub fn write<T, I>(endpoint: Endpoint<T>, records: I, linesep: Option<&str>) -> Result<usize>
where
    T: Write,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let eol = linesep.unwrap_or(platform_linesep());
    let mut out = io::BufWriter::with_capacity(1 << 16, endpoint.open_write()?);
    let mut written = 0usize;
    for record in records {
        let record = record.borrow();
        let quality = record.quality().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("record {:?} has no quality string", record.comment()),
            )
        })?;
        write!(
            out,
            "@{}{eol}{}{eol}{SEPARATOR}{eol}{}{eol}",
            record.comment(),
            record.sequence(),
            quality
        )?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
