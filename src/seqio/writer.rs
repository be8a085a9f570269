use std::borrow::Borrow;
use std::io::{self, BufWriter, Write};

use tracing::debug;

use crate::seqio::data::{Record, WriteOptions, anonymous_comment};
use crate::seqio::endpoint::Endpoint;
use crate::seqio::error::Result;

/// Writes records as FASTA with a fixed line width.
pub struct FastaWriter<W: Write> {
    out: BufWriter<W>,
    options: WriteOptions,
    index: usize,
    written: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(out: W, options: WriteOptions) -> io::Result<Self> {
        if options.linewidth == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "line width must be > 0",
            ));
        }
        Ok(Self {
            out: BufWriter::with_capacity(1 << 16, out),
            options,
            index: 0,
            written: 0,
        })
    }

    /// Writes one record; records with an empty sequence are skipped but still
    /// count towards the anonymous-comment index.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.index += 1;
        if record.sequence.is_empty() {
            return Ok(());
        }
        let linesep = self.options.linesep.as_bytes();
        self.out.write_all(b">")?;
        if record.comment.is_empty() {
            self.out
                .write_all(anonymous_comment(self.index).as_bytes())?;
        } else {
            self.out.write_all(record.comment.as_bytes())?;
        }
        self.out.write_all(linesep)?;
        for line in record.sequence.as_bytes().chunks(self.options.linewidth) {
            self.out.write_all(line)?;
            self.out.write_all(linesep)?;
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|err| err.into_error())
    }
}

pub fn write<T, I>(endpoint: Endpoint<T>, records: I, options: &WriteOptions) -> Result<usize>
where
    T: Write,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let name = endpoint.name();
    let handle = endpoint.open_write()?;
    let mut writer = FastaWriter::new(handle, options.clone())?;
    for record in records {
        writer.write_record(record.borrow())?;
    }
    writer.flush()?;
    debug!(target_name = %name, records = writer.written(), "wrote fasta");
    Ok(writer.written())
}

pub fn write_one<T: Write>(
    endpoint: Endpoint<T>,
    record: &Record,
    options: &WriteOptions,
) -> Result<usize> {
    write(endpoint, std::iter::once(record), options)
}
