//! Streaming FASTA reader. Chunks are tokenized one segment per pull, so a
//! record is only assembled when `next` asks for it.

use std::io::{self, Read, Seek, SeekFrom};
use std::mem;

use tracing::{debug, trace, warn};

use crate::seqio::data::{BoundaryMode, ReadOptions, Record, anonymous_comment};
use crate::seqio::endpoint::{Endpoint, Handle};
use crate::seqio::error::{Result, SeqError};
use crate::seqio::tokenizer::{ChunkTokenizer, Segment, header_fragment_start};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    BeforeFirstHeader,
    Accumulating,
    Exhausted,
}

pub(crate) struct RecordAssembler {
    state: ReaderState,
    current_comment: String,
    record_count: usize,
    anonymous_count: usize,
    pending: Vec<Vec<u8>>,
}

impl RecordAssembler {
    pub(crate) fn new() -> Self {
        Self {
            state: ReaderState::BeforeFirstHeader,
            current_comment: String::new(),
            record_count: 0,
            anonymous_count: 0,
            pending: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, segment: Segment<'_>) -> Option<Record> {
        match segment {
            Segment::Header(text) => self.header(text),
            Segment::Sequence(body) => {
                self.pending.push(body);
                None
            }
        }
    }

    /// Starts a new record, returning the one it closes.
    pub(crate) fn header(&mut self, text: &[u8]) -> Option<Record> {
        let closed = self.close_record();
        self.current_comment = String::from_utf8_lossy(text).into_owned();
        self.record_count += 1;
        self.state = ReaderState::Accumulating;
        closed
    }

    pub(crate) fn finish(&mut self) -> Option<Record> {
        let closed = self.close_record();
        self.current_comment.clear();
        self.state = ReaderState::Exhausted;
        debug!(headers = self.record_count, "fasta stream exhausted");
        closed
    }

    fn close_record(&mut self) -> Option<Record> {
        let sequence = self.pop_sequence();
        if self.record_count == 0 && sequence.is_empty() {
            return None;
        }
        let comment = if self.current_comment.is_empty() {
            self.anonymous_count += 1;
            anonymous_comment(self.anonymous_count)
        } else {
            mem::take(&mut self.current_comment)
        };
        Some(Record::new(comment, sequence))
    }

    fn pop_sequence(&mut self) -> String {
        let sequence = self.pending.concat();
        self.pending.clear();
        match String::from_utf8(sequence) {
            Ok(sequence) => sequence,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

/// Lazy iterator of [`Record`]s over any byte stream.
///
/// Nothing is read until the first call to `next`.
pub struct FastaReader<R> {
    source: R,
    options: ReadOptions,
    assembler: RecordAssembler,
    buffer: Vec<u8>,
    scan_pos: usize,
    scan_end: usize,
    carry: Vec<u8>,
    at_line_start: bool,
    eof: bool,
}

impl<R: Read> FastaReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReadOptions::default())
    }

    pub fn with_options(source: R, options: ReadOptions) -> Self {
        Self {
            source,
            options: ReadOptions {
                chunk_size: options.chunk_size.max(1),
                ..options
            },
            assembler: RecordAssembler::new(),
            buffer: Vec::new(),
            scan_pos: 0,
            scan_end: 0,
            carry: Vec::new(),
            at_line_start: true,
            eof: false,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.assembler.state
    }

    pub fn options(&self) -> ReadOptions {
        self.options
    }

    /// Header lines seen so far, including the one of the record in progress.
    pub fn record_count(&self) -> usize {
        self.assembler.record_count
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    fn clear_session(&mut self) {
        self.assembler = RecordAssembler::new();
        self.buffer.clear();
        self.scan_pos = 0;
        self.scan_end = 0;
        self.carry.clear();
        self.at_line_start = true;
        self.eof = false;
    }

    fn pump(&mut self) -> io::Result<()> {
        let mut buffer = mem::take(&mut self.buffer);
        buffer.clear();
        buffer.append(&mut self.carry);
        let start = buffer.len();
        buffer.resize(start + self.options.chunk_size, 0);
        let read = match read_chunk(&mut self.source, &mut buffer[start..]) {
            Ok(read) => read,
            Err(err) => {
                self.buffer = buffer;
                return Err(err);
            }
        };
        buffer.truncate(start + read);
        trace!(bytes = read, carried = start, "read fasta chunk");

        if read == 0 {
            if !buffer.is_empty() {
                // end of stream terminates a carried header line
                buffer.push(b'\n');
            }
            self.eof = true;
            self.scan_end = buffer.len();
        } else {
            self.scan_end = match self.options.boundary {
                BoundaryMode::CarryOver => header_fragment_start(&buffer, self.at_line_start),
                BoundaryMode::Legacy => {
                    self.at_line_start = true;
                    note_split_header(&buffer);
                    buffer.len()
                }
            };
            self.carry.extend_from_slice(&buffer[self.scan_end..]);
        }
        self.scan_pos = 0;
        self.buffer = buffer;
        Ok(())
    }
}

fn note_split_header(data: &[u8]) {
    let tail = header_fragment_start(data, true);
    if tail < data.len() {
        warn!(
            fragment = %String::from_utf8_lossy(&data[tail..]),
            "header line split across chunk boundary; treating it as sequence"
        );
    }
}

impl<R: Read + Seek> FastaReader<R> {
    pub fn reset(&mut self) -> io::Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        self.clear_session();
        debug!("fasta reader reset");
        Ok(())
    }
}

impl<R: Read> Iterator for FastaReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.assembler.state == ReaderState::Exhausted {
                return None;
            }
            if self.scan_pos < self.scan_end {
                let window = &self.buffer[self.scan_pos..self.scan_end];
                let mut tokenizer = ChunkTokenizer::new(window, self.at_line_start);
                let segment = tokenizer.next();
                self.scan_pos += tokenizer.consumed();
                self.at_line_start = tokenizer.at_line_start();
                if let Some(record) = segment.and_then(|s| self.assembler.push(s)) {
                    return Some(Ok(record));
                }
                continue;
            }
            if self.eof {
                return self.assembler.finish().map(Ok);
            }
            if let Err(err) = self.pump() {
                self.assembler.state = ReaderState::Exhausted;
                return Some(Err(SeqError::from(err)));
            }
        }
    }
}

fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buf) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

pub fn read<T: Read>(endpoint: Endpoint<T>) -> Result<FastaReader<Handle<T>>> {
    read_with_options(endpoint, ReadOptions::default())
}

pub fn read_with_options<T: Read>(
    endpoint: Endpoint<T>,
    options: ReadOptions,
) -> Result<FastaReader<Handle<T>>> {
    let handle = endpoint.open_read()?;
    debug!(source = %handle.name(), chunk_size = options.chunk_size, "opened fasta input");
    Ok(FastaReader::with_options(handle, options))
}

pub fn read_one<T: Read>(endpoint: Endpoint<T>) -> Result<Option<Record>> {
    read(endpoint)?.next().transpose()
}
