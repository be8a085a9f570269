use memchr::{memchr, memchr_iter, memrchr};

pub(crate) const HEADER_MARKER: u8 = b'>';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Header text without the marker, trimmed.
    Header(&'a [u8]),
    /// Sequence text with all whitespace removed. Never empty.
    Sequence(Vec<u8>),
}

/// Splits one raw chunk into [`Segment`]s, left to right.
///
/// A header is a `>` at the start of a line whose newline also lies inside
/// the chunk. A `>` line cut off by the end of the chunk comes out as
/// sequence text.
pub struct ChunkTokenizer<'a> {
    chunk: &'a [u8],
    cursor: usize,
    at_line_start: bool,
}

impl<'a> ChunkTokenizer<'a> {
    /// `at_line_start` is whether the byte before `chunk` was a newline.
    pub fn new(chunk: &'a [u8], at_line_start: bool) -> Self {
        Self {
            chunk,
            cursor: 0,
            at_line_start,
        }
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Bytes of the chunk handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn take_header(&mut self, rest: &'a [u8]) -> Option<Segment<'a>> {
        let newline = memchr(b'\n', rest)?;
        self.cursor += newline + 1;
        self.at_line_start = true;
        Some(Segment::Header(rest[1..newline].trim_ascii()))
    }
}

impl<'a> Iterator for ChunkTokenizer<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.chunk.len() {
            let rest = &self.chunk[self.cursor..];

            if self.at_line_start && rest[0] == HEADER_MARKER {
                if let Some(header) = self.take_header(rest) {
                    return Some(header);
                }
                // split header: the rest of the chunk is sequence text
                self.cursor = self.chunk.len();
                self.at_line_start = false;
                let body = strip_whitespace(rest);
                return (!body.is_empty()).then_some(Segment::Sequence(body));
            }

            let end = next_header_start(rest);
            let body = strip_whitespace(&rest[..end]);
            self.at_line_start = if end < rest.len() {
                true
            } else {
                rest.last() == Some(&b'\n')
            };
            self.cursor += end;
            if !body.is_empty() {
                return Some(Segment::Sequence(body));
            }
        }
        None
    }
}

/// Offset of the first `>` that follows a newline in `data`, or `data.len()`.
fn next_header_start(data: &[u8]) -> usize {
    memchr_iter(b'\n', data)
        .map(|newline| newline + 1)
        .find(|&start| data.get(start) == Some(&HEADER_MARKER))
        .unwrap_or(data.len())
}

/// Start of a trailing header line that has no newline yet, or `data.len()`.
pub(crate) fn header_fragment_start(data: &[u8], at_line_start: bool) -> usize {
    let tail = memrchr(b'\n', data).map_or(0, |newline| newline + 1);
    if (tail > 0 || at_line_start) && data.get(tail) == Some(&HEADER_MARKER) {
        tail
    } else {
        data.len()
    }
}

fn strip_whitespace(data: &[u8]) -> Vec<u8> {
    data.iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect()
}
