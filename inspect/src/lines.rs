use std::io::{self, Write};

use bytes::{Buf, BufMut, BytesMut};
use memchr::memchr;
use serde::Serialize;

use finne_line_parser::{Error, ParseEvents, ParsedRequestLine, RequestLineParser};

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome<'a> {
    Ok(&'a ParsedRequestLine),
    Error(String),
}

/// Accumulates raw input and hands out complete lines.
pub struct LineBuffers {
    parse_buf: BytesMut,
    resp_buf: Vec<u8>,
    // bytes of `parse_buf` already searched for a newline
    scanned: usize,
    // set once a line passed the limit; input is dropped up to the next newline
    discarding: bool,
    pretty: bool,
}

impl LineBuffers {
    #[inline]
    pub fn new(pretty: bool) -> LineBuffers {
        return LineBuffers {
            parse_buf: BytesMut::new(),
            resp_buf: Vec::new(),
            scanned: 0,
            discarding: false,
            pretty,
        };
    }

    #[inline]
    pub fn put(&mut self, data: &[u8]) {
        self.parse_buf.put_slice(data);
    }

    /// Parses every complete line buffered so far and writes the results.
    pub fn drain<E: ParseEvents, W: Write>(
        &mut self,
        parser: &RequestLineParser<E>,
        out: &mut W,
    ) -> io::Result<()> {
        while let Some(at) = memchr(b'\n', &self.parse_buf[self.scanned..]) {
            let pos = self.scanned + at;
            let line = self.parse_buf.split_to(pos + 1);
            self.scanned = 0;
            if self.discarding {
                self.discarding = false;
                continue;
            }
            self.process_line(parser, &line[..pos])?;
        }
        self.scanned = self.parse_buf.len();
        self.enforce_limit(parser)?;
        return self.flush(out);
    }

    /// Parses whatever is left once the input is exhausted.
    pub fn finish<E: ParseEvents, W: Write>(
        &mut self,
        parser: &RequestLineParser<E>,
        out: &mut W,
    ) -> io::Result<()> {
        let remaining = self.parse_buf.split();
        self.scanned = 0;
        if !std::mem::take(&mut self.discarding) {
            self.process_line(parser, &remaining)?;
        }
        return self.flush(out);
    }

    // A partial line may still end in `\r`, which does not count toward the limit.
    fn enforce_limit<E: ParseEvents>(&mut self, parser: &RequestLineParser<E>) -> io::Result<()> {
        let Some(max) = parser.config().max_line_len else {
            return Ok(());
        };
        if self.discarding {
            self.parse_buf.clear();
            self.scanned = 0;
            return Ok(());
        }
        let len = self.parse_buf.len();
        if len <= max.saturating_add(1) {
            return Ok(());
        }
        let error = Error::LineTooLong { len, max };
        tracing::info!(%error, "discarding request line");
        self.write_outcome(&Outcome::Error(error.to_string()))?;
        self.parse_buf.clear();
        self.scanned = 0;
        self.discarding = true;
        return Ok(());
    }

    fn process_line<E: ParseEvents>(
        &mut self,
        parser: &RequestLineParser<E>,
        line: &[u8],
    ) -> io::Result<()> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let parsed = parser.parse(line);
        let outcome = match &parsed {
            Ok(request_line) => Outcome::Ok(request_line),
            Err(e) => {
                tracing::info!(error = %e, line = %String::from_utf8_lossy(line), "rejected request line");
                Outcome::Error(e.to_string())
            }
        };
        return self.write_outcome(&outcome);
    }

    fn write_outcome(&mut self, outcome: &Outcome<'_>) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.resp_buf, outcome)?;
        } else {
            serde_json::to_writer(&mut self.resp_buf, outcome)?;
        }
        self.resp_buf.push(b'\n');
        return Ok(());
    }

    #[inline]
    fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.resp_buf)?;
        self.resp_buf.clear();
        return Ok(());
    }

    #[inline]
    pub fn pending(&self) -> usize {
        return self.parse_buf.remaining();
    }
}
