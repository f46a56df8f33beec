//! Line-by-line driver: read, tokenize, classify, fold.

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, FileInfo, Results};
use crate::classify::ClassifiedLine;
use crate::error::{Error, Result};
use crate::geo::GeoLocator;
use crate::record::LogRecord;
use crate::sandbox;

/// Longest line handed to the tokenizer, longer lines are truncated.
pub const LINE_MAX_LENGTH: usize = 4096;

/// Where log lines are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    /// `-` selects standard input, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Input::Stdin
        } else {
            Input::Path(PathBuf::from(arg))
        }
    }

    fn name(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::Path(path) => path.display().to_string(),
        }
    }
}

/// One physical line, cut at the configured maximum length.
pub struct Line<'a> {
    pub bytes: &'a [u8],
    /// Bytes past the maximum length were discarded.
    pub truncated: bool,
}

/// Reads lines without ever buffering more than `max` bytes of one line.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    max: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max: usize) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(max),
            max,
        }
    }

    /// Next line including its terminator, `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<Line<'_>>> {
        self.buf.clear();
        let read = (&mut self.inner)
            .take(self.max as u64)
            .read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        let truncated = !self.buf.ends_with(b"\n") && read == self.max && self.skip_line()?;
        Ok(Some(Line {
            bytes: &self.buf,
            truncated,
        }))
    }

    /// Discard the remainder of the current line. Returns whether anything but the terminator was dropped.
    fn skip_line(&mut self) -> io::Result<bool> {
        let mut discarded = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(discarded);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    discarded |= newline > 0;
                    self.inner.consume(newline + 1);
                    return Ok(discarded);
                }
                None => {
                    let len = available.len();
                    self.inner.consume(len);
                    discarded = true;
                }
            }
        }
    }
}

/// Fold every line of `reader` into a fresh [`Aggregator`].
///
/// Per-line problems never fail the pass, only read errors do.
pub fn process<R: BufRead>(reader: R, geo: &dyn GeoLocator) -> Result<Aggregator> {
    let mut lines = LineReader::new(reader, LINE_MAX_LENGTH);
    let mut aggregator = Aggregator::new();
    let mut truncated = 0u64;

    while let Some(line) = lines.next_line()? {
        if line.truncated {
            truncated += 1;
            debug!(line = aggregator.lines() + 1, "line truncated");
        }
        process_line(&mut aggregator, line.bytes, geo);
    }

    if truncated > 0 {
        warn!(
            truncated,
            max = LINE_MAX_LENGTH,
            "lines longer than the maximum length were truncated"
        );
    }
    Ok(aggregator)
}

/// Tokenize, classify and fold a single line.
pub fn process_line(aggregator: &mut Aggregator, line: &[u8], geo: &dyn GeoLocator) {
    let record = LogRecord::parse(line);
    match ClassifiedLine::classify(&record, geo) {
        Some(classified) => aggregator.update(&classified),
        None => aggregator.record_invalid(),
    }
}

/// Run a whole pass over `input` and produce the final snapshot.
pub fn analyze(input: &Input, geo: &dyn GeoLocator) -> Result<Results> {
    let begin = Instant::now();

    let (aggregator, size) = match input {
        Input::Stdin => {
            sandbox::restrict();
            let stdin = io::stdin();
            (process(stdin.lock(), geo)?, None)
        }
        Input::Path(path) => {
            let (file, size) = open(path)?;
            sandbox::restrict();
            (process(BufReader::new(file), geo)?, size)
        }
    };

    let runtime = begin.elapsed().as_secs_f64();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let file = FileInfo {
        name: input.name(),
        size,
    };

    let results = aggregator.finalize(file, runtime, generated);
    info!(
        "Processed {} lines in {:.6} seconds",
        results.processed_lines, results.runtime
    );
    Ok(results)
}

fn open(path: &Path) -> Result<(File, Option<u64>)> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // pipes and character devices report a meaningless length
    let size = file
        .metadata()
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len());
    Ok((file, size))
}
