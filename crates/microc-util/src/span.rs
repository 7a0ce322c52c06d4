//! Source location tracking.
//!
//! This module provides the types used to identify a byte range in a
//! loaded source file: [`FileId`] names the file, [`Span`] names the
//! range within it, and [`SourceMap`] owns the file contents so that a
//! [`Span`] can later be turned back into a line/column pair for a
//! diagnostic.

use crate::error::SourceMapError;

/// A unique identifier for a source file held by a [`SourceMap`].
///
/// `FileId`s are assigned sequentially as files are added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    /// A placeholder id for spans that are not tied to any real file
    /// (used in unit tests that build trees by hand).
    pub const DUMMY: FileId = FileId(usize::MAX);
}

impl Default for FileId {
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A byte-offset range in a source file.
///
/// The scanner stamps every token with a `Span`; the parser widens spans
/// as it builds larger tree nodes. All diagnostics are anchored to a
/// `Span`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub file: FileId,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    pub fn new(file: FileId, start: usize, end: usize) -> Self {
        Self { file, start, end }
    }

    /// A zero-width span at a single byte offset, used for errors that
    /// name a position rather than a range (e.g. "unexpected token at
    /// offset N").
    pub fn point(file: FileId, offset: usize) -> Self {
        Self {
            file,
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span covering both `self` and `other`. Both must
    /// belong to the same file.
    pub fn merge(self, other: Span) -> Span {
        debug_assert_eq!(self.file, other.file);
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The text of one loaded source file, plus the byte offset of every
/// line start (computed once, used to translate a byte offset into a
/// 1-based line/column pair for diagnostics).
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset into this file.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let col = offset.saturating_sub(line_start) + 1;
        (line_idx as u32 + 1, col as u32)
    }
}

/// Owns every source file loaded during one compile invocation.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(name, content));
        id
    }

    pub fn get(&self, id: FileId) -> Result<&SourceFile, SourceMapError> {
        self.files
            .get(id.0)
            .ok_or(SourceMapError::FileNotFound(id.0))
    }

    pub fn line_col(&self, span: Span) -> Option<(u32, u32)> {
        self.get(span.file).ok().map(|f| f.line_col(span.start))
    }
}
