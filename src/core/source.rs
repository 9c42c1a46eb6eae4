use serde::Serialize;

/// Position of a construct in a scanned source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column, counted in characters.
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Location that only names a file (used when no tree could be produced).
    pub fn file(file_path: impl Into<String>) -> Self {
        Self::new(file_path, 0, 0)
    }

    pub fn is_file_level(&self) -> bool {
        self.line == 0
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_file_level() {
            write!(f, "{}", self.file_path)
        } else {
            write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
        }
    }
}

/// Byte range plus human position of a node, kept in the tree's side-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, col: usize) -> Self {
        Self {
            start,
            end,
            line,
            col,
        }
    }

    /// Span covering `self` through `other`, positioned at `self`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            col: self.col,
        }
    }

    pub fn located_in(&self, file_path: &str) -> SourceLocation {
        SourceLocation::new(file_path, self.line, self.col)
    }
}
