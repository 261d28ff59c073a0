//! Source text registry for line/column mapping.
//!
//! Every `parse` call registers its text here under a fresh [`FileId`], so a
//! [`Loc`] from any fragment can be turned back into `file:line:col`.

use widl_ir::{FileId, Loc};

#[derive(Clone, Debug, PartialEq, Eq)]
struct SourceFile {
    name: String,
    text: String,
    /// Byte offset of the first character of each line.
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(name: String, text: String) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
            }
        }
        SourceFile {
            name,
            text,
            line_starts,
        }
    }

    fn line_index(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    fn line_text(&self, line: usize) -> &str {
        let start = self.line_starts.get(line).copied().unwrap_or(0) as usize;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |&next| next as usize);
        self.text
            .get(start..end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }
}

/// One-based line and column (in characters) of a source offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// All source texts seen by a parser, indexed by [`FileId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap { files: Vec::new() }
    }

    /// Register a source text and return its id.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId::from_raw(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile::new(name.into(), text.into()));
        id
    }

    /// Id the next call to [`add`](Self::add) will return.
    pub fn next_id(&self) -> FileId {
        FileId::from_raw(u32::try_from(self.files.len()).unwrap_or(u32::MAX))
    }

    pub fn name(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(|f| f.name.as_str())
    }

    pub fn text(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(|f| f.text.as_str())
    }

    /// Resolve the start of `loc` to a line and column.
    pub fn line_col(&self, loc: Loc) -> Option<LineCol> {
        let file = self.files.get(loc.file.index())?;
        let line = file.line_index(loc.span.start);
        let line_start = file.line_starts[line] as usize;
        let upto = file.text.get(line_start..loc.span.start as usize)?;
        Some(LineCol {
            line: line + 1,
            col: upto.chars().count() + 1,
        })
    }

    /// Text of the line containing the start of `loc`, without the newline.
    pub fn line_text(&self, loc: Loc) -> Option<&str> {
        let file = self.files.get(loc.file.index())?;
        Some(file.line_text(file.line_index(loc.span.start)))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widl_ir::Span;

    #[test]
    fn line_col_is_one_based() {
        let mut map = SourceMap::new();
        let file = map.add("a.webidl", "interface A {\n  attribute long x;\n};\n");

        let at = |offset| Loc::new(file, Span::point(offset));
        assert_eq!(map.line_col(at(0)), Some(LineCol { line: 1, col: 1 }));
        assert_eq!(map.line_col(at(16)), Some(LineCol { line: 2, col: 3 }));
        assert_eq!(map.line_text(at(16)), Some("  attribute long x;"));
        assert_eq!(map.name(file), Some("a.webidl"));
    }

    #[test]
    fn ids_are_sequential() {
        let mut map = SourceMap::new();
        assert_eq!(map.next_id(), FileId::from_raw(0));
        let first = map.add("first", "");
        let second = map.add("second", "");
        assert_eq!(first, FileId::from_raw(0));
        assert_eq!(second, FileId::from_raw(1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn unknown_file_is_none() {
        let map = SourceMap::new();
        assert_eq!(map.line_col(Loc::DUMMY), None);
    }
}
