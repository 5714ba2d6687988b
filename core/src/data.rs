/// Sparse batch input and the line-oriented text format.
///
/// `SparseRows` is the row-pointer / column-index pair the training driver
/// iterates. The parser turns `target index:value index:value ...` lines
/// into rows, keeping the indices and discarding the values — the learner
/// is indicator-feature only.

use std::io::BufRead;

/// Row-major sparse structure: `indptr[r]..indptr[r+1]` spans row r's
/// nonzero column indices in `indices`.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseRows {
    indptr: Vec<usize>,
    indices: Vec<u32>,
}

impl SparseRows {
    pub fn new() -> Self {
        SparseRows { indptr: vec![0], indices: Vec::new() }
    }

    /// Append one row of nonzero column indices, input order preserved.
    pub fn push_row(&mut self, cols: &[u32]) {
        self.indices.extend_from_slice(cols);
        self.indptr.push(self.indices.len());
    }

    pub fn rows(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Total stored indices across all rows.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Nonzero column indices of row r.
    pub fn row(&self, r: usize) -> &[u32] {
        &self.indices[self.indptr[r]..self.indptr[r + 1]]
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.rows()).map(move |r| self.row(r))
    }

    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let mut m = SparseRows::new();
        for r in rows {
            m.push_row(r);
        }
        m
    }
}

impl Default for SparseRows {
    fn default() -> Self {
        SparseRows::new()
    }
}

// ── Line format ──────────────────────────────────────────────────────

/// Why a line failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// First field did not parse as a numeric target.
    BadTarget(String),
    /// A feature field was not `index:value`.
    BadField(String),
    /// A feature index was not a non-negative integer.
    BadIndex(String),
    /// The underlying reader failed.
    Io(String),
}

/// Parse failure, carrying the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::BadTarget(t) => write!(f, "line {}: bad target {t:?}", self.line),
            ParseErrorKind::BadField(t) => {
                write!(f, "line {}: expected index:value, got {t:?}", self.line)
            }
            ParseErrorKind::BadIndex(t) => {
                write!(f, "line {}: bad feature index {t:?}", self.line)
            }
            ParseErrorKind::Io(e) => write!(f, "line {}: read failed: {e}", self.line),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one line: `target index:value index:value ...`.
/// Values are checked for shape and discarded — only indices feed the model.
pub fn parse_line(line: &str) -> Result<(Vec<u32>, f64), ParseErrorKind> {
    let mut fields = line.split_whitespace();
    let target_str = fields.next().unwrap_or("");
    let target: f64 = target_str
        .parse()
        .map_err(|_| ParseErrorKind::BadTarget(target_str.to_string()))?;

    let mut cols = Vec::new();
    for field in fields {
        let (idx, val) = field
            .split_once(':')
            .ok_or_else(|| ParseErrorKind::BadField(field.to_string()))?;
        if val.parse::<f64>().is_err() {
            return Err(ParseErrorKind::BadField(field.to_string()));
        }
        let idx: u32 = idx
            .parse()
            .map_err(|_| ParseErrorKind::BadIndex(idx.to_string()))?;
        cols.push(idx);
    }
    Ok((cols, target))
}

/// Read a whole stream into (rows, targets). Blank lines are skipped; the
/// first malformed line aborts with its line number.
pub fn read_sparse_text<R: BufRead>(reader: R) -> Result<(SparseRows, Vec<f64>), ParseError> {
    let mut x = SparseRows::new();
    let mut y = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ParseError {
            line: lineno + 1,
            kind: ParseErrorKind::Io(e.to_string()),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (cols, target) =
            parse_line(trimmed).map_err(|kind| ParseError { line: lineno + 1, kind })?;
        x.push_row(&cols);
        y.push(target);
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_rows() {
        let mut m = SparseRows::new();
        m.push_row(&[3, 1, 4]);
        m.push_row(&[]);
        m.push_row(&[9]);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.row(0), &[3, 1, 4]);
        assert_eq!(m.row(1), &[] as &[u32]);
        assert_eq!(m.row(2), &[9]);
        let collected: Vec<&[u32]> = m.iter().collect();
        assert_eq!(collected.len(), 3);
    }

    #[test]
    fn test_parse_line_keeps_index_order() {
        let (cols, y) = parse_line("1 7:1 2:0.5 7:3").unwrap();
        assert_eq!(cols, vec![7, 2, 7]);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert!(matches!(parse_line(""), Err(ParseErrorKind::BadTarget(_))));
        assert!(matches!(parse_line("x 1:1"), Err(ParseErrorKind::BadTarget(_))));
        assert!(matches!(parse_line("1 17"), Err(ParseErrorKind::BadField(_))));
        assert!(matches!(parse_line("1 a:1"), Err(ParseErrorKind::BadIndex(_))));
        assert!(matches!(parse_line("1 -3:1"), Err(ParseErrorKind::BadIndex(_))));
        assert!(matches!(parse_line("1 3:b"), Err(ParseErrorKind::BadField(_))));
    }

    #[test]
    fn test_read_sparse_text_reports_line_number() {
        let text = "1 5:1\n\n0 6:1\n1 oops\n";
        let err = read_sparse_text(text.as_bytes()).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(matches!(err.kind, ParseErrorKind::BadField(_)));
    }

    #[test]
    fn test_read_sparse_text_skips_blank_lines() {
        let text = "1 5:1 9:2\n\n0 6:1\n";
        let (x, y) = read_sparse_text(text.as_bytes()).unwrap();
        assert_eq!(x.rows(), 2);
        assert_eq!(x.row(0), &[5, 9]);
        assert_eq!(x.row(1), &[6]);
        assert_eq!(y, vec![1.0, 0.0]);
    }
}
