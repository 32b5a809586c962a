/// Scope type for nested declaration blocks
use std::ops::Range;

/// A located scope: header line, body lines, closer line, nested scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Index of the header line (`group :test do`)
    pub header: usize,
    /// Line indices strictly between header and closer
    pub body: Range<usize>,
    /// Index of the closing line (`end`)
    pub closer: usize,
    /// Scopes nested directly inside the body, in line order
    pub children: Vec<Scope>,
}
