//! Source positions for diagnostics.

use std::fmt;

use crate::{Name, StringInterner};

/// Where a node came from: the source origin (file name or `<stdin>`) and a
/// 1-based line number.
///
/// Positions are only used for error reporting; they take part in node
/// equality because the parser attaches them to every token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct SourcePos {
    pub origin: Name,
    pub line: u32,
}

impl SourcePos {
    /// Position for synthesized nodes.
    pub const NONE: SourcePos = SourcePos {
        origin: Name::EMPTY,
        line: 0,
    };

    #[inline]
    pub const fn new(origin: Name, line: u32) -> Self {
        SourcePos { origin, line }
    }

    /// Whether this position points at real source.
    #[inline]
    pub fn is_known(self) -> bool {
        self.line != 0
    }

    /// Render as `origin:line` (or `<none>` for synthesized nodes).
    pub fn display(self, interner: &StringInterner) -> impl fmt::Display + '_ {
        PosDisplay {
            pos: self,
            interner,
        }
    }
}

struct PosDisplay<'a> {
    pos: SourcePos,
    interner: &'a StringInterner,
}

impl fmt::Display for PosDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos.is_known() {
            write!(
                f,
                "{}:{}",
                self.interner.lookup(self.pos.origin),
                self.pos.line
            )
        } else {
            f.write_str("<none>")
        }
    }
}
