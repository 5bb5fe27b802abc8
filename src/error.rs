use std::fmt;

/// Errors returned by the truncation API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("failed to parse HTML: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed markup, with the byte offset where the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `<` opened a tag that never reaches `>`.
    UnterminatedTag,
    UnterminatedComment,
    /// `</` with no tag name after it.
    MissingTagName,
    /// End tag with no open element.
    UnexpectedEndTag { name: String },
    MismatchedEndTag { expected: String, found: String },
    /// Input ended while the element was still open.
    UnclosedElement { name: String },
    VoidEndTag { name: String },
    /// `<!DOCTYPE>`, `<![CDATA[`, `<?xml` and friends.
    UnsupportedDeclaration,
    /// More than `limit` elements open at once.
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize) -> Self {
        ParseError { kind, offset }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnterminatedTag => write!(f, "unterminated tag"),
            ParseErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
            ParseErrorKind::MissingTagName => write!(f, "end tag without a name"),
            ParseErrorKind::UnexpectedEndTag { name } => {
                write!(f, "unexpected end tag </{name}>")
            }
            ParseErrorKind::MismatchedEndTag { expected, found } => {
                write!(f, "end tag </{found}> does not close <{expected}>")
            }
            ParseErrorKind::UnclosedElement { name } => write!(f, "element <{name}> is never closed"),
            ParseErrorKind::VoidEndTag { name } => write!(f, "void element <{name}> has an end tag"),
            ParseErrorKind::UnsupportedDeclaration => write!(f, "markup declarations are not supported in fragments"),
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "elements nested more than {limit} deep")
            }
        }
    }
}
