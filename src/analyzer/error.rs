//! Every way a compilation unit can fail.
//!
//! There is no error recovery: the first error aborts the unit and no
//! partial tree is produced.
use std::io;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// A double quote with no closing quote on the same line.
    #[error("unterminated string constant on line {line}")]
    UnterminatedString { line: usize },

    #[error("unexpected {kind} `{lexeme}` on line {line} (token {position}), expected {expected}")]
    UnexpectedToken {
        kind: String,
        lexeme: String,
        line: usize,
        position: usize,
        expected: String,
    },

    /// The token sequence ran out while a production still needed input.
    #[error("unexpected end of input at token {position}, expected {expected}")]
    PrematureEnd { position: usize, expected: String },

    #[error("nesting deeper than {limit} levels on line {line} (token {position})")]
    NestingTooDeep {
        limit: usize,
        line: usize,
        position: usize,
    },

    #[error("unable to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}
