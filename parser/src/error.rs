use thiserror::Error;

/// Structural failures. These are the only errors a request-line parse
/// returns; content problems are absorbed into defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid request line: expected 3 tokens, found {found}")]
    InvalidRequestLine { found: usize },
    #[error("request line is {len} bytes, limit is {max}")]
    LineTooLong { len: usize, max: usize },
}

/// Failures of the URI grammar parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("uri is not valid utf-8")]
    InvalidEncoding,
    #[error("invalid uri character at offset {0}")]
    InvalidCharacter(usize),
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    #[error("malformed authority `{0}`")]
    MalformedAuthority(String),
}
