//! Request-line parsing for HTTP/1.x.
//!
//! The first line of a request (`METHOD URI VERSION`) is split strictly and
//! interpreted leniently: only a line that does not carry exactly three
//! tokens is rejected, everything else degrades to a default.

pub mod config;
pub mod error;
pub mod events;
pub mod method;
pub mod query_parser;
pub mod request_parser;
pub mod split;
pub mod uri;
pub mod uri_parser;
pub mod version;

pub use config::ParserConfig;
pub use error::{Error, UriError};
pub use events::{NoopEvents, ParseEvents, TracingEvents};
pub use method::{resolve_method, Method};
pub use query_parser::{decode_query, QueryMap};
pub use request_parser::{parse_request_line, ParsedRequestLine, RequestLine, RequestLineParser};
pub use uri::{assemble_uri, Uri, UserInfo};
pub use version::{parse_version, Version};
