use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt, bytes::complete::tag_no_case, combinator::all_consuming, combinator::map,
    IResult,
};
use serde::{Serialize, Serializer};

use crate::events::{NoopEvents, ParseEvents};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Delete,
    Head,
    Post,
    Put,
    Connect,
    Options,
    Trace,
    Patch,
    /// Any other token, with its original casing.
    Other(String),
}

impl Method {
    #[inline]
    pub fn as_str(&self) -> &str {
        return match self {
            Method::Get => "GET",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
            Method::Other(method) => method,
        };
    }
}

#[inline]
fn known_method(input: &[u8]) -> IResult<&[u8], Method> {
    return all_consuming(alt((
        map(tag_no_case(b"get"), |_| Method::Get),
        map(tag_no_case(b"delete"), |_| Method::Delete),
        map(tag_no_case(b"head"), |_| Method::Head),
        map(tag_no_case(b"post"), |_| Method::Post),
        map(tag_no_case(b"put"), |_| Method::Put),
        map(tag_no_case(b"connect"), |_| Method::Connect),
        map(tag_no_case(b"options"), |_| Method::Options),
        map(tag_no_case(b"trace"), |_| Method::Trace),
        map(tag_no_case(b"patch"), |_| Method::Patch),
    )))(input);
}

/// Classifies a method token. Never fails: unknown tokens become
/// [`Method::Other`] and are reported to `events`.
pub fn resolve_method<E: ParseEvents + ?Sized>(token: &[u8], events: &E) -> Method {
    if let Ok((_, method)) = known_method(token) {
        return method;
    }
    let method = String::from_utf8_lossy(token).into_owned();
    events.unknown_method(&method);
    return Method::Other(method);
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.as_str());
    }
}

impl FromStr for Method {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Ok(resolve_method(s.as_bytes(), &NoopEvents));
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_str(self.as_str());
    }
}
