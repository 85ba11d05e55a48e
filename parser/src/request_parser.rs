use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::Error;
use crate::events::{ParseEvents, TracingEvents};
use crate::method::{resolve_method, Method};
use crate::split::segments;
use crate::uri::{assemble_uri, Uri};
use crate::version::{parse_version, Version};

// METHOD SP URI SP VERSION

/// The three tokens of a request line, borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a [u8],
    pub uri: &'a [u8],
    pub version: &'a [u8],
}

impl<'a> RequestLine<'a> {
    /// Splits `line` on spaces. Runs of spaces count as one; anything other
    /// than exactly three tokens is rejected.
    pub fn parse(line: &'a [u8]) -> Result<RequestLine<'a>, Error> {
        let mut comps = segments(line, b' ', 3);
        return match (comps.next(), comps.next(), comps.next(), comps.next()) {
            (Some(method), Some(uri), Some(version), None) => Ok(RequestLine {
                method,
                uri,
                version,
            }),
            (a, b, c, d) => Err(Error::InvalidRequestLine {
                found: [a, b, c, d].iter().filter(|comp| comp.is_some()).count(),
            }),
        };
    }

    #[inline]
    pub fn method<E: ParseEvents + ?Sized>(&self, events: &E) -> Method {
        return resolve_method(self.method, events);
    }

    #[inline]
    pub fn version(&self) -> Version {
        return parse_version(self.version);
    }

    #[inline]
    pub fn uri<E: ParseEvents + ?Sized>(&self, events: &E) -> Uri {
        return assemble_uri(self.uri, events);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRequestLine {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
}

#[derive(Debug, Clone)]
pub struct RequestLineParser<E = TracingEvents> {
    config: ParserConfig,
    events: E,
}

impl RequestLineParser<TracingEvents> {
    #[inline]
    pub fn new(config: ParserConfig) -> RequestLineParser<TracingEvents> {
        return RequestLineParser {
            config,
            events: TracingEvents,
        };
    }
}

impl<E: ParseEvents> RequestLineParser<E> {
    #[inline]
    pub fn with_events<F: ParseEvents>(self, events: F) -> RequestLineParser<F> {
        return RequestLineParser {
            config: self.config,
            events,
        };
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        return &self.config;
    }

    /// Checks the configured length limit, then splits the line.
    pub fn split<'a>(&self, line: &'a [u8]) -> Result<RequestLine<'a>, Error> {
        if let Some(max) = self.config.max_line_len {
            if line.len() > max {
                return Err(Error::LineTooLong {
                    len: line.len(),
                    max,
                });
            }
        }
        return RequestLine::parse(line);
    }

    pub fn parse(&self, line: &[u8]) -> Result<ParsedRequestLine, Error> {
        let request_line = self.split(line)?;
        return Ok(ParsedRequestLine {
            method: request_line.method(&self.events),
            uri: request_line.uri(&self.events),
            version: request_line.version(),
        });
    }
}

/// Parses with the default limits, logging through `tracing`.
#[inline]
pub fn parse_request_line(line: &[u8]) -> Result<ParsedRequestLine, Error> {
    return RequestLineParser::new(ParserConfig::default()).parse(line);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::events::test::{Event, RecordingEvents};
    use crate::events::NoopEvents;
    use proptest::prelude::*;

    fn parser() -> RequestLineParser<NoopEvents> {
        return RequestLineParser::new(ParserConfig::default()).with_events(NoopEvents);
    }

    #[test]
    fn test_parse_request() {
        let res = parser().parse(b"GET /foo HTTP/1.1").unwrap();
        assert_eq!(res.method, Method::Get);
        assert_eq!(res.uri.path.as_deref(), Some("/foo"));
        assert_eq!(res.version, Version::new(1, 1));
    }

    #[test]
    fn test_repeated_query_keys() {
        let res = parser().parse(b"POST /x?a=1&a=2 HTTP/1.1").unwrap();
        assert_eq!(res.method, Method::Post);
        assert_eq!(
            res.uri.query["a"],
            vec![Some("1".to_owned()), Some("2".to_owned())]
        );
    }

    #[test]
    fn test_split_views() {
        let line = b"DELETE  /item/7   HTTP/1.0";
        let request_line = RequestLine::parse(line).unwrap();
        assert_eq!(
            request_line,
            RequestLine {
                method: b"DELETE",
                uri: b"/item/7",
                version: b"HTTP/1.0",
            }
        );
        let base = line.as_ptr() as usize;
        let offset = |view: &[u8]| view.as_ptr() as usize - base;
        assert!(offset(request_line.method) < offset(request_line.uri));
        assert!(offset(request_line.uri) < offset(request_line.version));
    }

    #[test]
    fn test_wrong_token_count() {
        assert_eq!(
            RequestLine::parse(b"GET /foo"),
            Err(Error::InvalidRequestLine { found: 2 })
        );
        assert_eq!(
            RequestLine::parse(b""),
            Err(Error::InvalidRequestLine { found: 0 })
        );
        assert_eq!(
            RequestLine::parse(b"GET /a b HTTP/1.1"),
            Err(Error::InvalidRequestLine { found: 4 })
        );
        assert_eq!(
            parser().parse(b"GET"),
            Err(Error::InvalidRequestLine { found: 1 })
        );
    }

    #[test]
    fn test_trailing_space() {
        assert!(RequestLine::parse(b"GET / HTTP/1.1 ").is_ok());
        assert_eq!(
            RequestLine::parse(b"GET / HTTP/1.1  "),
            Err(Error::InvalidRequestLine { found: 4 })
        );
    }

    #[test]
    fn test_unknown_method() {
        let events = RecordingEvents::default();
        let res = RequestLineParser::new(ParserConfig::default())
            .with_events(&events)
            .parse(b"FOOBAR /x HTTP/1.1")
            .unwrap();
        assert_eq!(res.method, Method::Other("FOOBAR".into()));
        assert_eq!(res.uri.path.as_deref(), Some("/x"));
        assert_eq!(events.take(), vec![Event::UnknownMethod("FOOBAR".into())]);
    }

    #[test]
    fn test_lenient_content() {
        let res = parser().parse(b"get http://[bad GARBAGE").unwrap();
        assert_eq!(res.method, Method::Get);
        assert_eq!(res.uri, Uri::default());
        assert_eq!(res.version, Version::new(0, 0));

        let res = parser().parse(b"OPTIONS * HTTP/2").unwrap();
        assert_eq!(res.uri.path.as_deref(), Some("*"));
        assert_eq!(res.version, Version::new(2, 0));
    }

    #[test]
    fn test_raw_characters_in_target() {
        let res = parser().parse(b"GET /files/a|b HTTP/1.1").unwrap();
        assert_eq!(res.uri.path.as_deref(), Some("/files/a|b"));

        let res = parser().parse(b"GET /search?q=100% HTTP/1.1").unwrap();
        assert_eq!(res.uri.path.as_deref(), Some("/search"));
        assert_eq!(res.uri.query_value("q"), Some("100%"));

        let res = parser().parse(b"GET /api?f={} HTTP/1.1").unwrap();
        assert_eq!(res.uri.query_value("f"), Some("{}"));
    }

    #[test]
    fn test_line_limit() {
        let config = ParserConfig::default().with_max_line_len(16);
        let parser = RequestLineParser::new(config).with_events(NoopEvents);
        assert!(parser.parse(b"GET / HTTP/1.1").is_ok());
        assert_eq!(
            parser.parse(b"GET /longer HTTP/1.1"),
            Err(Error::LineTooLong { len: 20, max: 16 })
        );

        let long = format!("GET /{} HTTP/1.1", "a".repeat(10_000));
        assert!(matches!(
            parse_request_line(long.as_bytes()),
            Err(Error::LineTooLong { .. })
        ));
        let unbounded = RequestLineParser::new(ParserConfig::unbounded()).with_events(NoopEvents);
        assert!(unbounded.parse(long.as_bytes()).is_ok());
    }

    #[test]
    fn test_serialize_parsed() {
        let res = parser().parse(b"PUT /doc?id=3 HTTP/1.1").unwrap();
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["method"], "PUT");
        assert_eq!(json["version"]["major"], 1);
        assert_eq!(json["uri"]["query"]["id"][0], "3");
    }

    #[test]
    fn test_parse_firefox_request_line() {
        let res = parse_request_line(b"GET /s?q=su:dog HTTP/1.1").unwrap();
        assert_eq!(res.method, Method::Get);
        assert_eq!(res.uri.path.as_deref(), Some("/s"));
        assert_eq!(res.uri.query_value("q"), Some("su:dog"));
        assert_eq!(res.version, Version::HTTP_11);
    }

    proptest! {
        #[test]
        fn tokens_parse_the_same_alone(
            method in "[A-Za-z]{1,8}",
            uri in "/[a-z0-9/]{0,12}(\\?[a-z]{1,3}=[a-z0-9+%]{0,4}(&[a-z]{1,3}=[a-z0-9]{0,4}){0,3})?",
            version in "[A-Z]{0,5}/?[0-9x]{0,2}(\\.[0-9x]{0,2})?",
        ) {
            prop_assume!(!version.is_empty());
            let line = format!("{} {} {}", method, uri, version);
            let res = parser().parse(line.as_bytes()).unwrap();
            prop_assert_eq!(res.method, resolve_method(method.as_bytes(), &NoopEvents));
            prop_assert_eq!(res.uri, assemble_uri(uri.as_bytes(), &NoopEvents));
            prop_assert_eq!(res.version, parse_version(version.as_bytes()));
        }
    }
}
