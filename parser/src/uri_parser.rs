use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::{char, digit1, satisfy},
    combinator::{all_consuming, opt, recognize, rest, verify},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::error::UriError;

// [scheme:][//[user[:password]@]host[:port]][path][?query][#fragment]

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawUserInfo<'a> {
    pub username: &'a str,
    pub password: Option<&'a str>,
}

/// Components of a URI token, borrowed from it. Nothing is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawUri<'a> {
    pub scheme: Option<&'a str>,
    pub user_info: Option<RawUserInfo<'a>>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: Option<&'a str>,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

type Parts<'a> = (
    Option<&'a str>,
    Option<&'a str>,
    &'a str,
    Option<&'a str>,
    Option<&'a str>,
);

type AuthorityParts<'a> = (Option<&'a str>, &'a str, Option<&'a str>);

// Only what breaks request-line framing is refused; `|`, `{`, a bare `%`
// and friends are left to the path and query as sent.
#[inline]
fn is_uri_char(c: char) -> bool {
    return !(c.is_ascii_control() || c == ' ');
}

#[inline]
fn uri_text(input: &str) -> IResult<&str, &str> {
    return take_while(is_uri_char)(input);
}

fn check_characters(uri: &str) -> Result<(), UriError> {
    return match uri_text(uri) {
        Ok(("", _)) => Ok(()),
        Ok((remaining, _)) => Err(UriError::InvalidCharacter(uri.len() - remaining.len())),
        Err(_) => Err(UriError::InvalidCharacter(0)),
    };
}

#[inline]
fn scheme(input: &str) -> IResult<&str, &str> {
    return terminated(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic()),
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        )),
        char(':'),
    )(input);
}

#[inline]
fn reg_name(input: &str) -> IResult<&str, &str> {
    return verify(take_till(|c: char| c == ':'), |host: &str| !host.starts_with('['))(input);
}

#[inline]
fn ip_literal(input: &str) -> IResult<&str, &str> {
    return recognize(delimited(char('['), take_till(|c: char| c == ']'), char(']')))(input);
}

// CONNECT targets: `host:port` and nothing else.
#[inline]
fn authority_form(input: &str) -> IResult<&str, (&str, &str)> {
    return all_consuming(separated_pair(
        alt((
            ip_literal,
            take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')),
        )),
        char(':'),
        digit1,
    ))(input);
}

#[inline]
fn authority(input: &str) -> IResult<&str, AuthorityParts<'_>> {
    return all_consuming(tuple((
        opt(terminated(take_till(|c: char| c == '@'), char('@'))),
        alt((ip_literal, reg_name)),
        opt(preceded(char(':'), rest)),
    )))(input);
}

#[inline]
fn uri_parts(input: &str) -> IResult<&str, Parts<'_>> {
    return tuple((
        opt(scheme),
        opt(preceded(
            tag("//"),
            take_till(|c: char| matches!(c, '/' | '?' | '#')),
        )),
        take_till(|c: char| c == '?' || c == '#'),
        opt(preceded(char('?'), take_till(|c: char| c == '#'))),
        opt(preceded(char('#'), rest)),
    ))(input);
}

#[inline]
fn non_empty(value: &str) -> Option<&str> {
    return if value.is_empty() { None } else { Some(value) };
}

fn parse_port(port: &str) -> Result<Option<u16>, UriError> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UriError::InvalidPort(port.to_owned()));
    }
    return port
        .parse::<u16>()
        .map(Some)
        .map_err(|_| UriError::InvalidPort(port.to_owned()));
}

fn parse_authority(
    input: &str,
) -> Result<(Option<RawUserInfo<'_>>, Option<&str>, Option<u16>), UriError> {
    let (_, (user_info, host, port)) =
        authority(input).map_err(|_| UriError::MalformedAuthority(input.to_owned()))?;
    let user_info = user_info.map(|info| match info.split_once(':') {
        Some((username, password)) => RawUserInfo {
            username,
            password: Some(password),
        },
        None => RawUserInfo {
            username: info,
            password: None,
        },
    });
    let port = match port {
        Some(port) => parse_port(port)?,
        None => None,
    };
    return Ok((user_info, non_empty(host), port));
}

/// Splits a request target into its components.
pub fn parse_uri(uri: &str) -> Result<RawUri<'_>, UriError> {
    check_characters(uri)?;

    if uri == "*" {
        return Ok(RawUri {
            path: Some(uri),
            ..RawUri::default()
        });
    }

    if let Ok((_, (host, port))) = authority_form(uri) {
        return Ok(RawUri {
            host: Some(host),
            port: parse_port(port)?,
            ..RawUri::default()
        });
    }

    let (_, (scheme, authority, path, query, fragment)) =
        uri_parts(uri).map_err(|_| UriError::InvalidCharacter(0))?;

    let mut parsed = RawUri {
        scheme,
        path: non_empty(path),
        query,
        fragment,
        ..RawUri::default()
    };
    if let Some(authority) = authority {
        let (user_info, host, port) = parse_authority(authority)?;
        parsed.user_info = user_info;
        parsed.host = host;
        parsed.port = port;
    }
    return Ok(parsed);
}
