use indexmap::IndexMap;
use nom::{
    bytes::complete::{tag, take_till},
    combinator::opt,
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult,
};
use percent_encoding::percent_decode_str;

/// Query parameters in order of first appearance. Every occurrence of a key
/// appends to its list; a bare key (no `=`) records `None`.
pub type QueryMap = IndexMap<String, Vec<Option<String>>>;

type RawPair<'a> = (&'a str, Option<&'a str>);

#[inline]
fn parse_pair(input: &str) -> IResult<&str, RawPair<'_>> {
    return pair(
        take_till(|c: char| c == '=' || c == '&'),
        opt(preceded(tag("="), take_till(|c: char| c == '&'))),
    )(input);
}

#[inline]
fn parse_pairs(input: &str) -> IResult<&str, Vec<RawPair<'_>>> {
    return separated_list0(tag("&"), parse_pair)(input);
}

#[inline]
fn decode_component(raw: &str) -> String {
    if !raw.contains(['+', '%']) {
        return raw.to_owned();
    }
    let spaced = raw.replace('+', " ");
    return percent_decode_str(&spaced).decode_utf8_lossy().into_owned();
}

/// Decodes an `application/x-www-form-urlencoded` query string.
pub fn decode_query(query: &str) -> QueryMap {
    let mut fields = QueryMap::new();
    let pairs = match parse_pairs(query) {
        Ok((_, pairs)) => pairs,
        Err(_) => return fields,
    };
    for (key, value) in pairs {
        if key.is_empty() && value.is_none() {
            continue;
        }
        fields
            .entry(decode_component(key))
            .or_default()
            .push(value.map(decode_component));
    }
    return fields;
}
