use std::fmt;

use nom::{character::complete::digit1, combinator::all_consuming, combinator::map_res, IResult};
use serde::Serialize;

use crate::split::segments;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };

    #[inline]
    pub const fn new(major: u32, minor: u32) -> Version {
        return Version { major, minor };
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "HTTP/{}.{}", self.major, self.minor);
    }
}

#[inline]
fn ascii_number(input: &[u8]) -> IResult<&[u8], u32> {
    return all_consuming(map_res(digit1, |digits: &[u8]| {
        // digit1 only yields ASCII digits
        std::str::from_utf8(digits).unwrap_or_default().parse::<u32>()
    }))(input);
}

#[inline]
fn number_or_one(input: &[u8]) -> u32 {
    return ascii_number(input).map_or(1, |(_, n)| n);
}

/// Reads `NAME/MAJOR[.MINOR]`. Never fails: a token without a `/` gives
/// `0.0`, unreadable numbers fall back to `1`.
pub fn parse_version(token: &[u8]) -> Version {
    let mut comps = segments(token, b'/', 1);
    let (Some(_), Some(number), None) = (comps.next(), comps.next(), comps.next()) else {
        return Version::default();
    };

    let mut parts = segments(number, b'.', 1);
    let major = parts.next().map_or(1, number_or_one);
    let minor = parts.next().map_or(0, number_or_one);
    return Version { major, minor };
}
