use serde::Serialize;

use crate::error::UriError;
use crate::events::ParseEvents;
use crate::query_parser::{decode_query, QueryMap};
use crate::uri_parser::{parse_uri, RawUri};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Uri {
    pub scheme: Option<String>,
    pub user_info: UserInfo,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub query: QueryMap,
    pub fragment: Option<String>,
}

impl Uri {
    /// First value recorded for `key`, if it carried one.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        return self
            .query
            .get(key)
            .and_then(|values| values.first())
            .and_then(|value| value.as_deref());
    }
}

impl From<RawUri<'_>> for Uri {
    fn from(raw: RawUri<'_>) -> Uri {
        let user_info = match raw.user_info {
            Some(info) => UserInfo {
                username: info.username.to_owned(),
                password: info.password.unwrap_or_default().to_owned(),
            },
            None => UserInfo::default(),
        };
        return Uri {
            scheme: raw.scheme.map(str::to_owned),
            user_info,
            host: raw.host.map(str::to_owned),
            port: raw.port,
            path: raw.path.map(str::to_owned),
            query: decode_query(raw.query.unwrap_or_default()),
            fragment: raw.fragment.map(str::to_owned),
        };
    }
}

/// Builds a [`Uri`] from a request-target token. Never fails: a token the
/// grammar rejects is reported to `events` and yields an empty `Uri`.
pub fn assemble_uri<E: ParseEvents + ?Sized>(token: &[u8], events: &E) -> Uri {
    let parsed = std::str::from_utf8(token)
        .map_err(|_| UriError::InvalidEncoding)
        .and_then(parse_uri);
    return match parsed {
        Ok(raw) => Uri::from(raw),
        Err(error) => {
            events.uri_rejected(token, &error);
            Uri::from(RawUri::default())
        }
    };
}
