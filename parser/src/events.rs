use crate::error::UriError;

/// Receives the non-fatal events raised while a request line is interpreted.
pub trait ParseEvents: Send + Sync {
    fn unknown_method(&self, method: &str);

    fn uri_rejected(&self, uri: &[u8], error: &UriError);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEvents;

impl ParseEvents for TracingEvents {
    #[inline]
    fn unknown_method(&self, method: &str) {
        tracing::warn!(method, "did not recognize method, using Other");
    }

    #[inline]
    fn uri_rejected(&self, uri: &[u8], error: &UriError) {
        tracing::debug!(uri = %String::from_utf8_lossy(uri), %error, "uri grammar rejected token");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl ParseEvents for NoopEvents {
    #[inline]
    fn unknown_method(&self, _method: &str) {}

    #[inline]
    fn uri_rejected(&self, _uri: &[u8], _error: &UriError) {}
}

impl<T: ParseEvents + ?Sized> ParseEvents for &T {
    #[inline]
    fn unknown_method(&self, method: &str) {
        (**self).unknown_method(method);
    }

    #[inline]
    fn uri_rejected(&self, uri: &[u8], error: &UriError) {
        (**self).uri_rejected(uri, error);
    }
}
