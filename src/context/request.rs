use bytes::Bytes;

use super::{Headers, HeadersMut};
use crate::schema::Request;

impl Request {
    /// Returns request method, e.g: `"GET"`.
    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.uri = uri.into();
        self
    }

    /// Returns protocol, e.g: `"HTTP/1.1"`.
    #[inline]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    #[inline]
    pub fn remote_ip(&self) -> &str {
        &self.remote_ip
    }

    /// Returns content length as last set by [`set_body`][Request::set_body] or
    /// [`set_body_bytes`][Request::set_body_bytes].
    ///
    /// Not recomputed when the body is changed by other means.
    #[inline]
    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Set body from text, and content length to its length.
    #[inline]
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        let body: String = body.into();
        self.set_body_bytes(body)
    }

    /// Set body, and content length to its length.
    pub fn set_body_bytes(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self.content_length = self.body.len() as i64;
        self
    }

    /// Returns read view of request headers.
    #[inline]
    pub fn headers(&self) -> Headers<'_> {
        Headers::new(&self.headers)
    }

    /// Returns write view of request headers.
    #[inline]
    pub fn headers_mut(&mut self) -> HeadersMut<'_> {
        HeadersMut::new(&mut self.headers)
    }
}
