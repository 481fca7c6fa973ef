//! Context Accessors.
//!
//! Read and write projections over the schema records. The only derived state is the request
//! `content_length`, kept in sync by the request body setters.
use crate::schema::{Context, Request, Response};

mod request;
mod response;
mod headers;

pub use headers::{Headers, HeadersMut, Iter};

impl Context {
    /// Create new empty [`Context`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns shared reference to [`Request`].
    #[inline]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns mutable reference to [`Request`].
    #[inline]
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// Returns shared reference to [`Response`].
    #[inline]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Returns mutable reference to [`Response`].
    #[inline]
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Reset into freshly constructed state, keeping allocations where possible.
    pub fn reset(&mut self) {
        let Self { request, response } = self;
        request.uri.clear();
        request.method.clear();
        request.content_length = 0;
        request.protocol.clear();
        request.remote_ip.clear();
        request.body.clear();
        request.headers.fields.clear();
        response.status_code = 0;
        response.body.clear();
        response.headers.fields.clear();
    }
}

#[cfg(test)]
mod test;
