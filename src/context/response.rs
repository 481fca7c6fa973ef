use bytes::Bytes;

use super::{Headers, HeadersMut};
use crate::schema::Response;

// Response carries no content length, the body setters only touch the body.
impl Response {
    #[inline]
    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    #[inline]
    pub fn set_status_code(&mut self, status_code: i32) -> &mut Self {
        self.status_code = status_code;
        self
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[inline]
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        let body: String = body.into();
        self.set_body_bytes(body)
    }

    #[inline]
    pub fn set_body_bytes(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self
    }

    #[inline]
    pub fn headers(&self) -> Headers<'_> {
        Headers::new(&self.headers)
    }

    #[inline]
    pub fn headers_mut(&mut self) -> HeadersMut<'_> {
        HeadersMut::new(&mut self.headers)
    }
}
