use bytes::Bytes;

use super::HeaderMap;

record! {
    /// Request and response exchanged between guest and host.
    ///
    /// Both are always present, a nil record decodes into a fresh empty one.
    pub struct Context {
        request: Request => record,
        response: Response => record,
    }
}

record! {
    /// HTTP Request.
    pub struct Request {
        uri: String => string,
        method: String => string,
        /// Advisory, only recomputed by the body setters.
        content_length: i64 => i64,
        protocol: String => string,
        remote_ip: String => string,
        body: Bytes => bytes,
        headers: HeaderMap => record,
    }
}

record! {
    /// HTTP Response.
    pub struct Response {
        status_code: i32 => i32,
        body: Bytes => bytes,
        headers: HeaderMap => record,
    }
}

record! {
    /// Ordered header values.
    pub struct StringList {
        values: Vec<String> => strings,
    }
}
