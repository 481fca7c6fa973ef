use bytes::Bytes;

use crate::codec::Buffer;
use crate::schema::{Context, Request, Response, decode_into, internal_encode};

#[test]
fn test_request_body_sets_length() {
    let mut req = Request::default();
    req.set_body("Test Data");
    assert_eq!(&req.body()[..], b"Test Data");
    assert_eq!(req.content_length(), 9);

    req.set_body_bytes(Bytes::new());
    assert!(req.body().is_empty());
    assert_eq!(req.content_length(), 0);

    req.set_body_bytes(vec![0u8; 300]);
    assert_eq!(req.content_length(), 300);
}

#[test]
fn test_response_body_has_no_length() {
    let mut res = Response::default();
    res.set_status_code(201).set_body("Hello, World!");
    assert_eq!(res.status_code(), 201);
    assert_eq!(&res.body()[..], b"Hello, World!");

    let mut buf = Buffer::default();
    internal_encode(&res, &mut buf).unwrap();
    let mut decoded = Response::default();
    decode_into(Some(&mut decoded), buf.get_ref()).unwrap();
    assert_eq!(decoded, res);
}

#[test]
fn test_headers_get_set() {
    let mut req = Request::default();
    assert!(req.headers().get("Accept").is_none());
    assert!(!req.headers().contains("Accept"));

    let prev = req.headers_mut().set("Accept", ["text/html", "text/plain"]);
    assert!(prev.is_none());
    assert_eq!(
        req.headers().get("Accept"),
        Some(&["text/html".to_owned(), "text/plain".to_owned()][..])
    );

    // set replaces, never appends
    let prev = req.headers_mut().set("Accept", ["*/*"]);
    assert_eq!(prev.unwrap(), ["text/html", "text/plain"]);
    assert_eq!(req.headers().get("Accept").unwrap(), ["*/*"]);
    assert_eq!(req.headers().len(), 1);

    // names are matched exactly
    assert!(req.headers().get("accept").is_none());

    req.headers_mut().set("X-Empty", Vec::<String>::new());
    assert_eq!(req.headers().get("X-Empty"), Some(&[][..]));

    let mut names: Vec<&str> = req.headers().iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    assert_eq!(names, ["Accept", "X-Empty"]);

    assert_eq!(req.headers_mut().remove("Accept").unwrap(), ["*/*"]);
    assert!(req.headers_mut().remove("Accept").is_none());
    assert_eq!(req.headers().len(), 1);
}

#[test]
fn test_response_headers() {
    let mut ctx = Context::new();
    let mut headers = ctx.response_mut().headers_mut();
    headers.set("Set-Cookie", ["a=1", "b=2"]);
    assert_eq!(headers.as_headers().len(), 1);

    assert_eq!(ctx.response().headers().get("Set-Cookie").unwrap(), ["a=1", "b=2"]);
    assert!(ctx.request().headers().is_empty());
}

#[test]
fn test_context_reset() {
    let mut ctx = Context::new();
    ctx.request_mut()
        .set_method("POST")
        .set_uri("/submit")
        .set_body("payload");
    ctx.request_mut().headers_mut().set("Host", ["localhost"]);
    ctx.response_mut().set_status_code(500).set_body("failed");

    ctx.reset();
    assert_eq!(ctx, Context::default());
    assert_eq!(ctx.request().content_length(), 0);
}
