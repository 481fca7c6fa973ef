use bytes::Bytes;

use crate::codec::{Buffer, Encoder, EncodeError, Kind};
use crate::error::{Error, ErrorKind};
use crate::schema::{
    Context, Decode, HeaderMap, Request, Response, StringList, decode_into, encode_headers,
    internal_encode, internal_error,
};

macro_rules! headers {
    ($($name:literal => [$($value:literal),*]),* $(,)?) => {{
        let mut map = HeaderMap::new();
        $(
            map.fields.insert(
                $name.to_owned(),
                StringList { values: vec![$($value.to_owned()),*] },
            );
        )*
        map
    }};
}

fn encode<T: crate::schema::Encode>(value: &T) -> Vec<u8> {
    let mut buf = Buffer::default();
    internal_encode(value, &mut buf).unwrap();
    buf.into_inner()
}

fn roundtrip<T: crate::schema::Encode + Decode + Default>(value: &T) -> T {
    let buf = encode(value);
    let mut decoded = T::default();
    decode_into(Some(&mut decoded), &buf).unwrap();
    decoded
}

#[test]
fn test_request_roundtrip() {
    let mut req = Request::default();
    req.set_method("GET").set_uri("/x").set_body("hi");

    let decoded = roundtrip(&req);
    assert_eq!(decoded.method(), "GET");
    assert_eq!(decoded.uri(), "/x");
    assert_eq!(&decoded.body()[..], b"hi");
    assert_eq!(decoded.content_length(), 2);
    assert_eq!(decoded, req);
}

#[test]
fn test_boundary_values() {
    let empty = Request::default();
    assert_eq!(roundtrip(&empty), empty);

    let req = Request {
        uri: "/a/b?c=d".to_owned(),
        method: "POST".to_owned(),
        content_length: -1,
        protocol: "HTTP/1.1".to_owned(),
        remote_ip: "127.0.0.1".to_owned(),
        body: Bytes::from_static(b"\0\xff\0binary\0"),
        headers: headers! {
            "Accept" => ["text/html", "application/json", ""],
            "x-empty" => [],
            "X-Single" => ["1"],
        },
    };
    assert_eq!(roundtrip(&req), req);

    let res = Response {
        status_code: i32::MIN,
        body: Bytes::new(),
        headers: headers! { "Set-Cookie" => ["a=1", "b=2"] },
    };
    assert_eq!(roundtrip(&res), res);
}

#[test]
fn test_many_headers() {
    let mut res = Response::default();
    for i in 0..64 {
        res.headers.fields.insert(
            format!("x-header-{i}"),
            StringList { values: (0..i % 4).map(|n| n.to_string()).collect() },
        );
    }
    let decoded = roundtrip(&res);
    assert_eq!(decoded.headers.len(), 64);
    assert_eq!(decoded, res);
}

#[test]
fn test_response_layout() {
    let mut res = Response::default();
    res.set_status_code(200).set_body("ok");

    assert_eq!(
        &encode(&res)[..],
        &[
            0x0c, 0x90, 0x03, // status 200
            0x04, 0x0a, 0x02, b'o', b'k', // body
            0x02, 0x05, 0x03, 0x0a, 0x00, // empty headers
        ]
    );
}

#[test]
fn test_request_field_order() {
    let req = Request {
        uri: "u".to_owned(),
        method: "m".to_owned(),
        content_length: 0,
        protocol: "p".to_owned(),
        remote_ip: "i".to_owned(),
        body: Bytes::from_static(b"b"),
        headers: HeaderMap::new(),
    };
    let buf = encode(&req);
    let strings: Vec<u8> = buf
        .windows(4)
        .filter(|w| w[0] == 0x05 && w[1] == 0x0a && w[2] == 0x01)
        .map(|w| w[3])
        .collect();
    assert_eq!(strings, b"umpi");
}

#[test]
fn test_nil_collapse() {
    let mut absent = Buffer::default();
    encode_headers(None, &mut absent).unwrap();
    let absent = absent.into_inner();
    let empty = encode(&HeaderMap::new());
    assert_eq!(absent, empty);

    let mut map = headers! { "a" => ["b"] };
    decode_into(Some(&mut map), &absent).unwrap();
    assert!(map.is_empty());

    // explicit nil marker also reads as no headers
    let mut map = headers! { "a" => ["b"] };
    decode_into(Some(&mut map), &[0x00]).unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_nil_record_resets() {
    let mut req = Request::default();
    req.set_method("GET").set_body("data");

    let mut buf = Buffer::default();
    buf.encode_none().unwrap();
    decode_into(Some(&mut req), buf.get_ref()).unwrap();
    assert_eq!(req, Request::default());

    // nil sub objects of context decode into fresh ones
    let mut ctx = Context::default();
    ctx.response_mut().set_body("stale");
    let mut buf = Buffer::default();
    (&mut buf).encode_none().and_then(|b| b.encode_none()).unwrap();
    decode_into(Some(&mut ctx), buf.get_ref()).unwrap();
    assert_eq!(ctx, Context::default());

    let mut list = StringList { values: vec!["x".to_owned()] };
    decode_into(Some(&mut list), &[0x00]).unwrap();
    assert!(list.values.is_empty());
}

#[test]
fn test_error_in_place_of_response() {
    let mut req = Request::default();
    req.set_method("GET");

    let mut buf = Buffer::default();
    internal_encode(&req, &mut buf).unwrap();
    internal_error(&crate::error::RemoteError::new("upstream failed"), &mut buf).unwrap();
    // well formed response bytes after the sentinel must be ignored
    let mut res = Response::default();
    res.set_status_code(500);
    internal_encode(&res, &mut buf).unwrap();

    let mut ctx = Context::default();
    let err = decode_into(Some(&mut ctx), buf.get_ref()).unwrap_err();
    assert_eq!(err.as_remote().unwrap().message(), "upstream failed");
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(ctx.request().method(), "GET");
    assert_eq!(*ctx.response(), Response::default());
}

#[test]
fn test_error_sentinel_precedence() {
    let mut buf = Buffer::default();
    (&mut buf)
        .encode_error("first".into())
        .and_then(|b| b.encode_str("/x"))
        .unwrap();

    let mut req = Request::default();
    let err = decode_into(Some(&mut req), buf.get_ref()).unwrap_err();
    assert_eq!(err.to_string(), "first");
    assert_eq!(req, Request::default());

    let mut list = StringList::default();
    let err = decode_into(Some(&mut list), &[0x06, 0x05, 0x0a, 0x01, b'e']).unwrap_err();
    assert_eq!(err, Error::Remote(crate::error::RemoteError::new("e")));
}

#[test]
fn test_empty_input() {
    let mut req = Request::default();
    let err = decode_into(Some(&mut req), &[]).unwrap_err();
    assert!(matches!(&err, Error::Decode(err) if err.value() == "string"));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn test_nil_target() {
    let err = decode_into::<Request>(None, &[0x00]).unwrap_err();
    assert_eq!(err, Error::NilTarget);
    assert_eq!(err.kind(), ErrorKind::Contract);
}

#[test]
fn test_no_rollback() {
    let mut src = Request::default();
    src.set_method("PUT").set_uri("/partial").set_body("body");
    let buf = encode(&src);

    // cut inside the body field
    let mut req = Request::default();
    let err = decode_into(Some(&mut req), &buf[..buf.len() - 8]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(req.uri(), "/partial");
    assert_eq!(req.method(), "PUT");
    assert_eq!(req.content_length(), 4);
}

#[test]
fn test_matches_primitive_codec() {
    let req = Request {
        uri: "/r".to_owned(),
        method: "GET".to_owned(),
        content_length: -2,
        protocol: "HTTP/1.1".to_owned(),
        remote_ip: "::1".to_owned(),
        body: Bytes::from_static(b"a\0b"),
        headers: headers! { "Accept" => ["a", "b"] },
    };

    // the same values written field by field
    let mut expect = Buffer::default();
    (&mut expect)
        .encode_str("/r")
        .and_then(|b| b.encode_str("GET"))
        .and_then(|b| b.encode_i64(-2))
        .and_then(|b| b.encode_str("HTTP/1.1"))
        .and_then(|b| b.encode_str("::1"))
        .and_then(|b| b.encode_bytes(b"a\0b"))
        .and_then(|b| b.encode_map(1, Kind::String, Kind::Any))
        .and_then(|b| b.encode_str("Accept"))
        .and_then(|b| b.encode_array(2, Kind::String))
        .and_then(|b| b.encode_str("a"))
        .and_then(|b| b.encode_str("b"))
        .unwrap();
    assert_eq!(encode(&req), expect.into_inner());

    let mut res = Response::default();
    res.set_status_code(-7);
    let mut expect = Buffer::default();
    (&mut expect)
        .encode_i32(-7)
        .and_then(|b| b.encode_bytes(b""))
        .and_then(|b| b.encode_map(0, Kind::String, Kind::Any))
        .unwrap();
    assert_eq!(encode(&res), expect.into_inner());
}

#[test]
fn test_decode_after_failure() {
    let buf = encode(&Request::default());
    let mut req = Request::default();
    req.set_method("GET");
    decode_into(Some(&mut req), &buf).unwrap();
    assert_eq!(req, Request::default());

    // decode after a failed one starts from a fresh reader
    assert!(decode_into(Some(&mut req), &[0x05]).is_err());
    assert!(decode_into(Some(&mut req), &buf).is_ok());
    assert_eq!(req, Request::default());
}

#[test]
fn test_encode_error_kind() {
    let err = Error::from(EncodeError::TooLong { len: 1 });
    assert_eq!(err.kind(), ErrorKind::Contract);
    assert_eq!(err.to_string(), "encode error: length 1 exceeds u32 prefix");
    assert!(std::error::Error::source(&err).is_some());
}
