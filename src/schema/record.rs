/// Declare a record and generate its positional codec.
///
/// Field order in the declaration is the wire order. Each field names the primitive it is
/// written as:
///
/// - `string`, `String`
/// - `i32`, `i32`
/// - `i64`, `i64`
/// - `bytes`, [`Bytes`][bytes::Bytes]
/// - `strings`, `Vec<String>` written as a string slice
/// - `record`, any type implementing [`Encode`] and [`Decode`]
///
/// The generated decoder resets the record to default on nil marker, and returns the encoded
/// error without reading any field on error sentinel.
///
/// [`Encode`]: crate::schema::Encode
/// [`Decode`]: crate::schema::Decode
macro_rules! record {
    (
        $(#[$doc:meta])*
        pub struct $name:ident {
            $(
                $(#[$fdoc:meta])*
                $field:ident: $ty:ty => $kind:ident,
            )*
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$fdoc])*
                pub(crate) $field: $ty,
            )*
        }

        impl $crate::schema::Encode for $name {
            fn encode(
                &self,
                buf: &mut $crate::codec::Buffer,
            ) -> Result<(), $crate::error::Error> {
                #[allow(unused_imports)]
                use $crate::codec::Encoder as _;
                let Self { $($field,)* } = self;
                $(
                    field!(@encode $kind, $field, buf);
                )*
                Ok(())
            }
        }

        impl $crate::schema::Decode for $name {
            fn decode(
                &mut self,
                reader: &mut $crate::codec::Reader<'_>,
            ) -> Result<(), $crate::error::Error> {
                #[allow(unused_imports)]
                use $crate::codec::Decoder as _;
                if reader.decode_nil() {
                    *self = Self::default();
                    return Ok(());
                }
                if let Some(err) = reader.decode_error()? {
                    return Err(err.into());
                }
                let Self { $($field,)* } = self;
                $(
                    field!(@decode $kind, $field, reader);
                )*
                Ok(())
            }
        }
    };
}

macro_rules! field {
    (@encode string, $f:ident, $buf:ident) => {{
        $crate::codec::fits($f.len())?;
        $buf.encode_str($f)?;
    }};
    (@encode i32, $f:ident, $buf:ident) => {
        $buf.encode_i32(*$f)?
    };
    (@encode i64, $f:ident, $buf:ident) => {
        $buf.encode_i64(*$f)?
    };
    (@encode bytes, $f:ident, $buf:ident) => {{
        $crate::codec::fits($f.len())?;
        $buf.encode_bytes($f)?;
    }};
    (@encode strings, $f:ident, $buf:ident) => {{
        $crate::codec::fits($f.len())?;
        $buf.encode_array($f.len(), $crate::codec::Kind::String)?;
        for item in $f.iter() {
            $crate::codec::fits(item.len())?;
            $buf.encode_str(item)?;
        }
    }};
    (@encode record, $f:ident, $buf:ident) => {
        $crate::schema::Encode::encode($f, $buf)?
    };

    (@decode string, $f:ident, $r:ident) => {
        *$f = $r.decode_string()?
    };
    (@decode i32, $f:ident, $r:ident) => {
        *$f = $r.decode_i32()?
    };
    (@decode i64, $f:ident, $r:ident) => {
        *$f = $r.decode_i64()?
    };
    (@decode bytes, $f:ident, $r:ident) => {
        *$f = ::bytes::Bytes::from($r.decode_bytes()?)
    };
    (@decode strings, $f:ident, $r:ident) => {{
        let len = $r.decode_array($crate::codec::Kind::String)?;
        // every element takes at least 3 bytes, do not trust the header for allocation
        let mut items = Vec::with_capacity(len.min($r.remaining() / 3));
        for _ in 0..len {
            items.push($r.decode_string()?);
        }
        *$f = items;
    }};
    (@decode record, $f:ident, $r:ident) => {
        $crate::schema::Decode::decode($f, $r)?
    };
}
