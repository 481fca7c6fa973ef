use std::collections::HashMap;

use super::{Decode, Encode, StringList};
use crate::codec::{Buffer, Decoder, Encoder, Kind, Reader, fits};
use crate::error::Error;

/// HTTP Headers Multimap.
///
/// Header name is case sensitive as stored, each name maps to an ordered list of values.
///
/// An absent map and an empty map are encoded the same way, as a zero length map, both
/// decode into an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    pub(crate) fields: HashMap<String, StringList>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Returns number of header names.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if headers has no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Encode possibly absent header map.
///
/// `None` produce the exact same bytes as an empty map.
pub fn encode_headers(map: Option<&HeaderMap>, buf: &mut Buffer) -> Result<(), Error> {
    let Some(map) = map else {
        buf.encode_map(0, Kind::String, Kind::Any)?;
        return Ok(());
    };
    fits(map.fields.len())?;
    buf.encode_map(map.fields.len(), Kind::String, Kind::Any)?;
    for (name, values) in &map.fields {
        fits(name.len())?;
        buf.encode_str(name)?;
        values.encode(buf)?;
    }
    Ok(())
}

impl Encode for HeaderMap {
    #[inline]
    fn encode(&self, buf: &mut Buffer) -> Result<(), Error> {
        encode_headers(Some(self), buf)
    }
}

impl Decode for HeaderMap {
    /// Replace the map with the decoded one.
    ///
    /// Duplicate names in the input keep the last value list.
    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), Error> {
        if reader.decode_nil() {
            self.fields.clear();
            return Ok(());
        }
        if let Some(err) = reader.decode_error()? {
            return Err(err.into());
        }

        let len = reader.decode_map(Kind::String, Kind::Any)?;
        // an entry takes at least 5 bytes, do not trust the header for allocation
        let mut fields = HashMap::with_capacity(len.min(reader.remaining() / 5));
        for _ in 0..len {
            let name = reader.decode_string()?;
            let mut values = StringList::default();
            values.decode(reader)?;
            fields.insert(name, values);
        }
        self.fields = fields;
        Ok(())
    }
}
