use std::collections::hash_map;

use crate::schema::{HeaderMap, StringList};

/// Read view over a live [`HeaderMap`].
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
    map: &'a HeaderMap,
}

impl<'a> Headers<'a> {
    #[inline]
    pub(crate) fn new(map: &'a HeaderMap) -> Self {
        Self { map }
    }

    /// Returns the values set for `name`, or `None` if it was never set.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&'a [String]> {
        self.map.fields.get(name).map(|list| list.values.as_slice())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.map.fields.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate header names with their values, in arbitrary order.
    #[inline]
    pub fn iter(&self) -> Iter<'a> {
        Iter {
            inner: self.map.fields.iter(),
        }
    }
}

impl<'a> IntoIterator for Headers<'a> {
    type Item = (&'a str, &'a [String]);

    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Write view over a live [`HeaderMap`].
#[derive(Debug)]
pub struct HeadersMut<'a> {
    map: &'a mut HeaderMap,
}

impl<'a> HeadersMut<'a> {
    #[inline]
    pub(crate) fn new(map: &'a mut HeaderMap) -> Self {
        Self { map }
    }

    /// Returns read view of the same map.
    #[inline]
    pub fn as_headers(&self) -> Headers<'_> {
        Headers::new(self.map)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.map.fields.get(name).map(|list| list.values.as_slice())
    }

    /// Replace every value of `name`.
    ///
    /// Returns the previous values, if any.
    pub fn set<I, S>(&mut self, name: impl Into<String>, values: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = StringList {
            values: values.into_iter().map(Into::into).collect(),
        };
        self.map.fields.insert(name.into(), list).map(|list| list.values)
    }

    /// Remove `name` and returns its values.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.map.fields.remove(name).map(|list| list.values)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.fields.clear();
    }
}

/// Header entries iterator.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, StringList>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, list)| (name.as_str(), list.values.as_slice()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> { }
