use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

/// Decoded VCF INFO column: `key=value` pairs in input order.
///
/// Keys without `=` (VCF flags) map to `None`. Values are kept as raw
/// strings, no numeric coercion is done at this stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoFields(IndexMap<String, Option<String>>);

impl InfoFields {
    /// VCF missing-value marker.
    pub const MISSING: &'static str = ".";

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|v| v.as_deref())
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Option<String>> {
        self.0
    }

    /// Splits on `;`, then each piece on its first `=`. Empty pieces are
    /// skipped; a repeated key keeps its first position and its last value.
    pub fn decode(s: &str) -> Self {
        let mut fields = IndexMap::new();
        if s == Self::MISSING {
            return Self(fields);
        }
        for pair in s.split(';') {
            if pair.is_empty() {
                continue;
            }
            // Values may carry '=' themselves, only the first one separates.
            match pair.split_once('=') {
                Some((key, value)) => {
                    fields.insert(key.to_string(), Some(value.to_string()))
                },
                None => fields.insert(pair.to_string(), None),
            };
        }
        Self(fields)
    }
}

impl FromStr for InfoFields {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl fmt::Display for InfoFields {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", Self::MISSING);
        }
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            match value {
                Some(value) => write!(f, "{}={}", key, value)?,
                None => f.write_str(key)?,
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for InfoFields {
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}
