//! Composite product identifier.

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;

use std::fmt;

use serde::{Deserialize, Serialize};

const SEPARATOR: char = '/';

/// Error returned by [`ProductKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("product key must have exactly 3 segments, got {0}")]
    SegmentCount(usize),
    #[error("product key segment {0} is empty")]
    EmptySegment(usize),
    #[error("product key segment {index} contains '/': {segment}")]
    SeparatorInSegment { index: usize, segment: String },
}

/// `parish/seller/product`, addressing one product in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductKey {
    raw: String,
    seller_at: usize,
    product_at: usize,
}

impl ProductKey {
    /// Join parish, seller and product slugs into a key.
    ///
    /// # Errors
    ///
    /// Fails when a slug is empty or itself contains the separator.
    pub fn new(parish: &str, seller: &str, product: &str) -> Result<Self, KeyError> {
        for (index, segment) in [parish, seller, product].into_iter().enumerate() {
            if segment.is_empty() {
                return Err(KeyError::EmptySegment(index));
            }
            if segment.contains(SEPARATOR) {
                return Err(KeyError::SeparatorInSegment { index, segment: segment.to_string() });
            }
        }
        Ok(Self {
            raw: format!("{parish}{SEPARATOR}{seller}{SEPARATOR}{product}"),
            seller_at: parish.len() + 1,
            product_at: parish.len() + seller.len() + 2,
        })
    }

    /// Parse a joined key back into its segments.
    ///
    /// # Errors
    ///
    /// Fails unless the input has exactly three non-empty segments.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let segments: Vec<&str> = raw.split(SEPARATOR).collect();
        let [parish, seller, product] = segments.as_slice() else {
            return Err(KeyError::SegmentCount(segments.len()));
        };
        Self::new(parish, seller, product)
    }

    #[must_use]
    pub fn parish(&self) -> &str {
        &self.raw[..self.seller_at - 1]
    }

    #[must_use]
    pub fn seller(&self) -> &str {
        &self.raw[self.seller_at..self.product_at - 1]
    }

    #[must_use]
    pub fn product(&self) -> &str {
        &self.raw[self.product_at..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ProductKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl std::str::FromStr for ProductKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductKey> for String {
    fn from(key: ProductKey) -> Self {
        key.raw
    }
}
