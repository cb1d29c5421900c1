//! Resource locators (absolute URLs).
//!
//! Locators are parsed with the WHATWG URL rules and stored as the
//! serialized `href`, so every spelling of the same URL compares equal:
//! surrounding whitespace is trimmed, scheme and special hosts are
//! lowercased (with IDNA), default ports are dropped, dot segments are
//! resolved, `\` counts as `/` in special schemes, and unsafe characters are
//! percent-encoded.

use std::fmt;

use url::Url;

use crate::error::{ValueError, ValueResult};

/// Canonical absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    url: Url,
}

impl Locator {
    /// Parse an absolute URL into canonical form.
    pub fn parse(input: &str) -> ValueResult<Self> {
        let url = Url::parse(input).map_err(|err| ValueError::locator(input, err))?;
        Ok(Self { url })
    }

    /// Canonical serialization; equal hrefs mean equal locators.
    #[inline]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Lowercased scheme without the trailing `:`.
    #[inline]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// The parsed URL.
    #[inline]
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

impl std::str::FromStr for Locator {
    type Err = ValueError;

    fn from_str(s: &str) -> ValueResult<Self> {
        Self::parse(s)
    }
}
