//! The two locales the site is authored in.
//!
//! English is the default and carries no file suffix (`post.mdx`). Gujarati
//! variants sit next to their default counterpart with a `.gu` suffix before
//! the extension (`post.gu.mdx`, `post/index.gu.mdx`, `_index.gu.mdx`).
//!
//! The page layer selects a locale from the `lang` query parameter; anything
//! it doesn't recognise means "default".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown locale '{0}' (expected one of: en, gu)")]
pub struct UnknownLocale(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Gu,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Gu];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Gu => "gu",
        }
    }

    pub fn is_default(self) -> bool {
        self == Locale::default()
    }

    /// File-name suffix for this locale, `None` for the default locale.
    pub fn file_suffix(self) -> Option<&'static str> {
        if self.is_default() {
            None
        } else {
            Some(self.code())
        }
    }

    /// Locales to try when resolving a file for this locale, most specific
    /// first: the locale itself, then the default.
    pub fn fallback_chain(self) -> Vec<Locale> {
        if self.is_default() {
            vec![self]
        } else {
            vec![self, Locale::default()]
        }
    }

    /// Map a `lang` query value to a locale. Unknown or missing values fall
    /// back to the default, matching how the site treats `?lang=xx`.
    pub fn from_query(value: Option<&str>) -> Locale {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Query string to append to internal links so the reader stays in
    /// this locale (`"?lang=gu"`, or empty for the default).
    pub fn query_suffix(self) -> String {
        match self.file_suffix() {
            Some(code) => format!("?lang={code}"),
            None => String::new(),
        }
    }

    /// Parse a file-name segment as a locale suffix (`"gu"` → `Gu`).
    ///
    /// The default locale has no suffix, so `"en"` is not a suffix.
    pub fn from_suffix(segment: &str) -> Option<Locale> {
        Locale::ALL
            .into_iter()
            .find(|l| l.file_suffix() == Some(segment))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "gu" => Ok(Locale::Gu),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}
