use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

macro_rules! genres {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Genre {
            $(
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl Genre {
            /// Every genre, in display order.
            pub const ALL: &'static [Genre] = &[$(Genre::$variant),+];

            /// Identifier used by the catalog service in list URLs.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Genre::$variant => $id,)+
                }
            }
        }
    };
}

genres! {
    Fiction => "fiction",
    Nonfiction => "nonfiction",
    Science => "science",
}

impl Genre {
    pub fn label(self) -> String {
        self.as_str().replace('-', " ").to_uppercase()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre '{0}'; expected one of: fiction, nonfiction, science")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownGenre(value.to_string()))
    }
}

/// A best-seller entry. `title` is the identity key for everything keyed per book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl Book {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            author: None,
            rank: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,
}

impl Review {
    pub fn new(summary: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            url: url.into(),
            byline: None,
        }
    }
}

/// The catalog sends `null` for text it has no value for.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_genre_case_insensitively() {
        assert_eq!("Fiction".parse::<Genre>(), Ok(Genre::Fiction));
        assert_eq!(" science ".parse::<Genre>(), Ok(Genre::Science));
        assert!("poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn genre_label_is_upper_cased_identifier() {
        assert_eq!(Genre::Nonfiction.label(), "NONFICTION");
        assert_eq!(
            Genre::ALL.iter().map(|g| g.as_str()).collect::<Vec<_>>(),
            ["fiction", "nonfiction", "science"]
        );
    }
}
