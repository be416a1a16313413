//! Layer identifiers
//!
//! Two layers exist from the start and can never be removed: the main text and
//! the sub text. Every other layer is an extra image with a numbered id. The
//! string forms (`mainText`, `subText`, `extra-3`) are what the UI passes
//! around.

use std::fmt;
use std::str::FromStr;

use memetext_core::MemeError;

const MAIN_TEXT: &str = "mainText";
const SUB_TEXT: &str = "subText";
const EXTRA_PREFIX: &str = "extra-";

/// Identity of one canvas layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    MainText,
    SubText,
    /// Numbers come from a counter that never goes backwards
    Extra(u64),
}

impl LayerId {
    /// The fixed text layers
    pub fn is_reserved(&self) -> bool {
        matches!(self, LayerId::MainText | LayerId::SubText)
    }

    pub fn is_extra(&self) -> bool {
        matches!(self, LayerId::Extra(_))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerId::MainText => f.write_str(MAIN_TEXT),
            LayerId::SubText => f.write_str(SUB_TEXT),
            LayerId::Extra(n) => write!(f, "{EXTRA_PREFIX}{n}"),
        }
    }
}

impl FromStr for LayerId {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MAIN_TEXT => Ok(LayerId::MainText),
            SUB_TEXT => Ok(LayerId::SubText),
            _ => s
                .strip_prefix(EXTRA_PREFIX)
                .filter(|n| n.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|n| n.parse().ok())
                .map(LayerId::Extra)
                .ok_or_else(|| MemeError::InvalidLayerId(s.to_string())),
        }
    }
}
