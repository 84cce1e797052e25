//! Display-worthiness policy applied to catalog results before display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HerodexError, Result};

use super::{Character, Thumbnail};

/// Image shown in place of a missing thumbnail
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/150";

/// Path suffix the catalog uses for characters without artwork
const IMAGE_NOT_AVAILABLE: &str = "image_not_available";

/// Minimum-quality filter for catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Non-empty name and a usable thumbnail
    #[default]
    Strict,
    /// Non-empty name only; missing artwork falls back to a placeholder
    Named,
    /// Everything the catalog returns
    Any,
}

impl DisplayPolicy {
    pub fn admits(self, character: &Character) -> bool {
        match self {
            DisplayPolicy::Any => true,
            DisplayPolicy::Named => has_name(character),
            DisplayPolicy::Strict => {
                has_name(character)
                    && character
                        .thumbnail
                        .as_ref()
                        .is_some_and(is_usable_thumbnail)
            }
        }
    }

    /// Keep only admitted characters, preserving order
    pub fn filter(self, characters: Vec<Character>) -> Vec<Character> {
        characters.into_iter().filter(|c| self.admits(c)).collect()
    }
}

impl fmt::Display for DisplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPolicy::Strict => write!(f, "strict"),
            DisplayPolicy::Named => write!(f, "named"),
            DisplayPolicy::Any => write!(f, "any"),
        }
    }
}

impl FromStr for DisplayPolicy {
    type Err = HerodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(DisplayPolicy::Strict),
            "named" => Ok(DisplayPolicy::Named),
            "any" => Ok(DisplayPolicy::Any),
            _ => Err(HerodexError::Config(format!(
                "unknown display policy '{s}', expected 'strict', 'named' or 'any'"
            ))),
        }
    }
}

fn has_name(character: &Character) -> bool {
    !character.name.trim().is_empty()
}

/// Path and extension present, and not the "image not available" artwork
pub fn is_usable_thumbnail(thumbnail: &Thumbnail) -> bool {
    let path = thumbnail.path.trim();
    !path.is_empty()
        && !thumbnail.extension.trim().is_empty()
        && !path.ends_with(IMAGE_NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ART: &str = "http://i.annihil.us/u/prod/marvel/i/mg/3/40/4bb4680432f73";

    #[test]
    fn test_strict_requires_name_and_thumbnail() {
        let good = Character::new(1, "Thor").with_thumbnail(ART, "jpg");
        let no_thumb = Character::new(2, "Loki");
        let blank_name = Character::new(3, "   ").with_thumbnail(ART, "jpg");
        let sentinel = Character::new(4, "Ghost")
            .with_thumbnail("http://x/image_not_available", "jpg");
        let no_ext = Character::new(5, "Odin").with_thumbnail(ART, "");

        assert!(DisplayPolicy::Strict.admits(&good));
        assert!(!DisplayPolicy::Strict.admits(&no_thumb));
        assert!(!DisplayPolicy::Strict.admits(&blank_name));
        assert!(!DisplayPolicy::Strict.admits(&sentinel));
        assert!(!DisplayPolicy::Strict.admits(&no_ext));
    }

    #[test]
    fn test_named_ignores_thumbnail() {
        assert!(DisplayPolicy::Named.admits(&Character::new(2, "Loki")));
        assert!(!DisplayPolicy::Named.admits(&Character::new(3, "")));
    }

    #[test]
    fn test_any_admits_everything() {
        assert!(DisplayPolicy::Any.admits(&Character::new(3, "")));
    }

    #[test]
    fn test_filter_preserves_order() {
        let items = vec![
            Character::new(1, "A").with_thumbnail(ART, "jpg"),
            Character::new(2, "B"),
            Character::new(3, "C").with_thumbnail(ART, "png"),
        ];
        let ids: Vec<u64> = DisplayPolicy::Strict
            .filter(items)
            .iter()
            .map(|c| c.id.0)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("STRICT".parse::<DisplayPolicy>().unwrap(), DisplayPolicy::Strict);
        assert_eq!("named".parse::<DisplayPolicy>().unwrap(), DisplayPolicy::Named);
        assert!("loose".parse::<DisplayPolicy>().is_err());
    }
}
