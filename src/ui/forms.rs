use std::num::ParseIntError;

use thiserror::Error;

/// Reply that confirms a destructive action (compared case-insensitively).
pub(crate) const AFFIRMATIVE: &str = "yes";

/// The six commands the menu offers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Load,
    Add,
    Show,
    Delete,
    Save,
    Exit,
}

impl MenuChoice {
    /// Map a menu key to its command. Surrounding whitespace and case are
    /// ignored; anything else yields `None`.
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "l" => Some(Self::Load),
            "a" => Some(Self::Add),
            "i" => Some(Self::Show),
            "d" => Some(Self::Delete),
            "s" => Some(Self::Save),
            "x" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Answer to a "Would you like to continue?" prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Only the exact affirmative token confirms; every other reply,
    /// including an empty one, declines.
    pub(crate) fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case(AFFIRMATIVE) {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Delete prompt input that is not a whole number.
#[derive(Debug, Error)]
#[error("'{input}' is not a whole number")]
pub(crate) struct IdInputError {
    input: String,
    #[source]
    source: ParseIntError,
}

/// Parse the id typed at the delete prompt. Range checks are left to the
/// inventory so both failure kinds are reported separately.
pub(crate) fn parse_cd_id(raw: &str) -> Result<i64, IdInputError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|source| IdInputError {
        input: trimmed.to_string(),
        source,
    })
}

/// Title and artist collected by the add prompts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CdForm {
    pub(crate) title: String,
    pub(crate) artist: String,
}

impl CdForm {
    /// Build the form from raw prompt replies, trimming surrounding blanks.
    pub(crate) fn from_replies(title: &str, artist: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
        }
    }
}
