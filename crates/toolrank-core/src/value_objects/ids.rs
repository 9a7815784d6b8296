//! Identity value objects
//!
//! User and tool identities are opaque strings handed to us by the external
//! auth provider and the tool catalogue. They are validated once at the
//! boundary so the rest of the system can treat them as well-formed.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum accepted length of an external identity string
pub const MAX_ID_LEN: usize = 128;

/// Error when parsing an identity string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier exceeds {MAX_ID_LEN} characters")]
    TooLong,

    #[error("identifier contains whitespace or control characters")]
    InvalidCharacter,
}

fn validate_id(raw: &str) -> Result<(), IdParseError> {
    if raw.is_empty() {
        return Err(IdParseError::Empty);
    }
    if raw.chars().count() > MAX_ID_LEN {
        return Err(IdParseError::TooLong);
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdParseError::InvalidCharacter);
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and validate an identity string
            pub fn parse(raw: impl Into<String>) -> Result<Self, IdParseError> {
                let raw = raw.into();
                validate_id(&raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identity as a string slice
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Get the inner string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Stable identity of an authenticated user (the auth provider's subject)
    UserId
);

string_id!(
    /// Identity of a tool in the directory
    ToolId
);

/// Opaque unique identifier of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
