//! Sequential identifiers.
//!
//! Every list in a session hands out ids as `len + 1`. Nothing is ever removed
//! from those lists, so an id stays unique for the lifetime of the session.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Position-derived identifier (1-based).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeqId(u32);

impl SeqId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Id for the next element appended to a list currently holding `len` entries.
    pub fn next_after(len: usize) -> Self {
        Self(u32::try_from(len).unwrap_or(u32::MAX - 1).saturating_add(1))
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SeqId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for SeqId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SeqId> for u32 {
    fn from(value: SeqId) -> Self {
        value.0
    }
}

impl FromStr for SeqId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("{s:?}: {e}")))?;
        if value == 0 {
            return Err(DomainError::invalid_id("ids start at 1"));
        }
        Ok(Self(value))
    }
}

/// Declares a typed wrapper around [`SeqId`] with the usual conversions.
#[macro_export]
macro_rules! seq_id_newtype {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(pub $crate::SeqId);

        impl $t {
            pub fn new(id: $crate::SeqId) -> Self {
                Self(id)
            }

            pub fn get(&self) -> u32 {
                self.0.get()
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self($crate::SeqId::new(value))
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$crate::SeqId>().map(Self)
            }
        }
    };
}
