//! Typed keys for type-safe ledger references.
//!
//! Using typed keys prevents accidentally passing a `PartnerKey` where an `AccountKey` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed string key wrappers.
macro_rules! typed_key {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a key from anything convertible into a `String`.
            #[must_use]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self::new(key)
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_key!(AccountKey, "Identifier of a financial account (usually the account code).");
typed_key!(PartnerKey, "Identifier of a counterparty.");
typed_key!(JournalKey, "Identifier of the journal or source an entry was posted through.");
typed_key!(
    DimensionKey,
    "Identifier of an analytic dimension value such as a warehouse or cost center."
);

/// Identifier of a ledger entry as assigned by the entry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    #[test]
    fn test_typed_key_display() {
        let key = AccountKey::new("400100");
        assert_eq!(key.to_string(), "400100");
        assert_eq!(key.as_str(), "400100");
    }

    #[test]
    fn test_typed_key_from_str() {
        let key = PartnerKey::from_str("ACME").unwrap();
        assert_eq!(key.into_inner(), "ACME");
    }

    #[test]
    fn test_typed_key_ordering_is_lexical() {
        let keys: BTreeSet<AccountKey> = ["600000", "100200", "400100"]
            .into_iter()
            .map(AccountKey::from)
            .collect();
        let ordered: Vec<&str> = keys.iter().map(AccountKey::as_str).collect();
        assert_eq!(ordered, vec!["100200", "400100", "600000"]);
    }

    #[test]
    fn test_typed_key_set_lookup_by_str() {
        let keys: BTreeSet<DimensionKey> = ["WH-A", "WH-B"].into_iter().map(Into::into).collect();
        assert!(keys.contains("WH-A"));
        assert!(!keys.contains("WH-C"));
    }

    #[test]
    fn test_typed_key_serde_transparent() {
        let key = JournalKey::new("BANK");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"BANK\"");
        let back: JournalKey = serde_json::from_str("\"BANK\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_entry_id_display() {
        assert_eq!(EntryId(42).to_string(), "42");
    }
}
