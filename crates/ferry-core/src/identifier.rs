//! Native identifiers of source model symbols.
//!
//! Symbols in a [`SequenceDiagram`](crate::model::SequenceDiagram) are keyed by
//! an [`Id`], a string-interned handle that is cheap to copy, hash and compare.
//! These identifiers are assigned by whoever authored the source model and carry
//! no ordering information; the virtual index space is derived from them.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned native identifier of a source symbol.
///
/// # Examples
///
/// ```
/// use ferry_core::identifier::Id;
///
/// let user = Id::new("user");
/// let same: Id = "user".into();
///
/// assert_eq!(user, same);
/// assert_eq!(user, "user");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Calls `f` with the string this identifier was created from.
    fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|value| f.write_str(value))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_equal_strings() {
        let id1 = Id::new("login_call");
        let id2 = Id::new("login_call");
        let id3 = Id::new("logout_call");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_display_round_trips_name() {
        let id = Id::new("svc");
        assert_eq!(id.to_string(), "svc");
        assert_eq!(format!("{id}"), "svc");
    }

    #[test]
    fn test_from_string_and_str() {
        let from_str: Id = "admin".into();
        let from_string: Id = String::from("admin").into();

        assert_eq!(from_str, from_string);
        assert_eq!(from_str, "admin");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("lifeline_1");

        assert!(id == "lifeline_1");
        assert!(id != "lifeline_2");

        let empty = Id::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(Id::new("actor"), 0);
        map.insert(Id::new("object"), 1);

        assert_eq!(map.get(&Id::new("actor")), Some(&0));
        assert_eq!(map.get(&Id::new("object")), Some(&1));
        assert_eq!(map.get(&Id::new("missing")), None);
    }

    #[test]
    fn test_deserialize_from_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            id: Id,
        }

        let wrapper: Wrapper = toml::from_str(r#"id = "svc""#).unwrap();
        assert_eq!(wrapper.id, "svc");
    }
}
