//! Three-state values for partial updates.
//!
//! A JSON update body distinguishes a key that is missing from a key that is
//! explicitly `null`. `Patch` keeps that distinction so only keys the client
//! sent are applied.

use serde::{Deserialize, Deserializer};

/// One field of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present, leave the field untouched
    Absent,
    /// Key present with `null`, clear the field
    Null,
    /// Key present with a value, overwrite the field
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Whether the key was missing
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Whether the key was explicitly null
    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// The value, if one was sent
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Transform the carried value
    pub fn map<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }

    /// Apply to an optional field
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

// Only called when the key is present; pair with `#[serde(default)]`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        notes: Patch<String>,
        #[serde(default)]
        coach: Patch<bool>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let body: Body = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert!(body.notes.is_null());
        assert!(body.coach.is_absent());

        let body: Body = serde_json::from_str(r#"{"notes": "x", "coach": false}"#).unwrap();
        assert_eq!(body.notes, Patch::Value("x".to_string()));
        assert_eq!(body.coach, Patch::Value(false));
    }

    #[test]
    fn test_apply_to() {
        let mut field = Some(3);
        Patch::Absent.apply_to(&mut field);
        assert_eq!(field, Some(3));
        Patch::Value(4).apply_to(&mut field);
        assert_eq!(field, Some(4));
        Patch::Null.apply_to(&mut field);
        assert_eq!(field, None);
    }
}
