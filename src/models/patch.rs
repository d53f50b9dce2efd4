//! Partial-update semantics shared by every PUT route.
//!
//! Only fields present in a request are touched: a present non-empty value
//! replaces, a present empty value clears, an absent field is kept.

/// Requested change to one optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl Patch<String> {
    /// Interpret a raw form/JSON value. Surrounding whitespace is trimmed.
    pub fn from_field(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => Patch::Keep,
            Some("") => Patch::Clear,
            Some(v) => Patch::Set(v.to_string()),
        }
    }
}

impl<T> Patch<T> {
    /// Apply the change to the stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// The value to write when the field is not kept. `None` clears.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Keep | Patch::Clear => None,
        }
    }
}
