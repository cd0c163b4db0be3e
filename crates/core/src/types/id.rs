//! Newtype IDs for type-safe catalog references.
//!
//! Use the `define_string_id!` macro to create type-safe ID wrappers that
//! prevent accidentally mixing identifiers from different schemes. The
//! catalog deliberately carries two: [`RecordId`], the opaque handle the
//! document store assigns on insert (the only key mutations accept), and
//! [`DisplayId`], the short human-facing code shown on cards and matched by
//! search. The two are independent; neither is derived from the other.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use haberdash_core::define_string_id;
/// define_string_id!(OrderId);
/// define_string_id!(InvoiceId);
///
/// let order_id = OrderId::new("ord-1");
///
/// // These are different types, so this won't compile:
/// // let _: InvoiceId = order_id;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(RecordId);
define_string_id!(DisplayId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new("a1b2c3");
        assert_eq!(id.to_string(), "a1b2c3");
        assert_eq!(id.as_str(), "a1b2c3");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Equality only compiles within a single ID type; this test documents
        // that RecordId and DisplayId never compare across schemes.
        let record = RecordId::new("xyz");
        let same = RecordId::from("xyz");
        assert_eq!(record, same);
    }

    #[test]
    fn test_serde_transparent() {
        let id = DisplayId::new("ab12cd");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""ab12cd""#);

        let back: DisplayId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
