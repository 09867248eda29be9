//! The record contract and the macro that implements it.

use super::FromJson;

/// A fully populated result of deserialization.
///
/// Every field of a record holds a defined value. Whether the record itself
/// was backed by data is recorded once, at construction, in the flag
/// returned by [`Record::is_empty`].
pub trait Record: FromJson {
    /// True iff the record was built from an absent or null node.
    ///
    /// A record built from `{}` is not empty, even though all of its fields
    /// hold defaults.
    fn is_empty(&self) -> bool;
}

/// Declare a record whose fields map one-to-one onto JSON keys.
///
/// Each field is written as `name: Type = "json_key"`. The macro generates
/// the struct (plus a private `empty` flag), [`FromJson`], [`Record`] and a
/// `Default` impl that returns the empty instance.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty = $key:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
            #[serde(skip)]
            empty: bool,
        }

        impl $crate::json::FromJson for $name {
            fn absent() -> Self {
                Self {
                    $( $field: <$ty as $crate::json::FromJson>::absent(), )*
                    empty: true,
                }
            }

            #[allow(unused_variables)]
            fn from_json(value: &serde_json::Value) -> Self {
                let Some(object) = value.as_object() else {
                    return Self::absent();
                };
                Self {
                    $( $field: <$ty as $crate::json::FromJson>::extract(object.get($key)), )*
                    empty: false,
                }
            }
        }

        impl $crate::json::Record for $name {
            fn is_empty(&self) -> bool {
                self.empty
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::json::FromJson>::absent()
            }
        }
    };
}

pub(crate) use record;
