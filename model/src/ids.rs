//! Opaque identifiers assigned by the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a non-empty identifier.
            pub fn new(id: impl Into<String>) -> ModelResult<Self> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ModelError::EmptyIdentifier { field: $field });
                }
                Ok(Self(id))
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is blank (only possible for
            /// values read back from the gateway or a fixture document).
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Restaurant identifier as assigned by the gateway.
    RestaurantId,
    "restaurant_id"
);

opaque_id!(
    /// Menu item identifier as assigned by the gateway.
    ItemId,
    "item_id"
);

opaque_id!(
    /// Customer placing orders during a load run.
    CustomerId,
    "customer_id"
);
