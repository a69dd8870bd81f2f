//! Index identifiers into the immutable catalog tables.
//!
//! Identifiers are zero-based positions. Menus and the configurator speak in
//! 1-based "choices"; `from_choice` and `choice` convert between the two.

use serde::{Deserialize, Serialize};

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(usize);

        impl $name {
            /// Create from a zero-based table index.
            pub fn from_index(index: usize) -> Self {
                Self(index)
            }

            /// Create from a 1-based menu choice. Returns `None` for `0`.
            pub fn from_choice(choice: usize) -> Option<Self> {
                choice.checked_sub(1).map(Self)
            }

            /// Zero-based table index.
            pub fn index(self) -> usize {
                self.0
            }

            /// 1-based menu choice.
            pub fn choice(self) -> usize {
                self.0 + 1
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.choice())
            }
        }
    };
}

catalog_id!(
    /// Position of a vehicle template in the catalog.
    VehicleId
);

catalog_id!(
    /// Position of an engine in the catalog.
    EngineId
);

catalog_id!(
    /// Position of an equipment option in the catalog.
    EquipmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_is_one_based() {
        let id = EngineId::from_choice(3).unwrap();
        assert_eq!(id.index(), 2);
        assert_eq!(id.choice(), 3);
        assert_eq!(id.to_string(), "#3");
    }

    #[test]
    fn test_zero_choice_is_rejected() {
        assert!(VehicleId::from_choice(0).is_none());
    }
}
