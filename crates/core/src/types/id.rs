//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The backend exposes
//! every primary key as a 32-bit integer.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `Display` so the ID can be interpolated into resource paths
///
/// # Example
///
/// ```rust
/// # use kronos_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Customer-facing entities
define_id!(UserId);
define_id!(AddressId);
define_id!(CartId);
define_id!(CartLineId);
define_id!(OrderId);
define_id!(OrderLineId);
define_id!(RefundId);
define_id!(CouponId);
define_id!(PaymentMethodId);
define_id!(SavedPaymentMethodId);

// Catalog entities
define_id!(FamilyId);
define_id!(CategoryId);
define_id!(SubcategoryId);
define_id!(BrandId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(ReviewId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = AddressId::new(42);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("42"));

        let parsed: VariantId = serde_json::from_str("7").unwrap_or(VariantId::new(0));
        assert_eq!(parsed.as_i32(), 7);
    }

    #[test]
    fn test_id_display_is_bare_number() {
        assert_eq!(CartLineId::new(13).to_string(), "13");
        assert_eq!(format!("/carrito/items/{}", CartLineId::new(5)), "/carrito/items/5");
    }

    #[test]
    fn test_id_conversions() {
        let id: OrderId = 99.into();
        let raw: i32 = id.into();
        assert_eq!(raw, 99);
    }
}
