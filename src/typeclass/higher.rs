//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over `Vec<_>` and `PersistentVector<_>` as type
//! constructors directly. [`TypeConstructor`] names the element type a
//! collection is applied to, which is all the collaborator traits in this
//! crate need to speak about "a sequence of `Inner`".
//!
//! # Example
//!
//! ```rust
//! use lambars_vector::typeclass::TypeConstructor;
//!
//! fn element_default<C: TypeConstructor>(_collection: &C) -> C::Inner
//! where
//!     C::Inner: Default,
//! {
//!     C::Inner::default()
//! }
//!
//! assert_eq!(element_default(&vec![1, 2, 3]), 0);
//! ```

/// A trait representing a type constructor.
///
/// # Associated Types
///
/// - `Inner`: The element type this constructor is currently applied to.
/// - `WithType<B>`: The same constructor applied to a different type `B`.
///
/// # Laws
///
/// For any `F: TypeConstructor`, `<F as TypeConstructor>::WithType<F::Inner>`
/// is the same type as `F`.
pub trait TypeConstructor {
    /// The inner type that this type constructor is applied to.
    type Inner;

    /// The same type constructor applied to a different type `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<T> TypeConstructor for Vec<T> {
    type Inner = T;
    type WithType<B> = Vec<B>;
}
