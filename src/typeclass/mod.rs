//! Type class traits for generic collection code.
//!
//! The persistent vector is consumed by the rest of a collections library
//! only through two capabilities:
//!
//! - [`Buildable`]: build a sequence from elements
//! - [`Foldable`]: traverse a sequence front to back
//!
//! Both rest on [`TypeConstructor`], which emulates higher-kinded types with
//! Generic Associated Types.
//!
//! # Examples
//!
//! ```rust
//! use lambars_vector::typeclass::{Buildable, Foldable};
//!
//! fn reversed<C>(collection: C) -> C
//! where
//!     C: Buildable + Foldable,
//! {
//!     C::from_sequence(collection.fold_right(Vec::new(), |element, mut accumulator| {
//!         accumulator.push(element);
//!         accumulator
//!     }))
//! }
//!
//! assert_eq!(reversed(vec![1, 2, 3]), vec![3, 2, 1]);
//! ```

mod buildable;
mod foldable;
mod higher;

pub use buildable::Buildable;
pub use foldable::Foldable;
pub use higher::TypeConstructor;
