//! # lambars-vector
//!
//! A persistent (immutable, structurally shared) indexed sequence built as a
//! bitmapped vector trie with branching factor 32.
//!
//! ## Overview
//!
//! - **Persistent Vector**: [`persistent::PersistentVector`] offers
//!   O(log32 N) random access, functional update, append and remove-last.
//!   Every operation returns a new vector and leaves the original usable.
//! - **Type Classes**: [`typeclass::Foldable`] and [`typeclass::Buildable`]
//!   describe the "build from elements / iterate elements" contract that
//!   generic collection code relies on.
//!
//! ## Feature Flags
//!
//! - `typeclass`: Collaborator traits (`Foldable`, `Buildable`)
//! - `persistent`: The persistent vector (implies `typeclass`)
//! - `arc`: Share nodes through `Arc` so vectors are `Send + Sync`
//! - `serde`: Serialize and deserialize vectors as sequences
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use lambars_vector::prelude::*;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! let updated = vector.update(50, -1).unwrap();
//!
//! assert_eq!(vector.get(50), Ok(&50));
//! assert_eq!(updated.get(50), Ok(&-1));
//! assert_eq!(updated.height(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lambars_vector::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "persistent")]
pub mod persistent;
