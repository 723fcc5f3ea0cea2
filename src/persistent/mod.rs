//! Persistent (immutable) data structures.
//!
//! - [`PersistentVector`]: Persistent vector (bitmapped vector trie)
//!
//! # Structural Sharing
//!
//! Every operation that "changes" a vector allocates new nodes only along the
//! path it touches and returns a new vector. All other nodes are shared by
//! reference between the old and the new version, so both stay valid and
//! cheap to keep around.
//!
//! # Examples
//!
//! ```rust
//! use lambars_vector::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! assert_eq!(vector.get(50), Ok(&50));
//!
//! // Structural sharing: the original vector is preserved
//! let updated = vector.update(50, 999).unwrap();
//! assert_eq!(vector.get(50), Ok(&50));     // Original unchanged
//! assert_eq!(updated.get(50), Ok(&999));   // New version
//!
//! // Removing the last element is also persistent
//! let shorter = updated.pop_back().unwrap();
//! assert_eq!(shorter.len(), 99);
//! assert_eq!(updated.len(), 100);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod vector;

pub use error::CapacityExceededError;
pub use error::EmptyVectorError;
pub use error::IndexOutOfBoundsError;
pub use error::VectorError;
pub use vector::MAXIMUM_HEIGHT;
pub use vector::PersistentVector;
pub use vector::PersistentVectorIntoIterator;
pub use vector::PersistentVectorIterator;

// =============================================================================
// Tests
// =============================================================================


#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentVector<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<String>: Send, Sync);
