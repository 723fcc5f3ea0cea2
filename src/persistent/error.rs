//! Error types for the persistent vector.
//!
//! Each failing operation reports its own error type so callers can match on
//! exactly what went wrong. [`VectorError`] unifies them for code that chains
//! several operations with `?`.

/// Returned when an index does not address an element of the vector.
///
/// # Examples
///
/// ```rust
/// use lambars_vector::persistent::{IndexOutOfBoundsError, PersistentVector};
///
/// let vector: PersistentVector<i32> = (0..3).collect();
/// assert_eq!(
///     vector.get(3),
///     Err(IndexOutOfBoundsError { index: 3, length: 3 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexOutOfBoundsError {
    /// The index that was requested.
    pub index: usize,
    /// The length of the vector at the time of the request.
    pub length: usize,
}

impl std::fmt::Display for IndexOutOfBoundsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "index {} is out of bounds for a vector of length {}",
            self.index, self.length
        )
    }
}

impl std::error::Error for IndexOutOfBoundsError {}

/// Returned when removing an element from an empty vector.
///
/// # Examples
///
/// ```rust
/// use lambars_vector::persistent::{EmptyVectorError, PersistentVector};
///
/// let vector: PersistentVector<i32> = PersistentVector::new();
/// assert_eq!(vector.pop_back(), Err(EmptyVectorError));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyVectorError;

impl std::fmt::Display for EmptyVectorError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("cannot remove an element from an empty vector")
    }
}

impl std::error::Error for EmptyVectorError {}

/// Returned when an append would need a trie taller than the index type can
/// address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityExceededError {
    /// The tallest trie the vector can represent.
    pub maximum_height: usize,
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "vector is full: appending would exceed the maximum trie height of {}",
            self.maximum_height
        )
    }
}

impl std::error::Error for CapacityExceededError {}

/// Any error a persistent vector operation can report.
///
/// # Examples
///
/// ```rust
/// use lambars_vector::persistent::{PersistentVector, VectorError};
///
/// fn swap_ends(vector: &PersistentVector<i32>) -> Result<PersistentVector<i32>, VectorError> {
///     let last_index = vector.len().checked_sub(1).unwrap_or(0);
///     let first = *vector.get(0)?;
///     let last = *vector.get(last_index)?;
///     Ok(vector.update(0, last)?.update(last_index, first)?)
/// }
///
/// let vector: PersistentVector<i32> = (1..=4).collect();
/// let swapped: Vec<i32> = swap_ends(&vector).unwrap().into_iter().collect();
/// assert_eq!(swapped, vec![4, 2, 3, 1]);
/// assert!(swap_ends(&PersistentVector::new()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorError {
    /// An index did not address an element.
    IndexOutOfBounds(IndexOutOfBoundsError),
    /// The vector was empty.
    Empty(EmptyVectorError),
    /// The vector cannot grow any further.
    CapacityExceeded(CapacityExceededError),
}

impl std::fmt::Display for VectorError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds(error) => write!(formatter, "{error}"),
            Self::Empty(error) => write!(formatter, "{error}"),
            Self::CapacityExceeded(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for VectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IndexOutOfBounds(error) => Some(error),
            Self::Empty(error) => Some(error),
            Self::CapacityExceeded(error) => Some(error),
        }
    }
}

impl From<IndexOutOfBoundsError> for VectorError {
    fn from(error: IndexOutOfBoundsError) -> Self {
        Self::IndexOutOfBounds(error)
    }
}

impl From<EmptyVectorError> for VectorError {
    fn from(error: EmptyVectorError) -> Self {
        Self::Empty(error)
    }
}

impl From<CapacityExceededError> for VectorError {
    fn from(error: CapacityExceededError) -> Self {
        Self::CapacityExceeded(error)
    }
}
