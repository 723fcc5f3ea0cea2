//! Buildable type class - constructing a sequence from elements.
//!
//! `Buildable` is the "build from elements" half of the collection contract.
//! Paired with [`Foldable`](super::Foldable), it lets generic algorithms
//! consume one sequence type and produce another without naming either.
//!
//! # Laws
//!
//! ## Round trip
//!
//! Building from a list and folding back out yields the same elements in the
//! same order:
//!
//! ```text
//! C::from_sequence(items.clone()).to_list() == items
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lambars_vector::typeclass::{Buildable, Foldable};
//!
//! fn doubled<C>(collection: C) -> C
//! where
//!     C: Buildable + Foldable<Inner = i32>,
//! {
//!     C::from_sequence(collection.to_list().into_iter().map(|element| element * 2))
//! }
//!
//! assert_eq!(doubled(vec![1, 2, 3]), vec![2, 4, 6]);
//! ```

use super::higher::TypeConstructor;

/// A type class for sequences that can be built from a finite run of elements.
///
/// Implementations must preserve the order in which elements are supplied.
pub trait Buildable: TypeConstructor + Sized {
    /// Builds a collection holding `items` in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::typeclass::Buildable;
    ///
    /// let built: Vec<char> = Buildable::from_sequence("abc".chars());
    /// assert_eq!(built, vec!['a', 'b', 'c']);
    /// ```
    fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self::Inner>;

    /// Builds a collection holding exactly one element.
    fn singleton_of(element: Self::Inner) -> Self {
        Self::from_sequence(std::iter::once(element))
    }
}

impl<T> Buildable for Vec<T> {
    fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_from_sequence_preserves_order() {
        let built: Vec<i32> = Buildable::from_sequence([3, 1, 2]);
        assert_eq!(built, vec![3, 1, 2]);
    }

    #[rstest]
    fn vec_singleton_of_holds_one_element() {
        let built: Vec<&str> = Buildable::singleton_of("only");
        assert_eq!(built, vec!["only"]);
    }
}
