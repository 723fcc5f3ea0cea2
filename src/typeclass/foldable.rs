//! Foldable type class - traversing a sequence front to back.
//!
//! This module provides the `Foldable` trait, the "iterate elements" half of
//! the contract generic collection code uses. Anything that can fold its
//! elements left to right can be counted, searched, visited and copied into
//! a `Vec` without knowing its concrete representation.
//!
//! # Laws
//!
//! ## Consistency between `fold_left` and `fold_right`
//!
//! ```text
//! fa.fold_right(init, f) == fa.to_list().into_iter().rev().fold(init, flip(f))
//! ```
//!
//! ## Consistency with `to_list`
//!
//! ```text
//! fa.fold_left(init, f) == fa.to_list().into_iter().fold(init, f)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lambars_vector::typeclass::Foldable;
//!
//! let numbers = vec![1, 2, 3, 4, 5];
//! let sum = numbers.fold_left(0, |accumulator, element| accumulator + element);
//! assert_eq!(sum, 15);
//! ```

use super::higher::TypeConstructor;

/// A type class for sequences whose elements can be visited in order.
///
/// # Required Methods
///
/// - `fold_left`: Left-associative fold
/// - `fold_right`: Right-associative fold
///
/// # Provided Methods
///
/// All other methods have default implementations based on `fold_left`.
/// Implementors that know their size should override `length` and
/// `is_empty`.
pub trait Foldable: TypeConstructor {
    /// Folds the structure from left to right with an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::typeclass::Foldable;
    ///
    /// let values = vec![1, 2, 3];
    /// let sum = values.fold_left(0, |accumulator, element| accumulator + element);
    /// assert_eq!(sum, 6);
    /// ```
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds the structure from right to left with an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::typeclass::Foldable;
    ///
    /// let values = vec![1, 2, 3];
    /// let result = values.fold_right(String::new(), |element, accumulator| {
    ///     format!("{}{}", element, accumulator)
    /// });
    /// assert_eq!(result, "123");
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Returns whether the structure contains no elements.
    fn is_empty(&self) -> bool
    where
        Self: Clone,
    {
        self.clone().fold_left(true, |_, _| false)
    }

    /// Returns the number of elements in the structure.
    fn length(&self) -> usize
    where
        Self: Clone,
    {
        self.clone().fold_left(0, |count, _| count + 1)
    }

    /// Converts the structure to a `Vec` in fold order.
    fn to_list(self) -> Vec<Self::Inner>
    where
        Self: Sized,
    {
        self.fold_left(Vec::new(), |mut accumulator, element| {
            accumulator.push(element);
            accumulator
        })
    }

    /// Calls `function` on every element, front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::typeclass::Foldable;
    ///
    /// let mut visited = Vec::new();
    /// vec!['a', 'b'].for_each(|element| visited.push(element));
    /// assert_eq!(visited, vec!['a', 'b']);
    /// ```
    fn for_each<F>(self, mut function: F)
    where
        F: FnMut(Self::Inner),
        Self: Sized,
    {
        self.fold_left((), |(), element| function(element));
    }

    /// Finds the first element satisfying a predicate.
    fn find<P>(self, mut predicate: P) -> Option<Self::Inner>
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Sized,
    {
        self.fold_left(None, |accumulator, element| {
            if accumulator.is_some() {
                accumulator
            } else if predicate(&element) {
                Some(element)
            } else {
                None
            }
        })
    }

    /// Checks if any element satisfies the predicate.
    fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        self.clone().find(|element| predicate(element)).is_some()
    }

    /// Checks if all elements satisfy the predicate.
    ///
    /// An empty structure satisfies every predicate.
    fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        !self.exists(|element| !predicate(element))
    }
}

// =============================================================================
// Vec<T> Implementation
// =============================================================================

impl<T> Foldable for Vec<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    fn to_list(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_fold_left_sums() {
        assert_eq!(vec![1, 2, 3].fold_left(0, |sum, element| sum + element), 6);
    }

    #[rstest]
    fn vec_fold_right_visits_back_to_front() {
        let result = vec![1, 2, 3].fold_right(String::new(), |element, accumulator| {
            format!("{accumulator}{element}")
        });
        assert_eq!(result, "321");
    }

    #[rstest]
    #[case(vec![], 0, true)]
    #[case(vec![7], 1, false)]
    #[case(vec![7, 8, 9], 3, false)]
    fn vec_length_and_is_empty(
        #[case] values: Vec<i32>,
        #[case] expected_length: usize,
        #[case] expected_empty: bool,
    ) {
        assert_eq!(Foldable::length(&values), expected_length);
        assert_eq!(Foldable::is_empty(&values), expected_empty);
    }

    #[rstest]
    fn vec_find_returns_first_match() {
        assert_eq!(vec![1, 4, 6].find(|element| element % 2 == 0), Some(4));
        assert_eq!(vec![1, 3].find(|element| element % 2 == 0), None);
    }

    #[rstest]
    fn vec_exists_and_for_all() {
        let values = vec![2, 4, 6];
        assert!(values.exists(|element| *element == 4));
        assert!(values.for_all(|element| element % 2 == 0));
        assert!(Vec::<i32>::new().for_all(|_| false));
    }

    #[rstest]
    fn vec_for_each_visits_in_order() {
        let mut visited = Vec::new();
        vec![3, 1, 2].for_each(|element| visited.push(element));
        assert_eq!(visited, vec![3, 1, 2]);
    }
}
