//! Persistent (immutable) vector based on a bitmapped vector trie.
//!
//! This module provides [`PersistentVector`], an immutable indexed sequence
//! that uses structural sharing for efficient functional updates.
//!
//! # Overview
//!
//! `PersistentVector` is a 32-way branching trie. A logical index is split
//! into 5-bit branch selectors, one per level, most significant first, and
//! the trie is exactly as tall as it needs to be to hold its elements:
//!
//! | Height | Capacity        |
//! |--------|-----------------|
//! | 0      | 0 (empty)       |
//! | 1      | 32              |
//! | 2      | 1 024           |
//! | 3      | 32 768          |
//! | h      | 32^h            |
//!
//! It provides:
//!
//! - O(log32 N) random access
//! - O(log32 N) `update`, `push_back` and `pop_back`
//! - O(1) `len`, `is_empty` and `clone`
//!
//! # Internal Structure
//!
//! Every node holds at most 32 children. Leaves hold elements, branches hold
//! reference-counted child nodes. All nodes except those on the rightmost
//! spine are full, which is what lets an index be decoded with shifts and
//! masks alone. A write copies the nodes on the root-to-target path and
//! shares every other node with the vector it was derived from.
//!
//! # Examples
//!
//! ```rust
//! use lambars_vector::persistent::PersistentVector;
//!
//! let vector = PersistentVector::new()
//!     .push_back(1)
//!     .push_back(2)
//!     .push_back(3);
//!
//! assert_eq!(vector.get(0), Ok(&1));
//! assert_eq!(vector.get(2), Ok(&3));
//!
//! // Structural sharing: the original vector is preserved
//! let extended = vector.push_back(4);
//! assert_eq!(vector.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4);   // New vector
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};
use std::ops::Index;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use super::ReferenceCounter;
use super::error::{CapacityExceededError, EmptyVectorError, IndexOutOfBoundsError};

use crate::typeclass::{Buildable, Foldable, TypeConstructor};

// =============================================================================
// Constants
// =============================================================================

/// Branching factor (2^5 = 32)
const BRANCHING_FACTOR: usize = 32;

/// Bits per level in the trie
const BITS_PER_LEVEL: usize = 5;

/// Bit mask for extracting index within a node
const MASK: usize = BRANCHING_FACTOR - 1;

/// Iterator stacks stay inline up to this height.
const INLINE_STACK_DEPTH: usize = 8;

/// The tallest trie a [`PersistentVector`] can build.
///
/// Chosen so that `32^MAXIMUM_HEIGHT` still fits in a `usize`: 12 on 64-bit
/// targets and 6 on 32-bit targets.
pub const MAXIMUM_HEIGHT: usize = (usize::BITS as usize - 1) / BITS_PER_LEVEL;

/// Number of elements a trie of `height` levels holds when full.
#[inline]
const fn capacity_at(height: usize) -> usize {
    1 << (BITS_PER_LEVEL * height)
}

/// Branch selector for `index` at `level`, where leaves sit at level 1.
#[inline]
const fn branch_index(index: usize, level: usize) -> usize {
    (index >> (BITS_PER_LEVEL * (level - 1))) & MASK
}

/// The unique height whose capacity range `(32^(h-1), 32^h]` contains `length`.
const fn height_for_length(length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    let mut height = 1;
    while height < MAXIMUM_HEIGHT && capacity_at(height) < length {
        height += 1;
    }
    height
}

// =============================================================================
// Node Definition
// =============================================================================

type Children<T> = ArrayVec<ReferenceCounter<Node<T>>, BRANCHING_FACTOR>;
type Elements<T> = ArrayVec<T, BRANCHING_FACTOR>;

/// Internal node of the trie. Never mutated once built.
enum Node<T> {
    /// Branch node containing child nodes one level closer to the leaves
    Branch(Children<T>),
    /// Leaf node containing actual elements
    Leaf(Elements<T>),
}

impl<T> Node<T> {
    /// A chain of `level` single-child nodes ending in a leaf holding only
    /// `element`.
    fn spine(level: usize, element: T) -> Self {
        let mut elements = Elements::new();
        elements.push(element);
        let mut node = Self::Leaf(elements);
        for _ in 1..level {
            let mut children = Children::new();
            children.push(ReferenceCounter::new(node));
            node = Self::Branch(children);
        }
        node
    }

    fn child(&self, position: usize) -> Option<&ReferenceCounter<Self>> {
        match self {
            Self::Branch(children) => children.get(position),
            Self::Leaf(_) => None,
        }
    }

    fn element(&self, position: usize) -> Option<&T> {
        match self {
            Self::Branch(_) => None,
            Self::Leaf(elements) => elements.get(position),
        }
    }

    /// Counts the elements below this node while asserting the shape
    /// invariants. `rightmost` is true on the rightmost spine, the only place
    /// partial nodes may appear.
    fn checked_len(&self, level: usize, rightmost: bool) -> usize {
        match self {
            Self::Leaf(elements) => {
                assert_eq!(level, 1, "leaf found above the bottom level");
                assert!(!elements.is_empty(), "empty leaf");
                assert!(
                    rightmost || elements.is_full(),
                    "partial leaf off the rightmost spine"
                );
                elements.len()
            }
            Self::Branch(children) => {
                assert!(level > 1, "branch found at the bottom level");
                assert!(!children.is_empty(), "empty branch");
                assert!(
                    rightmost || children.is_full(),
                    "partial branch off the rightmost spine"
                );
                let last_position = children.len() - 1;
                children
                    .iter()
                    .enumerate()
                    .map(|(position, child)| {
                        child.checked_len(level - 1, rightmost && position == last_position)
                    })
                    .sum()
            }
        }
    }
}

impl<T: Clone> Node<T> {
    /// Copies the path to `index` and replaces the element there.
    fn updated(&self, level: usize, index: usize, element: T) -> Self {
        match self {
            Self::Leaf(elements) => {
                let mut elements = elements.clone();
                elements[index & MASK] = element;
                Self::Leaf(elements)
            }
            Self::Branch(children) => {
                let position = branch_index(index, level);
                let child = children[position].updated(level - 1, index, element);
                let mut children = children.clone();
                children[position] = ReferenceCounter::new(child);
                Self::Branch(children)
            }
        }
    }

    /// Copies the rightmost spine and places `element` at `index`, which must
    /// be the first free slot and must fit under this node.
    fn pushed(&self, level: usize, index: usize, element: T) -> Self {
        match self {
            Self::Leaf(elements) => {
                debug_assert_eq!(index & MASK, elements.len());
                let mut elements = elements.clone();
                elements.push(element);
                Self::Leaf(elements)
            }
            Self::Branch(children) => {
                let position = branch_index(index, level);
                let mut new_children = children.clone();
                if let Some(child) = children.get(position) {
                    new_children[position] =
                        ReferenceCounter::new(child.pushed(level - 1, index, element));
                } else {
                    debug_assert_eq!(position, children.len());
                    new_children.push(ReferenceCounter::new(Self::spine(level - 1, element)));
                }
                Self::Branch(new_children)
            }
        }
    }

    /// Copies the rightmost spine without its last element. `None` when the
    /// subtree has nothing left.
    fn popped(&self) -> Option<Self> {
        match self {
            Self::Leaf(elements) => {
                let (_, remaining) = elements.split_last()?;
                (!remaining.is_empty()).then(|| Self::Leaf(remaining.iter().cloned().collect()))
            }
            Self::Branch(children) => {
                let (last, remaining) = children.split_last()?;
                let mut new_children: Children<T> = remaining.iter().cloned().collect();
                if let Some(child) = last.popped() {
                    new_children.push(ReferenceCounter::new(child));
                }
                (!new_children.is_empty()).then_some(Self::Branch(new_children))
            }
        }
    }
}

/// How an append or a removal moved the height of the trie.
enum Resized<T> {
    /// Same height under a new root.
    Unchanged(ReferenceCounter<Node<T>>),
    /// One level taller. The previous root is the new root's first child.
    Grown(ReferenceCounter<Node<T>>),
    /// One level shorter. The previous root's only remaining child is promoted.
    Shrunk(ReferenceCounter<Node<T>>),
    /// The last element was removed.
    Emptied,
}

// =============================================================================
// PersistentVector Definition
// =============================================================================

/// A persistent (immutable) vector based on a bitmapped vector trie.
///
/// `PersistentVector` is an immutable data structure that uses structural
/// sharing to efficiently support functional programming patterns.
///
/// # Time Complexity
///
/// | Operation    | Complexity                      |
/// |--------------|---------------------------------|
/// | `new`        | O(1)                            |
/// | `get`        | O(log32 N)                      |
/// | `update`     | O(log32 N)                      |
/// | `push_back`  | O(log32 N)                      |
/// | `pop_back`   | O(log32 N)                      |
/// | `len`        | O(1)                            |
/// | `clone`      | O(1)                            |
/// | `iter`       | O(1) to create, O(N) to iterate |
///
/// # Examples
///
/// ```rust
/// use lambars_vector::persistent::PersistentVector;
///
/// let vector: PersistentVector<i32> = (0..100).collect();
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector.get(50), Ok(&50));
/// ```
pub struct PersistentVector<T> {
    /// Total number of elements
    length: usize,
    /// Number of levels in the trie; zero only when empty
    height: usize,
    /// Root node of the trie
    root: Option<ReferenceCounter<Node<T>>>,
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = PersistentVector::new();
    /// assert!(vector.is_empty());
    /// assert_eq!(vector.height(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            length: 0,
            height: 0,
            root: None,
        }
    }

    /// Creates a vector containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::singleton(42);
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(vector.get(0), Ok(&42));
    /// ```
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            length: 1,
            height: 1,
            root: Some(ReferenceCounter::new(Node::spine(1, element))),
        }
    }

    /// Returns the number of elements in the vector.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of levels in the trie.
    ///
    /// The empty vector has height 0. A vector of `n > 0` elements has the
    /// unique height `h` with `32^(h-1) < n <= 32^h`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..32).collect();
    /// assert_eq!(vector.height(), 1);
    /// assert_eq!(vector.push_back(32).height(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    const fn out_of_bounds(&self, index: usize) -> IndexOutOfBoundsError {
        IndexOutOfBoundsError {
            index,
            length: self.length,
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBoundsError`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log32 N), no allocation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.get(0), Ok(&1));
    /// assert_eq!(vector.get(4), Ok(&5));
    /// assert!(vector.get(5).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBoundsError> {
        if index >= self.length {
            return Err(self.out_of_bounds(index));
        }
        let mut node = self
            .root
            .as_deref()
            .ok_or_else(|| self.out_of_bounds(index))?;
        let mut level = self.height;

        loop {
            match node {
                Node::Branch(children) => {
                    node = children
                        .get(branch_index(index, level))
                        .map(|child| child.as_ref())
                        .ok_or_else(|| self.out_of_bounds(index))?;
                    level -= 1;
                }
                Node::Leaf(elements) => {
                    return elements
                        .get(index & MASK)
                        .ok_or_else(|| self.out_of_bounds(index));
                }
            }
        }
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns a reference to the last element, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.last(), Some(&5));
    ///
    /// let empty: PersistentVector<i32> = PersistentVector::new();
    /// assert_eq!(empty.last(), None);
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length
            .checked_sub(1)
            .and_then(|index| self.get(index).ok())
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// Each call starts a fresh traversal, so a vector can be iterated any
    /// number of times.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = vector.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator::new(self)
    }

    /// Verifies the structural invariants of the trie.
    ///
    /// Checks that the height is canonical for the length, that only nodes
    /// on the rightmost spine are partially filled, that leaves sit exactly
    /// at the bottom level, that the stored length matches the elements
    /// reachable from the root, and that a branch root has at least two
    /// children.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violated invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..2000).collect();
    /// vector.check_invariants();
    /// ```
    pub fn check_invariants(&self) {
        assert_eq!(
            self.height,
            height_for_length(self.length),
            "height is not canonical for length {}",
            self.length
        );
        match self.root.as_deref() {
            None => assert_eq!(self.length, 0, "non-empty vector without a root"),
            Some(root) => {
                assert_eq!(
                    root.checked_len(self.height, true),
                    self.length,
                    "stored length disagrees with the trie"
                );
                if let Node::Branch(children) = root {
                    assert!(children.len() > 1, "branch root with a single child");
                }
            }
        }
    }

    /// Builds the successor vector of `length` elements described by
    /// `resized`.
    fn resized(&self, resized: Resized<T>, length: usize) -> Self {
        match resized {
            Resized::Unchanged(root) => Self {
                length,
                height: self.height,
                root: Some(root),
            },
            Resized::Grown(root) => Self {
                length,
                height: self.height + 1,
                root: Some(root),
            },
            Resized::Shrunk(root) => Self {
                length,
                height: self.height - 1,
                root: Some(root),
            },
            Resized::Emptied => Self::new(),
        }
    }

    /// Removes the last element, collapsing the root when only its first
    /// child remains.
    fn removed_last(&self) -> Result<Resized<T>, EmptyVectorError>
    where
        T: Clone,
    {
        let root = self.root.as_deref().ok_or(EmptyVectorError)?;
        let resized = match root.popped() {
            None => Resized::Emptied,
            Some(Node::Branch(children)) if children.len() == 1 => {
                Resized::Shrunk(ReferenceCounter::clone(&children[0]))
            }
            Some(node) => Resized::Unchanged(ReferenceCounter::new(node)),
        };
        Ok(resized)
    }

    /// Appends `element`, adding a level above the current root when it is
    /// full.
    fn appended(&self, element: T) -> Result<Resized<T>, CapacityExceededError>
    where
        T: Clone,
    {
        let Some(root) = &self.root else {
            return Ok(Resized::Grown(ReferenceCounter::new(Node::spine(
                1, element,
            ))));
        };

        if self.length < capacity_at(self.height) {
            return Ok(Resized::Unchanged(ReferenceCounter::new(root.pushed(
                self.height,
                self.length,
                element,
            ))));
        }

        if self.height >= MAXIMUM_HEIGHT {
            return Err(CapacityExceededError {
                maximum_height: MAXIMUM_HEIGHT,
            });
        }

        let mut children = Children::new();
        children.push(ReferenceCounter::clone(root));
        children.push(ReferenceCounter::new(Node::spine(self.height, element)));
        Ok(Resized::Grown(ReferenceCounter::new(Node::Branch(children))))
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Builds a vector by appending each element of `items` in order.
    ///
    /// # Panics
    ///
    /// Panics if `items` yields more elements than the vector can address
    /// (`32^MAXIMUM_HEIGHT`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::from_sequence(vec!['a', 'b', 'c']);
    /// assert_eq!(vector.len(), 3);
    /// assert_eq!(vector.get(1), Ok(&'b'));
    /// ```
    #[must_use]
    pub fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new().push_back_many(items)
    }

    /// Appends an element to the back of the vector, or reports that the
    /// vector cannot grow any further.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceededError`] when the vector already holds
    /// `32^MAXIMUM_HEIGHT` elements.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::new().try_push_back(1).unwrap();
    /// assert_eq!(vector.get(0), Ok(&1));
    /// ```
    pub fn try_push_back(&self, element: T) -> Result<Self, CapacityExceededError> {
        let resized = self.appended(element)?;
        Ok(self.resized(resized, self.length + 1))
    }

    /// Appends an element to the back of the vector.
    ///
    /// Returns a new vector with the element at the end. The previous root
    /// is reused unchanged when the trie grows a level, and only the
    /// rightmost spine is copied otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the vector already holds `32^MAXIMUM_HEIGHT` elements. Use
    /// [`try_push_back`](Self::try_push_back) to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::new()
    ///     .push_back(1)
    ///     .push_back(2)
    ///     .push_back(3);
    ///
    /// assert_eq!(vector.len(), 3);
    /// assert_eq!(vector.get(2), Ok(&3));
    /// ```
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        match self.try_push_back(element) {
            Ok(vector) => vector,
            Err(error) => panic!("{error}"),
        }
    }

    /// Appends every element of `items` in order.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`push_back`](Self::push_back).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::singleton(0).push_back_many(1..4);
    /// assert_eq!(vector.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn push_back_many<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .fold(self.clone(), |vector, element| vector.push_back(element))
    }

    /// Removes the last element of the vector.
    ///
    /// Returns a new vector without the last element. When the removal
    /// leaves the root with a single child, that child becomes the new root
    /// and the height drops by one.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyVectorError`] if the vector is empty.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let remaining = vector.pop_back().unwrap();
    ///
    /// assert_eq!(remaining.len(), 4);
    /// assert_eq!(remaining.last(), Some(&4));
    /// assert_eq!(vector.len(), 5); // Original unchanged
    /// ```
    pub fn pop_back(&self) -> Result<Self, EmptyVectorError> {
        let resized = self.removed_last()?;
        Ok(self.resized(resized, self.length - 1))
    }

    /// Replaces the element at the given index.
    ///
    /// Returns a new vector of the same height in which exactly `height`
    /// nodes are new; every other node is shared with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBoundsError`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_vector::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let updated = vector.update(2, 100).unwrap();
    ///
    /// assert_eq!(updated.get(2), Ok(&100));
    /// assert_eq!(vector.get(2), Ok(&3)); // Original unchanged
    /// ```
    pub fn update(&self, index: usize, element: T) -> Result<Self, IndexOutOfBoundsError> {
        if index >= self.length {
            return Err(self.out_of_bounds(index));
        }
        let root = self
            .root
            .as_deref()
            .ok_or_else(|| self.out_of_bounds(index))?;

        Ok(Self {
            length: self.length,
            height: self.height,
            root: Some(ReferenceCounter::new(
                root.updated(self.height, index, element),
            )),
        })
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over references to elements of a [`PersistentVector`].
///
/// Walks the trie depth first with an explicit stack of sibling iterators,
/// visiting each node once.
pub struct PersistentVectorIterator<'a, T> {
    /// Siblings still to visit, one entry per branch level above the leaf
    stack: SmallVec<[std::slice::Iter<'a, ReferenceCounter<Node<T>>>; INLINE_STACK_DEPTH]>,
    /// Elements left in the current leaf
    leaf: std::slice::Iter<'a, T>,
    /// Number of elements not yet returned
    remaining: usize,
}

impl<'a, T> PersistentVectorIterator<'a, T> {
    fn new(vector: &'a PersistentVector<T>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            leaf: [].iter(),
            remaining: vector.length,
        };
        if let Some(root) = vector.root.as_deref() {
            iterator.descend(root);
        }
        iterator
    }

    /// Follows first children from `node` down to a leaf.
    fn descend(&mut self, mut node: &'a Node<T>) {
        loop {
            match node {
                Node::Branch(children) => {
                    let mut siblings = children.iter();
                    let Some(first) = siblings.next() else {
                        return;
                    };
                    self.stack.push(siblings);
                    node = first.as_ref();
                }
                Node::Leaf(elements) => {
                    self.leaf = elements.iter();
                    return;
                }
            }
        }
    }
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.leaf.next() {
                self.remaining -= 1;
                return Some(element);
            }

            let next_subtree = loop {
                let siblings = self.stack.last_mut()?;
                if let Some(child) = siblings.next() {
                    break child;
                }
                self.stack.pop();
            };
            self.descend(next_subtree);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for PersistentVectorIterator<'_, T> {}

/// A branch node held by the owning iterator and the next child to visit.
struct IntoIteratorStackEntry<T> {
    node: ReferenceCounter<Node<T>>,
    child_index: usize,
}

/// An owning iterator over elements of a [`PersistentVector`].
///
/// Nodes are held through reference counting, so elements are cloned out of
/// the trie as they are returned.
pub struct PersistentVectorIntoIterator<T> {
    /// Branches still being visited, root first
    stack: SmallVec<[IntoIteratorStackEntry<T>; INLINE_STACK_DEPTH]>,
    /// Leaf currently being read
    leaf: Option<ReferenceCounter<Node<T>>>,
    /// Position within the current leaf
    leaf_index: usize,
    /// Number of elements not yet returned
    remaining: usize,
}

impl<T: Clone> PersistentVectorIntoIterator<T> {
    fn new(vector: PersistentVector<T>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            leaf: None,
            leaf_index: 0,
            remaining: vector.length,
        };
        if let Some(root) = vector.root {
            iterator.descend(root);
        }
        iterator
    }

    fn descend(&mut self, mut node: ReferenceCounter<Node<T>>) {
        while let Some(first) = node.child(0).cloned() {
            self.stack.push(IntoIteratorStackEntry {
                node,
                child_index: 1,
            });
            node = first;
        }
        self.leaf = Some(node);
        self.leaf_index = 0;
    }
}

impl<T: Clone> Iterator for PersistentVectorIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self
                .leaf
                .as_deref()
                .and_then(|leaf| leaf.element(self.leaf_index))
                .cloned()
            {
                self.leaf_index += 1;
                self.remaining -= 1;
                return Some(element);
            }
            self.leaf = None;

            let next_subtree = loop {
                let entry = self.stack.last_mut()?;
                if let Some(child) = entry.node.child(entry.child_index).cloned() {
                    entry.child_index += 1;
                    break child;
                }
                self.stack.pop();
            };
            self.descend(next_subtree);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentVectorIntoIterator<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> FusedIterator for PersistentVectorIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentVector<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            height: self.height,
            root: self.root.clone(),
        }
    }
}

impl<T> Default for PersistentVector<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter)
    }
}

impl<T: Clone> IntoIterator for PersistentVector<T> {
    type Item = T;
    type IntoIter = PersistentVectorIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentVectorIntoIterator::new(self)
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for PersistentVector<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        let same_root = match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        };
        same_root || self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

/// Hashes the length followed by every element in order, so equal vectors
/// hash equally regardless of how they were built.
impl<T: Hash> Hash for PersistentVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> TypeConstructor for PersistentVector<T> {
    type Inner = T;
    type WithType<B> = PersistentVector<B>;
}

impl<T: Clone> Foldable for PersistentVector<T> {
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
        let elements: Vec<T> = self.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl<T: Clone> Buildable for PersistentVector<T> {
    fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().collect()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentVectorVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> PersistentVectorVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentVectorVisitor<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentVector<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut vector = PersistentVector::new();
        while let Some(element) = seq.next_element()? {
            vector = vector
                .try_push_back(element)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(vector)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentVector<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentVectorVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
