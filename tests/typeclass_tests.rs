#![cfg(feature = "persistent")]
//! Tests for the collaborator contract.
//!
//! Generic algorithms written against `Buildable` and `Foldable` must treat
//! `PersistentVector` and `Vec` interchangeably.

use lambars_vector::persistent::PersistentVector;
use lambars_vector::typeclass::{Buildable, Foldable, TypeConstructor};
use rstest::rstest;

fn reversed<C>(collection: C) -> C
where
    C: Buildable + Foldable,
{
    C::from_sequence(
        collection.fold_right(Vec::new(), |element, mut accumulator| {
            accumulator.push(element);
            accumulator
        }),
    )
}

fn evens<C>(collection: C) -> C
where
    C: Buildable + Foldable<Inner = i32>,
{
    C::from_sequence(collection.to_list().into_iter().filter(|element| element % 2 == 0))
}

fn convert<Source, Target>(collection: Source) -> Target
where
    Source: Foldable,
    Target: Buildable + TypeConstructor<Inner = Source::Inner>,
{
    Target::from_sequence(collection.to_list())
}

#[rstest]
fn test_reversed_agrees_for_vec_and_persistent_vector() {
    let vector: PersistentVector<i32> = (0..100).collect();
    let expected: Vec<i32> = (0..100).rev().collect();

    assert_eq!(reversed(vector).to_list(), expected);
    assert_eq!(reversed((0..100).collect::<Vec<_>>()), expected);
}

#[rstest]
fn test_filter_through_contract() {
    let vector: PersistentVector<i32> = (0..50).collect();
    let filtered = evens(vector);
    assert_eq!(filtered.len(), 25);
    assert_eq!(filtered.get(24), Ok(&48));
    filtered.check_invariants();
}

#[rstest]
fn test_convert_between_sequence_types() {
    let source: Vec<char> = "persistent".chars().collect();
    let vector: PersistentVector<char> = convert(source.clone());
    let back: Vec<char> = convert(vector);
    assert_eq!(back, source);
}

#[rstest]
fn test_foldable_queries_on_persistent_vector() {
    let vector: PersistentVector<i32> = (1..=40).collect();

    assert_eq!(Foldable::length(&vector), 40);
    assert!(!Foldable::is_empty(&vector));
    assert!(vector.exists(|element| *element == 40));
    assert!(vector.for_all(|element| *element > 0));
    assert_eq!(vector.clone().find(|element| element % 7 == 0), Some(7));
    assert_eq!(vector.fold_left(0, |sum, element| sum + element), 820);
}

#[rstest]
fn test_for_each_visits_front_to_back() {
    let vector: PersistentVector<i32> = (0..70).collect();
    let mut visited = Vec::new();
    vector.for_each(|element| visited.push(element));
    assert_eq!(visited, (0..70).collect::<Vec<_>>());
}

#[rstest]
fn test_singleton_of_builds_height_one_vector() {
    let vector: PersistentVector<&str> = Buildable::singleton_of("one");
    assert_eq!(vector.height(), 1);
    assert_eq!(vector.get(0), Ok(&"one"));
}
