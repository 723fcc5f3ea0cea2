#![cfg(all(feature = "serde", feature = "persistent"))]

//! Integration tests for serde support.
//!
//! These tests verify that vectors serialize as plain sequences and
//! deserialize back into canonical tries.

use lambars_vector::persistent::PersistentVector;
use rstest::rstest;

#[rstest]
fn test_serialize_empty() {
    let vector: PersistentVector<i32> = PersistentVector::new();
    assert_eq!(serde_json::to_string(&vector).unwrap(), "[]");
}

#[rstest]
fn test_serialize_multiple_elements() {
    let vector: PersistentVector<i32> = (1..=3).collect();
    assert_eq!(serde_json::to_string(&vector).unwrap(), "[1,2,3]");
}

#[rstest]
fn test_deserialize_strings() {
    let json = r#"["hello","world"]"#;
    let vector: PersistentVector<String> = serde_json::from_str(json).unwrap();
    assert_eq!(vector.len(), 2);
    assert_eq!(vector.get(0), Ok(&"hello".to_string()));
    assert_eq!(vector.get(1), Ok(&"world".to_string()));
}

#[rstest]
#[case(0)]
#[case(32)]
#[case(33)]
#[case(1025)]
fn test_roundtrip_keeps_elements_and_height(#[case] length: usize) {
    let original: PersistentVector<usize> = (0..length).collect();
    let json = serde_json::to_string(&original).unwrap();
    let restored: PersistentVector<usize> = serde_json::from_str(&json).unwrap();

    assert_eq!(original, restored);
    assert_eq!(original.height(), restored.height());
    restored.check_invariants();
}

#[rstest]
fn test_nested_vectors_roundtrip() {
    let inner: PersistentVector<i32> = (0..3).collect();
    let outer = PersistentVector::new().push_back(inner.clone()).push_back(inner);
    let json = serde_json::to_string(&outer).unwrap();
    assert_eq!(json, "[[0,1,2],[0,1,2]]");

    let restored: PersistentVector<PersistentVector<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, outer);
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<PersistentVector<i32>, _> = serde_json::from_str(r#"{"a":1}"#);
    assert!(result.is_err());
}
