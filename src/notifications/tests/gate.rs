//! Tests for the distinct-value gate

use crate::notifications::api::DistinctGate;

#[test]
fn test_first_value_is_always_admitted() {
    let mut gate: DistinctGate<&str> = DistinctGate::new();
    assert!(gate.admit(&"pending"));
    assert!(!gate.admit(&"pending"));
}

#[test]
fn test_consecutive_duplicates_are_collapsed() {
    let mut gate: DistinctGate<&str> = DistinctGate::new();
    let admitted: Vec<_> = ["p", "p", "e", "e", "p", "d"]
        .iter()
        .filter(|value| gate.admit(*value))
        .copied()
        .collect();

    assert_eq!(admitted, vec!["p", "e", "p", "d"]);
}
