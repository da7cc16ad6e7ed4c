//! InlineVec behaviour against `Vec` as a reference model.

use krama_core::InlineVec;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(u32),
    Pop,
    Clear,
    Truncate(usize),
    Resize(usize, u32),
    Extend(Vec<u32>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => Just(Op::Clear),
        1 => (0usize..12).prop_map(Op::Truncate),
        1 => (0usize..12, any::<u32>()).prop_map(|(n, v)| Op::Resize(n, v)),
        1 => proptest::collection::vec(any::<u32>(), 0..6).prop_map(Op::Extend),
    ]
}

fn apply(v: &mut InlineVec<u32, 4>, reference: &mut Vec<u32>, op: &Op) {
    match op {
        Op::Push(x) => {
            v.push(*x);
            reference.push(*x);
        }
        Op::Pop => assert_eq!(v.pop(), reference.pop()),
        Op::Clear => {
            v.clear();
            reference.clear();
        }
        Op::Truncate(n) => {
            v.truncate(*n);
            reference.truncate(*n);
        }
        Op::Resize(n, x) => {
            v.resize(*n, *x);
            reference.resize(*n, *x);
        }
        Op::Extend(items) => {
            v.extend_from_slice(items);
            reference.extend_from_slice(items);
        }
    }
}

proptest! {
    /// Every operation sequence leaves the same contents as `Vec`.
    #[test]
    fn prop_matches_vec(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let mut v: InlineVec<u32, 4> = InlineVec::new();
        let mut reference = Vec::new();
        for op in &ops {
            apply(&mut v, &mut reference, op);
            prop_assert_eq!(v.as_slice(), reference.as_slice());
            prop_assert!(v.capacity() >= v.len());
        }
        prop_assert_eq!(v.into_vec(), reference);
    }

    /// Staying within inline capacity never touches the heap.
    #[test]
    fn prop_inline_until_capacity(items in proptest::collection::vec(any::<u32>(), 0..=4)) {
        let mut v: InlineVec<u32, 4> = InlineVec::new();
        for &x in &items {
            v.push(x);
        }
        prop_assert!(!v.spilled());
        prop_assert_eq!(v.capacity(), 4);
    }
}

#[test]
fn test_spill_preserves_order_and_doubles() {
    let mut v: InlineVec<u32, 4> = (0..4).collect();
    assert!(!v.spilled());
    v.push(4);
    assert!(v.spilled());
    assert!(v.capacity() >= 8);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);

    let cap = v.capacity();
    for x in 5..=cap as u32 {
        v.push(x);
    }
    assert!(v.capacity() >= 2 * cap);
}

#[test]
fn test_move_and_clone() {
    let inline: InlineVec<u32, 4> = InlineVec::from_slice(&[1, 2]);
    let moved = inline;
    assert_eq!(moved.as_slice(), &[1, 2]);

    let heap: InlineVec<u32, 2> = InlineVec::from_slice(&[1, 2, 3]);
    let ptr = heap.as_slice().as_ptr();
    let moved = heap;
    assert_eq!(moved.as_slice().as_ptr(), ptr);

    let copy = moved.clone();
    assert_eq!(copy, moved);
    assert_ne!(copy.as_slice().as_ptr(), ptr);
}

#[test]
fn test_index_and_iterate() {
    let mut v: InlineVec<u32, 2> = InlineVec::from_elem(7, 3);
    v[1] = 9;
    assert_eq!(v[0], 7);
    assert_eq!(v.iter().copied().sum::<u32>(), 23);
    assert_eq!((&v).into_iter().count(), 3);
}
