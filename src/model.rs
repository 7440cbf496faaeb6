//! Reference-model equivalence checks, shared by the property tests and the fuzz targets.

extern crate std;

use std::{
    collections::{BTreeMap, BTreeSet},
    prelude::v1::*,
};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlSet, AvlTree};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    /// Picks among the values currently in the tree, so that lookups and removals hit.
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Contains(ItemValue),
    Delete(ItemValue),
    Remove(ItemValue),
    First,
    Last,
    Clear,
}

impl Op {
    fn finalize(self, distinct: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(distinct, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(distinct, item)),
            Op::Delete(item) => FinalOp::Delete(get_value(distinct, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(distinct, item)),
            Op::First => FinalOp::First,
            Op::Last => FinalOp::Last,
            Op::Clear => FinalOp::Clear,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Contains(u32),
    Delete(u32),
    Remove(u32),
    First,
    Last,
    Clear,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    // Clearing is rare so that trees get a chance to grow.
    proptest::prop_oneof![
        4 => value_strategy().prop_map(Op::Insert),
        2 => value_strategy().prop_map(Op::Contains),
        2 => value_strategy().prop_map(Op::Delete),
        2 => value_strategy().prop_map(Op::Remove),
        1 => Just(Op::First),
        1 => Just(Op::Last),
        1 => Just(Op::Clear),
    ]
}

/// Applies `ops` to an [`AvlTree`] and to a multiset of counts, checking after every operation
/// that both hold the same elements and that the tree's invariants hold.
pub fn run_multiset_equivalence(ops: Vec<Op>) {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    let mut avl: AvlTree<u32> = AvlTree::new();

    fn remove_one(counts: &mut BTreeMap<u32, usize>, value: u32) -> Option<u32> {
        let count = counts.get_mut(&value)?;
        *count -= 1;

        if *count == 0 {
            counts.remove(&value);
        }

        Some(value)
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let distinct: Vec<u32> = counts.keys().copied().collect();
        let final_op = op.finalize(&distinct);

        match final_op {
            FinalOp::Insert(value) => {
                *counts.entry(value).or_default() += 1;
                avl.insert(value);
            }

            FinalOp::Contains(value) => {
                let from_model = counts.contains_key(&value);
                let from_avl = avl.contains(&value);

                assert_eq!(from_model, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Delete(value) => {
                let before: Vec<u32> = avl.iter().copied().collect();
                let from_model = remove_one(&mut counts, value);
                avl.delete(&value);

                if from_model.is_none() {
                    let after: Vec<u32> = avl.iter().copied().collect();
                    assert_eq!(before, after, "FinalOp #{op_id}: {final_op:?}");
                }
            }

            FinalOp::Remove(value) => {
                let from_model = remove_one(&mut counts, value);
                let from_avl = avl.remove(&value);

                assert_eq!(from_model, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::First => {
                let from_model = counts.keys().next();
                let from_avl = avl.first();

                assert_eq!(from_model, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Last => {
                let from_model = counts.keys().next_back();
                let from_avl = avl.last();

                assert_eq!(from_model, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                counts.clear();
                avl.clear();
            }
        }

        avl.assert_invariants();

        let expected: Vec<u32> = counts
            .iter()
            .flat_map(|(&value, &count)| core::iter::repeat(value).take(count))
            .collect();

        let mut visited = Vec::with_capacity(avl.len());
        avl.in_order(|&value| visited.push(value));

        assert_eq!(expected.len(), avl.len());
        assert_eq!(avl.is_empty(), expected.is_empty());
        assert_eq!(expected, visited, "FinalOp #{op_id}: {final_op:?}");
        assert!(avl.iter().eq(expected.iter()));
    }
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum SetOp {
    Insert(u16),
    Remove(u16),
    Contains(u16),
}

pub fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    proptest::prop_oneof![
        (0u16..512).prop_map(SetOp::Insert),
        (0u16..512).prop_map(SetOp::Remove),
        (0u16..512).prop_map(SetOp::Contains),
    ]
}

/// Applies `ops` to an [`AvlSet`] and a [`BTreeSet`], checking that they agree throughout.
pub fn run_set_equivalence(ops: Vec<SetOp>) {
    let mut btree = BTreeSet::new();
    let mut avl = AvlSet::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        match op {
            SetOp::Insert(value) => {
                assert_eq!(btree.insert(value), avl.insert(value), "SetOp #{op_id}: {op:?}");
            }

            SetOp::Remove(value) => {
                assert_eq!(btree.remove(&value), avl.remove(&value), "SetOp #{op_id}: {op:?}");
            }

            SetOp::Contains(value) => {
                assert_eq!(
                    btree.contains(&value),
                    avl.contains(&value),
                    "SetOp #{op_id}: {op:?}"
                );
            }
        }

        avl.assert_invariants();
        assert_eq!(btree.len(), avl.len());
        assert!(btree.iter().eq(avl.iter()));
    }
}
