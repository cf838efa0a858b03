use std::sync::Once;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::argument::{self, SubtreeMax, SubtreeSize};
use crate::{Argument, Descending, Error, RbTree};

fn initialize_logging() {
    static LOGGING: Once = Once::new();
    LOGGING.call_once(|| {
        use simplelog::*;
        use std::fs::File;
        // another test binary may have installed a logger already
        let _ = CombinedLogger::init(vec![
            TermLogger::new(LevelFilter::Warn, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
            WriteLogger::new(
                LevelFilter::Debug,
                Config::default(),
                File::create(std::env::temp_dir().join("rbtree_tests.log")).unwrap(),
            ),
        ]);
    });
}

#[test]
fn insert_and_delete_keep_invariants() {
    initialize_logging();
    let n = 1 << 10;
    let mut tree = RbTree::new();

    for i in 0..n {
        let (at, inserted) = tree.insert(i);
        assert!(inserted);
        assert_eq!(tree.get(at), Some(&i));
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), n as usize);
    assert!(tree.iter().copied().eq(0..n));

    for i in (1..n).rev() {
        assert_eq!(tree.delete_value(&i), Some(i));
        tree.validate().unwrap();
        assert_eq!(tree.search(&i), None);
        assert!((0..i).all(|k| tree.contains(&k)));
    }
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().and_then(|r| tree.get(r)), Some(&0));
}

#[test]
fn max_argument_tracks_the_largest_value() {
    initialize_logging();
    let mut tree = RbTree::with_argument(SubtreeMax);
    let root_max = |tree: &RbTree<i32, _, SubtreeMax>| tree.root().and_then(|r| tree.argument(r)).copied();

    for v in [3, 8, 1] {
        tree.insert(v);
    }
    assert_eq!(root_max(&tree), Some(8));

    tree.insert(12);
    assert_eq!(root_max(&tree), Some(12));

    tree.delete_value(&12);
    assert_eq!(root_max(&tree), Some(8));
    tree.validate().unwrap();

    tree.clean();
    assert_eq!(root_max(&tree), None);
}

#[test]
fn max_argument_follows_ascending_inserts_and_descending_deletes() {
    let n = 256;
    let mut tree = RbTree::with_argument(SubtreeMax);
    let root_max = |tree: &RbTree<i32, _, SubtreeMax>| tree.root().and_then(|r| tree.argument(r)).copied();

    for i in 0..n {
        tree.insert(i);
        assert_eq!(root_max(&tree), Some(i));
    }
    for i in (1..n).rev() {
        tree.delete_value(&i);
        assert_eq!(root_max(&tree), Some(i - 1));
    }
    tree.validate().unwrap();
}

#[test]
fn duplicate_insert_changes_nothing() {
    let mut tree: RbTree<i32> = (0..20).collect();
    let root = tree.root();
    let existing = tree.search(&7).unwrap();

    assert_eq!(tree.insert(7), (existing, false));
    assert_eq!(tree.len(), 20);
    assert_eq!(tree.root(), root);
    tree.validate().unwrap();
}

#[test]
fn replace_requires_an_equal_value() {
    let by_key = |a: &(i32, &str), b: &(i32, &str)| a.0.cmp(&b.0);
    let mut tree: RbTree<(i32, &str), _> = RbTree::with_compare(by_key);
    tree.extend([(1, "one"), (2, "two"), (3, "three")]);

    let two = tree.search(&(2, "")).unwrap();
    assert_eq!(tree.replace(two, (2, "deux")), Ok((2, "two")));
    assert_eq!(tree.get(two), Some(&(2, "deux")));

    assert_eq!(tree.replace(two, (4, "four")), Err((Error::OrderMismatch, (4, "four"))));
    assert_eq!(tree.get(two), Some(&(2, "deux")));
    tree.validate().unwrap();
}

#[test]
fn replace_refreshes_arguments() {
    // intervals keyed by start, each node caching the largest end in its subtree
    let max_end = argument::from_fn(
        |v: &(u32, u32), l: Option<&u32>, r: Option<&u32>| [Some(&v.1), l, r].into_iter().flatten().copied().max().unwrap_or(v.1),
        |a: &u32, b: &u32| a == b,
    );
    let by_start = |a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0);
    let mut tree = RbTree::with_compare_and_argument(by_start, max_end);
    tree.extend((0..50).map(|s| (s * 10, s * 10 + 5)));

    let root = tree.root().unwrap();
    assert_eq!(tree.argument(root), Some(&495));

    let at = tree.search(&(120, 0)).unwrap();
    tree.replace(at, (120, 1000)).unwrap();
    assert_eq!(tree.argument(root), Some(&1000));
    tree.validate().unwrap();

    tree.replace(at, (120, 125)).unwrap();
    assert_eq!(tree.argument(root), Some(&495));
    tree.validate().unwrap();
}

#[test]
fn deleted_and_cleaned_handles_are_stale() {
    let mut tree: RbTree<i32> = (0..10).collect();
    let three = tree.search(&3).unwrap();
    assert_eq!(tree.delete(three), Ok(3));
    assert_eq!(tree.delete(three), Err(Error::StaleHandle));
    assert_eq!(tree.get(three), None);
    assert_eq!(tree.replace(three, 3), Err((Error::StaleHandle, 3)));

    let seven = tree.search(&7).unwrap();
    tree.clean();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);

    // a new node may reuse the slot, but not the generation
    tree.insert(7);
    assert_eq!(tree.get(seven), None);
    assert_eq!(tree.delete(seven), Err(Error::StaleHandle));
    assert_eq!(tree.len(), 1);
}

#[test]
fn clean_then_insert_gives_a_lone_root() {
    let mut tree: RbTree<i32> = (0..100).collect();
    tree.clean().insert(42);

    let root = tree.root().unwrap();
    let node = tree.node(root).unwrap();
    assert!(node.is_black());
    assert_eq!((node.parent(), node.left(), node.right()), (None, None, None));
    tree.validate().unwrap();
}

#[test]
fn successor_handle_survives_a_two_child_delete() {
    let mut tree: RbTree<i32> = (0..31).collect();
    let root = tree.root().unwrap();
    let value = *tree.get(root).unwrap();
    let successor = tree.next(root).unwrap();
    let successor_value = *tree.get(successor).unwrap();

    assert_eq!(tree.delete(root), Ok(value));
    tree.validate().unwrap();
    assert_eq!(tree.get(successor), Some(&successor_value));
    assert_eq!(tree.search(&successor_value), Some(successor));
}

#[test]
fn random_deletes_keep_invariants() {
    initialize_logging();
    let mut rng = StdRng::seed_from_u64(42);
    let mut values: Vec<u32> = (0..2000).collect();
    values.shuffle(&mut rng);

    let mut tree = RbTree::with_argument(SubtreeSize);
    tree.extend(values.iter().copied());
    tree.validate().unwrap();

    values.shuffle(&mut rng);
    let (gone, kept) = values.split_at(1200);
    for v in gone {
        assert_eq!(tree.delete_value(v), Some(*v));
    }
    tree.validate().unwrap();
    assert_eq!(tree.len(), kept.len());
    assert!(gone.iter().all(|v| !tree.contains(v)));
    assert!(kept.iter().all(|v| tree.contains(v)));

    let mut sorted = kept.to_vec();
    sorted.sort();
    assert!(tree.iter().eq(sorted.iter()));
}

#[test]
fn descending_and_closure_comparators() {
    let tree: RbTree<i32, Descending> = {
        let mut tree = RbTree::with_compare(Descending);
        tree.extend(0..10);
        tree
    };
    assert!(tree.iter().copied().eq((0..10).rev()));
    tree.validate().unwrap();

    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut tree: RbTree<&str, _> = RbTree::with_compare(by_len);
    tree.extend(["ccc", "a", "bb", "dd"]);
    // "dd" has the same length as "bb" and is rejected
    assert_eq!(tree.len(), 3);
    assert!(tree.iter().copied().eq(["a", "bb", "ccc"]));
    assert_eq!(tree.search_by(|x| 2.cmp(&x.len())).and_then(|at| tree.get(at)), Some(&"bb"));
}

// none of this needs the comparator
fn shape<T: Copy, C, A: Argument<T>>(tree: &RbTree<T, C, A>) -> (usize, Option<T>, Vec<T>) {
    let root = tree.root().and_then(|r| tree.get(r)).copied();
    let mut walked = Vec::with_capacity(tree.len());
    tree.walk(|_, node| {
        walked.push(*node.value());
        true
    });
    assert_eq!(walked.len(), tree.iter().len());
    assert_eq!(tree.is_empty(), walked.is_empty());
    (tree.len(), root, walked)
}

#[test]
fn reading_does_not_need_a_comparator_bound() {
    let by_abs = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
    let mut tree: RbTree<i32, _> = RbTree::with_compare(by_abs);
    tree.extend([-3, 1, -2, 4]);

    let (len, root, walked) = shape(&tree);
    assert_eq!(len, 4);
    assert!(root.is_some());
    assert_eq!(walked, [1, -2, -3, 4]);
    assert_eq!(tree.preorder_first(), tree.root());

    tree.clean();
    assert_eq!(shape(&tree), (0, None, Vec::new()));
}

#[test]
fn structural_argument_survives_random_mutations() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use rand::Rng;

    initialize_logging();
    // a hash of the whole subtree shape, so any missed recomputation shows up
    let digest = argument::from_fn(
        |v: &u16, l: Option<&u64>, r: Option<&u64>| {
            let mut hasher = DefaultHasher::new();
            (v, l, r).hash(&mut hasher);
            hasher.finish()
        },
        |a: &u64, b: &u64| a == b,
    );
    let mut tree = RbTree::with_argument(digest);
    let mut rng = StdRng::seed_from_u64(0xd1ce);

    for _ in 0..20_000 {
        let v = rng.gen_range(0..512u16);
        match rng.gen_range(0..3) {
            0 => {
                tree.insert(v);
            }
            1 => {
                tree.delete_value(&v);
            }
            _ => {
                if let Some(at) = tree.search(&v) {
                    assert_eq!(tree.delete(at), Ok(v));
                }
            }
        }
        tree.validate().unwrap();
    }
}

#[test]
fn debug_lists_values_in_order() {
    let tree: RbTree<i32> = [5, 1, 3].into_iter().collect();
    assert_eq!(format!("{tree:?}"), "{1, 3, 5}");
    assert_eq!(format!("{:?}", RbTree::<i32>::default()), "{}");
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    Delete(u8),
    Replace(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Insert),
        2 => any::<u8>().prop_map(Op::Delete),
        1 => any::<u8>().prop_map(Op::Replace),
    ]
}

proptest! {
    #[test]
    fn matches_a_sorted_vec(ops in prop::collection::vec(op(), 1..300)) {
        let mut tree = RbTree::with_argument(SubtreeSize);
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    let (_, inserted) = tree.insert(v);
                    let pos = model.binary_search(&v);
                    prop_assert_eq!(inserted, pos.is_err());
                    if let Err(pos) = pos {
                        model.insert(pos, v);
                    }
                }
                Op::Delete(v) => {
                    let expected = model.binary_search(&v).ok().map(|pos| model.remove(pos));
                    prop_assert_eq!(tree.delete_value(&v), expected);
                }
                Op::Replace(v) => {
                    if let Some(at) = tree.search(&v) {
                        prop_assert_eq!(tree.replace(at, v), Ok(v));
                    }
                }
            }
            prop_assert!(tree.validate().is_ok());
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert!(tree.iter().eq(model.iter()));
        for (k, v) in model.iter().enumerate() {
            prop_assert_eq!(tree.count_less(v), k);
            prop_assert_eq!(tree.nth(k).and_then(|at| tree.get(at)), Some(v));
        }
    }

    #[test]
    fn comparator_decides_order(values in prop::collection::vec(any::<i16>(), 0..200)) {
        let mut tree: RbTree<i16, _> = RbTree::with_compare(|a: &i16, b: &i16| b.cmp(a));
        tree.extend(values.iter().copied());
        prop_assert!(tree.validate().is_ok());

        let mut expected = values.clone();
        expected.sort_by(|a, b| b.cmp(a));
        expected.dedup();
        prop_assert!(tree.iter().eq(expected.iter()));
    }
}
