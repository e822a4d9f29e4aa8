use compare::natural;
use quickcheck::{quickcheck, Arbitrary, Gen};

use super::*;

fn check_structure<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => {
            let left = check_structure(&node.left);
            let right = check_structure(&node.right);
            assert_eq!(node.height, 1 + std::cmp::max(left, right));
            assert!(left.abs_diff(right) <= 1);
            node.height
        }
    }
}

fn assert_invariants<K, V>(link: &Link<K, V>) where K: Clone + Ord {
    check_structure(link);
    let keys = in_order_keys(link);
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
}

fn count_nodes<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| 1 + count_nodes(&node.left) + count_nodes(&node.right))
}

fn in_order_keys<K, V>(link: &Link<K, V>) -> Vec<K> where K: Clone {
    let mut keys = Vec::new();
    let exhausted: Option<()> = find_map::<Left, _, _, _, _>(link, &mut |key, _| {
        keys.push(key.clone());
        None
    });
    assert!(exhausted.is_none());
    keys
}

fn key_of<K, V>(link: &Link<K, V>) -> Option<&K> {
    link.key_value().map(|e| e.0)
}

/// An operation on a tree of `u8` keys.
#[derive(Clone, Debug)]
enum Op {
    Insert(u8),
    InsertMulti(u8),
    Remove(u8),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Op {
        match *gen.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(u8::arbitrary(gen)),
            1 => Op::InsertMulti(u8::arbitrary(gen)),
            _ => Op::Remove(u8::arbitrary(gen)),
        }
    }
}

#[test]
fn random_ops_preserve_invariants() {
    fn check(ops: Vec<Op>) -> bool {
        let cmp = natural();
        let mut root: Link<u8, u32> = None;
        let mut len: usize = 0;

        for (i, op) in ops.into_iter().enumerate() {
            match op {
                Op::Insert(key) => {
                    if insert(&mut root, &cmp, key, i as u32).is_none() { len += 1; }
                }
                Op::InsertMulti(key) => {
                    insert_multi(&mut root, &cmp, key, i as u32);
                    len += 1;
                }
                Op::Remove(key) => {
                    if remove(&mut root, &cmp, &key).is_some() { len -= 1; }
                }
            }

            assert_invariants(&root);
        }

        len == count_nodes(&root)
    }

    quickcheck(check as fn(Vec<Op>) -> bool);
}

#[test]
fn mixed_inserts_build_a_perfect_tree() {
    let cmp = natural();
    let mut root = None;

    for key in [4, 2, 6, 1, 3, 5, 7] {
        insert(&mut root, &cmp, key, ());
        assert_invariants(&root);
    }

    assert_eq!(root.height(), 3);
    assert_eq!(in_order_keys(&root), [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn ascending_inserts_rotate() {
    let cmp = natural();
    let mut root = None;

    for key in [1, 2, 3] {
        insert(&mut root, &cmp, key, ());
        assert_invariants(&root);
    }

    // the third insert triggers a single left rotation at the root
    assert_eq!(root.height(), 2);
    assert_eq!(key_of(&root), Some(&2));
    assert_eq!(in_order_keys(&root), [1, 2, 3]);
}

#[test]
fn removes_the_root_by_merging_its_children() {
    let cmp = natural();
    let mut root = None;

    for key in [5, 3, 8] {
        insert(&mut root, &cmp, key, ());
    }

    assert_eq!(remove(&mut root, &cmp, &5), Some((5, ())));
    assert_invariants(&root);
    assert_eq!(in_order_keys(&root), [3, 8]);
    assert!(get(&root, &cmp, &5).is_none());
}

#[test]
fn removing_an_absent_key_is_a_noop() {
    let cmp = natural();
    let mut root = None;

    for key in [2, 1, 3] {
        insert(&mut root, &cmp, key, ());
    }

    assert_eq!(remove(&mut root, &cmp, &9), None);
    assert_eq!(count_nodes(&root), 3);
    assert_eq!(in_order_keys(&root), [1, 2, 3]);
}

#[test]
fn duplicate_keys_are_kept_in_insertion_order() {
    let cmp = natural();
    let mut root: Link<&str, u32> = None;

    for value in [1, 2, 3] {
        insert_multi(&mut root, &cmp, "a", value);
        assert_invariants(&root);
    }

    insert_multi(&mut root, &cmp, "b", 4);

    assert_eq!(count_nodes(&root), 4);

    let mut entries = Vec::new();
    let exhausted: Option<()> = find_map::<Left, _, _, _, _>(&root, &mut |key, value| {
        entries.push((*key, *value));
        None
    });
    assert!(exhausted.is_none());
    assert_eq!(entries, [("a", 1), ("a", 2), ("a", 3), ("b", 4)]);
}

#[test]
fn get_descends_by_comparator() {
    let cmp = natural();
    let mut root = None;

    for key in [4, 2, 6, 1, 3, 5, 7] {
        insert(&mut root, &cmp, key, key * 10);
    }

    assert_eq!(get(&root, &cmp, &5).key_value(), Some((&5, &50)));
    assert!(get(&root, &cmp, &0).is_none());
    assert!(get(&root, &cmp, &8).is_none());
}

#[test]
fn extremum_descends_to_the_ends() {
    let cmp = natural();
    let mut root: Link<u32, ()> = None;

    assert!(extremum::<Left, _, _>(&root).is_none());
    assert!(extremum::<Right, _, _>(&root).is_none());

    for key in [4, 2, 6, 1, 7] {
        insert(&mut root, &cmp, key, ());
    }

    assert_eq!(key_of(extremum::<Left, _, _>(&root)), Some(&1));
    assert_eq!(key_of(extremum::<Right, _, _>(&root)), Some(&7));
}

#[test]
fn closest_walks_a_single_path_from_the_root() {
    let cmp = natural();
    let mut root = None;

    for key in [4, 2, 6, 1, 3, 5, 7] {
        insert(&mut root, &cmp, key, ());
    }

    for key in 1..7 {
        assert_eq!(key_of(closest::<Right, _, _, _, _>(&root, &cmp, &key, false)),
                   Some(&(key + 1)));
    }
    assert!(closest::<Right, _, _, _, _>(&root, &cmp, &7, false).is_none());

    for key in 2..=7 {
        assert_eq!(key_of(closest::<Left, _, _, _, _>(&root, &cmp, &key, false)),
                   Some(&(key - 1)));
    }
    assert!(closest::<Left, _, _, _, _>(&root, &cmp, &1, false).is_none());

    // inclusive hits resolve to the probe itself
    assert_eq!(key_of(closest::<Right, _, _, _, _>(&root, &cmp, &4, true)), Some(&4));
    assert_eq!(key_of(closest::<Left, _, _, _, _>(&root, &cmp, &4, true)), Some(&4));

    // probes between and beyond the stored keys
    assert_eq!(key_of(closest::<Right, _, _, _, _>(&root, &cmp, &0, false)), Some(&1));
    assert_eq!(key_of(closest::<Left, _, _, _, _>(&root, &cmp, &9, false)), Some(&7));
    assert!(closest::<Right, _, _, _, _>(&root, &cmp, &8, true).is_none());
}

#[test]
fn find_map_stops_at_the_first_match() {
    let cmp = natural();
    let mut root = None;

    for key in [4, 2, 6, 1, 3, 5, 7] {
        insert(&mut root, &cmp, key, ());
    }

    let mut visited = Vec::new();
    let found = find_map::<Left, _, _, _, _>(&root, &mut |key, _| {
        visited.push(*key);
        if *key == 4 { Some(*key) } else { None }
    });

    assert_eq!(found, Some(4));
    assert_eq!(visited, [1, 2, 3, 4]);

    let mut visited = Vec::new();
    let found = find_map::<Right, _, _, _, _>(&root, &mut |key, _| {
        visited.push(*key);
        if *key == 4 { Some(*key) } else { None }
    });

    assert_eq!(found, Some(4));
    assert_eq!(visited, [7, 6, 5, 4]);
}

#[test]
fn replacing_a_value_keeps_the_tree_unchanged() {
    let cmp = natural();
    let mut root = None;

    for key in [2, 1, 3] {
        insert(&mut root, &cmp, key, 0);
    }

    assert_eq!(insert(&mut root, &cmp, 1, 7), Some(0));
    assert_eq!(count_nodes(&root), 3);
    assert_eq!(get(&root, &cmp, &1).key_value(), Some((&1, &7)));
}
