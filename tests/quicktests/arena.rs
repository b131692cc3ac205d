use ordered_tree::arena::{NodeId, Tree};

use std::collections::HashSet;

use crate::Op;

/// Checks the parent-consistency invariant: every child's parent link points
/// back at the node that owns it, and the root has no parent. This is
/// independent of the ordering that `is_bst` verifies.
fn parents_consistent<K>(tree: &Tree<K>) -> bool {
    fn walk<K>(tree: &Tree<K>, id: NodeId) -> bool {
        let left_ok = tree
            .left(id)
            .map_or(true, |left| tree.parent(left) == Some(id) && walk(tree, left));
        let right_ok = tree
            .right(id)
            .map_or(true, |right| tree.parent(right) == Some(id) && walk(tree, right));
        left_ok && right_ok
    }

    match tree.root() {
        Some(root) => tree.parent(root).is_none() && walk(tree, root),
        None => true,
    }
}

/// Both structural invariants at once: ordering over the full key range plus
/// parent-consistency.
fn valid(tree: &Tree<i8>) -> bool {
    let ordered = tree
        .root()
        .map_or(true, |root| tree.is_bst(root, &i8::MIN, &i8::MAX));
    ordered && parents_consistent(tree)
}

/// Deletes a node whose replacement (the right subtree's minimum) has a right
/// child of its own, so the unlink recurses twice and every level of the
/// splice has to re-link children and parents.
#[test]
fn deep_replacement_splice_relinks_all_levels() {
    let mut tree = Tree::with_root(10);
    for value in [5, 20, 15, 25, 16, 17] {
        tree.insert(value);
    }

    let root = tree.root().unwrap();
    let replacement = tree.remove(root).unwrap();

    assert_eq!(*tree.value(replacement), 15);
    assert_eq!(tree.root(), Some(replacement));
    assert_eq!(tree.to_vec(), vec![5, 15, 16, 17, 20, 25]);
    assert!(parents_consistent(&tree));
    assert!(tree.is_bst(replacement, &i32::MIN, &i32::MAX));

    // 16 took 15's old place under 20, and 17 took 16's.
    let twenty = tree.search(&20).unwrap();
    let sixteen = tree.search(&16).unwrap();
    assert_eq!(tree.left(twenty), Some(sixteen));
    assert_eq!(tree.right(sixteen), tree.search(&17));
}

quickcheck::quickcheck! {
    fn in_order_is_sorted(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        let mut expected = xs;
        expected.sort_unstable();
        tree.to_vec() == expected && valid(&tree)
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        xs.iter().all(|x| tree.search(x).map(|id| tree.value(id)) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.search(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        // Each delete removes one occurrence, so track a multiset.
        let mut expected = xs;
        for delete in &deletes {
            match tree.search(delete) {
                Some(id) => {
                    tree.remove(id);
                    match expected.iter().position(|x| x == delete) {
                        Some(pos) => {
                            expected.swap_remove(pos);
                        }
                        None => return false,
                    }
                }
                None => {
                    if expected.contains(delete) {
                        return false;
                    }
                }
            }
        }

        expected.sort_unstable();
        tree.len() == expected.len() && tree.to_vec() == expected && valid(&tree)
    }

    fn invariants_hold_after_every_op(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut size = 0usize;

        for op in &ops {
            match op {
                Op::Insert(value) => {
                    tree.insert(*value);
                    size += 1;
                }
                Op::Remove(value) => {
                    if let Some(id) = tree.search(value) {
                        tree.remove(id);
                        size -= 1;
                    }
                }
            }
            if tree.len() != size || !valid(&tree) {
                return false;
            }
        }
        true
    }

    fn predecessor_successor_match_sorted_order(xs: Vec<i8>) -> bool {
        // Distinct keys only: the ancestor walks compare strictly, so a
        // duplicate's neighbors are not its in-order neighbors.
        let mut tree = Tree::new();
        let mut seen = HashSet::new();
        for x in xs {
            if seen.insert(x) {
                tree.insert(x);
            }
        }

        let mut sorted: Vec<i8> = seen.into_iter().collect();
        sorted.sort_unstable();

        sorted.iter().enumerate().all(|(i, x)| {
            let id = match tree.search(x) {
                Some(id) => id,
                None => return false,
            };
            let pred = tree.predecessor(id).map(|p| *tree.value(p));
            let succ = tree.successor(id).map(|s| *tree.value(s));

            pred == i.checked_sub(1).map(|i| sorted[i]) && succ == sorted.get(i + 1).copied()
        })
    }
}
