use grappe::{Direction, Error, Tree};
use pretty_assertions::assert_eq;

#[test]
fn mixed_inserts_stay_balanced() {
    let mut tree = Tree::new();
    for k in [10, 20, 30, 15, 25, 5] {
        tree.insert(k, ());
        assert!(tree.verify(), "after inserting {k}");
    }
    assert_eq!(&5, tree.min_key().unwrap());
    assert_eq!(&30, tree.max_key().unwrap());
    assert_eq!(6, tree.len());
}

#[test]
fn duplicate_key_removed_by_value() {
    let mut tree = Tree::new();
    tree.insert(1, "x");
    tree.insert(9, "y");
    let before = tree.len();
    tree.insert(7, "a");
    tree.insert(7, "b");
    assert_eq!(before + 2, tree.len());

    assert_eq!(Some((7, "a")), tree.remove_entry(&7, &"a"));
    assert_eq!(before + 1, tree.len());
    let found = tree.search(&7).unwrap();
    assert_eq!((&7, &"b"), (found.key(), found.value()));
    assert_eq!(
        vec![(&7, &"b")],
        tree.iter().filter(|(k, _)| **k == 7).collect::<Vec<_>>()
    );
    assert_eq!(None, tree.remove_entry(&7, &"a"));
    assert!(tree.verify());
}

#[test]
fn hundred_ascending_then_deleted_ascending() {
    let mut tree = Tree::new();
    for k in 0..100 {
        tree.insert(k, k);
        assert!(tree.verify());
    }
    for k in 0..100 {
        assert_eq!(Some((k, k)), tree.remove(&k));
        assert!(tree.verify(), "after removing {k}");
    }
    assert!(tree.is_empty());
    assert_eq!(0, tree.len());
    assert!(tree.root().is_none());
}

#[test]
fn hundred_ascending_then_deleted_descending() {
    let mut tree: Tree<i32, ()> = (0..100).map(|k| (k, ())).collect();
    for k in (0..100).rev() {
        assert!(tree.remove(&k).is_some());
        assert!(tree.verify(), "after removing {k}");
    }
    assert!(tree.is_empty());
}

#[test]
fn empty_tree_min_max_errors() {
    let mut tree = Tree::<u8, u8>::new();
    assert!(matches!(tree.remove_min(), Err(Error::EmptyTree)));
    assert!(matches!(tree.remove_max(), Err(Error::EmptyTree)));
    assert!(matches!(tree.min(), Err(Error::EmptyTree)));
    assert!(matches!(tree.max(), Err(Error::EmptyTree)));
}

#[test]
fn remove_min_and_max_drain_in_order() {
    let mut tree: Tree<i32, i32> = [5, 1, 4, 2, 3].into_iter().map(|k| (k, -k)).collect();
    assert_eq!((1, -1), tree.remove_min().unwrap());
    assert_eq!((5, -5), tree.remove_max().unwrap());
    assert_eq!((2, -2), tree.remove_min().unwrap());
    assert_eq!((4, -4), tree.remove_max().unwrap());
    assert_eq!((3, -3), tree.remove_min().unwrap());
    assert!(tree.is_empty());
}

#[test]
fn heavy_duplicate_load() {
    let mut tree = Tree::new();
    for v in 0..200 {
        tree.insert(v % 3, v);
        assert!(tree.verify());
    }
    assert_eq!(200, tree.len());
    for v in 0..200 {
        assert!(tree.contains_entry(&(v % 3), &v), "missing {v}");
    }
    // Remove every other value by exact entry.
    for v in (0..200).step_by(2) {
        assert_eq!(Some((v % 3, v)), tree.remove_entry(&(v % 3), &v));
        assert!(tree.verify());
    }
    assert_eq!(100, tree.len());
    for v in 0..200 {
        assert_eq!(v % 2 == 1, tree.contains_entry(&(v % 3), &v));
    }
}

#[test]
fn enumerators_are_ordered() {
    let tree: Tree<i32, usize> = [3, 1, 3, 2, 1, 3]
        .into_iter()
        .enumerate()
        .map(|(i, k)| (k, i))
        .collect();
    let up: Vec<i32> = tree.nodes(Direction::Ascending).map(|n| *n.key()).collect();
    let down: Vec<i32> = tree.nodes(Direction::Descending).map(|n| *n.key()).collect();
    assert_eq!(vec![1, 1, 2, 3, 3, 3], up);
    assert_eq!(vec![3, 3, 3, 2, 1, 1], down);
    assert_eq!(6, tree.values_in(Direction::Descending).count());
}
