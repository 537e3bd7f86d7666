extern crate grappe;

use criterion::{Criterion, criterion_group, criterion_main};

fn insert(c: &mut Criterion) {
    c.bench_function("grappe_insert", |b| {
        b.iter(|| {
            let mut tree = grappe::Tree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert(k, ());
            }
            tree
        })
    });
    c.bench_function("grappe_insert_duplicates", |b| {
        b.iter(|| {
            let mut tree = grappe::Tree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert(k % 4, ());
            }
            tree
        })
    });
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<usize, ()>::new();
            for k in 0..100 {
                tree.insert(k, ());
            }
            tree
        })
    });
}

fn search(c: &mut Criterion) {
    let tree: grappe::Tree<usize, usize> = (0..1000).map(|k| (k % 100, k)).collect();
    c.bench_function("grappe_search_repeated", |b| {
        b.iter(|| {
            for _ in 0..100 {
                std::hint::black_box(tree.search(&42));
            }
        })
    });
    let uncached: grappe::Tree<usize, usize> = {
        let mut t = grappe::Tree::with_config(grappe::Config::new().search_cache(false));
        t.extend((0..1000).map(|k| (k % 100, k)));
        t
    };
    c.bench_function("grappe_search_repeated_uncached", |b| {
        b.iter(|| {
            for _ in 0..100 {
                std::hint::black_box(uncached.search(&42));
            }
        })
    });
}

fn remove(c: &mut Criterion) {
    c.bench_function("grappe_fill_and_drain", |b| {
        b.iter(|| {
            let mut tree: grappe::Tree<usize, ()> = (0..100).map(|k| (k, ())).collect();
            while tree.pop_first().is_some() {}
        })
    });
}

criterion_group!(benches, insert, search, remove);
criterion_main!(benches);
