use criterion::{criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng, XorShiftRng};
use rbtree_set::red_black_tree::RedBlackSet;
use std::collections::BTreeSet;

fn random_keys(batch_size: u32) -> Vec<u32> {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    (0..batch_size).map(|_| rng.gen_range(0, batch_size)).collect()
}

fn bench_red_black_set_batch(c: &mut Criterion) {
    for batch_size in &[10, 100, 1_000, 10_000] {
        let keys = random_keys(*batch_size);
        c.bench_function(&format!("bench red_black_set batch {}", batch_size), move |b| {
            b.iter(|| {
                let mut set = RedBlackSet::new();
                for key in &keys {
                    set.insert(*key);
                }
                for key in &keys {
                    set.remove(key);
                }
                set
            })
        });
    }
}

fn bench_btreeset_batch(c: &mut Criterion) {
    for batch_size in &[10, 100, 1_000, 10_000] {
        let keys = random_keys(*batch_size);
        c.bench_function(&format!("bench btreeset batch {}", batch_size), move |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for key in &keys {
                    set.insert(*key);
                }
                for key in &keys {
                    set.remove(key);
                }
                set
            })
        });
    }
}

criterion_group!(benches, bench_red_black_set_batch, bench_btreeset_batch);
criterion_main!(benches);
