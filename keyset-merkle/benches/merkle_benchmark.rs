use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keyset_merkle::{Blake3Hasher, MerkleTree, Sha256Hasher, TreeConfig};

/// Hex identifiers shaped like encoded public keys.
fn identifiers(count: u64) -> Vec<String> {
    (0..count)
        .map(|i| blake3::hash(&i.to_le_bytes()).to_hex().to_string())
        .collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("tree build");
        for size in [1_000u64, 10_000, 100_000] {
            let leaves = identifiers(size);
            group.bench_with_input(BenchmarkId::new("sha256", size), &leaves, |b, leaves| {
                b.iter(|| MerkleTree::<Sha256Hasher>::build(black_box(leaves)).expect("build"));
            });
            group.bench_with_input(BenchmarkId::new("blake3", size), &leaves, |b, leaves| {
                b.iter(|| MerkleTree::<Blake3Hasher>::build(black_box(leaves)).expect("build"));
            });
            group.bench_with_input(
                BenchmarkId::new("sha256 sequential", size),
                &leaves,
                |b, leaves| {
                    let config = TreeConfig::sequential();
                    b.iter(|| {
                        MerkleTree::<Sha256Hasher>::build_with_config(black_box(leaves), &config)
                            .expect("build")
                    });
                },
            );
        }
    }

    let leaves = identifiers(100_000);
    let tree = MerkleTree::<Sha256Hasher>::build(&leaves).expect("build");

    c.bench_function("prove by index", |b| {
        let mut index = 0;
        b.iter(|| {
            index = (index + 7919) % leaves.len();
            tree.prove_index(black_box(index)).expect("prove")
        });
    });

    c.bench_function("prove by value", |b| {
        let target = leaves[leaves.len() - 1].as_bytes();
        b.iter(|| tree.prove(black_box(target)).expect("prove"));
    });

    c.bench_function("verify", |b| {
        let root = tree.root();
        let proofs: Vec<_> = (0..1_000)
            .map(|i| {
                let index = (i * 97) % leaves.len();
                (index, tree.prove_index(index).expect("prove"))
            })
            .collect();
        let mut i = 0;
        b.iter(|| {
            let (index, proof) = &proofs[i % proofs.len()];
            i += 1;
            proof
                .verify::<Sha256Hasher>(leaves[*index].as_bytes(), &root)
                .expect("verify")
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
