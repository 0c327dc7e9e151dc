use assert_matches::assert_matches;

use super::*;
use crate::{Blake3Hasher, build, test_utils::sample_leaves};

#[test]
fn test_step_apply_orders_operands() {
    let current = Sha256Hasher::hash(b"current");
    let sibling = Sha256Hasher::hash(b"sibling");

    assert_eq!(
        ProofStep::Right(sibling).apply::<Sha256Hasher>(&current),
        Sha256Hasher::hash_pair(&current, &sibling)
    );
    assert_eq!(
        ProofStep::Left(sibling).apply::<Sha256Hasher>(&current),
        Sha256Hasher::hash_pair(&sibling, &current)
    );
    assert_eq!(
        ProofStep::Duplicate.apply::<Sha256Hasher>(&current),
        Sha256Hasher::hash_pair(&current, &current)
    );
    assert_ne!(
        ProofStep::Left(sibling).apply::<Sha256Hasher>(&current),
        ProofStep::Right(sibling).apply::<Sha256Hasher>(&current)
    );
}

#[test]
fn test_step_accessors() {
    let sibling = Blake3Hasher::hash(b"s");
    assert_eq!(ProofStep::Left(sibling).sibling(), Some(&sibling));
    assert_eq!(ProofStep::Right(sibling).sibling(), Some(&sibling));
    assert_eq!(ProofStep::Duplicate.sibling(), None);
    assert!(ProofStep::Duplicate.is_duplicate());
    assert!(!ProofStep::Right(sibling).is_duplicate());
}

#[test]
fn test_siblings_skip_duplicates() {
    let a = Sha256Hasher::hash(b"a");
    let b = Sha256Hasher::hash(b"b");
    let proof = InclusionProof::from(vec![
        ProofStep::Right(a),
        ProofStep::Duplicate,
        ProofStep::Left(b),
    ]);
    assert_eq!(proof.len(), 3);
    assert_eq!(proof.siblings().copied().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(proof.clone().into_steps().len(), 3);
}

#[test]
fn test_generate_walks_every_level() {
    let leaves = sample_leaves(12);
    let tree = build(&leaves).expect("build");
    for index in 0..leaves.len() {
        let proof = InclusionProof::generate(&tree, index).expect("generate");
        assert_eq!(proof.len(), tree.depth());
        assert_eq!(
            proof.compute_root::<Sha256Hasher>(leaves[index].as_bytes()),
            tree.root()
        );
    }
}

#[test]
fn test_generate_marks_unpaired_node_as_duplicate() {
    // levels: 5, 3, 2, 1
    let leaves = sample_leaves(5);
    let tree = build(&leaves).expect("build");
    let proof = InclusionProof::generate(&tree, 4).expect("generate");
    let level2 = tree.level(2).expect("level 2");
    assert_eq!(
        proof.steps(),
        &[
            ProofStep::Duplicate,
            ProofStep::Duplicate,
            ProofStep::Left(level2[0]),
        ]
    );
}

#[test]
fn test_generate_single_leaf_is_empty() {
    let tree = build(&["only"]).expect("build");
    let proof = InclusionProof::generate(&tree, 0).expect("generate");
    assert!(proof.is_empty());
    assert_eq!(proof.compute_root::<Sha256Hasher>(b"only"), tree.root());
}

#[test]
fn test_generate_rejects_out_of_range_index() {
    let tree = build(&sample_leaves(2)).expect("build");
    assert_matches!(
        InclusionProof::generate(&tree, 7),
        Err(MerkleError::LeafIndexOutOfRange { index: 7, .. })
    );
}

#[test]
fn test_prove_by_value() {
    let leaves = sample_leaves(6);
    let tree = build(&leaves).expect("build");
    let proof = prove(&leaves, leaves[5].as_bytes()).expect("prove");
    assert_eq!(proof, tree.prove_index(5).expect("prove index"));
}

// ── Encoding ────────────────────────────────────────────────────────

#[test]
fn test_encode_decode_preserves_steps() {
    let leaves = sample_leaves(11);
    let tree = build(&leaves).expect("build");
    let proof = tree.prove_index(10).expect("prove");
    assert!(proof.steps().iter().any(ProofStep::is_duplicate));

    let bytes = proof.encode_to_vec().expect("encode");
    let decoded = InclusionProof::decode_from_slice(&bytes).expect("decode");
    assert_eq!(decoded, proof);
    assert_eq!(
        crate::verify(leaves[10].as_bytes(), &decoded, &tree.root()),
        Ok(true)
    );
}

#[test]
fn test_decode_rejects_garbage() {
    assert_matches!(
        InclusionProof::decode_from_slice(&[0xff, 0xff, 0xff]),
        Err(MerkleError::InvalidProof(_))
    );
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let proof = build(&sample_leaves(4))
        .expect("build")
        .prove_index(0)
        .expect("prove");
    let mut bytes = proof.encode_to_vec().expect("encode");
    bytes.push(0);
    assert_matches!(
        InclusionProof::decode_from_slice(&bytes),
        Err(MerkleError::InvalidProof(msg)) if msg.contains("trailing")
    );
}

#[test]
fn test_decode_rejects_overlong_proof() {
    let proof = InclusionProof::new(vec![ProofStep::Duplicate; MAX_PROOF_STEPS + 1]);
    let bytes = proof.encode_to_vec().expect("encode");
    assert_matches!(
        InclusionProof::decode_from_slice(&bytes),
        Err(MerkleError::InvalidProof(msg)) if msg.contains("steps")
    );
}
