//! Command-line driver for `keyset-merkle`.
//!
//! Builds a Merkle tree over a key set, proves membership of one key, then
//! checks the proof directly and through the native proof-system adapter.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use keyset_merkle::{
    Blake3Hasher, Digest, InclusionProof, MerkleHasher, MerkleTree, NativeAdapter,
    ProofStep, ProofSystemAdapter, Sha256Hasher,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "keyset-merkle")]
#[command(about = "Prove membership of one key in a Merkle-committed key set", long_about = None)]
struct Cli {
    /// Identifier to place in the tree (repeatable, order is kept)
    #[arg(short, long = "leaf", value_name = "ID")]
    leaves: Vec<String>,

    /// Number of synthetic identifiers to generate when no --leaf is given
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Identifier to prove
    #[arg(short, long, conflicts_with = "target_index")]
    target: Option<String>,

    /// Position of the identifier to prove
    #[arg(short = 'i', long, default_value_t = 0)]
    target_index: usize,

    /// Hash primitive
    #[arg(long, value_enum, default_value_t = HashChoice::Sha256)]
    hash: HashChoice,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HashChoice {
    Sha256,
    Blake3,
}

#[derive(Debug, Serialize)]
struct Report {
    hasher: &'static str,
    leaf_count: usize,
    depth: usize,
    target: String,
    root: Digest,
    proof: InclusionProof,
    verified: bool,
    attested: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let leaves = collect_leaves(&cli.leaves, cli.count)?;
    let target = resolve_target(&leaves, cli.target.as_deref(), cli.target_index)?;
    info!(leaves = leaves.len(), hash = ?cli.hash, "proving membership");

    let report = match cli.hash {
        HashChoice::Sha256 => run::<Sha256Hasher>(&leaves, &target)?,
        HashChoice::Blake3 => run::<Blake3Hasher>(&leaves, &target)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !(report.verified && report.attested) {
        bail!("membership proof for {} did not verify", report.target);
    }
    Ok(())
}

/// The explicit identifiers, or `count` random ones standing in for freshly
/// generated public keys.
fn collect_leaves(explicit: &[String], count: usize) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }
    if count == 0 {
        bail!("no identifiers: pass --leaf or a non-zero --count");
    }
    debug!(count, "generating synthetic identifiers");
    Ok((0..count)
        .map(|_| hex::encode(rand::random::<[u8; 32]>()))
        .collect())
}

fn resolve_target(leaves: &[String], target: Option<&str>, index: usize) -> Result<String> {
    match target {
        Some(target) => Ok(target.to_owned()),
        None => leaves.get(index).cloned().with_context(|| {
            format!(
                "target index {} out of range for {} identifiers",
                index,
                leaves.len()
            )
        }),
    }
}

fn run<H: MerkleHasher>(leaves: &[String], target: &str) -> Result<Report> {
    let tree = MerkleTree::<H>::build(leaves).context("building merkle tree")?;
    let statement = tree
        .statement_for(target.as_bytes())
        .with_context(|| format!("proving membership of {}", target))?;

    let verified = statement
        .proof()
        .verify::<H>(statement.leaf(), statement.public_root())?;

    let adapter = NativeAdapter::<H>::new();
    let attestation = adapter
        .prove(&statement)
        .context("attesting membership")?;
    let attested = adapter.verify(&statement, &attestation)?;

    Ok(Report {
        hasher: H::NAME,
        leaf_count: tree.leaf_count(),
        depth: tree.depth(),
        target: target.to_owned(),
        root: tree.root(),
        proof: statement.proof().clone(),
        verified,
        attested,
    })
}

fn print_report(report: &Report) {
    println!("hasher:   {}", report.hasher);
    println!("leaves:   {}", report.leaf_count);
    println!("root:     {}", report.root);
    println!("target:   {}", report.target);
    println!("proof:    {} steps", report.proof.len());
    for (level, step) in report.proof.steps().iter().enumerate() {
        match step {
            ProofStep::Left(sibling) => println!("  [{}] left      {}", level, sibling),
            ProofStep::Right(sibling) => println!("  [{}] right     {}", level, sibling),
            ProofStep::Duplicate => println!("  [{}] duplicate", level),
        }
    }
    println!("verified: {}", report.verified);
    println!("attested: {}", report.attested);
}
