//! merkle-demo: build a tree over generated labels and check it.
//!
//! Exits 0 when the tree validates and 1 when it does not.

use std::process::ExitCode;

use anyhow::{Context, Result};
use balanced_merkle_tree::{
    Blake3Hash, DoubleSha256Hash, HashMethod, MerkleTree, MerkleTreeOptions, Sha256Hash,
    DEFAULT_PARALLEL_THRESHOLD,
};
use clap::{Parser, ValueEnum};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "merkle-demo")]
#[command(about = "Build a balanced merkle tree over labeled items and validate it")]
#[command(version)]
struct Cli {
    /// Number of leaves to generate
    #[arg(short, long, default_value_t = 33)]
    count: usize,

    /// Prefix of each leaf value; the leaf index is appended
    #[arg(short, long, default_value = "node #")]
    label: String,

    /// Hash function for leaves and internal nodes
    #[arg(long = "hash", value_enum, default_value_t = HashAlgorithm::Sha256)]
    algorithm: HashAlgorithm,

    /// Build on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Node count below which a parallel build stops forking
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HashAlgorithm {
    Sha256,
    DoubleSha256,
    Blake3,
}

impl HashAlgorithm {
    fn hasher(self) -> Box<dyn HashMethod + Send + Sync> {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256Hash),
            HashAlgorithm::DoubleSha256 => Box::new(DoubleSha256Hash),
            HashAlgorithm::Blake3 => Box::new(Blake3Hash),
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let leaves: Vec<String> = (0..cli.count)
        .map(|i| format!("{}{}", cli.label, i))
        .collect();
    let options = MerkleTreeOptions {
        parallel: cli.parallel,
        parallel_threshold: cli.parallel_threshold,
    };

    let tree = MerkleTree::from_leaves_with_options(leaves, cli.algorithm.hasher(), &options)
        .with_context(|| format!("Failed to build a tree over {} leaves", cli.count))?;
    info!(
        "Tree has {} leaves and height {}",
        tree.leaf_count(),
        tree.height()
    );
    println!("Root: {}", tree.root_hex());

    let valid = match tree.validate() {
        Ok(()) => true,
        Err(mismatch) => {
            warn!("{}", mismatch);
            false
        }
    };
    println!("The tree is {}valid", if valid { "" } else { "not " });
    Ok(valid)
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let valid = run(Cli::parse())?;
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
