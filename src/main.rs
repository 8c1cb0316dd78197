//! merkle-audit CLI - build Merkle trees, derive audit trails and verify proofs
//!
//! Output is JSON by default so the commands can be chained: the trail
//! printed by `trail` is what `verify --trail` reads back.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use merkle_audit::{
    verify_proof, viz, Algorithm, AuditTrail, Chunker, Config, Digest, HashPrimitive, HexJoin,
    MerkleTree, Sha256,
};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Sentence used by the `demo` command
const DEMO_DATA: &str =
    "The quick brown fox jumps over the lazy dog who was sleeping under the oak tree";

/// Root of [`DEMO_DATA`] under SHA-256 with hex-joined parents, as published
const DEMO_TRUSTED_ROOT: &str = "bfddffb24e5f62ca7b157da0d88ed012545de73e1d3a5a5cc12838259cdc8109";

#[derive(Parser)]
#[command(name = "merkle-audit")]
#[command(about = "Build Merkle trees, derive audit trails and verify membership proofs")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Path to a JSON config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hash algorithm (sha256 or blake3)
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Hash parents over the hex text of their children
    #[arg(long)]
    hex_join: bool,

    /// Split input on this delimiter instead of whitespace
    #[arg(long)]
    delimiter: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
struct InputArgs {
    /// Input text (reads stdin when neither DATA nor --file is given)
    data: Option<String>,

    /// Read input text from a file
    #[arg(long, conflicts_with = "data")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree and print its root hash
    Root {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the tree structure
    Show {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Derive the audit trail for one chunk
    Trail {
        #[command(flatten)]
        input: InputArgs,
        /// The chunk to prove (first matching leaf)
        #[arg(long, conflicts_with = "index", required_unless_present = "index")]
        chunk: Option<String>,
        /// Leaf position to prove
        #[arg(long)]
        index: Option<usize>,
    },

    /// Verify a chunk against a trusted root using an audit trail
    Verify {
        /// Trusted root hash (hex)
        #[arg(long)]
        root: String,
        /// The chunk to verify
        #[arg(long, conflicts_with = "leaf", required_unless_present = "leaf")]
        chunk: Option<String>,
        /// Leaf hash to verify (hex), instead of a chunk
        #[arg(long)]
        leaf: Option<String>,
        /// Path to the audit trail JSON, or "-" for stdin
        #[arg(long)]
        trail: PathBuf,
    },

    /// Walk through building, proving and verifying a sample sentence
    Demo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("merkle_audit=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let primitive = config.primitive();
    tracing::debug!(primitive = primitive.name(), "using hash primitive");

    match &cli.command {
        Commands::Root { input } => {
            let tree = build_tree(input, &config, primitive.as_ref())?;
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash().to_hex(),
                    "leaves": tree.len(),
                    "height": tree.height(),
                    "algorithm": primitive.name()
                }),
            );
        }

        Commands::Show { input } => {
            let tree = build_tree(input, &config, primitive.as_ref())?;
            let rendered = viz::render(&tree);
            match cli.format {
                OutputFormat::Text => print!("{}", rendered),
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({
                        "root": tree.root_hash().to_hex(),
                        "tree": rendered.lines().collect::<Vec<_>>()
                    }),
                ),
            }
        }

        Commands::Trail {
            input,
            chunk,
            index,
        } => {
            let tree = build_tree(input, &config, primitive.as_ref())?;
            let (position, trail) = match (chunk, index) {
                (_, Some(index)) => (*index, tree.audit_trail_at(*index)?),
                (Some(chunk), None) => {
                    let leaf = primitive.hash(chunk.as_bytes());
                    let trail = tree
                        .audit_trail(&leaf)
                        .with_context(|| format!("Chunk not found in input: {}", chunk))?;
                    (tree.position_of(&leaf).unwrap_or_default(), trail)
                }
                (None, None) => anyhow::bail!("Either --chunk or --index is required"),
            };
            let leaf = tree
                .leaf(position)
                .map(|leaf| leaf.hash().to_hex())
                .unwrap_or_default();
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash().to_hex(),
                    "index": position,
                    "leaf": leaf,
                    "trail": trail
                }),
            );
        }

        Commands::Verify {
            root,
            chunk,
            leaf,
            trail,
        } => {
            let trusted_root = Digest::from_hex(root)?;
            let leaf_hash = match (chunk, leaf) {
                (_, Some(hex)) => Digest::from_hex(hex)?,
                (Some(chunk), None) => primitive.hash(chunk.as_bytes()),
                (None, None) => anyhow::bail!("Either --chunk or --leaf is required"),
            };
            let trail = read_trail(trail)?;
            let verified = verify_proof(&trusted_root, &leaf_hash, &trail, primitive.as_ref())?;
            output(
                &cli.format,
                &serde_json::json!({
                    "verified": verified,
                    "root": trusted_root.to_hex(),
                    "leaf": leaf_hash.to_hex()
                }),
            );
            if !verified {
                std::process::exit(1);
            }
        }

        Commands::Demo => run_demo(&cli.format)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if cli.hex_join {
        config.hex_join = true;
    }
    if let Some(delimiter) = &cli.delimiter {
        config.chunker = Chunker::Delimiter(delimiter.clone());
    }
    Ok(config)
}

fn read_input(input: &InputArgs) -> anyhow::Result<String> {
    if let Some(data) = &input.data {
        return Ok(data.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn build_tree(
    input: &InputArgs,
    config: &Config,
    primitive: &dyn HashPrimitive,
) -> anyhow::Result<MerkleTree> {
    let text = read_input(input)?;
    let chunks = config.chunker.chunk(&text);
    Ok(MerkleTree::build(chunks, primitive)?)
}

fn read_trail(path: &Path) -> anyhow::Result<AuditTrail> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    // Accept either a bare trail or the object printed by `trail`
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let trail = match value.get("trail") {
        Some(inner) => inner.to_string(),
        None => content,
    };
    Ok(AuditTrail::from_json(&trail)?)
}

fn run_demo(format: &OutputFormat) -> anyhow::Result<()> {
    let primitive = HexJoin::new(Sha256);
    let chunks = Chunker::Whitespace.chunk(DEMO_DATA);
    let tree = MerkleTree::build(chunks, &primitive)?;
    let trusted_root = Digest::from_hex(DEMO_TRUSTED_ROOT)?;

    let brown = primitive.hash(b"brown");
    let trail = tree.audit_trail(&brown)?;

    let checks: Vec<_> = ["brown", "jimp5"]
        .into_iter()
        .map(|chunk| -> anyhow::Result<serde_json::Value> {
            let leaf = primitive.hash(chunk.as_bytes());
            let verified = verify_proof(&trusted_root, &leaf, &trail, &primitive)?;
            Ok(serde_json::json!({ "chunk": chunk, "verified": verified }))
        })
        .collect::<anyhow::Result<_>>()?;

    if *format == OutputFormat::Text {
        print!("{}", viz::render(&tree));
    }
    output(
        format,
        &serde_json::json!({
            "root": tree.root_hash().to_hex(),
            "trusted_root": trusted_root.to_hex(),
            "trail_for": "brown",
            "trail": trail,
            "checks": checks
        }),
    );
    Ok(())
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            );
        }
    }
}
