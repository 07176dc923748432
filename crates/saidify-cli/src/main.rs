//! saidify CLI - populate, verify and publish self-addressed JSON Schemas.

use clap::{Args, Parser, Subcommand};
use saidify_canonical::{DigestCode, Serialization};
use saidify_core::PopulateOptions;
use saidify_publish::DEFAULT_PUBLISH_ROOT;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{canonicalize, generate, said, verify};

#[derive(Parser)]
#[command(name = "saidify")]
#[command(about = "Compute, embed and publish SAIDs in JSON Schema documents")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// How SAIDs are computed.
#[derive(Args, Debug, Clone)]
struct SaidArgs {
    /// Field that receives the SAID at every site
    #[arg(long, default_value = "$id")]
    label: String,
    /// Digest code: E (blake3-256) or I (sha2-256)
    #[arg(long, default_value = "E")]
    code: DigestCode,
    /// Byte layout digested: compact or jcs
    #[arg(long, default_value = "compact")]
    serialization: Serialization,
}

impl SaidArgs {
    fn options(&self) -> PopulateOptions {
        PopulateOptions {
            label: self.label.clone(),
            code: self.code,
            serialization: self.serialization,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a schema's SAIDs, rewrite it and publish a content-addressed copy
    Generate {
        /// Schema file, rewritten in place
        schema: PathBuf,
        /// Legal-entity schema SAID written to the second edge variant before digesting
        #[arg(long)]
        le: Option<String>,
        /// Directory content-addressed copies are written under
        #[arg(long, default_value = DEFAULT_PUBLISH_ROOT)]
        publish_root: PathBuf,
        /// Sync files to disk after writing
        #[arg(long)]
        sync: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        digest: SaidArgs,
    },
    /// Print a schema with its SAIDs populated, without writing anything
    Said {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Legal-entity schema SAID written to the second edge variant before digesting
        #[arg(long)]
        le: Option<String>,
        #[command(flatten)]
        digest: SaidArgs,
    },
    /// Verify every SAID in a schema or published artifact
    Verify {
        /// Schema file or `<publish-root>/<SAID>/index.json`
        path: PathBuf,
        /// Exit with error code if any SAID fails to verify
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        digest: SaidArgs,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Byte layout: compact or jcs
        #[arg(long, default_value = "compact")]
        serialization: Serialization,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            schema,
            le,
            publish_root,
            sync,
            json,
            digest,
        } => generate::run(schema, le, publish_root, sync, json, digest.options()),
        Commands::Said { input, le, digest } => said::run(input, le, digest.options()),
        Commands::Verify {
            path,
            strict,
            json,
            digest,
        } => verify::run(path, strict, json, digest.options()),
        Commands::Canonicalize {
            input,
            serialization,
        } => canonicalize::run(input, serialization),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
