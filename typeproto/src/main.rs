//! typeproto CLI - proto schema generator
//!
//! Usage: `typeproto <description.xml> <RootType> [-o <out.proto>]`
//!
//! The document goes to stdout unless an output file is given. Logs go to
//! stderr and are controlled through `RUST_LOG`.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use typeproto::codegen::{Generator, GeneratorConfig, Indent, ReferenceStyle};
use typeproto::schema::{TypeCatalog, parse_description};

#[derive(Debug, Parser)]
#[command(name = "typeproto")]
#[command(author, version, about = "Generate proto schemas from type descriptions", long_about = None)]
struct Cli {
    /// Path to the XML type description
    description: PathBuf,

    /// Root type name, simple or qualified
    root: String,

    /// Output file (default: print to the console)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit proto2 syntax and scalar keywords
    #[arg(long)]
    proto2: bool,

    /// Indent with this many spaces instead of tabs
    #[arg(long)]
    spaces: Option<usize>,

    /// Reference collection containers and name nested-message fields after their type
    #[arg(long)]
    legacy_references: bool,

    /// Skip the operation parameter messages
    #[arg(long)]
    no_operations: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut builder = GeneratorConfig::builder().operations(!self.no_operations);
        if self.proto2 {
            builder = builder.proto2();
        }
        if let Some(spaces) = self.spaces {
            builder = builder.indent(Indent::Spaces(spaces));
        }
        if self.legacy_references {
            builder = builder.reference_style(ReferenceStyle::Legacy);
        }
        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let xml = std::fs::read_to_string(&cli.description)
        .with_context(|| format!("failed to read {}", cli.description.display()))?;
    let description = parse_description(&xml)
        .with_context(|| format!("failed to parse {}", cli.description.display()))?;
    let catalog = TypeCatalog::from_description(&description)?;

    let mut generator = Generator::for_name(&catalog, &cli.root, cli.config())?;
    let document = generator.generate()?;

    match &cli.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, document) {
                error!(
                    "Failed to write {}: {}; printing the document instead",
                    path.display(),
                    err
                );
                println!("{document}");
                return Err(err).with_context(|| format!("failed to write {}", path.display()));
            }
            info!("Wrote {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}
