use std::path::PathBuf;
use std::process::ExitCode;

use ast::Module;
use clap::{Parser, ValueEnum};
use compiler::{Ast, CompileOptions};
use tracing_subscriber::EnvFilter;

/// How far to take the script before printing it.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// The tree exactly as parsed.
    Ast,
    /// After compound statements were flattened into temporaries.
    Rewritten,
    /// After types were resolved.
    Resolved,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input script
    #[arg(short, long)]
    input: PathBuf,
    /// Which stage of the tree to print to stdout.
    #[arg(short, long, value_enum, default_value_t = Emit::Resolved)]
    emit: Emit,
    /// Reserved terminal output variable. Repeat to reserve several; defaults to out0..out3.
    #[arg(short, long)]
    reserved: Vec<String>,
    /// Fixed-point passes a block may take during type resolution.
    #[arg(long)]
    max_passes: Option<usize>,
    /// Log every phase to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read {}: {}", args.input.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut options = CompileOptions::default();
    if !args.reserved.is_empty() {
        options = options.with_reserved(args.reserved);
    }
    if let Some(max_passes) = args.max_passes {
        options = options.with_max_passes(max_passes);
    }

    tracing::debug!(input = %args.input.display(), emit = ?args.emit, "compiling script");
    let mut tree = Ast::new(options);
    tree.generate(&source);
    match args.emit {
        Emit::Ast => {}
        Emit::Rewritten => tree.rewrite(),
        Emit::Resolved => tree.resolve(),
    }

    if let Some(root) = tree.root() {
        print!("{}", Module::new(root.clone()));
    }

    for diagnostic in tree.diagnostics().iter() {
        eprintln!("{}", diagnostic);
    }

    if tree.is_valid() && tree.diagnostics().is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
