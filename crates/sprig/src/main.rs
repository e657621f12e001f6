use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use sprig_db::{Diagnostic, RootDatabase, check_file, parse_file};
use sprig_errors::Renderer;
use sprig_grammar::{Grammar, MissingKind};
use sprig_inputs::File;
use sprig_syntax::SyntaxKind;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Lossless syntax trees for a Rust-like language")]
enum Options {
    /// Parse a source file and report its syntax errors.
    Parse {
        path: Utf8PathBuf,
        /// Print the syntax tree.
        #[arg(long)]
        tree: bool,
    },
    /// Check a grammar file against the syntax kind table.
    Grammar {
        path: Utf8PathBuf,
        /// Print the typed node definitions generated from the grammar.
        #[arg(long)]
        codegen: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    match Options::parse() {
        Options::Parse { path, tree } => parse(path, tree),
        Options::Grammar { path, codegen } => grammar(&path, codegen),
    }
}

/// Logs go to stderr, filtered by `SPRIG_LOG`.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SPRIG_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn parse(path: Utf8PathBuf, tree: bool) -> anyhow::Result<ExitCode> {
    let text = read(&path)?;
    let db = RootDatabase::default();
    let file = File::new(&db, path, text);

    if tree {
        print!("{}", parse_file(&db, file).syntax_node().debug_dump());
    }

    let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);
    let renderer = Renderer::styled();
    let path = file.path(&db).as_str();
    let text = file.text(&db);
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, path, text));
    }

    tracing::info!(count = diagnostics.len(), "checked `{path}`");
    Ok(if diagnostics.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn grammar(path: &Utf8Path, codegen: bool) -> anyhow::Result<ExitCode> {
    let text = read(path)?;
    let grammar: Grammar =
        text.parse().with_context(|| format!("failed to load the grammar `{path}`"))?;

    let missing = grammar.check_kinds(
        |name| SyntaxKind::from_rule_name(name).is_some(),
        |spelling| SyntaxKind::from_spelling(spelling).is_some(),
    );
    for kind in &missing {
        match kind {
            MissingKind::Rule(name) => eprintln!("error: rule `{name}` has no syntax kind"),
            MissingKind::Token(spelling) => {
                eprintln!("error: token '{spelling}' has no syntax kind");
            }
        }
    }

    if codegen {
        print!("{}", sprig_grammar::generate_nodes(&sprig_grammar::lower(&grammar)));
    }

    Ok(if missing.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
