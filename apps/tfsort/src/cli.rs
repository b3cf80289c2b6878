//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tfsort",
    version,
    about = "Check attribute, block and declaration order in Terraform files",
    long_about = "tfsort: lint .tf files for canonical ordering.\n\nInside every block and object literal: special attributes (count, source, for_each, ...) first, then attributes alphabetically, then nested blocks alphabetically, then special blocks. Top-level variable declarations must be alphabetical per file.\n\nConfiguration precedence: CLI > tfsort.toml > defaults.",
    after_help = "Examples:\n  tfsort\n  tfsort infra/\n  tfsort infra/ --output json"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Directory to scan (default: current dir)")]
    pub directory: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}
