use std::io;

use clap::Parser;
use ext_hash::{repl::Repl, ExtHash, TableConfig};

#[derive(Parser, Debug)]
#[command(name = "exthash", about = "Interactive extendible hash table over bit-string keys")]
struct Cli {
    /// Number of keys each bucket can hold
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    bucket_size: u32,
    /// Exact number of bits in every key
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    key_length: u32,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so the session transcript on stdout stays clean.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = TableConfig::new(cli.bucket_size as usize, cli.key_length as usize);
    let table = ExtHash::with_config(config)?;
    tracing::debug!(?config, "starting session");

    let stdin = io::stdin();
    let mut repl = Repl::new(table, io::stdout(), io::stderr());
    repl.run(stdin.lock())?;
    Ok(())
}
