use anyhow::Result;
use audiodumper::cli::{self, Args};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    cli::entry(&args)
}
