use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = artgen::cli::Cli::parse();
    cli.run()
}
