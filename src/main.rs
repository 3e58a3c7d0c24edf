use anyhow::Context;
use clap::Parser;

use gen_circle::Args;

fn main() -> anyhow::Result<()> {
    // quiet unless something goes wrong; RUST_LOG=debug shows every step
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    gen_circle::run(&args)
        .with_context(|| format!("failed to generate {}", args.output.display()))
}
