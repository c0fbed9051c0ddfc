use clap::Parser;
use showroom_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    showroom_cli::tracing_setup::init_tracing(cli.debug)?;
    showroom_cli::run(cli)
}
