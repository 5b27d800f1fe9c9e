use clap::Parser;
use skill_match::{init_logger, report, DataArgs, Result};

/// Print a summary of the profile.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
}

fn main() -> Result<()> {
    init_logger(log::LevelFilter::Warn);
    let cli = Cli::parse();
    let profile = cli.data.load_profile()?;
    print!("{}", report::render_profile(&profile, &[]));
    Ok(())
}
