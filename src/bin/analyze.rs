use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use skill_match::{
    custom_keywords, experience_modifications, init_logger, report, DataArgs, Result,
};

/// Score how well the profile fits a job description.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// File containing the job description.
    file: PathBuf,
    /// Job title. Defaults to "Job from <FILE>".
    #[arg(long, short, default_value = "")]
    title: String,
    /// Export the analysis as JSON, to PATH (`--save=PATH`) or a timestamped file.
    #[arg(long, value_name = "PATH", require_equals = true)]
    save: Option<Option<PathBuf>>,
    /// Print the analysis as JSON instead of a report.
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    data: DataArgs,
}

fn main() -> Result<ExitCode> {
    init_logger(log::LevelFilter::Warn);
    let cli = Cli::parse();
    let mut analyzer = cli.data.analyzer()?;

    let Some(result) = analyzer.analyze_file(&cli.file, &cli.title) else {
        return Ok(ExitCode::FAILURE);
    };

    if cli.json {
        println!("{}", report::Report::new(&result).to_json()?);
    } else {
        print!("{}", report::render(&result));

        let keywords = custom_keywords(&result.requirements);
        let modifications = experience_modifications(&result);
        if !keywords.is_empty() || !modifications.is_empty() {
            println!("\nRESUME SUGGESTIONS:");
            for suggestion in keywords
                .skills_section
                .iter()
                .chain(&keywords.experience_bullets)
                .chain(&keywords.project_descriptions)
                .chain(&modifications)
            {
                println!("  • {}", suggestion);
            }
        }
    }

    if let Some(path) = &cli.save {
        analyzer.save(&result, path.as_deref());
    }

    Ok(ExitCode::SUCCESS)
}
