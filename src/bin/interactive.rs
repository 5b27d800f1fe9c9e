use std::{
    io::{BufRead as _, Write as _},
    path::Path,
};

use clap::Parser;
use skill_match::{init_logger, report, DataArgs, MatchResult, Result};
use tiny_bail::prelude::*;

/// Analyze job descriptions from an interactive menu.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
}

const MENU: &str = "
1. Analyze job description (paste text)
2. Analyze job description from file
3. Compare multiple job files
4. View profile summary
5. Save last analysis
6. Exit";

/// Prints `message` and reads a trimmed line. `None` at end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Reads lines until one reads `END` or input runs out.
fn read_text() -> String {
    println!("Paste the job description, then type END on its own line:");
    let mut text = String::new();
    for line in std::io::stdin().lock().lines() {
        let line = c!(line);
        if line.trim() == "END" {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    text
}

fn main() -> Result<()> {
    init_logger(log::LevelFilter::Warn);
    let cli = Cli::parse();
    let mut analyzer = cli.data.analyzer()?;
    let mut last: Option<MatchResult> = None;

    println!("Job Description Analyzer");
    loop {
        println!("{}", MENU);
        let choice = bq!(prompt("\nSelect an option (1-6): "));

        match choice.as_str() {
            "1" => {
                let title = prompt("Job title (optional): ").unwrap_or_default();
                let text = read_text();
                cq!(!text.trim().is_empty());
                let result = analyzer.analyze_text(&text, &title);
                print!("{}", report::render(&result));
                last = Some(result);
            }
            "2" => {
                let path = bq!(prompt("Path to job description file: "));
                let title = prompt("Job title (optional): ").unwrap_or_default();
                let result = cq!(analyzer.analyze_file(&path, &title));
                print!("{}", report::render(&result));
                last = Some(result);
            }
            "3" => {
                println!("Enter one file path per line, then an empty line:");
                let mut paths = Vec::new();
                while let Some(path) = prompt("> ") {
                    if path.is_empty() {
                        break;
                    }
                    paths.push(path);
                }
                let mut results = analyzer.compare(&paths);
                match report::render_comparison(&results) {
                    Some(comparison) => print!("{}", comparison),
                    None => println!("Need at least 2 jobs to compare."),
                }
                if let Some(result) = results.pop() {
                    last = Some(result);
                }
            }
            "4" => {
                print!(
                    "{}",
                    report::render_profile(analyzer.profile(), &analyzer.history),
                );
            }
            "5" => {
                let Some(result) = &last else {
                    println!("Nothing analyzed yet.");
                    continue;
                };
                let path = prompt("Save to (empty for a timestamped file): ").unwrap_or_default();
                let path = (!path.is_empty()).then(|| Path::new(&path));
                analyzer.save(result, path);
            }
            "6" => break,
            _ => println!("Invalid option. Please choose 1-6."),
        }
    }

    Ok(())
}
