use feedback_lens::questions::predefined_questions;
use feedback_lens::{Config, LlmClient, Session};

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedback-lens")]
#[command(about = "Customer feedback analysis over a CSV of comments and scores")]
#[command(version)]
struct Args {
    /// CSV file to load at startup (needs `Comments` and `Score` columns)
    csv: Option<PathBuf>,

    /// Model name (or set OPENAI_MODEL env var)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the chat completion API (or set OPENAI_BASE_URL env var)
    #[arg(long)]
    base_url: Option<String>,
}

enum Command {
    Ask(usize),
    Load(PathBuf),
    Summary,
    Questions,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if let Ok(number) = line.parse::<usize>() {
        return Command::Ask(number);
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match head {
        "load" | "upload" if !rest.trim().is_empty() => Command::Load(PathBuf::from(rest.trim())),
        "summary" => Command::Summary,
        "questions" | "list" => Command::Questions,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    info!("Using {:?}", config);

    let mut session = Session::new(LlmClient::from_config(&config));

    println!("\n{}", "=".repeat(80));
    println!(" Customer Feedback Analysis");
    println!("{}", "=".repeat(80));

    if let Some(path) = args.csv {
        upload(&mut session, &path);
    } else {
        println!("\n Upload your CSV file with: load <path>");
    }

    print_questions();
    print_help();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Command::Ask(number) => {
                println!("\n Analyzing... This may take a few seconds.");
                match session.ask_number(number).await {
                    Ok(outcome) => {
                        println!("\n{}", "-".repeat(80));
                        println!(" LLM Response");
                        println!("{}", "-".repeat(80));
                        println!("{}", outcome.answer);
                    }
                    Err(e) => {
                        error!("Query failed: {}", e);
                        println!("\n Query failed: {}", e);
                    }
                }
            }
            Command::Load(path) => upload(&mut session, &path),
            Command::Summary => match session.summary() {
                Ok(summary) => {
                    println!();
                    for entry in summary {
                        println!(
                            " {:<6} rows: {:<5} average: {:.2}  highest: {}  lowest: {}",
                            entry.bucket,
                            entry.row_count,
                            entry.statistics.average,
                            entry.statistics.highest,
                            entry.statistics.lowest
                        );
                    }
                }
                Err(e) => println!("\n {}", e),
            },
            Command::Questions => print_questions(),
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(input) => println!("\n Unknown command: {}", input),
        }
    }

    Ok(())
}

fn upload(session: &mut Session<LlmClient>, path: &Path) {
    match session.upload(path) {
        Ok(table) => println!("\n File uploaded successfully! ({} rows)", table.len()),
        Err(e) => {
            error!("Upload of {} failed: {}", path.display(), e);
            println!("\n Upload failed: {}", e);
        }
    }
}

fn print_questions() {
    println!("\n Ask a Question:");
    for (i, question) in predefined_questions().iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, question.bucket, question.text.trim_end());
    }
}

fn print_help() {
    println!("\n Commands: <number> ask | load <path> | summary | questions | quit");
}
