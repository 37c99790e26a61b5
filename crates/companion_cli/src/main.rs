use anyhow::Context;
use clap::Parser;
use companion_core::{CompanionConfig, Personality};
use companion_reasoning::commands::EXIT_SENTINEL;
use companion_reasoning::engine::COMMAND_PREFIX;
use companion_reasoning::providers::create_client;
use companion_reasoning::CompanionEngine;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Value shipped in the sample `.env`; treated the same as a missing key.
const PLACEHOLDER_API_KEY: &str = "sk-your-openai-api-key-here";

#[derive(Parser, Debug)]
#[command(name = "companion", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "companion.toml")]
    config: PathBuf,

    /// Path to the personality JSON file
    #[arg(short, long)]
    personality: Option<PathBuf>,

    /// Path to the long-term memory file
    #[arg(long)]
    memory_file: Option<PathBuf>,

    /// Model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Completion provider ("openai" or "mock")
    #[arg(long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = CompanionConfig::load_or_default(&args.config);
    if let Some(path) = args.personality {
        config.personality_path = path;
    }
    if let Some(path) = args.memory_file {
        config.memory.long_term_path = path;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if let Some(provider) = args.provider {
        config.llm.provider = provider;
    }

    if config.llm.provider == "openai" && !has_usable_api_key() {
        eprintln!("\nError: Please set your OpenAI API key in the .env file.");
        eprintln!("1. Open the .env file");
        eprintln!("2. Replace '{}' with your actual OpenAI API key", PLACEHOLDER_API_KEY);
        eprintln!("3. Save the file and try again");
        std::process::exit(1);
    }

    info!("Loading personality from {}...", config.personality_path.display());
    let personality = Personality::load(&config.personality_path).await;

    info!("Starting {} provider with model {}...", config.llm.provider, config.llm.model);
    let client = create_client(&config.llm).context("Failed to initialize completion client")?;
    let mut engine = CompanionEngine::from_config(&config, personality, client);
    info!(
        "Loaded {} long-term memories from {}",
        engine.memory().long_term().len(),
        config.memory.long_term_path.display()
    );

    let name = engine.personality().name.clone();
    println!("\nAI Companion {} is ready to chat!", name);
    println!("Type 'exit' to end the conversation.");
    println!("Type 'clear' to clear conversation history.");
    println!("Type '/help' for all commands.");
    println!("{}", "-".repeat(50));

    let mut editor = DefaultEditor::new().context("Failed to create line editor")?;

    loop {
        let line = match editor.readline("\nYou: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nGoodbye! Have a great day!");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("\nGoodbye! Have a great day!");
                break;
            }
            "clear" => {
                engine.memory_mut().clear_memory();
                println!("\nConversation history cleared!");
                continue;
            }
            _ => {}
        }

        let response = engine.generate_response(input, None).await;
        if input.starts_with(COMMAND_PREFIX) && response == EXIT_SENTINEL {
            println!("\nGoodbye! Have a great day!");
            break;
        }
        println!("\n{}: {}", name, response);
    }

    Ok(())
}

fn has_usable_api_key() -> bool {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) => !key.trim().is_empty() && key != PLACEHOLDER_API_KEY,
        Err(_) => false,
    }
}
