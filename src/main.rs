use cascade_picker::core::ConfigProvider;
use cascade_picker::utils::{logger, validation::Validate};
use cascade_picker::{CliConfig, Console, FormSession, HttpReferenceProvider, ResetOutcome};
use clap::Parser;
use std::sync::Arc;

const HELP: &str = "Commands:
  country <id>   select a country (no id clears it)
  port <id>      select a port (no id clears it)
  item <id>      select an item (no id clears it)
  reset          clear all selections
  show           print the form again
  help           print this help
  quit           exit";

enum Command {
    Country(String),
    Port(String),
    Item(String),
    Reset,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim().to_string();

        match verb.to_ascii_lowercase().as_str() {
            "country" | "c" => Command::Country(arg),
            "port" | "p" => Command::Port(arg),
            "item" | "i" => Command::Item(arg),
            "reset" => Command::Reset,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match cli.load_file() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    if cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting cascade-picker");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config: &dyn ConfigProvider = match &file_config {
        Some(file) => file,
        None => &cli,
    };
    let validation = match &file_config {
        Some(file) => file.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("🌐 Reference data service: {}", config.base_url());
    let provider = HttpReferenceProvider::new(config);
    let console = Arc::new(Console::stdin());
    let mut session = FormSession::new(provider, Arc::clone(&console));

    session.init().await;
    println!("{}", session.view());
    println!("{}", HELP);

    while let Some(line) = console.prompt("> ").await? {
        let outcome = match Command::parse(&line) {
            Command::Country(id) => session.select_country(&id).await,
            Command::Port(id) => session.select_port(&id).await,
            Command::Item(id) => session.select_item(&id),
            Command::Reset => match session.reset().await {
                Ok(ResetOutcome::Unavailable) => {
                    println!("Reset is available once a country is selected.");
                    Ok(())
                }
                Ok(_) => Ok(()),
                Err(e) => Err(e),
            },
            Command::Show => Ok(()),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
            Command::Unknown(verb) => {
                println!("Unknown command '{}'. Type 'help'.", verb);
                continue;
            }
        };

        if let Err(e) = outcome {
            tracing::debug!("Command failed: {}", e);
            println!("⚠️  {}", e.user_friendly_message());
        }
        println!("{}", session.view());
    }

    tracing::info!("👋 Bye");
    Ok(())
}
