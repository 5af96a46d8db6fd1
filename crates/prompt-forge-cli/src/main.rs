use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use prompt_forge_core::config::Config;
use prompt_forge_core::{
    export_to_prompt_data, CategorizationResult, CategoryClassifier, CategoryRegistry, Library,
    PromptBuilder, PromptForgeError, Result,
};

mod args;
use args::{Cli, Commands, ConfigAction, LibraryAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Analyze {
            text,
            file,
            json,
            add_to_library,
        }) => handle_analyze(&base_dir, text, file.as_deref(), json, add_to_library),
        Some(Commands::Categories { json }) => handle_categories(&base_dir, json),
        Some(Commands::Library { action }) => handle_library(action, &base_dir),
        Some(Commands::Build {
            types,
            phrases,
            all,
        }) => handle_build(&base_dir, &types, &phrases, all),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "prompt-forge", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("PROMPT_FORGE_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".prompt-forge"))
        .unwrap_or_else(|| PathBuf::from(".prompt-forge"))
}

/// Registry is built once per process from builtins and config
fn load_registry(config: &Config) -> Result<CategoryRegistry> {
    let registry = config.registry()?;
    tracing::debug!(categories = ?registry.names(), "registry ready");
    Ok(registry)
}

fn read_prompt(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let prompt = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(PromptForgeError::EmptyPrompt);
            }
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    if prompt.trim().is_empty() {
        return Err(PromptForgeError::EmptyPrompt);
    }
    Ok(prompt)
}

fn handle_analyze(
    base_dir: &Path,
    text: Option<String>,
    file: Option<&Path>,
    json: bool,
    add_to_library: bool,
) -> Result<()> {
    let prompt = read_prompt(text, file)?;
    let config = Config::load(base_dir)?;
    let classifier = CategoryClassifier::new(load_registry(&config)?);

    let result = classifier.categorize_prompt(&prompt);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_analysis(&result);
    }

    if add_to_library {
        let path = config.library_path(base_dir);
        let mut library = Library::load(&path)?;
        let report = library.merge(&export_to_prompt_data(&result));
        library.save(&path)?;

        // Keep stdout clean for JSON consumers
        eprintln!(
            "{} {} added, {} already present",
            "Library:".green(),
            report.added,
            report.skipped
        );
        for name in &report.new_categories {
            eprintln!("  {} {}", "+".green(), name);
        }
    }

    Ok(())
}

fn print_analysis(result: &CategorizationResult) {
    println!();
    println!(
        "{} {} phrases in {} categories",
        "Analysis:".cyan().bold(),
        result.total_phrases,
        result.category_count()
    );

    for (category, entries) in &result.categories {
        println!();
        println!(
            "{} {}",
            category.yellow().bold(),
            format!("({})", entries.len()).dimmed()
        );
        for entry in entries {
            println!(
                "  {} {}",
                format!("[{:>3}]", entry.confidence.round()).dimmed(),
                entry.phrase
            );
        }
    }
    println!();
}

fn handle_categories(base_dir: &Path, json: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let registry = load_registry(&config)?;

    if json {
        let defs: Vec<_> = registry.iter().map(|(_, c)| c.def()).collect();
        println!("{}", serde_json::to_string_pretty(&defs)?);
        return Ok(());
    }

    println!();
    for (name, category) in registry.iter() {
        println!(
            "{} {}",
            name.cyan(),
            format!(
                "weight {} | {} keywords | {} patterns",
                category.weight(),
                category.keywords().len(),
                category.patterns().len()
            )
            .dimmed()
        );
    }
    println!();
    Ok(())
}

fn handle_library(action: LibraryAction, base_dir: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let path = config.library_path(base_dir);

    match action {
        LibraryAction::List => {
            let library = Library::load(&path)?;
            println!();
            for name in library.prompt_types() {
                println!(
                    "{} {}",
                    name.cyan(),
                    format!("({})", library.phrase_count(name)).dimmed()
                );
            }
            println!();
        }
        LibraryAction::Show { name } => {
            let library = Library::load(&path)?;
            let phrases = library
                .phrases(&name)
                .ok_or_else(|| PromptForgeError::PromptTypeNotFound { name: name.clone() })?;
            println!();
            println!("{}", name.cyan().bold());
            for phrase in phrases {
                println!("  - {}", phrase);
            }
            println!();
        }
        LibraryAction::Add { name, phrase } => {
            let mut library = Library::load(&path)?;
            if library.add_phrase(&name, phrase.trim()) {
                library.save(&path)?;
                println!("{} {} -> {}", "Added:".green(), phrase.trim(), name);
            } else {
                println!("{} {} already in {}", "Skipped:".yellow(), phrase.trim(), name);
            }
        }
        LibraryAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn handle_build(base_dir: &Path, types: &[String], phrases: &[String], all: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let library = Library::load(&config.library_path(base_dir))?;
    let mut builder = PromptBuilder::with_separator(&config.prompt.separator);

    for prompt_type in types {
        if all {
            builder.select_all(&library, prompt_type)?;
        } else {
            builder.select_type(&library, prompt_type)?;
        }
    }
    for phrase in phrases {
        builder.select_phrase(&library, phrase)?;
    }

    if builder.phrase_count() == 0 {
        eprintln!(
            "{} No phrases selected. Available:",
            "[WARN]".yellow().bold()
        );
        for (prompt_type, available) in builder.visible_phrases(&library) {
            eprintln!("  {}", prompt_type.cyan());
            for phrase in available {
                eprintln!("    - {}", phrase);
            }
        }
        return Ok(());
    }

    tracing::debug!(count = builder.phrase_count(), "prompt built");
    println!("{}", builder.build());
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(PromptForgeError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
