//! go-bot NLG CLI
//!
//! Usage:
//!   gobot-nlg [OPTIONS] [ACTION] [SLOT=VALUE]...
//!
//! Options:
//!   -c, --config <FILE>            TOML config (template_path, template_type, api_call_action)
//!   -t, --templates <FILE>         Template source file
//!   -s, --syntax <SYNTAX>          plain | alternation
//!   -a, --api-call-action <LABEL>  Action that performs the database call
//!   -l, --list                     List known actions with their ids
//!   -d, --debug                    Log debug events to stderr
//!   -h, --help                     Print help

use std::path::PathBuf;
use std::process;

use clap::Parser;

use gobot_nlg::{LoadError, NlgConfig, NlgError, ResponseManager, TemplateSyntax};

#[derive(Parser)]
#[command(name = "gobot-nlg")]
#[command(about = "Generate dialogue responses from action templates")]
struct Cli {
    /// Action label to generate text for
    action: Option<String>,

    /// Slot values as name=value
    #[arg(value_parser = parse_slot)]
    slots: Vec<(String, String)>,

    /// TOML config file
    #[arg(short, long, conflicts_with_all = ["templates", "syntax", "api_call_action"])]
    config: Option<PathBuf>,

    /// Template source file
    #[arg(short, long, required_unless_present = "config")]
    templates: Option<PathBuf>,

    /// Template syntax (plain or alternation)
    #[arg(short, long, default_value = "plain")]
    syntax: TemplateSyntax,

    /// Label of the API-call action
    #[arg(short, long)]
    api_call_action: Option<String>,

    /// List known actions with their ids
    #[arg(short, long)]
    list: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    debug: bool,
}

fn parse_slot(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected SLOT=VALUE, got '{}'", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match (&cli.config, &cli.templates) {
        (Some(path), _) => match NlgConfig::from_file(path) {
            Ok(config) => config.enable_debug(cli.debug),
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        (None, Some(templates)) => {
            let mut config = NlgConfig::new(templates)
                .with_template_type(cli.syntax)
                .with_debug(cli.debug);
            if let Some(action) = &cli.api_call_action {
                config = config.with_api_call_action(action);
            }
            config
        }
        (None, None) => {
            eprintln!("Error: either --config or --templates is required");
            process::exit(1);
        }
    };

    let level = if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let manager = match ResponseManager::new(&config) {
        Ok(manager) => manager,
        Err(NlgError::Load(e)) => {
            report_load_error(&e, &config);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.list {
        for (id, label, _) in manager.store().iter() {
            println!("{}\t{}", id, label);
        }
        return;
    }

    let Some(action) = &cli.action else {
        eprintln!("Error: an ACTION is required unless --list is given");
        process::exit(1);
    };

    let slots: Vec<(String, String)> = cli.slots;
    let result = manager
        .resolve_action_id(action)
        .map_err(NlgError::from)
        .and_then(|id| Ok(manager.generate_text(id, slots.as_slice())?));

    match result {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Print a load error, with source context when the template file is readable
fn report_load_error(err: &LoadError, config: &NlgConfig) {
    let path = config.template_path.display().to_string();
    match std::fs::read_to_string(&config.template_path) {
        Ok(source) if err.span().is_some() => eprint!("{}", err.format(&source, &path)),
        _ => eprintln!("Error: {}", err),
    }
}
