use clap::Parser;
use colored::*;
use idscope::api::{
    parse_document, render_document, CmdResult, ConfigAction, EventRecord, ScopeApi, ScopeRequest,
};
use idscope::error::{Result, ScopeError};
use idscope::message::{Message, MessageLevel};
use idscope::scope::IdMap;
use std::io::Read;
use std::path::PathBuf;
use tracing::Level;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprint_messages(&[Message::error(format!("Error: {}", e))]);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut api = ScopeApi::load(&cli.config_dir)?;

    match cli.command {
        Commands::Scope {
            input,
            own,
            attrs,
            only,
            prefix,
            map,
            events,
        } => {
            let request = ScopeRequest {
                own,
                extra_attrs: attrs,
                only_attrs: only,
                prefix,
                record_events: events,
            };
            handle_scope(&api, &input, &request, map)
        }
        Commands::Attrs { attrs, only } => {
            let request = ScopeRequest {
                extra_attrs: attrs,
                only_attrs: only,
                ..ScopeRequest::default()
            };
            handle_attrs(&api, &request)
        }
        Commands::Config { key, value } => handle_config(&mut api, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_scope(
    api: &ScopeApi,
    input: &str,
    request: &ScopeRequest,
    map: Option<PathBuf>,
) -> Result<()> {
    let source = read_input(input)?;
    let document = parse_document(&source)?;

    let mut ids = match &map {
        Some(path) => IdMap::load(path)?,
        None => IdMap::new(),
    };

    let result = api.scope(&document, request, &mut ids)?;

    if let Some(path) = &map {
        ids.save(path)?;
    }

    println!("{}", render_document(&document)?);
    print_events(&result.events)?;
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_attrs(api: &ScopeApi, request: &ScopeRequest) -> Result<()> {
    let result = api.id_attrs(request);
    for name in &result.id_attrs {
        println!("{}", name);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &mut ScopeApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) | (Some("prefix"), None) => ConfigAction::ShowAll,
        (Some("prefix"), Some(v)) => ConfigAction::SetPrefix(v),
        (Some(other), _) => {
            return Err(ScopeError::Api(format!("Unknown config key: {}", other)));
        }
    };

    let result = api.config(action)?;
    print_config(&result, key.is_none());
    print_messages(&result.messages);
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn print_config(result: &CmdResult, show_all: bool) {
    let Some(config) = &result.config else {
        return;
    };
    println!("prefix = {}", config.prefix);
    if !show_all {
        return;
    }
    if let Some(names) = &config.id_attrs {
        println!("id_attrs = {}", names.join(" "));
    }
    if !config.extra_id_attrs.is_empty() {
        println!("extra_id_attrs = {}", config.extra_id_attrs.join(" "));
    }
}

fn print_events(events: &[EventRecord]) -> Result<()> {
    for event in events {
        let line = serde_json::to_string(event)?;
        match event {
            EventRecord::Id { .. } => eprintln!("{}", line.cyan()),
            EventRecord::Ids { .. } => eprintln!("{}", line.dimmed()),
        }
    }
    Ok(())
}

fn styled(message: &Message) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

// stdout carries the document during `scope`
fn eprint_messages(messages: &[Message]) {
    for message in messages {
        eprintln!("{}", styled(message));
    }
}
