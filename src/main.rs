//! Function Templates CLI
//!
//! Usage:
//!   function-templates [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -s, --state <FILE>   Game state snapshot (TOML format)
//!   -c, --config <FILE>  Formatter configuration (TOML format)
//!   -l, --locale <TAG>   Locale for numbers, overrides the config file
//!   --list               List available functions
//!   --check              Check the template and report problems
//!   -d, --debug          Increase log verbosity
//!   -h, --help           Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use function_templates::{
    FormatterConfig, FunctionRegistry, GameSnapshot, NumberFormat, Template, TemplateResolver,
    UpdateEvent,
};

#[derive(Parser)]
#[command(name = "function-templates")]
#[command(about = "Render templates with live game values")]
struct Cli {
    /// Template text (reads from stdin if not provided)
    template: Option<String>,

    /// Game state snapshot (TOML format)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Formatter configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale for numbers (en-US, de-DE, fr-FR, de-CH, plain)
    #[arg(short, long)]
    locale: Option<String>,

    /// List available functions and their aliases
    #[arg(long)]
    list: bool,

    /// Check the template and report problems instead of rendering
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-d for debug, -dd for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.debug {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut registry = FunctionRegistry::with_builtins();

    if cli.list {
        print_functions(&registry);
        return;
    }

    // If no template and stdin is a terminal (interactive), show intro help
    if cli.template.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load formatter configuration
    let mut config = match &cli.config {
        Some(path) => match FormatterConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FormatterConfig::default(),
    };
    if let Some(locale) = &cli.locale {
        if NumberFormat::for_locale(locale).is_none() {
            eprintln!("Unknown locale '{}', using en-US", locale);
        }
        config.locale = Some(locale.clone());
    }
    let formatter = config.build();

    // Load game state
    let snapshot = match &cli.state {
        Some(path) => match GameSnapshot::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading state '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameSnapshot::new(),
    };

    // Read template
    let source = match cli.template {
        Some(template) => template,
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer.trim_end_matches(['\r', '\n']).to_string(),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let template = Template::parse(&source);

    // Enable what the template uses and replay the snapshot's world to it
    if !registry.enable_template(&template) {
        eprintln!("Warning: some functions could not be enabled");
    }
    registry.dispatch(&UpdateEvent::WorldChanged {
        world: snapshot.world.clone(),
    });
    debug!("Template references {} function(s)", template.references().count());

    if cli.check {
        let warnings = function_templates::template::lint::check(&template, &registry);
        let color = io::stderr().is_terminal();
        for warning in &warnings {
            eprint!("{}", warning.format(&source, "<template>", color));
        }
        registry.disable_template(&template);
        if warnings.is_empty() {
            info!("Template is clean");
            return;
        }
        std::process::exit(1);
    }

    let text = TemplateResolver::new(&registry, &snapshot, &formatter).render_template(&template);
    println!("{}", text);

    registry.disable_template(&template);
}

fn print_functions(registry: &FunctionRegistry) {
    for (_, function) in registry.functions() {
        let kind = if function.is_active() { "active" } else { "" };
        let aliases = function.aliases().join(", ");
        println!(
            "{:<10} {:<18} {:<8} {}",
            function.name(),
            function.translated_name(),
            kind,
            aliases
        );
    }
}

fn print_intro() {
    println!(
        r#"Function Templates - live game values in chat and HUD text

USAGE:
    function-templates [OPTIONS] [TEMPLATE]
    echo '<template>' | function-templates

OPTIONS:
    -s, --state      Game state snapshot (TOML file)
    -c, --config     Formatter configuration (TOML file)
    -l, --locale     Number locale (en-US, de-DE, fr-FR, de-CH, plain)
    --list           List available functions
    --check          Report unknown functions and stray '%' signs
    -d, --debug      Show debug logging
    -h, --help       Print help

TEMPLATE SYNTAX:
    %name%           Value of a function, e.g. %fps%
    %name:arg%       Value with an argument, e.g. %x:2% for two decimals
    Names are case-insensitive; unknown names render as N/A.

QUICK START:
    function-templates --state state.toml 'XYZ: %x% %y% %z% | %fps% FPS'"#
    );
}
