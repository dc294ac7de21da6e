//! Command-line interface for versicle
//!
//! Usage:
//!   versicle parse `<citation>`... [--format `<format>`]        - Parse citations and report the result
//!   versicle tokens `<citation>`                                - Show the lexer's tokens with spans
//!   versicle navigate `<citation>` --by `<granularity>` [--previous] [--steps `<n>`]
//!                                                              - Step from a citation
//!   versicle compare `<a>` `<b>`                                - Graded comparison of two citations
//!   versicle list-formats                                      - List output formats
//!
//! Global options: `--config <file>` layers a TOML file over the built-in defaults, `--canon
//! <file>` selects a YAML/JSON canon, and `--log-level` sets the stderr log level.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use versicle::config::{Loader, Settings};
use versicle::formats::{FormatRegistry, LocatorReport};
use versicle::lexing::tokenize_with_spans;
use versicle::{Canon, Granularity, HierarchyProvider, LocatorBuilder};

fn main() {
    let matches = Command::new("versicle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, order and navigate book/chapter/verse citations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML settings file layered over the defaults"),
        )
        .arg(
            Arg::new("canon")
                .long("canon")
                .global(true)
                .help("YAML or JSON canon used to resolve books"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level for stderr output (error, warn, info, debug, trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse citations and report the resulting locators")
                .arg(
                    Arg::new("citation")
                        .help("Citation text, e.g. \"Eph 1:1 through 8\"")
                        .required(true)
                        .num_args(1..),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Show the tokens a citation lexes into")
                .arg(Arg::new("citation").required(true).index(1)),
        )
        .subcommand(
            Command::new("navigate")
                .about("Step forward or backward from a citation")
                .arg(Arg::new("citation").required(true).index(1))
                .arg(
                    Arg::new("by")
                        .long("by")
                        .short('b')
                        .help("Step size: verse, chapter or book")
                        .default_value("verse"),
                )
                .arg(
                    Arg::new("previous")
                        .long("previous")
                        .short('p')
                        .action(ArgAction::SetTrue)
                        .help("Step backward instead of forward"),
                )
                .arg(
                    Arg::new("steps")
                        .long("steps")
                        .short('n')
                        .value_parser(clap::value_parser!(u32))
                        .default_value("1"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two citations; prints a signed distance from -4 to 4")
                .arg(Arg::new("a").required(true).index(1))
                .arg(Arg::new("b").required(true).index(2)),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let settings = load_settings(&matches).unwrap_or_else(|e| fail(format!("Configuration error: {e}")));
    init_logging(&settings.logging.level);

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(&settings, sub),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("navigate", sub)) => handle_navigate_command(&settings, sub),
        Some(("compare", sub)) => handle_compare_command(&settings, sub),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn fail(message: String) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn load_settings(matches: &ArgMatches) -> Result<Settings, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(canon) = matches.get_one::<String>("canon") {
        loader = loader.set_override("hierarchy.path", canon.as_str())?;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        loader = loader.set_override("logging.level", level.as_str())?;
    }
    if let Some(("parse", sub)) = matches.subcommand() {
        if let Some(format) = sub.get_one::<String>("format") {
            loader = loader.set_override("output.format", format.as_str())?;
        }
    }
    loader.build()
}

fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{level}', using warn");
        LevelFilter::WARN
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(filter)
        .with_target(false)
        .init();
}

fn load_hierarchy(settings: &Settings) -> Option<Arc<dyn HierarchyProvider>> {
    let path = settings.hierarchy.path.as_ref()?;
    match Canon::load(path) {
        Ok(canon) => Some(Arc::new(canon)),
        Err(e) => fail(format!("Error loading canon: {e}")),
    }
}

fn builder_for(hierarchy: &Option<Arc<dyn HierarchyProvider>>, text: &str) -> LocatorBuilder {
    let mut builder = match hierarchy {
        Some(provider) => LocatorBuilder::with_hierarchy(Arc::clone(provider)),
        None => LocatorBuilder::new(),
    };
    builder.parse(text);
    builder
}

fn handle_parse_command(settings: &Settings, matches: &ArgMatches) {
    let hierarchy = load_hierarchy(settings);
    let registry = FormatRegistry::with_defaults();
    let format = settings.output.format.as_str();

    for text in matches.get_many::<String>("citation").into_iter().flatten() {
        let report = LocatorReport::new(text.as_str(), &builder_for(&hierarchy, text));
        let output = registry
            .serialize(&report, format)
            .unwrap_or_else(|e| fail(format!("Error: {e}")));
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }
}

fn handle_tokens_command(matches: &ArgMatches) {
    let text = matches.get_one::<String>("citation").unwrap();
    for (token, span) in tokenize_with_spans(text) {
        println!("{:<16} {}..{}", format!("{token:?}"), span.start, span.end);
    }
}

fn handle_navigate_command(settings: &Settings, matches: &ArgMatches) {
    let hierarchy = load_hierarchy(settings);
    let text = matches.get_one::<String>("citation").unwrap();
    let granularity: Granularity = matches
        .get_one::<String>("by")
        .unwrap()
        .parse()
        .unwrap_or_else(|e: String| fail(format!("Error: {e}")));
    let backward = matches.get_flag("previous");
    let steps = *matches.get_one::<u32>("steps").unwrap();

    let mut locator = builder_for(&hierarchy, text).create();
    for _ in 0..steps {
        let step = if backward {
            locator.previous(granularity)
        } else {
            locator.next(granularity)
        };
        locator = step
            .unwrap_or_else(|e| fail(format!("Error: {e}")))
            .create();
        println!("{locator}");
    }
}

fn handle_compare_command(settings: &Settings, matches: &ArgMatches) {
    let hierarchy = load_hierarchy(settings);
    let a = builder_for(&hierarchy, matches.get_one::<String>("a").unwrap()).create();
    let b = builder_for(&hierarchy, matches.get_one::<String>("b").unwrap()).create();
    println!("{}", a.compare(&b));
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or_default();
        println!("  {name}");
        println!("    {description}");
    }
}
