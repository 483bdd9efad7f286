use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::action_executor::{LaunchError, SystemBrowser, TabOpener};
use crate::builder_state::{BuilderState, EMPTY_QUERY_PLACEHOLDER};
use crate::clipboard::SystemClipboard;
use crate::config::{self, Config, ConfigError, HighlightStyle};
use crate::core_service::{CoreService, ServiceError};
use crate::highlight::highlight_for_display;
use crate::query_dsl::{parse_draft, DslError};
use crate::transport::handle_json;
use crate::web_search::build_search_url;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("invalid filter: {0}")]
    Filter(#[from] DslError),
    #[error("open error: {0}")]
    Launch(#[from] LaunchError),
    #[error("query was not copied to the clipboard")]
    CopyFailed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// 2 for bad input or configuration, 1 for failures while acting on it.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Filter(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "querycraft",
    version,
    about = "Build Google search queries from a term and operator filters"
)]
pub struct Cli {
    /// Config file (JSON/JSON5, or TOML when the name ends in .toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Base search term; several words are joined with spaces.
    #[arg(value_name = "TERM")]
    pub term: Vec<String>,

    /// Filter spec: site:example.com, filetype:pdf, -ads, "exact phrase", or:a|b, and:a|b ...
    #[arg(
        short = 'f',
        long = "filter",
        value_name = "SPEC",
        allow_hyphen_values = true
    )]
    pub filters: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the composed query.
    Compose {
        #[command(flatten)]
        query: QueryArgs,
        /// Render the query as highlighted HTML.
        #[arg(long, conflicts_with = "ansi")]
        html: bool,
        /// Render the query with terminal colours.
        #[arg(long)]
        ansi: bool,
    },
    /// Print the search URL.
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Open the search in the default browser.
    Open {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Copy the composed query to the clipboard.
    Copy {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Term plus optional file type and site only.
    Simple {
        #[arg(value_name = "TERM")]
        term: Vec<String>,
        #[arg(long, default_value = "")]
        filetype: String,
        #[arg(long, default_value = "")]
        site: String,
        /// Open the URL instead of printing it.
        #[arg(long)]
        open: bool,
    },
    /// Highlight an existing query string.
    Highlight {
        query: String,
        #[arg(long)]
        ansi: bool,
    },
    /// Answer JSON requests read line by line from stdin.
    Serve,
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cli: Cli) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with_io(cli, &mut stdin.lock(), &mut stdout.lock())
}

pub fn run_with_io(
    cli: Cli,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let config = config::load(cli.config.as_deref())?;
    if let Err(error) = crate::logging::init(&config) {
        eprintln!("[querycraft] file logging unavailable: {error}");
    }
    tracing::info!(config_path = %config.config_path.display(), "querycraft started");

    match cli.command {
        Command::Compose { query, html, ansi } => {
            let state = builder_from(&query)?;
            let style = if html {
                HighlightStyle::Html
            } else if ansi {
                HighlightStyle::Ansi
            } else {
                config.highlight_style
            };
            print_query(&state, style, out)
        }
        Command::Url { query } => {
            let service = CoreService::new(config)?;
            let state = builder_from(&query)?;
            match state.search_url(service.endpoint()) {
                Some(url) => writeln!(out, "{url}")?,
                None => eprintln!("{EMPTY_QUERY_PLACEHOLDER}"),
            }
            Ok(())
        }
        Command::Open { query } => {
            let service = CoreService::new(config.clone())?;
            let state = builder_from(&query)?;
            let mut browser = SystemBrowser::new(config.browser_command);
            if !state.open_search(service.endpoint(), &mut browser)? {
                eprintln!("{EMPTY_QUERY_PLACEHOLDER}");
            }
            Ok(())
        }
        Command::Copy { query } => {
            let state = builder_from(&query)?;
            if state.query().is_empty() {
                eprintln!("{EMPTY_QUERY_PLACEHOLDER}");
                return Ok(());
            }
            if !state.copy_query(&mut SystemClipboard) {
                return Err(RuntimeError::CopyFailed);
            }
            writeln!(out, "{}", state.query())?;
            Ok(())
        }
        Command::Simple {
            term,
            filetype,
            site,
            open,
        } => {
            let url = build_search_url(&term.join(" "), &filetype, &site);
            if open {
                SystemBrowser::new(config.browser_command).open(&url)?;
            } else {
                writeln!(out, "{url}")?;
            }
            Ok(())
        }
        Command::Highlight { query, ansi } => {
            let highlighted = highlight_for_display(&query);
            if ansi {
                writeln!(out, "{}", highlighted.to_ansi())?;
            } else {
                writeln!(out, "{}", highlighted.to_html())?;
            }
            Ok(())
        }
        Command::Serve => serve(&CoreService::new(config)?, input, out),
        Command::InitConfig { force } => init_config(&config, force, out),
    }
}

/// Builds session state from CLI arguments; an unusable filter spec is an error here.
pub fn builder_from(args: &QueryArgs) -> Result<BuilderState, DslError> {
    let mut state = BuilderState::new();
    state.set_term(&args.term.join(" "));
    for spec in &args.filters {
        let draft = parse_draft(spec)?;
        if !state.add_filter(&draft) {
            return Err(DslError::EmptySlot(spec.trim().to_string()));
        }
    }
    Ok(state)
}

fn print_query(
    state: &BuilderState,
    style: HighlightStyle,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let query = state.query();
    if query.is_empty() {
        eprintln!("{EMPTY_QUERY_PLACEHOLDER}");
        return Ok(());
    }
    let rendered = match style {
        HighlightStyle::Plain => query,
        HighlightStyle::Html => highlight_for_display(&query).to_html(),
        HighlightStyle::Ansi => highlight_for_display(&query).to_ansi(),
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn serve(
    service: &CoreService,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let mut handled = 0_usize;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", handle_json(service, &line))?;
        out.flush()?;
        handled += 1;
    }
    tracing::info!(handled, "serve loop finished");
    Ok(())
}

fn init_config(config: &Config, force: bool, out: &mut dyn Write) -> Result<(), RuntimeError> {
    if config.config_path.exists() && !force {
        writeln!(
            out,
            "config already exists at {} (use --force to overwrite)",
            config.config_path.display()
        )?;
        return Ok(());
    }
    let fresh = Config {
        config_path: config.config_path.clone(),
        ..Config::default()
    };
    config::save(&fresh)?;
    writeln!(out, "wrote default config to {}", fresh.config_path.display())?;
    Ok(())
}
