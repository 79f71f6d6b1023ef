use clap::{Parser, Subcommand};
use coogle::error::CoogleError;
use coogle::extract::{generate_header, generate_implementation};
use coogle::macros::scan_macros;
use coogle::output::{
    format_list_item, json_response, ColorMode, ErrorResponse, ListResponse, OutputFormat, Style,
};
use coogle::output_common::{is_json_format, render_json_response};
use coogle::provider;
use coogle::session::{Session, SEARCH_RULES};
use coogle::SignatureIndex;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "COOGLE_LOG";

#[derive(Parser)]
#[command(
    name = "coogle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Search C/C++ headers for functions by return type and argument types"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = OutputFormat::Human)]
    output: OutputFormat,

    #[arg(long, global = true, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a header; without a query, read queries interactively
    #[command(after_help = SEARCH_EXAMPLES)]
    Search {
        file: PathBuf,

        /// Query words, joined with single spaces
        query: Vec<String>,
    },

    /// List all functions and function-like macros by line
    #[command(after_help = LIST_EXAMPLES)]
    List { file: PathBuf },

    /// Generate a header from a C source file
    #[command(after_help = HEADER_EXAMPLES)]
    Header {
        source: PathBuf,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Extract function implementations from a C source file
    #[command(name = "impl", after_help = IMPL_EXAMPLES)]
    Impl {
        source: PathBuf,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

const SEARCH_EXAMPLES: &str = r#"
EXAMPLES:
  # Functions returning int (any args)
  coogle search mycode.h "int,"

  # Functions taking an int and a float (any return type)
  coogle search mycode.h ",int,float"

  # int anywhere in the return type or arguments
  coogle search mycode.h int

  # Pointer types; spacing and const do not matter
  coogle search mycode.h "void*"

  # Interactive mode
  coogle search mycode.h

  # JSON output for programmatic use
  coogle search mycode.h "char*," --output json
"#;

const LIST_EXAMPLES: &str = r#"
EXAMPLES:
  # Every function and function-like macro in a header
  coogle list array.h

  # Pretty JSON
  coogle list array.h --output pretty
"#;

const HEADER_EXAMPLES: &str = r#"
EXAMPLES:
  # Print a header for array.c
  coogle header array.c

  # Write it to a file
  coogle header array.c -o array.h
"#;

const IMPL_EXAMPLES: &str = r#"
EXAMPLES:
  # Print only the function bodies of array.c
  coogle impl array.c

  # Write them to a file
  coogle impl array.c -o array_impl.c
"#;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.color.apply();

    if let Err(err) = dispatch(&cli) {
        emit_error(&cli, &err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: &Cli) -> Result<(), CoogleError> {
    match &cli.command {
        Command::Search { file, query } => run_search(cli, file, query),
        Command::List { file } => run_list(cli, file),
        Command::Header { source, out } => run_header(source, out.as_deref()),
        Command::Impl { source, out } => run_impl(source, out.as_deref()),
    }
}

/// Input files must exist and be regular files before anything is parsed.
fn validate_input(path: &Path) -> Result<(), CoogleError> {
    if !path.exists() {
        return Err(CoogleError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    if !path.is_file() {
        return Err(CoogleError::InvalidPath {
            path: path.display().to_string(),
            reason: "not a regular file".to_string(),
        });
    }
    Ok(())
}

fn run_search(cli: &Cli, file: &Path, query_words: &[String]) -> Result<(), CoogleError> {
    let human = !is_json_format(cli.output);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    validate_input(file)?;
    if human {
        writeln!(out, "Parsing {}...\n", file.display())?;
    }
    let index = SignatureIndex::build(provider::parse_header(file)?);
    info!(file = %file.display(), functions = index.len(), "index ready");
    if human {
        writeln!(out, "Loaded {} functions\n", index.len())?;
        writeln!(out, "{}", SEARCH_RULES)?;
    }

    let session = Session::new(&index, file, cli.output, Style::detect());
    if query_words.is_empty() {
        let stdin = io::stdin();
        session.run_interactive(stdin.lock(), &mut out)?;
    } else {
        session.run_once(&query_words.join(" "), &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn run_list(cli: &Cli, file: &Path) -> Result<(), CoogleError> {
    validate_input(file)?;
    let content = provider::read_source(file)?;
    let index = SignatureIndex::build(provider::parse_source(&content, file)?);
    let macros = scan_macros(&content)?;
    let response = ListResponse::new(&file.display().to_string(), &index, &macros);

    if is_json_format(cli.output) {
        println!("{}", render_json_response(&response, cli.output)?);
        return Ok(());
    }

    let style = Style::detect();
    for item in &response.items {
        println!("{}", format_list_item(item, &style));
    }
    Ok(())
}

fn run_header(source: &Path, out: Option<&Path>) -> Result<(), CoogleError> {
    validate_input(source)?;
    let content = provider::read_source(source)?;
    let header = generate_header(&source.display().to_string(), &content);
    write_generated(&header, out, "Header")
}

fn run_impl(source: &Path, out: Option<&Path>) -> Result<(), CoogleError> {
    validate_input(source)?;
    let content = provider::read_source(source)?;
    let implementation = generate_implementation(&source.display().to_string(), &content);
    write_generated(&implementation, out, "Implementation")
}

fn write_generated(text: &str, out: Option<&Path>, what: &str) -> Result<(), CoogleError> {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("{} file generated: {}", what, path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn emit_error(cli: &Cli, err: &CoogleError) {
    match cli.output {
        OutputFormat::Human => {
            eprintln!("ERROR [{}]: {}", err.error_code(), err);
            if let Some(hint) = err.remediation() {
                eprintln!("Hint: {}", hint);
            }
        }
        OutputFormat::Json | OutputFormat::Pretty => {
            let error = ErrorResponse {
                code: err.error_code().to_string(),
                error: err.severity().to_string(),
                message: err.to_string(),
                remediation: err.remediation().map(|s| s.to_string()),
            };
            let response = json_response(error);
            let result = if matches!(cli.output, OutputFormat::Pretty) {
                serde_json::to_string_pretty(&response)
            } else {
                serde_json::to_string(&response)
            };
            match result {
                Ok(payload) => println!("{}", payload),
                Err(ser_err) => eprintln!("ERROR: {}", ser_err),
            }
        }
    }
}
