//! jsonbind CLI.
//!
//! Runs the lexer, parser, binder and serializer over a document read from a
//! file or stdin. Document failures exit with status 1, I/O and configuration
//! failures with status 2.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use jsonbind::demo::{sample_person, Person, SAMPLE_PEOPLE, SAMPLE_PERSON};
use jsonbind::json::{parse_to_array, parse_with_limits, tokenize_with_limits};
use jsonbind::{from_str, serialize, serialize_with_limits, JsonValue, Limits};

#[derive(Parser)]
#[command(name = "jsonbind")]
#[command(about = "Parse, check and re-serialize JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Use the strict limits preset
    #[arg(long, global = true, conflicts_with = "limits")]
    strict: bool,

    /// Load limits from a JSON file; unset fields keep their defaults
    #[arg(long, global = true, value_name = "FILE")]
    limits: Option<PathBuf>,

    /// Keep string escapes verbatim instead of decoding them
    #[arg(long, global = true)]
    raw_strings: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence as a JSON array of strings
    Tokens {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Parse and print the compact serialization
    Parse {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Validate and print a JSON result envelope
    Check {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Bind and serialize the built-in sample records
    Demo,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid limits file {path}: {source}")]
    Limits {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error[{code}] {name}: {0}", code = .0.code(), name = .0.name())]
    Json(#[from] jsonbind::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Json(_) => ExitCode::from(1),
            CliError::Io { .. } | CliError::Limits { .. } => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "command failed");
            eprintln!("{e}");
            e.exit_code()
        }
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let limits = load_limits(cli)?;
    debug!(?limits, "limits in force");

    match &cli.command {
        Commands::Tokens { file } => {
            let input = read_input(file)?;
            let tokens = tokenize_with_limits(&input, limits).map_err(jsonbind::Error::from)?;
            info!(count = tokens.len(), "tokenized");
            println!("{}", serialize_with_limits(&tokens, limits).map_err(jsonbind::Error::from)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse { file } => {
            let input = read_input(file)?;
            let value = parse_with_limits(&input, limits)?;
            println!("{}", serialize_with_limits(&value, limits).map_err(jsonbind::Error::from)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { file } => {
            let input = read_input(file)?;
            let (envelope, code) = match parse_with_limits(&input, limits) {
                Ok(value) => (check_ok(&value), ExitCode::SUCCESS),
                Err(e) => {
                    warn!(code = e.code(), name = e.name(), "document rejected");
                    (check_err(&e), ExitCode::from(1))
                }
            };
            println!("{envelope}");
            Ok(code)
        }
        Commands::Demo => {
            run_demo()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_limits(cli: &Cli) -> Result<Limits, CliError> {
    let limits = match &cli.limits {
        Some(path) => {
            let text = read_input(path)?;
            serde_json::from_str(&text).map_err(|source| CliError::Limits {
                path: path.display().to_string(),
                source,
            })?
        }
        None if cli.strict => Limits::strict(),
        None => Limits::lenient(),
    };
    Ok(limits.with_raw_strings(cli.raw_strings || limits.raw_strings))
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };
    let input = result.map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(bytes = input.len(), path = %path.display(), "read input");
    Ok(input)
}

fn check_ok(value: &JsonValue) -> serde_json::Value {
    serde_json::json!({
        "ok": {
            "root": value.type_name(),
            "size": value.len().unwrap_or(0),
        }
    })
}

fn check_err(e: &jsonbind::Error) -> serde_json::Value {
    serde_json::json!({
        "err": {
            "code": e.code(),
            "name": e.name(),
            "message": e.to_string(),
        }
    })
}

fn run_demo() -> Result<(), CliError> {
    let value = parse_with_limits(SAMPLE_PERSON, Limits::default())?;
    println!("Parsed object: {}", encode(&value)?);
    println!("Street: {}", encode(&value["address"]["street"])?);
    println!("First grade: {}", encode(&value["grades"][0])?);

    let people = parse_to_array(SAMPLE_PEOPLE)?;
    println!("People: {}", people.len());
    if let Some(first) = people.first() {
        println!("First person: {}", encode(first)?);
    }

    let person: Person = from_str(SAMPLE_PERSON)?;
    println!("Bound name: {}", person.name);
    println!("Bound age: {}", person.age);
    println!("Bound city: {}", person.city);
    println!("Bound student: {}", person.isStudent);
    println!("Bound grades: {:?}", person.grades);
    println!("Bound address: {}", person.address);

    println!("Serialized: {}", encode(&sample_person())?);
    Ok(())
}

fn encode<T: jsonbind::ToJson>(value: &T) -> Result<String, CliError> {
    Ok(serialize(value).map_err(jsonbind::Error::from)?)
}
