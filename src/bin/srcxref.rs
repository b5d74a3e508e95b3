//! Command-line interface for srcxref
//! Tokenizes C-family files and prints their definitions, tokens and references.
//!
//! Usage:
//!   srcxref `<path>...` [--format json|yaml|simple] [--policy wide|narrow] [--profile `<name>`]
//!   srcxref `<path>...` --config `<file>`   - Layer a TOML config over the built-in defaults
//!                                          (./srcxref.toml is used when present)
//!   srcxref --list-profiles                - List the available language profiles
//!
//! Files are analyzed concurrently; output is printed in argument order. A file that fails
//! is reported on stderr and the rest of the batch still runs.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::task::JoinSet;

use srcxref::analysis::analyze_file;
use srcxref::config::{Loader, SrcxrefConfig, AUTO_PROFILE};
use srcxref::error::AnalysisError;
use srcxref::profile::LanguageProfile;

/// Picked up from the working directory when `--config` is not given
const LOCAL_CONFIG: &str = "srcxref.toml";

fn cli() -> Command {
    Command::new("srcxref")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize C-family sources and extract cross-reference records")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("Source files to analyze")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1..)
                .required_unless_present("list-profiles"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("policy")
                .long("policy")
                .help("Line terminator set for reported lines")
                .value_parser(["wide", "narrow"]),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .short('p')
                .help("Language profile (c-family, c, cpp, c89) or 'auto' to use the extension"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["json", "yaml", "simple"]),
        )
        .arg(
            Arg::new("trivia")
                .long("trivia")
                .help("Include whitespace and newline tokens")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-profiles")
                .long("list-profiles")
                .help("List available language profiles")
                .action(ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> Result<SrcxrefConfig, AnalysisError> {
    let mut loader = Loader::new();
    loader = match matches.get_one::<PathBuf>("config") {
        Some(path) => loader.with_file(path),
        None => loader.with_optional_file(LOCAL_CONFIG),
    };
    if let Some(policy) = matches.get_one::<String>("policy") {
        loader = loader.set_override("analysis.policy", policy.as_str())?;
    }
    if let Some(profile) = matches.get_one::<String>("profile") {
        if profile != AUTO_PROFILE {
            // Reject unknown names before any file is read
            LanguageProfile::by_name(profile)?;
        }
        loader = loader.set_override("analysis.language_profile", profile.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("trivia") {
        loader = loader.set_override("output.include_trivia", true)?;
    }
    Ok(loader.build()?)
}

fn handle_list_profiles_command() {
    println!("Available profiles:\n");
    for profile in LanguageProfile::all() {
        let extensions = if profile.extensions.is_empty() {
            "-".to_string()
        } else {
            profile.extensions.join(", ")
        };
        println!("  {:<10} extensions: {}", profile.name, extensions);
    }
    println!("\n  {:<10} pick by extension (default)", AUTO_PROFILE);
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("srcxref=info".parse().expect("valid tracing directive")),
        )
        .with_target(false)
        .init();

    let matches = cli().get_matches();
    if matches.get_flag("list-profiles") {
        handle_list_profiles_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let format = config.output.format;
    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        let config = config.clone();
        tasks.spawn_blocking(move || {
            let rendered = config
                .options_for(&path)
                .and_then(|options| analyze_file(&path, &options))
                .and_then(|document| format.render(&document));
            (index, rendered)
        });
    }

    let mut results: Vec<Option<Result<String, AnalysisError>>> =
        paths.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, rendered)) => results[index] = Some(rendered),
            Err(e) => tracing::error!("analysis task failed: {}", e),
        }
    }

    let mut failed = 0;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Some(Ok(rendered)) => println!("{}", rendered.trim_end()),
            Some(Err(e)) => {
                tracing::warn!(path = %path.display(), "skipping file");
                eprintln!("Error: {}: {}", path.display(), e);
                failed += 1;
            }
            None => failed += 1,
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
