// src/cli.rs
use anyhow::Result;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rust_i18n::t;
use std::{env, path::PathBuf};

use crate::core::models::BuildMode;
use crate::core::targets::BuildTargets;

pub mod commands {
    pub mod init;
    pub mod run;
}

use commands::run::RunOptions;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

/// Ids of the arguments shared by the top level and the `run` subcommand.
const RUN_ARG_IDS: [&str; 5] = ["config", "project-dir", "mode", "targets", "html"];

fn run_args(locale: &str) -> [Arg; 5] {
    [
        Arg::new("config")
            .short('c')
            .long("config")
            .help(t!("arg.config", locale = locale).to_string())
            .value_name("CONFIG")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("project-dir")
            .long("project-dir")
            .help(t!("arg.project_dir", locale = locale).to_string())
            .value_name("PROJECT_DIR")
            .default_value(".")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("mode")
            .long("mode")
            .help(t!("arg.mode", locale = locale).to_string())
            .value_name("MODE")
            .env("PR_CHECK_MODE")
            .value_parser(["pr", "main"])
            .action(ArgAction::Set),
        Arg::new("targets")
            .long("targets")
            .help(t!("arg.targets", locale = locale).to_string())
            .value_name("TARGETS")
            .env("PR_CHECK_BUILD_TARGETS")
            .action(ArgAction::Set),
        Arg::new("html")
            .long("html")
            .help(t!("arg.html", locale = locale).to_string())
            .value_name("HTML")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
    ]
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("pr-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("arg.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        // `pr-check` without a subcommand behaves like `pr-check run`.
        .args(run_args(locale))
        .subcommand(
            Command::new("run")
                .about(t!("cmd.run_about", locale = locale).to_string())
                .args(run_args(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd.init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg.init_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(crate::core::config::DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg.init_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg.init_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches, lang: Option<String>) -> Result<RunOptions> {
    let mode = matches
        .get_one::<String>("mode")
        .map(|m| m.parse::<BuildMode>())
        .transpose()?;
    let targets = matches
        .get_one::<String>("targets")
        .map(|t| BuildTargets::parse(t))
        .transpose()?;

    Ok(RunOptions {
        config: matches.get_one::<PathBuf>("config").cloned(),
        project_dir: matches
            .get_one::<PathBuf>("project-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        mode,
        targets,
        html: matches.get_one::<PathBuf>("html").cloned(),
        lang,
    })
}

/// The first run argument given on the command line before a subcommand.
///
/// Such values would otherwise be shadowed by the subcommand's own
/// arguments. Environment variables are not counted, since both levels
/// read them.
fn run_arg_before_subcommand(matches: &ArgMatches) -> Option<&'static str> {
    RUN_ARG_IDS
        .into_iter()
        .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
}

/// Parses the command line and runs the selected command.
///
/// Returns the exit code the process should end with.
pub async fn run() -> Result<i32> {
    // Pre-parse language and initialize i18n first.
    let requested_lang = pre_parse_language().map(|lang| crate::resolve_locale(&lang));
    let language = requested_lang.clone().unwrap_or_else(crate::detect_locale);
    rust_i18n::set_locale(&language);

    let mut cli = build_cli(&language);
    let matches = cli.get_matches_mut();

    if let Some((subcommand, _)) = matches.subcommand() {
        if let Some(arg) = run_arg_before_subcommand(&matches) {
            cli.error(
                ErrorKind::ArgumentConflict,
                t!(
                    "cli.arg_before_subcommand",
                    locale = &language,
                    arg = arg,
                    subcommand = subcommand
                ),
            )
            .exit();
        }
    }

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(crate::core::config::DEFAULT_CONFIG_FILE));
            let force = init_matches.get_flag("force");
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::run_init_wizard(&output, &language, force, non_interactive)?;
            Ok(0)
        }
        Some(("run", run_matches)) => {
            commands::run::execute(run_options(run_matches, requested_lang)?).await
        }
        _ => commands::run::execute(run_options(&matches, requested_lang)?).await,
    }
}
