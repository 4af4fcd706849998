//! `qa-forge`: turn requirements into runnable test suites and run them

mod commands;
mod logging;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::PipelineArgs;
use qa_parser::DEFAULT_MAX_INPUT_BYTES;
use std::path::PathBuf;
use std::process::ExitCode;

fn pipeline_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("requirements")
                .long("requirements")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON file listing the requirements"),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory of recorded completions, one <id>.txt per requirement"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_parser(value_parser!(PathBuf))
                .help("Output root, overriding the configuration"),
        )
}

fn cli() -> Command {
    Command::new("qa-forge")
        .version(qa_core::VERSION)
        .about("Requirement-driven test scenario generation and execution")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("parse")
                .about("Show the test cases parsed from a completion file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Completion text file"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("max-bytes")
                        .long("max-bytes")
                        .value_parser(value_parser!(usize))
                        .help("Largest input parsed [default: 1 MiB]"),
                ),
        )
        .subcommand(pipeline_args(
            Command::new("generate").about("Generate suites for every configured target"),
        ))
        .subcommand(
            pipeline_args(Command::new("run").about("Generate, execute and write the execution report")).arg(
                Arg::new("results")
                    .long("results")
                    .value_parser(value_parser!(PathBuf))
                    .help("Report directory, overriding the configuration"),
            ),
        )
        .subcommand(Command::new("targets").about("List the built-in targets"))
}

fn path_arg(args: &ArgMatches, id: &str) -> Option<PathBuf> {
    args.get_one::<PathBuf>(id).cloned()
}

fn to_pipeline_args(args: &ArgMatches) -> anyhow::Result<PipelineArgs> {
    let required = |id: &str| path_arg(args, id).ok_or_else(|| anyhow::anyhow!("--{id} is required"));
    Ok(PipelineArgs {
        requirements: required("requirements")?,
        completions: required("completions")?,
        config: path_arg(args, "config"),
        out: path_arg(args, "out"),
        results: args.try_get_one::<PathBuf>("results").ok().flatten().cloned(),
    })
}

async fn dispatch(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    match matches.subcommand() {
        Some(("parse", args)) => {
            let file = path_arg(args, "file").ok_or_else(|| anyhow::anyhow!("<file> is required"))?;
            let max = args.get_one::<usize>("max-bytes").copied().unwrap_or(DEFAULT_MAX_INPUT_BYTES);
            println!("{}", commands::parse(&file, args.get_flag("json"), max)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("generate", args)) => {
            let (summary, failed) = commands::generate(&to_pipeline_args(args)?).await?;
            print!("{summary}");
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Some(("run", args)) => {
            let (summary, failed) = commands::run(&to_pipeline_args(args)?).await?;
            print!("{summary}");
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Some(("targets", _)) => {
            print!("{}", commands::targets());
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    if let Err(e) = logging::init(matches.get_flag("log-json")) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match dispatch(&matches).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "qa-forge failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
