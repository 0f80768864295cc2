//! Application startup and subcommand dispatch

use crate::app::cli::{Args, Command, ConfigAction, TextAction};
use crate::app::commands::{config_command, queue_demo, run_command, text_command, text_words};
use crate::app::display;
use crate::app::error::{AppError, AppResult};
use crate::app::settings::{load_document, Settings};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, reconfigure_logging};
use clap::Parser;
use std::io::Read;

/// Parse the command line, run it and return the process exit code
pub async fn startup() -> i32 {
    let args = Args::parse();
    let command_name = command_name(&args.command);

    match run(args).await {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, &format!("{} failed", command_name));
            1
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::QueueDemo(_) => "queue-demo",
        Command::Config { .. } => "config",
        Command::Run(_) => "run",
        Command::Text { .. } => "text",
    }
}

pub async fn run(args: Args) -> AppResult<()> {
    let use_color = args.use_color();
    colored::control::set_override(use_color);

    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().into_owned());
    init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    )
    .map_err(|e| AppError::Logging {
        reason: e.to_string(),
    })?;

    let create_config = matches!(
        args.command,
        Command::Config {
            action: ConfigAction::Set { .. }
        }
    );
    let mut document = load_document(args.config.as_deref(), create_config)?;
    let settings = Settings::from_document(&document)?;

    if args.log_level.is_none() {
        if let Some(level) = &settings.log_level {
            if let Err(e) = reconfigure_logging(level) {
                log::warn!("Ignoring log.level '{}' from config: {}", level, e);
            }
        }
    }
    log::debug!("Settings: {:?}", settings);

    match &args.command {
        Command::QueueDemo(demo) => {
            let report = queue_demo(&settings, demo)?;
            print!("{}", display::demo_table(&report));
            println!();
            print!("{}", display::queue_stats_table(&report.stats));
        }
        Command::Config { action } => {
            println!("{}", config_command(&mut document, action)?);
        }
        Command::Run(run_args) => {
            let report = run_command(&settings, run_args).await?;
            print!(
                "{}",
                display::run_results_table(&report.specs, &report.results)
            );
            if run_args.output {
                for (spec, output) in report.specs.iter().zip(&report.results) {
                    if let Ok(output) = output {
                        println!("\n== {} ==\n{}", spec, output.stdout.trim_end());
                    }
                }
            }
            let failed = report.failures();
            if failed > 0 {
                return Err(AppError::CommandsFailed {
                    failed,
                    total: report.results.len(),
                });
            }
        }
        Command::Text { action } => {
            let input = text_input(action)?;
            if let TextAction::Classify { .. } = action {
                print!("{}", display::classify_table(&input));
            } else {
                for line in text_command(action, &input) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}

/// Join the positional words, or read standard input when there are none
fn text_input(action: &TextAction) -> AppResult<String> {
    match text_words(action) {
        Some(words) if !words.is_empty() => Ok(words.join(" ")),
        Some(_) => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
        None => Ok(String::new()),
    }
}
