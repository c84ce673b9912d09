use chrono::Local;
use clap::Parser;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use clockin::cli::args::{Cli, Commands, OutputFormat};
use clockin::cli::commands;
use clockin::config::{ColorSetting, Config, Paths};
use clockin::error::ClockinError;
use clockin::output::format_error;

fn main() {
    let cli = Cli::parse();
    let mut format = cli.output.unwrap_or_default();

    let result = Paths::new().and_then(|paths| {
        let config = Config::load_from_path(&paths.config_file)?;
        format = cli.output.unwrap_or(config.general.default_output);
        init_logging(cli.verbose, &config)?;
        run(cli, &paths, &config, format)
    });

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output.trim_end());
            }
        },
        Err(e) => {
            eprintln!("{}", format_error(&e, format));
            std::process::exit(e.exit_code());
        },
    }
}

fn init_logging(verbose: u8, config: &Config) -> Result<(), ClockinError> {
    let level = match verbose {
        0 => config.general.level_filter()?,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let color = match config.general.color {
        ColorSetting::Auto => ColorChoice::Auto,
        ColorSetting::Always => {
            colored::control::set_override(true);
            ColorChoice::Always
        },
        ColorSetting::Never => {
            colored::control::set_override(false);
            ColorChoice::Never
        },
    };

    // A logger can only be installed once per process.
    TermLogger::init(level, simplelog::Config::default(), TerminalMode::Stderr, color).ok();
    Ok(())
}

fn run(cli: Cli, paths: &Paths, config: &Config, format: OutputFormat) -> Result<String, ClockinError> {
    let now = Local::now().naive_local();
    debug!("reference instant {now}");

    match cli.command {
        Commands::Args(args) => commands::args(&args, now, format),
        Commands::Duration { input } => commands::duration(&input, format),
        Commands::Timestamp { input } => commands::timestamp(&input, now, format),
        Commands::Deadline { input } => commands::deadline(&input, now, format),
        Commands::Period { name } => commands::period(&name, now, format),
        Commands::Range { input } => commands::range(&input, now, format),
        Commands::Config { init } => commands::config(paths, config, init, format),
    }
}
