use anyhow::Result;
use cfmigrate_core::Version;
use cfmigrate_core::config::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "cfmigrate")]
#[command(about = "cfmigrate - move clang-format style files between versions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ./cfmigrate.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a style file for another version
    Migrate {
        /// Version the input was written for (e.g. 3.5)
        #[arg(long, value_parser = parse_version)]
        from: Version,

        /// Version to produce
        #[arg(long, value_parser = parse_version)]
        to: Version,

        /// Preset used when the input has no BasedOnStyle
        #[arg(short, long)]
        style: Option<String>,

        /// Only write fields that differ from the preset
        #[arg(long)]
        skip_defaults: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input style file, `-` for stdin
        input: PathBuf,
    },

    /// List the versions that accept a style file
    Detect {
        /// Input style file, `-` for stdin
        input: PathBuf,
    },

    /// List preset names
    Styles {
        /// Only presets accepted at this version
        #[arg(long, value_parser = parse_version)]
        from: Option<Version>,

        /// With --from: presets accepted at every version up to this one
        #[arg(long, value_parser = parse_version)]
        to: Option<Version>,
    },

    /// List the known versions
    Versions,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn parse_version(input: &str) -> std::result::Result<Version, String> {
    Version::parse(input).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::utils::load_config(cli.config.as_deref())?;
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format.into();
    }
    commands::utils::init_logging(&config);

    match cli.command {
        Commands::Migrate {
            from,
            to,
            style,
            skip_defaults,
            output,
            input,
        } => {
            let request = commands::migrate::MigrateRequest {
                from,
                to,
                style: style.unwrap_or_else(|| config.default_preset.clone()),
                skip_defaults: skip_defaults || config.skip_defaulted_fields,
                input,
                output,
            };
            commands::migrate::run(&request)?
        }
        Commands::Detect { input } => commands::detect::run(&input)?,
        Commands::Styles { from, to } => commands::styles::run(from, to)?,
        Commands::Versions => commands::versions::run()?,
    }

    Ok(())
}
