use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Platemap Contributors",
    version,
    about = "Platemap CLI - Lay out samples, reagents and replicates on 96- and 384-well microtiter plates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign every experiment to plate wells and write the resulting layout.
    Assemble(AssembleArgs),
    /// Assign experiments and print one plate of the result as a labelled grid.
    Show(ShowArgs),
}

/// Inputs and plate settings shared by every command that runs an assembly.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Path to the experiment manifest in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the plate size (number of wells: 96 or 384).
    #[arg(long, value_name = "WELLS")]
    pub plate_size: Option<u32>,

    /// Override the number of plates available.
    #[arg(long, value_name = "INT")]
    pub plate_limit: Option<usize>,

    /// Skip the up-front check that all wells fit on the available plates.
    #[arg(long)]
    pub no_capacity_check: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S plate.limit=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `assemble` subcommand.
#[derive(Args, Debug)]
pub struct AssembleArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Path for the output layout. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format of the layout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Result page to display (1-based). Out-of-range pages are clamped.
    #[arg(short, long, default_value_t = 1, value_name = "INT")]
    pub page: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Nested `[plate][row][column]` array of `[sample, reagent]` pairs or `null`.
    Json,
    /// One record per occupied well, with the reagent's display colour.
    Csv,
    /// Bracketed listing with one commented block per plate.
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_parses_layout_and_output_arguments() {
        let cli = Cli::parse_from([
            "platemap", "-vv", "assemble", "-i", "exp.toml", "-o", "out.csv", "--format", "csv",
            "--plate-size", "384", "-S", "plate.limit=3",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Assemble(args) = cli.command else {
            panic!("expected assemble command");
        };
        assert_eq!(args.layout.input, PathBuf::from("exp.toml"));
        assert_eq!(args.layout.plate_size, Some(384));
        assert_eq!(args.layout.set_values, vec!["plate.limit=3".to_string()]);
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn show_defaults_to_first_page() {
        let cli = Cli::parse_from(["platemap", "show", "-i", "exp.toml"]);
        let Commands::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.page, 1);
        assert!(!args.layout.no_capacity_check);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["platemap", "-q", "-v", "show", "-i", "exp.toml"]);
        assert!(result.is_err());
    }
}
