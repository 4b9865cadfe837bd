#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use git_ls::{
    DefaultFsOps, DefaultGitRunner, GitLsError, Options, collect_listing,
    config::{ColorChoice, Config, Settings, load_config, load_default_config},
    output::{LineStyle, OutputFormat, TabStyle, format_lines, format_tab, to_json},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "List a directory with git status for every entry.")]
struct Args {
    /// Directory to list (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// When to color the output
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Show the permission column
    #[arg(long, overrides_with = "no_mode")]
    mode: bool,

    /// Hide the permission column
    #[arg(long, overrides_with = "mode")]
    no_mode: bool,

    /// Output format: lines (default), tab or json
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Table style to use with --output tab
    #[arg(long, value_enum)]
    tab_style: Option<TabStyle>,

    /// Revision whose tree is compared against the directory
    #[arg(long, default_value = "HEAD")]
    treeish: String,

    /// Config file (default: $XDG_CONFIG_HOME/git-ls/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print debug info while listing
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> Config {
        let show_mode = if self.no_mode {
            Some(false)
        } else if self.mode {
            Some(true)
        } else {
            None
        };
        Config {
            color: self.color,
            show_mode,
            output: self.output,
            tab_style: self.tab_style,
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("git_ls=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settings(args: &Args, fs: &DefaultFsOps) -> Result<Settings, GitLsError> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default_config(fs)?,
    };
    Ok(file.resolve(&args.overrides()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    let fs = DefaultFsOps;
    let git = DefaultGitRunner;
    let settings = match settings(&args, &fs) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("git-ls: {err}");
            return ExitCode::FAILURE;
        }
    };
    let opts = Options {
        path: args.path.clone(),
        treeish: args.treeish.clone(),
    };

    let listing = match collect_listing(&opts, &fs, &git) {
        Ok(listing) => listing,
        Err(err @ GitLsError::NotInTrackedArea { .. }) => {
            println!("{err}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("git-ls: {err}");
            return ExitCode::FAILURE;
        }
    };

    match settings.output {
        OutputFormat::Lines => {
            let style = LineStyle {
                show_mode: settings.show_mode,
                colorize: settings.color.apply(),
            };
            for line in format_lines(&listing.decisions, style) {
                println!("{line}");
            }
        }
        OutputFormat::Tab => {
            let title = if listing.prefix.is_empty() {
                "."
            } else {
                listing.prefix.as_str()
            };
            let out = format_tab(&listing.decisions, settings.tab_style, settings.show_mode, title);
            println!("{out}");
        }
        OutputFormat::Json => match to_json(&listing.decisions) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("git-ls: {err}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
