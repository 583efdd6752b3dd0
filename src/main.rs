use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use git_relnotes::cli::orchestration::{self, Mode, WorkflowArgs};
use git_relnotes::config::{self, Overrides};
use git_relnotes::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-relnotes",
    version,
    about = "Resolve the nearest release tag and fetch or compare its release notes"
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["get_release_notes", "compare_release_notes", "print_tag"])
))]
struct Args {
    #[arg(long, help = "Write release notes for the nearest tag to the output file")]
    get_release_notes: bool,

    #[arg(long, help = "Compare release notes between the base branch and --branch")]
    compare_release_notes: bool,

    #[arg(long, help = "Print the nearest release tag and exit")]
    print_tag: bool,

    #[arg(short, long, help = "Candidate branch to compare against the base")]
    branch: Option<String>,

    #[arg(long, help = "Base branch (defaults to repository.default_branch)")]
    base: Option<String>,

    #[arg(long, help = "Commit to describe (defaults to HEAD)")]
    commit: Option<String>,

    #[arg(long, help = "Checkout directory to query")]
    checkout_dir: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Where to write fetched release notes")]
    output: Option<PathBuf>,

    #[arg(long, help = "Release notes endpoint URL")]
    notes_url: Option<String>,

    #[arg(long, help = "HTTP timeout in seconds")]
    timeout: Option<u64>,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.get_release_notes {
            Mode::GetReleaseNotes
        } else if self.compare_release_notes {
            Mode::CompareReleaseNotes
        } else {
            Mode::PrintTag
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            checkout_dir: self.checkout_dir.clone(),
            base: self.base.clone(),
            commit: self.commit.clone(),
            output: self.output.clone(),
            notes_url: self.notes_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("git_relnotes")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    config.apply(args.overrides());
    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let workflow = WorkflowArgs {
        mode: args.mode(),
        branch: args.branch.clone(),
    };

    match orchestration::run_workflow(&workflow, &config) {
        Ok(result) => std::process::exit(result.exit_code()),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
