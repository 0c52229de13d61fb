use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use uuid::Uuid;

use expense_report::{
    config::{ConfigManager, ReportConfig},
    domain::Displayable,
    init,
    reports::{ExportOptions, FileSink},
    utils::build_info,
    ChartService, ChartStyle, ExpenseRepository, ExportFormat, JsonRepository, LayoutOptions,
    ReportError, ReportService, Result,
};

/// Per-user payment charts and reports.
#[derive(Parser, Debug)]
#[command(name = "expense_report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to the application data directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out one user's spending and print the chart page as JSON
    Chart {
        /// JSON snapshot with users, categories and payments
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// Login, full name or id of the user
        #[arg(long)]
        user: String,
        /// Chart style: bar, pie, line or scatter
        #[arg(long, default_value = "bar")]
        style: ChartStyle,
    },
    /// Export every user's summary into a document
    Export {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// text, csv or json
        #[arg(long, default_value = "text")]
        format: ExportFormat,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Overrides the configured report title
        #[arg(long)]
        title: Option<String>,
    },
    /// List the users found in a snapshot
    Users {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
    /// List the available chart styles
    Styles,
    /// Print build metadata
    BuildInfo,
}

fn main() -> ExitCode {
    init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Chart { data, user, style } => {
            let repository = JsonRepository::new(data);
            let user_id = resolve_user(&repository, &user)?;
            let options = LayoutOptions::from_config(&config)?;
            let page = ChartService::chart_for_user_with(&repository, user_id, style, &options)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Export {
            data,
            format,
            out,
            title,
        } => {
            let repository = JsonRepository::new(data);
            let options = ExportOptions::new(title.unwrap_or_else(|| config.report_title.clone()));
            let mut sink = FileSink::new(&out, format, config.formatter());
            let written = ReportService::export_with(&repository, &mut sink, &options)?;
            println!(
                "{} {written} section(s) to {}",
                "Exported".green().bold(),
                out.display()
            );
        }
        Command::Users { data } => {
            let repository = JsonRepository::new(data);
            for user in repository.users()? {
                println!("{:<16} {}", user.login.bold(), user.display_label());
            }
        }
        Command::Styles => {
            for style in ChartStyle::ALL {
                println!("{:<16} {}", style.key().bold(), style.label());
            }
        }
        Command::BuildInfo => {
            let meta = build_info::current();
            println!("expense_report {}", meta.summary());
            println!("built {} with {}", meta.timestamp, meta.rustc);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let manager = match path {
        Some(path) => ConfigManager::new(path.to_path_buf()),
        None => ConfigManager::new_default(),
    };
    Ok(manager.load()?)
}

fn resolve_user(repository: &impl ExpenseRepository, needle: &str) -> Result<Uuid> {
    let users = repository.users()?;
    let by_id = Uuid::parse_str(needle.trim())
        .ok()
        .filter(|id| users.iter().any(|user| user.id == *id));
    by_id
        .or_else(|| users.iter().find(|user| user.matches(needle)).map(|user| user.id))
        .ok_or_else(|| ReportError::UserNotMatched(needle.to_string()))
}
