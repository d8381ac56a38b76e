//! userdir CLI
//!
//! Opens the interactive terminal directory by default; `list` and `show`
//! print one page or one record and exit.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use userdir::config::Overrides;
use userdir::{
    detail, Action, AppConfig, DetailController, Directory, DirectoryError, DirectoryView,
    RecordSource,
};

/// userdir - searchable, paginated user directory
///
/// Fetches the user collection once and lets you search it by name,
/// email or username, ten rows per page.
#[derive(Parser)]
#[command(name = "userdir")]
#[command(author = "userdir Contributors")]
#[command(version)]
#[command(about = "Searchable, paginated user directory", long_about = None)]
struct Cli {
    /// Collection endpoint (detail requests append /{id})
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (default: ~/.userdir/config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Comma-separated fields to search: name,username,email,phone,company
    #[arg(long, global = true)]
    fields: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Print one page of users
    List {
        /// Search term, committed as if typed and submitted
        #[arg(short, long, allow_hyphen_values = true)]
        search: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one user's details
    Show {
        /// User id
        id: u64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let overrides = Overrides {
        endpoint: cli.endpoint,
        match_fields: cli.fields,
        log_level: cli.log_level,
    };

    let result = AppConfig::load(cli.config.as_deref(), overrides).and_then(|config| {
        match userdir::logging::init(config.log_file.as_deref(), config.log_level) {
            Ok(log_path) => {
                log::info!("userdir {} starting, log at {}", userdir::VERSION, log_path.display())
            }
            Err(e) => eprintln!(
                "{} Logging disabled, cannot open log file: {}",
                style("!").yellow().bold(),
                e
            ),
        }
        log::debug!("endpoint {}", config.endpoint);

        let source = userdir::http_source(&config)?;
        match cli.command.unwrap_or(Commands::Tui) {
            Commands::Tui => userdir::tui::run(source, config.match_fields),
            Commands::List { search, page, json } => {
                cmd_list(source, &config, search.as_deref(), page, json)
            }
            Commands::Show { id, json } => cmd_show(source, id, json),
        }
    });

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// List command implementation
fn cmd_list(
    source: Arc<dyn RecordSource>,
    config: &AppConfig,
    search: Option<&str>,
    page: usize,
    json: bool,
) -> userdir::Result<()> {
    let start = Instant::now();
    let mut directory = Directory::new(source, config.match_fields.clone());
    directory.load();

    let pb = spinner(format!("Fetching {}", config.endpoint));
    while !directory.wait(Duration::from_millis(100)) {}
    pb.finish_and_clear();

    if let Some(err) = directory.last_error() {
        return Err(DirectoryError::Load(err.to_string()));
    }

    if let Some(term) = search {
        directory.dispatch(Action::Edit(term.to_string()));
        let view = directory.dispatch(Action::Submit);
        if view.validation_error {
            eprintln!(
                "{} Please enter a search term",
                style("!").yellow().bold()
            );
        }
    }

    let view = directory.dispatch(Action::GoToPage(page));
    if view.page_number != page {
        eprintln!(
            "{} Page {} is out of range, showing page {}",
            style("!").yellow().bold(),
            page,
            view.page_number
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{} Loaded {} users in {}",
        style("\u{2713}").green().bold(),
        style(directory.records().len()).cyan(),
        style(HumanDuration(start.elapsed())).cyan()
    );
    if !directory.committed_term().is_empty() {
        let fields: Vec<&str> = directory.fields().iter().map(|f| f.label()).collect();
        println!(
            "{} Search: {} {}",
            style("\u{2192}").cyan().bold(),
            style(directory.committed_term()).yellow(),
            style(format!("(in {})", fields.join(", "))).dim()
        );
    }
    println!();
    print_page(&view);
    Ok(())
}

fn print_page(view: &DirectoryView) {
    if view.is_empty() {
        println!("  {}", style("No data found!").bold());
        println!();
        println!("  {}", style(view.range_label()).dim());
        return;
    }

    println!(
        "  {:>4}  {:<26} {:<28} {:<22} {}",
        style("ID").bold(),
        style("Name").bold(),
        style("Email").bold(),
        style("Phone").bold(),
        style("Company").bold()
    );
    for user in &view.page_items {
        println!(
            "  {:>4}  {:<26} {:<28} {:<22} {}",
            style(user.id).dim(),
            user.display_name,
            style(&user.email).cyan(),
            user.phone,
            user.organization_name()
        );
        println!("        {}", style(user.handle_label()).dim());
    }

    println!();
    if view.show_pagination() {
        println!(
            "  {}    {}",
            style(view.range_label()).dim(),
            style(view.page_label()).bold()
        );
    } else {
        println!("  {}", style(view.range_label()).dim());
    }
}

/// Show command implementation
fn cmd_show(source: Arc<dyn RecordSource>, id: u64, json: bool) -> userdir::Result<()> {
    let mut controller = DetailController::new(source);
    controller.load(id);

    let pb = spinner(format!("Fetching user {}", id));
    while !controller.wait(Duration::from_millis(100)) {}
    pb.finish_and_clear();

    let Some(record) = controller.record() else {
        let reason = controller.last_error().unwrap_or("no record returned");
        return Err(DirectoryError::Load(reason.to_string()));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!(
        "{} {}",
        style(&record.display_name).bold(),
        style(record.handle_label()).dim()
    );
    for section in detail::sections(record) {
        println!();
        println!("{}", style(section.title).cyan().bold());
        for field in &section.fields {
            println!("  {:<14} {}", style(field.label).dim(), field.value);
        }
    }
    Ok(())
}
