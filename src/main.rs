#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use student_records::config::resolve_config;
use student_records::{StoreResult, edit_cmd, export_cmd, menu_cmd, query_cmd};

#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(about = "Keep, query and export a flat file of student records", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set STUDENT_RECORDS_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// TOML config file (data_file, export_file, csv_style)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file, overrides the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every record in file order
    List {
        /// Write the records as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show the record with the highest marks
    Topper {
        /// Write the record as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show the average marks
    Average,

    /// Show records sorted by marks, highest first
    Sort {
        /// Also rewrite the data file in sorted order
        #[arg(long)]
        save: bool,
    },

    /// Find records whose name contains QUERY
    Search {
        query: String,
        /// Match regardless of case
        #[arg(long, short = 'i')]
        ignore_case: bool,
        /// Write the matches as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Export all records to CSV
    Export {
        /// Output path, overrides the config
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Append a record and save
    Add {
        #[arg(allow_hyphen_values = true)]
        roll_no: i64,
        name: String,
        #[arg(allow_hyphen_values = true)]
        marks: f64,
    },

    /// Remove every record with ROLL_NO and save
    Remove {
        #[arg(allow_hyphen_values = true)]
        roll_no: i64,
    },

    /// Record count, average and topper
    Summary {
        /// Write a machine-readable summary to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Interactive menu (the default when no command is given)
    Shell,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("STUDENT_RECORDS_LOG").unwrap_or_else(|_| {
        if verbose {
            "student_records=debug".to_string()
        } else {
            "student_records=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn dispatch(cli: Cli) -> StoreResult<()> {
    let config = resolve_config(cli.config.as_deref())?.with_overrides(cli.data, None);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::List { json } => query_cmd::list(&config, &mut out, json.as_deref()),
        Commands::Topper { json } => query_cmd::topper(&config, &mut out, json.as_deref()),
        Commands::Average => query_cmd::average(&config, &mut out),
        Commands::Sort { save } => query_cmd::sort(&config, &mut out, save),
        Commands::Search { query, ignore_case, json } => {
            query_cmd::search(&config, &mut out, &query, ignore_case, json.as_deref())
        }
        Commands::Export { output } => export_cmd::run(&config, &mut out, output).map(|_| ()),
        Commands::Add { roll_no, name, marks } => {
            edit_cmd::add(&config, &mut out, roll_no, &name, marks)
        }
        Commands::Remove { roll_no } => edit_cmd::remove(&config, &mut out, roll_no).map(|_| ()),
        Commands::Summary { json } => query_cmd::summary(&config, &mut out, json.as_deref()),
        Commands::Shell => {
            drop(out);
            menu_cmd::run(&config)
        }
    }?;

    std::io::stdout().flush()?;
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
