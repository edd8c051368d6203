use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use healthstat_core::export::{encounters_to_csv, CSV_IMPORT_TEMPLATE};
use healthstat_core::{
    CoreConfig, DashboardExport, DashboardSummary, DraftField, DraftForm, Encounter, Screen,
    View, ViewController,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Targets are crate names.
const DEFAULT_LOG_FILTER: &str = "healthstat_cli=info,healthstat_core=info";

#[derive(Parser)]
#[command(name = "healthstat")]
#[command(about = "HealthStat Hub encounter recorder (in-memory)")]
struct Cli {
    /// Start without the sample encounters
    #[arg(long, global = true)]
    no_seed: bool,

    /// Number of conditions listed on the dashboard
    #[arg(long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all encounters
    List {
        /// Print as CSV
        #[arg(long)]
        csv: bool,
    },
    /// Print the CSV import template
    Template,
    /// Read commands from stdin: view, set, save, clear, show, quit
    Session,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut app = ViewController::new(config);

    match cli.command.unwrap_or(Commands::Dashboard { json: false }) {
        Commands::Dashboard { json } => {
            if json {
                println!("{}", DashboardExport::new(app.dashboard()).to_json()?);
            } else {
                print_dashboard(&app.dashboard());
            }
        }
        Commands::List { csv } => {
            if csv {
                print!("{}", encounters_to_csv(app.store().all()));
            } else {
                print_list(app.store().all());
            }
        }
        Commands::Template => print!("{}", CSV_IMPORT_TEMPLATE),
        Commands::Session => run_session(&mut app)?,
    }

    Ok(())
}

/// Environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let env = CoreConfig::from_env().context("reading configuration from environment")?;
    let seed = env.seed_sample_data() && !cli.no_seed;
    let top = cli.top.unwrap_or(env.top_conditions_limit());
    Ok(CoreConfig::new(seed, top)?)
}

fn run_session(app: &mut ViewController) -> anyhow::Result<()> {
    let stdin = io::stdin();
    render(app);
    prompt()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match command {
            "" => {}
            "quit" | "exit" => break,
            "show" => render(app),
            "view" => match rest.parse::<View>() {
                Ok(view) => {
                    app.navigate(view);
                    render(app);
                }
                Err(e) => eprintln!("{}", e),
            },
            "set" => {
                let mut field_value = rest.splitn(2, ' ');
                let field = field_value.next().unwrap_or_default();
                let value = field_value.next().unwrap_or_default().trim();
                let result = field
                    .parse::<DraftField>()
                    .map_err(Into::into)
                    .and_then(|field| app.set_draft_field(field, value));
                if let Err(e) = result {
                    eprintln!("{}", e);
                }
            }
            "save" => match app.save() {
                Ok(encounter) => {
                    println!("Saved encounter {}", encounter.id);
                    render(app);
                }
                Err(e) => eprintln!("{}", e),
            },
            "clear" => {
                app.clear_draft();
                render(app);
            }
            other => eprintln!("Unknown command: {}", other),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn render(app: &ViewController) {
    match app.current_screen() {
        Screen::Dashboard(summary) => print_dashboard(&summary),
        Screen::NewEncounter(draft) => print_draft(draft),
        Screen::List(records) => print_list(records),
    }
}

fn print_dashboard(summary: &DashboardSummary) {
    println!("Total Visits: {}", summary.total_visits);
    match &summary.top_condition {
        Some(top) => println!("Top Condition: {} ({} cases)", top.label, top.count),
        None => println!("Top Condition: -"),
    }
    match &summary.top_medication {
        Some(top) => println!("Top Medication: {}", top.label),
        None => println!("Top Medication: -"),
    }

    println!("\nTop Conditions");
    for (rank, tally) in summary.top_conditions.iter().enumerate() {
        println!("  {}. {} - {}", rank + 1, tally.label, tally.count);
    }

    println!("\nAge Bands");
    for tally in &summary.age_bands {
        println!("  {}: {}", tally.label, tally.count);
    }
}

fn print_draft(draft: &DraftForm) {
    println!("New Encounter");
    println!("  date:      {}", draft.date);
    println!("  age:       {}", draft.age);
    println!("  sex:       {}", draft.sex);
    println!("  diagnosis: {}", draft.diagnosis);
    println!("  meds:      {}", draft.meds);
    println!("  tests:     {}", draft.tests);
}

fn print_list(records: &[Encounter]) {
    if records.is_empty() {
        println!("No encounters recorded.");
        return;
    }
    println!(
        "{:<12} {:<5} {:<4} {:<20} {:<28} {}",
        "Date", "Age", "Sex", "Diagnosis", "Meds", "Tests"
    );
    for r in records {
        println!(
            "{:<12} {:<5} {:<4} {:<20} {:<28} {}",
            r.date,
            r.age,
            r.sex.code(),
            r.diagnosis,
            r.meds,
            r.tests
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_covers_both_crates() {
        assert!(DEFAULT_LOG_FILTER
            .parse::<tracing_subscriber::EnvFilter>()
            .is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("healthstat_cli=info"));
        assert!(DEFAULT_LOG_FILTER.contains("healthstat_core=info"));
    }
}
