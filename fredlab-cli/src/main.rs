//! FredLab CLI — search, fetch, compare, and export commands.
//!
//! Commands:
//! - `search` — keyword search, top 3 ranked results
//! - `fetch` — fetch a series, print a summary and the last rows
//! - `compare` — fetch two series, align, and print the correlation
//! - `popular` — list the curated popular indicators
//! - `export` — write a series to CSV (full and/or quarterly resolution)
//! - `menu` — interactive numbered-menu mode

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use fredlab_core::analysis::align_and_correlate;
use fredlab_core::data::{
    export_series_csv, export_series_quarterly_csv, DataService, FredProvider, PopularList,
    SearchHit,
};
use fredlab_core::domain::{DateRange, SeriesSelection, TimeSeries};
use fredlab_core::session::{SessionState, Slot};

#[derive(Parser)]
#[command(
    name = "fredlab",
    about = "FredLab CLI — FRED economic indicator comparison workbench"
)]
struct Cli {
    /// FRED API key. Falls back to the FRED_API_KEY environment variable.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for series by keyword; shows the top 3 ranked results.
    Search {
        /// Search terms (e.g., unemployment rate).
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Fetch a series and print a summary with the last rows.
    Fetch {
        /// Series id (e.g., UNRATE).
        series_id: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Also write the series to this CSV path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch two series, align them, and print the correlation.
    Compare {
        /// First series id.
        series_id1: String,

        /// Second series id (the one the scale applies to).
        series_id2: String,

        /// Start date (YYYY-MM-DD). Defaults to one year ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Multiplicative scale applied to the second series.
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
    /// List the curated popular indicators.
    Popular,
    /// Write a series to CSV.
    Export {
        /// Series id.
        series_id: String,

        /// Output path for the full-resolution CSV.
        #[arg(long)]
        out: PathBuf,

        /// Also write a quarterly-sampled CSV next to the full one.
        #[arg(long, default_value_t = false)]
        quarterly: bool,
    },
    /// Interactive numbered-menu mode.
    Menu,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let api_key = resolve_api_key(cli.api_key)?;
    let mut service = DataService::new(FredProvider::new(api_key));

    match cli.command {
        Commands::Search { query } => run_search(&mut service, &query.join(" ")),
        Commands::Fetch {
            series_id,
            start,
            end,
            out,
        } => run_fetch(&mut service, &series_id, start, end, out),
        Commands::Compare {
            series_id1,
            series_id2,
            start,
            end,
            scale,
        } => run_compare(&mut service, &series_id1, &series_id2, start, end, scale),
        Commands::Popular => run_popular(),
        Commands::Export {
            series_id,
            out,
            quarterly,
        } => run_export(&mut service, &series_id, &out, quarterly),
        Commands::Menu => run_menu(&mut service),
    }
}

fn resolve_api_key(flag: Option<String>) -> Result<String> {
    if let Some(key) = flag {
        return Ok(key);
    }
    if let Ok(key) = std::env::var("FRED_API_KEY") {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }
    bail!("no API key: pass --api-key or set FRED_API_KEY");
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let start = start
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date (expected YYYY-MM-DD)")?;
    let end = end
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date (expected YYYY-MM-DD)")?;

    let range = DateRange::new(start, end);
    if let Err(msg) = range.validate(chrono::Local::now().date_naive()) {
        bail!("invalid date range: {msg}");
    }
    Ok(range)
}

/// Default comparison window: the last year, matching the dashboard.
fn default_compare_range() -> DateRange {
    let today = chrono::Local::now().date_naive();
    DateRange::new(Some(today - chrono::Duration::days(365)), Some(today))
}

// ── Subcommands ─────────────────────────────────────────────────────

fn run_search(service: &mut DataService<FredProvider>, query: &str) -> Result<()> {
    match service.search(query) {
        Ok(hits) if hits.is_empty() => {
            println!("No results for '{query}'. Try a different search term.");
        }
        Ok(hits) => print_search_hits(&hits),
        Err(e) => {
            eprintln!("Warning: search failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_fetch(
    service: &mut DataService<FredProvider>,
    series_id: &str,
    start: Option<String>,
    end: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let range = parse_range(start.as_deref(), end.as_deref())?;

    let series = match service.fetch(series_id, range) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("Warning: could not fetch {series_id}: {e}");
            std::process::exit(1);
        }
    };

    print_series_summary(&series, series_id);
    print_tail(&series, 5);

    if let Some(path) = out {
        export_series_csv(&series, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}

fn run_compare(
    service: &mut DataService<FredProvider>,
    series_id1: &str,
    series_id2: &str,
    start: Option<String>,
    end: Option<String>,
    scale: f64,
) -> Result<()> {
    let range = if start.is_none() && end.is_none() {
        default_compare_range()
    } else {
        parse_range(start.as_deref(), end.as_deref())?
    };

    let series1 = fetch_or_warn(service, series_id1, range);
    let series2 = fetch_or_warn(service, series_id2, range);

    // Whatever fetched still gets shown; only the correlation needs both.
    if let Some(s) = &series1 {
        print_series_summary(s, series_id1);
    }
    if let Some(s) = &series2 {
        print_series_summary(s, series_id2);
    }

    let (Some(series1), Some(series2)) = (series1, series2) else {
        std::process::exit(1);
    };

    print_comparison(&series1, &series2, series_id1, series_id2, scale);
    Ok(())
}

fn run_popular() -> Result<()> {
    println!("{:<10} {}", "Id", "Indicator");
    println!("{}", "-".repeat(44));
    for indicator in PopularList::default_us().iter() {
        println!("{:<10} {}", indicator.id, indicator.label);
    }
    Ok(())
}

fn run_export(
    service: &mut DataService<FredProvider>,
    series_id: &str,
    out: &PathBuf,
    quarterly: bool,
) -> Result<()> {
    let series = match service.fetch(series_id, DateRange::default()) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("Warning: could not fetch {series_id}: {e}");
            std::process::exit(1);
        }
    };

    export_series_csv(&series, out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("Saved: {}", out.display());

    if quarterly {
        let quarterly_path = quarterly_path_for(out);
        export_series_quarterly_csv(&series, &quarterly_path, chrono::Local::now().date_naive())
            .with_context(|| format!("failed to write {}", quarterly_path.display()))?;
        println!("Saved: {}", quarterly_path.display());
    }

    Ok(())
}

/// `unrate.csv` → `unrate_quarterly.csv`.
fn quarterly_path_for(path: &PathBuf) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "series".into());
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".into());
    path.with_file_name(format!("{stem}_quarterly.{ext}"))
}

// ── Interactive menu ────────────────────────────────────────────────

fn run_menu(service: &mut DataService<FredProvider>) -> Result<()> {
    let mut session = SessionState::new();
    session.range = default_compare_range();

    loop {
        println!();
        println!("=== FRED Economic Data Workbench ===");
        print_session_line(&session);
        println!("1. Search for a series");
        println!("2. Select series for slot 1");
        println!("3. Select series for slot 2");
        println!("4. Set date range");
        println!("5. Show a single series");
        println!("6. Compare and correlate");
        if session.scale_adjust_enabled() {
            println!("7. Adjust scale (halve / double / reset)");
        }
        println!("q. Quit");

        match prompt("\nEnter your choice: ")?.as_str() {
            "1" => menu_search(service)?,
            "2" => menu_select(service, &mut session, Slot::First)?,
            "3" => menu_select(service, &mut session, Slot::Second)?,
            "4" => menu_set_range(&mut session)?,
            "5" => menu_show_series(service, &session)?,
            "6" => menu_compare(service, &session),
            "7" if session.scale_adjust_enabled() => menu_adjust_scale(&mut session)?,
            "q" | "Q" => {
                println!("Goodbye.");
                return Ok(());
            }
            other => println!("Invalid choice '{other}'. Please try again."),
        }
    }
}

fn print_session_line(session: &SessionState) {
    let slot_label = |slot| {
        session
            .selection(slot)
            .map(|s: &SeriesSelection| s.id.clone())
            .unwrap_or_else(|| "(none)".into())
    };
    println!(
        "[slot 1: {} | slot 2: {} | scale: {} | range: {} to {}]",
        slot_label(Slot::First),
        slot_label(Slot::Second),
        session.scale,
        session
            .range
            .start
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".into()),
        session
            .range
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".into()),
    );
}

fn menu_search(service: &mut DataService<FredProvider>) -> Result<()> {
    let query = prompt("Search terms: ")?;
    if query.is_empty() {
        return Ok(());
    }
    match service.search(&query) {
        Ok(hits) if hits.is_empty() => {
            println!("No results for '{query}'. Try a different search term.")
        }
        Ok(hits) => print_search_hits(&hits),
        Err(e) => println!("Warning: search failed: {e}"),
    }
    Ok(())
}

fn menu_select(
    service: &mut DataService<FredProvider>,
    session: &mut SessionState,
    slot: Slot,
) -> Result<()> {
    let id = prompt(&format!("Series id for {}: ", slot.label()))?.to_uppercase();
    if id.is_empty() {
        return Ok(());
    }

    // Best-effort title lookup so the comparison output reads well.
    let title = match service.search(&id) {
        Ok(hits) => hits
            .iter()
            .find(|h| h.id == id)
            .map(|h| h.title.clone())
            .unwrap_or_else(|| id.clone()),
        Err(_) => id.clone(),
    };

    session.select(slot, SeriesSelection::new(id.clone(), title, session.range));
    println!("{} set to {id}.", slot.label());
    Ok(())
}

fn menu_set_range(session: &mut SessionState) -> Result<()> {
    let start = prompt("Start date (YYYY-MM-DD, empty for open): ")?;
    let end = prompt("End date (YYYY-MM-DD, empty for open): ")?;

    let start = if start.is_empty() { None } else { Some(start) };
    let end = if end.is_empty() { None } else { Some(end) };

    match parse_range(start.as_deref(), end.as_deref()) {
        Ok(range) => {
            session.range = range;
            println!("Date range updated.");
        }
        Err(e) => println!("Warning: {e}"),
    }
    Ok(())
}

fn menu_show_series(service: &mut DataService<FredProvider>, session: &SessionState) -> Result<()> {
    let id = prompt("Series id: ")?.to_uppercase();
    if id.is_empty() {
        return Ok(());
    }

    match service.fetch(&id, session.range) {
        Ok(series) => {
            print_series_summary(&series, &id);
            print_tail(&series, 5);

            if prompt("Save data to CSV? (y/n): ")?.eq_ignore_ascii_case("y") {
                let path = PathBuf::from(format!("{}.csv", id.to_lowercase()));
                match export_series_csv(&series, &path) {
                    Ok(()) => println!("Saved: {}", path.display()),
                    Err(e) => println!("Warning: could not save: {e}"),
                }
            }
        }
        Err(e) => println!("Warning: could not fetch {id}: {e}"),
    }
    Ok(())
}

fn menu_compare(service: &mut DataService<FredProvider>, session: &SessionState) {
    let (Some(sel1), Some(sel2)) = (
        session.selection(Slot::First),
        session.selection(Slot::Second),
    ) else {
        println!("Select series for both slots first (options 2 and 3).");
        return;
    };

    let series1 = fetch_or_warn(service, &sel1.id, session.range);
    let series2 = fetch_or_warn(service, &sel2.id, session.range);

    if let Some(s) = &series1 {
        print_series_summary(s, &sel1.title);
        print_tail(s, 5);
    }
    if let Some(s) = &series2 {
        print_series_summary(s, &sel2.title);
        print_tail(s, 5);
    }

    let (Some(series1), Some(series2)) = (series1, series2) else {
        return;
    };

    print_comparison(
        &series1,
        &series2,
        &sel1.title,
        &sel2.title,
        session.scale.value(),
    );
}

fn menu_adjust_scale(session: &mut SessionState) -> Result<()> {
    match prompt("Scale: (h)alve, (d)ouble, (r)eset: ")?.as_str() {
        "h" | "H" => {
            session.halve_scale();
        }
        "d" | "D" => {
            session.double_scale();
        }
        "r" | "R" => {
            session.reset_scale();
        }
        other => println!("Invalid choice '{other}'."),
    }
    println!("Scale is now {}.", session.scale);
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// ── Output helpers ──────────────────────────────────────────────────

fn fetch_or_warn(
    service: &mut DataService<FredProvider>,
    series_id: &str,
    range: DateRange,
) -> Option<TimeSeries> {
    match service.fetch(series_id, range) {
        Ok(series) => Some(series),
        Err(e) => {
            eprintln!("Warning: could not fetch {series_id}: {e}");
            None
        }
    }
}

fn print_search_hits(hits: &[SearchHit]) {
    println!("Top {} results:", hits.len());
    println!(
        "{:<12} {:<44} {:<11} {:<11} {}",
        "Id", "Title", "Start", "End", "Frequency"
    );
    println!("{}", "-".repeat(92));
    for hit in hits {
        let mut title: String = hit.title.chars().take(42).collect();
        if title.len() < hit.title.len() {
            title.push('…');
        }
        println!(
            "{:<12} {:<44} {:<11} {:<11} {}",
            hit.id, title, hit.observation_start, hit.observation_end, hit.frequency
        );
    }
}

fn print_series_summary(series: &TimeSeries, label: &str) {
    println!();
    println!("=== {label} ===");
    println!("Observations:   {}", series.len());
    println!("With values:    {}", series.non_missing_len());
    if let (Some(first), Some(last)) = (series.first_date(), series.last_date()) {
        println!("Period:         {first} to {last}");
    }
}

fn print_tail(series: &TimeSeries, n: usize) {
    println!("Last {} rows:", series.tail(n).len());
    for obs in series.tail(n) {
        match obs.value {
            Some(v) => println!("  {}  {v}", obs.date),
            None => println!("  {}  .", obs.date),
        }
    }
}

fn print_comparison(
    series1: &TimeSeries,
    series2: &TimeSeries,
    label1: &str,
    label2: &str,
    scale: f64,
) {
    println!();
    println!("--- Correlation ---");
    println!("{label1}  vs  {label2} (x{scale:.2})");

    match align_and_correlate(series1, series2, scale) {
        Ok(result) => {
            println!("Coefficient:    {:.3}", result.coefficient);
            println!("Aligned points: {}", result.aligned_points);
        }
        // Insufficient data only suppresses the readout; the series
        // summaries above already printed.
        Err(e) => println!("Warning: {e}"),
    }
}
