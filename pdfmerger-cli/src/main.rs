//! pdfmerger - Merge PDF files into a single document.
//!
//! Command-line front end over the pdfmerger library: whole-file merges in
//! argument order, or page-level merges driven by a JSON page order file.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::cli::Cli;
use pdfmerger::config::Config;
use pdfmerger::error::{PdfMergerError, Result};
use pdfmerger::logging;
use pdfmerger::merge::{MergeResult, Merger};
use pdfmerger::order::OrderedPageList;
use pdfmerger::output::{OutputFormatter, ProgressBar, ProgressStyle, display_sources};
use pdfmerger::session::MergeSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config()?;
    logging::init(&config.log);

    let formatter = OutputFormatter::from_config(&config);
    let inputs = cli.resolve_inputs()?;

    let mut session = MergeSession::with_merger(Merger::from_config(&config));
    session.add_files(&inputs)?;

    if cli.list_pages {
        let pages = session.page_order().await?;
        println!("{}", pages.to_json()?);
        return Ok(());
    }

    let custom_order = match &cli.order {
        Some(path) => Some(read_page_order(path).await?),
        None => None,
    };

    if custom_order.is_none() && !session.can_merge() {
        return Err(PdfMergerError::invalid_config(
            "at least two PDF files are needed to merge (use --order to pick pages from one)",
        ));
    }

    if formatter.should_print() {
        formatter.info(&format!(
            "{} v{}: {} file(s), {} page(s)",
            pdfmerger::NAME,
            pdfmerger::VERSION,
            session.len(),
            session.total_pages()
        ));
        display_sources(&formatter, session.files());
    }

    formatter.info("Merging documents...");
    let result = merge_with_progress(&session, &config, &formatter, custom_order).await?;
    report(&formatter, &result);

    if cli.open && !pdfmerger::utils::open_in_viewer(&result.output_path) {
        formatter.warning("Could not open the merged file in a viewer");
    }

    Ok(())
}

/// Read a page order written by `--list-pages` (or by hand).
async fn read_page_order(path: &Path) -> Result<OrderedPageList> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PdfMergerError::FileNotAccessible {
            path: path.to_path_buf(),
            source,
        })?;
    let pages = OrderedPageList::from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        pages = pages.len(),
        "loaded page order"
    );
    Ok(pages)
}

/// Run the merge while a separate task renders the progress bar.
async fn merge_with_progress(
    session: &MergeSession,
    config: &Config,
    formatter: &OutputFormatter,
    custom_order: Option<OrderedPageList>,
) -> Result<MergeResult> {
    let (tx, mut rx) = mpsc::unbounded_channel::<u8>();

    let mut bar = if formatter.should_print() {
        ProgressBar::new(ProgressStyle::Bar)
    } else {
        ProgressBar::disabled()
    };
    bar.set_message("Merging");

    let renderer = tokio::spawn(async move {
        let mut updated = false;
        while let Some(percent) = rx.recv().await {
            bar.update(percent);
            updated = true;
        }
        if updated {
            bar.finish();
        } else {
            bar.clear();
        }
    });

    // The sender moves into the merge; the renderer stops once it is dropped.
    let result = session
        .merge(config.output.clone(), Some(Arc::new(tx)), custom_order)
        .await;
    renderer.await?;
    result
}

/// Print the outcome of a merge.
fn report(formatter: &OutputFormatter, result: &MergeResult) {
    let stats = &result.statistics;

    if !formatter.should_print() {
        println!("{}", result.output_path.display());
        return;
    }

    formatter.success(&format!(
        "Created {} ({})",
        result.output_path.display(),
        stats.format_output_size()
    ));

    if formatter.is_verbose() {
        formatter.detail("Source files", &stats.files_merged.to_string());
        formatter.detail("Total pages", &stats.total_pages.to_string());
        formatter.detail("Output size", &stats.format_output_size());
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", stats.merge_time.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", stats.write_time.as_secs_f64()),
        );
        formatter.detail("Compression", if stats.compressed { "Yes" } else { "No" });
    }
}
