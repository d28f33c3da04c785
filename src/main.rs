//! kusss-merge - KUSSS participant list merger
//!
//! A command line tool that merges multiple KUSSS course-participant CSV
//! exports into a single deduplicated, sorted CSV file. Students enrolled in
//! more than one course end up in one row carrying the sorted list of all
//! their course IDs.

use clap::Parser;
use console::Style;

mod cli;
mod course_id;
mod error;
mod merge;
mod reader;
mod table;
mod writer;

use cli::Cli;
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the whole pipeline: resolve course IDs, load, merge, write
///
/// Nothing is written until the merge has fully succeeded, so a failing run
/// never leaves a partial output file behind.
fn run(cli: &Cli) -> Result<()> {
    let encoding = reader::resolve_encoding(&cli.encoding)?;
    let delimiter = reader::parse_separator(&cli.separator)?;
    let course_ids = course_id::resolve(&cli.files, &cli.course_ids)?;

    let mut tables = Vec::with_capacity(cli.files.len());
    for (file, course_id) in cli.files.iter().zip(&course_ids) {
        let table = reader::load_table(file, encoding, delimiter, course_id)?;
        if cli.verbose {
            println!(
                "Loaded {} rows from {} (course {})",
                table.rows.len(),
                file.display(),
                course_id
            );
        }
        tables.push(table);
    }

    let merged = merge::merge(tables, &cli.merge_cols, &cli.sort_cols)?;

    let output = cli.output_path();
    writer::write_table(&merged, &output)?;

    println!(
        "{} {} rows into {}",
        Style::new().green().bold().apply_to("Merged"),
        merged.rows.len(),
        output.display()
    );

    Ok(())
}
