//! Reduce command implementation.

use crate::cli::DocumentArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use fieldsmith_extractor::{read_document, reduce_document};

/// Execute the reduce command.
///
/// The reduced text goes to stdout and the statistics to stderr, so the
/// text can be piped.
pub async fn execute_reduce(args: DocumentArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let raw = read_document(&args.input, &config.extractor)?;
    let reduced = reduce_document(&raw);

    println!("{}", reduced.text);
    eprintln!("{}", formatter.format_stats(&reduced.stats)?);
    Ok(())
}
