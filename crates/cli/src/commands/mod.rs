//! CLI command implementations.

pub mod activate;
pub mod add;
pub mod completions;
pub mod delete;
pub mod list;
pub mod show;

use anyhow::Result;

/// Print a formatted result, skipping empty output.
pub(crate) fn print_output(output: &str) -> Result<()> {
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
