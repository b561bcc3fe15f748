//! Output formatting for CLI results

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Print data wrapped in the JSON envelope
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    println!("{}", json::format_json(data)?);
    Ok(())
}
