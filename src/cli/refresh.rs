//! Refresh command implementation

use crate::cli::{GlobalOptions, OutputFormat};
use crate::credential::AkamaiCli;
use crate::error::Result;
use crate::output;
use crate::refresh;

/// Run the refresh command.
///
/// In pretty mode the new pair is reported before the header is rewritten;
/// in JSON mode the full outcome is printed once the rewrite succeeds.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config = opts.resolve_config()?;
    let source = AkamaiCli::from_config(&config);

    let outcome = refresh::refresh(&config, &source, |pair| {
        if opts.format == OutputFormat::Pretty {
            println!("new auth_key = {pair}");
        }
    })?;

    if opts.format == OutputFormat::Json {
        output::print_json(&outcome)?;
    }

    Ok(())
}
