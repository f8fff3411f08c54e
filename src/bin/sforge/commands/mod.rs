mod batch;
mod single;

use std::path::Path;

use anyhow::Result;

use crate::cli::Cli;
use crate::display::Context;

/// Mode selection: an input argument naming an existing file is a batch run,
/// anything else is treated as a literal SMILES string.
pub fn dispatch(cli: Cli, ctx: Context) -> Result<()> {
    if Path::new(&cli.input).is_file() {
        batch::run(cli, ctx)
    } else {
        single::run(cli, ctx)
    }
}
