use anyhow::{Context, Result};

use smi_forge::build::BuildConfig;
use smi_forge::embed::DEFAULT_SEED;
use smi_forge::protonate::{PkaTable, ProtonationWindow};
use smi_forge::similarity::FpKind;

use crate::cli::{Cli, FpType};

pub fn build_build_config(cli: &Cli) -> Result<BuildConfig> {
    let pka_table = match &cli.protonation.pka_table {
        Some(path) => PkaTable::load(path)
            .with_context(|| format!("Failed to load pKa table from {}", path.display()))?,
        None => PkaTable::default(),
    };

    // The window is not validated here: an inverted or degenerate window is
    // handled by the enumerator's fail-open fallback, not a startup error.
    let protonation = cli.protonation.protonate.then(|| ProtonationWindow {
        ph_min: cli.protonation.ph_min,
        ph_max: cli.protonation.ph_max,
        precision: cli.protonation.precision,
        max_variants: cli.protonation.max_variants,
    });

    Ok(BuildConfig {
        num_confs: cli.num_confs,
        optimize: !cli.no_optimize,
        protonation,
        pka_table,
        seed: DEFAULT_SEED,
    })
}

pub fn fp_kind(fp_type: FpType) -> FpKind {
    match fp_type {
        FpType::Morgan => FpKind::Morgan,
        FpType::Rdkit => FpKind::Topological,
    }
}
