use anyhow::Result;

use smi_forge::build::build_3d;
use smi_forge::similarity::similarity;
use smi_forge::smiles;

use crate::cli::Cli;
use crate::config;
use crate::display::{self, Context};

pub fn run(cli: Cli, _ctx: Context) -> Result<()> {
    let build_config = config::build_build_config(&cli)?;
    let outcome = build_3d(&cli.input, &cli.output, &build_config);

    let (Some(mol), Some(props)) = (&outcome.molecule, &outcome.properties) else {
        // Diagnostics were printed by the pipeline; a failed entry is not a
        // process failure in single mode.
        return Ok(());
    };

    display::print_generated_files(&cli.output);
    display::print_properties(props);

    if cli.protonation.protonate {
        if let Some(variants) = &outcome.variants {
            display::print_protonation_states(
                variants,
                cli.protonation.ph_min,
                cli.protonation.ph_max,
            );
        }
    }

    if let Some(reference) = &cli.similarity.reference {
        match smiles::parse(reference) {
            Ok(ref_mol) => {
                let score = similarity(
                    mol,
                    &ref_mol,
                    config::fp_kind(cli.similarity.fp_type),
                    cli.similarity.radius,
                    cli.similarity.bits,
                );
                println!("Tanimoto similarity to reference: {score:.4}");
            }
            // Unlike batch mode, a bad reference only costs the similarity
            // line here.
            Err(_) => println!("Invalid reference SMILES: {reference}"),
        }
    }

    Ok(())
}
