use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as AnyhowContext, Result};

use smi_forge::build::build_3d;
use smi_forge::similarity::similarity;
use smi_forge::smiles;

use crate::cli::Cli;
use crate::config;
use crate::display::{self, BatchProgress, Context};

pub fn run(cli: Cli, ctx: Context) -> Result<()> {
    let build_config = config::build_build_config(&cli)?;

    // An unparsable reference aborts the whole batch before any line is
    // processed; in single mode the same input is a per-run notice.
    let ref_mol = match &cli.similarity.reference {
        Some(reference) => Some(
            smiles::parse(reference)
                .map_err(|_| anyhow!("Invalid reference SMILES: {reference}"))?,
        ),
        None => None,
    };

    fs::create_dir_all(&cli.output).with_context(|| {
        format!("Failed to create output directory {}", cli.output.display())
    })?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file {}", cli.input))?;

    let mut log = if cli.protonation.protonate {
        Some(ProtonationLog::create(&cli.output)?)
    } else {
        None
    };

    let progress = BatchProgress::new(ctx.interactive, text.lines().count() as u64);

    for (idx, line) in text.lines().enumerate() {
        let smiles_in = line.trim();
        progress.advance(smiles_in);
        if smiles_in.is_empty() {
            continue;
        }

        // Base names follow the 1-based line index, so blank lines leave
        // gaps in the numbering rather than shifting it.
        let base = cli.output.join(format!("mol_{}", idx + 1));
        let outcome = progress.run(|| build_3d(smiles_in, &base, &build_config));

        let (Some(mol), Some(props)) = (&outcome.molecule, &outcome.properties) else {
            continue;
        };

        progress.run(|| -> Result<()> {
            println!("Processed {smiles_in}");
            display::print_properties(props);

            if let (Some(log), Some(variants)) = (log.as_mut(), outcome.variants.as_ref()) {
                for variant in variants {
                    log.record(
                        smiles_in,
                        variant,
                        cli.protonation.ph_min,
                        cli.protonation.ph_max,
                    )?;
                }
            }

            if let Some(reference) = &ref_mol {
                let score = similarity(
                    mol,
                    reference,
                    config::fp_kind(cli.similarity.fp_type),
                    cli.similarity.radius,
                    cli.similarity.bits,
                );
                println!("Tanimoto similarity to reference: {score:.4}");
            }
            Ok(())
        })?;
    }

    progress.finish();

    if let Some(log) = log {
        let path = log.finish()?;
        println!("Protonation states saved to: {}", path.display());
    }

    Ok(())
}

/// Scoped batch log for enumerated protonation states. The handle owns the
/// file for the whole run; dropping it (on any exit path, including an
/// abort) closes the file with whatever rows were recorded.
struct ProtonationLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl ProtonationLog {
    fn create(output_dir: &Path) -> Result<Self> {
        let path = output_dir.join("protonation_states.txt");
        let file = File::create(&path)
            .with_context(|| format!("Failed to create protonation log {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(b"Original_SMILES\tProtonated_SMILES\tpH_Range\n")?;
        Ok(Self { writer, path })
    }

    fn record(&mut self, original: &str, variant: &str, ph_min: f64, ph_max: f64) -> Result<()> {
        writeln!(self.writer, "{original}\t{variant}\t{ph_min}-{ph_max}")?;
        Ok(())
    }

    fn finish(self) -> Result<PathBuf> {
        let Self { mut writer, path } = self;
        writer.flush()?;
        Ok(path)
    }
}
