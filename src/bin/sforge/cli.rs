use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "sforge",
    about = "SMILES to 3D conformers with protonation states, properties, and similarity",
    version,
    author,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// SMILES string, or a file with one SMILES per line
    #[arg(short, long, value_name = "SMILES|FILE")]
    pub input: String,

    /// Output directory (batch) or output base name (single)
    #[arg(short, long, value_name = "PATH", default_value = "output")]
    pub output: PathBuf,

    /// Number of conformers to generate
    #[arg(short = 'n', long = "num_confs", value_name = "N", default_value_t = 10)]
    pub num_confs: usize,

    /// Skip per-conformer geometry optimization
    #[arg(long = "no-optimize")]
    pub no_optimize: bool,

    #[command(flatten)]
    pub protonation: ProtonationOptions,

    #[command(flatten)]
    pub similarity: SimilarityOptions,

    /// Suppress banner and progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Protonation")]
pub struct ProtonationOptions {
    /// Enumerate protonation states across the pH window
    #[arg(long)]
    pub protonate: bool,

    /// Minimum pH for protonation
    #[arg(long = "ph_min", value_name = "PH", default_value_t = 6.4)]
    pub ph_min: f64,

    /// Maximum pH for protonation
    #[arg(long = "ph_max", value_name = "PH", default_value_t = 8.4)]
    pub ph_max: f64,

    /// pKa precision factor widening the ambiguous band
    #[arg(long, value_name = "F", default_value_t = 1.0)]
    pub precision: f64,

    /// Maximum protonation variants
    #[arg(long = "max_variants", value_name = "N", default_value_t = 128)]
    pub max_variants: usize,

    /// Custom intrinsic pKa values (TOML file)
    #[arg(long = "pka-table", value_name = "FILE")]
    pub pka_table: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Similarity")]
pub struct SimilarityOptions {
    /// Reference SMILES for Tanimoto similarity
    #[arg(long, value_name = "SMILES")]
    pub reference: Option<String>,

    /// Fingerprint type
    #[arg(long = "fp_type", value_name = "TYPE", default_value = "morgan")]
    pub fp_type: FpType,

    /// Morgan fingerprint radius
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub radius: u32,

    /// Fingerprint bit size
    #[arg(long, value_name = "N", default_value_t = 2048)]
    pub bits: usize,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum FpType {
    /// Circular (ECFP-style) fingerprint
    #[default]
    Morgan,
    /// Topological path fingerprint
    Rdkit,
}

pub fn parse() -> Cli {
    Cli::parse()
}
