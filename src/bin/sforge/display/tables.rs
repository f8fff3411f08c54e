use std::path::Path;

use smi_forge::io::Format;
use smi_forge::props::PropertyMap;

pub fn print_generated_files(output_base: &Path) {
    let files: Vec<String> = Format::ALL
        .iter()
        .map(|f| format!("{}.{}", output_base.display(), f.extension()))
        .collect();
    println!("Generated files: {files:?}");
}

/// Property block with every value at two decimals.
pub fn print_properties(props: &PropertyMap) {
    println!();
    println!("Molecular Properties:");
    for (name, value) in props.iter() {
        println!("{name}: {value:.2}");
    }
}

pub fn print_protonation_states(variants: &[String], ph_min: f64, ph_max: f64) {
    println!();
    println!("Protonation states at pH {ph_min}-{ph_max}:");
    for (i, variant) in variants.iter().enumerate() {
        println!("  {}. {}", i + 1, variant);
    }
}
