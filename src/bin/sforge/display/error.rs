use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    if let Some(io_err) = err.chain().find_map(|c| c.downcast_ref::<std::io::Error>()) {
        match io_err.kind() {
            io::ErrorKind::NotFound => {
                hints.push("Check the path spelling and ensure the file exists".to_string());
            }
            io::ErrorKind::PermissionDenied => {
                hints.push("Check file permissions with `ls -la`".to_string());
                hints.push("Ensure you have read/write access as needed".to_string());
            }
            _ => {}
        }
    }

    let text = error_chain_text(err);
    if text.contains("invalid reference smiles") {
        hints.push("Verify the --reference SMILES with a structure editor".to_string());
        hints.push("Similarity can be skipped by omitting --reference".to_string());
    }
    if text.contains("pka table") {
        hints.push("The pKa table is TOML: `carboxylic_acid = 4.2` per line".to_string());
        hints.push("Only the known group names are accepted as keys".to_string());
    }
    if text.contains("output directory") {
        hints.push("Pick an output directory you can write to with -o".to_string());
    }

    if hints.is_empty() { None } else { Some(hints) }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text.to_lowercase()
}
