use std::io::IsTerminal;

mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::BatchProgress;
pub use tables::{print_generated_files, print_properties, print_protonation_states};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet { Self { interactive: false } } else { self }
    }
}
