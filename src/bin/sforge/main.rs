use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let ctx = display::Context::detect().with_quiet(cli.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
