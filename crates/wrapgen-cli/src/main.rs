//! `wrapgen` binary

use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = wrapgen_cli::command().get_matches();
    wrapgen_cli::init_tracing(matches.get_one::<String>("log").map(String::as_str));

    let mut stdout = std::io::stdout().lock();
    match wrapgen_cli::run(&matches, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
