//! Command line interface of `crusti_graph`.

mod app;

use std::process::ExitCode;

fn main() -> ExitCode {
    let arg_matches = app::clap_app().get_matches();
    if let Err(e) = app::init_logging(&arg_matches) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }
    match app::execute(&arg_matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
