use std::process::ExitCode;

fn main() -> ExitCode {
    match roleplan_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Alternate form prints the context chain on one line
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
