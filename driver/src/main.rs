//! Command-line front-end for the gamma engine.
//!
//! The first line naming a game picks the mode: `B width height players areas` for batch mode,
//! `I width height players areas` for an interactive game on the terminal.

use std::io;

mod batch;
mod command;
mod interactive;
mod session;

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Err(err) = session::run(stdin.lock(), &mut stdout, &mut stderr, interactive::play) {
        eprintln!("gamma: {err}");
        std::process::exit(1);
    }
}
