//! `jsondoc`: run a path operation against a JSON document.
//!
//! Usage:
//!   jsondoc [--legacy] get|set|append|merge|delete '<path>' ['<json>']
//!
//! The document is read from stdin.

use jsondoc::cli::run;
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, &buf) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout
                .write_all(result.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
            {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
