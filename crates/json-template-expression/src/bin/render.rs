//! `json-template-render`: resolve `{{ }}` templates in a JSON document.
//!
//! Usage:
//!   json-template-render [--var name=value]... [--raw] < input.json
//!
//! The document is read from stdin; the resolved JSON goes to stdout.
//! `RUST_LOG` enables logging to stderr.

use json_template_expression::cli::{init_tracing, parse_args, render};
use std::io::{self, Read, Write};

fn main() {
    init_tracing();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match render(&buf, &options) {
        Ok(output) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{output}") {
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
