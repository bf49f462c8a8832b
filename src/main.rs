//! # shot-classify CLI
//!
//! Command-line interface for the screenshot classifier.
//!
//! ## Usage
//! ```bash
//! shot-classify classify Screenshot.png
//! shot-classify classify Screenshot.png --observations ocr.json --output json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
