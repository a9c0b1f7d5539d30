//! Binary entry point for `pbxproj-localize`.

use std::process;

fn main() {
    if let Err(e) = pbxproj_localize::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
