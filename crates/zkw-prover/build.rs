//! Build script linking the native prover library when the `native` feature is enabled.

#![allow(clippy::print_stdout, reason = "Cargo reads build directives from stdout")]

use std::path::PathBuf;

const LIB_DIR_VAR: &str = "ZKW_PROVER_LIB_DIR";
const LIB_NAME: &str = "zkw_prover";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed={LIB_DIR_VAR}");

    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return Ok(());
    }

    if let Some(dir) = std::env::var_os(LIB_DIR_VAR) {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            return Err(format!("{LIB_DIR_VAR} is not a directory: {}", dir.display()).into());
        }
        println!("cargo:rustc-link-search=native={}", dir.display());
    }
    println!("cargo:rustc-link-lib={LIB_NAME}");

    Ok(())
}
