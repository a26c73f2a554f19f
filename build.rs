//! Build script for the saved-track ranking CLI.
//!
//! Copies the configuration templates from the crate root to the user's
//! local data directory so a fresh install finds `.env.example` and
//! `playlists.example.json` in the location the application reads its
//! configuration from.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the templates change
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=playlists.example.json");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    // Compute target dir (local data dir) and ensure it exists
    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sprankcli");
    fs::create_dir_all(&out_dir)?;

    for template in [".env.example", "playlists.example.json"] {
        let source = manifest_dir.join(template);

        // Only copy if the source exists; otherwise warn instead of failing
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!("cargo:warning={} not found at {}", template, source.display());
        }
    }

    Ok(())
}
