//! Build script: embed the tsDetect jar into the runner when one is available.
//!
//! The jar is taken from `TSDETECT_TOOL_JAR` when set, otherwise from
//! `resources/TestSmellDetector.jar`. Without a jar the generated module
//! declares the resource as absent so the crate still builds.

use std::{env, fs, path::PathBuf};

const TOOL_ENV: &str = "TSDETECT_TOOL_JAR";
const RESOURCE_DIR: &str = "resources";
const RESOURCE_FILE: &str = "TestSmellDetector.jar";
const GENERATED_FILE: &str = "embedded_tool.rs";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed={TOOL_ENV}");
    println!("cargo:rerun-if-changed={RESOURCE_DIR}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let from_env = env::var_os(TOOL_ENV).map(PathBuf::from);
    let candidate = from_env
        .clone()
        .unwrap_or_else(|| manifest_dir.join(RESOURCE_DIR).join(RESOURCE_FILE));

    let initialiser = if candidate.is_file() {
        let absolute = fs::canonicalize(&candidate)?;
        match absolute.to_str() {
            Some(text) => format!("Some(include_bytes!({text:?}) as &[u8])"),
            None => {
                println!(
                    "cargo:warning=detector path {} is not valid UTF-8; building without it",
                    absolute.display()
                );
                String::from("None")
            }
        }
    } else {
        if from_env.is_some() {
            println!(
                "cargo:warning={TOOL_ENV} points at {}, which is not a file; building without the detector",
                candidate.display()
            );
        }
        String::from("None")
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let generated = format!(
        "/// Bytes of the bundled detector, absent when the build found no jar.\n\
         pub(crate) static EMBEDDED_TOOL: Option<&[u8]> = {initialiser};\n"
    );
    fs::write(out_dir.join(GENERATED_FILE), generated)?;
    Ok(())
}
