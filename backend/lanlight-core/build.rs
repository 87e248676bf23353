use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROTOCOL_DOCUMENT: &str = "protocol.yml";
const PROTOCOL_OUT_DIR: &str = "protocol";

// Compiled into a test-only module so unit tests can decode through a
// registry generated from a document they control.
const SCENARIO_DOCUMENT: &str = "../lanlight-gen/integration_tests/testdata/power_scenario.yml";
const SCENARIO_OUT_DIR: &str = "scenario";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    compile(PROTOCOL_DOCUMENT, &out_dir.join(PROTOCOL_OUT_DIR));
    compile(SCENARIO_DOCUMENT, &out_dir.join(SCENARIO_OUT_DIR));

    println!("cargo:rerun-if-changed={PROTOCOL_DOCUMENT}");
    println!("cargo:rerun-if-changed={SCENARIO_DOCUMENT}");
}

fn compile(path: &str, out_dir: &Path) {
    let document = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));

    let spec = lanlight_gen::decode(&document)
        .unwrap_or_else(|e| panic!("Failed to decode {path}: {e}"));

    for mismatch in spec.size_mismatches() {
        println!(
            "cargo:warning=Size mismatch in {path} at {}: declared {} bytes, computed {}",
            mismatch.path, mismatch.declared, mismatch.computed
        );
    }

    lanlight_gen::generate(&spec, out_dir)
        .unwrap_or_else(|e| panic!("Failed to generate code from {path}: {e}"));
}
