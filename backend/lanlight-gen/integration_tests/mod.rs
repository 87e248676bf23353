mod binary;
mod generate;

use std::path::PathBuf;

pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("integration_tests")
        .join("testdata")
        .join(name)
}
