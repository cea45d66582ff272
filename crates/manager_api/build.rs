use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManagerConfigFile {
    #[serde(default)]
    base_url: String,
    request_timeout_ms: u64,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("manager.config.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: ManagerConfigFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&config.request_timeout_ms) {
        panic!(
            "request_timeout_ms in {} must be within {MIN_TIMEOUT_MS}..={MAX_TIMEOUT_MS}, found {}",
            path.display(),
            config.request_timeout_ms
        );
    }
    let base_url = config.base_url.trim();
    if !base_url.is_empty() && !base_url.starts_with("http://") && !base_url.starts_with("https://")
    {
        panic!(
            "base_url in {} must be empty or an absolute http(s) URL, found `{base_url}`",
            path.display()
        );
    }

    let json = serde_json::to_string_pretty(&config).expect("serialize manager config");
    let generated = format!(
        "/// Build-time embedded manager configuration JSON.\n\
pub const MANAGER_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("manager_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
