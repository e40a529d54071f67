use std::fs;

use shuang_core::scheme::{self, parse_schemes_toml};
use shuang_core::settings;


pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: practice.scheme={}, practice.mode={}, upload.max_file_bytes={}, stats.slowest_limit={}",
        s.practice.scheme, s.practice.mode, s.upload.max_file_bytes, s.stats.slowest_limit
    );
}

pub fn schemes_export() {
    print!("{}", scheme::default_toml());
}

pub fn schemes_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let schemes = die!(parse_schemes_toml(&content), "Error: {}");
    let codes: Vec<&str> = schemes.iter().map(|s| s.code.as_str()).collect();
    println!("OK: {} schemes ({})", schemes.len(), codes.join(", "));
}
