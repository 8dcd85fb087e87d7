use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Load a custom settings file before anything reads `settings()`.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(typo_core::settings::init_custom(content), "Error: {}");
}

pub fn kana_export() {
    print!("{}", typo_core::kana::default_toml());
}

pub fn kana_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(typo_core::kana::parse_kana_toml(&content), "Error: {}");
    println!(
        "OK: {} single, {} pair, {} triple",
        table.single.len(),
        table.pair.len(),
        table.triple.len()
    );
}

pub fn settings_export() {
    print!("{}", typo_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        typo_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: score.hit={}, score.miss={}, level.kana_per_ms_scale={}, level.max={}",
        s.score.hit, s.score.miss, s.level.kana_per_ms_scale, s.level.max
    );
}
