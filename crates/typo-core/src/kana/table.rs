/// Built-in kana table, validated by `build.rs`.
pub const DEFAULT_TOML: &str = include_str!("default_kana.toml");
