use std::collections::BTreeMap;

use serde::Deserialize;

use crate::pattern::{Pattern, PatternError};

#[derive(Deserialize)]
struct KanaConfig {
    #[serde(default)]
    single: BTreeMap<String, String>,
    #[serde(default)]
    pair: BTreeMap<String, String>,
    #[serde(default)]
    triple: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum KanaTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{0}] table is empty")]
    Empty(&'static str),
    #[error("[{section}] key {key:?} must be {expected} character(s)")]
    KeyLength {
        section: &'static str,
        key: String,
        expected: usize,
    },
    #[error("invalid grammar for {key:?}: {source}")]
    Grammar { key: String, source: PatternError },
}

/// Parsed kana table. Grammar strings are known to compile.
#[derive(Debug, Clone)]
pub struct KanaTable {
    pub single: Vec<(char, String)>,
    pub pair: Vec<([char; 2], String)>,
    pub triple: Vec<([char; 3], String)>,
}

fn section<const N: usize>(
    name: &'static str,
    raw: BTreeMap<String, String>,
) -> Result<Vec<([char; N], String)>, KanaTableError> {
    if raw.is_empty() {
        return Err(KanaTableError::Empty(name));
    }
    let mut out = Vec::with_capacity(raw.len());
    for (key, grammar) in raw {
        let chars: Vec<char> = key.chars().collect();
        let Ok(kana) = <[char; N]>::try_from(chars) else {
            return Err(KanaTableError::KeyLength {
                section: name,
                key,
                expected: N,
            });
        };
        if let Err(source) = Pattern::compile(&grammar) {
            return Err(KanaTableError::Grammar { key, source });
        }
        out.push((kana, grammar));
    }
    Ok(out)
}

/// Parse TOML text into a [`KanaTable`], compiling every grammar once to
/// validate it.
pub fn parse_kana_toml(toml_str: &str) -> Result<KanaTable, KanaTableError> {
    let config: KanaConfig =
        toml::from_str(toml_str).map_err(|e| KanaTableError::Parse(e.to_string()))?;

    let single = section::<1>("single", config.single)?
        .into_iter()
        .map(|([c], g)| (c, g))
        .collect();
    let pair = section("pair", config.pair)?;
    let triple = section("triple", config.triple)?;

    Ok(KanaTable {
        single,
        pair,
        triple,
    })
}
