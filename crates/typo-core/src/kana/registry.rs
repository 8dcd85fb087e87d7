use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::config::{parse_kana_toml, KanaTable, KanaTableError};
use super::table::DEFAULT_TOML;
use crate::pattern::{Node, Pattern};
use crate::unicode::{hiragana_to_katakana, to_fullwidth};

/// Read-only lookup from kana (and typeable Latin) to compiled patterns.
///
/// Entries hold indices into one pattern arena, so every key with the same
/// grammar text shares one [`Pattern`].
pub struct KanaRegistry {
    patterns: Vec<Pattern>,
    single: HashMap<char, usize>,
    pair: HashMap<[char; 2], usize>,
    triple: HashMap<[char; 3], usize>,
}

#[derive(Default)]
struct Builder {
    patterns: Vec<Pattern>,
    interned: HashMap<String, usize>,
}

impl Builder {
    fn intern(&mut self, key: &str, grammar: &str) -> Result<usize, KanaTableError> {
        if let Some(&id) = self.interned.get(grammar) {
            return Ok(id);
        }
        let pattern = Pattern::compile(grammar).map_err(|source| KanaTableError::Grammar {
            key: key.to_string(),
            source,
        })?;
        let id = self.patterns.len();
        self.patterns.push(pattern);
        self.interned.insert(grammar.to_string(), id);
        Ok(id)
    }
}

/// Insert `key` and, when it differs, its katakana spelling.
fn insert_mirrored<const N: usize>(
    map: &mut HashMap<[char; N], usize>,
    key: [char; N],
    id: usize,
) {
    map.insert(key, id);
    let katakana = key.map(hiragana_to_katakana);
    if katakana != key {
        map.insert(katakana, id);
    }
}

impl KanaRegistry {
    /// Get or build the registry for the embedded table.
    pub fn global() -> &'static KanaRegistry {
        static INSTANCE: OnceLock<KanaRegistry> = OnceLock::new();
        INSTANCE.get_or_init(KanaRegistry::builtin)
    }

    /// Build a fresh registry from the embedded table.
    pub fn builtin() -> Self {
        let table = parse_kana_toml(DEFAULT_TOML).expect("kana TOML must be valid");
        Self::from_table(&table).expect("kana TOML must be valid")
    }

    /// Build a registry from a parsed table, for tools and tests that need
    /// a table other than the embedded one.
    pub fn from_table(table: &KanaTable) -> Result<Self, KanaTableError> {
        let mut b = Builder::default();
        let mut single = HashMap::new();
        let mut pair = HashMap::new();
        let mut triple = HashMap::new();

        for (kana, grammar) in &table.single {
            let id = b.intern(&kana.to_string(), grammar)?;
            single.insert(*kana, id);
            let katakana = hiragana_to_katakana(*kana);
            if katakana != *kana {
                single.insert(katakana, id);
            }
        }

        for c in ('A'..='Z').chain('0'..='9') {
            let id = b.intern(&c.to_string(), &c.to_string())?;
            let lower = c.to_ascii_lowercase();
            for key in [c, lower] {
                single.insert(key, id);
                single.insert(to_fullwidth(key), id);
            }
        }

        for (kana, grammar) in &table.pair {
            let id = b.intern(&kana.iter().collect::<String>(), grammar)?;
            insert_mirrored(&mut pair, *kana, id);
        }

        for (kana, grammar) in &table.triple {
            let id = b.intern(&kana.iter().collect::<String>(), grammar)?;
            insert_mirrored(&mut triple, *kana, id);
        }

        debug!(
            patterns = b.patterns.len(),
            single = single.len(),
            pair = pair.len(),
            triple = triple.len(),
            "kana registry built"
        );

        Ok(Self {
            patterns: b.patterns,
            single,
            pair,
            triple,
        })
    }

    fn node(&self, id: usize) -> Node<'_> {
        self.patterns[id].head()
    }

    pub fn find(&self, kana: char) -> Option<Node<'_>> {
        self.single.get(&kana).map(|&id| self.node(id))
    }

    pub fn find_pair(&self, kana0: char, kana1: char) -> Option<Node<'_>> {
        self.pair.get(&[kana0, kana1]).map(|&id| self.node(id))
    }

    pub fn find_triple(&self, kana0: char, kana1: char, kana2: char) -> Option<Node<'_>> {
        self.triple
            .get(&[kana0, kana1, kana2])
            .map(|&id| self.node(id))
    }

    /// Resolve the pattern governing text that starts with `window`, trying
    /// triple, then pair, then single. Returns the head node and how many
    /// characters it covers.
    ///
    /// `None` entries mark the end of the stream.
    pub fn longest_match(&self, window: [Option<char>; 3]) -> Option<(Node<'_>, usize)> {
        match window {
            [Some(a), Some(b), Some(c)] => self
                .find_triple(a, b, c)
                .map(|n| (n, 3))
                .or_else(|| self.find_pair(a, b).map(|n| (n, 2)))
                .or_else(|| self.find(a).map(|n| (n, 1))),
            [Some(a), Some(b), None] => self
                .find_pair(a, b)
                .map(|n| (n, 2))
                .or_else(|| self.find(a).map(|n| (n, 1))),
            [Some(a), ..] => self.find(a).map(|n| (n, 1)),
            [None, ..] => None,
        }
    }

    /// Number of distinct compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::is_hiragana;

    fn same(a: Option<Node<'_>>, b: Option<Node<'_>>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => std::ptr::eq(a.pattern(), b.pattern()),
            _ => false,
        }
    }

    #[test]
    fn test_find_single() {
        let reg = KanaRegistry::global();
        assert_eq!(reg.find('か').unwrap().pattern().to_string(), "KA");
        assert_eq!(reg.find('し').unwrap().pattern().to_string(), "SH?I");
        assert_eq!(reg.find('ー').unwrap().pattern().to_string(), "-");
        assert!(reg.find('漢').is_none());
        assert!(reg.find('、').is_none());
    }

    #[test]
    fn test_find_pair_and_triple() {
        let reg = KanaRegistry::global();
        assert_eq!(
            reg.find_pair('ち', 'ゃ').unwrap().pattern().to_string(),
            "[TC][YH]A"
        );
        assert_eq!(reg.find_pair('っ', 'た').unwrap().pattern().to_string(), "TTA");
        assert_eq!(
            reg.find_triple('っ', 'き', 'ゃ').unwrap().pattern().to_string(),
            "KKYA"
        );
        assert!(reg.find_pair('か', 'き').is_none());
        assert!(reg.find_triple('っ', 'た', 'ゃ').is_none());
    }

    #[test]
    fn test_katakana_shares_pattern() {
        let reg = KanaRegistry::global();
        let table = parse_kana_toml(DEFAULT_TOML).unwrap();
        for (kana, _) in &table.single {
            if is_hiragana(*kana) {
                let kata = hiragana_to_katakana(*kana);
                assert!(same(reg.find(*kana), reg.find(kata)), "{kana} vs {kata}");
            }
        }
        for ([a, b], _) in &table.pair {
            let (ka, kb) = (hiragana_to_katakana(*a), hiragana_to_katakana(*b));
            assert!(same(reg.find_pair(*a, *b), reg.find_pair(ka, kb)), "{a}{b}");
        }
        for ([a, b, c], _) in &table.triple {
            let kata = [*a, *b, *c].map(hiragana_to_katakana);
            assert!(
                same(
                    reg.find_triple(*a, *b, *c),
                    reg.find_triple(kata[0], kata[1], kata[2])
                ),
                "{a}{b}{c}"
            );
        }
    }

    #[test]
    fn test_latin_aliases_share_pattern() {
        let reg = KanaRegistry::global();
        for (half, full) in [('a', 'ａ'), ('A', 'Ａ'), ('a', 'A'), ('7', '７'), ('z', 'Ｚ')] {
            assert!(same(reg.find(half), reg.find(full)), "{half} vs {full}");
        }
        assert_eq!(reg.find('q').unwrap().pattern().to_string(), "Q");
        assert_eq!(reg.find('５').unwrap().pattern().to_string(), "5");
    }

    #[test]
    fn test_identical_grammars_are_interned() {
        let reg = KanaRegistry::global();
        assert!(!same(reg.find('じ'), reg.find('ず')));
        // じ and っじ's tail are different grammar texts.
        assert!(!same(reg.find('じ'), reg.find_pair('っ', 'じ')));
        // "A" is used by あ and by the Latin letter A.
        assert!(same(reg.find('あ'), reg.find('a')));
    }

    #[test]
    fn test_longest_match_prefers_triple() {
        let reg = KanaRegistry::global();
        let (node, width) = reg
            .longest_match([Some('っ'), Some('き'), Some('ゃ')])
            .unwrap();
        assert_eq!(width, 3);
        assert_eq!(node.pattern().to_string(), "KKYA");

        let (node, width) = reg
            .longest_match([Some('っ'), Some('た'), Some('あ')])
            .unwrap();
        assert_eq!(width, 2);
        assert_eq!(node.pattern().to_string(), "TTA");

        let (node, width) = reg.longest_match([Some('か'), None, None]).unwrap();
        assert_eq!(width, 1);
        assert_eq!(node.pattern().to_string(), "KA");

        assert!(reg.longest_match([Some('、'), Some('か'), None]).is_none());
        assert!(reg.longest_match([None, None, None]).is_none());
    }

    #[test]
    fn test_builtin_is_deterministic() {
        let a = KanaRegistry::builtin();
        let b = KanaRegistry::builtin();
        assert_eq!(a.pattern_count(), b.pattern_count());
        assert_eq!(
            a.find_pair('じ', 'ゃ').unwrap().pattern(),
            b.find_pair('じ', 'ゃ').unwrap().pattern()
        );
    }
}
