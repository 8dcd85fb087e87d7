//! Keystroke pattern grammar and compiler.
//!
//! A grammar string is a sequence of atoms. An atom is a single literal
//! (`A`-`Z`, `0`-`9`, `-`) or a bracketed set of literals such as `[TC]`.
//! Any atom may be followed by `?` to make it optional:
//!
//! - `S[YH]A` accepts `SYA` and `SHA`
//! - `TS?U` accepts `TU` and `TSU`

use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unterminated '[' opened at {pos}")]
    UnterminatedSet { pos: usize },
    #[error("empty '[]' at {pos}")]
    EmptySet { pos: usize },
    #[error("'?' at {pos} does not follow an atom")]
    DanglingOptional { pos: usize },
}

/// What a single step accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Single(char),
    Alternatives(Box<[char]>),
}

impl Atom {
    pub fn matches(&self, key: char) -> bool {
        match self {
            Atom::Single(c) => *c == key,
            Atom::Alternatives(set) => set.contains(&key),
        }
    }

    /// The character shown to the player: the literal, or the first alternative.
    pub fn display_char(&self) -> char {
        match self {
            Atom::Single(c) => *c,
            Atom::Alternatives(set) => set[0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub atom: Atom,
    pub optional: bool,
}

/// A compiled grammar string. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    steps: Box<[Step]>,
}

fn is_literal(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let mut steps: Vec<Step> = Vec::new();
        let mut chars = source.char_indices();
        // Whether the previous step may still take a '?'.
        let mut can_mark = false;

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '[' => {
                    let mut set = Vec::new();
                    loop {
                        match chars.next() {
                            Some((_, ']')) => break,
                            Some((_, c)) if is_literal(c) => set.push(c),
                            Some((p, c)) => {
                                return Err(PatternError::UnexpectedChar { ch: c, pos: p })
                            }
                            None => return Err(PatternError::UnterminatedSet { pos }),
                        }
                    }
                    if set.is_empty() {
                        return Err(PatternError::EmptySet { pos });
                    }
                    steps.push(Step {
                        atom: Atom::Alternatives(set.into_boxed_slice()),
                        optional: false,
                    });
                    can_mark = true;
                }
                '?' => {
                    match steps.last_mut() {
                        Some(step) if can_mark => step.optional = true,
                        _ => return Err(PatternError::DanglingOptional { pos }),
                    }
                    can_mark = false;
                }
                c if is_literal(c) => {
                    steps.push(Step {
                        atom: Atom::Single(c),
                        optional: false,
                    });
                    can_mark = true;
                }
                c => return Err(PatternError::UnexpectedChar { ch: c, pos }),
            }
        }

        if steps.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            steps: steps.into_boxed_slice(),
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Handle to the first step.
    pub fn head(&self) -> Node<'_> {
        Node {
            pattern: self,
            index: 0,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.steps.iter() {
            match &step.atom {
                Atom::Single(c) => write!(f, "{c}")?,
                Atom::Alternatives(set) => {
                    f.write_str("[")?;
                    for c in set.iter() {
                        write!(f, "{c}")?;
                    }
                    f.write_str("]")?;
                }
            }
            if step.optional {
                f.write_str("?")?;
            }
        }
        Ok(())
    }
}

/// Position of one step inside a shared [`Pattern`].
///
/// Cheap to copy. `next()` follows the chain until the last step.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    pattern: &'a Pattern,
    index: usize,
}

impl<'a> Node<'a> {
    fn step(&self) -> &'a Step {
        &self.pattern.steps[self.index]
    }

    pub fn pattern(&self) -> &'a Pattern {
        self.pattern
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn atom(&self) -> &'a Atom {
        &self.step().atom
    }

    pub fn is_optional(&self) -> bool {
        self.step().optional
    }

    pub fn matches(&self, key: char) -> bool {
        self.step().atom.matches(key)
    }

    pub fn display_char(&self) -> char {
        self.step().atom.display_char()
    }

    pub fn next(&self) -> Option<Node<'a>> {
        let index = self.index + 1;
        (index < self.pattern.steps.len()).then_some(Node {
            pattern: self.pattern,
            index,
        })
    }

    /// True when this step and every step after it may be skipped.
    pub fn rest_is_optional(&self) -> bool {
        self.pattern.steps[self.index..].iter().all(|s| s.optional)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.pattern, other.pattern) && self.index == other.index
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({} @ {})", self.pattern, self.index)
    }
}
