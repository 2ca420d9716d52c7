// Wordlink – a word-chain graph puzzle
// Copyright (C) 2026  Wordlink authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::HashSet;
use std::fmt;
use rand::Rng;
use super::word::Word;

pub const MIN_CHAIN_LENGTH: usize = 2;
pub const MAX_CHAIN_LENGTH: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1500;

/// An ordered run of distinct words where each word starts with the
/// last letter of the word before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    words: Vec<Word>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ChainError {
    BadLength(usize),
    LinkMismatch(usize),
    DuplicateWord(usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum GenerateError {
    UnsupportedLength(usize),
    NoChainFound,
}

impl Chain {
    pub fn new(words: Vec<Word>) -> Result<Chain, ChainError> {
        if !(MIN_CHAIN_LENGTH..=MAX_CHAIN_LENGTH).contains(&words.len()) {
            return Err(ChainError::BadLength(words.len()));
        }

        for i in 1..words.len() {
            if words[i - 1].last_letter() != words[i].first_letter() {
                return Err(ChainError::LinkMismatch(i));
            }
        }

        let mut seen = HashSet::new();

        for (i, word) in words.iter().enumerate() {
            if !seen.insert(word) {
                return Err(ChainError::DuplicateWord(i));
            }
        }

        Ok(Chain { words })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// The letters of the chain laid end to end. The first letter of
    /// every word after the first is skipped because it is the same
    /// letter that ended the previous word.
    pub fn letter_sequence(&self) -> Vec<char> {
        let mut seq = Vec::new();

        for (i, word) in self.words.iter().enumerate() {
            seq.extend(word.chars().skip(usize::from(i > 0)));
        }

        seq
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{}", word)?;
        }

        Ok(())
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::BadLength(len) => {
                write!(f, "chain has {} words, expected 2–5", len)
            },
            ChainError::LinkMismatch(i) => {
                write!(f, "word {} doesn’t start with the previous word’s \
                           last letter", i + 1)
            },
            ChainError::DuplicateWord(i) => {
                write!(f, "word {} appears twice in the chain", i + 1)
            },
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::UnsupportedLength(len) => {
                write!(f, "unsupported chain length: {}", len)
            },
            GenerateError::NoChainFound => {
                write!(f, "couldn’t build a chain from the word list; \
                           try adding more words")
            },
        }
    }
}

// A single attempt: random start word, then repeatedly pick uniformly
// among the unused words that continue the chain. A dead end abandons
// the whole attempt rather than backtracking within it.
fn try_chain<R: Rng>(
    pool: &[Word],
    length: usize,
    rng: &mut R,
) -> Option<Vec<Word>> {
    let mut words = Vec::with_capacity(length);
    let mut used = HashSet::new();

    let first = &pool[rng.gen_range(0..pool.len())];
    words.push(first.clone());
    used.insert(first);

    while words.len() < length {
        let last = words.last().unwrap().last_letter();

        let options = pool.iter()
            .filter(|w| w.first_letter() == last && !used.contains(w))
            .collect::<Vec<_>>();

        if options.is_empty() {
            return None;
        }

        let next = options[rng.gen_range(0..options.len())];
        words.push(next.clone());
        used.insert(next);
    }

    Some(words)
}

pub fn generate<R: Rng>(
    pool: &[Word],
    length: usize,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Chain, GenerateError> {
    if !(MIN_CHAIN_LENGTH..=MAX_CHAIN_LENGTH).contains(&length) {
        return Err(GenerateError::UnsupportedLength(length));
    }

    if pool.len() < length {
        return Err(GenerateError::NoChainFound);
    }

    for _ in 0..max_attempts {
        if let Some(words) = try_chain(pool, length, rng) {
            return Ok(Chain { words });
        }
    }

    Err(GenerateError::NoChainFound)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool(words: &[&str]) -> Vec<Word> {
        words.iter().map(|w| w.parse().unwrap()).collect()
    }

    fn assert_valid(chain: &Chain, length: usize) {
        assert_eq!(chain.len(), length);

        for pair in chain.words().windows(2) {
            assert_eq!(pair[0].last_letter(), pair[1].first_letter());
        }

        let unique = chain.words().iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), chain.len());
    }

    #[test]
    fn generated_chains_are_valid() {
        let pool = pool(&[
            "art", "tin", "nut", "tar", "rat", "tip", "pot", "ten",
            "net", "nap", "pan", "ant", "toe", "ear", "rot", "eat",
        ]);
        let mut rng = StdRng::seed_from_u64(1);

        for length in MIN_CHAIN_LENGTH..=MAX_CHAIN_LENGTH {
            for _ in 0..50 {
                let chain =
                    generate(&pool, length, DEFAULT_MAX_ATTEMPTS, &mut rng)
                        .unwrap();
                assert_valid(&chain, length);
            }
        }
    }

    #[test]
    fn unsupported_length() {
        let pool = pool(&["art", "tin", "nut"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generate(&pool, 1, DEFAULT_MAX_ATTEMPTS, &mut rng),
            Err(GenerateError::UnsupportedLength(1)),
        );
        assert_eq!(
            generate(&pool, 6, DEFAULT_MAX_ATTEMPTS, &mut rng),
            Err(GenerateError::UnsupportedLength(6)),
        );
    }

    #[test]
    fn impossible_pool() {
        // No word starts with the last letter of any other word
        let pool = pool(&["cab", "dog", "elf", "hum"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generate(&pool, 3, 100, &mut rng),
            Err(GenerateError::NoChainFound),
        );
    }

    #[test]
    fn pool_smaller_than_chain() {
        let pool = pool(&["art", "tin"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generate(&pool, 3, 100, &mut rng),
            Err(GenerateError::NoChainFound),
        );
    }

    #[test]
    fn forced_chain() {
        // Only one chain of length 3 exists
        let pool = pool(&["art", "tin", "nut"]);
        let mut rng = StdRng::seed_from_u64(1);

        let chain = generate(&pool, 3, DEFAULT_MAX_ATTEMPTS, &mut rng)
            .unwrap();

        assert_eq!(&chain.to_string(), "art → tin → nut");
    }

    #[test]
    fn letter_sequence() {
        let chain = Chain::new(pool(&["art", "tin", "nut"])).unwrap();

        assert_eq!(
            chain.letter_sequence(),
            ['a', 'r', 't', 'i', 'n', 'n', 'u', 't'],
        );
    }

    #[test]
    fn new_rejects_invalid() {
        assert_eq!(
            Chain::new(pool(&["art"])).unwrap_err(),
            ChainError::BadLength(1),
        );
        assert_eq!(
            Chain::new(pool(&["art", "nut"])).unwrap_err(),
            ChainError::LinkMismatch(1),
        );
        assert_eq!(
            Chain::new(pool(&["art", "tat", "tar", "rat", "tat"]))
                .unwrap_err(),
            ChainError::DuplicateWord(4),
        );
    }
}
