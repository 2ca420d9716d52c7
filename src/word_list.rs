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
use super::word::Word;

// Used when the word file can't be loaded. Contains at least one valid
// chain for every supported chain length, for example
// able → echo → oval → lava → ally.
pub static FALLBACK_WORDS: [&str; 16] = [
    "able", "echo", "oval", "lava", "ally", "yarn", "nope", "eager",
    "ramp", "palm", "mood", "dome", "else", "eels", "sour", "ruse",
];

/// Parses a word pool out of raw text, one entry per line. Entries
/// that aren't valid words are dropped without comment and duplicates
/// keep only their first occurrence.
pub fn parse_word_list(text: &str) -> Vec<Word> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for line in text.lines() {
        let Ok(word) = line.parse::<Word>()
        else {
            continue;
        };

        if seen.insert(word.clone()) {
            words.push(word);
        }
    }

    words
}

pub fn fallback_words() -> Vec<Word> {
    FALLBACK_WORDS
        .iter()
        .map(|w| w.parse::<Word>().unwrap())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filters_and_dedups() {
        let words = parse_word_list(
            "art\n\
             tin\n\
             \n\
             TIN\n\
             ox\n\
             strand\n\
             nu t\n\
             nut\n\
             art\n",
        );

        let letters = words.iter()
            .map(|w| w.letters())
            .collect::<Vec<_>>();

        assert_eq!(&letters, &["art", "tin", "nut"]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_word_list("").is_empty());
        assert!(parse_word_list("ox\nhippopotamus\n123\n").is_empty());
    }

    #[test]
    fn fallback_is_valid() {
        let words = fallback_words();

        assert_eq!(words.len(), FALLBACK_WORDS.len());

        let unique = words.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn fallback_contains_full_chain() {
        let words = fallback_words();
        let chain = ["able", "echo", "oval", "lava", "ally"];

        for pair in chain.windows(2) {
            let a = words.iter().find(|w| w.letters() == pair[0]).unwrap();
            let b = words.iter().find(|w| w.letters() == pair[1]).unwrap();
            assert_eq!(a.last_letter(), b.first_letter());
        }
    }
}
