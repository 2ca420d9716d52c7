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

use std::collections::{BTreeSet, HashMap, HashSet};
use rand::Rng;
use super::chain::Chain;

/// Which letter positions the player has uncovered, per chain word.
/// Positions are tracked rather than letters because a letter can be
/// revealed in one word while another occurrence stays hidden until
/// `reveal_all_occurrences` touches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealTracker {
    revealed: Vec<BTreeSet<usize>>,
}

impl RevealTracker {
    pub fn new(chain: &Chain) -> RevealTracker {
        RevealTracker {
            revealed: vec![BTreeSet::new(); chain.len()],
        }
    }

    pub fn is_revealed(&self, word_index: usize, letter_index: usize) -> bool {
        self.revealed[word_index].contains(&letter_index)
    }

    /// Marks every position in every word that holds `letter`.
    /// Idempotent.
    pub fn reveal_all_occurrences(&mut self, chain: &Chain, letter: char) {
        for (word, revealed) in
            chain.words().iter().zip(self.revealed.iter_mut())
        {
            for (i, ch) in word.chars().enumerate() {
                if ch == letter {
                    revealed.insert(i);
                }
            }
        }
    }

    pub fn hidden_count(&self, chain: &Chain) -> usize {
        chain.words()
            .iter()
            .zip(self.revealed.iter())
            .map(|(word, revealed)| word.len() - revealed.len())
            .sum()
    }

    /// Remaining hidden occurrences per letter, for the legend.
    pub fn hidden_counts(&self, chain: &Chain) -> HashMap<char, usize> {
        let mut counts = HashMap::new();

        for (word, revealed) in
            chain.words().iter().zip(self.revealed.iter())
        {
            for (i, ch) in word.chars().enumerate() {
                if !revealed.contains(&i) {
                    *counts.entry(ch).or_insert(0) += 1;
                }
            }
        }

        counts
    }

    pub fn revealed_letters(&self, chain: &Chain) -> HashSet<char> {
        let mut letters = HashSet::new();

        for (word, revealed) in
            chain.words().iter().zip(self.revealed.iter())
        {
            for &i in revealed.iter() {
                letters.insert(word.letter(i));
            }
        }

        letters
    }

    /// True if any occurrence of `letter` is uncovered anywhere in the
    /// chain. Wrong guesses on such letters don't count as errors.
    pub fn is_revealed_anywhere(&self, chain: &Chain, letter: char) -> bool {
        chain.words()
            .iter()
            .zip(self.revealed.iter())
            .any(|(word, revealed)| {
                revealed.iter().any(|&i| word.letter(i) == letter)
            })
    }

    /// Uniformly samples one hidden (word, position) pair, or `None`
    /// once everything is visible.
    pub fn pick_random_hidden<R: Rng>(
        &self,
        chain: &Chain,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let mut candidates = Vec::new();

        for (wi, (word, revealed)) in
            chain.words().iter().zip(self.revealed.iter()).enumerate()
        {
            for i in 0..word.len() {
                if !revealed.contains(&i) {
                    candidates.push((wi, i));
                }
            }
        }

        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.gen_range(0..candidates.len())])
        }
    }
}
