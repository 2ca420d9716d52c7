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

use std::collections::HashMap;
use super::chain::Chain;

/// One letter transition inside a word. `word_index` is the position
/// of the originating word in the chain and picks the edge color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: char,
    pub to: char,
    pub word_index: usize,
}

/// The chain viewed as a directed multigraph: one node per distinct
/// letter, one edge per adjacent letter pair per word. Self-loops mark
/// doubled letters.
#[derive(Clone, Debug)]
pub struct LetterGraph {
    nodes: Vec<char>,
    edges: Vec<Edge>,
}

impl LetterGraph {
    pub fn new(chain: &Chain) -> LetterGraph {
        let mut nodes = Vec::new();

        for ch in chain.letter_sequence() {
            if !nodes.contains(&ch) {
                nodes.push(ch);
            }
        }

        let mut edges = Vec::new();

        for (word_index, word) in chain.words().iter().enumerate() {
            for i in 0..word.len() - 1 {
                edges.push(Edge {
                    from: word.letter(i),
                    to: word.letter(i + 1),
                    word_index,
                });
            }
        }

        LetterGraph { nodes, edges }
    }

    /// Distinct letters in order of first appearance. This order is
    /// what assigns grid slots, so it must be stable for a chain.
    pub fn nodes(&self) -> &[char] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, letter: char) -> bool {
        self.nodes.contains(&letter)
    }

    /// How many times each letter occurs across the whole chain,
    /// counting shared boundary letters once per word.
    pub fn occurrence_counts(chain: &Chain) -> HashMap<char, usize> {
        let mut counts = HashMap::new();

        for word in chain.words() {
            for ch in word.chars() {
                *counts.entry(ch).or_insert(0) += 1;
            }
        }

        counts
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::word::Word;

    fn chain(words: &[&str]) -> Chain {
        Chain::new(
            words.iter().map(|w| w.parse::<Word>().unwrap()).collect()
        ).unwrap()
    }

    #[test]
    fn art_tin_nut() {
        let graph = LetterGraph::new(&chain(&["art", "tin", "nut"]));

        assert_eq!(graph.nodes(), &['a', 'r', 't', 'i', 'n', 'u']);
        assert_eq!(
            graph.edges(),
            &[
                Edge { from: 'a', to: 'r', word_index: 0 },
                Edge { from: 'r', to: 't', word_index: 0 },
                Edge { from: 't', to: 'i', word_index: 1 },
                Edge { from: 'i', to: 'n', word_index: 1 },
                Edge { from: 'n', to: 'u', word_index: 2 },
                Edge { from: 'u', to: 't', word_index: 2 },
            ],
        );
    }

    #[test]
    fn node_and_edge_counts() {
        let chain = chain(&["eels", "sour", "ruse"]);
        let graph = LetterGraph::new(&chain);

        let mut distinct = chain.letter_sequence();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(graph.nodes().len(), distinct.len());

        let expected_edges = chain.words()
            .iter()
            .map(|w| w.len() - 1)
            .sum::<usize>();
        assert_eq!(graph.edges().len(), expected_edges);
    }

    #[test]
    fn double_letter_is_self_loop() {
        let graph = LetterGraph::new(&chain(&["eels", "sour"]));

        assert_eq!(
            graph.edges()[0],
            Edge { from: 'e', to: 'e', word_index: 0 },
        );
    }

    #[test]
    fn occurrence_counts() {
        let counts =
            LetterGraph::occurrence_counts(&chain(&["art", "tin", "nut"]));

        assert_eq!(counts[&'t'], 3);
        assert_eq!(counts[&'n'], 2);
        assert_eq!(counts[&'a'], 1);
        assert_eq!(counts.get(&'z'), None);
    }
}
