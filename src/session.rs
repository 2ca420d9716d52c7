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

use rand::Rng;
use super::chain::Chain;
use super::geometry::Point;
use super::reveal::RevealTracker;

/// What happened to a drag released over a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Right node: every occurrence of the letter is now visible
    Revealed,
    /// Right node, and it was the last hidden letter
    Solved,
    /// Wrong node whose letter was still fully hidden; counts as an
    /// error
    Mismatch,
    /// Wrong node, but its letter was already visible somewhere, so
    /// the player isn't penalised again
    ForgivenMismatch,
}

/// One puzzle from "Next" to "Next". Timestamps come in as
/// milliseconds from whatever monotonic clock the caller has; the
/// elapsed time freezes at the value recorded when the puzzle is
/// solved.
#[derive(Clone, Debug)]
pub struct GameSession {
    chain: Chain,
    tracker: RevealTracker,
    error_count: u32,
    hint_count: u32,
    solved: bool,
    show_words: bool,
    started_ms: f64,
    solved_elapsed_ms: f64,
}

impl GameSession {
    pub fn new(chain: Chain, now_ms: f64) -> GameSession {
        let tracker = RevealTracker::new(&chain);

        GameSession {
            chain,
            tracker,
            error_count: 0,
            hint_count: 0,
            solved: false,
            show_words: false,
            started_ms: now_ms,
            solved_elapsed_ms: 0.0,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn tracker(&self) -> &RevealTracker {
        &self.tracker
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn hint_count(&self) -> u32 {
        self.hint_count
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// True once the words are being shown in full, either because the
    /// puzzle was solved or because the player gave up.
    pub fn words_shown(&self) -> bool {
        self.show_words
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        if self.solved {
            self.solved_elapsed_ms
        } else {
            now_ms - self.started_ms
        }
    }

    fn check_solved(&mut self, now_ms: f64) {
        if self.tracker.hidden_count(&self.chain) == 0 {
            self.solved = true;
            self.show_words = true;
            self.solved_elapsed_ms = now_ms - self.started_ms;
        }
    }

    /// Resolves a legend token dropped on the node labelled `target`.
    /// Returns `None` when guessing is over (solved or given up).
    pub fn guess(
        &mut self,
        dragged: char,
        target: char,
        now_ms: f64,
    ) -> Option<GuessOutcome> {
        if self.solved || self.show_words {
            return None;
        }

        if dragged == target {
            self.tracker.reveal_all_occurrences(&self.chain, dragged);
            self.check_solved(now_ms);

            Some(if self.solved {
                GuessOutcome::Solved
            } else {
                GuessOutcome::Revealed
            })
        } else if self.tracker.is_revealed_anywhere(&self.chain, target) {
            Some(GuessOutcome::ForgivenMismatch)
        } else {
            self.error_count += 1;
            Some(GuessOutcome::Mismatch)
        }
    }

    /// Reveals one randomly chosen hidden letter in full. Does nothing
    /// once the puzzle is over.
    pub fn hint<R: Rng>(&mut self, rng: &mut R, now_ms: f64) -> bool {
        if self.solved || self.show_words {
            return false;
        }

        let Some((word_index, letter_index)) =
            self.tracker.pick_random_hidden(&self.chain, rng)
        else {
            return false;
        };

        let letter = self.chain.words()[word_index].letter(letter_index);
        self.tracker.reveal_all_occurrences(&self.chain, letter);
        self.hint_count += 1;
        self.check_solved(now_ms);

        true
    }

    /// Give up: show the full words without touching the reveal sets,
    /// the error count or the hint count.
    pub fn reveal_answer(&mut self) {
        self.show_words = true;
    }
}

/// Pointer-driven drag state. Guess resolution lives in
/// `GameSession`; this only tracks what's in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(char),
}

#[derive(Clone, Copy, Debug)]
pub struct Controller {
    pub drag: DragState,
    pub pointer: Point,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            drag: DragState::Idle,
            pointer: Point::new(0.0, 0.0),
        }
    }

    /// A press over a legend token starts a drag, unless the puzzle is
    /// already over.
    pub fn pointer_down(
        &mut self,
        position: Point,
        legend_letter: Option<char>,
        session: &GameSession,
    ) {
        self.pointer = position;

        if session.is_solved() || session.words_shown() {
            return;
        }

        if let Some(letter) = legend_letter {
            self.drag = DragState::Dragging(letter);
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.pointer = position;
    }

    /// A release resolves the drag as a guess if it lands on a node,
    /// then returns to idle either way.
    pub fn pointer_up(
        &mut self,
        position: Point,
        target: Option<char>,
        session: &mut GameSession,
        now_ms: f64,
    ) -> Option<GuessOutcome> {
        self.pointer = position;

        let DragState::Dragging(dragged) = self.drag
        else {
            return None;
        };

        self.drag = DragState::Idle;

        let target = target?;
        session.guess(dragged, target, now_ms)
    }
}
