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

use std::fmt;
use std::str::FromStr;

pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 5;

/// A lowercase ASCII word of 3–5 letters. The only strings that the
/// rest of the game ever sees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word {
    letters: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WordError {
    BadLength(usize),
    BadCharacter(char),
}

impl Word {
    pub fn letters(&self) -> &str {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn letter(&self, index: usize) -> char {
        self.letters.as_bytes()[index] as char
    }

    pub fn first_letter(&self) -> char {
        self.letter(0)
    }

    pub fn last_letter(&self) -> char {
        self.letter(self.letters.len() - 1)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.chars()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Word, WordError> {
        let s = s.trim();

        if let Some(ch) = s.chars().find(|ch| !ch.is_ascii_alphabetic()) {
            return Err(WordError::BadCharacter(ch));
        }

        let lowered = s.to_lowercase();
        let len = lowered.chars().count();

        if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&len) {
            return Err(WordError::BadLength(len));
        }

        Ok(Word { letters: lowered })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letters)
    }
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WordError::BadLength(len) => {
                write!(f, "word has {} letters, expected 3–5", len)
            },
            WordError::BadCharacter(ch) => {
                write!(f, "unexpected character: {}", ch)
            },
        }
    }
}
