//! Move representation and UCI-style move text encoding.

use crate::bits::{file_of, rank_of, square_of};
use crate::error::EngineError;
use crate::position::Piece;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn quiet(from: u8, to: u8) -> Self {
        Move { from, to, promotion: None }
    }

    pub fn promoting(from: u8, to: u8, promotion: Piece) -> Self {
        Move { from, to, promotion: Some(promotion) }
    }

    /// Encodes (from, to) as a single integer, used as the history-table key.
    #[inline]
    pub fn encode(self) -> usize {
        self.from as usize * 64 + self.to as usize
    }

    /// Four-character UCI move text, plus an optional promotion letter. No
    /// trailing whitespace is emitted when there is no promotion.
    pub fn to_uci(self) -> String {
        let mut s = String::with_capacity(5);
        s.push((b'a' + file_of(self.from)) as char);
        s.push((b'1' + rank_of(self.from)) as char);
        s.push((b'a' + file_of(self.to)) as char);
        s.push((b'1' + rank_of(self.to)) as char);
        if let Some(p) = self.promotion {
            s.push(promotion_char(p));
        }
        s
    }

    /// Parses UCI move text. Does not validate legality or even that the
    /// squares are occupied; that is the generator's job.
    pub fn parse_uci(text: &str) -> Result<Self, EngineError> {
        let bytes = text.as_bytes();
        if bytes.len() != 4 && bytes.len() != 5 {
            return Err(EngineError::ParseMove(text.to_string()));
        }
        let square = |file: u8, rank: u8| -> Result<u8, EngineError> {
            if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
                return Err(EngineError::ParseMove(text.to_string()));
            }
            Ok(square_of(rank - b'1', file - b'a'))
        };
        let from = square(bytes[0], bytes[1])?;
        let to = square(bytes[2], bytes[3])?;
        let promotion = if bytes.len() == 5 {
            Some(char_to_promotion(bytes[4] as char).ok_or_else(|| EngineError::ParseMove(text.to_string()))?)
        } else {
            None
        };
        Ok(Move { from, to, promotion })
    }
}

fn promotion_char(p: Piece) -> char {
    match p {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        _ => unreachable!("only Q/R/B/N are valid promotion pieces"),
    }
}

fn char_to_promotion(c: char) -> Option<Piece> {
    match c {
        'q' => Some(Piece::Queen),
        'r' => Some(Piece::Rook),
        'b' => Some(Piece::Bishop),
        'n' => Some(Piece::Knight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_round_trips_without_promotion() {
        let m = Move::parse_uci("e2e4").unwrap();
        assert_eq!(m.to_uci(), "e2e4");
        assert_eq!(m.to_uci().len(), 4);
    }

    #[test]
    fn uci_round_trips_with_promotion() {
        let m = Move::parse_uci("e7e8q").unwrap();
        assert_eq!(m.promotion, Some(Piece::Queen));
        assert_eq!(m.to_uci(), "e7e8q");
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(Move::parse_uci("e2e9").is_err());
        assert!(Move::parse_uci("z2e4").is_err());
        assert!(Move::parse_uci("e2").is_err());
    }
}
