//! Replay log: every executed move leg, in order.
//!
//! The log is written as space-separated notation tokens (`22-18 9-14 ...`).
//! Each leg of a multi-capture is its own token.

use std::fmt;
use std::str::FromStr;

use crate::cell::NotationError;
use crate::moves::{Move, Notation};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveLog {
    legs: Vec<Notation>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: &Move) {
        self.legs.push(mv.notation());
    }

    pub fn clear(&mut self) {
        self.legs.clear();
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notation> {
        self.legs.iter()
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leg) in self.legs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{leg}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveLog {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let legs = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Notation>, _>>()?;
        Ok(MoveLog { legs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::piece::{Piece, Player};

    #[test]
    fn test_record_and_display() {
        let mut log = MoveLog::new();
        let p = Piece::new(Player::Below, Cell::from_cell_number(22).unwrap());
        log.record(&Move::new(p, Cell::from_cell_number(18).unwrap()));
        let p = Piece::new(Player::Above, Cell::from_cell_number(9).unwrap());
        log.record(&Move::new(p, Cell::from_cell_number(14).unwrap()));
        assert_eq!(log.to_string(), "22-18 9-14");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_parse_log() {
        let log: MoveLog = " 22-18  9-14\n".parse().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.to_string(), "22-18 9-14");
        assert!("".parse::<MoveLog>().unwrap().is_empty());
        assert!("22-18 99-1".parse::<MoveLog>().is_err());
    }
}
