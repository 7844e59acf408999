use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::once_cell_regex;


// A live game picked by the server for spectating in the lobby.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TvGame {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub variant: String,
    pub fen: String,
    #[serde(rename = "lastMove", default)]
    pub last_move: String,
    #[serde(default)]
    pub chess960: bool,
    pub w: String,
    pub b: String,
    // Ratings are strings: provisional ones carry a "?" suffix.
    #[serde(default)]
    pub wr: String,
    #[serde(default)]
    pub br: String,
    #[serde(default)]
    pub wt: String,
    #[serde(default)]
    pub bt: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardUpdate {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub fen: String,
    #[serde(rename = "lastMove", default)]
    pub last_move: String,
    #[serde(default)]
    pub check: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SideToMove {
    White,
    Black,
}

pub fn side_to_move(fen: &str) -> SideToMove {
    match fen.split(' ').nth(1) {
        Some("w") => SideToMove::White,
        _ => SideToMove::Black,
    }
}

// Squares to highlight for a move in UCI notation. Drops ("P@e4") highlight only the target.
// Boards with ten ranks produce two-digit rank numbers ("a10").
pub fn last_move_squares(uci: &str) -> Vec<String> {
    let square_re = once_cell_regex!(r"[a-z][0-9]+");
    if let Some((_, to)) = uci.split_once('@') {
        return square_re.find(to).map(|m| m.as_str().to_owned()).into_iter().collect();
    }
    square_re.find_iter(uci).take(2).map(|m| m.as_str().to_owned()).collect_vec()
}

// Mini-board state for the game currently shown on the lobby TV.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TvBoard {
    pub game: TvGame,
    pub check: bool,
}

impl TvBoard {
    pub fn new(game: TvGame) -> Self { TvBoard { game, check: false } }

    pub fn game_id(&self) -> &str { &self.game.game_id }
    pub fn side_to_move(&self) -> SideToMove { side_to_move(&self.game.fen) }

    // Applies the update if it belongs to this game. Returns whether anything changed.
    pub fn apply(&mut self, update: &BoardUpdate) -> bool {
        if update.game_id != self.game.game_id {
            return false;
        }
        self.game.fen = update.fen.clone();
        self.game.last_move = update.last_move.clone();
        self.check = update.check;
        true
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_move_parsing() {
        assert_eq!(last_move_squares("e2e4"), vec!["e2", "e4"]);
        assert_eq!(last_move_squares("a9a10"), vec!["a9", "a10"]);
        assert_eq!(last_move_squares("e7e8q"), vec!["e7", "e8"]);
        assert_eq!(last_move_squares("P@e4"), vec!["e4"]);
        assert!(last_move_squares("").is_empty());
    }

    #[test]
    fn side_to_move_from_fen() {
        assert_eq!(side_to_move("8/8/8/8/8/8/8/K6k w - - 0 1"), SideToMove::White);
        assert_eq!(side_to_move("8/8/8/8/8/8/8/K6k b - - 0 1"), SideToMove::Black);
    }
}
