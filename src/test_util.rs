// Test utilities shared by unit tests and the "tests" folder.

use crate::seek::{Seek, SeekColor};
use crate::seek_form::Identity;
use crate::tv::TvGame;


pub fn sample_identity(username: &str) -> Identity {
    Identity {
        username: username.to_owned(),
        anon: false,
        title: String::new(),
        tournament_director: false,
    }
}

pub fn anonymous_identity() -> Identity {
    Identity {
        anon: true,
        ..sample_identity("Anon-xyzzy")
    }
}

// Open casual 5+3 chess seek for white.
pub fn sample_seek(seek_id: &str, user: &str) -> Seek {
    Seek {
        seek_id: seek_id.to_owned(),
        user: user.to_owned(),
        target: String::new(),
        variant: "chess".to_owned(),
        color: SeekColor::White,
        fen: String::new(),
        base: 5.0,
        inc: 3,
        byoyomi: 0,
        day: 0,
        chess960: false,
        rated: false,
        bot: false,
        rating: 1500,
        title: String::new(),
    }
}

pub fn sample_tv_game(game_id: &str) -> TvGame {
    TvGame {
        game_id: game_id.to_owned(),
        variant: "chess".to_owned(),
        fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_owned(),
        last_move: "e2e4".to_owned(),
        chess960: false,
        w: "Alice".to_owned(),
        b: "Bob".to_owned(),
        wr: "1500".to_owned(),
        br: "1620?".to_owned(),
        wt: String::new(),
        bt: "GM".to_owned(),
    }
}
