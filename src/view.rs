use enum_map::Enum;
use strum::EnumIter;

use crate::broadcast::{Spotlight, Stream};
use crate::chat::ChatLine;
use crate::seek::Seek;
use crate::seek_form::{CreateMode, DialogLayout};
use crate::tv::{BoardUpdate, TvGame};
use crate::util::pluralize;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter)]
pub enum SeekTable {
    RealTime,
    Correspondence,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter)]
pub enum Counter {
    GamesInPlay,
    Players,
    AutoPairings,
}

impl Counter {
    pub fn label(self, value: u64) -> String {
        match self {
            Counter::GamesInPlay => pluralize(value, "game in play", "games in play"),
            Counter::Players => pluralize(value, "player", "players"),
            Counter::AutoPairings => pluralize(value, "auto pairing", "auto pairings"),
        }
    }
}

// Presentation layer of the lobby. The controller only talks to widgets through this trait, so
// it can be driven by a terminal, a browser bridge or a test recorder alike.
//
// Seeks passed to `render_seeks` are already filtered for visibility and sorted.
pub trait LobbyView {
    fn render_seeks(&mut self, table: SeekTable, seeks: &[Seek]);
    fn render_counter(&mut self, counter: Counter, value: u64);

    fn append_chat_line(&mut self, line: &ChatLine);
    fn replace_chat(&mut self, lines: &[ChatLine]);

    fn render_streams(&mut self, streams: &[Stream]);
    fn render_spotlights(&mut self, spotlights: &[Spotlight]);

    // Replaces the TV widget with a fresh board for `game`.
    fn render_tv_game(&mut self, game: &TvGame);
    // Moves pieces on the existing TV board.
    fn update_tv_board(&mut self, update: &BoardUpdate);

    // Shows either "standing by" with a cancel button (`active`) or the selection controls.
    fn render_auto_pairing(&mut self, active: bool);

    fn render_dialog(&mut self, mode: CreateMode, layout: &DialogLayout);
    fn set_start_enabled(&mut self, enabled: bool);

    fn navigate(&mut self, path: &str);
    // Blocking yes/no question.
    fn confirm(&mut self, question: &str) -> bool;
    // Blocking notice.
    fn alert(&mut self, message: &str);
    fn request_notification_permission(&mut self);
}
