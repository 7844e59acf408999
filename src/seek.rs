use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::time_control::TimeControl;
use crate::variant::find_variant;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SeekColor {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
    #[serde(rename = "r")]
    Random,
}

impl SeekColor {
    pub fn flipped(self) -> Self {
        match self {
            SeekColor::White => SeekColor::Black,
            SeekColor::Black => SeekColor::White,
            SeekColor::Random => SeekColor::Random,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "w" => Some(SeekColor::White),
            "b" => Some(SeekColor::Black),
            "r" => Some(SeekColor::Random),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Seek {
    #[serde(rename = "seekID")]
    pub seek_id: String,
    pub user: String,
    // Empty for open seeks. Otherwise this is a challenge directed at one user.
    #[serde(default)]
    pub target: String,
    pub variant: String,
    pub color: SeekColor,
    // Empty means the standard starting position.
    #[serde(default)]
    pub fen: String,
    pub base: f64,
    pub inc: u32,
    #[serde(default)]
    pub byoyomi: u32,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub chess960: bool,
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub title: String,
}

// Fields that make two seeks by the same user indistinguishable.
#[derive(Clone, PartialEq, Debug)]
pub struct SeekKey {
    pub user: String,
    pub variant: String,
    pub fen: String,
    pub color: SeekColor,
    pub base: f64,
    pub inc: u32,
    pub byoyomi: u32,
    pub day: u32,
    pub chess960: bool,
    pub rated: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SeekMode {
    Custom,
    Rated,
    Casual,
}

// Who is looking at the seek list.
#[derive(Clone, Copy, Debug)]
pub struct SeekViewer<'a> {
    pub username: &'a str,
    pub anon: bool,
    pub bot: bool,
}

impl Seek {
    pub fn key(&self) -> SeekKey {
        SeekKey {
            user: self.user.clone(),
            variant: self.variant.clone(),
            fen: self.fen.clone(),
            color: self.color,
            base: self.base,
            inc: self.inc,
            byoyomi: self.byoyomi,
            day: self.day,
            chess960: self.chess960,
            rated: self.rated,
        }
    }

    pub fn is_directed(&self) -> bool { !self.target.is_empty() }
    pub fn is_correspondence(&self) -> bool { self.day != 0 }

    pub fn time_control(&self) -> TimeControl {
        TimeControl {
            minutes: self.base,
            increment: self.inc,
            byoyomi_periods: self.byoyomi,
            days: self.day,
        }
    }

    pub fn mode(&self) -> SeekMode {
        if !self.fen.is_empty() {
            SeekMode::Custom
        } else if self.rated {
            SeekMode::Rated
        } else {
            SeekMode::Casual
        }
    }

    // The name shown in the "Player" column: the other side of a challenge when we issued it.
    pub fn displayed_user(&self, my_name: &str) -> &str {
        if self.target.is_empty() || self.target == my_name {
            &self.user
        } else {
            &self.target
        }
    }

    pub fn is_visible_to(&self, viewer: SeekViewer<'_>) -> bool {
        if (viewer.anon || viewer.bot) && self.rated {
            return false;
        }
        if viewer.anon && find_variant(&self.variant).is_some_and(|v| v.two_boards) {
            return false;
        }
        !self.is_directed() || viewer.username == self.user || viewer.username == self.target
    }
}

pub fn is_new_seek(known_seeks: &[Seek], candidate: &SeekKey) -> bool {
    !known_seeks.iter().any(|seek| seek.key() == *candidate)
}

// Splits a snapshot into (real-time, correspondence) seeks. Every input seek lands in exactly one
// of the two.
pub fn partition_by_time_control(seeks: &[Seek]) -> (Vec<Seek>, Vec<Seek>) {
    seeks.iter().cloned().partition(|seek| !seek.is_correspondence())
}

// Seeks as shown in a table: hidden ones removed, bots after humans.
pub fn displayed_seeks(seeks: &[Seek], viewer: SeekViewer<'_>) -> Vec<Seek> {
    seeks
        .iter()
        .filter(|seek| seek.is_visible_to(viewer))
        .cloned()
        .sorted_by_key(|seek| seek.bot)
        .collect()
}
