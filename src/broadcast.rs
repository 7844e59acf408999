use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::util::pluralize;
use crate::variant::find_variant;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamSite {
    Twitch,
    Youtube,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Stream {
    pub site: StreamSite,
    // Channel id on the streaming site.
    pub streamer: String,
    // Lobby username of the streamer.
    pub username: String,
    pub title: String,
}

impl Stream {
    pub fn url(&self) -> String {
        match self.site {
            StreamSite::Twitch => format!("https://www.twitch.tv/{}", self.streamer),
            StreamSite::Youtube => {
                format!("https://www.youtube.com/channel/{}/live", self.streamer)
            }
        }
    }
}

// A featured tournament.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Spotlight {
    pub tid: String,
    // Tournament name by language code.
    pub names: HashMap<String, String>,
    pub variant: String,
    #[serde(default)]
    pub chess960: bool,
    #[serde(rename = "nbPlayers")]
    pub nb_players: u64,
    #[serde(rename = "startsAt")]
    pub starts_at: String,
}

impl Spotlight {
    pub fn url(&self) -> String { format!("/tournament/{}", self.tid) }

    pub fn name(&self, lang: &str) -> &str {
        self.names
            .get(lang)
            .or_else(|| self.names.get("en"))
            .map_or(self.tid.as_str(), String::as_str)
    }

    pub fn variant_display_name(&self) -> String {
        find_variant(&self.variant)
            .map_or_else(|| self.variant.clone(), |v| v.display_name(self.chess960))
    }

    pub fn summary(&self, lang: &str) -> String {
        format!(
            "{} ({}, {})",
            self.name(lang),
            self.variant_display_name(),
            pluralize(self.nb_players, "player", "players")
        )
    }
}
