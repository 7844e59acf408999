use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::broadcast::{Spotlight, Stream};
use crate::chat::ChatLine;
use crate::seek::{Seek, SeekColor};
use crate::tv::{BoardUpdate, TvGame};


// Sent by the server on an otherwise idle connection; not JSON.
pub const KEEP_ALIVE_FRAME: &str = "/n";

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyServerEvent {
    // Full seek list. Replaces everything known before.
    GetSeeks {
        seeks: Vec<Seek>,
    },
    NewGame {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    // The user still has an unfinished game; they may choose to go back to it.
    GameInProgress {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    // Sent after connect; the name may differ from the page model for fresh anonymous users.
    LobbyUserConnected {
        username: String,
    },
    #[serde(rename = "lobbychat")]
    LobbyChat(ChatLine),
    #[serde(rename = "fullchat")]
    FullChat {
        lines: Vec<ChatLine>,
    },
    Ping {
        timestamp: Number,
    },
    TvGame(TvGame),
    Board(BoardUpdate),
    #[serde(rename = "g_cnt")]
    GameCounter {
        cnt: u64,
    },
    #[serde(rename = "u_cnt")]
    UserCounter {
        cnt: u64,
    },
    #[serde(rename = "ap_cnt")]
    AutoPairingCounter {
        cnt: u64,
    },
    Streams {
        items: Vec<Stream>,
    },
    Spotlights {
        items: Vec<Spotlight>,
    },
    InviteCreated {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    HostCreated {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    AutoPairingOn,
    AutoPairingOff,
    Shutdown {
        message: String,
    },
    Error {
        message: String,
    },
    Logout,
    // Message types this client does not know about. Newer servers may send them.
    #[serde(other)]
    Unknown,
}

// Fields shared by all game creation requests.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameRequest {
    pub user: String,
    pub variant: String,
    pub fen: String,
    pub minutes: f64,
    pub increment: u32,
    #[serde(rename = "byoyomiPeriod")]
    pub byoyomi_period: u32,
    pub rated: bool,
    pub chess960: bool,
    pub color: SeekColor,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyClientEvent {
    CreateSeek {
        #[serde(flatten)]
        game: GameRequest,
        target: String,
        day: u32,
        rrmin: i32,
        rrmax: i32,
    },
    CreateInvite {
        #[serde(flatten)]
        game: GameRequest,
        target: String,
        day: u32,
    },
    CreateAiChallenge {
        #[serde(flatten)]
        game: GameRequest,
        level: u32,
        rm: bool, // random mover instead of the engine
    },
    CreateHost {
        #[serde(flatten)]
        game: GameRequest,
        target: String,
    },
    DeleteSeek {
        #[serde(rename = "seekID")]
        seek_id: String,
        player: String,
    },
    AcceptSeek {
        #[serde(rename = "seekID")]
        seek_id: String,
        player: String,
    },
    CreateAutoPairing {
        variants: Vec<(String, bool)>,     // (variant, chess960)
        tcs: Vec<(f64, u32, u32)>,         // (minutes, increment, byoyomi periods)
        rrmin: i32,
        rrmax: i32,
    },
    CancelAutoPairing,
    Pong {
        timestamp: Number,
    },
    Logout,
    #[serde(rename = "lobbychat")]
    LobbyChat {
        user: String,
        message: String,
    },
}

// Parses one text frame from the server. Returns `Ok(None)` for keep-alive frames.
pub fn parse_server_message(text: &str) -> Result<Option<LobbyServerEvent>, serde_json::Error> {
    if text == KEEP_ALIVE_FRAME {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some)
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_tagged_messages() {
        assert_eq!(
            parse_server_message(r#"{"type": "ping", "timestamp": 1700000000123}"#).unwrap(),
            Some(LobbyServerEvent::Ping { timestamp: Number::from(1700000000123_u64) })
        );
        assert_eq!(
            parse_server_message(r#"{"type": "g_cnt", "cnt": 17}"#).unwrap(),
            Some(LobbyServerEvent::GameCounter { cnt: 17 })
        );
        assert_eq!(
            parse_server_message(r#"{"type": "auto_pairing_on", "extra": 1}"#).unwrap(),
            Some(LobbyServerEvent::AutoPairingOn)
        );
        assert_eq!(
            parse_server_message(
                r#"{"type": "lobbychat", "user": "bob", "message": "hi", "time": 12}"#
            )
            .unwrap(),
            Some(LobbyServerEvent::LobbyChat(ChatLine {
                user: "bob".to_owned(),
                message: "hi".to_owned(),
                time: Some(12),
            }))
        );
    }

    #[test]
    fn unknown_type_is_tolerated() {
        assert_eq!(
            parse_server_message(r#"{"type": "holiday_banner", "text": "🎄"}"#).unwrap(),
            Some(LobbyServerEvent::Unknown)
        );
    }

    #[test]
    fn keep_alive_frame() {
        assert_eq!(parse_server_message("/n").unwrap(), None);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_server_message(r#"{"type": "g_cnt", "cnt": "many"}"#).is_err());
        assert!(parse_server_message("not json").is_err());
    }

    #[test]
    fn serialize_outgoing() {
        let event = LobbyClientEvent::CreateSeek {
            game: GameRequest {
                user: "alice".to_owned(),
                variant: "chess".to_owned(),
                fen: String::new(),
                minutes: 5.0,
                increment: 3,
                byoyomi_period: 0,
                rated: false,
                chess960: false,
                color: SeekColor::Random,
            },
            target: String::new(),
            day: 0,
            rrmin: -1000,
            rrmax: 1000,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "create_seek",
                "user": "alice",
                "target": "",
                "variant": "chess",
                "fen": "",
                "minutes": 5.0,
                "increment": 3,
                "byoyomiPeriod": 0,
                "day": 0,
                "rated": false,
                "rrmin": -1000,
                "rrmax": 1000,
                "chess960": false,
                "color": "r",
            })
        );
        assert_eq!(
            serde_json::to_value(LobbyClientEvent::Pong { timestamp: Number::from(42) }).unwrap(),
            json!({"type": "pong", "timestamp": 42})
        );
        assert_eq!(
            serde_json::to_value(LobbyClientEvent::CancelAutoPairing).unwrap(),
            json!({"type": "cancel_auto_pairing"})
        );
        assert_eq!(
            serde_json::to_value(LobbyClientEvent::AcceptSeek {
                seek_id: "s1".to_owned(),
                player: "alice".to_owned(),
            })
            .unwrap(),
            json!({"type": "accept_seek", "seekID": "s1", "player": "alice"})
        );
    }
}
