#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod auto_pairing;
pub mod broadcast;
pub mod chat;
pub mod client;
pub mod event;
pub mod fen;
pub mod preferences;
pub mod seek;
pub mod seek_form;
pub mod test_util;
pub mod time_control;
pub mod tv;
pub mod util;
pub mod validation;
pub mod variant;
pub mod view;

pub use client::{FormEdit, LobbyClientState, LobbyEventError};
pub use event::{LobbyClientEvent, LobbyServerEvent};
pub use seek::{Seek, SeekColor};
pub use seek_form::{CreateMode, Identity, TcMode};
pub use view::LobbyView;
