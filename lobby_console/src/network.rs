use std::fmt;
use std::io;
use std::net::TcpStream;

use serde::Serialize;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    LobbyProtocol(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Socket(err) => write!(f, "socket error: {}", err),
            CommunicationError::Serde(err) => write!(f, "serialization error: {}", err),
            CommunicationError::LobbyProtocol(err) => write!(f, "protocol error: {}", err),
        }
    }
}

impl std::error::Error for CommunicationError {}

pub fn write_obj<T, S>(socket: &mut WebSocket<S>, obj: &T) -> Result<(), CommunicationError>
where
    T: Serialize,
    S: io::Read + io::Write,
{
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

// Reads the next text frame. Control frames are answered by tungstenite and skipped here.
pub fn read_text<S>(socket: &mut WebSocket<S>) -> Result<String, CommunicationError>
where
    S: io::Read + io::Write,
{
    loop {
        match socket.read().map_err(CommunicationError::Socket)? {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            msg => {
                return Err(CommunicationError::LobbyProtocol(format!(
                    "Expected text, got {:?}",
                    msg
                )));
            }
        }
    }
}

// Improvement potential: Read and write from one thread using a non-blocking stream instead of
//   cloning the socket.
pub fn clone_websocket(socket: &WebSocket<TcpStream>, role: Role) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    Ok(WebSocket::from_raw_socket(stream, role, None))
}
