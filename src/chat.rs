use std::collections::VecDeque;

use serde::{Deserialize, Serialize};


pub const MAX_CHAT_LINES: usize = 1000;
pub const MAX_CHAT_MESSAGE_LENGTH: usize = 500;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChatLine {
    pub user: String,
    pub message: String,
    // Unix time in seconds, if the server sent one.
    #[serde(default)]
    pub time: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct LobbyChat {
    lines: VecDeque<ChatLine>,
}

impl LobbyChat {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &ChatLine> { self.lines.iter() }
    pub fn len(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    pub fn push(&mut self, line: ChatLine) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_CHAT_LINES {
            self.lines.pop_front();
        }
    }

    pub fn replace(&mut self, lines: Vec<ChatLine>) {
        self.lines.clear();
        for line in lines {
            self.push(line);
        }
    }
}

// Returns the text to send, or `None` if there is nothing to send.
pub fn prepare_outgoing_message(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_CHAT_MESSAGE_LENGTH).collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn line(user: &str, message: &str) -> ChatLine {
        ChatLine {
            user: user.to_owned(),
            message: message.to_owned(),
            time: None,
        }
    }

    #[test]
    fn replace_drops_previous_lines() {
        let mut chat = LobbyChat::new();
        chat.push(line("alice", "hi"));
        chat.replace(vec![line("bob", "hello"), line("carol", "hey")]);
        assert_eq!(chat.lines().map(|l| l.user.as_str()).collect::<Vec<_>>(), ["bob", "carol"]);
    }

    #[test]
    fn transcript_is_bounded() {
        let mut chat = LobbyChat::new();
        for i in 0..MAX_CHAT_LINES + 5 {
            chat.push(line("alice", &i.to_string()));
        }
        assert_eq!(chat.len(), MAX_CHAT_LINES);
        assert_eq!(chat.lines().next().unwrap().message, "5");
    }

    #[test]
    fn outgoing_message_is_trimmed() {
        assert_eq!(prepare_outgoing_message("   "), None);
        assert_eq!(prepare_outgoing_message(" gg "), Some("gg".to_owned()));
        let long = "x".repeat(MAX_CHAT_MESSAGE_LENGTH + 10);
        assert_eq!(prepare_outgoing_message(&long).unwrap().len(), MAX_CHAT_MESSAGE_LENGTH);
    }
}
