// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use variant_lobby::broadcast::{Spotlight, Stream};
use variant_lobby::chat::ChatLine;
use variant_lobby::client::LobbyClientState;
use variant_lobby::event::LobbyClientEvent;
use variant_lobby::fen::StructuralFenValidator;
use variant_lobby::preferences::MemoryStore;
use variant_lobby::seek::Seek;
use variant_lobby::seek_form::{CreateMode, DialogLayout, Identity};
use variant_lobby::tv::{BoardUpdate, TvGame};
use variant_lobby::view::{Counter, LobbyView, SeekTable};


// Everything the controller asked the view to do, in order.
#[derive(Clone, PartialEq, Debug)]
pub enum ViewCall {
    Seeks(SeekTable, Vec<String>),
    Counter(Counter, u64),
    AppendChat(ChatLine),
    ReplaceChat(Vec<ChatLine>),
    Streams(Vec<Stream>),
    Spotlights(Vec<Spotlight>),
    TvGame(TvGame),
    TvUpdate(BoardUpdate),
    AutoPairing(bool),
    Dialog(CreateMode, DialogLayout),
    StartEnabled(bool),
    Navigate(String),
    Confirm(String),
    Alert(String),
    NotificationPermission,
}

pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub confirm_answer: bool,
}

impl RecordingView {
    pub fn new() -> Self { RecordingView { calls: Vec::new(), confirm_answer: true } }
}

impl LobbyView for RecordingView {
    fn render_seeks(&mut self, table: SeekTable, seeks: &[Seek]) {
        let ids = seeks.iter().map(|s| s.seek_id.clone()).collect();
        self.calls.push(ViewCall::Seeks(table, ids));
    }
    fn render_counter(&mut self, counter: Counter, value: u64) {
        self.calls.push(ViewCall::Counter(counter, value));
    }
    fn append_chat_line(&mut self, line: &ChatLine) {
        self.calls.push(ViewCall::AppendChat(line.clone()));
    }
    fn replace_chat(&mut self, lines: &[ChatLine]) {
        self.calls.push(ViewCall::ReplaceChat(lines.to_vec()));
    }
    fn render_streams(&mut self, streams: &[Stream]) {
        self.calls.push(ViewCall::Streams(streams.to_vec()));
    }
    fn render_spotlights(&mut self, spotlights: &[Spotlight]) {
        self.calls.push(ViewCall::Spotlights(spotlights.to_vec()));
    }
    fn render_tv_game(&mut self, game: &TvGame) { self.calls.push(ViewCall::TvGame(game.clone())); }
    fn update_tv_board(&mut self, update: &BoardUpdate) {
        self.calls.push(ViewCall::TvUpdate(update.clone()));
    }
    fn render_auto_pairing(&mut self, active: bool) {
        self.calls.push(ViewCall::AutoPairing(active));
    }
    fn render_dialog(&mut self, mode: CreateMode, layout: &DialogLayout) {
        self.calls.push(ViewCall::Dialog(mode, layout.clone()));
    }
    fn set_start_enabled(&mut self, enabled: bool) {
        self.calls.push(ViewCall::StartEnabled(enabled));
    }
    fn navigate(&mut self, path: &str) { self.calls.push(ViewCall::Navigate(path.to_owned())); }
    fn confirm(&mut self, question: &str) -> bool {
        self.calls.push(ViewCall::Confirm(question.to_owned()));
        self.confirm_answer
    }
    fn alert(&mut self, message: &str) { self.calls.push(ViewCall::Alert(message.to_owned())); }
    fn request_notification_permission(&mut self) {
        self.calls.push(ViewCall::NotificationPermission);
    }
}

pub struct TestLobby {
    pub state: LobbyClientState<RecordingView>,
    outgoing_rx: mpsc::Receiver<LobbyClientEvent>,
}

impl TestLobby {
    #[allow(dead_code)]
    pub fn new(identity: Identity) -> Self { Self::with_challenge(identity, "") }

    #[allow(dead_code)]
    pub fn with_challenge(identity: Identity, challenge_target: &str) -> Self {
        Self::with_store(identity, challenge_target, MemoryStore::new())
    }

    // Starts with preferences left over from an earlier visit.
    #[allow(dead_code)]
    pub fn with_store(identity: Identity, challenge_target: &str, store: MemoryStore) -> Self {
        let (tx, outgoing_rx) = mpsc::channel();
        let state = LobbyClientState::new(
            identity,
            challenge_target.to_owned(),
            tx,
            RecordingView::new(),
            Box::new(store),
            Box::new(StructuralFenValidator),
        );
        TestLobby { state, outgoing_rx }
    }

    // Feeds a raw text frame, as it would arrive from the socket.
    #[allow(dead_code)]
    pub fn receive(&mut self, text: &str) {
        self.state.process_server_message(text).unwrap();
    }

    #[allow(dead_code)]
    pub fn sent(&mut self) -> Vec<LobbyClientEvent> { self.outgoing_rx.try_iter().collect() }

    #[allow(dead_code)]
    pub fn view_calls(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.state.view_mut().calls)
    }

    #[allow(dead_code)]
    pub fn set_confirm_answer(&mut self, answer: bool) {
        self.state.view_mut().confirm_answer = answer;
    }
}
