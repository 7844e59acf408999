use std::fmt;
use std::sync::mpsc;

use enum_map::EnumMap;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::auto_pairing::AutoPairingSelection;
use crate::broadcast::{Spotlight, Stream};
use crate::chat::{self, prepare_outgoing_message};
use crate::event::{LobbyClientEvent, LobbyServerEvent, parse_server_message};
use crate::fen::PositionValidator;
use crate::preferences::PreferenceStore;
use crate::seek::{Seek, SeekColor, displayed_seeks, partition_by_time_control};
use crate::seek_form::{
    BuildContext, CreateMode, DialogLayout, FormError, Identity, MAX_AI_LEVEL, SeekForm,
    SeekOutcome, TcMode, clamp_rating_max, clamp_rating_min,
};
use crate::tv::TvBoard;
use crate::validation::FormValidity;
use crate::variant::{Variant, default_variant};
use crate::view::{Counter, LobbyView, SeekTable};


// Challenge targets with special meaning when the lobby is opened from a profile page.
pub const ENGINE_TARGET: &str = "Fairy-Stockfish";
pub const INVITE_TARGET: &str = "Invite-friend";
pub const ANY_OPPONENT_TARGET: &str = "any#";

pub const GAME_IN_PROGRESS_QUESTION: &str = "You have an unfinished game!\nGo to game?";
pub const ACCOUNT_REQUIRED_ALERT: &str = "You need an account to do that.";

#[derive(Clone, PartialEq, Debug)]
pub enum LobbyEventError {
    // The message has a known type but its payload cannot be parsed.
    MalformedMessage(String),
}

impl fmt::Display for LobbyEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyEventError::MalformedMessage(err) => write!(f, "malformed lobby message: {}", err),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum FormEdit {
    Variant(String),
    Fen(String),
    // Name of one of the variant's preset positions; empty returns to the standard start.
    AlternateStart(String),
    MinutesIndex(usize),
    IncrementIndex(usize),
    ByoyomiPeriods(u32),
    DayIndex(usize),
    Rated(bool),
    RatingRange { min: i32, max: i32 },
    Chess960(bool),
    AiLevel(u32),
    RandomMover(bool),
}

pub struct LobbyClientState<V: LobbyView> {
    identity: Identity,
    events_tx: mpsc::Sender<LobbyClientEvent>,
    view: V,
    store: Box<dyn PreferenceStore>,
    validator: Box<dyn PositionValidator>,
    create_mode: CreateMode,
    tc_mode: TcMode,
    form: SeekForm,
    valid_game_data: bool,
    // User whose profile page opened the lobby with a challenge. Cleared once a game is requested.
    challenge_target: String,
    seeks: Vec<Seek>,
    tv: Option<TvBoard>,
    chat: chat::LobbyChat,
    counters: EnumMap<Counter, u64>,
    streams: Vec<Stream>,
    spotlights: Vec<Spotlight>,
    auto_pairing: AutoPairingSelection,
    auto_pairing_active: bool,
}

impl<V: LobbyView> LobbyClientState<V> {
    pub fn new(
        identity: Identity, challenge_target: String, events_tx: mpsc::Sender<LobbyClientEvent>,
        view: V, store: Box<dyn PreferenceStore>, validator: Box<dyn PositionValidator>,
    ) -> Self {
        let form = SeekForm::load(store.as_ref());
        let auto_pairing = AutoPairingSelection::load(store.as_ref());
        LobbyClientState {
            identity,
            events_tx,
            view,
            store,
            validator,
            create_mode: CreateMode::CreateGame,
            tc_mode: TcMode::Real,
            form,
            valid_game_data: false,
            challenge_target,
            seeks: Vec::new(),
            tv: None,
            chat: chat::LobbyChat::new(),
            counters: EnumMap::default(),
            streams: Vec::new(),
            spotlights: Vec::new(),
            auto_pairing,
            auto_pairing_active: false,
        }
    }

    pub fn identity(&self) -> &Identity { &self.identity }
    pub fn view(&self) -> &V { &self.view }
    pub fn view_mut(&mut self) -> &mut V { &mut self.view }
    pub fn create_mode(&self) -> CreateMode { self.create_mode }
    pub fn tc_mode(&self) -> TcMode { self.tc_mode }
    pub fn form(&self) -> &SeekForm { &self.form }
    pub fn is_form_valid(&self) -> bool { self.valid_game_data }
    pub fn challenge_target(&self) -> &str { &self.challenge_target }
    pub fn seeks(&self) -> &[Seek] { &self.seeks }
    pub fn tv_board(&self) -> Option<&TvBoard> { self.tv.as_ref() }
    pub fn chat(&self) -> &chat::LobbyChat { &self.chat }
    pub fn counter(&self, counter: Counter) -> u64 { self.counters[counter] }
    pub fn streams(&self) -> &[Stream] { &self.streams }
    pub fn spotlights(&self) -> &[Spotlight] { &self.spotlights }
    pub fn auto_pairing(&self) -> &AutoPairingSelection { &self.auto_pairing }
    pub fn auto_pairing_mut(&mut self) -> &mut AutoPairingSelection { &mut self.auto_pairing }
    pub fn is_auto_pairing_active(&self) -> bool { self.auto_pairing_active }

    // Initial rendering. Opens the game dialog right away when the lobby was reached through a
    // challenge link.
    pub fn start(&mut self) {
        if !self.identity.anon {
            self.view.render_auto_pairing(self.auto_pairing_active);
        }
        match self.challenge_target.as_str() {
            "" => {}
            ENGINE_TARGET => self.open_dialog(CreateMode::PlayAi, None),
            INVITE_TARGET => self.open_dialog(CreateMode::PlayFriend, None),
            ANY_OPPONENT_TARGET => {
                self.challenge_target.clear();
                self.open_dialog(CreateMode::CreateGame, None);
            }
            _ => self.open_dialog(CreateMode::CreateGame, None),
        }
    }

    // `variant` preselects a variant, e.g. when the dialog is opened from the variant catalog.
    // Otherwise the last used one is shown.
    pub fn open_dialog(&mut self, mode: CreateMode, variant: Option<&str>) {
        self.create_mode = mode;
        self.form = SeekForm::load(self.store.as_ref());
        if let Some(name) = variant {
            self.form.variant = name.to_owned();
        }
        let layout = self.dialog_layout();
        if !layout.offers_variant(&self.form.variant) || self.form.variant().is_err() {
            self.form.variant = default_variant().name.to_owned();
        }
        self.apply_variant_constraints();
        self.render_dialog();
        self.refresh_validity();
    }

    // Returns false if the mode is not available in the current dialog.
    pub fn set_tc_mode(&mut self, tc_mode: TcMode) -> bool {
        if tc_mode == TcMode::Corr && !self.dialog_layout().correspondence {
            debug!("Correspondence is not available in {:?}", self.create_mode);
            return false;
        }
        self.tc_mode = tc_mode;
        self.refresh_validity();
        true
    }

    pub fn edit_form(&mut self, edit: FormEdit) {
        let mut layout_changed = false;
        match edit {
            FormEdit::Variant(name) => {
                if !self.dialog_layout().offers_variant(&name) {
                    warn!("Variant {} is not offered in {:?}", name, self.create_mode);
                    return;
                }
                self.form.variant = name;
                self.form.fen.clear();
                self.form.alternate_start.clear();
                self.apply_variant_constraints();
                layout_changed = true;
            }
            FormEdit::Fen(fen) => {
                self.form.fen = fen;
                if !self.form.alternate_start.is_empty() {
                    self.form.alternate_start.clear();
                    layout_changed = true;
                }
            }
            FormEdit::AlternateStart(name) => {
                let fen = if name.is_empty() {
                    Some("")
                } else {
                    self.current_variant().and_then(|v| v.alternate_start(&name))
                };
                let Some(fen) = fen else {
                    warn!("No alternate start {} for {}", name, self.form.variant);
                    return;
                };
                self.form.fen = fen.to_owned();
                if !name.is_empty() {
                    self.form.chess960 = false;
                }
                self.form.alternate_start = name;
                layout_changed = true;
            }
            FormEdit::MinutesIndex(index) => self.form.minutes_index = index,
            FormEdit::IncrementIndex(index) => self.form.increment_index = index,
            FormEdit::ByoyomiPeriods(periods) => self.form.byoyomi_periods = periods,
            FormEdit::DayIndex(index) => self.form.day_index = index,
            FormEdit::Rated(rated) => self.form.rated = rated,
            FormEdit::RatingRange { min, max } => {
                self.form.rating_min = clamp_rating_min(min);
                self.form.rating_max = clamp_rating_max(max);
            }
            FormEdit::Chess960(chess960) => self.form.chess960 = chess960,
            FormEdit::AiLevel(level) => self.form.ai_level = level.min(MAX_AI_LEVEL),
            FormEdit::RandomMover(random_mover) => {
                self.form.random_mover = random_mover;
                self.apply_variant_constraints();
                layout_changed = true;
            }
        }
        if layout_changed {
            self.render_dialog();
        }
        self.refresh_validity();
    }

    // Sends the request for the active dialog mode. Nothing is sent while the form is invalid or
    // when an identical open seek is already listed.
    pub fn create_seek(&mut self, color: SeekColor) -> Result<(), FormError> {
        let validity = self.form_validity()?;
        self.valid_game_data = validity.is_valid();
        if !self.valid_game_data {
            return Err(FormError::InvalidForm(validity));
        }
        let ctx = BuildContext {
            identity: &self.identity,
            mode: self.create_mode,
            tc_mode: self.tc_mode,
            challenge_target: &self.challenge_target,
            known_seeks: &self.seeks,
        };
        let outcome = self.form.build_request(&ctx, color);
        self.challenge_target.clear();
        self.view.request_notification_permission();
        let outcome = outcome?;
        self.form.save(self.store.as_mut(), self.create_mode, self.tc_mode);
        match outcome {
            SeekOutcome::Send(event) => self.send(event),
            SeekOutcome::Duplicate => info!("Not creating seek: identical seek already exists"),
        }
        Ok(())
    }

    // Own seeks are cancelled, other seeks are accepted. Returns false for unknown seeks.
    pub fn click_seek(&mut self, seek_id: &str) -> bool {
        let Some(seek) = self.seeks.iter().find(|s| s.seek_id == seek_id) else {
            warn!("Clicked unknown seek {}", seek_id);
            return false;
        };
        let player = self.identity.username.clone();
        let event = if seek.user == self.identity.username {
            LobbyClientEvent::DeleteSeek { seek_id: seek.seek_id.clone(), player }
        } else if self.identity.anon && seek.is_correspondence() {
            self.view.alert(ACCOUNT_REQUIRED_ALERT);
            return true;
        } else {
            LobbyClientEvent::AcceptSeek { seek_id: seek.seek_id.clone(), player }
        };
        self.send(event);
        true
    }

    pub fn submit_auto_pairing(&mut self) {
        if self.identity.anon {
            return;
        }
        self.auto_pairing.save(self.store.as_mut());
        self.send(self.auto_pairing.to_request());
    }

    pub fn cancel_auto_pairing(&mut self) { self.send(LobbyClientEvent::CancelAutoPairing); }

    pub fn send_chat(&mut self, text: &str) {
        if let Some(message) = prepare_outgoing_message(text) {
            self.send(LobbyClientEvent::LobbyChat {
                user: self.identity.username.clone(),
                message,
            });
        }
    }

    pub fn process_server_message(&mut self, text: &str) -> Result<(), LobbyEventError> {
        match parse_server_message(text) {
            Ok(Some(event)) => {
                self.process_server_event(event);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(LobbyEventError::MalformedMessage(err.to_string())),
        }
    }

    pub fn process_server_event(&mut self, event: LobbyServerEvent) {
        use LobbyServerEvent::*;
        match event {
            GetSeeks { seeks } => {
                self.seeks = seeks;
                self.render_seeks();
            }
            NewGame { game_id } => {
                self.view.navigate(&format!("/{}", game_id));
            }
            GameInProgress { game_id } => {
                if self.view.confirm(GAME_IN_PROGRESS_QUESTION) {
                    self.view.navigate(&format!("/{}", game_id));
                }
            }
            LobbyUserConnected { username } => {
                self.identity.username = username;
            }
            LobbyChat(line) => {
                self.view.append_chat_line(&line);
                self.chat.push(line);
            }
            FullChat { lines } => {
                self.chat.replace(lines);
                let lines = self.chat.lines().cloned().collect_vec();
                self.view.replace_chat(&lines);
            }
            Ping { timestamp } => {
                self.send(LobbyClientEvent::Pong { timestamp });
            }
            TvGame(game) => {
                let tv = self.tv.insert(TvBoard::new(game));
                self.view.render_tv_game(&tv.game);
            }
            Board(update) => {
                if self.tv.as_mut().is_some_and(|tv| tv.apply(&update)) {
                    self.view.update_tv_board(&update);
                } else {
                    debug!("Ignoring board update for game {}", update.game_id);
                }
            }
            GameCounter { cnt } => self.set_counter(Counter::GamesInPlay, cnt),
            UserCounter { cnt } => self.set_counter(Counter::Players, cnt),
            AutoPairingCounter { cnt } => self.set_counter(Counter::AutoPairings, cnt),
            Streams { items } => {
                self.streams = items;
                self.view.render_streams(&self.streams);
            }
            Spotlights { items } => {
                self.spotlights = items;
                self.view.render_spotlights(&self.spotlights);
            }
            InviteCreated { game_id } | HostCreated { game_id } => {
                self.view.navigate(&format!("/invite/{}", game_id));
            }
            AutoPairingOn => self.set_auto_pairing_active(true),
            AutoPairingOff => self.set_auto_pairing_active(false),
            Shutdown { message } | Error { message } => {
                self.view.alert(&message);
            }
            Logout => {
                self.send(LobbyClientEvent::Logout);
            }
            Unknown => {
                info!("Ignoring lobby message of unknown type");
            }
        }
    }

    fn send(&self, event: LobbyClientEvent) {
        if let Err(err) = self.events_tx.send(event) {
            warn!("Cannot send {:?}: connection is closed", err.0);
        }
    }

    fn current_variant(&self) -> Option<&'static Variant> { self.form.variant().ok() }

    fn dialog_layout(&self) -> DialogLayout {
        let variant = self.current_variant().unwrap_or(default_variant());
        DialogLayout::new(self.create_mode, &self.identity, variant, &self.form)
    }

    fn form_validity(&self) -> Result<FormValidity, FormError> {
        if !self.dialog_layout().offers_variant(&self.form.variant) {
            return Err(FormError::VariantNotOffered(self.form.variant.clone()));
        }
        self.form.validity(self.create_mode, self.validator.as_ref())
    }

    fn apply_variant_constraints(&mut self) {
        let Some(variant) = self.current_variant() else {
            return;
        };
        if self.create_mode == CreateMode::PlayAi && variant.random_mover_only() {
            self.form.random_mover = true;
        }
        if !self.dialog_layout().correspondence {
            self.tc_mode = TcMode::Real;
        }
    }

    fn render_dialog(&mut self) {
        let layout = self.dialog_layout();
        self.view.render_dialog(self.create_mode, &layout);
    }

    fn refresh_validity(&mut self) {
        self.valid_game_data = match self.form_validity() {
            Ok(validity) => validity.is_valid(),
            Err(err) => {
                warn!("Invalid game settings: {}", err);
                false
            }
        };
        self.view.set_start_enabled(self.valid_game_data);
    }

    // Renders both seek tables from the last snapshot.
    pub fn render_seeks(&mut self) {
        let viewer = self.identity.viewer();
        let (real_time, correspondence) = partition_by_time_control(&self.seeks);
        let real_time = displayed_seeks(&real_time, viewer);
        let correspondence = displayed_seeks(&correspondence, viewer);
        self.view.render_seeks(SeekTable::RealTime, &real_time);
        self.view.render_seeks(SeekTable::Correspondence, &correspondence);
    }

    fn set_counter(&mut self, counter: Counter, value: u64) {
        self.counters[counter] = value;
        self.view.render_counter(counter, value);
    }

    fn set_auto_pairing_active(&mut self, active: bool) {
        if self.identity.anon {
            return;
        }
        self.auto_pairing_active = active;
        self.view.render_auto_pairing(active);
    }
}
