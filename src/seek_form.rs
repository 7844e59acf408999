use std::fmt;

use strum::{EnumIter, IntoEnumIterator};

use crate::event::{GameRequest, LobbyClientEvent};
use crate::fen::PositionValidator;
use crate::preferences::{self as prefs, PreferenceStore, get_or, set_value};
use crate::seek::{Seek, SeekColor, SeekKey, SeekViewer, is_new_seek};
use crate::time_control::{
    DEFAULT_DAYS_INDEX, DEFAULT_INCREMENT_INDEX, DEFAULT_MINUTES_INDEX, TableIndexOutOfRange,
    days_at, increment_at, is_too_fast, minutes_at,
};
use crate::validation::{FormValidity, position_is_valid, time_control_is_valid};
use crate::variant::{Variant, find_variant, two_board_variants};


pub const DEFAULT_VARIANT: &str = "chess";
pub const DEFAULT_BYOYOMI_PERIODS: u32 = 1;
pub const DEFAULT_RATING_MIN: i32 = -1000;
pub const DEFAULT_RATING_MAX: i32 = 1000;
pub const DEFAULT_AI_LEVEL: u32 = 1;
pub const MAX_AI_LEVEL: u32 = 8;
// The rating range slider covers `DEFAULT_RATING_MIN..=0` below and `0..=DEFAULT_RATING_MAX` above
// the user's rating.
// Target sent with friend invites and hosted games: the opponent is whoever opens the link.
pub const INVITE_FRIEND_TARGET: &str = "Invite-friend";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum CreateMode {
    CreateGame,
    PlayFriend,
    PlayAi,
    CreateHost,
}

impl CreateMode {
    pub fn dialog_name(self) -> &'static str {
        match self {
            CreateMode::CreateGame => "create_game",
            CreateMode::PlayFriend => "play_friend",
            CreateMode::PlayAi => "play_ai",
            CreateMode::CreateHost => "create_host",
        }
    }

    pub fn from_dialog_name(name: &str) -> Option<Self> {
        CreateMode::iter().find(|mode| mode.dialog_name() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            CreateMode::CreateGame => "Create a game",
            CreateMode::PlayFriend => "Play with a friend",
            CreateMode::PlayAi => "Play with AI",
            CreateMode::CreateHost => "Host a game for others",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TcMode {
    Real,
    Corr,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Identity {
    pub username: String,
    pub anon: bool,
    pub title: String,
    pub tournament_director: bool,
}

impl Identity {
    pub fn is_bot(&self) -> bool { self.title == "BOT" }

    pub fn viewer(&self) -> SeekViewer<'_> {
        SeekViewer {
            username: &self.username,
            anon: self.anon,
            bot: self.is_bot(),
        }
    }
}

// Which controls the game dialog shows for a given mode, user and variant.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DialogLayout {
    pub rated_selector: bool,
    pub rating_range: bool,
    pub ai_level: bool,
    pub random_mover: bool,
    // Three color buttons, or a single "create" button when false.
    pub color_buttons: bool,
    pub correspondence: bool,
    pub chess960: bool,
    pub byoyomi: bool,
    // Names of the variant's preset positions, shown after the standard start.
    pub alternate_starts: Vec<&'static str>,
    // Variants left out of the variant selector.
    pub excluded_variants: Vec<&'static str>,
}

impl DialogLayout {
    pub fn new(mode: CreateMode, identity: &Identity, variant: &Variant, form: &SeekForm) -> Self {
        let excludes_two_boards = mode != CreateMode::CreateGame || identity.anon;
        DialogLayout {
            rated_selector: !identity.anon && mode != CreateMode::PlayAi,
            rating_range: mode == CreateMode::CreateGame,
            ai_level: mode == CreateMode::PlayAi
                && !form.random_mover
                && !variant.random_mover_only(),
            random_mover: mode == CreateMode::PlayAi,
            color_buttons: mode != CreateMode::CreateHost,
            correspondence: matches!(mode, CreateMode::CreateGame | CreateMode::PlayFriend)
                && !identity.anon
                && !variant.two_boards,
            // A preset position cannot be randomized.
            chess960: variant.chess960 && form.alternate_start.is_empty(),
            byoyomi: variant.uses_byoyomi(),
            alternate_starts: variant.alternate_starts.iter().map(|(name, _)| *name).collect(),
            excluded_variants: if excludes_two_boards {
                two_board_variants().map(|v| v.name).collect()
            } else {
                vec![]
            },
        }
    }

    pub fn offers_variant(&self, name: &str) -> bool { !self.excluded_variants.contains(&name) }
}

#[derive(Clone, PartialEq, Debug)]
pub enum FormError {
    UnknownVariant(String),
    // The variant exists but the current dialog does not offer it.
    VariantNotOffered(String),
    IndexOutOfRange(TableIndexOutOfRange),
    // The start controls are disabled: time control or position is not acceptable.
    InvalidForm(FormValidity),
}

impl From<TableIndexOutOfRange> for FormError {
    fn from(err: TableIndexOutOfRange) -> Self { FormError::IndexOutOfRange(err) }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownVariant(name) => write!(f, "unknown variant: {}", name),
            FormError::VariantNotOffered(name) => write!(f, "{} is not available here", name),
            FormError::IndexOutOfRange(err) => write!(f, "{}", err),
            FormError::InvalidForm(validity) => write!(
                f,
                "invalid game settings (time control ok: {}, position ok: {})",
                validity.time_control, validity.position
            ),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum SeekOutcome {
    Send(LobbyClientEvent),
    // An identical open seek is already listed; nothing to send.
    Duplicate,
}

#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    pub identity: &'a Identity,
    pub mode: CreateMode,
    pub tc_mode: TcMode,
    // User whose profile page initiated the challenge; empty for open seeks.
    pub challenge_target: &'a str,
    pub known_seeks: &'a [Seek],
}

// Rated games are never created against the engine, by anonymous users or bots, from custom
// positions, or with controls that are too fast.
pub fn rated_allowed(
    mode: CreateMode, identity: &Identity, custom_position: bool, minutes: f64, increment: u32,
) -> bool {
    mode != CreateMode::PlayAi
        && !identity.anon
        && !identity.is_bot()
        && !custom_position
        && !is_too_fast(minutes, increment)
}

pub fn clamp_rating_min(min: i32) -> i32 { min.clamp(DEFAULT_RATING_MIN, 0) }
pub fn clamp_rating_max(max: i32) -> i32 { max.clamp(0, DEFAULT_RATING_MAX) }

// Current selections of the game dialog. Slider positions are kept as table indices.
#[derive(Clone, PartialEq, Debug)]
pub struct SeekForm {
    pub variant: String,
    pub fen: String,
    // Name of the chosen preset position; empty for the standard start or a typed FEN.
    pub alternate_start: String,
    pub minutes_index: usize,
    pub increment_index: usize,
    pub byoyomi_periods: u32,
    pub day_index: usize,
    // The user's choice. The value sent can be downgraded, see `rated_allowed`.
    pub rated: bool,
    pub rating_min: i32,
    pub rating_max: i32,
    pub chess960: bool,
    pub ai_level: u32,
    pub random_mover: bool,
}

impl Default for SeekForm {
    fn default() -> Self {
        SeekForm {
            variant: DEFAULT_VARIANT.to_owned(),
            fen: String::new(),
            alternate_start: String::new(),
            minutes_index: DEFAULT_MINUTES_INDEX,
            increment_index: DEFAULT_INCREMENT_INDEX,
            byoyomi_periods: DEFAULT_BYOYOMI_PERIODS,
            day_index: DEFAULT_DAYS_INDEX,
            rated: false,
            rating_min: DEFAULT_RATING_MIN,
            rating_max: DEFAULT_RATING_MAX,
            chess960: false,
            ai_level: DEFAULT_AI_LEVEL,
            random_mover: false,
        }
    }
}

impl SeekForm {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let d = SeekForm::default();
        SeekForm {
            variant: store.get(prefs::SEEK_VARIANT).unwrap_or(d.variant),
            fen: d.fen,
            alternate_start: d.alternate_start,
            minutes_index: get_or(store, prefs::SEEK_MINUTES, d.minutes_index),
            increment_index: get_or(store, prefs::SEEK_INCREMENT, d.increment_index),
            byoyomi_periods: get_or(store, prefs::SEEK_BYOYOMI, d.byoyomi_periods),
            day_index: get_or(store, prefs::SEEK_DAY, d.day_index),
            rated: store.get(prefs::SEEK_RATED).as_deref() == Some("1"),
            rating_min: clamp_rating_min(get_or(store, prefs::SEEK_RATING_MIN, d.rating_min)),
            rating_max: clamp_rating_max(get_or(store, prefs::SEEK_RATING_MAX, d.rating_max)),
            chess960: get_or(store, prefs::SEEK_CHESS960, d.chess960),
            ai_level: get_or(store, prefs::SEEK_LEVEL, d.ai_level).min(MAX_AI_LEVEL),
            random_mover: get_or(store, prefs::SEEK_RANDOM_MOVER, d.random_mover),
        }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore, mode: CreateMode, tc_mode: TcMode) {
        set_value(store, prefs::SEEK_VARIANT, &self.variant);
        set_value(store, prefs::SEEK_MINUTES, self.minutes_index);
        set_value(store, prefs::SEEK_INCREMENT, self.increment_index);
        set_value(store, prefs::SEEK_BYOYOMI, self.byoyomi_periods);
        if tc_mode == TcMode::Corr {
            set_value(store, prefs::SEEK_DAY, self.day_index);
            set_value(store, prefs::LOBBY_TAB, "corr");
        }
        set_value(store, prefs::SEEK_RATED, if self.rated { "1" } else { "0" });
        set_value(store, prefs::SEEK_RATING_MIN, self.rating_min);
        set_value(store, prefs::SEEK_RATING_MAX, self.rating_max);
        set_value(store, prefs::SEEK_CHESS960, self.chess960);
        if mode == CreateMode::PlayAi {
            set_value(store, prefs::SEEK_LEVEL, self.ai_level);
            // Forced for some variants, so it would not reflect a choice.
            if !self.variant().is_ok_and(|v| v.random_mover_only()) {
                set_value(store, prefs::SEEK_RANDOM_MOVER, self.random_mover);
            }
        }
    }

    pub fn variant(&self) -> Result<&'static Variant, FormError> {
        find_variant(&self.variant).ok_or_else(|| FormError::UnknownVariant(self.variant.clone()))
    }

    pub fn minutes(&self) -> Result<f64, FormError> { Ok(minutes_at(self.minutes_index)?) }
    pub fn increment(&self) -> Result<u32, FormError> { Ok(increment_at(self.increment_index)?) }
    pub fn days(&self) -> Result<u32, FormError> { Ok(days_at(self.day_index)?) }

    pub fn validity(
        &self, mode: CreateMode, validator: &dyn PositionValidator,
    ) -> Result<FormValidity, FormError> {
        let variant = self.variant()?;
        Ok(FormValidity {
            time_control: time_control_is_valid(mode, self.minutes()?, self.increment()?, self.rated),
            position: position_is_valid(validator, variant, &self.fen),
        })
    }

    // Builds the single request for the active dialog mode. Does not check `validity`: callers
    // gate on it first.
    pub fn build_request(
        &self, ctx: &BuildContext<'_>, color: SeekColor,
    ) -> Result<SeekOutcome, FormError> {
        let variant = self.variant()?;
        let minutes = self.minutes()?;
        let increment = self.increment()?;
        let day = match ctx.tc_mode {
            TcMode::Corr => self.days()?,
            TcMode::Real => 0,
        };

        let color = if variant.is_shogi_family() { color.flipped() } else { color };
        let custom_position = variant.is_custom_position(&self.fen);
        let fen = if custom_position { self.fen.trim().to_owned() } else { String::new() };
        let byoyomi_period =
            if variant.uses_byoyomi() && increment > 0 { self.byoyomi_periods } else { 0 };
        let rated = self.rated
            && rated_allowed(ctx.mode, ctx.identity, custom_position, minutes, increment);
        let chess960 = variant.chess960 && fen.is_empty() && self.chess960;

        let game = GameRequest {
            user: ctx.identity.username.clone(),
            variant: variant.name.to_owned(),
            fen,
            minutes,
            increment,
            byoyomi_period,
            rated,
            chess960,
            color,
        };
        let event = match ctx.mode {
            CreateMode::PlayAi => LobbyClientEvent::CreateAiChallenge {
                game,
                level: self.ai_level,
                rm: self.random_mover || variant.random_mover_only(),
            },
            CreateMode::PlayFriend => LobbyClientEvent::CreateInvite {
                game,
                target: INVITE_FRIEND_TARGET.to_owned(),
                day,
            },
            CreateMode::CreateHost => LobbyClientEvent::CreateHost {
                game,
                target: INVITE_FRIEND_TARGET.to_owned(),
            },
            CreateMode::CreateGame => {
                let key = SeekKey {
                    user: game.user.clone(),
                    variant: game.variant.clone(),
                    fen: game.fen.clone(),
                    color: game.color,
                    base: game.minutes,
                    inc: game.increment,
                    byoyomi: game.byoyomi_period,
                    day,
                    chess960: game.chess960,
                    rated: game.rated,
                };
                if !is_new_seek(ctx.known_seeks, &key) {
                    return Ok(SeekOutcome::Duplicate);
                }
                LobbyClientEvent::CreateSeek {
                    game,
                    target: ctx.challenge_target.to_owned(),
                    day,
                    rrmin: self.rating_min,
                    rrmax: self.rating_max,
                }
            }
        };
        Ok(SeekOutcome::Send(event))
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::preferences::MemoryStore;
    use crate::test_util::{anonymous_identity, sample_identity};

    fn context<'a>(identity: &'a Identity, mode: CreateMode) -> BuildContext<'a> {
        BuildContext {
            identity,
            mode,
            tc_mode: TcMode::Real,
            challenge_target: "",
            known_seeks: &[],
        }
    }

    fn sent_game(outcome: SeekOutcome) -> GameRequest {
        match outcome {
            SeekOutcome::Send(
                LobbyClientEvent::CreateSeek { game, .. }
                | LobbyClientEvent::CreateInvite { game, .. }
                | LobbyClientEvent::CreateAiChallenge { game, .. }
                | LobbyClientEvent::CreateHost { game, .. },
            ) => game,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn default_form_is_five_plus_three_casual_chess() {
        let identity = sample_identity("alice");
        let outcome = SeekForm::default()
            .build_request(&context(&identity, CreateMode::CreateGame), SeekColor::Random)
            .unwrap();
        assert_eq!(
            outcome,
            SeekOutcome::Send(LobbyClientEvent::CreateSeek {
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
            })
        );
    }

    #[test]
    fn unknown_variant_and_bad_index_fail() {
        let identity = sample_identity("alice");
        let ctx = context(&identity, CreateMode::CreateGame);
        let form = SeekForm { variant: "nosuchvariant".to_owned(), ..SeekForm::default() };
        assert_eq!(
            form.build_request(&ctx, SeekColor::White),
            Err(FormError::UnknownVariant("nosuchvariant".to_owned()))
        );
        let form = SeekForm { increment_index: 28, ..SeekForm::default() };
        assert!(matches!(
            form.build_request(&ctx, SeekColor::White),
            Err(FormError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn rated_downgrade() {
        let alice = sample_identity("alice");
        let rated_form = SeekForm { rated: true, ..SeekForm::default() };
        let rated = |form: &SeekForm, identity: &Identity, mode| {
            sent_game(form.build_request(&context(identity, mode), SeekColor::White).unwrap()).rated
        };

        assert!(rated(&rated_form, &alice, CreateMode::CreateGame));
        assert!(rated(&rated_form, &alice, CreateMode::PlayFriend));
        assert!(!rated(&rated_form, &alice, CreateMode::PlayAi));
        assert!(!rated(&rated_form, &anonymous_identity(), CreateMode::CreateGame));
        let bot = Identity { title: "BOT".to_owned(), ..sample_identity("fsf") };
        assert!(!rated(&rated_form, &bot, CreateMode::CreateGame));

        let custom = SeekForm {
            fen: "8/8/8/8/8/8/8/K6k w - - 0 1".to_owned(),
            ..rated_form.clone()
        };
        assert!(!rated(&custom, &alice, CreateMode::CreateGame));

        // ½+0 and 0+1 are too fast; ¼+1 is not.
        let half_zero = SeekForm { minutes_index: 2, increment_index: 0, ..rated_form.clone() };
        assert!(!rated(&half_zero, &alice, CreateMode::CreateGame));
        let zero_one = SeekForm { minutes_index: 0, increment_index: 1, ..rated_form.clone() };
        assert!(!rated(&zero_one, &alice, CreateMode::CreateGame));
        let quarter_one = SeekForm { minutes_index: 1, increment_index: 1, ..rated_form.clone() };
        assert!(rated(&quarter_one, &alice, CreateMode::CreateGame));
        let one_zero = SeekForm { minutes_index: 4, increment_index: 0, ..rated_form };
        assert!(rated(&one_zero, &alice, CreateMode::CreateGame));
    }

    #[test]
    fn duplicate_suppressed_only_for_open_seeks() {
        let identity = sample_identity("alice");
        let form = SeekForm::default();
        let first = sent_game(
            form.build_request(&context(&identity, CreateMode::CreateGame), SeekColor::White)
                .unwrap(),
        );
        let known = vec![Seek {
            seek_id: "s1".to_owned(),
            user: first.user,
            target: String::new(),
            variant: first.variant,
            color: first.color,
            fen: first.fen,
            base: first.minutes,
            inc: first.increment,
            byoyomi: first.byoyomi_period,
            day: 0,
            chess960: first.chess960,
            rated: first.rated,
            bot: false,
            rating: 1500,
            title: String::new(),
        }];
        for mode in CreateMode::iter() {
            let ctx = BuildContext { known_seeks: &known, ..context(&identity, mode) };
            let outcome = form.build_request(&ctx, SeekColor::White).unwrap();
            assert_eq!(outcome == SeekOutcome::Duplicate, mode == CreateMode::CreateGame, "{mode:?}");
        }
        let ctx = BuildContext { known_seeks: &known, ..context(&identity, CreateMode::CreateGame) };
        assert!(matches!(
            form.build_request(&ctx, SeekColor::Black).unwrap(),
            SeekOutcome::Send(_)
        ));
    }

    #[test]
    fn shogi_flips_color() {
        let identity = sample_identity("alice");
        let ctx = context(&identity, CreateMode::CreateGame);
        let form = SeekForm { variant: "shogi".to_owned(), ..SeekForm::default() };
        let game = sent_game(form.build_request(&ctx, SeekColor::White).unwrap());
        assert_eq!(game.color, SeekColor::Black);
        assert_eq!(game.byoyomi_period, 1);
        let game = sent_game(form.build_request(&ctx, SeekColor::Random).unwrap());
        assert_eq!(game.color, SeekColor::Random);
    }

    #[test]
    fn byoyomi_periods_need_increment() {
        let identity = sample_identity("alice");
        let ctx = context(&identity, CreateMode::CreateGame);
        let form = SeekForm {
            variant: "janggi".to_owned(),
            increment_index: 0,
            byoyomi_periods: 3,
            ..SeekForm::default()
        };
        assert_eq!(sent_game(form.build_request(&ctx, SeekColor::White).unwrap()).byoyomi_period, 0);
        let form = SeekForm { variant: "chess".to_owned(), increment_index: 5, ..form };
        assert_eq!(sent_game(form.build_request(&ctx, SeekColor::White).unwrap()).byoyomi_period, 0);
    }

    #[test]
    fn start_position_is_not_custom() {
        let identity = sample_identity("alice");
        let ctx = context(&identity, CreateMode::CreateGame);
        let chess = find_variant("chess").unwrap();
        let form = SeekForm {
            fen: format!("{} ", chess.start_fen),
            rated: true,
            chess960: true,
            ..SeekForm::default()
        };
        let game = sent_game(form.build_request(&ctx, SeekColor::White).unwrap());
        assert_eq!(game.fen, "");
        assert!(game.rated);
        assert!(game.chess960);

        let ataxx = find_variant("ataxx").unwrap();
        let form = SeekForm {
            variant: "ataxx".to_owned(),
            fen: ataxx.start_fen.to_owned(),
            ..SeekForm::default()
        };
        assert_eq!(sent_game(form.build_request(&ctx, SeekColor::White).unwrap()).fen, ataxx.start_fen);
    }

    #[test]
    fn chess960_needs_support_and_empty_position() {
        let identity = sample_identity("alice");
        let ctx = context(&identity, CreateMode::CreateGame);
        let form = SeekForm { variant: "xiangqi".to_owned(), chess960: true, ..SeekForm::default() };
        assert!(!sent_game(form.build_request(&ctx, SeekColor::White).unwrap()).chess960);
        let form = SeekForm {
            fen: "8/8/8/8/8/8/8/K6k w - - 0 1".to_owned(),
            chess960: true,
            ..SeekForm::default()
        };
        assert!(!sent_game(form.build_request(&ctx, SeekColor::White).unwrap()).chess960);
    }

    #[test]
    fn correspondence_days() {
        let identity = sample_identity("alice");
        let ctx = BuildContext {
            tc_mode: TcMode::Corr,
            challenge_target: "bob",
            ..context(&identity, CreateMode::CreateGame)
        };
        let form = SeekForm { day_index: 4, ..SeekForm::default() };
        match form.build_request(&ctx, SeekColor::White).unwrap() {
            SeekOutcome::Send(LobbyClientEvent::CreateSeek { day, target, .. }) => {
                assert_eq!(day, 7);
                assert_eq!(target, "bob");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let form = SeekForm { day_index: 7, ..SeekForm::default() };
        assert!(form.build_request(&ctx, SeekColor::White).is_err());
    }

    #[test]
    fn ai_and_host_requests() {
        let identity = sample_identity("alice");
        let form = SeekForm {
            variant: "fogofwar".to_owned(),
            ai_level: 5,
            ..SeekForm::default()
        };
        match form.build_request(&context(&identity, CreateMode::PlayAi), SeekColor::Black) {
            Ok(SeekOutcome::Send(LobbyClientEvent::CreateAiChallenge { level, rm, .. })) => {
                assert_eq!(level, 5);
                assert!(rm);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        match form.build_request(&context(&identity, CreateMode::CreateHost), SeekColor::Random) {
            Ok(SeekOutcome::Send(LobbyClientEvent::CreateHost { target, .. })) => {
                assert_eq!(target, INVITE_FRIEND_TARGET);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn preferences_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(SeekForm::load(&store), SeekForm::default());
        let form = SeekForm {
            variant: "crazyhouse".to_owned(),
            minutes_index: 7,
            increment_index: 0,
            day_index: 3,
            rated: true,
            rating_min: -300,
            ai_level: 6,
            random_mover: true,
            ..SeekForm::default()
        };
        form.save(&mut store, CreateMode::PlayAi, TcMode::Corr);
        assert_eq!(SeekForm::load(&store), form);
        assert_eq!(store.get(prefs::SEEK_RATED).as_deref(), Some("1"));
    }

    #[test]
    fn stored_ranges_are_clamped() {
        let mut store = MemoryStore::new();
        store.set(prefs::SEEK_RATING_MIN, "-5000".to_owned());
        store.set(prefs::SEEK_RATING_MAX, "-200".to_owned());
        store.set(prefs::SEEK_LEVEL, "20".to_owned());
        let form = SeekForm::load(&store);
        assert_eq!((form.rating_min, form.rating_max), (-1000, 0));
        assert_eq!(form.ai_level, MAX_AI_LEVEL);
        assert_eq!(clamp_rating_min(300), 0);
        assert_eq!(clamp_rating_max(1500), 1000);
    }

    #[test]
    fn dialog_layouts() {
        let alice = sample_identity("alice");
        let anon = anonymous_identity();
        let chess = find_variant("chess").unwrap();
        let bughouse = find_variant("bughouse").unwrap();
        let form = SeekForm::default();

        let layout = DialogLayout::new(CreateMode::CreateGame, &alice, chess, &form);
        assert!(layout.rated_selector && layout.rating_range && layout.correspondence);
        assert!(layout.color_buttons && !layout.ai_level);
        assert!(layout.offers_variant("bughouse"));

        let layout = DialogLayout::new(CreateMode::CreateGame, &anon, chess, &form);
        assert!(!layout.rated_selector && !layout.correspondence);
        assert!(!layout.offers_variant("bughouse"));

        let layout = DialogLayout::new(CreateMode::CreateGame, &alice, bughouse, &form);
        assert!(!layout.correspondence);

        let layout = DialogLayout::new(CreateMode::PlayAi, &alice, chess, &form);
        assert!(!layout.rated_selector && !layout.rating_range && !layout.correspondence);
        assert!(layout.ai_level && layout.random_mover);
        let fog = find_variant("fogofwar").unwrap();
        assert!(!DialogLayout::new(CreateMode::PlayAi, &alice, fog, &form).ai_level);

        let layout = DialogLayout::new(CreateMode::CreateHost, &alice, chess, &form);
        assert!(!layout.color_buttons && !layout.correspondence);
        assert!(!layout.offers_variant("bughouse"));

        let capablanca = find_variant("capablanca").unwrap();
        let layout = DialogLayout::new(CreateMode::CreateGame, &alice, capablanca, &form);
        assert!(layout.chess960);
        assert_eq!(layout.alternate_starts, vec!["Bird", "Carrera", "Gothic", "Embassy"]);
        let preset = SeekForm { alternate_start: "Gothic".to_owned(), ..SeekForm::default() };
        assert!(!DialogLayout::new(CreateMode::CreateGame, &alice, capablanca, &preset).chess960);

        assert_eq!(CreateMode::from_dialog_name("play_ai"), Some(CreateMode::PlayAi));
        assert_eq!(CreateMode::from_dialog_name("play_chess"), None);
    }
}
