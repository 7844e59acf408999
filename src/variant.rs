use serde::{Deserialize, Serialize};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DefaultTimeControl {
    Increment,
    Byoyomi,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub width: u8,
    pub height: u8,
}

// The subset of variant rules the lobby needs. Move legality lives on the server.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Variant {
    pub name: &'static str,
    pub display_name: &'static str,
    pub chess960: bool, // whether a randomized start can be requested
    pub two_boards: bool,
    pub time_control: DefaultTimeControl,
    pub board: BoardDimensions,
    pub start_fen: &'static str,
    // Named presets offered next to the standard start: (name, FEN).
    pub alternate_starts: &'static [(&'static str, &'static str)],
}

const fn board(width: u8, height: u8) -> BoardDimensions { BoardDimensions { width, height } }

const CHESS_START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const HOUSE_START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1";

// The handicap giver (gote) moves first.
const SHOGI_HANDICAPS: &[(&str, &str)] = &[
    ("Lance HC", "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
    ("Bishop HC", "lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
    ("Rook HC", "lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
    ("Rook+Lance HC", "lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
    ("2-Piece HC", "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
    ("4-Piece HC", "1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] b 0 1"),
];

const CAPABLANCA_ARRANGEMENTS: &[(&str, &str)] = &[
    ("Bird", "rnbcqkabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBCQKABNR w KQkq - 0 1"),
    ("Carrera", "rcnbqkbnar/pppppppppp/10/10/10/10/PPPPPPPPPP/RCNBQKBNAR w KQkq - 0 1"),
    ("Gothic", "rnbqckabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQCKABNR w KQkq - 0 1"),
    ("Embassy", "rnbqkcabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQKCABNR w KQkq - 0 1"),
];

macro_rules! variant {
    ($name:literal, $display:literal, $chess960:literal, $tc:ident, $w:literal x $h:literal, $fen:expr) => {
        variant!($name, $display, $chess960, $tc, $w x $h, $fen, false)
    };
    ($name:literal, $display:literal, $chess960:literal, $tc:ident, $w:literal x $h:literal, $fen:expr, $two_boards:literal) => {
        Variant {
            name: $name,
            display_name: $display,
            chess960: $chess960,
            two_boards: $two_boards,
            time_control: DefaultTimeControl::$tc,
            board: board($w, $h),
            start_fen: $fen,
            alternate_starts: &[],
        }
    };
}

pub const VARIANTS: &[Variant] = &[
    variant!("chess", "Chess", true, Increment, 8 x 8, CHESS_START),
    variant!("crazyhouse", "Crazyhouse", true, Increment, 8 x 8, HOUSE_START),
    variant!("bughouse", "Bughouse", true, Increment, 8 x 8, HOUSE_START, true),
    variant!("atomic", "Atomic", true, Increment, 8 x 8, CHESS_START),
    variant!("kingofthehill", "King of the Hill", true, Increment, 8 x 8, CHESS_START),
    variant!(
        "3check",
        "Three-check",
        true,
        Increment,
        8 x 8,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3+3 0 1"
    ),
    variant!(
        "antichess",
        "Antichess",
        true,
        Increment,
        8 x 8,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
    ),
    variant!(
        "racingkings",
        "Racing Kings",
        true,
        Increment,
        8 x 8,
        "8/8/8/8/8/8/krbnNBRK/qrbnNBRQ w - - 0 1"
    ),
    variant!(
        "horde",
        "Horde",
        true,
        Increment,
        8 x 8,
        "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1"
    ),
    variant!("duck", "Duck Chess", false, Increment, 8 x 8, CHESS_START),
    variant!("alice", "Alice Chess", false, Increment, 8 x 8, CHESS_START),
    variant!("fogofwar", "Fog of War", false, Increment, 8 x 8, CHESS_START),
    variant!(
        "makruk",
        "Makruk",
        false,
        Increment,
        8 x 8,
        "rnsmksnr/8/pppppppp/8/8/PPPPPPPP/8/RNSKMSNR w - - 0 1"
    ),
    Variant {
        alternate_starts: SHOGI_HANDICAPS,
        ..variant!(
            "shogi",
            "Shogi",
            false,
            Byoyomi,
            9 x 9,
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] w 0 1"
        )
    },
    variant!("minishogi", "Minishogi", false, Byoyomi, 5 x 5, "rbsgk/4p/5/P4/KGSBR[-] w 0 1"),
    variant!(
        "xiangqi",
        "Xiangqi",
        false,
        Increment,
        9 x 10,
        "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1"
    ),
    variant!(
        "janggi",
        "Janggi",
        false,
        Byoyomi,
        9 x 10,
        "rnba1abnr/4k4/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/4K4/RNBA1ABNR w - - 0 1"
    ),
    Variant {
        alternate_starts: CAPABLANCA_ARRANGEMENTS,
        ..variant!(
            "capablanca",
            "Capablanca",
            true,
            Increment,
            10 x 8,
            "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"
        )
    },
    variant!(
        "seirawan",
        "S-Chess",
        true,
        Increment,
        8 x 8,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[HEhe] w KQBCDFGkqbcdfg - 0 1"
    ),
    variant!(
        "grand",
        "Grand",
        false,
        Increment,
        10 x 10,
        "r8r/1nbqkcabn1/pppppppppp/10/10/10/10/PPPPPPPPPP/1NBQKCABN1/R8R w - - 0 1"
    ),
    variant!("ataxx", "Ataxx", false, Increment, 7 x 7, "P5p/7/7/7/7/7/p5P w 0 1"),
];

// Variants that the AI opponent cannot play, so only the random mover is offered.
const RANDOM_MOVER_ONLY: [&str; 2] = ["alice", "fogofwar"];

pub fn find_variant(name: &str) -> Option<&'static Variant> {
    VARIANTS.iter().find(|v| v.name == name)
}

// The variant preselected when nothing else is known.
pub fn default_variant() -> &'static Variant { &VARIANTS[0] }

pub fn enabled_variants() -> impl Iterator<Item = &'static Variant> { VARIANTS.iter() }

pub fn two_board_variants() -> impl Iterator<Item = &'static Variant> {
    VARIANTS.iter().filter(|v| v.two_boards)
}

impl Variant {
    pub fn uses_byoyomi(&self) -> bool { self.time_control == DefaultTimeControl::Byoyomi }

    // Shogi-family variants name the colors the other way round.
    pub fn is_shogi_family(&self) -> bool { self.name.ends_with("shogi") }

    pub fn random_mover_only(&self) -> bool { RANDOM_MOVER_ONLY.contains(&self.name) }

    pub fn alternate_start(&self, name: &str) -> Option<&'static str> {
        self.alternate_starts.iter().find(|(n, _)| *n == name).map(|(_, fen)| *fen)
    }

    pub fn display_name(&self, chess960: bool) -> String {
        if chess960 {
            format!("{}960", self.display_name)
        } else {
            self.display_name.to_owned()
        }
    }

    // Whether `fen` is a custom starting position rather than the standard one.
    pub fn is_custom_position(&self, fen: &str) -> bool {
        let fen = fen.trim();
        if fen.is_empty() {
            return false;
        }
        self.name == "ataxx" || fen != self.start_fen
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_are_unique() {
        for (i, a) in VARIANTS.iter().enumerate() {
            for b in &VARIANTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn start_fen_matches_board_geometry() {
        for variant in VARIANTS {
            let placement = variant.start_fen.split(' ').next().unwrap();
            let placement = placement.split('[').next().unwrap();
            assert_eq!(
                placement.split('/').count(),
                variant.board.height as usize,
                "{}",
                variant.name
            );
        }
    }

    #[test]
    fn standard_start_is_not_custom() {
        let chess = find_variant("chess").unwrap();
        assert!(!chess.is_custom_position(""));
        assert!(!chess.is_custom_position(&format!("  {}  ", CHESS_START)));
        assert!(chess.is_custom_position("8/8/8/8/8/8/8/K6k w - - 0 1"));

        let ataxx = find_variant("ataxx").unwrap();
        assert!(ataxx.is_custom_position(ataxx.start_fen));
    }

    #[test]
    fn variant_flags() {
        assert!(find_variant("shogi").unwrap().is_shogi_family());
        assert!(find_variant("minishogi").unwrap().is_shogi_family());
        assert!(!find_variant("xiangqi").unwrap().is_shogi_family());
        assert!(find_variant("janggi").unwrap().uses_byoyomi());
        assert!(find_variant("fogofwar").unwrap().random_mover_only());
        assert_eq!(two_board_variants().map(|v| v.name).collect::<Vec<_>>(), vec!["bughouse"]);
        assert!(find_variant("nosuchvariant").is_none());
    }

    #[test]
    fn alternate_starts() {
        let capablanca = find_variant("capablanca").unwrap();
        assert_eq!(
            capablanca.alternate_start("Gothic"),
            Some("rnbqckabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQCKABNR w KQkq - 0 1")
        );
        assert_eq!(capablanca.alternate_start("Shuffle"), None);
        assert_eq!(find_variant("shogi").unwrap().alternate_starts.len(), 6);
        assert!(find_variant("chess").unwrap().alternate_starts.is_empty());
        for variant in VARIANTS {
            for (_, fen) in variant.alternate_starts {
                assert!(variant.is_custom_position(fen), "{}", variant.name);
            }
        }
    }
}
