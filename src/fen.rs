// Improvement potential: Check piece letters against the variant piece set.
// Improvement potential: Verify king count and castling rights.

use itertools::Itertools;

use crate::once_cell_regex;
use crate::variant::Variant;


// Decides whether a custom starting position may be offered in a seek. The lobby only gates the
// start buttons with it; the server validates positions again.
pub trait PositionValidator {
    fn validate(&self, variant: &Variant, fen: &str) -> Result<(), String>;
}

// Checks FEN structure against board geometry: rank count, rank widths, pocket syntax and side to
// move.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralFenValidator;

impl PositionValidator for StructuralFenValidator {
    fn validate(&self, variant: &Variant, fen: &str) -> Result<(), String> {
        validate_fen_structure(variant, fen)
    }
}

fn split_pocket(placement: &str) -> Result<(&str, Option<&str>), String> {
    match placement.find('[') {
        None => Ok((placement, None)),
        Some(start) => {
            let pocket = placement[start + 1..]
                .strip_suffix(']')
                .ok_or_else(|| format!("unterminated pocket: {}", placement))?;
            Ok((&placement[..start], Some(pocket)))
        }
    }
}

fn add_squares(rank: &str, width: usize, squares: usize) -> Result<usize, String> {
    width.checked_add(squares).ok_or_else(|| format!("rank \"{}\" is too wide", rank))
}

fn parse_empty_run(rank: &str, run: &str) -> Result<usize, String> {
    run.parse::<usize>().map_err(|_| format!("invalid empty run in rank \"{}\": {}", rank, run))
}

fn rank_width(rank: &str) -> Result<usize, String> {
    let mut width: usize = 0;
    let mut empty_run = String::new();
    for ch in rank.chars() {
        if ch.is_ascii_digit() {
            empty_run.push(ch);
            continue;
        }
        if !empty_run.is_empty() {
            width = add_squares(rank, width, parse_empty_run(rank, &empty_run)?)?;
            empty_run.clear();
        }
        match ch {
            // Promotion markers do not occupy a square.
            '+' | '~' => {}
            '*' => width = add_squares(rank, width, 1)?,
            ch if ch.is_ascii_alphabetic() => width = add_squares(rank, width, 1)?,
            _ => return Err(format!("invalid character in rank \"{}\": {}", rank, ch)),
        }
    }
    if !empty_run.is_empty() {
        width = add_squares(rank, width, parse_empty_run(rank, &empty_run)?)?;
    }
    Ok(width)
}

pub fn validate_fen_structure(variant: &Variant, fen: &str) -> Result<(), String> {
    let fields = fen.split_whitespace().collect_vec();
    let (&placement, rest) = fields.split_first().ok_or_else(|| "empty position".to_owned())?;
    let (board, pocket) = split_pocket(placement)?;
    if let Some(pocket) = pocket {
        let pocket_re = once_cell_regex!(r"^(-|[A-Za-z]*)$");
        if !pocket_re.is_match(pocket) {
            return Err(format!("invalid pocket: {}", pocket));
        }
    }
    let ranks = board.split('/').collect_vec();
    if ranks.len() != variant.board.height as usize {
        return Err(format!(
            "expected {} ranks, got {}",
            variant.board.height,
            ranks.len()
        ));
    }
    for rank in ranks {
        let width = rank_width(rank)?;
        if width != variant.board.width as usize {
            return Err(format!(
                "rank \"{}\" has {} squares, expected {}",
                rank, width, variant.board.width
            ));
        }
    }
    match rest.first() {
        Some(&"w") | Some(&"b") => Ok(()),
        Some(side) => Err(format!("invalid side to move: {}", side)),
        None => Err("missing side to move".to_owned()),
    }
}
