use crate::fen::PositionValidator;
use crate::seek_form::CreateMode;
use crate::time_control::is_too_fast;
use crate::variant::Variant;


// Whether the start controls of the game dialog may be used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FormValidity {
    pub time_control: bool,
    pub position: bool,
}

impl FormValidity {
    pub fn is_valid(&self) -> bool { self.time_control && self.position }
}

// `minutes` and `increment` are table values, not slider indices.
pub fn time_control_is_valid(mode: CreateMode, minutes: f64, increment: u32, rated: bool) -> bool {
    let long_enough = match mode {
        // The engine needs either some increment or at least a minute of base time.
        CreateMode::PlayAi => (minutes > 0.0 && increment > 0) || (minutes >= 1.0 && increment == 0),
        CreateMode::CreateGame | CreateMode::PlayFriend | CreateMode::CreateHost => {
            minutes + f64::from(increment) > 0.0
        }
    };
    long_enough && !(rated && is_too_fast(minutes, increment))
}

pub fn position_is_valid(validator: &dyn PositionValidator, variant: &Variant, fen: &str) -> bool {
    fen.is_empty() || validator.validate(variant, fen).is_ok()
}
