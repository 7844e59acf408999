use std::fmt;

use serde::{Deserialize, Serialize};


// Slider positions in the game dialog map to these values. The leading fractions allow
// quarter-minute bullet games; index 9 is the 5-minute default.
pub const MINUTES_VALUES: [f64; 33] = [
    0.0, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0,
    14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 60.0, 75.0, 90.0,
];
pub const INCREMENT_VALUES: [u32; 28] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 25, 30, 35, 40, 45,
    60, 90,
];
pub const DAYS_VALUES: [u32; 7] = [1, 2, 3, 5, 7, 10, 14];

pub const DEFAULT_MINUTES_INDEX: usize = 9;
pub const DEFAULT_INCREMENT_INDEX: usize = 3;
pub const DEFAULT_DAYS_INDEX: usize = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeTable {
    Minutes,
    Increment,
    Days,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableIndexOutOfRange {
    pub table: TimeTable,
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for TableIndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} index {} out of range (table size {})", self.table, self.index, self.len)
    }
}

fn lookup<T: Copy>(table: TimeTable, values: &[T], index: usize) -> Result<T, TableIndexOutOfRange> {
    values
        .get(index)
        .copied()
        .ok_or(TableIndexOutOfRange { table, index, len: values.len() })
}

pub fn minutes_at(index: usize) -> Result<f64, TableIndexOutOfRange> {
    lookup(TimeTable::Minutes, &MINUTES_VALUES, index)
}
pub fn increment_at(index: usize) -> Result<u32, TableIndexOutOfRange> {
    lookup(TimeTable::Increment, &INCREMENT_VALUES, index)
}
pub fn days_at(index: usize) -> Result<u32, TableIndexOutOfRange> {
    lookup(TimeTable::Days, &DAYS_VALUES, index)
}

// Controls that are too fast to be rated. Both edges are game-design policy and must stay exact.
pub fn is_too_fast(minutes: f64, increment: u32) -> bool {
    (minutes < 1.0 && increment == 0) || (minutes == 0.0 && increment == 1)
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TimeControl {
    pub minutes: f64,
    // Seconds. For byoyomi variants this is the byoyomi period length.
    pub increment: u32,
    pub byoyomi_periods: u32,
    // Days per turn; zero for real-time games.
    pub days: u32,
}

impl TimeControl {
    pub const fn real_time(minutes: f64, increment: u32) -> Self {
        TimeControl { minutes, increment, byoyomi_periods: 0, days: 0 }
    }
    pub const fn byoyomi(minutes: f64, increment: u32, byoyomi_periods: u32) -> Self {
        TimeControl { minutes, increment, byoyomi_periods, days: 0 }
    }
    pub const fn correspondence(days: u32) -> Self {
        TimeControl { minutes: 0.0, increment: 0, byoyomi_periods: 0, days }
    }

    pub fn is_correspondence(&self) -> bool { self.days != 0 }
}

pub fn format_minutes(minutes: f64) -> String {
    if minutes == 0.25 {
        "¼".to_owned()
    } else if minutes == 0.5 {
        "½".to_owned()
    } else if minutes == 0.75 {
        "¾".to_owned()
    } else {
        minutes.to_string()
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            let unit = if self.days == 1 { "day" } else { "days" };
            return write!(f, "{} {}", self.days, unit);
        }
        let base = format_minutes(self.minutes);
        match self.byoyomi_periods {
            0 => write!(f, "{}+{}", base, self.increment),
            1 => write!(f, "{}+{}(b)", base, self.increment),
            periods => write!(f, "{}+{}×{}(b)", base, periods, self.increment),
        }
    }
}
