use std::collections::HashSet;

use itertools::Itertools;

use crate::event::LobbyClientEvent;
use crate::preferences::{self as prefs, PreferenceStore, get_or, set_value};
use crate::seek_form::{DEFAULT_RATING_MAX, DEFAULT_RATING_MIN};
use crate::time_control::TimeControl;
use crate::variant::{Variant, enabled_variants};


pub const AUTO_PAIRING_TCS: [TimeControl; 7] = [
    TimeControl::real_time(1.0, 0),
    TimeControl::real_time(3.0, 0),
    TimeControl::real_time(3.0, 2),
    TimeControl::real_time(5.0, 5),
    TimeControl::real_time(15.0, 10),
    TimeControl::byoyomi(2.0, 15, 1),
    TimeControl::byoyomi(10.0, 30, 1),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AutoPairingVariant {
    pub variant: &'static Variant,
    pub chess960: bool,
}

impl AutoPairingVariant {
    pub fn label(&self) -> String {
        if self.chess960 {
            format!("{}960", self.variant.name)
        } else {
            self.variant.name.to_owned()
        }
    }

    pub fn key(&self) -> String { format!("va_{}", self.label()) }
}

// Two-board games cannot be auto-paired.
pub fn variant_options() -> Vec<AutoPairingVariant> {
    enabled_variants()
        .filter(|v| !v.two_boards)
        .flat_map(|variant| {
            let chess960 = variant.chess960.then_some(AutoPairingVariant { variant, chess960: true });
            std::iter::once(AutoPairingVariant { variant, chess960: false }).chain(chess960)
        })
        .collect()
}

pub fn time_control_key(tc: &TimeControl) -> String { format!("tc_{}", tc) }

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AutoPairingSelection {
    // Keys of checked variant options (`va_*`).
    variants: HashSet<String>,
    // Indices into `AUTO_PAIRING_TCS`.
    time_controls: HashSet<usize>,
    pub rating_min: i32,
    pub rating_max: i32,
}

impl Default for AutoPairingSelection {
    fn default() -> Self {
        AutoPairingSelection {
            variants: HashSet::new(),
            time_controls: HashSet::new(),
            rating_min: DEFAULT_RATING_MIN,
            rating_max: DEFAULT_RATING_MAX,
        }
    }
}

impl AutoPairingSelection {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let variants = variant_options()
            .into_iter()
            .map(|option| option.key())
            .filter(|key| get_or(store, key, false))
            .collect();
        let time_controls = AUTO_PAIRING_TCS
            .iter()
            .positions(|tc| get_or(store, &time_control_key(tc), false))
            .collect();
        AutoPairingSelection {
            variants,
            time_controls,
            rating_min: get_or(store, prefs::AUTO_RATING_MIN, DEFAULT_RATING_MIN),
            rating_max: get_or(store, prefs::AUTO_RATING_MAX, DEFAULT_RATING_MAX),
        }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) {
        for option in variant_options() {
            let key = option.key();
            let checked = self.variants.contains(&key);
            set_value(store, &key, checked);
        }
        for (index, tc) in AUTO_PAIRING_TCS.iter().enumerate() {
            set_value(store, &time_control_key(tc), self.time_controls.contains(&index));
        }
        set_value(store, prefs::AUTO_RATING_MIN, self.rating_min);
        set_value(store, prefs::AUTO_RATING_MAX, self.rating_max);
    }

    pub fn is_variant_checked(&self, option: &AutoPairingVariant) -> bool {
        self.variants.contains(&option.key())
    }
    pub fn is_time_control_checked(&self, index: usize) -> bool {
        self.time_controls.contains(&index)
    }

    // Returns false if there is no such option.
    pub fn set_variant(&mut self, option_key: &str, checked: bool) -> bool {
        if !variant_options().iter().any(|option| option.key() == option_key) {
            return false;
        }
        if checked {
            self.variants.insert(option_key.to_owned());
        } else {
            self.variants.remove(option_key);
        }
        true
    }

    pub fn set_time_control(&mut self, index: usize, checked: bool) -> bool {
        if index >= AUTO_PAIRING_TCS.len() {
            return false;
        }
        if checked {
            self.time_controls.insert(index);
        } else {
            self.time_controls.remove(&index);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.variants = variant_options().into_iter().map(|option| option.key()).collect();
        self.time_controls = (0..AUTO_PAIRING_TCS.len()).collect();
    }

    pub fn reset(&mut self) {
        self.variants.clear();
        self.time_controls.clear();
    }

    // Options are listed in display order regardless of the order they were checked in.
    pub fn to_request(&self) -> LobbyClientEvent {
        let variants = variant_options()
            .into_iter()
            .filter(|option| self.is_variant_checked(option))
            .map(|option| (option.variant.name.to_owned(), option.chess960))
            .collect();
        let tcs = AUTO_PAIRING_TCS
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_time_control_checked(*index))
            .map(|(_, tc)| (tc.minutes, tc.increment, tc.byoyomi_periods))
            .collect();
        LobbyClientEvent::CreateAutoPairing {
            variants,
            tcs,
            rrmin: self.rating_min,
            rrmax: self.rating_max,
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::preferences::MemoryStore;

    #[test]
    fn time_control_keys() {
        let keys = AUTO_PAIRING_TCS.iter().map(time_control_key).collect_vec();
        assert_eq!(keys, vec![
            "tc_1+0",
            "tc_3+0",
            "tc_3+2",
            "tc_5+5",
            "tc_15+10",
            "tc_2+15(b)",
            "tc_10+30(b)",
        ]);
    }

    #[test]
    fn options_skip_two_board_variants() {
        let keys = variant_options().iter().map(AutoPairingVariant::key).collect_vec();
        assert!(keys.contains(&"va_chess".to_owned()));
        assert!(keys.contains(&"va_chess960".to_owned()));
        assert!(keys.contains(&"va_shogi".to_owned()));
        assert!(!keys.contains(&"va_shogi960".to_owned()));
        assert!(!keys.iter().any(|k| k.starts_with("va_bughouse")));
    }

    #[test]
    fn request_from_selection() {
        let mut selection = AutoPairingSelection::default();
        assert!(selection.set_variant("va_chess960", true));
        assert!(selection.set_variant("va_chess", true));
        assert!(!selection.set_variant("va_bughouse", true));
        assert!(selection.set_time_control(5, true));
        assert!(selection.set_time_control(0, true));
        assert!(!selection.set_time_control(7, true));
        selection.rating_min = -200;
        assert_eq!(
            selection.to_request(),
            LobbyClientEvent::CreateAutoPairing {
                variants: vec![("chess".to_owned(), false), ("chess".to_owned(), true)],
                tcs: vec![(1.0, 0, 0), (2.0, 15, 1)],
                rrmin: -200,
                rrmax: 1000,
            }
        );
    }

    #[test]
    fn select_all_and_reset() {
        let mut selection = AutoPairingSelection::default();
        selection.select_all();
        match selection.to_request() {
            LobbyClientEvent::CreateAutoPairing { variants, tcs, .. } => {
                assert_eq!(variants.len(), variant_options().len());
                assert_eq!(tcs.len(), AUTO_PAIRING_TCS.len());
            }
            other => panic!("unexpected request: {other:?}"),
        }
        selection.reset();
        assert_eq!(selection, AutoPairingSelection::default());
    }

    #[test]
    fn selection_persists() {
        let mut store = MemoryStore::new();
        let mut selection = AutoPairingSelection::default();
        selection.set_variant("va_crazyhouse", true);
        selection.set_time_control(2, true);
        selection.rating_max = 350;
        selection.save(&mut store);
        assert_eq!(store.get("va_crazyhouse").as_deref(), Some("true"));
        assert_eq!(store.get("va_atomic").as_deref(), Some("false"));
        assert_eq!(store.get("tc_3+2").as_deref(), Some("true"));
        assert_eq!(AutoPairingSelection::load(&store), selection);
    }
}
