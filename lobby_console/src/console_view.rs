use console::Style;
use itertools::Itertools;

use variant_lobby::broadcast::{Spotlight, Stream};
use variant_lobby::chat::ChatLine;
use variant_lobby::seek::{Seek, SeekMode};
use variant_lobby::seek_form::{CreateMode, DialogLayout};
use variant_lobby::tv::{BoardUpdate, TvGame, last_move_squares, side_to_move};
use variant_lobby::variant::find_variant;
use variant_lobby::view::{Counter, LobbyView, SeekTable};


// Prints lobby updates to stdout, one block per update.
pub struct ConsoleView {
    my_name: String,
    go_to_unfinished_game: bool,
}

impl ConsoleView {
    pub fn new(my_name: String, go_to_unfinished_game: bool) -> Self {
        ConsoleView { my_name, go_to_unfinished_game }
    }

    pub fn set_my_name(&mut self, my_name: String) { self.my_name = my_name; }

    pub fn print_info(&self, message: &str) { println!("{}", Style::new().dim().apply_to(message)); }
    pub fn print_error(&self, message: &str) { println!("{}", Style::new().red().apply_to(message)); }

    fn seek_row(&self, seek: &Seek) -> String {
        let variant = find_variant(&seek.variant)
            .map_or_else(|| seek.variant.clone(), |v| v.display_name(seek.chess960));
        let mode = match seek.mode() {
            SeekMode::Custom => "Custom",
            SeekMode::Rated => "Rated",
            SeekMode::Casual => "Casual",
        };
        let user = seek.displayed_user(&self.my_name);
        let title = if seek.title.is_empty() { String::new() } else { format!("{} ", seek.title) };
        let row = format!(
            "{:<10} {}{:<20} {:>5}  {:<18} {:<12} {}",
            seek.seek_id,
            title,
            user,
            seek.rating,
            variant,
            seek.time_control(),
            mode
        );
        if seek.user == self.my_name {
            Style::new().green().apply_to(row).to_string()
        } else {
            row
        }
    }
}

impl LobbyView for ConsoleView {
    fn render_seeks(&mut self, table: SeekTable, seeks: &[Seek]) {
        let header = match table {
            SeekTable::RealTime => "Real-time seeks",
            SeekTable::Correspondence => "Correspondence seeks",
        };
        println!("{}", Style::new().bold().apply_to(header));
        if seeks.is_empty() {
            self.print_info("  (none)");
        }
        for seek in seeks {
            println!("  {}", self.seek_row(seek));
        }
    }

    fn render_counter(&mut self, counter: Counter, value: u64) {
        self.print_info(&counter.label(value));
    }

    fn append_chat_line(&mut self, line: &ChatLine) {
        println!("{} {}", Style::new().cyan().apply_to(format!("{}:", line.user)), line.message);
    }

    fn replace_chat(&mut self, lines: &[ChatLine]) {
        println!("{}", Style::new().bold().apply_to("Lobby chat"));
        for line in lines {
            self.append_chat_line(line);
        }
    }

    fn render_streams(&mut self, streams: &[Stream]) {
        for stream in streams {
            self.print_info(&format!("Live: {} ({}) {}", stream.username, stream.title, stream.url()));
        }
    }

    fn render_spotlights(&mut self, spotlights: &[Spotlight]) {
        for spotlight in spotlights {
            self.print_info(&format!("Tournament: {} {}", spotlight.summary("en"), spotlight.url()));
        }
    }

    fn render_tv_game(&mut self, game: &TvGame) {
        let player = |name: &str, title: &str, rating: &str| {
            [title, name, rating].into_iter().filter(|s| !s.is_empty()).join(" ")
        };
        println!(
            "{} {} vs {}",
            Style::new().magenta().apply_to("TV:"),
            player(&game.w, &game.wt, &game.wr),
            player(&game.b, &game.bt, &game.br)
        );
        println!("  {}", game.fen);
    }

    fn update_tv_board(&mut self, update: &BoardUpdate) {
        let squares = last_move_squares(&update.last_move).join("-");
        let check = if update.check { " +" } else { "" };
        self.print_info(&format!(
            "TV: {}{}, {:?} to move",
            squares,
            check,
            side_to_move(&update.fen)
        ));
    }

    fn render_auto_pairing(&mut self, active: bool) {
        if active {
            self.print_info("Auto pairing: standing by (/auto-cancel to stop)");
        } else {
            self.print_info("Auto pairing: off (/auto-submit to start)");
        }
    }

    fn render_dialog(&mut self, mode: CreateMode, layout: &DialogLayout) {
        let mut options = vec!["variant", "time", "fen"];
        if layout.byoyomi {
            options.push("byo");
        }
        if layout.correspondence {
            options.push("corr");
        }
        if layout.rated_selector {
            options.push("rated");
        }
        if layout.rating_range {
            options.push("range");
        }
        if layout.chess960 {
            options.push("960");
        }
        if layout.ai_level {
            options.push("level");
        }
        if layout.random_mover {
            options.push("rm");
        }
        if !layout.alternate_starts.is_empty() {
            options.push("alt");
        }
        let start = if layout.color_buttons { "/go w|b|r" } else { "/go" };
        println!("{}", Style::new().bold().apply_to(mode.title()));
        self.print_info(&format!("  options: {}; start with {}", options.join(", "), start));
        if !layout.alternate_starts.is_empty() {
            self.print_info(&format!("  alternate starts: {}", layout.alternate_starts.join(", ")));
        }
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.print_error("Game settings are not valid");
        }
    }

    fn navigate(&mut self, path: &str) {
        println!("{} {}", Style::new().yellow().apply_to("Go to"), path);
    }

    fn confirm(&mut self, question: &str) -> bool {
        let answer = if self.go_to_unfinished_game { "yes" } else { "no" };
        println!("{} {}", question, Style::new().dim().apply_to(answer));
        self.go_to_unfinished_game
    }

    fn alert(&mut self, message: &str) { self.print_error(message); }

    fn request_notification_permission(&mut self) {}
}
