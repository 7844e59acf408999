// Improvement potential: Show the seek tables in a full-screen TUI instead of printing updates.

use std::io::{self, BufRead};
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, anyhow, bail};
use log::{info, warn};
use tungstenite::protocol;
use url::Url;

use variant_lobby::client::{FormEdit, LobbyClientState};
use variant_lobby::fen::StructuralFenValidator;
use variant_lobby::preferences::{JsonFileStore, MemoryStore, PreferenceStore};
use variant_lobby::seek::SeekColor;
use variant_lobby::seek_form::{CreateMode, Identity, TcMode};

use crate::client_config::ClientConfig;
use crate::console_view::ConsoleView;
use crate::network;


enum IncomingEvent {
    Network(String),
    Disconnected(String),
    Terminal(String),
}

#[derive(Clone, PartialEq, Debug)]
enum UserCommand {
    OpenDialog(CreateMode, Option<String>),
    Edit(FormEdit),
    SetTime { minutes_index: usize, increment_index: usize },
    SetTcMode(TcMode),
    Go(SeekColor),
    ClickSeek(String),
    ShowSeeks,
    AutoPairingToggle(String, bool),
    AutoPairingSelectAll,
    AutoPairingReset,
    AutoPairingSubmit,
    AutoPairingCancel,
    Chat(String),
    Quit,
}

fn parse_on_off(arg: &str) -> Result<bool, String> {
    match arg {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("Expected 'on' or 'off', got '{}'", arg)),
    }
}

fn parse_number<T: std::str::FromStr>(arg: Option<&str>) -> Result<T, String> {
    let arg = arg.ok_or_else(|| "Missing argument".to_owned())?;
    arg.parse().map_err(|_| format!("Not a number: '{}'", arg))
}

fn parse_command(input: &str) -> Result<UserCommand, String> {
    let Some(cmd) = input.strip_prefix('/') else {
        return Ok(UserCommand::Chat(input.to_owned()));
    };
    let (name, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();
    let arg = args.next();
    let command = match name {
        "create" => {
            let dialog = arg.unwrap_or_default();
            let mode = CreateMode::from_dialog_name(dialog)
                .ok_or_else(|| format!("Unknown dialog: '{}'", dialog))?;
            UserCommand::OpenDialog(mode, args.next().map(str::to_owned))
        }
        "variant" => UserCommand::Edit(FormEdit::Variant(rest.to_owned())),
        "fen" => UserCommand::Edit(FormEdit::Fen(rest.to_owned())),
        "alt" => UserCommand::Edit(FormEdit::AlternateStart(rest.to_owned())),
        "time" => UserCommand::SetTime {
            // Both arguments are slider positions.
            minutes_index: parse_number(arg)?,
            increment_index: parse_number(args.next())?,
        },
        "byo" => UserCommand::Edit(FormEdit::ByoyomiPeriods(parse_number(arg)?)),
        "days" => UserCommand::Edit(FormEdit::DayIndex(parse_number(arg)?)),
        "rated" => UserCommand::Edit(FormEdit::Rated(parse_on_off(rest)?)),
        "960" => UserCommand::Edit(FormEdit::Chess960(parse_on_off(rest)?)),
        "level" => UserCommand::Edit(FormEdit::AiLevel(parse_number(arg)?)),
        "rm" => UserCommand::Edit(FormEdit::RandomMover(parse_on_off(rest)?)),
        "range" => UserCommand::Edit(FormEdit::RatingRange {
            min: parse_number(arg)?,
            max: parse_number(args.next())?,
        }),
        "real" => UserCommand::SetTcMode(TcMode::Real),
        "corr" => UserCommand::SetTcMode(TcMode::Corr),
        "go" => {
            let code = if rest.is_empty() { "r" } else { rest };
            let color =
                SeekColor::from_code(code).ok_or_else(|| format!("Unknown color: '{}'", code))?;
            UserCommand::Go(color)
        }
        "accept" => UserCommand::ClickSeek(rest.to_owned()),
        "seeks" => UserCommand::ShowSeeks,
        "auto" => {
            let key = arg.ok_or_else(|| "Missing option".to_owned())?.to_owned();
            let checked = match args.next() {
                Some(state) => parse_on_off(state)?,
                None => true,
            };
            UserCommand::AutoPairingToggle(key, checked)
        }
        "auto-all" => UserCommand::AutoPairingSelectAll,
        "auto-reset" => UserCommand::AutoPairingReset,
        "auto-submit" => UserCommand::AutoPairingSubmit,
        "auto-cancel" => UserCommand::AutoPairingCancel,
        "quit" => UserCommand::Quit,
        _ => return Err(format!("Unknown command: '{}'", name)),
    };
    Ok(command)
}

fn connect(server_url: &str) -> anyhow::Result<tungstenite::WebSocket<TcpStream>> {
    let url = Url::parse(server_url).with_context(|| format!("Invalid server URL '{server_url}'."))?;
    if url.scheme() != "ws" {
        bail!("Only ws:// URLs are supported, got '{}'.", server_url);
    }
    let host = url.host_str().ok_or_else(|| anyhow!("No host in '{}'.", server_url))?;
    let port = url.port_or_known_default().unwrap_or(80);
    info!("Connecting to {}:{}...", host, port);
    let stream = TcpStream::connect((host, port))
        .with_context(|| format!("Failed to connect to {host}:{port}."))?;
    let (socket, _) = tungstenite::client(url.as_str(), stream)
        .map_err(|err| anyhow!("WebSocket handshake failed: {}", err))?;
    Ok(socket)
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let store: Box<dyn PreferenceStore> = match &config.preferences_file {
        Some(path) => Box::new(
            JsonFileStore::open(path)
                .with_context(|| format!("Failed to load preferences from '{path}'."))?,
        ),
        None => Box::new(MemoryStore::new()),
    };
    let identity = Identity {
        username: config.username.trim().to_owned(),
        anon: config.anon,
        title: config.title.clone(),
        tournament_director: config.tournament_director,
    };

    let mut socket_in = connect(&config.server_url)?;
    let mut socket_out = network::clone_websocket(&socket_in, protocol::Role::Client)
        .context("Failed to clone the connection.")?;

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx;
    thread::spawn(move || {
        loop {
            let ev = match network::read_text(&mut socket_in) {
                Ok(text) => IncomingEvent::Network(text),
                Err(err) => IncomingEvent::Disconnected(err.to_string()),
            };
            let disconnected = matches!(ev, IncomingEvent::Disconnected(_));
            if tx_net.send(ev).is_err() || disconnected {
                break;
            }
        }
    });
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx_local.send(IncomingEvent::Terminal(line)).is_err() {
                break;
            }
        }
    });

    let (server_tx, server_rx) = mpsc::channel();
    thread::spawn(move || {
        for ev in server_rx {
            if let Err(err) = network::write_obj(&mut socket_out, &ev) {
                warn!("Cannot send to server: {}", err);
                break;
            }
        }
    });

    let view = ConsoleView::new(identity.username.clone(), config.go_to_unfinished_game);
    let mut client_state = LobbyClientState::new(
        identity,
        config.challenge_target.clone(),
        server_tx,
        view,
        store,
        Box::new(StructuralFenValidator),
    );
    client_state.start();
    for event in rx {
        match event {
            IncomingEvent::Network(text) => {
                if let Err(err) = client_state.process_server_message(&text) {
                    warn!("Dropping message: {}", err);
                }
                let my_name = client_state.identity().username.clone();
                client_state.view_mut().set_my_name(my_name);
            }
            IncomingEvent::Disconnected(reason) => {
                return Err(anyhow!("Disconnected from server: {}", reason));
            }
            IncomingEvent::Terminal(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_command(line) {
                    Ok(UserCommand::Quit) => return Ok(()),
                    Ok(command) => execute(&mut client_state, command),
                    Err(err) => client_state.view().print_error(&err),
                }
            }
        }
    }
    Ok(())
}

fn execute(client_state: &mut LobbyClientState<ConsoleView>, command: UserCommand) {
    match command {
        UserCommand::OpenDialog(mode, variant) => client_state.open_dialog(mode, variant.as_deref()),
        UserCommand::Edit(edit) => client_state.edit_form(edit),
        UserCommand::SetTime { minutes_index, increment_index } => {
            client_state.edit_form(FormEdit::MinutesIndex(minutes_index));
            client_state.edit_form(FormEdit::IncrementIndex(increment_index));
        }
        UserCommand::SetTcMode(tc_mode) => {
            if !client_state.set_tc_mode(tc_mode) {
                client_state.view().print_error("Correspondence is not available here");
            }
        }
        UserCommand::Go(color) => {
            if let Err(err) = client_state.create_seek(color) {
                client_state.view().print_error(&err.to_string());
            }
        }
        UserCommand::ClickSeek(seek_id) => {
            if !client_state.click_seek(&seek_id) {
                client_state.view().print_error(&format!("No such seek: '{}'", seek_id));
            }
        }
        UserCommand::ShowSeeks => client_state.render_seeks(),
        UserCommand::AutoPairingToggle(key, checked) => {
            let option = format!("va_{}", key);
            let updated = match key.parse::<usize>() {
                Ok(index) => client_state.auto_pairing_mut().set_time_control(index, checked),
                Err(_) => client_state.auto_pairing_mut().set_variant(&option, checked),
            };
            if !updated {
                client_state.view().print_error(&format!("No such auto pairing option: '{}'", key));
            }
        }
        UserCommand::AutoPairingSelectAll => client_state.auto_pairing_mut().select_all(),
        UserCommand::AutoPairingReset => client_state.auto_pairing_mut().reset(),
        UserCommand::AutoPairingSubmit => client_state.submit_auto_pairing(),
        UserCommand::AutoPairingCancel => client_state.cancel_auto_pairing(),
        UserCommand::Chat(text) => client_state.send_chat(&text),
        UserCommand::Quit => {}
    }
}
