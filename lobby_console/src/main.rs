// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod network;

mod check_fen;
mod client_config;
mod client_main;
mod console_view;

use clap::{Command, arg};
use client_config::ClientConfig;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Variant lobby")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Terminal client for the variant chess lobby")
        .subcommand_required(true)
        .subcommand(Command::new("client").about("Connect using a configuration file").arg(
            arg!(<config_file> "Path to the configuration file: yaml-serialized ClientConfig."),
        ))
        .subcommand(
            Command::new("connect")
                .about("Connect with settings from the command line")
                .arg(arg!(<server_url> "Lobby WebSocket URL, e.g. ws://localhost:8080/wsl"))
                .arg(arg!(<username> "User name"))
                .arg(arg!(--"anon" "Connect as an anonymous user"))
                .arg(arg!(--"title" <title> "Account title (GM, BOT, ...)").default_value(""))
                .arg(arg!(--"director" "The account is a tournament director"))
                .arg(arg!(--"prefs" <file> "JSON file to keep dialog preferences in"))
                .arg(
                    arg!(--"challenge" <user> "Open the game dialog challenging this user")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("check-fen")
                .about("Verifies whether a starting position may be used in a seek.")
                .arg(arg!(<variant> "Variant name"))
                .arg(arg!(<fen> "Position in FEN")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let config_file = sub_matches.get_one::<String>("config_file").unwrap();
            client_main::run(client_config::read_config_file(config_file)?)
        }
        Some(("connect", sub_matches)) => client_main::run(ClientConfig {
            server_url: sub_matches.get_one::<String>("server_url").unwrap().clone(),
            username: sub_matches.get_one::<String>("username").unwrap().clone(),
            anon: sub_matches.get_flag("anon"),
            title: sub_matches.get_one::<String>("title").unwrap().clone(),
            tournament_director: sub_matches.get_flag("director"),
            preferences_file: sub_matches.get_one::<String>("prefs").cloned(),
            challenge_target: sub_matches.get_one::<String>("challenge").unwrap().clone(),
            go_to_unfinished_game: true,
        }),
        Some(("check-fen", sub_matches)) => check_fen::run(
            sub_matches.get_one::<String>("variant").unwrap(),
            sub_matches.get_one::<String>("fen").unwrap(),
        ),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
