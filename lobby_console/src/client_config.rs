use anyhow::Context;
use serde::{Deserialize, Serialize};


fn default_true() -> bool { true }

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_url: String,
    pub username: String,
    #[serde(default)]
    pub anon: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tournament_director: bool,
    // Preferences are kept in memory only when not set.
    #[serde(default)]
    pub preferences_file: Option<String>,
    #[serde(default)]
    pub challenge_target: String,
    // Answer to "Go to game?" when the server reports an unfinished game.
    #[serde(default = "default_true")]
    pub go_to_unfinished_game: bool,
}

pub fn read_config_file(filename: &str) -> anyhow::Result<ClientConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'."))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file '{filename}'."))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config: ClientConfig = serde_yaml::from_str(
            "server_url: ws://localhost:8080/wsl\nusername: alice\n",
        )
        .unwrap();
        assert_eq!(config.username, "alice");
        assert!(!config.anon);
        assert_eq!(config.preferences_file, None);
        assert!(config.go_to_unfinished_game);
    }
}
