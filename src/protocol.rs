//! Line-oriented text protocol for driving the engine.
//!
//! Modelled on GTP: each request is `[id] command [args...]`, each response
//! is `=[id] text` on success or `?[id] message` on failure, followed by a
//! blank line. Empty lines and `#` comments are ignored.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new_game` - Reset to the initial setup
//! - `showboard` - Print the board
//! - `legal_moves` - List legal move legs in notation
//! - `play <from-to>` - Play one move leg, e.g. `play 22-18`
//! - `genmove` - Let the computer play the current turn
//! - `eval` - Static evaluation for the side to move
//! - `status` - Side to move, pending capture, or the winner
//! - `style [label]` - Get or set the game style
//! - `multi_capture <true|false>` - Toggle multi-capture
//! - `savegame <path>`, `loadgame <path>` - Save format I/O
//! - `savelog <path>`, `replay <path>` - Replay log I/O
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::TextEngine;
//! let mut engine = TextEngine::new();
//! engine.run()?;
//! ```

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::game::{Game, Outcome};
use crate::replay::MoveLog;
use crate::save::GameStyle;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "eval",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "loadgame",
    "multi_capture",
    "name",
    "new_game",
    "play",
    "quit",
    "replay",
    "savegame",
    "savelog",
    "showboard",
    "status",
    "style",
    "version",
];

/// Protocol engine state.
pub struct TextEngine {
    game: Game,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self::with_game(Game::default())
    }

    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on any input/output pair until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "request");
            let response = self.execute(&command, args);

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            match response {
                Ok(message) => writeln!(output, "={id_str} {message}\n")?,
                Err(e) => writeln!(output, "?{id_str} {e:#}\n")?,
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn arg<'a>(args: &[&'a str]) -> Result<&'a str> {
        args.first().copied().ok_or_else(|| anyhow!("missing argument"))
    }

    fn status(&self) -> String {
        let pos = self.game.position();
        if let Some(winner) = pos.winner() {
            format!("{winner} has won the game!")
        } else if pos.is_game_over() {
            "No game in progress".to_string()
        } else if pos.double_capture_available() {
            format!("{} to move (continue capturing)", pos.current_player())
        } else if pos.has_capture() {
            format!("{} to move (capture available)", pos.current_player())
        } else {
            format!("{} to move", pos.current_player())
        }
    }

    /// Execute a command and return its response text.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = Self::arg(args)?.to_lowercase();
                Ok(KNOWN_COMMANDS.contains(&cmd.as_str()).to_string())
            }

            "quit" => Ok(String::new()),

            "new_game" => {
                self.game.new_game();
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.game.position())),

            "legal_moves" => {
                let moves = self.game.position().legal_moves();
                Ok(moves
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(" "))
            }

            "play" => {
                let token = Self::arg(args)?;
                let outcome = self.game.play_notation(token)?;
                Ok(match outcome {
                    Outcome::Continue => "continue".to_string(),
                    Outcome::TurnPassed => String::new(),
                    Outcome::GameOver { winner } => format!("{winner} has won the game!"),
                })
            }

            "genmove" => {
                if self.game.position().is_game_over() {
                    bail!("the game is over");
                }
                let legs = self.game.computer_move()?;
                Ok(legs
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(" "))
            }

            "eval" => {
                let pos = self.game.position();
                Ok(pos.value2(pos.current_player()).to_string())
            }

            "status" => Ok(self.status()),

            "style" => match args.first() {
                None => Ok(self.game.style().to_string()),
                Some(label) => {
                    let style: GameStyle = label.parse()?;
                    self.game.set_style(style);
                    Ok(String::new())
                }
            },

            "multi_capture" => {
                let value = Self::arg(args)?;
                let allow: bool = value
                    .parse()
                    .with_context(|| format!("invalid flag '{value}'"))?;
                self.game.set_allow_multi_capture(allow);
                Ok(String::new())
            }

            "savegame" => {
                let path = Self::arg(args)?;
                fs::write(path, self.game.save_string())
                    .with_context(|| format!("cannot write {path}"))?;
                Ok(String::new())
            }

            "loadgame" => {
                let path = Self::arg(args)?;
                let text =
                    fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
                self.game.load_str(&text)?;
                Ok(self.status())
            }

            "savelog" => {
                let path = Self::arg(args)?;
                fs::write(path, self.game.log().to_string())
                    .with_context(|| format!("cannot write {path}"))?;
                Ok(String::new())
            }

            "replay" => {
                let path = Self::arg(args)?;
                let text =
                    fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
                let log: MoveLog = text.parse()?;
                let mut game = Game::replay(&log, self.game.position().allow_multi_capture())?;
                game.set_style(self.game.style());
                self.game = game;
                Ok(self.status())
            }

            _ => Err(anyhow!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn session(engine: &mut TextEngine, input: &str) -> String {
        let mut out = Vec::new();
        engine.serve(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = TextEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = TextEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = TextEngine::new();
        let response = engine.execute("name", &[]).unwrap();
        assert_eq!(response, "checkers-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = TextEngine::new();
        assert_eq!(engine.execute("known_command", &["genmove"]).unwrap(), "true");
        assert_eq!(engine.execute("known_command", &["komi"]).unwrap(), "false");
        assert!(engine.execute("known_command", &[]).is_err());
    }

    #[test]
    fn test_legal_moves_at_start() {
        let mut engine = TextEngine::new();
        let response = engine.execute("legal_moves", &[]).unwrap();
        assert_eq!(response.split(' ').count(), 7);
        assert!(response.contains("22-18"));
    }

    #[test]
    fn test_play_and_status() {
        let mut engine = TextEngine::with_game(Game::new(GameStyle::PlayerVsPlayer));
        assert!(engine.execute("play", &["22-18"]).is_ok());
        assert_eq!(engine.execute("status", &[]).unwrap(), "Red to move");
        assert!(engine.execute("play", &["22-18"]).is_err());
        engine.execute("play", &["9-14"]).unwrap();
        assert_eq!(
            engine.execute("status", &[]).unwrap(),
            "Black to move (capture available)"
        );
    }

    #[test]
    fn test_status_on_empty_board() {
        let mut game = Game::new(GameStyle::PlayerVsPlayer);
        game.set_position(Position::new());
        let mut engine = TextEngine::with_game(game);
        assert_eq!(engine.execute("status", &[]).unwrap(), "No game in progress");
        assert!(engine.execute("genmove", &[]).is_err());

        engine.execute("new_game", &[]).unwrap();
        assert_eq!(engine.execute("status", &[]).unwrap(), "Black to move");
    }

    #[test]
    fn test_style_command() {
        let mut engine = TextEngine::new();
        assert_eq!(engine.execute("style", &[]).unwrap(), "Player-vs-Computer");
        engine.execute("style", &["Computer-vs-Computer"]).unwrap();
        assert_eq!(engine.game().style(), GameStyle::ComputerVsComputer);
        let err = engine.execute("style", &["Nobody"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown game style 'Nobody'");
    }

    #[test]
    fn test_session_responses() {
        let mut engine = TextEngine::with_game(Game::with_seed(GameStyle::PlayerVsComputer, 5));
        let out = session(&mut engine, "# comment\n1 name\n\nplay 22-18\n2 genmove\nbogus\nquit\nname\n");
        let responses: Vec<&str> = out.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(responses.len(), 5);
        assert_eq!(responses[0], "=1 checkers-rust");
        assert_eq!(responses[1], "= ");
        assert!(responses[2].starts_with("=2 "));
        assert_eq!(responses[3], "? unknown command: bogus");
        assert_eq!(responses[4], "= ");
        assert_eq!(engine.game().log().len(), 2);
    }
}
