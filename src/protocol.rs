//! Line-oriented text protocol for driving the engine from another program.
//!
//! The framing follows the Go Text Protocol: each command is one line with an
//! optional numeric id, and each response is `=[id] message` on success or
//! `?[id] message` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Start a new game with the current settings
//! - `difficulty <easy|medium|hard>` - Set the computer's search depth
//! - `first <human|computer>` - Start a new game with the given first mover
//! - `play <vertex>` - Play the human's move, e.g. `play b2`
//! - `genmove` - Search for and play the computer's move
//! - `showboard` - Print the board
//! - `status` - Report the game outcome so far
//! - `rules` - Print the rules
//!
//! Vertices are a column letter `a`-`c` and a row digit `1`-`3` counted from
//! the top.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::{Side, parse_coord, str_coord};
use crate::game::{Difficulty, Game, Outcome};

/// The rules as shown to a player.
pub const RULES: &[&str] = &[
    "Reverse Tic Tac Toe Rules:",
    "- First to make 3 in a row LOSES.",
    "- Play to avoid making 3 in a row.",
    "- AI gets smarter with harder levels.",
    "- Select difficulty before starting.",
];

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "difficulty",
    "first",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "rules",
    "showboard",
    "status",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    game: Game,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(Difficulty::default(), Side::Human)
    }
}

impl ProtocolEngine {
    pub fn new(difficulty: Difficulty, first: Side) -> Self {
        Self::from_game(Game::new(difficulty, first))
    }

    pub fn from_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "protocol command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
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
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "difficulty" => {
                let Some(level) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match level.parse::<Difficulty>() {
                    Ok(difficulty) => {
                        self.game.set_difficulty(difficulty);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "first" => {
                let Some(side) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match side.parse::<Side>() {
                    Ok(side) => {
                        self.game.restart_with(side);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                let Some(vertex) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Some((row, col)) = parse_coord(vertex) else {
                    return (false, format!("invalid vertex '{vertex}'"));
                };
                match self.game.play(row, col) {
                    Ok(Outcome::InProgress) => (true, String::new()),
                    Ok(outcome) => (true, outcome.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.game.computer_move() {
                Ok((coord, _)) => (true, str_coord(coord)),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board()).trim_end().to_string()),

            "status" => {
                let message = match self.game.outcome() {
                    Outcome::InProgress => format!("in progress, {} to move", self.game.to_move()),
                    outcome => outcome.to_string(),
                };
                (true, message)
            }

            "rules" => (true, RULES.join("\n")),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
