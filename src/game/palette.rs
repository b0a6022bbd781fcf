//! In-game command palette (the "terminal" easter egg).
//!
//! Lines map directly onto state-machine commands; parsing is pure so the
//! whole surface is unit-testable. Failures never mutate game state; they
//! only produce log lines.

use super::state::Command;

/// Command table: (name, description, subcommands).
const COMMANDS: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "coins",
        "Manage coins",
        &[
            ("add", "Add coins. Example: coins add 1000"),
            ("remove", "Remove coins"),
            ("reset", "Reset progress. Example: coins reset"),
        ],
    ),
    ("reset", "Reset the game", &[]),
    ("clear", "Clear the terminal", &[]),
    ("help", "Show all available commands", &[]),
];

/// Result of running one palette line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaletteOutcome {
    pub logs: Vec<String>,
    pub commands: Vec<Command>,
    pub clear: bool,
}

/// Parse and execute one input line.
pub fn run_command(line: &str) -> PaletteOutcome {
    let mut out = PaletteOutcome::default();
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        return out;
    };

    match name {
        "coins" => match parts.get(1) {
            Some(&"add") => match parts.get(2).and_then(|s| s.parse::<u64>().ok()) {
                Some(amount) => {
                    out.commands.push(Command::AddCoins { amount });
                    out.logs.push(format!("✔ Added {} coins", amount));
                }
                None => out
                    .logs
                    .push("✖ Invalid amount. Usage: coins add <amount>".into()),
            },
            Some(&"remove") => match parts.get(2).and_then(|s| s.parse::<u64>().ok()) {
                Some(amount) => {
                    out.commands.push(Command::RemoveCoins { amount });
                    out.logs.push(format!("✔ Removed {} coins", amount));
                }
                None => out
                    .logs
                    .push("✖ Invalid amount. Usage: coins remove <amount>".into()),
            },
            Some(&"reset") => {
                out.commands.push(Command::ResetProgress);
                out.logs.push("✔ Progress reset".into());
            }
            Some(other) => out.logs.push(format!("{}: subcommand not found", other)),
            None => out.logs.push("coins: missing subcommand".into()),
        },
        "reset" => {
            out.commands.push(Command::ResetGame);
            out.logs.push("✔ Game reset".into());
        }
        "clear" => out.clear = true,
        "help" => {
            for (name, desc, subs) in COMMANDS {
                out.logs.push(format!("{} - {}", name, desc));
                for (sub, sub_desc) in *subs {
                    out.logs.push(format!("  {} - {}", sub, sub_desc));
                }
            }
        }
        other => out.logs.push(format!("{}: command not found", other)),
    }
    out
}

/// Suffix that would complete the current input to the first matching
/// command or subcommand name, if any.
pub fn completion(input: &str) -> Option<String> {
    if input.is_empty() || input.ends_with(' ') {
        return None;
    }
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [cmd] => COMMANDS
            .iter()
            .map(|(name, _, _)| *name)
            .find(|n| n.starts_with(cmd) && n != cmd)
            .map(|n| n[cmd.len()..].to_string()),
        [cmd, sub] => {
            let &(_, _, subs) = COMMANDS.iter().find(|(name, _, _)| name == cmd)?;
            subs.iter()
                .map(|(name, _)| *name)
                .find(|n| n.starts_with(sub) && n != sub)
                .map(|n| n[sub.len()..].to_string())
        }
        _ => None,
    }
}

const MAX_LOG_LINES: usize = 100;

/// Interactive palette state: visibility, input buffer, scrollback, history.
pub struct Palette {
    pub open: bool,
    pub input: String,
    pub logs: Vec<String>,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self {
            open: false,
            input: String::new(),
            logs: vec!["COIN CLICKER terminal. Type 'help' for commands".into()],
            history: Vec::new(),
            history_pos: None,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.history_pos = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Accept the pending completion, if there is one.
    pub fn complete(&mut self) {
        if let Some(rest) = completion(&self.input) {
            self.input.push_str(&rest);
        }
    }

    /// Recall the previous (older) history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => 0,
            Some(p) => (p + 1).min(self.history.len() - 1),
        };
        self.history_pos = Some(next);
        self.input = self.history[next].clone();
    }

    /// Recall the next (newer) history entry.
    pub fn history_next(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => return,
            Some(p) => p.saturating_sub(1),
        };
        self.history_pos = Some(next);
        self.input = self.history[next].clone();
    }

    /// Run the current input line. Returns the state-machine commands the
    /// line produced; log output stays inside the palette.
    pub fn submit(&mut self) -> Vec<Command> {
        let line = std::mem::take(&mut self.input);
        if line.trim().is_empty() {
            return Vec::new();
        }
        self.history.insert(0, line.clone());
        self.history_pos = None;
        self.log(format!("dev@clicker:~$ {}", line));

        let outcome = run_command(&line);
        if outcome.clear {
            self.logs.clear();
        }
        for l in outcome.logs {
            self.log(l);
        }
        outcome.commands
    }

    fn log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
        }
    }
}
