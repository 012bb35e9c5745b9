//! Debug console: command grammar and the stdin bridge.
//!
//! Lines typed on standard input are forwarded by a background thread over a
//! [`crossbeam_channel`] and drained once per frame on the main thread by
//! [`console_command_system`](crate::systems::console::console_command_system).
//!
//! # Commands
//!
//! | Line          | Effect                                                     |
//! |---------------|------------------------------------------------------------|
//! | `toggle`      | flip the hearth theme on/off                               |
//! | `spawn`       | force-spawn one ember, ignoring the cap (theme must be on) |
//! | `fps <n>`     | set the sprite frame rate                                  |
//! | `rate <ms>`   | set the ember spawn interval                               |
//! | `status`      | light the hearth if needed and print its state             |
//! | `help`        | list the commands                                          |

use std::io::BufRead;
use std::thread;

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};

pub const HELP_TEXT: &str =
    "Debug commands: toggle, spawn, fps <n>, rate <ms>, status, help";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Toggle,
    Spawn,
    SetFps(f32),
    SetEmberRate(f64),
    Status,
    Help,
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("Unexpected argument '{}' for '{}'", extra, name));
    }

    let command = match (name.to_ascii_lowercase().as_str(), arg) {
        ("toggle", None) => ConsoleCommand::Toggle,
        ("spawn", None) => ConsoleCommand::Spawn,
        ("status", None) => ConsoleCommand::Status,
        ("help", None) => ConsoleCommand::Help,
        ("fps", Some(value)) => ConsoleCommand::SetFps(parse_positive(value, "fps")? as f32),
        ("rate", Some(value)) => ConsoleCommand::SetEmberRate(parse_positive(value, "rate")?),
        ("fps" | "rate", None) => return Err(format!("'{}' needs a number", name)),
        ("toggle" | "spawn" | "status" | "help", Some(_)) => {
            return Err(format!("'{}' takes no argument", name));
        }
        _ => return Err(format!("Unknown command '{}'. {}", name, HELP_TEXT)),
    };
    Ok(Some(command))
}

fn parse_positive(value: &str, what: &str) -> Result<f64, String> {
    let number: f64 = value
        .parse()
        .map_err(|_| format!("'{}' expects a number, got '{}'", what, value))?;
    if !number.is_finite() || number <= 0.0 {
        return Err(format!("'{}' expects a positive number, got {}", what, value));
    }
    Ok(number)
}

/// Receiving end of the console line channel.
#[derive(Resource)]
pub struct ConsoleBridge {
    rx: Receiver<String>,
}

impl ConsoleBridge {
    /// Wrap an existing receiver. Tests feed lines through the paired sender.
    pub fn from_receiver(rx: Receiver<String>) -> Self {
        Self { rx }
    }

    /// Create a bridge plus the sender that feeds it.
    pub fn channel() -> (Sender<String>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self::from_receiver(rx))
    }

    /// Spawn a thread that forwards stdin lines until EOF.
    pub fn spawn_stdin_reader() -> Result<Self, String> {
        let (tx, bridge) = Self::channel();
        thread::Builder::new()
            .name("hearth-console".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("Console input error: {}", e);
                            break;
                        }
                    }
                }
                debug!("Console reader finished");
            })
            .map_err(|e| format!("Failed to spawn console thread: {}", e))?;
        Ok(bridge)
    }

    /// Take every line received so far without blocking.
    pub fn drain(&self) -> Vec<String> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("toggle"), Ok(Some(ConsoleCommand::Toggle)));
        assert_eq!(parse_command("  spawn "), Ok(Some(ConsoleCommand::Spawn)));
        assert_eq!(parse_command("STATUS"), Ok(Some(ConsoleCommand::Status)));
        assert_eq!(parse_command("help"), Ok(Some(ConsoleCommand::Help)));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \t"), Ok(None));
    }

    #[test]
    fn test_parse_numeric_commands() {
        assert_eq!(parse_command("fps 6"), Ok(Some(ConsoleCommand::SetFps(6.0))));
        assert_eq!(
            parse_command("rate 250.5"),
            Ok(Some(ConsoleCommand::SetEmberRate(250.5)))
        );
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(parse_command("fps").is_err());
        assert!(parse_command("fps fast").is_err());
        assert!(parse_command("fps 0").is_err());
        assert!(parse_command("rate -100").is_err());
        assert!(parse_command("rate NaN").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_and_extra_words() {
        assert!(parse_command("explode").is_err());
        assert!(parse_command("toggle now").is_err());
        assert!(parse_command("fps 3 4").is_err());
    }

    #[test]
    fn test_bridge_drains_in_order() {
        let (tx, bridge) = ConsoleBridge::channel();
        tx.send("toggle".into()).unwrap();
        tx.send("status".into()).unwrap();
        assert_eq!(bridge.drain(), vec!["toggle".to_string(), "status".to_string()]);
        assert!(bridge.drain().is_empty());
    }
}
