//! Chat command parsing and routing.
//!
//! Three prefixes, mirroring what the community already knows: `!` for
//! global commands, `p!` for patch lookups, `c!` for Clash lookups.
//! Unrecognised subcommands under a known prefix are ignored, except
//! `p!ver` without an argument which gets a usage hint.

pub mod router;

pub use router::CommandRouter;

const PREFIX_GLOBAL: &str = "!";
const PREFIX_PATCH: &str = "p!";
const PREFIX_CLASH: &str = "c!";

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ayuda,
    Parche,
    Campeones,
    Ver(String),
    VerUsage,
    Objetos,
    Runas,
    PatchCalendario,
    Siguiente,
    Clash,
    ClashCalendario,
    Horarios,
    Premios,
}

/// Parse raw message content into a command, `None` when it is not one.
pub fn parse(content: &str) -> Option<Command> {
    if let Some(rest) = content.strip_prefix(PREFIX_PATCH) {
        return parse_patch(rest);
    }
    if let Some(rest) = content.strip_prefix(PREFIX_CLASH) {
        return parse_clash(rest);
    }
    if let Some(rest) = content.strip_prefix(PREFIX_GLOBAL) {
        return parse_global(rest);
    }
    None
}

fn parse_global(rest: &str) -> Option<Command> {
    let (command, _) = split_command(rest);
    match command.as_str() {
        "ayuda" => Some(Command::Ayuda),
        _ => None,
    }
}

fn parse_patch(rest: &str) -> Option<Command> {
    let (command, argument) = split_command(rest);
    match command.as_str() {
        "parche" => Some(Command::Parche),
        "campeones" => Some(Command::Campeones),
        "ver" => match argument {
            Some(champion) => Some(Command::Ver(champion)),
            None => Some(Command::VerUsage),
        },
        "objetos" => Some(Command::Objetos),
        "runas" => Some(Command::Runas),
        "calendario" => Some(Command::PatchCalendario),
        "siguiente" => Some(Command::Siguiente),
        _ => None,
    }
}

fn parse_clash(rest: &str) -> Option<Command> {
    let (command, _) = split_command(rest);
    match command.as_str() {
        "clash" => Some(Command::Clash),
        "calendario" => Some(Command::ClashCalendario),
        "horarios" => Some(Command::Horarios),
        "premios" => Some(Command::Premios),
        _ => None,
    }
}

fn split_command(rest: &str) -> (String, Option<String>) {
    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(|arg| arg.trim().to_string()).filter(|arg| !arg.is_empty());
    (command, argument)
}
