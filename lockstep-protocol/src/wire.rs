//! Wire vocabulary: command forms and status tokens.
//!
//! Commands are divided into two categories:
//! - Control lines (`@`, `$`, `?`, `#`): drive the program/arm lifecycle
//! - Program lines (anything else): append one instruction for the active
//!   device, first token naming a registered short command

use crate::token::{parse_param, tokens};

// Control command tokens: host -> sequencer
pub const CMD_ACTIVATE: &str = "@";
pub const CMD_ARM: &str = "$";
pub const CMD_ECHO: &str = "?";
pub const CMD_EXECUTE: &str = "#";

/// Per-line reply token sent back to the host
///
/// The host must not send another line until it has read this token; the
/// handshake is the protocol's only flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Line accepted
    Ok,
    /// Line accepted and the run is now armed
    Armed,
    /// Line rejected
    Error,
}

impl Status {
    /// The ASCII reply token for this status
    pub fn token(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Armed => "armed",
            Status::Error => "err",
        }
    }
}

/// A command line parsed into its wire form
///
/// Numeric fields carry `Some(0)` for a garbled token but `None` for a
/// missing one, so "no argument" stays distinguishable from "argument 0".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// `@ <channel>`: select the device to program
    Activate { channel: Option<i32> },
    /// `$`: validate and arm the programmed run
    Arm,
    /// `?`: dump every device's instruction table
    Echo,
    /// `# <channel> <line>`: execute one stored line out of band
    ExecuteLine {
        channel: Option<i32>,
        line: Option<i32>,
    },
    /// Any other line: append an instruction on the active channel
    Program { name: &'a str, args: &'a str },
    /// Blank line
    Empty,
}

impl<'a> HostCommand<'a> {
    /// Parse a completed line into its command form
    ///
    /// Never fails: unrecognized first tokens are program lines by
    /// definition, and validity (registered channel, known command) is the
    /// sequencer's concern.
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim_start();
        let (first, rest) = match trimmed.split_once(' ') {
            Some((first, rest)) => (first, rest),
            None => (trimmed, ""),
        };

        if first.is_empty() {
            return HostCommand::Empty;
        }

        let mut args = tokens(rest);
        match first {
            CMD_ACTIVATE => HostCommand::Activate {
                channel: args.next().map(parse_param),
            },
            CMD_ARM => HostCommand::Arm,
            CMD_ECHO => HostCommand::Echo,
            CMD_EXECUTE => HostCommand::ExecuteLine {
                channel: args.next().map(parse_param),
                line: args.next().map(parse_param),
            },
            name => HostCommand::Program { name, args: rest },
        }
    }
}
