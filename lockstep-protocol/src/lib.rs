//! Host Command Protocol
//!
//! This crate defines the UART-based protocol between a control host and the
//! Lockstep sequencer. The protocol is line oriented and human typeable: every
//! command is a newline-terminated ASCII line of space-delimited tokens, and
//! every line is answered with a single status token before the host may send
//! the next one.
//!
//! # Protocol Overview
//!
//! ```text
//! @ <channel>              activate a device for programming
//! $                        arm the programmed run
//! ?                        echo all instruction tables (diagnostics)
//! # <channel> <line>       manually execute one stored line
//! <cmd> <p1> <p2> ...      append an instruction on the active channel
//! ```
//!
//! Replies are `ok`, `armed`, or `err`, giving the host built-in flow
//! control: it must wait for the token before sending the next line.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod token;
pub mod wire;

pub use line::{LineReader, DEFAULT_TERMINATOR, MAX_LINE_LEN};
pub use token::{parse_param, tokens, Tokens};
pub use wire::{HostCommand, Status, CMD_ACTIVATE, CMD_ARM, CMD_ECHO, CMD_EXECUTE};
