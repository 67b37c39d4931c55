//! Board-agnostic sequencing engine for the Lockstep firmware
//!
//! This crate contains all engine logic that does not depend on specific
//! hardware:
//!
//! - Instruction and parameter representation
//! - Per-device instruction tables with adjacent-duplicate elision
//! - Short-command registry
//! - Trigger edge gating
//! - The sequencer state machine tying it all together
//!
//! Hardware enters only through the [`target::InstructionTarget`] trait; the
//! firmware crate provides the UART plumbing and the trigger GPIO.

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod instruction;
pub mod registry;
pub mod sequencer;
pub mod setlist;
pub mod target;
pub mod trigger;
pub mod types;
