//! Sequencer orchestration.
//!
//! Binds the protocol, registry, tables, and trigger gate into the
//! program/arm/run lifecycle:
//!
//! ```text
//!        @ <ch>            $             first falling edge
//! Idle ----------> Programming ----> Armed ----------------> Running
//!   ^                  ^  |                                     |
//!   |                  '--'  @ re-enters from any phase         |
//!   '-----------------------------------------------------------'
//! ```
//!
//! One instance owns every device slot. The firmware shares it between the
//! host task (foreground, `process_line`) and the trigger task
//! (`on_trigger_edge`); the run cursor is the only state both sides touch,
//! so it is atomic.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use heapless::Vec;

use lockstep_protocol::{parse_param, tokens, HostCommand, Status};

use crate::error::SequenceError;
use crate::instruction::{Instruction, Op};
use crate::registry::CommandRegistry;
use crate::setlist::Setlist;
use crate::target::InstructionTarget;
use crate::trigger::{Edge, TriggerController};
use crate::types::{Channel, Opcode, ParamList, MAX_CHANNELS, MAX_PARAMS};

/// Sequencing phase
///
/// The active channel lives inside `Programming`, so program lines cannot
/// reach a table in any other phase by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No program being built, no run armed
    Idle,
    /// Building the active channel's table
    Programming { active: Channel },
    /// Program validated; waiting for the first falling edge
    Armed,
    /// Stepping through the program on trigger edges
    Running,
}

/// One registered device and its program
struct DeviceSlot<'d> {
    target: &'d mut dyn InstructionTarget,
    setlist: Setlist,
}

/// The sequencing engine
pub struct Sequencer<'d> {
    slots: Vec<DeviceSlot<'d>, MAX_CHANNELS>,
    registry: CommandRegistry,
    trigger: TriggerController,
    phase: Phase,
    // Run cursor, shared with the trigger context. Load/store only; each
    // phase has a single writer.
    next_line: AtomicUsize,
    expected_len: usize,
    error: bool,
}

impl Default for Sequencer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> Sequencer<'d> {
    /// Create an engine with no devices registered
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            registry: CommandRegistry::new(),
            trigger: TriggerController::new(),
            phase: Phase::Idle,
            next_line: AtomicUsize::new(0),
            expected_len: 0,
            error: false,
        }
    }

    /// Register a device; the returned channel is its slot index
    pub fn register_device(
        &mut self,
        target: &'d mut dyn InstructionTarget,
    ) -> Result<Channel, SequenceError> {
        let channel = self.slots.len();
        self.slots
            .push(DeviceSlot {
                target,
                setlist: Setlist::new(),
            })
            .map_err(|_| SequenceError::SlotsFull)?;
        Ok(channel)
    }

    /// Bind a short command to a target action on a registered channel
    pub fn register_command(
        &mut self,
        name: &str,
        channel: Channel,
        opcode: Opcode,
        arity: usize,
    ) -> Result<(), SequenceError> {
        if channel >= self.slots.len() {
            return Err(SequenceError::InvalidChannel);
        }
        self.registry.register(name, channel, opcode, arity)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Step the run will execute on the next accepted edge
    pub fn next_line(&self) -> usize {
        self.next_line.load(Ordering::Relaxed)
    }

    /// Line count every device table must match at arm time
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    /// Latched error flag; cleared by the next successful activate
    pub fn error_flag(&self) -> bool {
        self.error
    }

    pub fn device_count(&self) -> usize {
        self.slots.len()
    }

    /// Programmed length of one device's table
    pub fn table_len(&self, channel: Channel) -> Option<usize> {
        self.slots.get(channel).map(|slot| slot.setlist.len())
    }

    /// Process one host line and report its status
    ///
    /// Diagnostic output (the `?` dump) goes to `out`; the returned status
    /// is the per-line handshake token the host is waiting on.
    pub fn process_line(&mut self, line: &str, out: &mut impl fmt::Write) -> Status {
        let result = match HostCommand::parse(line) {
            HostCommand::Activate { channel } => self.activate(channel),
            HostCommand::Arm => self.arm_program(),
            HostCommand::Echo => {
                // A truncated dump is still a successful line
                let _ = self.write_dump(out);
                Ok(())
            }
            HostCommand::ExecuteLine { channel, line } => self.execute_line(channel, line),
            HostCommand::Program { name, args } => self.program_line(name, args),
            HostCommand::Empty => Ok(()),
        };

        match result {
            Ok(()) if self.phase == Phase::Armed => Status::Armed,
            Ok(()) => Status::Ok,
            Err(_) => {
                self.error = true;
                Status::Error
            }
        }
    }

    /// Report a trigger edge from the trigger context
    ///
    /// Returns whether the edge advanced the run. Must stay short: the next
    /// edge can arrive as soon as this returns.
    pub fn on_trigger_edge(&mut self, edge: Edge) -> bool {
        if !matches!(self.phase, Phase::Armed | Phase::Running) {
            return false;
        }
        if !self.trigger.on_edge(edge) {
            return false;
        }

        self.advance();
        self.phase = Phase::Running;
        true
    }

    /// Begin programming a device
    ///
    /// Only the activated device's table is cleared; every other table
    /// keeps its program until its own activation.
    fn activate(&mut self, channel: Option<i32>) -> Result<(), SequenceError> {
        let channel = self.checked_channel(channel)?;

        self.slots[channel].setlist.clear();
        self.next_line.store(0, Ordering::Relaxed);
        self.expected_len = 0;
        self.trigger.disarm();
        self.phase = Phase::Programming { active: channel };
        self.error = false;
        Ok(())
    }

    /// Append one instruction on the active channel
    fn program_line(&mut self, name: &str, args: &str) -> Result<(), SequenceError> {
        let Phase::Programming { active } = self.phase else {
            return Err(SequenceError::NotProgramming);
        };

        let (opcode, arity) = match self.registry.lookup(name, active) {
            Some(binding) => (binding.opcode, binding.arity),
            None => return Err(SequenceError::UnknownCommand),
        };

        // Exactly `arity` params; missing or garbled tokens become 0 and
        // extras are ignored
        let mut params: ParamList = [0; MAX_PARAMS];
        let mut args = tokens(args);
        for slot in params.iter_mut().take(arity) {
            *slot = args.next().map(parse_param).unwrap_or(0);
        }

        self.slots[active]
            .setlist
            .append(Instruction::apply(opcode, params))?;
        self.next_line.store(self.next_line() + 1, Ordering::Relaxed);
        self.expected_len += 1;
        Ok(())
    }

    /// Validate rectangularity and arm the run
    ///
    /// Arming does not execute step 0; the first falling edge does. With N
    /// programmed lines, N edges execute steps 0..N-1 exactly once.
    fn arm_program(&mut self) -> Result<(), SequenceError> {
        if self
            .slots
            .iter()
            .any(|slot| slot.setlist.len() != self.expected_len)
        {
            return Err(SequenceError::NonRectangularProgram);
        }

        self.next_line.store(0, Ordering::Relaxed);
        self.trigger.arm();
        self.phase = Phase::Armed;
        Ok(())
    }

    /// Manual out-of-band execute; does not touch the run cursor
    fn execute_line(
        &mut self,
        channel: Option<i32>,
        line: Option<i32>,
    ) -> Result<(), SequenceError> {
        let channel = self.checked_channel(channel)?;
        let line = line
            .and_then(|line| usize::try_from(line).ok())
            .ok_or(SequenceError::LineOutOfRange)?;

        let slot = &mut self.slots[channel];
        slot.setlist.execute_at(line, &mut *slot.target)
    }

    /// Execute the current line on every device and move the cursor
    ///
    /// Runs in the trigger context. A device whose table ended is a no-op;
    /// the cursor still moves, so a pulse past the programmed end cannot
    /// fault the run.
    fn advance(&mut self) {
        let line = self.next_line.load(Ordering::Relaxed);
        for slot in self.slots.iter_mut() {
            let _ = slot.setlist.execute_at(line, &mut *slot.target);
        }
        self.next_line.store(line + 1, Ordering::Relaxed);
    }

    /// Dump every device's table for the `?` query
    fn write_dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "devices {} expected {} next {}",
            self.slots.len(),
            self.expected_len,
            self.next_line()
        )?;

        for (channel, slot) in self.slots.iter().enumerate() {
            let mismatch = if slot.setlist.len() != self.expected_len {
                " length mismatch"
            } else {
                ""
            };
            writeln!(out, "ch {} len {}{}", channel, slot.setlist.len(), mismatch)?;

            for index in 0..slot.setlist.len() {
                if let Some(entry) = slot.setlist.get(index) {
                    match entry.op {
                        Op::Apply(opcode) => write!(out, "  {} op {}", index, opcode)?,
                        Op::Hold => write!(out, "  {} hold", index)?,
                    }
                    for param in entry.params.iter() {
                        write!(out, " {}", param)?;
                    }
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    fn checked_channel(&self, channel: Option<i32>) -> Result<Channel, SequenceError> {
        let channel = channel
            .and_then(|raw| usize::try_from(raw).ok())
            .ok_or(SequenceError::InvalidChannel)?;
        if channel < self.slots.len() {
            Ok(channel)
        } else {
            Err(SequenceError::InvalidChannel)
        }
    }
}
