//! Short-command registry.
//!
//! Maps a (command name, channel) pair to the opcode and arity the
//! sequencer programs with. Built once during setup; read-only afterwards.

use heapless::{String, Vec};

use crate::error::SequenceError;
use crate::types::{Channel, Opcode, MAX_COMMANDS, MAX_COMMAND_LEN, MAX_PARAMS};

/// One registered command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandBinding {
    /// Name matched against the first token of a program line
    pub name: String<MAX_COMMAND_LEN>,
    /// Device slot the command programs
    pub channel: Channel,
    /// Target action the command maps to
    pub opcode: Opcode,
    /// Number of integer parameters the command consumes
    pub arity: usize,
}

/// Append-only command table
///
/// Duplicate registrations are allowed; lookup scans front to back, so the
/// earliest registration wins.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    entries: Vec<CommandBinding, MAX_COMMANDS>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a command name for a channel
    ///
    /// Names longer than [`MAX_COMMAND_LEN`] are truncated. The channel is
    /// not validated here; the sequencer checks it against registered slots.
    pub fn register(
        &mut self,
        name: &str,
        channel: Channel,
        opcode: Opcode,
        arity: usize,
    ) -> Result<(), SequenceError> {
        if arity > MAX_PARAMS {
            return Err(SequenceError::ArityTooLarge);
        }

        let mut stored = String::new();
        for ch in name.chars() {
            if stored.push(ch).is_err() {
                break;
            }
        }

        self.entries
            .push(CommandBinding {
                name: stored,
                channel,
                opcode,
                arity,
            })
            .map_err(|_| SequenceError::RegistryFull)
    }

    /// Find the first binding matching a command token on a channel
    pub fn lookup(&self, name: &str, channel: Channel) -> Option<&CommandBinding> {
        self.entries
            .iter()
            .find(|binding| binding.channel == channel && name_matches(&binding.name, name))
    }
}

/// Compare a stored name against a wire token
///
/// The query truncates to [`MAX_COMMAND_LEN`] before comparing, mirroring
/// registration, so an over-long name still matches what was stored for it.
fn name_matches(stored: &str, query: &str) -> bool {
    let query = query.as_bytes();
    let query = &query[..query.len().min(MAX_COMMAND_LEN)];
    stored.as_bytes() == query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register("v", 0, 7, 2).unwrap();

        let binding = registry.lookup("v", 0).unwrap();
        assert_eq!(binding.opcode, 7);
        assert_eq!(binding.arity, 2);
    }

    #[test]
    fn test_lookup_scopes_by_channel() {
        let mut registry = CommandRegistry::new();
        registry.register("v", 0, 1, 1).unwrap();
        registry.register("v", 1, 2, 1).unwrap();

        assert_eq!(registry.lookup("v", 0).unwrap().opcode, 1);
        assert_eq!(registry.lookup("v", 1).unwrap().opcode, 2);
        assert!(registry.lookup("v", 2).is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = CommandRegistry::new();
        registry.register("f", 0, 1, 1).unwrap();
        registry.register("f", 0, 9, 1).unwrap();

        assert_eq!(registry.lookup("f", 0).unwrap().opcode, 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut registry = CommandRegistry::new();
        registry.register("v", 0, 1, 1).unwrap();
        assert!(registry.lookup("w", 0).is_none());
    }

    #[test]
    fn test_long_name_truncates_consistently() {
        let mut registry = CommandRegistry::new();
        registry.register("frequency", 0, 4, 1).unwrap();

        // Stored truncated, and the same over-long token still matches
        assert_eq!(registry.lookup("frequency", 0).unwrap().opcode, 4);
        assert_eq!(registry.lookup("frequenc", 0).unwrap().opcode, 4);
        assert!(registry.lookup("freq", 0).is_none());
    }

    #[test]
    fn test_arity_above_param_block() {
        let mut registry = CommandRegistry::new();
        let result = registry.register("big", 0, 0, MAX_PARAMS + 1);
        assert_eq!(result, Err(SequenceError::ArityTooLarge));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_capacity() {
        let mut registry = CommandRegistry::new();
        for i in 0..MAX_COMMANDS {
            registry.register("c", 0, i as Opcode, 0).unwrap();
        }

        let overflow = registry.register("c", 0, 0, 0);
        assert_eq!(overflow, Err(SequenceError::RegistryFull));
        assert_eq!(registry.len(), MAX_COMMANDS);
    }
}
