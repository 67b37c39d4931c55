//! Shared handles and capacity limits.
//!
//! Every container in the engine is fixed capacity; nothing allocates.

/// Maximum instructions per device table
pub const MAX_LINES: usize = 512;

/// Maximum registered device slots
pub const MAX_CHANNELS: usize = 6;

/// Maximum integer parameters per instruction
pub const MAX_PARAMS: usize = 8;

/// Maximum registered short commands
pub const MAX_COMMANDS: usize = 32;

/// Maximum short-command name length in bytes
///
/// Longer names are truncated at registration, and lookup truncates the
/// queried token the same way, so an over-long name still matches itself.
pub const MAX_COMMAND_LEN: usize = 8;

/// Index of a registered device slot, assigned 0-based in registration order
pub type Channel = usize;

/// Handle naming one of a target's actions, assigned at command registration
pub type Opcode = u8;

/// Fixed-size parameter block
///
/// Entries past a command's declared arity are always zero.
pub type ParamList = [i32; MAX_PARAMS];
