//! Error types for the sequencing engine.
//!
//! Every kind here is recoverable: it surfaces through the per-line status
//! token or the diagnostic dump and never aborts the engine. The worst case,
//! stepping past the end of a table, degrades to a no-op.

/// Errors raised while registering, programming, or executing a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Channel does not name a registered device slot
    InvalidChannel,
    /// No command registered under this name for the active channel
    UnknownCommand,
    /// Device tables have unequal lengths at arm time
    NonRectangularProgram,
    /// Execution index at or past the end of a device table
    LineOutOfRange,
    /// Program line received outside the programming phase
    NotProgramming,
    /// Device table already holds the maximum number of lines
    TableFull,
    /// Command registry already holds the maximum number of bindings
    RegistryFull,
    /// Declared arity exceeds the parameter block size
    ArityTooLarge,
    /// All device slots are taken
    SlotsFull,
}
