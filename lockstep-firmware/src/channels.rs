//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

/// Capacity of a single reply, sized for an echo dump plus status token.
/// Dumps longer than this are truncated before they reach the wire.
pub const RESPONSE_LEN: usize = 1024;

/// Channel capacity for outbound replies
const RESPONSE_CHANNEL_SIZE: usize = 4;

/// One reply line (or echo dump) queued for the host TX task
pub type Response = String<RESPONSE_LEN>;

/// Replies from line processing to the host TX task
pub static RESPONSES: Channel<CriticalSectionRawMutex, Response, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
