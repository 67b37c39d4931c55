//! Trigger input task
//!
//! Forwards edges of the external trigger line to the sequencer. The gate
//! logic (first falling edge, then any change) lives in the engine; this
//! task only classifies the transition it just saw.

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::{AtomicU32, Ordering};

use lockstep_core::trigger::Edge;

use crate::SharedSequencer;

/// Trigger edges seen since boot, reported by the heartbeat log line
pub static EDGES_SEEN: AtomicU32 = AtomicU32::new(0);

/// Trigger task - advances the run on external edges
#[embassy_executor::task]
pub async fn trigger_task(mut pin: Input<'static>, sequencer: &'static SharedSequencer) {
    info!("Trigger task started");

    loop {
        pin.wait_for_any_edge().await;
        let edge = if pin.is_low() {
            Edge::Falling
        } else {
            Edge::Rising
        };
        EDGES_SEEN.fetch_add(1, Ordering::Relaxed);

        let mut seq = sequencer.lock().await;
        if seq.on_trigger_edge(edge) {
            trace!("Edge {:?} -> next line {}", edge, seq.next_line());
        }
    }
}
