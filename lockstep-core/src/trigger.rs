//! Trigger edge gating.
//!
//! Decides which physical transitions of the trigger line advance the run.
//! A fresh run starts on a falling edge only; after that every transition
//! counts, because the line level at a given step depends on the parity of
//! the pulses the host has sent, which cannot be predicted here.

/// A transition of the external trigger line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Which edges currently advance the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeSensitivity {
    /// All edges ignored
    Disarmed,
    /// Waiting for the falling edge that starts the run
    FirstFalling,
    /// Mid-run: every transition is one step
    AnyChange,
}

/// Gate between raw trigger edges and run advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerController {
    sensitivity: EdgeSensitivity,
}

impl Default for TriggerController {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerController {
    /// Create a disarmed gate
    pub fn new() -> Self {
        Self {
            sensitivity: EdgeSensitivity::Disarmed,
        }
    }

    /// Wait for the first falling edge of a fresh run
    pub fn arm(&mut self) {
        self.sensitivity = EdgeSensitivity::FirstFalling;
    }

    /// Ignore edges until the next arm
    pub fn disarm(&mut self) {
        self.sensitivity = EdgeSensitivity::Disarmed;
    }

    pub fn sensitivity(&self) -> EdgeSensitivity {
        self.sensitivity
    }

    /// Report an edge; returns whether the run advances one step
    pub fn on_edge(&mut self, edge: Edge) -> bool {
        match (self.sensitivity, edge) {
            (EdgeSensitivity::Disarmed, _) => false,
            (EdgeSensitivity::FirstFalling, Edge::Rising) => false,
            (EdgeSensitivity::FirstFalling, Edge::Falling) => {
                self.sensitivity = EdgeSensitivity::AnyChange;
                true
            }
            (EdgeSensitivity::AnyChange, _) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_ignores_everything() {
        let mut gate = TriggerController::new();
        assert!(!gate.on_edge(Edge::Falling));
        assert!(!gate.on_edge(Edge::Rising));
        assert_eq!(gate.sensitivity(), EdgeSensitivity::Disarmed);
    }

    #[test]
    fn test_rising_before_first_falling_is_ignored() {
        let mut gate = TriggerController::new();
        gate.arm();

        assert!(!gate.on_edge(Edge::Rising));
        assert_eq!(gate.sensitivity(), EdgeSensitivity::FirstFalling);
    }

    #[test]
    fn test_first_falling_fires_and_widens() {
        let mut gate = TriggerController::new();
        gate.arm();

        assert!(gate.on_edge(Edge::Falling));
        assert_eq!(gate.sensitivity(), EdgeSensitivity::AnyChange);

        // From here every transition is a step
        assert!(gate.on_edge(Edge::Rising));
        assert!(gate.on_edge(Edge::Falling));
    }

    #[test]
    fn test_rearm_narrows_back_to_falling() {
        let mut gate = TriggerController::new();
        gate.arm();
        assert!(gate.on_edge(Edge::Falling));
        assert!(gate.on_edge(Edge::Rising));

        gate.arm();
        assert!(!gate.on_edge(Edge::Rising));
        assert!(gate.on_edge(Edge::Falling));
    }

    #[test]
    fn test_disarm_mid_run() {
        let mut gate = TriggerController::new();
        gate.arm();
        assert!(gate.on_edge(Edge::Falling));

        gate.disarm();
        assert!(!gate.on_edge(Edge::Rising));
        assert!(!gate.on_edge(Edge::Falling));
    }
}
