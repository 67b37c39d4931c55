//! Demo instruction targets
//!
//! Two stand-ins for the lab hardware a real deployment would register: a
//! PWM level output and a small bank of digital lines. Device semantics
//! live entirely here; the engine only routes opcodes and parameters.
//!
//! `apply` runs on the trigger edge path, so neither target blocks or logs.

use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use lockstep_core::target::InstructionTarget;
use lockstep_core::types::{Opcode, ParamList};

/// Set the PWM compare level (one parameter: level, 0..=top)
pub const OP_PWM_LEVEL: Opcode = 0;

/// Set the PWM carrier top (one parameter: top, 1..=65535)
pub const OP_PWM_TOP: Opcode = 1;

/// Write the GPIO bank (one parameter: bit mask, bit 0 = first line)
pub const OP_GPIO_WRITE: Opcode = 0;

/// Number of lines in the demo GPIO bank
pub const GPIO_BANK_WIDTH: usize = 4;

/// PWM output stepped by `l <level>` and `t <top>` program lines
pub struct PwmLevelTarget {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmLevelTarget {
    /// Default carrier top (125MHz / 1000 = 125kHz base)
    pub const DEFAULT_TOP: u16 = 1000;

    /// Create the target and park the output at level 0
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.top = Self::DEFAULT_TOP;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl InstructionTarget for PwmLevelTarget {
    fn apply(&mut self, opcode: Opcode, params: &ParamList) {
        match opcode {
            OP_PWM_LEVEL => {
                self.config.compare_a = params[0].clamp(0, self.config.top as i32) as u16;
            }
            OP_PWM_TOP => {
                self.config.top = params[0].clamp(1, u16::MAX as i32) as u16;
                // Keep the level inside the new carrier period
                if self.config.compare_a > self.config.top {
                    self.config.compare_a = self.config.top;
                }
            }
            _ => return,
        }
        self.pwm.set_config(&self.config);
    }

    // hold: default no-op, the slice keeps its last compare value
}

/// Bank of digital lines stepped by `d <mask>` program lines
pub struct GpioBankTarget {
    lines: [Output<'static>; GPIO_BANK_WIDTH],
}

impl GpioBankTarget {
    pub fn new(lines: [Output<'static>; GPIO_BANK_WIDTH]) -> Self {
        Self { lines }
    }
}

impl InstructionTarget for GpioBankTarget {
    fn apply(&mut self, _opcode: Opcode, params: &ParamList) {
        let mask = params[0];
        for (bit, line) in self.lines.iter_mut().enumerate() {
            if mask & (1 << bit) != 0 {
                line.set_high();
            } else {
                line.set_low();
            }
        }
    }
}
