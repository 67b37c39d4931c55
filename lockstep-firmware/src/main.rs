//! Lockstep - Edge-Triggered Instruction Sequencer
//!
//! Main firmware binary for RP2040-based boards. A host programs per-device
//! instruction lists over UART, then an external trigger line steps every
//! device through its list, one instruction per edge.
//!
//! Named for the way registered devices advance: all on the same line,
//! never one ahead of another, however irregular the trigger edges arrive.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lockstep_core::sequencer::Sequencer;

use crate::targets::{GpioBankTarget, PwmLevelTarget, OP_GPIO_WRITE, OP_PWM_LEVEL, OP_PWM_TOP};

mod channels;
mod targets;
mod tasks;

/// Sequencer shared between the host RX task and the trigger task
pub type SharedSequencer = Mutex<CriticalSectionRawMutex, Sequencer<'static>>;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Static cells for the demo targets and the engine (must live forever
// for task references)
static PWM_TARGET: StaticCell<PwmLevelTarget> = StaticCell::new();
static GPIO_TARGET: StaticCell<GpioBankTarget> = StaticCell::new();
static SEQUENCER: StaticCell<SharedSequencer> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lockstep firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART for host communication
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    // Demo device 0: PWM level output on GPIO16
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, Default::default());
    let pwm_target = PWM_TARGET.init(PwmLevelTarget::new(pwm));

    // Demo device 1: four digital lines on GPIO18-21
    let lines = [
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::Low),
    ];
    let gpio_target = GPIO_TARGET.init(GpioBankTarget::new(lines));

    // Register devices and their command vocabulary. Registration order
    // fixes the channel numbers the host uses.
    let mut sequencer = Sequencer::new();
    let pwm_ch = sequencer.register_device(pwm_target).unwrap();
    let gpio_ch = sequencer.register_device(gpio_target).unwrap();
    sequencer.register_command("l", pwm_ch, OP_PWM_LEVEL, 1).unwrap();
    sequencer.register_command("t", pwm_ch, OP_PWM_TOP, 1).unwrap();
    sequencer.register_command("d", gpio_ch, OP_GPIO_WRITE, 1).unwrap();
    info!("Registered {} devices", sequencer.device_count());

    let sequencer = SEQUENCER.init(Mutex::new(sequencer));

    // Trigger input, pulled up so the first run edge is falling
    let trigger_pin = Input::new(p.PIN_22, Pull::Up);
    info!("Trigger input initialized");

    // Spawn tasks
    spawner.spawn(tasks::host_rx_task(rx, sequencer)).unwrap();
    spawner.spawn(tasks::host_tx_task(tx)).unwrap();
    spawner.spawn(tasks::trigger_task(trigger_pin, sequencer)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Heartbeat: {} trigger edges seen",
            tasks::trigger::EDGES_SEEN.load(Ordering::Relaxed)
        );
    }
}
