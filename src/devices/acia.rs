//! ACIA 6551 serial interface adapter.
//!
//! The ACIA bridges the emulated machine to an external byte stream. It is a
//! four-byte component; from the CPU's side the registers are, in order:
//!
//! | Offset | Register | Read                      | Write                    |
//! |--------|----------|---------------------------|--------------------------|
//! | 0      | data     | RX latch, clears RX-full  | TX latch, clears TX-empty|
//! | 1      | status   | RX/TX/overrun flags       | full device reset        |
//! | 2      | command  | latched byte              | latch + IRQ enables      |
//! | 3      | control  | latched byte              | latch (baud bits unused) |
//!
//! The host side of the channel uses [`Acia6551::push_rx`] to deliver
//! incoming bytes and [`Acia6551::pop_tx`] to drain outgoing ones. Both
//! latches are a single byte deep, exactly like the chip: delivering a byte
//! before the CPU read the previous one raises the overrun flag.

use std::any::Any;

use log::trace;

use crate::memory::{InterruptSource, Memory, MemoryError};

const REG_DATA: u16 = 0;
const REG_STATUS: u16 = 1;
const REG_COMMAND: u16 = 2;
const REG_CONTROL: u16 = 3;

/// Status register bits.
const STATUS_OVERRUN: u8 = 0x04;
const STATUS_RX_FULL: u8 = 0x08;
const STATUS_TX_EMPTY: u8 = 0x10;

/// The 6551-compatible serial device.
///
/// ```rust
/// use sim6502::{Acia6551, Memory};
///
/// let mut acia = Acia6551::new();
///
/// // Host delivers a byte; the CPU sees RX-full and reads it.
/// acia.push_rx(0xAB);
/// assert_eq!(acia.read(1) & 0x08, 0x08);
/// assert_eq!(acia.read(0), 0xAB);
/// assert_eq!(acia.read(1) & 0x08, 0x00);
/// ```
pub struct Acia6551 {
    rx: u8,
    tx: u8,
    command: u8,
    control: u8,

    rx_full: bool,
    tx_empty: bool,
    overrun: bool,

    rx_irq_enabled: bool,
    tx_irq_enabled: bool,
}

impl Acia6551 {
    /// Creates a freshly reset device: both latches empty, no IRQs enabled.
    pub fn new() -> Self {
        Acia6551 {
            rx: 0,
            tx: 0,
            command: 0,
            control: 0,
            rx_full: false,
            tx_empty: true,
            overrun: false,
            rx_irq_enabled: false,
            tx_irq_enabled: false,
        }
    }

    /// Programmatic reset, identical to a CPU write to the status register.
    pub fn reset(&mut self) {
        *self = Acia6551::new();
    }

    /// Host side: deliver `data` to the receive latch.
    ///
    /// If the CPU has not yet read the previous byte the overrun flag is
    /// raised and the old byte is lost.
    pub fn push_rx(&mut self, data: u8) {
        if self.rx_full {
            self.overrun = true;
        }

        self.rx = data;
        self.rx_full = true;
    }

    /// Host side: drain the transmit latch.
    ///
    /// Only meaningful while [`Acia6551::has_tx`] is true; the latch keeps
    /// its last value after draining.
    pub fn pop_tx(&mut self) -> u8 {
        self.tx_empty = true;
        self.tx
    }

    /// True while the transmit latch holds a byte the host has not drained.
    pub fn has_tx(&self) -> bool {
        !self.tx_empty
    }

    /// True while the receive latch holds a byte the CPU has not read.
    pub fn has_rx(&self) -> bool {
        self.rx_full
    }

    fn rx_read(&mut self) -> u8 {
        self.rx_full = false;
        self.overrun = false;
        self.rx
    }

    fn tx_write(&mut self, value: u8) {
        self.tx = value;
        self.tx_empty = false;
    }

    fn status_register(&self) -> u8 {
        let mut status = 0;

        if self.rx_full {
            status |= STATUS_RX_FULL;
        }
        if self.tx_empty {
            status |= STATUS_TX_EMPTY;
        }
        if self.overrun {
            status |= STATUS_OVERRUN;
        }

        status
    }

    fn set_command_register(&mut self, value: u8) {
        trace!("acia: command register <- 0x{value:02X}");
        self.command = value;

        // Bit 1 enables the receiver interrupt. Bits 3:2 select the
        // transmitter mode; only the 0b01 combination interrupts.
        self.rx_irq_enabled = value & 0x02 != 0;
        self.tx_irq_enabled = value & 0x04 != 0 && value & 0x08 == 0;
    }

    fn set_control_register(&mut self, value: u8) {
        trace!("acia: control register <- 0x{value:02X}");
        // Baud rate, word length and stop bits are latched for readback but
        // have no timing effect in this emulator.
        self.control = value;
    }
}

impl Default for Acia6551 {
    fn default() -> Self {
        Acia6551::new()
    }
}

impl Memory for Acia6551 {
    fn size(&self) -> u16 {
        4
    }

    fn read(&mut self, offset: u16) -> u8 {
        match offset {
            REG_DATA => self.rx_read(),
            REG_STATUS => self.status_register(),
            REG_COMMAND => self.command,
            REG_CONTROL => self.control,
            _ => 0,
        }
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryError> {
        match offset {
            REG_DATA => self.tx_write(value),
            REG_STATUS => self.reset(),
            REG_COMMAND => self.set_command_register(value),
            REG_CONTROL => self.set_control_register(value),
            _ => {}
        }

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_interrupt_source(&self) -> Option<&dyn InterruptSource> {
        Some(self)
    }
}

impl InterruptSource for Acia6551 {
    /// The IRQ line is level-sensitive: it stays asserted while an enabled
    /// condition holds, and deasserts when the CPU consumes it (data read
    /// for RX-full, data write for TX-empty).
    fn irq_pending(&self) -> bool {
        (self.rx_irq_enabled && self.rx_full) || (self.tx_irq_enabled && self.tx_empty)
    }
}
