//! The canonical machine: 32 KiB RAM, an ACIA 6551 and 16 KiB ROM.
//!
//! | Window          | Component |
//! |-----------------|-----------|
//! | `0x0000-0x7FFF` | RAM       |
//! | `0x8800-0x8803` | ACIA 6551 |
//! | `0xC000-0xFFFF` | ROM       |
//!
//! The ROM occupies the top of the address space so it provides the reset
//! and IRQ vectors. The host drives the serial channel from its side of the
//! ACIA through [`Machine::serial_write`] and [`Machine::serial_read`];
//! wrapping those in a terminal, socket or anything else is the host's
//! business.

use std::error::Error;
use std::fmt;

use crate::bus::AddressBus;
use crate::cpu::{Cpu, CpuError};
use crate::devices::{Acia6551, Ram, Rom};

/// Base address of RAM.
pub const RAM_BASE: u16 = 0x0000;
/// RAM size in bytes.
pub const RAM_SIZE: u16 = 0x8000;
/// Base address of the ACIA's four registers.
pub const ACIA_BASE: u16 = 0x8800;
/// Base address of ROM.
pub const ROM_BASE: u16 = 0xC000;
/// Required ROM image size in bytes.
pub const ROM_SIZE: usize = 0x4000;

/// A failure to assemble or run the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    /// The ROM image does not fill its 16 KiB window. Anything smaller
    /// would leave the vectors at `0xFFFC-0xFFFF` unmapped.
    RomSize {
        /// Bytes supplied.
        actual: usize,
    },
    /// The CPU reported a fatal error.
    Cpu(CpuError),
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::RomSize { actual } => {
                write!(f, "ROM image must be {ROM_SIZE} bytes, got {actual}")
            }
            MachineError::Cpu(e) => e.fmt(f),
        }
    }
}

impl Error for MachineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MachineError::Cpu(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CpuError> for MachineError {
    fn from(e: CpuError) -> Self {
        MachineError::Cpu(e)
    }
}

/// A complete small computer: CPU, bus, RAM, ROM and serial port.
pub struct Machine {
    cpu: Cpu,
}

impl Machine {
    /// Builds the machine around `rom` and resets the CPU, which loads PC
    /// from the image's reset vector.
    pub fn new(rom: Vec<u8>) -> Result<Self, MachineError> {
        if rom.len() != ROM_SIZE {
            return Err(MachineError::RomSize { actual: rom.len() });
        }

        let mut bus = AddressBus::new();
        bus.attach(Box::new(Ram::new(RAM_SIZE)), RAM_BASE);
        bus.attach(Box::new(Acia6551::new()), ACIA_BASE);
        bus.attach(Box::new(Rom::new(rom)), ROM_BASE);

        let mut cpu = Cpu::new(bus);
        cpu.reset()?;

        Ok(Machine { cpu })
    }

    /// Resets the CPU; memory and the ACIA keep their state, as on the
    /// real board.
    pub fn reset(&mut self) -> Result<(), MachineError> {
        self.cpu.reset()?;
        Ok(())
    }

    /// Executes one instruction (or services a pending device interrupt).
    pub fn step(&mut self) -> Result<(), MachineError> {
        self.cpu.step()?;
        Ok(())
    }

    /// Executes `count` instructions.
    pub fn steps(&mut self, count: usize) -> Result<(), MachineError> {
        self.cpu.steps(count)?;
        Ok(())
    }

    /// Host side of the serial line: deliver a byte to the machine.
    pub fn serial_write(&mut self, byte: u8) {
        if let Some(acia) = self.cpu.bus_mut().device_at_mut::<Acia6551>(ACIA_BASE) {
            acia.push_rx(byte);
        }
    }

    /// Host side of the serial line: take the next outgoing byte, if the
    /// machine has transmitted one.
    pub fn serial_read(&mut self) -> Option<u8> {
        let acia = self.cpu.bus_mut().device_at_mut::<Acia6551>(ACIA_BASE)?;

        if acia.has_tx() {
            Some(acia.pop_tx())
        } else {
            None
        }
    }

    /// The CPU, for state inspection.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU access, e.g. to seed RAM or load a test program.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }
}
