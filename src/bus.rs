//! The 16-bit address bus.
//!
//! The bus owns every attached memory component and maps the CPU's flat
//! 16-bit address space onto them. Attaching 16 KiB of ROM at `0xC000`
//! makes it answer for `0xC000-0xFFFF`; the component's own size determines
//! the end of the window.

use std::error::Error;
use std::fmt;

use log::debug;

use crate::memory::{Memory, MemoryError};

/// A fatal bus access failure.
///
/// Both variants are integrator errors (a bad memory map or a runaway
/// program), so the bus reports them with the global address and leaves
/// recovery to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// No component is attached at the address.
    UnmappedAddress {
        /// The global address of the failed access.
        addr: u16,
    },
    /// The component at the address rejects writes.
    ReadOnly {
        /// The global address of the failed write.
        addr: u16,
    },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::UnmappedAddress { addr } => {
                write!(f, "no addressable memory at 0x{addr:04X}")
            }
            BusError::ReadOnly { addr } => {
                write!(f, "write to read-only memory at 0x{addr:04X}")
            }
        }
    }
}

impl Error for BusError {}

/// One attached component and the half-open window it answers for,
/// stored as an inclusive `[start, end]` pair so windows ending at
/// `0xFFFF` need no special casing.
struct Attachment {
    memory: Box<dyn Memory>,
    start: u16,
    end: u16,
}

impl Attachment {
    fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }
}

/// Routes 8- and 16-bit accesses to the attached memory components.
///
/// Words are little-endian and are moved as two independent byte
/// transactions, so a word may straddle two components.
///
/// ```rust
/// use sim6502::{AddressBus, Ram};
///
/// let mut bus = AddressBus::new();
/// bus.attach(Box::new(Ram::new(0x8000)), 0x0000);
///
/// bus.write_word(0x1000, 0xABCD).unwrap();
/// assert_eq!(bus.read_byte(0x1000).unwrap(), 0xCD);
/// assert_eq!(bus.read_byte(0x1001).unwrap(), 0xAB);
/// ```
pub struct AddressBus {
    attachments: Vec<Attachment>,
}

impl AddressBus {
    /// Creates an empty bus. Every access fails until something is attached.
    pub fn new() -> Self {
        AddressBus {
            attachments: Vec::new(),
        }
    }

    /// Attaches `memory` so that it answers for
    /// `[offset, offset + memory.size() - 1]`.
    ///
    /// The integrator is responsible for keeping windows disjoint; if two
    /// windows overlap, the component attached first services the access.
    pub fn attach(&mut self, memory: Box<dyn Memory>, offset: u16) {
        let start = offset;
        let end = offset.wrapping_add(memory.size()).wrapping_sub(1);
        debug!("bus: attaching {} bytes at 0x{start:04X}-0x{end:04X}", memory.size());

        self.attachments.push(Attachment { memory, start, end });
    }

    /// Reads the byte at `addr`.
    pub fn read_byte(&mut self, addr: u16) -> Result<u8, BusError> {
        let attachment = self.attachment_for(addr)?;
        let local = addr - attachment.start;
        Ok(attachment.memory.read(local))
    }

    /// Writes `value` at `addr`.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        let attachment = self.attachment_for(addr)?;
        let local = addr - attachment.start;
        attachment.memory.write(local, value).map_err(|e| match e {
            MemoryError::ReadOnly => BusError::ReadOnly { addr },
        })
    }

    /// Reads the little-endian word at `addr`: low byte at `addr`, high byte
    /// at `addr + 1` (wrapping around the top of the address space).
    pub fn read_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read_byte(addr)? as u16;
        let hi = self.read_byte(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Writes the little-endian word `value`: low byte to `addr`, high byte
    /// to `addr + 1` (wrapping around the top of the address space).
    pub fn write_word(&mut self, addr: u16, value: u16) -> Result<(), BusError> {
        self.write_byte(addr, value as u8)?;
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8)
    }

    /// True while any attached component reports a pending interrupt.
    ///
    /// The IRQ line is level-sensitive and shared: it stays asserted until
    /// every source has been acknowledged through its own registers.
    pub fn irq_active(&self) -> bool {
        self.attachments
            .iter()
            .filter_map(|a| a.memory.as_interrupt_source())
            .any(|source| source.irq_pending())
    }

    /// Borrows the concrete component whose window contains `addr`.
    ///
    /// Returns `None` if nothing is attached there or the component is not a
    /// `T`. This is how a host reaches a peripheral's own API (for example
    /// the ACIA's host-side queue) after attaching it.
    pub fn device_at<T: Memory + 'static>(&self, addr: u16) -> Option<&T> {
        self.attachments
            .iter()
            .find(|a| a.contains(addr))
            .and_then(|a| a.memory.as_any().downcast_ref::<T>())
    }

    /// Mutable counterpart of [`AddressBus::device_at`].
    pub fn device_at_mut<T: Memory + 'static>(&mut self, addr: u16) -> Option<&mut T> {
        self.attachments
            .iter_mut()
            .find(|a| a.contains(addr))
            .and_then(|a| a.memory.as_any_mut().downcast_mut::<T>())
    }

    fn attachment_for(&mut self, addr: u16) -> Result<&mut Attachment, BusError> {
        self.attachments
            .iter_mut()
            .find(|a| a.contains(addr))
            .ok_or(BusError::UnmappedAddress { addr })
    }
}

impl Default for AddressBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AddressBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address bus:")?;
        for a in &self.attachments {
            writeln!(f, "\t0x{:04X}-0x{:04X}", a.start, a.end)?;
        }
        Ok(())
    }
}
