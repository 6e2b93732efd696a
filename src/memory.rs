//! The memory component capability.
//!
//! Anything implementing [`Memory`] can be attached to the
//! [`AddressBus`](crate::AddressBus) and becomes visible to the CPU. A
//! component only ever sees offsets relative to its own base: the bus
//! performs the global-to-local translation, so the same ROM image works at
//! `0xC000` as at `0xE000`.

use std::any::Any;
use std::error::Error;
use std::fmt;

/// Error raised by a component that rejects a write.
///
/// The bus converts this into a [`BusError`](crate::BusError) carrying the
/// global address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// The component is read-only.
    ReadOnly,
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::ReadOnly => write!(f, "write to read-only memory"),
        }
    }
}

impl Error for MemoryError {}

/// A memory-mapped component: RAM, ROM or a peripheral.
///
/// `read` takes `&mut self` because peripheral reads have side effects
/// (reading the ACIA data register clears its receive-full flag). Reads
/// always succeed; writes fail only for read-only components.
///
/// The bus guarantees `offset < size()` on every call.
pub trait Memory {
    /// Length of the component's address window in bytes.
    fn size(&self) -> u16;

    /// Reads the byte at `offset`. Peripherals may update internal state.
    fn read(&mut self, offset: u16) -> u8;

    /// Stores `value` at `offset`, or fails for read-only components.
    fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryError>;

    /// Downcast support, so integrators can reach a concrete component
    /// behind an attachment (see [`AddressBus::device_at`]).
    ///
    /// [`AddressBus::device_at`]: crate::AddressBus::device_at
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Memory::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The component's view onto the shared IRQ line, if it has one.
    ///
    /// Interrupt-capable peripherals override this to return `Some(self)`;
    /// plain memory keeps the default.
    fn as_interrupt_source(&self) -> Option<&dyn InterruptSource> {
        None
    }
}

/// A component that can pull the shared, level-sensitive IRQ line low.
///
/// The line stays asserted for as long as any source reports a pending
/// interrupt; the CPU samples it through
/// [`AddressBus::irq_active`](crate::AddressBus::irq_active) before each
/// instruction.
pub trait InterruptSource {
    /// True while this component wants service.
    fn irq_pending(&self) -> bool;
}
