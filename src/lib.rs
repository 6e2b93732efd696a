//! # sim6502
//!
//! An instruction-level emulator of a small MOS 6502 computer.
//!
//! The crate models the machine the way the hardware is wired: memory
//! components (RAM, ROM, peripherals) implement the [`Memory`] trait and are
//! attached to a 16-bit [`AddressBus`] at fixed offsets. The [`Cpu`] reads and
//! writes exclusively through the bus, one instruction per [`Cpu::step`].
//! A [`Machine`] bundles the canonical layout: 32 KiB RAM, an ACIA 6551
//! serial device at `0x8800` and 16 KiB ROM at `0xC000`.
//!
//! ## Quick start
//!
//! ```rust
//! use sim6502::{AddressBus, Cpu, Ram};
//!
//! let mut bus = AddressBus::new();
//! bus.attach(Box::new(Ram::new(0x8000)), 0x0000);
//!
//! let mut cpu = Cpu::new(bus);
//! cpu.load_program(&[0xA9, 0x42], 0x0300).unwrap(); // LDA #$42
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.pc(), 0x0302);
//! ```
//!
//! ## Error model
//!
//! Accessing an address with no attached component, writing to ROM, and
//! fetching an opcode outside the 151 documented NMOS 6502 instructions are
//! integrator errors, not runtime conditions. They surface as [`BusError`] /
//! [`CpuError`] values carrying the offending address, opcode and program
//! counter; the core never tries to recover from them.

pub mod addressing;
pub mod bus;
pub mod cpu;
pub mod devices;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod status;

mod instructions;

pub use addressing::AddressingMode;
pub use bus::{AddressBus, BusError};
pub use cpu::{Cpu, CpuError, IRQ_VECTOR, RESET_VECTOR, STACK_BASE};
pub use devices::{Acia6551, Ram, Rom};
pub use machine::{Machine, MachineError};
pub use memory::{InterruptSource, Memory, MemoryError};
pub use opcodes::{Instruction, Mnemonic, OpcodeInfo, OPCODE_TABLE};
pub use status::Status;
