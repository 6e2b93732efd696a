//! The 6502 CPU core.
//!
//! The CPU owns the [`AddressBus`] and talks to the rest of the machine
//! exclusively through it. [`Cpu::step`] executes exactly one instruction:
//! fetch the opcode and operands, advance the program counter past the
//! instruction *before* executing (so branches and stack pushes see the
//! address of the next instruction), then apply the operation.
//!
//! Reset and maskable interrupts are external transitions: [`Cpu::reset`]
//! emulates the RESB pin, [`Cpu::interrupt`] the IRQB pin. In addition,
//! `step` samples the bus's level-sensitive IRQ line before each
//! instruction, so an attached peripheral with a pending interrupt is
//! serviced without host involvement.

use std::error::Error;
use std::fmt;

use log::trace;

use crate::addressing::AddressingMode;
use crate::bus::{AddressBus, BusError};
use crate::opcodes::{Instruction, Mnemonic, OPCODE_TABLE};
use crate::status::Status;

/// Bottom of the stack page; the stack occupies `0x0100 + SP`.
pub const STACK_BASE: u16 = 0x0100;
/// The word at this address is loaded into PC by [`Cpu::reset`].
pub const RESET_VECTOR: u16 = 0xFFFC;
/// The word at this address is loaded into PC on IRQ and BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// A fatal CPU execution failure.
///
/// All variants are integrator or program errors; the CPU does not attempt
/// recovery. The host may catch one, dump state and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The fetched byte has no entry in the opcode table.
    IllegalOpcode {
        /// The offending byte.
        opcode: u8,
        /// Where it was fetched from.
        pc: u16,
    },
    /// An instruction was decoded with an addressing mode it cannot use.
    /// This indicates a decode-table defect, not bad program data.
    UnsupportedAddressing {
        /// The instruction being executed.
        mnemonic: Mnemonic,
        /// The mode that has no meaning for it.
        mode: AddressingMode,
        /// Address of the instruction.
        pc: u16,
    },
    /// A bus access failed.
    Bus(BusError),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::IllegalOpcode { opcode, pc } => {
                write!(f, "illegal opcode 0x{opcode:02X} at 0x{pc:04X}")
            }
            CpuError::UnsupportedAddressing { mnemonic, mode, pc } => {
                write!(f, "{mnemonic} cannot use {mode} addressing (at 0x{pc:04X})")
            }
            CpuError::Bus(e) => e.fmt(f),
        }
    }
}

impl Error for CpuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CpuError::Bus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BusError> for CpuError {
    fn from(e: BusError) -> Self {
        CpuError::Bus(e)
    }
}

/// The MOS 6502 processor: registers, status flags and the address bus.
pub struct Cpu {
    /// Accumulator.
    pub(crate) a: u8,
    /// Index register X.
    pub(crate) x: u8,
    /// Index register Y.
    pub(crate) y: u8,
    /// Program counter; always the address of the next byte to fetch.
    pub(crate) pc: u16,
    /// Stack pointer into the stack page.
    pub(crate) sp: u8,
    /// Status register.
    pub(crate) p: Status,
    /// Clock cycles consumed so far (base counts, no page-cross penalties).
    pub(crate) cycles: u64,

    pub(crate) bus: AddressBus,
}

impl Cpu {
    /// Creates a CPU on `bus`.
    ///
    /// Registers start zeroed with SP at `0xFF`; nothing is fetched until
    /// [`Cpu::reset`] or [`Cpu::load_program`] establishes a program
    /// counter.
    pub fn new(bus: AddressBus) -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFF,
            p: Status::RESET,
            cycles: 0,
            bus,
        }
    }

    /// Emulates the RESB pin.
    ///
    /// Loads PC from the reset vector and forces P to `0x34`. The 6502
    /// makes no promises about A, X, Y and SP across reset; they are
    /// cleared (SP to `0xFF`) for reproducibility.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        self.pc = self.bus.read_word(RESET_VECTOR)?;
        self.p = Status::RESET;

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;

        Ok(())
    }

    /// Emulates the IRQB pin: a maskable interrupt request.
    ///
    /// Ignored while the I flag is set (the request is dropped, not
    /// latched). Otherwise the current PC and status are pushed (B clear in
    /// the pushed copy), I is set, and PC is loaded from the IRQ vector.
    pub fn interrupt(&mut self) -> Result<(), CpuError> {
        if self.p.contains(Status::IRQ_DISABLE) {
            return Ok(());
        }

        let pushed = (self.p | Status::UNUSED) - Status::BREAK;
        self.service_interrupt(self.pc, pushed)
    }

    /// Copies `data` onto the bus starting at `location` and points PC at
    /// its first byte. A convenience for tests and host tooling; a real
    /// machine boots from ROM through the reset vector.
    pub fn load_program(&mut self, data: &[u8], location: u16) -> Result<(), CpuError> {
        for (i, byte) in data.iter().enumerate() {
            self.bus.write_byte(location.wrapping_add(i as u16), *byte)?;
        }

        self.pc = location;
        Ok(())
    }

    /// Fetches, decodes and executes exactly one instruction.
    ///
    /// If the bus's IRQ line is asserted and interrupts are enabled, the
    /// step services the interrupt instead of executing an instruction.
    pub fn step(&mut self) -> Result<(), CpuError> {
        if !self.p.contains(Status::IRQ_DISABLE) && self.bus.irq_active() {
            let pushed = (self.p | Status::UNUSED) - Status::BREAK;
            return self.service_interrupt(self.pc, pushed);
        }

        let instruction = self.read_next_instruction()?;

        // PC moves past the instruction before it runs; branch offsets and
        // JSR/BRK return addresses are all relative to the advanced value.
        self.pc = self.pc.wrapping_add(instruction.info.size as u16);
        self.cycles += instruction.info.cycles as u64;

        trace!("{instruction}");

        self.execute(&instruction)
    }

    /// Runs `count` instructions.
    pub fn steps(&mut self, count: usize) -> Result<(), CpuError> {
        for _ in 0..count {
            self.step()?;
        }
        Ok(())
    }

    // ----- register and state accessors -----

    /// Accumulator.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Index register X.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Index register Y.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Stack pointer. The full stack address is `0x0100 + sp`.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Status register.
    pub fn p(&self) -> Status {
        self.p
    }

    /// Clock cycles consumed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sets the accumulator without touching flags (test scaffolding).
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets X without touching flags (test scaffolding).
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets Y without touching flags (test scaffolding).
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the status register wholesale.
    pub fn set_p(&mut self, value: Status) {
        self.p = value;
    }

    /// Sets or clears a single status flag.
    pub fn set_flag(&mut self, flag: Status, state: bool) {
        self.p.set(flag, state);
    }

    /// The address bus.
    pub fn bus(&self) -> &AddressBus {
        &self.bus
    }

    /// Mutable access to the address bus, e.g. to seed memory or reach an
    /// attached peripheral.
    pub fn bus_mut(&mut self) -> &mut AddressBus {
        &mut self.bus
    }

    // ----- stack -----

    /// Pushes a byte: write at `0x0100 + SP`, then decrement SP (wrapping).
    pub fn stack_push(&mut self, data: u8) -> Result<(), CpuError> {
        self.bus.write_byte(STACK_BASE + self.sp as u16, data)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Pops a byte: increment SP (wrapping), then read at `0x0100 + SP`.
    pub fn stack_pop(&mut self) -> Result<u8, CpuError> {
        self.sp = self.sp.wrapping_add(1);
        Ok(self.bus.read_byte(STACK_BASE + self.sp as u16)?)
    }

    /// Reads the byte on top of the stack without moving SP.
    pub fn stack_peek(&mut self) -> Result<u8, CpuError> {
        Ok(self
            .bus
            .read_byte(STACK_BASE + self.sp.wrapping_add(1) as u16)?)
    }

    // ----- fetch / decode / dispatch -----

    fn read_next_instruction(&mut self) -> Result<Instruction, CpuError> {
        let pc = self.pc;
        let opcode = self.bus.read_byte(pc)?;

        let info = OPCODE_TABLE[opcode as usize].ok_or(CpuError::IllegalOpcode { opcode, pc })?;

        let mut instruction = Instruction {
            info,
            opcode,
            op8: 0,
            op16: 0,
            address: pc,
        };

        match info.size {
            2 => instruction.op8 = self.bus.read_byte(pc.wrapping_add(1))?,
            3 => instruction.op16 = self.bus.read_word(pc.wrapping_add(1))?,
            _ => {}
        }

        Ok(instruction)
    }

    fn execute(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        match instruction.info.mnemonic {
            Mnemonic::Adc => self.adc(instruction),
            Mnemonic::And => self.and(instruction),
            Mnemonic::Asl => self.asl(instruction),
            Mnemonic::Bcc => self.bcc(instruction),
            Mnemonic::Bcs => self.bcs(instruction),
            Mnemonic::Beq => self.beq(instruction),
            Mnemonic::Bit => self.bit(instruction),
            Mnemonic::Bmi => self.bmi(instruction),
            Mnemonic::Bne => self.bne(instruction),
            Mnemonic::Bpl => self.bpl(instruction),
            Mnemonic::Brk => self.brk(),
            Mnemonic::Bvc => self.bvc(instruction),
            Mnemonic::Bvs => self.bvs(instruction),
            Mnemonic::Clc => self.clc(),
            Mnemonic::Cld => self.cld(),
            Mnemonic::Cli => self.cli(),
            Mnemonic::Clv => self.clv(),
            Mnemonic::Cmp => self.cmp(instruction),
            Mnemonic::Cpx => self.cpx(instruction),
            Mnemonic::Cpy => self.cpy(instruction),
            Mnemonic::Dec => self.dec(instruction),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),
            Mnemonic::Eor => self.eor(instruction),
            Mnemonic::Inc => self.inc(instruction),
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Jmp => self.jmp(instruction),
            Mnemonic::Jsr => self.jsr(instruction),
            Mnemonic::Lda => self.lda(instruction),
            Mnemonic::Ldx => self.ldx(instruction),
            Mnemonic::Ldy => self.ldy(instruction),
            Mnemonic::Lsr => self.lsr(instruction),
            Mnemonic::Nop => Ok(()),
            Mnemonic::Ora => self.ora(instruction),
            Mnemonic::Pha => self.pha(),
            Mnemonic::Php => self.php(),
            Mnemonic::Pla => self.pla(),
            Mnemonic::Plp => self.plp(),
            Mnemonic::Rol => self.rol(instruction),
            Mnemonic::Ror => self.ror(instruction),
            Mnemonic::Rti => self.rti(),
            Mnemonic::Rts => self.rts(),
            Mnemonic::Sbc => self.sbc(instruction),
            Mnemonic::Sec => self.sec(),
            Mnemonic::Sed => self.sed(),
            Mnemonic::Sei => self.sei(),
            Mnemonic::Sta => self.sta(instruction),
            Mnemonic::Stx => self.stx(instruction),
            Mnemonic::Sty => self.sty(instruction),
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Txs => self.txs(),
            Mnemonic::Tya => self.tya(),
        }
    }

    // ----- interrupt plumbing -----

    /// Pushes the return context and vectors through `0xFFFE`. `pushed` is
    /// the status byte as it should appear on the stack (B differs between
    /// BRK and hardware IRQ; the unused bit is always set).
    pub(crate) fn service_interrupt(
        &mut self,
        return_pc: u16,
        pushed: Status,
    ) -> Result<(), CpuError> {
        self.stack_push((return_pc >> 8) as u8)?;
        self.stack_push(return_pc as u8)?;
        self.stack_push(pushed.bits())?;

        self.p.insert(Status::IRQ_DISABLE);
        self.pc = self.bus.read_word(IRQ_VECTOR)?;

        Ok(())
    }

    // ----- operand resolution -----

    /// The effective byte operand for read-style instructions.
    pub(crate) fn resolve_operand(&mut self, instruction: &Instruction) -> Result<u8, CpuError> {
        match instruction.info.mode {
            AddressingMode::Immediate => Ok(instruction.op8),
            _ => {
                let address = self.memory_address(instruction)?;
                Ok(self.bus.read_byte(address)?)
            }
        }
    }

    /// The effective bus address for stores, read-modify-write and jumps.
    ///
    /// Zero-page indexing wraps within page zero (8-bit add); absolute
    /// indexing wraps around the 16-bit address space.
    pub(crate) fn memory_address(&mut self, instruction: &Instruction) -> Result<u16, CpuError> {
        let op8 = instruction.op8;
        let op16 = instruction.op16;

        match instruction.info.mode {
            AddressingMode::Absolute => Ok(op16),
            AddressingMode::AbsoluteX => Ok(op16.wrapping_add(self.x as u16)),
            AddressingMode::AbsoluteY => Ok(op16.wrapping_add(self.y as u16)),
            AddressingMode::Indirect => Ok(self.bus.read_word(op16)?),
            AddressingMode::IndirectX => {
                let pointer = op8.wrapping_add(self.x) as u16;
                Ok(self.bus.read_word(pointer)?)
            }
            AddressingMode::IndirectY => {
                let base = self.bus.read_word(op8 as u16)?;
                Ok(base.wrapping_add(self.y as u16))
            }
            AddressingMode::Zeropage => Ok(op8 as u16),
            AddressingMode::ZeropageX => Ok(op8.wrapping_add(self.x) as u16),
            AddressingMode::ZeropageY => Ok(op8.wrapping_add(self.y) as u16),
            mode => Err(CpuError::UnsupportedAddressing {
                mnemonic: instruction.info.mnemonic,
                mode,
                pc: instruction.address,
            }),
        }
    }

    // ----- flag helpers -----

    /// Sets Z and N from an ALU result byte.
    pub(crate) fn set_arithmetic_flags(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// The carry flag as 0 or 1, for arithmetic.
    pub(crate) fn carry_bit(&self) -> u8 {
        if self.p.contains(Status::CARRY) {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU PC:0x{:04X} A:0x{:02X} X:0x{:02X} Y:0x{:02X} SP:0x{:02X} P:{}",
            self.pc,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.p.flag_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Ram;

    fn ram_cpu() -> Cpu {
        let mut bus = AddressBus::new();
        bus.attach(Box::new(Ram::new(0x8000)), 0x0000);
        bus.attach(Box::new(Ram::new(0x8000)), 0x8000);
        let mut cpu = Cpu::new(bus);
        cpu.reset().unwrap();
        cpu
    }

    #[test]
    fn stack_push_pop_peek() {
        let mut cpu = ram_cpu();
        assert_eq!(cpu.sp(), 0xFF);

        cpu.stack_push(0x42).unwrap();
        cpu.stack_push(0xA0).unwrap();

        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.bus_mut().read_byte(0x01FF).unwrap(), 0x42);
        assert_eq!(cpu.bus_mut().read_byte(0x01FE).unwrap(), 0xA0);

        assert_eq!(cpu.stack_peek().unwrap(), 0xA0);
        assert_eq!(cpu.sp(), 0xFD);

        assert_eq!(cpu.stack_pop().unwrap(), 0xA0);
        assert_eq!(cpu.sp(), 0xFE);
        assert_eq!(cpu.stack_pop().unwrap(), 0x42);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn stack_pointer_wraps() {
        let mut cpu = ram_cpu();

        cpu.set_sp(0x00);
        cpu.stack_push(0x11).unwrap();
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.bus_mut().read_byte(0x0100).unwrap(), 0x11);

        assert_eq!(cpu.stack_pop().unwrap(), 0x11);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn illegal_opcode_is_fatal_with_context() {
        let mut cpu = ram_cpu();
        cpu.load_program(&[0x02], 0x0300).unwrap();

        assert_eq!(
            cpu.step(),
            Err(CpuError::IllegalOpcode {
                opcode: 0x02,
                pc: 0x0300
            })
        );
        // PC stays on the offending byte for diagnostics.
        assert_eq!(cpu.pc(), 0x0300);
    }

    #[test]
    fn step_against_unmapped_memory_fails() {
        let mut bus = AddressBus::new();
        bus.attach(Box::new(Ram::new(0x8000)), 0x8000);
        let mut cpu = Cpu::new(bus);
        cpu.set_pc(0x0300);

        assert_eq!(
            cpu.step(),
            Err(CpuError::Bus(BusError::UnmappedAddress { addr: 0x0300 }))
        );
    }

    #[test]
    fn display_shows_registers_and_flags() {
        let mut cpu = ram_cpu();
        cpu.set_a(0xAB);
        cpu.set_pc(0x1234);

        let s = cpu.to_string();
        assert!(s.contains("PC:0x1234"));
        assert!(s.contains("A:0xAB"));
        assert!(s.contains("P:nv-BdIzc"));
    }
}
