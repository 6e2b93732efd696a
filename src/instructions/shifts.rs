//! Shifts and rotates: ASL, LSR, ROL, ROR.
//!
//! Each form works on the accumulator or read-modify-writes a memory byte.
//! The bit shifted out lands in C; rotates shift the old C in at the other
//! end.

use crate::addressing::AddressingMode;
use crate::cpu::{Cpu, CpuError};
use crate::opcodes::Instruction;
use crate::status::Status;

impl Cpu {
    pub(crate) fn asl(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.modify(instruction, |cpu, value| {
            cpu.p.set(Status::CARRY, value & 0x80 != 0);
            value << 1
        })
    }

    pub(crate) fn lsr(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.modify(instruction, |cpu, value| {
            cpu.p.set(Status::CARRY, value & 0x01 != 0);
            value >> 1
        })
    }

    pub(crate) fn rol(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let carry = self.carry_bit();
        self.modify(instruction, |cpu, value| {
            cpu.p.set(Status::CARRY, value & 0x80 != 0);
            value << 1 | carry
        })
    }

    pub(crate) fn ror(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let carry = self.carry_bit();
        self.modify(instruction, |cpu, value| {
            cpu.p.set(Status::CARRY, value & 0x01 != 0);
            value >> 1 | carry << 7
        })
    }

    /// Applies `f` to the accumulator or to the addressed memory byte,
    /// writing the result back and updating Z/N from it.
    fn modify<F>(&mut self, instruction: &Instruction, f: F) -> Result<(), CpuError>
    where
        F: FnOnce(&mut Cpu, u8) -> u8,
    {
        match instruction.info.mode {
            AddressingMode::Accumulator => {
                let result = f(self, self.a);
                self.a = result;
                self.set_arithmetic_flags(result);
            }
            _ => {
                let address = self.memory_address(instruction)?;
                let value = self.bus.read_byte(address)?;
                let result = f(self, value);
                self.bus.write_byte(address, result)?;
                self.set_arithmetic_flags(result);
            }
        }

        Ok(())
    }
}
