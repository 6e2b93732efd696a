//! Loads and stores. Loads update Z/N from the loaded value; stores leave
//! the flags alone.

use crate::cpu::{Cpu, CpuError};
use crate::opcodes::Instruction;

impl Cpu {
    pub(crate) fn lda(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.a = self.resolve_operand(instruction)?;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn ldx(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.x = self.resolve_operand(instruction)?;
        self.set_arithmetic_flags(self.x);
        Ok(())
    }

    pub(crate) fn ldy(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.y = self.resolve_operand(instruction)?;
        self.set_arithmetic_flags(self.y);
        Ok(())
    }

    pub(crate) fn sta(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let address = self.memory_address(instruction)?;
        self.bus.write_byte(address, self.a)?;
        Ok(())
    }

    pub(crate) fn stx(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let address = self.memory_address(instruction)?;
        self.bus.write_byte(address, self.x)?;
        Ok(())
    }

    pub(crate) fn sty(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let address = self.memory_address(instruction)?;
        self.bus.write_byte(address, self.y)?;
        Ok(())
    }
}
