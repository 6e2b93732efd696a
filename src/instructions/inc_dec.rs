//! Increments and decrements, on memory (INC/DEC) and on the index
//! registers (INX/INY/DEX/DEY). All wrap at the byte boundary and set Z/N.

use crate::cpu::{Cpu, CpuError};
use crate::opcodes::Instruction;

impl Cpu {
    pub(crate) fn inc(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let address = self.memory_address(instruction)?;
        let value = self.bus.read_byte(address)?.wrapping_add(1);

        self.bus.write_byte(address, value)?;
        self.set_arithmetic_flags(value);
        Ok(())
    }

    pub(crate) fn dec(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let address = self.memory_address(instruction)?;
        let value = self.bus.read_byte(address)?.wrapping_sub(1);

        self.bus.write_byte(address, value)?;
        self.set_arithmetic_flags(value);
        Ok(())
    }

    pub(crate) fn inx(&mut self) -> Result<(), CpuError> {
        self.x = self.x.wrapping_add(1);
        self.set_arithmetic_flags(self.x);
        Ok(())
    }

    pub(crate) fn iny(&mut self) -> Result<(), CpuError> {
        self.y = self.y.wrapping_add(1);
        self.set_arithmetic_flags(self.y);
        Ok(())
    }

    pub(crate) fn dex(&mut self) -> Result<(), CpuError> {
        self.x = self.x.wrapping_sub(1);
        self.set_arithmetic_flags(self.x);
        Ok(())
    }

    pub(crate) fn dey(&mut self) -> Result<(), CpuError> {
        self.y = self.y.wrapping_sub(1);
        self.set_arithmetic_flags(self.y);
        Ok(())
    }
}
