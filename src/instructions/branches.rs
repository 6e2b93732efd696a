//! Conditional branches. The operand is a signed displacement from the
//! address of the *next* instruction; by the time a branch executes, PC has
//! already advanced past it, so a taken branch is a wrapping 16-bit add of
//! the sign-extended offset.

use crate::cpu::{Cpu, CpuError};
use crate::opcodes::Instruction;
use crate::status::Status;

impl Cpu {
    pub(crate) fn bcc(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, !self.p.contains(Status::CARRY))
    }

    pub(crate) fn bcs(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, self.p.contains(Status::CARRY))
    }

    pub(crate) fn bne(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, !self.p.contains(Status::ZERO))
    }

    pub(crate) fn beq(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, self.p.contains(Status::ZERO))
    }

    pub(crate) fn bpl(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, !self.p.contains(Status::NEGATIVE))
    }

    pub(crate) fn bmi(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, self.p.contains(Status::NEGATIVE))
    }

    pub(crate) fn bvc(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, !self.p.contains(Status::OVERFLOW))
    }

    pub(crate) fn bvs(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        self.branch_if(instruction, self.p.contains(Status::OVERFLOW))
    }

    fn branch_if(&mut self, instruction: &Instruction, taken: bool) -> Result<(), CpuError> {
        if taken {
            // i8 -> u16 sign-extends, so the wrapping add moves PC in
            // either direction.
            let offset = instruction.op8 as i8;
            self.pc = self.pc.wrapping_add(offset as u16);
        }

        Ok(())
    }
}
