//! Stack pushes and pulls: PHA, PHP, PLA, PLP.
//!
//! PHP always pushes with B and the unused bit set; the in-register B value
//! is not observable any other way. PLP loads the pulled byte wholesale,
//! forcing the unused bit back on.

use crate::cpu::{Cpu, CpuError};
use crate::status::Status;

impl Cpu {
    pub(crate) fn pha(&mut self) -> Result<(), CpuError> {
        self.stack_push(self.a)
    }

    pub(crate) fn php(&mut self) -> Result<(), CpuError> {
        let pushed = self.p | Status::BREAK | Status::UNUSED;
        self.stack_push(pushed.bits())
    }

    pub(crate) fn pla(&mut self) -> Result<(), CpuError> {
        self.a = self.stack_pop()?;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn plp(&mut self) -> Result<(), CpuError> {
        let value = self.stack_pop()?;
        self.p = Status::from_bits_retain(value) | Status::UNUSED;
        Ok(())
    }
}
