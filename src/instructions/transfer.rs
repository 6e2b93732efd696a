//! Register transfers. All set Z/N from the copied value except TXS, which
//! moves X into SP without touching the flags.

use crate::cpu::{Cpu, CpuError};

impl Cpu {
    pub(crate) fn tax(&mut self) -> Result<(), CpuError> {
        self.x = self.a;
        self.set_arithmetic_flags(self.x);
        Ok(())
    }

    pub(crate) fn tay(&mut self) -> Result<(), CpuError> {
        self.y = self.a;
        self.set_arithmetic_flags(self.y);
        Ok(())
    }

    pub(crate) fn txa(&mut self) -> Result<(), CpuError> {
        self.a = self.x;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn tya(&mut self) -> Result<(), CpuError> {
        self.a = self.y;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn tsx(&mut self) -> Result<(), CpuError> {
        self.x = self.sp;
        self.set_arithmetic_flags(self.x);
        Ok(())
    }

    pub(crate) fn txs(&mut self) -> Result<(), CpuError> {
        self.sp = self.x;
        Ok(())
    }
}
