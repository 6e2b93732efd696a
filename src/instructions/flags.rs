//! Status flag manipulation: the SE*/CL* pairs.

use crate::cpu::{Cpu, CpuError};
use crate::status::Status;

impl Cpu {
    pub(crate) fn sec(&mut self) -> Result<(), CpuError> {
        self.p.insert(Status::CARRY);
        Ok(())
    }

    pub(crate) fn sed(&mut self) -> Result<(), CpuError> {
        self.p.insert(Status::DECIMAL);
        Ok(())
    }

    pub(crate) fn sei(&mut self) -> Result<(), CpuError> {
        self.p.insert(Status::IRQ_DISABLE);
        Ok(())
    }

    pub(crate) fn clc(&mut self) -> Result<(), CpuError> {
        self.p.remove(Status::CARRY);
        Ok(())
    }

    pub(crate) fn cld(&mut self) -> Result<(), CpuError> {
        self.p.remove(Status::DECIMAL);
        Ok(())
    }

    pub(crate) fn cli(&mut self) -> Result<(), CpuError> {
        self.p.remove(Status::IRQ_DISABLE);
        Ok(())
    }

    pub(crate) fn clv(&mut self) -> Result<(), CpuError> {
        self.p.remove(Status::OVERFLOW);
        Ok(())
    }
}
