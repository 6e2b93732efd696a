//! Arithmetic and logic: ADC, SBC, AND, ORA, EOR, the compares and BIT.
//!
//! ADC and SBC honour the D flag. Binary mode sets C from the ninth bit and
//! V from the sign rule `(A ^ r) & (M ^ r) & 0x80`. Decimal mode adds or
//! subtracts nibble-wise with BCD fix-up; C reflects the decimal carry (or
//! "no borrow" for SBC), Z follows the result byte, and N and V are cleared
//! as NMOS decimal mode leaves them without useful definition.

use crate::cpu::{Cpu, CpuError};
use crate::opcodes::Instruction;
use crate::status::Status;

impl Cpu {
    pub(crate) fn adc(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        let carry_in = self.carry_bit();

        if self.p.contains(Status::DECIMAL) {
            self.adc_decimal(self.a, operand, carry_in);
        } else {
            self.adc_binary(self.a, operand, carry_in);
        }

        Ok(())
    }

    pub(crate) fn sbc(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        let carry_in = self.carry_bit();

        if self.p.contains(Status::DECIMAL) {
            self.sbc_decimal(self.a, operand, carry_in);
        } else {
            // Two's complement turns subtraction into ADC of the inverted
            // operand with the same carry.
            self.adc_binary(self.a, !operand, carry_in);
        }

        Ok(())
    }

    /// Plain 8-bit addition with carry and signed-overflow detection.
    fn adc_binary(&mut self, a: u8, m: u8, carry_in: u8) {
        let result16 = a as u16 + m as u16 + carry_in as u16;
        let result = result16 as u8;

        self.p.set(Status::CARRY, result16 > 0xFF);
        // Overflow: both inputs share a sign the result does not.
        self.p
            .set(Status::OVERFLOW, (a ^ result) & (m ^ result) & 0x80 != 0);

        self.a = result;
        self.set_arithmetic_flags(result);
    }

    /// BCD addition, one nibble at a time with fix-up past 9.
    fn adc_decimal(&mut self, a: u8, m: u8, carry_in: u8) {
        let mut nibble_carry = 0;

        let mut low = (a & 0x0F) + (m & 0x0F) + carry_in;
        if low > 9 {
            low += 6;
        }
        if low > 15 {
            nibble_carry = 1;
        }

        let mut high = (a >> 4) + (m >> 4) + nibble_carry;
        if high > 9 {
            high += 6;
        }

        let result = (low & 0x0F) | (high << 4);

        self.p.set(Status::CARRY, high > 15);
        self.p.set(Status::ZERO, result == 0);
        self.p.remove(Status::NEGATIVE);
        self.p.remove(Status::OVERFLOW);

        self.a = result;
    }

    /// BCD subtraction. Bit 4 of a nibble difference is the borrow marker;
    /// C is set afterwards iff the high nibble did not borrow.
    fn sbc_decimal(&mut self, a: u8, m: u8, carry_in: u8) {
        let borrow_in = 1 - carry_in;
        let mut nibble_borrow = 0;

        let mut low = (a & 0x0F).wrapping_sub(m & 0x0F).wrapping_sub(borrow_in);
        if low & 0x10 != 0 {
            low = low.wrapping_sub(6);
            nibble_borrow = 1;
        }

        let mut high = (a >> 4).wrapping_sub(m >> 4).wrapping_sub(nibble_borrow);
        let borrowed = high & 0x10 != 0;
        if borrowed {
            high = high.wrapping_sub(6);
        }

        let result = (low & 0x0F) | (high << 4);

        self.p.set(Status::CARRY, !borrowed);
        self.p.set(Status::ZERO, result == 0);
        self.p.remove(Status::NEGATIVE);
        self.p.remove(Status::OVERFLOW);

        self.a = result;
    }

    pub(crate) fn and(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.a &= operand;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn ora(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.a |= operand;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn eor(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.a ^= operand;
        self.set_arithmetic_flags(self.a);
        Ok(())
    }

    pub(crate) fn cmp(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.compare(self.a, operand);
        Ok(())
    }

    pub(crate) fn cpx(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.compare(self.x, operand);
        Ok(())
    }

    pub(crate) fn cpy(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;
        self.compare(self.y, operand);
        Ok(())
    }

    /// Compare discards the difference: C answers `register >= operand`
    /// unsigned, Z and N describe the difference byte.
    fn compare(&mut self, register: u8, operand: u8) {
        self.p.set(Status::CARRY, register >= operand);
        self.set_arithmetic_flags(register.wrapping_sub(operand));
    }

    pub(crate) fn bit(&mut self, instruction: &Instruction) -> Result<(), CpuError> {
        let operand = self.resolve_operand(instruction)?;

        self.p.set(Status::NEGATIVE, operand & 0x80 != 0);
        self.p.set(Status::OVERFLOW, operand & 0x40 != 0);
        self.p.set(Status::ZERO, self.a & operand == 0);

        Ok(())
    }
}
