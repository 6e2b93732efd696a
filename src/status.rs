//! The processor status register.
//!
//! P is a bit-packed byte and is stored as one. Keeping the packed byte as
//! the single source of truth means `PHP`, `BRK`, `PLP` and `RTI` move the
//! register to and from the stack without any reassembly step.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// The 6502 status register (NV-BDIZC).
    ///
    /// Bit 5 has no function and reads as 1 on real silicon; [`Cpu::reset`]
    /// establishes it and nothing in the core clears it.
    ///
    /// [`Cpu::reset`]: crate::Cpu::reset
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// C: carry out of the last addition / shift, or "no borrow".
        const CARRY = 1 << 0;
        /// Z: last ALU result was zero.
        const ZERO = 1 << 1;
        /// I: maskable interrupts are ignored while set.
        const IRQ_DISABLE = 1 << 2;
        /// D: ADC/SBC operate on binary-coded decimal.
        const DECIMAL = 1 << 3;
        /// B: distinguishes BRK pushes from hardware interrupt pushes.
        const BREAK = 1 << 4;
        /// Unused; reads as 1.
        const UNUSED = 1 << 5;
        /// V: signed overflow of the last ADC/SBC, or bit 6 under BIT.
        const OVERFLOW = 1 << 6;
        /// N: bit 7 of the last ALU result.
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// Register value established by reset: I, B and the unused bit set.
    pub const RESET: Status = Status::from_bits_retain(0x34);

    /// Renders the register as `nv-bdizc`, upper-casing the set flags.
    pub fn flag_string(self) -> String {
        const CHARS: [(Status, char); 8] = [
            (Status::NEGATIVE, 'n'),
            (Status::OVERFLOW, 'v'),
            (Status::UNUSED, '-'),
            (Status::BREAK, 'b'),
            (Status::DECIMAL, 'd'),
            (Status::IRQ_DISABLE, 'i'),
            (Status::ZERO, 'z'),
            (Status::CARRY, 'c'),
        ];

        CHARS
            .iter()
            .map(|&(flag, ch)| {
                if flag == Status::UNUSED {
                    '-'
                } else if self.contains(flag) {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                }
            })
            .collect()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flag_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions_match_hardware() {
        assert_eq!(Status::CARRY.bits(), 0x01);
        assert_eq!(Status::ZERO.bits(), 0x02);
        assert_eq!(Status::IRQ_DISABLE.bits(), 0x04);
        assert_eq!(Status::DECIMAL.bits(), 0x08);
        assert_eq!(Status::BREAK.bits(), 0x10);
        assert_eq!(Status::UNUSED.bits(), 0x20);
        assert_eq!(Status::OVERFLOW.bits(), 0x40);
        assert_eq!(Status::NEGATIVE.bits(), 0x80);
    }

    #[test]
    fn reset_value() {
        assert_eq!(Status::RESET.bits(), 0x34);
        assert!(Status::RESET.contains(Status::IRQ_DISABLE));
        assert!(Status::RESET.contains(Status::BREAK));
        assert!(Status::RESET.contains(Status::UNUSED));
        assert!(!Status::RESET.contains(Status::DECIMAL));
    }

    #[test]
    fn flag_string_cases() {
        assert_eq!(Status::RESET.flag_string(), "nv-BdIzc");
        let p = Status::NEGATIVE | Status::CARRY | Status::UNUSED;
        assert_eq!(p.flag_string(), "Nv-bdizC");
    }
}
