//! The thirteen addressing modes of the NMOS 6502.
//!
//! The addressing mode of a decoded instruction determines how its operand
//! bytes are turned into an effective value (for reads) or an effective bus
//! address (for writes and read-modify-write operations). The resolution
//! rules themselves live on [`crate::Cpu`]; this module only names the modes.

use std::fmt;

/// How an instruction's operand bytes are interpreted.
///
/// Indexed zero-page modes wrap within the zero page (8-bit arithmetic);
/// indexed absolute modes wrap around the full 16-bit address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Full 16-bit address follows the opcode.
    Absolute,
    /// 16-bit address plus the X register.
    AbsoluteX,
    /// 16-bit address plus the Y register.
    AbsoluteY,
    /// The operation targets the accumulator; no operand bytes.
    Accumulator,
    /// The operand byte is the value itself.
    Immediate,
    /// No operand at all.
    Implied,
    /// The 16-bit operand is the address of a pointer to the target (JMP only).
    Indirect,
    /// Zero-page pointer at `(operand + X) mod 256`, then dereference.
    IndirectX,
    /// Dereference the zero-page pointer at `operand`, then add Y.
    IndirectY,
    /// Signed 8-bit displacement from the address of the next instruction.
    Relative,
    /// 8-bit address in page zero.
    Zeropage,
    /// Zero-page address plus X, wrapping within page zero.
    ZeropageX,
    /// Zero-page address plus Y, wrapping within page zero.
    ZeropageY,
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::Accumulator => "accumulator",
            AddressingMode::Immediate => "immediate",
            AddressingMode::Implied => "implied",
            AddressingMode::Indirect => "(indirect)",
            AddressingMode::IndirectX => "(indirect,X)",
            AddressingMode::IndirectY => "(indirect),Y",
            AddressingMode::Relative => "relative",
            AddressingMode::Zeropage => "zeropage",
            AddressingMode::ZeropageX => "zeropage,X",
            AddressingMode::ZeropageY => "zeropage,Y",
        };
        f.write_str(name)
    }
}
