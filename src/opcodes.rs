//! Opcode metadata and decoded instructions.
//!
//! [`OPCODE_TABLE`] is the single source of truth for the 151 documented
//! NMOS 6502 opcodes: one [`OpcodeInfo`] descriptor per opcode byte, giving
//! the mnemonic, addressing mode, instruction size and base cycle count.
//! Every other byte value decodes to `None` and is treated as a fatal
//! illegal opcode by the CPU.

use std::fmt;

use crate::addressing::AddressingMode;

/// The 56 instruction mnemonics of the NMOS 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug gives the capitalised variant name; assembly listings use
        // all caps.
        write!(f, "{}", format!("{self:?}").to_uppercase())
    }
}

/// Static description of one opcode: what it is and how to fetch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// How the operand bytes are interpreted.
    pub mode: AddressingMode,
    /// Total instruction length in bytes, opcode included (1-3).
    pub size: u8,
    /// Base clock cycles; the core does not model page-crossing penalties.
    pub cycles: u8,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, size: u8, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        size,
        cycles,
    })
}

/// The 256-entry decode table, indexed by opcode byte.
pub const OPCODE_TABLE: [Option<OpcodeInfo>; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Option<OpcodeInfo>; 256] = [None; 256];

    t[0xEA] = op(Nop, Implied, 1, 2);

    // Set instructions
    t[0x38] = op(Sec, Implied, 1, 2);
    t[0xF8] = op(Sed, Implied, 1, 2);
    t[0x78] = op(Sei, Implied, 1, 2);

    // Clear instructions
    t[0x18] = op(Clc, Implied, 1, 2);
    t[0xD8] = op(Cld, Implied, 1, 2);
    t[0x58] = op(Cli, Implied, 1, 2);
    t[0xB8] = op(Clv, Implied, 1, 2);

    // ADC
    t[0x69] = op(Adc, Immediate, 2, 2);
    t[0x65] = op(Adc, Zeropage, 2, 3);
    t[0x75] = op(Adc, ZeropageX, 2, 4);
    t[0x6D] = op(Adc, Absolute, 3, 4);
    t[0x7D] = op(Adc, AbsoluteX, 3, 4);
    t[0x79] = op(Adc, AbsoluteY, 3, 4);
    t[0x61] = op(Adc, IndirectX, 2, 6);
    t[0x71] = op(Adc, IndirectY, 2, 5);

    // SBC
    t[0xE9] = op(Sbc, Immediate, 2, 2);
    t[0xE5] = op(Sbc, Zeropage, 2, 3);
    t[0xF5] = op(Sbc, ZeropageX, 2, 4);
    t[0xED] = op(Sbc, Absolute, 3, 4);
    t[0xFD] = op(Sbc, AbsoluteX, 3, 4);
    t[0xF9] = op(Sbc, AbsoluteY, 3, 4);
    t[0xE1] = op(Sbc, IndirectX, 2, 6);
    t[0xF1] = op(Sbc, IndirectY, 2, 5);

    // Increments
    t[0xE8] = op(Inx, Implied, 1, 2);
    t[0xC8] = op(Iny, Implied, 1, 2);
    t[0xE6] = op(Inc, Zeropage, 2, 5);
    t[0xF6] = op(Inc, ZeropageX, 2, 6);
    t[0xEE] = op(Inc, Absolute, 3, 6);
    t[0xFE] = op(Inc, AbsoluteX, 3, 7);

    // Decrements
    t[0xCA] = op(Dex, Implied, 1, 2);
    t[0x88] = op(Dey, Implied, 1, 2);
    t[0xC6] = op(Dec, Zeropage, 2, 5);
    t[0xD6] = op(Dec, ZeropageX, 2, 6);
    t[0xCE] = op(Dec, Absolute, 3, 6);
    t[0xDE] = op(Dec, AbsoluteX, 3, 7);

    // LDA
    t[0xA9] = op(Lda, Immediate, 2, 2);
    t[0xA5] = op(Lda, Zeropage, 2, 3);
    t[0xB5] = op(Lda, ZeropageX, 2, 4);
    t[0xAD] = op(Lda, Absolute, 3, 4);
    t[0xBD] = op(Lda, AbsoluteX, 3, 4);
    t[0xB9] = op(Lda, AbsoluteY, 3, 4);
    t[0xA1] = op(Lda, IndirectX, 2, 6);
    t[0xB1] = op(Lda, IndirectY, 2, 5);

    // LDX
    t[0xA2] = op(Ldx, Immediate, 2, 2);
    t[0xA6] = op(Ldx, Zeropage, 2, 3);
    t[0xB6] = op(Ldx, ZeropageY, 2, 4);
    t[0xAE] = op(Ldx, Absolute, 3, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 3, 4);

    // LDY
    t[0xA0] = op(Ldy, Immediate, 2, 2);
    t[0xA4] = op(Ldy, Zeropage, 2, 3);
    t[0xB4] = op(Ldy, ZeropageX, 2, 4);
    t[0xAC] = op(Ldy, Absolute, 3, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 3, 4);

    // ORA
    t[0x09] = op(Ora, Immediate, 2, 2);
    t[0x05] = op(Ora, Zeropage, 2, 3);
    t[0x15] = op(Ora, ZeropageX, 2, 4);
    t[0x0D] = op(Ora, Absolute, 3, 4);
    t[0x1D] = op(Ora, AbsoluteX, 3, 4);
    t[0x19] = op(Ora, AbsoluteY, 3, 4);
    t[0x01] = op(Ora, IndirectX, 2, 6);
    t[0x11] = op(Ora, IndirectY, 2, 5);

    // AND
    t[0x29] = op(And, Immediate, 2, 2);
    t[0x25] = op(And, Zeropage, 2, 3);
    t[0x35] = op(And, ZeropageX, 2, 4);
    t[0x2D] = op(And, Absolute, 3, 4);
    t[0x3D] = op(And, AbsoluteX, 3, 4);
    t[0x39] = op(And, AbsoluteY, 3, 4);
    t[0x21] = op(And, IndirectX, 2, 6);
    t[0x31] = op(And, IndirectY, 2, 5);

    // EOR
    t[0x49] = op(Eor, Immediate, 2, 2);
    t[0x45] = op(Eor, Zeropage, 2, 3);
    t[0x55] = op(Eor, ZeropageX, 2, 4);
    t[0x4D] = op(Eor, Absolute, 3, 4);
    t[0x5D] = op(Eor, AbsoluteX, 3, 4);
    t[0x59] = op(Eor, AbsoluteY, 3, 4);
    t[0x41] = op(Eor, IndirectX, 2, 6);
    t[0x51] = op(Eor, IndirectY, 2, 5);

    // STA
    t[0x85] = op(Sta, Zeropage, 2, 3);
    t[0x95] = op(Sta, ZeropageX, 2, 4);
    t[0x8D] = op(Sta, Absolute, 3, 4);
    t[0x9D] = op(Sta, AbsoluteX, 3, 5);
    t[0x99] = op(Sta, AbsoluteY, 3, 5);
    t[0x81] = op(Sta, IndirectX, 2, 6);
    t[0x91] = op(Sta, IndirectY, 2, 6);

    // STX
    t[0x86] = op(Stx, Zeropage, 2, 3);
    t[0x96] = op(Stx, ZeropageY, 2, 4);
    t[0x8E] = op(Stx, Absolute, 3, 4);

    // STY
    t[0x84] = op(Sty, Zeropage, 2, 3);
    t[0x94] = op(Sty, ZeropageX, 2, 4);
    t[0x8C] = op(Sty, Absolute, 3, 4);

    // Transfers
    t[0xAA] = op(Tax, Implied, 1, 2);
    t[0xA8] = op(Tay, Implied, 1, 2);
    t[0x8A] = op(Txa, Implied, 1, 2);
    t[0x98] = op(Tya, Implied, 1, 2);
    t[0xBA] = op(Tsx, Implied, 1, 2);
    t[0x9A] = op(Txs, Implied, 1, 2);

    // ASL
    t[0x0A] = op(Asl, Accumulator, 1, 2);
    t[0x06] = op(Asl, Zeropage, 2, 5);
    t[0x16] = op(Asl, ZeropageX, 2, 6);
    t[0x0E] = op(Asl, Absolute, 3, 6);
    t[0x1E] = op(Asl, AbsoluteX, 3, 7);

    // LSR
    t[0x4A] = op(Lsr, Accumulator, 1, 2);
    t[0x46] = op(Lsr, Zeropage, 2, 5);
    t[0x56] = op(Lsr, ZeropageX, 2, 6);
    t[0x4E] = op(Lsr, Absolute, 3, 6);
    t[0x5E] = op(Lsr, AbsoluteX, 3, 7);

    // ROL
    t[0x2A] = op(Rol, Accumulator, 1, 2);
    t[0x26] = op(Rol, Zeropage, 2, 5);
    t[0x36] = op(Rol, ZeropageX, 2, 6);
    t[0x2E] = op(Rol, Absolute, 3, 6);
    t[0x3E] = op(Rol, AbsoluteX, 3, 7);

    // ROR
    t[0x6A] = op(Ror, Accumulator, 1, 2);
    t[0x66] = op(Ror, Zeropage, 2, 5);
    t[0x76] = op(Ror, ZeropageX, 2, 6);
    t[0x6E] = op(Ror, Absolute, 3, 6);
    t[0x7E] = op(Ror, AbsoluteX, 3, 7);

    // CMP
    t[0xC9] = op(Cmp, Immediate, 2, 2);
    t[0xC5] = op(Cmp, Zeropage, 2, 3);
    t[0xD5] = op(Cmp, ZeropageX, 2, 4);
    t[0xCD] = op(Cmp, Absolute, 3, 4);
    t[0xDD] = op(Cmp, AbsoluteX, 3, 4);
    t[0xD9] = op(Cmp, AbsoluteY, 3, 4);
    t[0xC1] = op(Cmp, IndirectX, 2, 6);
    t[0xD1] = op(Cmp, IndirectY, 2, 5);

    // CPX
    t[0xE0] = op(Cpx, Immediate, 2, 2);
    t[0xE4] = op(Cpx, Zeropage, 2, 3);
    t[0xEC] = op(Cpx, Absolute, 3, 4);

    // CPY
    t[0xC0] = op(Cpy, Immediate, 2, 2);
    t[0xC4] = op(Cpy, Zeropage, 2, 3);
    t[0xCC] = op(Cpy, Absolute, 3, 4);

    // BRK
    t[0x00] = op(Brk, Implied, 1, 7);

    // Branches
    t[0x90] = op(Bcc, Relative, 2, 2);
    t[0xB0] = op(Bcs, Relative, 2, 2);
    t[0xD0] = op(Bne, Relative, 2, 2);
    t[0xF0] = op(Beq, Relative, 2, 2);
    t[0x10] = op(Bpl, Relative, 2, 2);
    t[0x30] = op(Bmi, Relative, 2, 2);
    t[0x50] = op(Bvc, Relative, 2, 2);
    t[0x70] = op(Bvs, Relative, 2, 2);

    // BIT
    t[0x24] = op(Bit, Zeropage, 2, 3);
    t[0x2C] = op(Bit, Absolute, 3, 4);

    // Stack
    t[0x08] = op(Php, Implied, 1, 3);
    t[0x28] = op(Plp, Implied, 1, 4);
    t[0x48] = op(Pha, Implied, 1, 3);
    t[0x68] = op(Pla, Implied, 1, 4);

    // JMP
    t[0x4C] = op(Jmp, Absolute, 3, 3);
    t[0x6C] = op(Jmp, Indirect, 3, 5);

    // Subroutines and returns
    t[0x20] = op(Jsr, Absolute, 3, 6);
    t[0x60] = op(Rts, Implied, 1, 6);
    t[0x40] = op(Rti, Implied, 1, 6);

    t
};

/// A fully fetched instruction: decode metadata plus the operand bytes and
/// the address it was read from.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    /// Decode table entry for the opcode byte.
    pub info: OpcodeInfo,
    /// The opcode byte itself.
    pub opcode: u8,
    /// 8-bit operand of two-byte instructions.
    pub op8: u8,
    /// 16-bit operand of three-byte instructions.
    pub op16: u16,
    /// Address the opcode byte was fetched from.
    pub address: u16,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.info.size {
            2 => write!(
                f,
                "0x{:04X}: 0x{:02X} - {} 0x{:02X} [{}] {{{}}}",
                self.address, self.opcode, self.info.mnemonic, self.op8, self.info.mode,
                self.info.cycles
            ),
            3 => write!(
                f,
                "0x{:04X}: 0x{:02X} - {} 0x{:04X} [{}] {{{}}}",
                self.address, self.opcode, self.info.mnemonic, self.op16, self.info.mode,
                self.info.cycles
            ),
            _ => write!(
                f,
                "0x{:04X}: 0x{:02X} - {} [{}] {{{}}}",
                self.address, self.opcode, self.info.mnemonic, self.info.mode, self.info.cycles
            ),
        }
    }
}
