//! # Opcode Metadata Table
//!
//! The 256-entry table is the single source of truth for byte-level
//! decoding: the [`Stepper`](crate::Stepper) reads it to fetch operands, the
//! [`decoder`](crate::decoder) reads it to walk ROM images, and the size
//! calculator's tests check themselves against it.
//!
//! The 151 documented NMOS opcodes carry their mnemonic, addressing mode and
//! base cycle cost. The remaining 105 undocumented opcodes have no mnemonic,
//! zero cycles and a length of one byte, so best-effort decoding can skip
//! over them.

use crate::addressing::AddressingMode;
use crate::mnemonic::Mnemonic;
use crate::mnemonic::Mnemonic::*;

/// Metadata for a single 6502 opcode.
///
/// ```
/// use isa6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, Some(Mnemonic::Lda));
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Operation, or `None` for an undocumented opcode.
    pub mnemonic: Option<Mnemonic>,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost before page-crossing and branch penalties.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    /// True for the 151 documented opcodes.
    pub const fn is_documented(&self) -> bool {
        self.mnemonic.is_some()
    }
}

const IMP: AddressingMode = AddressingMode::Implicit;
const ACC: AddressingMode = AddressingMode::Accumulator;
const IMM: AddressingMode = AddressingMode::Immediate;
const ZP: AddressingMode = AddressingMode::ZeroPage;
const ZPX: AddressingMode = AddressingMode::ZeroPageX;
const ZPY: AddressingMode = AddressingMode::ZeroPageY;
const REL: AddressingMode = AddressingMode::Relative;
const ABS: AddressingMode = AddressingMode::Absolute;
const ABX: AddressingMode = AddressingMode::AbsoluteX;
const ABY: AddressingMode = AddressingMode::AbsoluteY;
const IND: AddressingMode = AddressingMode::Indirect;
const IZX: AddressingMode = AddressingMode::IndirectX;
const IZY: AddressingMode = AddressingMode::IndirectY;

const fn op(mnemonic: Mnemonic, addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: Some(mnemonic),
        addressing_mode,
        base_cycles,
        size_bytes: addressing_mode.size_bytes(),
    }
}

const ILLEGAL: OpcodeMetadata = OpcodeMetadata {
    mnemonic: None,
    addressing_mode: AddressingMode::Implicit,
    base_cycles: 0,
    size_bytes: 1,
};

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x0_
    op(Brk, IMP, 7), // 0x00
    op(Ora, IZX, 6), // 0x01
    ILLEGAL, // 0x02
    ILLEGAL, // 0x03
    ILLEGAL, // 0x04
    op(Ora, ZP, 3), // 0x05
    op(Asl, ZP, 5), // 0x06
    ILLEGAL, // 0x07
    op(Php, IMP, 3), // 0x08
    op(Ora, IMM, 2), // 0x09
    op(Asl, ACC, 2), // 0x0A
    ILLEGAL, // 0x0B
    ILLEGAL, // 0x0C
    op(Ora, ABS, 4), // 0x0D
    op(Asl, ABS, 6), // 0x0E
    ILLEGAL, // 0x0F
    // 0x1_
    op(Bpl, REL, 2), // 0x10
    op(Ora, IZY, 5), // 0x11
    ILLEGAL, // 0x12
    ILLEGAL, // 0x13
    ILLEGAL, // 0x14
    op(Ora, ZPX, 4), // 0x15
    op(Asl, ZPX, 6), // 0x16
    ILLEGAL, // 0x17
    op(Clc, IMP, 2), // 0x18
    op(Ora, ABY, 4), // 0x19
    ILLEGAL, // 0x1A
    ILLEGAL, // 0x1B
    ILLEGAL, // 0x1C
    op(Ora, ABX, 4), // 0x1D
    op(Asl, ABX, 7), // 0x1E
    ILLEGAL, // 0x1F
    // 0x2_
    op(Jsr, ABS, 6), // 0x20
    op(And, IZX, 6), // 0x21
    ILLEGAL, // 0x22
    ILLEGAL, // 0x23
    op(Bit, ZP, 3), // 0x24
    op(And, ZP, 3), // 0x25
    op(Rol, ZP, 5), // 0x26
    ILLEGAL, // 0x27
    op(Plp, IMP, 4), // 0x28
    op(And, IMM, 2), // 0x29
    op(Rol, ACC, 2), // 0x2A
    ILLEGAL, // 0x2B
    op(Bit, ABS, 4), // 0x2C
    op(And, ABS, 4), // 0x2D
    op(Rol, ABS, 6), // 0x2E
    ILLEGAL, // 0x2F
    // 0x3_
    op(Bmi, REL, 2), // 0x30
    op(And, IZY, 5), // 0x31
    ILLEGAL, // 0x32
    ILLEGAL, // 0x33
    ILLEGAL, // 0x34
    op(And, ZPX, 4), // 0x35
    op(Rol, ZPX, 6), // 0x36
    ILLEGAL, // 0x37
    op(Sec, IMP, 2), // 0x38
    op(And, ABY, 4), // 0x39
    ILLEGAL, // 0x3A
    ILLEGAL, // 0x3B
    ILLEGAL, // 0x3C
    op(And, ABX, 4), // 0x3D
    op(Rol, ABX, 7), // 0x3E
    ILLEGAL, // 0x3F
    // 0x4_
    op(Rti, IMP, 6), // 0x40
    op(Eor, IZX, 6), // 0x41
    ILLEGAL, // 0x42
    ILLEGAL, // 0x43
    ILLEGAL, // 0x44
    op(Eor, ZP, 3), // 0x45
    op(Lsr, ZP, 5), // 0x46
    ILLEGAL, // 0x47
    op(Pha, IMP, 3), // 0x48
    op(Eor, IMM, 2), // 0x49
    op(Lsr, ACC, 2), // 0x4A
    ILLEGAL, // 0x4B
    op(Jmp, ABS, 3), // 0x4C
    op(Eor, ABS, 4), // 0x4D
    op(Lsr, ABS, 6), // 0x4E
    ILLEGAL, // 0x4F
    // 0x5_
    op(Bvc, REL, 2), // 0x50
    op(Eor, IZY, 5), // 0x51
    ILLEGAL, // 0x52
    ILLEGAL, // 0x53
    ILLEGAL, // 0x54
    op(Eor, ZPX, 4), // 0x55
    op(Lsr, ZPX, 6), // 0x56
    ILLEGAL, // 0x57
    op(Cli, IMP, 2), // 0x58
    op(Eor, ABY, 4), // 0x59
    ILLEGAL, // 0x5A
    ILLEGAL, // 0x5B
    ILLEGAL, // 0x5C
    op(Eor, ABX, 4), // 0x5D
    op(Lsr, ABX, 7), // 0x5E
    ILLEGAL, // 0x5F
    // 0x6_
    op(Rts, IMP, 6), // 0x60
    op(Adc, IZX, 6), // 0x61
    ILLEGAL, // 0x62
    ILLEGAL, // 0x63
    ILLEGAL, // 0x64
    op(Adc, ZP, 3), // 0x65
    op(Ror, ZP, 5), // 0x66
    ILLEGAL, // 0x67
    op(Pla, IMP, 4), // 0x68
    op(Adc, IMM, 2), // 0x69
    op(Ror, ACC, 2), // 0x6A
    ILLEGAL, // 0x6B
    op(Jmp, IND, 5), // 0x6C
    op(Adc, ABS, 4), // 0x6D
    op(Ror, ABS, 6), // 0x6E
    ILLEGAL, // 0x6F
    // 0x7_
    op(Bvs, REL, 2), // 0x70
    op(Adc, IZY, 5), // 0x71
    ILLEGAL, // 0x72
    ILLEGAL, // 0x73
    ILLEGAL, // 0x74
    op(Adc, ZPX, 4), // 0x75
    op(Ror, ZPX, 6), // 0x76
    ILLEGAL, // 0x77
    op(Sei, IMP, 2), // 0x78
    op(Adc, ABY, 4), // 0x79
    ILLEGAL, // 0x7A
    ILLEGAL, // 0x7B
    ILLEGAL, // 0x7C
    op(Adc, ABX, 4), // 0x7D
    op(Ror, ABX, 7), // 0x7E
    ILLEGAL, // 0x7F
    // 0x8_
    ILLEGAL, // 0x80
    op(Sta, IZX, 6), // 0x81
    ILLEGAL, // 0x82
    ILLEGAL, // 0x83
    op(Sty, ZP, 3), // 0x84
    op(Sta, ZP, 3), // 0x85
    op(Stx, ZP, 3), // 0x86
    ILLEGAL, // 0x87
    op(Dey, IMP, 2), // 0x88
    ILLEGAL, // 0x89
    op(Txa, IMP, 2), // 0x8A
    ILLEGAL, // 0x8B
    op(Sty, ABS, 4), // 0x8C
    op(Sta, ABS, 4), // 0x8D
    op(Stx, ABS, 4), // 0x8E
    ILLEGAL, // 0x8F
    // 0x9_
    op(Bcc, REL, 2), // 0x90
    op(Sta, IZY, 6), // 0x91
    ILLEGAL, // 0x92
    ILLEGAL, // 0x93
    op(Sty, ZPX, 4), // 0x94
    op(Sta, ZPX, 4), // 0x95
    op(Stx, ZPY, 4), // 0x96
    ILLEGAL, // 0x97
    op(Tya, IMP, 2), // 0x98
    op(Sta, ABY, 5), // 0x99
    op(Txs, IMP, 2), // 0x9A
    ILLEGAL, // 0x9B
    ILLEGAL, // 0x9C
    op(Sta, ABX, 5), // 0x9D
    ILLEGAL, // 0x9E
    ILLEGAL, // 0x9F
    // 0xA_
    op(Ldy, IMM, 2), // 0xA0
    op(Lda, IZX, 6), // 0xA1
    op(Ldx, IMM, 2), // 0xA2
    ILLEGAL, // 0xA3
    op(Ldy, ZP, 3), // 0xA4
    op(Lda, ZP, 3), // 0xA5
    op(Ldx, ZP, 3), // 0xA6
    ILLEGAL, // 0xA7
    op(Tay, IMP, 2), // 0xA8
    op(Lda, IMM, 2), // 0xA9
    op(Tax, IMP, 2), // 0xAA
    ILLEGAL, // 0xAB
    op(Ldy, ABS, 4), // 0xAC
    op(Lda, ABS, 4), // 0xAD
    op(Ldx, ABS, 4), // 0xAE
    ILLEGAL, // 0xAF
    // 0xB_
    op(Bcs, REL, 2), // 0xB0
    op(Lda, IZY, 5), // 0xB1
    ILLEGAL, // 0xB2
    ILLEGAL, // 0xB3
    op(Ldy, ZPX, 4), // 0xB4
    op(Lda, ZPX, 4), // 0xB5
    op(Ldx, ZPY, 4), // 0xB6
    ILLEGAL, // 0xB7
    op(Clv, IMP, 2), // 0xB8
    op(Lda, ABY, 4), // 0xB9
    op(Tsx, IMP, 2), // 0xBA
    ILLEGAL, // 0xBB
    op(Ldy, ABX, 4), // 0xBC
    op(Lda, ABX, 4), // 0xBD
    op(Ldx, ABY, 4), // 0xBE
    ILLEGAL, // 0xBF
    // 0xC_
    op(Cpy, IMM, 2), // 0xC0
    op(Cmp, IZX, 6), // 0xC1
    ILLEGAL, // 0xC2
    ILLEGAL, // 0xC3
    op(Cpy, ZP, 3), // 0xC4
    op(Cmp, ZP, 3), // 0xC5
    op(Dec, ZP, 5), // 0xC6
    ILLEGAL, // 0xC7
    op(Iny, IMP, 2), // 0xC8
    op(Cmp, IMM, 2), // 0xC9
    op(Dex, IMP, 2), // 0xCA
    ILLEGAL, // 0xCB
    op(Cpy, ABS, 4), // 0xCC
    op(Cmp, ABS, 4), // 0xCD
    op(Dec, ABS, 6), // 0xCE
    ILLEGAL, // 0xCF
    // 0xD_
    op(Bne, REL, 2), // 0xD0
    op(Cmp, IZY, 5), // 0xD1
    ILLEGAL, // 0xD2
    ILLEGAL, // 0xD3
    ILLEGAL, // 0xD4
    op(Cmp, ZPX, 4), // 0xD5
    op(Dec, ZPX, 6), // 0xD6
    ILLEGAL, // 0xD7
    op(Cld, IMP, 2), // 0xD8
    op(Cmp, ABY, 4), // 0xD9
    ILLEGAL, // 0xDA
    ILLEGAL, // 0xDB
    ILLEGAL, // 0xDC
    op(Cmp, ABX, 4), // 0xDD
    op(Dec, ABX, 7), // 0xDE
    ILLEGAL, // 0xDF
    // 0xE_
    op(Cpx, IMM, 2), // 0xE0
    op(Sbc, IZX, 6), // 0xE1
    ILLEGAL, // 0xE2
    ILLEGAL, // 0xE3
    op(Cpx, ZP, 3), // 0xE4
    op(Sbc, ZP, 3), // 0xE5
    op(Inc, ZP, 5), // 0xE6
    ILLEGAL, // 0xE7
    op(Inx, IMP, 2), // 0xE8
    op(Sbc, IMM, 2), // 0xE9
    op(Nop, IMP, 2), // 0xEA
    ILLEGAL, // 0xEB
    op(Cpx, ABS, 4), // 0xEC
    op(Sbc, ABS, 4), // 0xED
    op(Inc, ABS, 6), // 0xEE
    ILLEGAL, // 0xEF
    // 0xF_
    op(Beq, REL, 2), // 0xF0
    op(Sbc, IZY, 5), // 0xF1
    ILLEGAL, // 0xF2
    ILLEGAL, // 0xF3
    ILLEGAL, // 0xF4
    op(Sbc, ZPX, 4), // 0xF5
    op(Inc, ZPX, 6), // 0xF6
    ILLEGAL, // 0xF7
    op(Sed, IMP, 2), // 0xF8
    op(Sbc, ABY, 4), // 0xF9
    ILLEGAL, // 0xFA
    ILLEGAL, // 0xFB
    ILLEGAL, // 0xFC
    op(Sbc, ABX, 4), // 0xFD
    op(Inc, ABX, 7), // 0xFE
    ILLEGAL, // 0xFF
];

/// Finds the opcode byte encoding `mnemonic` in `mode`, if the combination exists.
///
/// ```
/// use isa6502::{opcodes::opcode_for, AddressingMode, Mnemonic};
///
/// assert_eq!(opcode_for(Mnemonic::Ldx, AddressingMode::ZeroPageY), Some(0xB6));
/// assert_eq!(opcode_for(Mnemonic::Lda, AddressingMode::ZeroPageY), None);
/// ```
pub fn opcode_for(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|m| m.mnemonic == Some(mnemonic) && m.addressing_mode == mode)
        .map(|index| index as u8)
}
