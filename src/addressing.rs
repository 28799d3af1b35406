//! # Hardware Addressing Modes
//!
//! The 13 encodings a 6502 opcode byte can select. Every opcode in the
//! [`OPCODE_TABLE`](crate::OPCODE_TABLE) carries one of these, and the
//! instruction length is a pure function of the mode.
//!
//! The symbolic operand forms an upstream parser produces live in
//! [`operand`](crate::operand); [`size`](crate::size) maps those back onto
//! these encodings.

use serde::{Deserialize, Serialize};

/// Encoding selected by an opcode byte.
///
/// | Operand bytes | Modes |
/// |---|---|
/// | 0 | Implicit, Accumulator |
/// | 1 | Immediate, ZeroPage(X/Y), Relative, IndirectX, IndirectY |
/// | 2 | Absolute(X/Y), Indirect |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingMode {
    /// No operand bytes (`CLC`, `RTS`, `TXS`).
    Implicit,

    /// Shift or rotate of A (`ASL A`).
    Accumulator,

    /// `#$nn`, the operand byte is the value.
    Immediate,

    /// `$nn`, an address in $0000-$00FF.
    ZeroPage,

    /// Zero page address indexed by X register, wraps within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y register, wraps within zero page.
    ///
    /// Only LDX and STX have this encoding.
    ZeroPageY,

    /// Branch displacement, signed and relative to the next instruction.
    Relative,

    /// `$nnnn`.
    Absolute,

    /// `$nnnn,X`, may cross a page.
    AbsoluteX,

    /// `$nnnn,Y`, may cross a page.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer (JMP only).
    ///
    /// Reproduces the page-wrap bug: JMP ($10FF) reads $10FF and $1000.
    Indirect,

    /// `($nn,X)`: pointer at `(nn + X) & $FF`.
    IndirectX,

    /// `($nn),Y`: pointer at `nn`, then + Y.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length including the opcode byte.
    pub const fn size_bytes(self) -> u8 {
        1 + self.operand_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_follow_operand_width() {
        assert_eq!(AddressingMode::Implicit.size_bytes(), 1);
        assert_eq!(AddressingMode::Accumulator.size_bytes(), 1);
        assert_eq!(AddressingMode::ZeroPageY.size_bytes(), 2);
        assert_eq!(AddressingMode::Relative.size_bytes(), 2);
        assert_eq!(AddressingMode::IndirectY.size_bytes(), 2);
        assert_eq!(AddressingMode::AbsoluteY.size_bytes(), 3);
        assert_eq!(AddressingMode::Indirect.size_bytes(), 3);
    }
}
