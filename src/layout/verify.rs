//! Cross-checks a layout against the ROM bytes it should describe

use log::warn;

use super::Layout;
use crate::decoder::decode_instruction;
use crate::mnemonic::Mnemonic;

/// A laid-out instruction that does not match the ROM.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RomMismatch {
    #[error("${address:04X}: illegal opcode ${opcode:02X} where {expected} was laid out")]
    IllegalOpcode {
        address: u16,
        opcode: u8,
        expected: Mnemonic,
    },

    #[error("${address:04X}: ROM has {found}, layout has {expected}")]
    WrongMnemonic {
        address: u16,
        expected: Mnemonic,
        found: Mnemonic,
    },

    #[error("${address:04X}: {mnemonic} is {expected} bytes in the layout, {found} in ROM")]
    WrongLength {
        address: u16,
        mnemonic: Mnemonic,
        expected: u8,
        found: u8,
    },

    #[error("${address:04X}: ROM ends inside {mnemonic}")]
    Truncated { address: u16, mnemonic: Mnemonic },
}

impl RomMismatch {
    pub fn address(&self) -> u16 {
        match self {
            RomMismatch::IllegalOpcode { address, .. }
            | RomMismatch::WrongMnemonic { address, .. }
            | RomMismatch::WrongLength { address, .. }
            | RomMismatch::Truncated { address, .. } => *address,
        }
    }
}

/// Decodes `prg`, mapped at `base`, at every laid-out instruction address.
///
/// Instructions placed outside `base..base + prg.len()` are not checked.
/// An empty result means every computed size agrees with the ROM.
pub fn verify_rom(layout: &Layout, prg: &[u8], base: u16) -> Vec<RomMismatch> {
    let mut mismatches = Vec::new();

    for placed in &layout.instructions {
        let Some(offset) = placed.address.checked_sub(base).map(usize::from) else {
            continue;
        };
        if offset >= prg.len() {
            continue;
        }

        let address = placed.address;
        let expected = placed.instruction.mnemonic;
        let mismatch = match decode_instruction(&prg[offset..], address) {
            None => Some(RomMismatch::Truncated {
                address,
                mnemonic: expected,
            }),
            Some(decoded) => match decoded.mnemonic {
                None => Some(RomMismatch::IllegalOpcode {
                    address,
                    opcode: decoded.opcode,
                    expected,
                }),
                Some(found) if found != expected => Some(RomMismatch::WrongMnemonic {
                    address,
                    expected,
                    found,
                }),
                Some(_) if decoded.size_bytes != placed.size => Some(RomMismatch::WrongLength {
                    address,
                    mnemonic: expected,
                    expected: placed.size,
                    found: decoded.size_bytes,
                }),
                Some(_) => None,
            },
        };

        if let Some(mismatch) = mismatch {
            warn!("ROM drift: {}", mismatch);
            mismatches.push(mismatch);
        }
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout, ProgramLine};
    use crate::operand::{Instruction, Operand};

    fn setup_layout() -> Layout {
        layout(&[
            ProgramLine::constant("Counter", "$10"),
            ProgramLine::org("$8000"),
            ProgramLine::instruction(Instruction::new(Mnemonic::Inc, Operand::direct("Counter"))),
            ProgramLine::instruction(Instruction::new(Mnemonic::Jmp, Operand::direct("$8000"))),
        ])
    }

    #[test]
    fn test_matching_rom() {
        // INC $10; JMP $8000
        let prg = [0xE6, 0x10, 0x4C, 0x00, 0x80];
        assert!(verify_rom(&setup_layout(), &prg, 0x8000).is_empty());
    }

    #[test]
    fn test_size_drift() {
        // INC $0010 assembled absolute pushes JMP one byte later
        let prg = [0xEE, 0x10, 0x00, 0x4C, 0x00, 0x80];
        let mismatches = verify_rom(&setup_layout(), &prg, 0x8000);

        assert_eq!(
            mismatches[0],
            RomMismatch::WrongLength {
                address: 0x8000,
                mnemonic: Mnemonic::Inc,
                expected: 2,
                found: 3,
            }
        );
        assert_eq!(mismatches[1].address(), 0x8002);
        assert_eq!(mismatches.len(), 2);
    }

    #[test]
    fn test_illegal_opcode() {
        let prg = [0xE6, 0x10, 0x02, 0x00, 0x80];
        let mismatches = verify_rom(&setup_layout(), &prg, 0x8000);
        assert_eq!(mismatches.len(), 1);
        assert!(matches!(mismatches[0], RomMismatch::IllegalOpcode { opcode: 0x02, .. }));
    }

    #[test]
    fn test_outside_rom_is_skipped() {
        let prg = [0xE6, 0x10];
        assert!(verify_rom(&setup_layout(), &prg, 0x8000).is_empty());
        assert!(verify_rom(&setup_layout(), &prg, 0x9000).is_empty());
    }
}
