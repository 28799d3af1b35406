//! # Byte-Level Decoder
//!
//! Walks raw machine code with [`OPCODE_TABLE`]. Undocumented opcodes
//! decode as one-byte `.byte` entries so a walk never stalls, which is what
//! the ROM drift check needs when a listing and an image disagree.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::instructions::branches;
use crate::mnemonic::Mnemonic;
use crate::opcodes::OPCODE_TABLE;

/// One instruction decoded from bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Address of the opcode byte
    pub address: u16,

    pub opcode: u8,

    /// `None` for an undocumented opcode
    pub mnemonic: Option<Mnemonic>,

    pub addressing_mode: AddressingMode,

    /// Operand bytes, little-endian (0-2 bytes)
    pub operand_bytes: Vec<u8>,

    /// Bytes consumed, including the opcode
    pub size_bytes: u8,

    pub base_cycles: u8,
}

impl DecodedInstruction {
    /// Raw operand value: the byte for one-byte operands, the little-endian
    /// word for two-byte operands, zero otherwise.
    pub fn operand(&self) -> u16 {
        match self.operand_bytes.as_slice() {
            [lo] => *lo as u16,
            [lo, hi] => u16::from_le_bytes([*lo, *hi]),
            _ => 0,
        }
    }
}

/// Number of bytes the instruction starting with `opcode` occupies.
/// Undocumented opcodes count as one byte.
pub fn instruction_length(opcode: u8) -> u8 {
    OPCODE_TABLE[opcode as usize].size_bytes
}

/// Decodes the instruction at the start of `bytes`.
///
/// Returns `None` if `bytes` is empty or too short for the opcode's
/// operands.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<DecodedInstruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];
    let operand_len = metadata.size_bytes.saturating_sub(1) as usize;

    if rest.len() < operand_len {
        return None;
    }

    Some(DecodedInstruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes: rest[..operand_len].to_vec(),
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
    })
}

/// Decodes `bytes` sequentially, starting at `start_address`.
///
/// Stops at a truncated trailing instruction.
pub fn decode_all(bytes: &[u8], start_address: u16) -> Vec<DecodedInstruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while let Some(instr) = decode_instruction(&bytes[offset..], address) {
        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;

        let Some(mnemonic) = self.mnemonic else {
            return write!(f, ".byte ${:02X}", self.opcode);
        };
        let operand = self.operand();

        match self.addressing_mode {
            Implicit => write!(f, "{}", mnemonic),
            Accumulator => write!(f, "{} A", mnemonic),
            Immediate => write!(f, "{} #${:02X}", mnemonic, operand),
            ZeroPage => write!(f, "{} ${:02X}", mnemonic, operand),
            ZeroPageX => write!(f, "{} ${:02X},X", mnemonic, operand),
            ZeroPageY => write!(f, "{} ${:02X},Y", mnemonic, operand),
            Relative => {
                let (target, _) = branches::target(self.address.wrapping_add(2), operand as u8);
                write!(f, "{} ${:04X}", mnemonic, target)
            }
            Absolute => write!(f, "{} ${:04X}", mnemonic, operand),
            AbsoluteX => write!(f, "{} ${:04X},X", mnemonic, operand),
            AbsoluteY => write!(f, "{} ${:04X},Y", mnemonic, operand),
            Indirect => write!(f, "{} (${:04X})", mnemonic, operand),
            IndirectX => write!(f, "{} (${:02X},X)", mnemonic, operand),
            IndirectY => write!(f, "{} (${:02X}),Y", mnemonic, operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lda_immediate() {
        let instr = decode_instruction(&[0xA9, 0x42], 0x8000).unwrap();

        assert_eq!(instr.address, 0x8000);
        assert_eq!(instr.mnemonic, Some(Mnemonic::Lda));
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.to_string(), "LDA #$42");
    }

    #[test]
    fn test_decode_sta_absolute() {
        let instr = decode_instruction(&[0x8D, 0x00, 0x20], 0x0000).unwrap();

        assert_eq!(instr.operand(), 0x2000);
        assert_eq!(instr.size_bytes, 3);
        assert_eq!(instr.to_string(), "STA $2000");
    }

    #[test]
    fn test_illegal_opcode_is_one_byte() {
        let instr = decode_instruction(&[0x02, 0xFF], 0x1000).unwrap();

        assert_eq!(instr.mnemonic, None);
        assert_eq!(instr.size_bytes, 1);
        assert_eq!(instruction_length(0x02), 1);
        assert_eq!(instr.to_string(), ".byte $02");
    }

    #[test]
    fn test_truncated_operand() {
        assert_eq!(decode_instruction(&[0x4C, 0x00], 0x8000), None);
        assert_eq!(decode_instruction(&[], 0x8000), None);
    }

    #[test]
    fn test_decode_all_and_branch_format() {
        let program = [0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x4C];
        let decoded = decode_all(&program, 0x8000);

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[2].address, 0x8003);
        assert_eq!(decoded[2].to_string(), "BNE $8002");
    }
}
