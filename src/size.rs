//! # Instruction-Size Calculator
//!
//! Instruction length is a pure function of the mnemonic, the operand kind
//! and whether the operand's resolved value fits in zero page. It never
//! depends on register contents.
//!
//! | Operand kind | Length |
//! |---|---|
//! | none (implied / accumulator) | 1 |
//! | immediate, `#<`/`#>`, constants | 2 |
//! | `Label` | 2 in zero page, else 3; JMP/JSR always 3; branches always 2 |
//! | `Label,X` | 2 in zero page, else 3 |
//! | `Label,Y` | 2 only for LDX/STX in zero page, else 3 |
//! | `(zp,X)`, `(zp),Y` | 2 |
//! | `(abs)` | 3 |
//!
//! Every length here is derived from the [`AddressingMode`] the operand
//! assembles to, so it agrees by construction with the
//! [`OPCODE_TABLE`](crate::OPCODE_TABLE) the [`Stepper`](crate::Stepper)
//! decodes with.

use crate::addressing::AddressingMode;
use crate::mnemonic::Mnemonic;
use crate::operand::{Operand, OperandKind};
use crate::opcodes::opcode_for;
use crate::resolver::{is_zero_page, target_value, LabelResolver};

/// Hardware addressing mode a symbolic operand assembles to.
///
/// `zero_page` is whether the operand's base value (label plus offset) is
/// below $100. It is ignored for kinds whose encoding never depends on it.
///
/// The returned mode may not exist for `mnemonic` (e.g. `STX abs,Y`); use
/// [`is_encodable`] to check.
pub fn encoding_mode(mnemonic: Mnemonic, kind: Option<OperandKind>, zero_page: bool) -> AddressingMode {
    let Some(kind) = kind else {
        return match mnemonic {
            Mnemonic::Asl | Mnemonic::Lsr | Mnemonic::Rol | Mnemonic::Ror => {
                AddressingMode::Accumulator
            }
            _ => AddressingMode::Implicit,
        };
    };

    match kind {
        k if k.is_immediate() => AddressingMode::Immediate,
        OperandKind::Direct if mnemonic.is_branch() => AddressingMode::Relative,
        OperandKind::Direct if mnemonic.is_absolute_only() => AddressingMode::Absolute,
        OperandKind::Direct if zero_page => AddressingMode::ZeroPage,
        OperandKind::Direct => AddressingMode::Absolute,
        OperandKind::DirectX if zero_page => AddressingMode::ZeroPageX,
        OperandKind::DirectX => AddressingMode::AbsoluteX,
        OperandKind::DirectY if zero_page && mnemonic.has_zero_page_y() => AddressingMode::ZeroPageY,
        OperandKind::DirectY => AddressingMode::AbsoluteY,
        OperandKind::IndirectX => AddressingMode::IndirectX,
        OperandKind::IndirectY => AddressingMode::IndirectY,
        OperandKind::IndirectAbsolute => AddressingMode::Indirect,
        // Immediate kinds were handled by the guard above.
        _ => AddressingMode::Immediate,
    }
}

/// True if some opcode encodes `mnemonic` in `mode`.
pub fn is_encodable(mnemonic: Mnemonic, mode: AddressingMode) -> bool {
    opcode_for(mnemonic, mode).is_some()
}

/// Byte length of an instruction.
///
/// ```
/// use isa6502::{instruction_size, Mnemonic};
/// use isa6502::operand::OperandKind;
///
/// assert_eq!(instruction_size(Mnemonic::Lda, Some(OperandKind::Direct), true), 2);
/// assert_eq!(instruction_size(Mnemonic::Jsr, Some(OperandKind::Direct), true), 3);
/// assert_eq!(instruction_size(Mnemonic::Lda, Some(OperandKind::DirectY), true), 3);
/// assert_eq!(instruction_size(Mnemonic::Ldx, Some(OperandKind::DirectY), true), 2);
/// assert_eq!(instruction_size(Mnemonic::Rts, None, false), 1);
/// ```
pub fn instruction_size(mnemonic: Mnemonic, kind: Option<OperandKind>, zero_page: bool) -> u8 {
    encoding_mode(mnemonic, kind, zero_page).size_bytes()
}

/// Zero-page eligibility of an operand, resolving labels through
/// `constants`. Unresolved labels are treated as absolute, the way an
/// assembler treats forward references.
pub fn operand_is_zero_page(operand: &Operand, constants: &dyn LabelResolver) -> bool {
    operand
        .target()
        .and_then(|target| target_value(target, constants))
        .is_some_and(is_zero_page)
}

/// Byte length of `mnemonic operand`, resolving zero-page eligibility
/// through `constants`.
pub fn operand_size(mnemonic: Mnemonic, operand: Option<&Operand>, constants: &dyn LabelResolver) -> u8 {
    let zero_page = operand.is_some_and(|op| operand_is_zero_page(op, constants));
    instruction_size(mnemonic, operand.map(Operand::kind), zero_page)
}
