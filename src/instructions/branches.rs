//! # Branch Instructions
//!
//! Branch conditions are pure functions of the flags. Only the binary
//! stepper applies the relative offset; the symbolic interpreter exposes
//! the predicate and leaves PC to its caller.

use crate::cpu::CpuState;
use crate::mnemonic::Mnemonic;

/// Whether `mnemonic` would branch with the current flags. False for
/// anything that is not a conditional branch.
pub(crate) fn taken(cpu: &CpuState, mnemonic: Mnemonic) -> bool {
    match mnemonic {
        Mnemonic::Bcc => !cpu.flag_c,
        Mnemonic::Bcs => cpu.flag_c,
        Mnemonic::Beq => cpu.flag_z,
        Mnemonic::Bne => !cpu.flag_z,
        Mnemonic::Bmi => cpu.flag_n,
        Mnemonic::Bpl => !cpu.flag_n,
        Mnemonic::Bvc => !cpu.flag_v,
        Mnemonic::Bvs => cpu.flag_v,
        _ => false,
    }
}

/// Target of a taken branch and whether it lands on another page than
/// the instruction that follows the branch.
pub(crate) fn target(next_pc: u16, offset: u8) -> (u16, bool) {
    let target = next_pc.wrapping_add_signed(offset as i8 as i16);
    (target, (next_pc & 0xFF00) != (target & 0xFF00))
}
