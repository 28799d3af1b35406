//! # Load and Store Instructions
//!
//! Loads set a register and update N/Z. Stores never touch the flags, so
//! they only need to know which register to write out.

use crate::cpu::CpuState;
use crate::mnemonic::Mnemonic;

pub(crate) fn lda(cpu: &mut CpuState, value: u8) {
    cpu.a = value;
    cpu.update_zn(value);
}

pub(crate) fn ldx(cpu: &mut CpuState, value: u8) {
    cpu.x = value;
    cpu.update_zn(value);
}

pub(crate) fn ldy(cpu: &mut CpuState, value: u8) {
    cpu.y = value;
    cpu.update_zn(value);
}

/// Register value written by STA/STX/STY.
pub(crate) fn store_value(cpu: &CpuState, mnemonic: Mnemonic) -> Option<u8> {
    match mnemonic {
        Mnemonic::Sta => Some(cpu.a),
        Mnemonic::Stx => Some(cpu.x),
        Mnemonic::Sty => Some(cpu.y),
        _ => None,
    }
}
