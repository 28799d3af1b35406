//! # Status Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLV, CLD and SED assign one flag and touch nothing
//! else. There is no SEV.

use crate::cpu::CpuState;
use crate::mnemonic::Mnemonic;

/// Applies a flag instruction. Returns false if `mnemonic` is not one.
pub(crate) fn apply(cpu: &mut CpuState, mnemonic: Mnemonic) -> bool {
    match mnemonic {
        Mnemonic::Clc => cpu.flag_c = false,
        Mnemonic::Sec => cpu.flag_c = true,
        Mnemonic::Cli => cpu.flag_i = false,
        Mnemonic::Sei => cpu.flag_i = true,
        Mnemonic::Clv => cpu.flag_v = false,
        Mnemonic::Cld => cpu.flag_d = false,
        Mnemonic::Sed => cpu.flag_d = true,
        _ => return false,
    }
    true
}
