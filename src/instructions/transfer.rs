//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy a register and update N/Z. TXS copies
//! X into SP and leaves the flags alone.

use crate::cpu::CpuState;
use crate::mnemonic::Mnemonic;

/// Applies a transfer instruction. Returns false if `mnemonic` is not one.
pub(crate) fn apply(cpu: &mut CpuState, mnemonic: Mnemonic) -> bool {
    match mnemonic {
        Mnemonic::Tax => {
            cpu.x = cpu.a;
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Tay => {
            cpu.y = cpu.a;
            cpu.update_zn(cpu.y);
        }
        Mnemonic::Txa => {
            cpu.a = cpu.x;
            cpu.update_zn(cpu.a);
        }
        Mnemonic::Tya => {
            cpu.a = cpu.y;
            cpu.update_zn(cpu.a);
        }
        Mnemonic::Tsx => {
            cpu.x = cpu.sp;
            cpu.update_zn(cpu.x);
        }
        Mnemonic::Txs => cpu.sp = cpu.x,
        _ => return false,
    }
    true
}
