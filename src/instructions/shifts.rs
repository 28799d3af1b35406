//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR. Each takes the operand byte and returns the
//! shifted byte; the caller writes it back to A or memory.

use crate::cpu::CpuState;

pub(crate) fn asl(cpu: &mut CpuState, value: u8) -> u8 {
    let result = value << 1;
    cpu.flag_c = value & 0x80 != 0;
    cpu.update_zn(result);
    result
}

pub(crate) fn lsr(cpu: &mut CpuState, value: u8) -> u8 {
    let result = value >> 1;
    cpu.flag_c = value & 0x01 != 0;
    cpu.update_zn(result);
    result
}

pub(crate) fn rol(cpu: &mut CpuState, value: u8) -> u8 {
    let result = (value << 1) | cpu.flag_c as u8;
    cpu.flag_c = value & 0x80 != 0;
    cpu.update_zn(result);
    result
}

pub(crate) fn ror(cpu: &mut CpuState, value: u8) -> u8 {
    let result = (value >> 1) | ((cpu.flag_c as u8) << 7);
    cpu.flag_c = value & 0x01 != 0;
    cpu.update_zn(result);
    result
}
