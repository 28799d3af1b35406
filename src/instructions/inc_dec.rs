//! # Increment and Decrement Instructions
//!
//! INC/DEC on memory and INX/INY/DEX/DEY on the index registers. All wrap
//! modulo 256 and update N and Z.

use crate::cpu::CpuState;

pub(crate) fn increment(cpu: &mut CpuState, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    cpu.update_zn(result);
    result
}

pub(crate) fn decrement(cpu: &mut CpuState, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    cpu.update_zn(result);
    result
}

pub(crate) fn inx(cpu: &mut CpuState) {
    let value = cpu.x;
    cpu.x = increment(cpu, value);
}

pub(crate) fn iny(cpu: &mut CpuState) {
    let value = cpu.y;
    cpu.y = increment(cpu, value);
}

pub(crate) fn dex(cpu: &mut CpuState) {
    let value = cpu.x;
    cpu.x = decrement(cpu, value);
}

pub(crate) fn dey(cpu: &mut CpuState) {
    let value = cpu.y;
    cpu.y = decrement(cpu, value);
}
