//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! ADC, SBC, AND, ORA, EOR, CMP/CPX/CPY and BIT.
//!
//! ## Decimal mode
//!
//! With D set, ADC and SBC treat each nibble as a base-10 digit. C and Z
//! follow the decimal result. N and V are computed the way the NMOS part
//! computes them (from the intermediate sum for ADC, from the binary
//! difference for SBC); only C and Z are relied upon by callers.

use crate::cpu::CpuState;

/// ADC: A = A + value + C.
pub(crate) fn adc(cpu: &mut CpuState, value: u8) {
    if cpu.flag_d {
        adc_decimal(cpu, value);
    } else {
        adc_binary(cpu, value);
    }
}

fn adc_binary(cpu: &mut CpuState, value: u8) {
    let a = cpu.a;
    let sum = a as u16 + value as u16 + cpu.flag_c as u16;
    let result = sum as u8;

    cpu.flag_c = sum > 0xFF;
    // Both operands share a sign the result does not
    cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.a = result;
    cpu.update_zn(result);
}

fn adc_decimal(cpu: &mut CpuState, value: u8) {
    let a = cpu.a;
    let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + cpu.flag_c as u16;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a >> 4) as u16 + (value >> 4) as u16 + (lo > 0x0F) as u16;

    let intermediate = ((hi << 4) | (lo & 0x0F)) as u8;
    cpu.flag_v = (a ^ intermediate) & (value ^ intermediate) & 0x80 != 0;

    if hi > 0x09 {
        hi += 0x06;
    }
    cpu.flag_c = hi > 0x0F;

    let result = ((hi << 4) | (lo & 0x0F)) as u8;
    cpu.a = result;
    cpu.update_zn(result);
}

/// SBC: A = A - value - (1 - C).
///
/// C and V always come from the binary subtraction, which is exactly
/// `ADC(!value)`. With D set, A receives the BCD-corrected difference.
pub(crate) fn sbc(cpu: &mut CpuState, value: u8) {
    let a = cpu.a;
    let borrow = !cpu.flag_c as i16;
    let diff = a as i16 - value as i16 - borrow;
    let binary = diff as u8;

    cpu.flag_c = diff >= 0;
    cpu.flag_v = (a ^ value) & (a ^ binary) & 0x80 != 0;

    let result = if cpu.flag_d {
        let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
        let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
        if lo < 0 {
            lo -= 0x06;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 0x06;
        }
        (((hi << 4) & 0xF0) | (lo & 0x0F)) as u8
    } else {
        binary
    };

    cpu.a = result;
    cpu.update_zn(result);
}

pub(crate) fn and(cpu: &mut CpuState, value: u8) {
    cpu.a &= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn ora(cpu: &mut CpuState, value: u8) {
    cpu.a |= value;
    cpu.update_zn(cpu.a);
}

pub(crate) fn eor(cpu: &mut CpuState, value: u8) {
    cpu.a ^= value;
    cpu.update_zn(cpu.a);
}

/// CMP/CPX/CPY: flags from `register - value`, register unchanged.
pub(crate) fn compare(cpu: &mut CpuState, register: u8, value: u8) {
    let diff = register.wrapping_sub(value);
    cpu.flag_c = register >= value;
    cpu.flag_z = register == value;
    cpu.flag_n = diff & 0x80 != 0;
}

/// BIT: Z from `A & value`, N and V copied from bits 7 and 6 of `value`.
pub(crate) fn bit(cpu: &mut CpuState, value: u8) {
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
}
