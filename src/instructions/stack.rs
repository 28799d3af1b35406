//! # Stack Operations
//!
//! The 6502 stack lives at $0100-$01FF and grows downward. SP is an 8-bit
//! offset into that page and wraps modulo 256 in both directions.

use crate::cpu::{CpuState, FLAG_B, FLAG_UNUSED, STACK_BASE};
use crate::memory::MemoryBus;

/// Writes `value` at 0x0100 | SP, then decrements SP.
pub(crate) fn push<M: MemoryBus>(cpu: &mut CpuState, memory: &mut M, value: u8) {
    memory.write(STACK_BASE | cpu.sp as u16, value);
    cpu.sp = cpu.sp.wrapping_sub(1);
}

/// Increments SP, then reads 0x0100 | SP.
pub(crate) fn pull<M: MemoryBus>(cpu: &mut CpuState, memory: &M) -> u8 {
    cpu.sp = cpu.sp.wrapping_add(1);
    memory.read(STACK_BASE | cpu.sp as u16)
}

/// Pushes high byte then low byte.
pub(crate) fn push_word<M: MemoryBus>(cpu: &mut CpuState, memory: &mut M, value: u16) {
    push(cpu, memory, (value >> 8) as u8);
    push(cpu, memory, value as u8);
}

/// Pulls low byte then high byte.
pub(crate) fn pull_word<M: MemoryBus>(cpu: &mut CpuState, memory: &M) -> u16 {
    let lo = pull(cpu, memory) as u16;
    let hi = pull(cpu, memory) as u16;
    (hi << 8) | lo
}

pub(crate) fn pha<M: MemoryBus>(cpu: &mut CpuState, memory: &mut M) {
    let a = cpu.a;
    push(cpu, memory, a);
}

pub(crate) fn pla<M: MemoryBus>(cpu: &mut CpuState, memory: &M) {
    cpu.a = pull(cpu, memory);
    cpu.update_zn(cpu.a);
}

/// PHP pushes the status byte with bits 4 (B) and 5 set.
pub(crate) fn php<M: MemoryBus>(cpu: &mut CpuState, memory: &mut M) {
    let status = cpu.status() | FLAG_B | FLAG_UNUSED;
    push(cpu, memory, status);
}

/// PLP restores every stored flag; bits 4 and 5 of the pulled byte are ignored.
pub(crate) fn plp<M: MemoryBus>(cpu: &mut CpuState, memory: &M) {
    let status = pull(cpu, memory);
    cpu.set_status(status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryImage;

    #[test]
    fn test_push_pull_wraps_sp() {
        let mut cpu = CpuState::new();
        let mut mem = MemoryImage::new();

        // Zero baseline SP pushes to $0100 and wraps to $FF
        push(&mut cpu, &mut mem, 0x42);
        assert_eq!(mem.read(0x0100), 0x42);
        assert_eq!(cpu.sp(), 0xFF);

        assert_eq!(pull(&mut cpu, &mem), 0x42);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_word_order() {
        let mut cpu = CpuState::new();
        cpu.set_sp(0xFF);
        let mut mem = MemoryImage::new();

        push_word(&mut cpu, &mut mem, 0x1234);
        assert_eq!(mem.read(0x01FF), 0x12);
        assert_eq!(mem.read(0x01FE), 0x34);
        assert_eq!(pull_word(&mut cpu, &mem), 0x1234);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_php_sets_break_and_unused_bits() {
        let mut cpu = CpuState::new();
        cpu.set_sp(0xFF);
        cpu.set_flag_c(true);
        let mut mem = MemoryImage::new();

        php(&mut cpu, &mut mem);
        assert_eq!(mem.read(0x01FF), 0b0011_0001);

        cpu.set_flag_c(false);
        plp(&mut cpu, &mem);
        assert!(cpu.flag_c());
        assert_eq!(cpu.status(), 0b0010_0001);
    }
}
