//! # Control Flow Instructions
//!
//! Stack effects of JSR, RTS, RTI and interrupt entry. Where PC ends up is
//! left to the executor, which knows where the instruction came from.
//!
//! Interrupt entry (NMI, and BRK when configured as a real interrupt):
//! 1. Push the return address (high byte first, then low byte)
//! 2. Push the status byte; B is set for BRK and clear for NMI/IRQ, bit 5
//!    is always set
//! 3. Set the I flag
//! 4. Load PC from the vector

use super::stack::{pull, pull_word, push, push_word};
use crate::cpu::{CpuState, FLAG_B, FLAG_UNUSED};
use crate::memory::MemoryBus;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// JSR: push the address of the JSR's last byte.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut CpuState, memory: &mut M, last_byte: u16) {
    push_word(cpu, memory, last_byte);
}

/// RTS: pull the pushed address and return one past it.
pub(crate) fn rts<M: MemoryBus>(cpu: &mut CpuState, memory: &M) -> u16 {
    pull_word(cpu, memory).wrapping_add(1)
}

/// RTI: pull status, then the return address.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut CpuState, memory: &M) -> u16 {
    let status = pull(cpu, memory);
    cpu.set_status(status);
    pull_word(cpu, memory)
}

/// Enters an interrupt handler and returns the handler address.
pub(crate) fn interrupt<M: MemoryBus>(
    cpu: &mut CpuState,
    memory: &mut M,
    return_address: u16,
    vector: u16,
    software: bool,
) -> u16 {
    push_word(cpu, memory, return_address);
    let status = if software {
        cpu.status() | FLAG_B | FLAG_UNUSED
    } else {
        (cpu.status() & !FLAG_B) | FLAG_UNUSED
    };
    push(cpu, memory, status);
    cpu.flag_i = true;
    memory.read_word(vector)
}
