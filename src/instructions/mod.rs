//! # 6502 Instruction Semantics
//!
//! Register, flag and memory effects of every operation, shared by the
//! symbolic [`Interpreter`](crate::Interpreter) and the binary
//! [`Stepper`](crate::Stepper). Operand decoding and PC handling stay in
//! the executors; [`execute`] receives an already-resolved [`Access`] and
//! reports control transfers back as an [`Effect`].
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: branch predicates and relative targets
//! - **control**: JSR/RTS/RTI stack effects, interrupt entry
//! - **flags**: CLC, SEC, CLI, SEI, CLV, CLD, SED
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **stack**: PHA, PLA, PHP, PLP
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::cpu::CpuState;
use crate::memory::MemoryBus;
use crate::mnemonic::Mnemonic;

/// Where an instruction's operand lives once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// No operand, or the accumulator for shifts.
    Implied,
    Immediate(u8),
    Memory(u16),
}

/// Control-flow outcome the executor must apply to PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    Continue,
    Jump(u16),
    /// JSR to the target; the executor pushes the return address.
    Call(u16),
    /// RTS/RTI already pulled their return address.
    Return(u16),
    ReturnFromInterrupt(u16),
    Break,
    Branch(bool),
}

fn read_value<M: MemoryBus>(memory: &M, access: Access) -> Option<u8> {
    match access {
        Access::Implied => None,
        Access::Immediate(value) => Some(value),
        Access::Memory(addr) => Some(memory.read(addr)),
    }
}

/// Read-modify-write on the accumulator or a memory byte.
fn modify<M: MemoryBus>(
    cpu: &mut CpuState,
    memory: &mut M,
    access: Access,
    op: fn(&mut CpuState, u8) -> u8,
) {
    match access {
        Access::Implied => {
            let a = cpu.a;
            cpu.a = op(cpu, a);
        }
        Access::Memory(addr) => {
            let value = memory.read(addr);
            let result = op(cpu, value);
            memory.write(addr, result);
        }
        Access::Immediate(_) => {}
    }
}

/// Operations that consume an operand byte.
fn apply_read(cpu: &mut CpuState, mnemonic: Mnemonic, value: u8) {
    let (a, x, y) = (cpu.a, cpu.x, cpu.y);
    match mnemonic {
        Mnemonic::Lda => load_store::lda(cpu, value),
        Mnemonic::Ldx => load_store::ldx(cpu, value),
        Mnemonic::Ldy => load_store::ldy(cpu, value),
        Mnemonic::Adc => alu::adc(cpu, value),
        Mnemonic::Sbc => alu::sbc(cpu, value),
        Mnemonic::And => alu::and(cpu, value),
        Mnemonic::Ora => alu::ora(cpu, value),
        Mnemonic::Eor => alu::eor(cpu, value),
        Mnemonic::Cmp => alu::compare(cpu, a, value),
        Mnemonic::Cpx => alu::compare(cpu, x, value),
        Mnemonic::Cpy => alu::compare(cpu, y, value),
        Mnemonic::Bit => alu::bit(cpu, value),
        _ => {}
    }
}

/// Applies `mnemonic` to the CPU and memory.
///
/// Callers check beforehand that the mnemonic/operand pairing exists in the
/// opcode table; an `Access` that does not fit the operation is ignored.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CpuState,
    memory: &mut M,
    mnemonic: Mnemonic,
    access: Access,
) -> Effect {
    use Mnemonic::*;

    match mnemonic {
        Lda | Ldx | Ldy | Adc | Sbc | And | Ora | Eor | Cmp | Cpx | Cpy | Bit => {
            if let Some(value) = read_value(memory, access) {
                apply_read(cpu, mnemonic, value);
            }
        }
        Sta | Stx | Sty => {
            if let (Access::Memory(addr), Some(value)) = (access, load_store::store_value(cpu, mnemonic)) {
                memory.write(addr, value);
            }
        }
        Inc => modify(cpu, memory, access, inc_dec::increment),
        Dec => modify(cpu, memory, access, inc_dec::decrement),
        Inx => inc_dec::inx(cpu),
        Iny => inc_dec::iny(cpu),
        Dex => inc_dec::dex(cpu),
        Dey => inc_dec::dey(cpu),
        Asl => modify(cpu, memory, access, shifts::asl),
        Lsr => modify(cpu, memory, access, shifts::lsr),
        Rol => modify(cpu, memory, access, shifts::rol),
        Ror => modify(cpu, memory, access, shifts::ror),
        Pha => stack::pha(cpu, memory),
        Pla => stack::pla(cpu, memory),
        Php => stack::php(cpu, memory),
        Plp => stack::plp(cpu, memory),
        Jmp => {
            if let Access::Memory(target) = access {
                return Effect::Jump(target);
            }
        }
        Jsr => {
            if let Access::Memory(target) = access {
                return Effect::Call(target);
            }
        }
        Rts => return Effect::Return(control::rts(cpu, memory)),
        Rti => return Effect::ReturnFromInterrupt(control::rti(cpu, memory)),
        Brk => return Effect::Break,
        Nop => {}
        m if m.is_branch() => return Effect::Branch(branches::taken(cpu, m)),
        m => {
            // Remaining implied operations: transfers and flag changes.
            let _ = transfer::apply(cpu, m) || flags::apply(cpu, m);
        }
    }
    Effect::Continue
}
