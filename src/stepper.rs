//! # Binary Stepper
//!
//! Fetch-decode-execute over raw bytes at the program counter. Decoding
//! goes through [`OPCODE_TABLE`], operands through the same
//! [`effective_address`] the symbolic resolver uses, and semantics through
//! the shared instruction modules, so the stepper and the
//! [`Interpreter`](crate::Interpreter) cannot disagree on what an
//! instruction does.
//!
//! ## Execution model
//!
//! - [`Stepper::step`]: one instruction, returns the cycles it took
//! - [`Stepper::run_for_cycles`]: steps until a cycle budget is used up
//! - [`Stepper::run_frame`]: NMI, then one frame's worth of cycles
//!
//! Cycle counts are best effort: base cycles from the table, +1 for a
//! taken branch, +1 more if it lands on another page, and +1 for indexed
//! reads that cross a page.
//!
//! ## Interrupts
//!
//! Only NMI is modeled. [`Stepper::trigger_nmi`] arms a latch and
//! [`Stepper::handle_interrupts`] services it unconditionally, since every
//! frame starts a new NMI even if the last handler is still running.
//! Servicing clears the latch and marks the CPU as inside the handler.
//! A latch armed while inside the handler and left for [`Stepper::step`]
//! is taken only after RTI.

use log::{debug, trace, warn};

use crate::addressing::AddressingMode;
use crate::config::{BrkPolicy, StepperConfig};
use crate::cpu::CpuState;
use crate::instructions::control::{self, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::instructions::{self, branches, stack, Access, Effect};
use crate::memory::{MemoryBus, MemoryImage};
use crate::mnemonic::Mnemonic;
use crate::opcodes::OPCODE_TABLE;
use crate::resolver::effective_address;

/// Cycles charged for an undocumented opcode, treated as a NOP.
const ILLEGAL_OPCODE_CYCLES: u32 = 2;

/// Cycles taken to enter an interrupt handler.
const INTERRUPT_CYCLES: u32 = 7;

type JsrHook = Box<dyn FnMut(u16, u16)>;
type ReturnHook = Box<dyn FnMut(u16)>;

#[derive(Default)]
struct Hooks {
    on_jsr: Option<JsrHook>,
    on_rts: Option<ReturnHook>,
    on_rti: Option<ReturnHook>,
    on_nmi: Option<ReturnHook>,
}

/// Executes machine code from memory.
///
/// # Examples
///
/// ```
/// use isa6502::{MemoryBus, MemoryImage, Stepper};
///
/// let mut memory = MemoryImage::new();
/// // LDX #$03; DEX; BNE -3; BRK
/// memory.load_program(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00]);
///
/// let mut stepper = Stepper::new(memory);
/// stepper.cpu_mut().set_pc(0x8000);
/// assert!(stepper.run(1_000));
///
/// assert_eq!(stepper.cpu().x(), 0);
/// assert_eq!(stepper.cpu().pc(), 0x8005);
/// ```
pub struct Stepper<M: MemoryBus = MemoryImage> {
    cpu: CpuState,
    memory: M,
    config: StepperConfig,
    cycles: u64,
    halted: bool,
    nmi_pending: bool,
    in_nmi: bool,
    hooks: Hooks,
}

impl<M: MemoryBus> Stepper<M> {
    /// Zero-baseline CPU with PC at $0000 and the default configuration.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, StepperConfig::default())
    }

    pub fn with_config(memory: M, config: StepperConfig) -> Self {
        Self {
            cpu: CpuState::new(),
            memory,
            config,
            cycles: 0,
            halted: false,
            nmi_pending: false,
            in_nmi: false,
            hooks: Hooks::default(),
        }
    }

    pub fn cpu(&self) -> &CpuState {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CpuState {
        &mut self.cpu
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Total cycles executed since construction or the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// True between servicing an NMI and the RTI that ends its handler.
    pub fn in_nmi(&self) -> bool {
        self.in_nmi
    }

    /// Called as `hook(target, caller)` for every JSR, `caller` being the
    /// address of the JSR opcode.
    pub fn on_jsr(&mut self, hook: impl FnMut(u16, u16) + 'static) {
        self.hooks.on_jsr = Some(Box::new(hook));
    }

    /// Called with the return address after every RTS.
    pub fn on_rts(&mut self, hook: impl FnMut(u16) + 'static) {
        self.hooks.on_rts = Some(Box::new(hook));
    }

    /// Called with the return address after every RTI.
    pub fn on_rti(&mut self, hook: impl FnMut(u16) + 'static) {
        self.hooks.on_rti = Some(Box::new(hook));
    }

    /// Called with the interrupted PC each time an NMI is serviced.
    pub fn on_nmi(&mut self, hook: impl FnMut(u16) + 'static) {
        self.hooks.on_nmi = Some(Box::new(hook));
    }

    /// Executes one instruction and returns the cycles it took.
    ///
    /// Returns 0 without doing anything once halted. Undocumented opcodes
    /// log a warning and behave as one-byte NOPs. A pending NMI is taken
    /// after the instruction unless a handler is still running; its 7
    /// cycles are included in the result.
    pub fn step(&mut self) -> u32 {
        if self.halted {
            return 0;
        }

        let pc = self.cpu.pc;
        let opcode = self.memory.read(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];

        let Some(mnemonic) = metadata.mnemonic else {
            warn!("illegal opcode ${:02X} at ${:04X}; skipped", opcode, pc);
            self.cpu.pc = pc.wrapping_add(1);
            self.cycles += ILLEGAL_OPCODE_CYCLES as u64;
            return ILLEGAL_OPCODE_CYCLES;
        };

        let mode = metadata.addressing_mode;
        let operand = match metadata.size_bytes {
            2 => self.memory.read(pc.wrapping_add(1)) as u16,
            3 => self.memory.read_word(pc.wrapping_add(1)),
            _ => 0,
        };
        let next_pc = pc.wrapping_add(metadata.size_bytes as u16);
        let mut cycles = metadata.base_cycles as u32;

        trace!("{} | {:02X} {} {:?} ${:04X}", self.cpu, opcode, mnemonic, mode, operand);

        let access = match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Relative => {
                Access::Implied
            }
            AddressingMode::Immediate => Access::Immediate(operand as u8),
            _ => {
                let addr = effective_address(mode, operand, &self.cpu, &self.memory).unwrap_or(operand);
                if has_page_penalty(mnemonic) && self.crosses_page(mode, operand, addr) {
                    cycles += 1;
                }
                Access::Memory(addr)
            }
        };

        self.cpu.pc = next_pc;
        match instructions::execute(&mut self.cpu, &mut self.memory, mnemonic, access) {
            Effect::Continue => {}
            Effect::Branch(taken) => {
                if taken {
                    let (target, page_crossed) = branches::target(next_pc, operand as u8);
                    cycles += if page_crossed { 2 } else { 1 };
                    self.cpu.pc = target;
                }
            }
            Effect::Jump(target) => self.cpu.pc = target,
            Effect::Call(target) => {
                control::jsr(&mut self.cpu, &mut self.memory, next_pc.wrapping_sub(1));
                self.cpu.pc = target;
                if let Some(hook) = self.hooks.on_jsr.as_mut() {
                    hook(target, pc);
                }
            }
            Effect::Return(addr) => {
                self.cpu.pc = addr;
                if let Some(hook) = self.hooks.on_rts.as_mut() {
                    hook(addr);
                }
            }
            Effect::ReturnFromInterrupt(addr) => {
                self.cpu.pc = addr;
                self.in_nmi = false;
                if let Some(hook) = self.hooks.on_rti.as_mut() {
                    hook(addr);
                }
            }
            Effect::Break => match self.config.brk {
                BrkPolicy::Halt => {
                    debug!("BRK at ${:04X}: halting", pc);
                    self.cpu.pc = pc;
                    self.halted = true;
                }
                BrkPolicy::Interrupt => {
                    let return_address = pc.wrapping_add(2);
                    self.cpu.pc =
                        control::interrupt(&mut self.cpu, &mut self.memory, return_address, IRQ_VECTOR, true);
                }
            },
        }

        self.cycles += cycles as u64;

        // A trigger raised inside a handler is taken once RTI clears in_nmi
        if self.nmi_pending && !self.in_nmi && !self.halted {
            cycles += self.service_nmi();
        }
        cycles
    }

    /// Indexed and post-indexed operands cost an extra cycle when the
    /// index carries into the next page.
    fn crosses_page(&self, mode: AddressingMode, operand: u16, addr: u16) -> bool {
        let base = match mode {
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => operand,
            AddressingMode::IndirectY => self.memory.read_zero_page_word(operand as u8),
            _ => return false,
        };
        (base & 0xFF00) != (addr & 0xFF00)
    }

    /// Steps until at least `cycle_budget` cycles have run or the CPU
    /// halts. Returns the cycles actually consumed, which may overshoot the
    /// budget by part of one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> u64 {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles && !self.halted {
            self.step();
        }

        self.cycles - start_cycles
    }

    /// Runs until BRK halts the CPU, giving up after `max_cycles`.
    /// Returns whether the CPU halted.
    pub fn run(&mut self, max_cycles: u64) -> bool {
        self.run_for_cycles(max_cycles);
        self.halted
    }

    /// Arms the NMI latch.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Services a pending NMI, returning the cycles taken (0 if the latch
    /// was not armed).
    ///
    /// Pushes PC and status (B clear), sets I, and jumps through $FFFA.
    /// The latch is cleared, so the same trigger never fires twice. This is
    /// the frame driver's entry point: it services the NMI even when the
    /// previous frame's handler has not reached RTI yet (a lag frame).
    pub fn handle_interrupts(&mut self) -> u32 {
        if !self.nmi_pending {
            return 0;
        }
        self.service_nmi()
    }

    fn service_nmi(&mut self) -> u32 {
        let interrupted = self.cpu.pc;
        self.nmi_pending = false;
        self.in_nmi = true;
        self.halted = false;
        self.cpu.pc = control::interrupt(&mut self.cpu, &mut self.memory, interrupted, NMI_VECTOR, false);
        debug!("NMI from ${:04X} to ${:04X}", interrupted, self.cpu.pc);

        if let Some(hook) = self.hooks.on_nmi.as_mut() {
            hook(interrupted);
        }

        self.cycles += INTERRUPT_CYCLES as u64;
        INTERRUPT_CYCLES
    }

    /// One video frame: trigger and service an NMI, then run the configured
    /// per-frame cycle budget. Returns the cycles consumed.
    pub fn run_frame(&mut self) -> u64 {
        self.trigger_nmi();
        let entry = self.handle_interrupts() as u64;
        entry + self.run_for_cycles(self.config.cycles_per_frame)
    }

    pub fn push_word(&mut self, value: u16) {
        stack::push_word(&mut self.cpu, &mut self.memory, value);
    }

    pub fn pull_word(&mut self) -> u16 {
        stack::pull_word(&mut self.cpu, &self.memory)
    }

    /// Zero-baseline CPU, cycle counter and interrupt latches cleared.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.cycles = 0;
        self.halted = false;
        self.nmi_pending = false;
        self.in_nmi = false;
    }

    /// [`Stepper::reset`], then PC from the reset vector at $FFFC.
    pub fn reset_to_vector(&mut self) {
        self.reset();
        self.cpu.pc = self.memory.read_word(RESET_VECTOR);
    }
}

impl Stepper<MemoryImage> {
    /// Resets the CPU and refills internal RAM using the configured
    /// [`RamInit`](crate::RamInit) pattern.
    pub fn reset_all(&mut self) {
        self.reset();
        self.memory.reset_with(self.config.ram_init);
    }
}

/// Read instructions that pay the page-crossing cycle.
fn has_page_penalty(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::Lda
            | Mnemonic::Ldx
            | Mnemonic::Ldy
            | Mnemonic::Adc
            | Mnemonic::Sbc
            | Mnemonic::And
            | Mnemonic::Ora
            | Mnemonic::Eor
            | Mnemonic::Cmp
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_stepper(program: &[u8]) -> Stepper {
        let mut memory = MemoryImage::new();
        memory.load_program(0x8000, program);
        let mut stepper = Stepper::new(memory);
        stepper.cpu_mut().set_pc(0x8000);
        stepper.cpu_mut().set_sp(0xFF);
        stepper
    }

    #[test]
    fn test_step_advances_pc_and_cycles() {
        let mut stepper = setup_stepper(&[0xA9, 0x42, 0x8D, 0x00, 0x02]);

        assert_eq!(stepper.step(), 2);
        assert_eq!(stepper.cpu().a(), 0x42);
        assert_eq!(stepper.cpu().pc(), 0x8002);

        assert_eq!(stepper.step(), 4);
        assert_eq!(stepper.memory().read(0x0200), 0x42);
        assert_eq!(stepper.cycles(), 6);
    }

    #[test]
    fn test_page_cross_penalty() {
        // LDA $80FF,X with X=1
        let mut stepper = setup_stepper(&[0xBD, 0xFF, 0x80]);
        stepper.cpu_mut().set_x(1);
        assert_eq!(stepper.step(), 5);

        // STA $80FF,X has no penalty
        let mut stepper = setup_stepper(&[0x9D, 0xFF, 0x80]);
        stepper.cpu_mut().set_x(1);
        assert_eq!(stepper.step(), 5);
    }

    #[test]
    fn test_branch_cycles() {
        // BNE +2 taken, same page
        let mut stepper = setup_stepper(&[0xD0, 0x02]);
        assert_eq!(stepper.step(), 3);
        assert_eq!(stepper.cpu().pc(), 0x8004);

        // BEQ not taken
        let mut stepper = setup_stepper(&[0xF0, 0x02]);
        assert_eq!(stepper.step(), 2);
        assert_eq!(stepper.cpu().pc(), 0x8002);
    }

    #[test]
    fn test_illegal_opcode_is_skipped() {
        let mut stepper = setup_stepper(&[0x02, 0xEA]);
        assert_eq!(stepper.step(), 2);
        assert_eq!(stepper.cpu().pc(), 0x8001);
        assert!(!stepper.halted());
    }

    #[test]
    fn test_halted_step_is_noop() {
        let mut stepper = setup_stepper(&[0x00, 0xEA]);
        stepper.step();
        assert!(stepper.halted());
        assert_eq!(stepper.cpu().pc(), 0x8000);
        assert_eq!(stepper.step(), 0);
    }
}
