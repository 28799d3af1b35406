//! # Symbolic Instruction Executor
//!
//! Runs decoded [`Instruction`]s (mnemonic plus symbolic operand) against a
//! [`CpuState`] and a memory bus. This is the oracle side of decompiler
//! validation: hand-translated code and the original instructions run from
//! the same starting state, and their final states are compared.
//!
//! ## Program counter
//!
//! The interpreter does not fetch, so it does not advance PC on ordinary
//! instructions. Control transfers do set PC:
//!
//! - JMP loads the (possibly indirect) target
//! - JSR pushes `PC + 2` (the address of its last byte, with PC taken as
//!   the address of the JSR itself) and loads the target
//! - RTS and RTI restore PC from the stack
//! - branches only report whether they would be taken, via
//!   [`Interpreter::should_branch`]
//!
//! BRK sets [`Interpreter::halted`]; every later call to `execute` is a
//! no-op until [`Interpreter::reset`].

use log::{debug, trace, warn};

use crate::addressing::AddressingMode;
use crate::cpu::CpuState;
use crate::instructions::{self, branches, control, stack, Access, Effect};
use crate::memory::{MemoryBus, MemoryImage};
use crate::operand::Instruction;
use crate::resolver::{resolve, LabelResolver, NoLabels, Resolved};
use crate::size::{encoding_mode, is_encodable};
use crate::ExecutionError;

/// Executor for symbolic instructions.
///
/// # Examples
///
/// ```
/// use isa6502::{Instruction, Interpreter, Mnemonic, Operand};
///
/// let mut interp = Interpreter::new();
/// interp.execute(&Instruction::new(Mnemonic::Lda, Operand::Byte(0xFF))).unwrap();
/// interp.execute(&Instruction::implied(Mnemonic::Clc)).unwrap();
/// interp.execute(&Instruction::new(Mnemonic::Adc, Operand::Byte(0x01))).unwrap();
///
/// assert_eq!(interp.cpu().a(), 0x00);
/// assert!(interp.cpu().flag_c());
/// assert!(interp.cpu().flag_z());
/// ```
pub struct Interpreter<M: MemoryBus = MemoryImage> {
    pub(crate) cpu: CpuState,
    pub(crate) memory: M,
    pub(crate) halted: bool,
    labels: Box<dyn LabelResolver>,
}

impl Interpreter<MemoryImage> {
    /// Zeroed CPU, empty 64K memory, numeric labels only.
    pub fn new() -> Self {
        Self::with_memory(MemoryImage::new())
    }
}

impl Default for Interpreter<MemoryImage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MemoryBus> Interpreter<M> {
    pub fn with_memory(memory: M) -> Self {
        Self {
            cpu: CpuState::new(),
            memory,
            halted: false,
            labels: Box::new(NoLabels),
        }
    }

    /// Injects the label resolver used for every later operand.
    pub fn with_labels(mut self, labels: impl LabelResolver + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn set_labels(&mut self, labels: impl LabelResolver + 'static) {
        self.labels = Box::new(labels);
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

    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::UnresolvedLabel`] if the operand names a label the
    /// resolver does not know. State is untouched in that case.
    ///
    /// A mnemonic paired with an operand it has no encoding for (e.g.
    /// `STA #$10`) logs a warning and changes nothing.
    pub fn execute(&mut self, instruction: &Instruction) -> Result<(), ExecutionError> {
        if self.halted {
            return Ok(());
        }

        let mnemonic = instruction.mnemonic;
        trace!("{} | {}", self.cpu, instruction);

        // Branches never move PC here, so their targets need not resolve.
        if mnemonic.is_branch() {
            return Ok(());
        }

        let Some(access) = self.access(instruction)? else {
            return Ok(());
        };

        match instructions::execute(&mut self.cpu, &mut self.memory, mnemonic, access) {
            Effect::Continue | Effect::Branch(_) => {}
            Effect::Jump(target) => self.cpu.pc = target,
            Effect::Call(target) => {
                let last_byte = self.cpu.pc.wrapping_add(2);
                control::jsr(&mut self.cpu, &mut self.memory, last_byte);
                self.cpu.pc = target;
            }
            Effect::Return(addr) | Effect::ReturnFromInterrupt(addr) => self.cpu.pc = addr,
            Effect::Break => {
                debug!("BRK at ${:04X}: halting", self.cpu.pc);
                self.halted = true;
            }
        }
        Ok(())
    }

    /// Executes instructions in order until one fails or BRK halts.
    pub fn execute_all<'a, I>(&mut self, instructions: I) -> Result<(), ExecutionError>
    where
        I: IntoIterator<Item = &'a Instruction>,
    {
        for instruction in instructions {
            if self.halted {
                break;
            }
            self.execute(instruction)?;
        }
        Ok(())
    }

    /// Resolves the operand and checks that an opcode encodes it.
    fn access(&self, instruction: &Instruction) -> Result<Option<Access>, ExecutionError> {
        let mnemonic = instruction.mnemonic;
        let (mode, access) = match &instruction.operand {
            None => (encoding_mode(mnemonic, None, false), Access::Implied),
            Some(operand) => {
                match resolve(mnemonic, operand, &self.cpu, &self.memory, self.labels.as_ref())? {
                    Resolved::Immediate(value) => (AddressingMode::Immediate, Access::Immediate(value)),
                    Resolved::Address { addr, mode, .. } => (mode, Access::Memory(addr)),
                }
            }
        };

        if !is_encodable(mnemonic, mode) {
            warn!("{} has no {:?} encoding; treated as no-op", instruction, mode);
            return Ok(None);
        }
        Ok(Some(access))
    }

    /// Whether a branch instruction would be taken with the current flags.
    /// Always false for non-branches.
    pub fn should_branch(&self, instruction: &Instruction) -> bool {
        branches::taken(&self.cpu, instruction.mnemonic)
    }

    pub fn push_word(&mut self, value: u16) {
        stack::push_word(&mut self.cpu, &mut self.memory, value);
    }

    pub fn pull_word(&mut self) -> u16 {
        stack::pull_word(&mut self.cpu, &self.memory)
    }

    /// Back to the zero-baseline CPU with the halted flag cleared.
    ///
    /// Memory is left alone; reset it through [`Interpreter::memory_mut`]
    /// if needed.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.halted = false;
    }
}

impl Interpreter<MemoryImage> {
    /// Resets the CPU and clears internal RAM ($0000-$07FF).
    pub fn reset_all(&mut self) {
        self.reset();
        self.memory.reset();
    }
}
