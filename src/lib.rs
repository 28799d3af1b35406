//! # NMOS 6502 Instruction-Set Model
//!
//! A 6502 model precise enough to act as a correctness oracle for
//! decompiled NES code: hand-translated routines are validated by running
//! the original instructions here from the same starting state and
//! comparing registers, flags and memory afterwards.
//!
//! ## Quick Start
//!
//! ```rust
//! use isa6502::{Instruction, Interpreter, Mnemonic, Operand};
//!
//! let mut interp = Interpreter::new();
//! interp.cpu_mut().set_flag_d(true);
//! interp.cpu_mut().set_a(0x99);
//!
//! // BCD rollover
//! interp.execute(&Instruction::new(Mnemonic::Adc, Operand::Byte(0x01))).unwrap();
//! assert_eq!(interp.cpu().a(), 0x00);
//! assert!(interp.cpu().flag_c());
//! ```
//!
//! ## Architecture
//!
//! Three pieces share one addressing-mode taxonomy and agree byte for byte:
//!
//! - the **resolver** turns a symbolic [`Operand`] into an immediate value
//!   or an effective address
//! - the **executors** apply instruction semantics: [`Interpreter`] for
//!   decoded instructions, [`Stepper`] for raw bytes at PC
//! - the **size calculator** gives each instruction's encoded length and
//!   drives the [`layout`] pass that assigns label addresses
//!
//! Both executors run the same semantics code, and the size calculator and
//! resolver pick addressing modes through the same
//! [`encoding_mode`](size::encoding_mode), so the three cannot drift apart.
//!
//! ## Modules
//!
//! - `cpu` - registers, flags and status packing
//! - `memory` - `MemoryBus` trait and the hooked 64K `MemoryImage`
//! - `mnemonic`, `addressing`, `opcodes` - the instruction set
//! - `operand` - symbolic operands and instructions
//! - `resolver` - label lookup and effective addresses
//! - `size` - instruction lengths
//! - `interpreter`, `stepper` - the two executors
//! - `decoder` - byte-level decoding
//! - `layout` - label layout, address map and ROM verification
//! - `config` - stepper configuration

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod decoder;
pub mod interpreter;
pub mod layout;
pub mod memory;
pub mod mnemonic;
pub mod opcodes;
pub mod operand;
pub mod resolver;
pub mod size;
pub mod stepper;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{BrkPolicy, RamInit, StepperConfig, NTSC_CYCLES_PER_FRAME};
pub use cpu::{CpuState, STACK_BASE};
pub use decoder::{decode_instruction, DecodedInstruction};
pub use instructions::control::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use interpreter::Interpreter;
pub use memory::{MemoryBus, MemoryDiff, MemoryImage};
pub use mnemonic::{Mnemonic, ParseMnemonicError};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};
pub use operand::{Instruction, Operand, OperandKind, Target};
pub use resolver::{resolve, LabelResolver, NoLabels, Resolved};
pub use size::{instruction_size, operand_size};
pub use stepper::Stepper;

/// Errors that abort symbolic execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// An operand names a label or constant the resolver does not know.
    #[error("unresolved label '{0}'")]
    UnresolvedLabel(String),
}
