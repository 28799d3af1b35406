//! # Addressing-Mode Resolver
//!
//! Turns a symbolic [`Operand`] into either an immediate byte or an
//! effective address, given the current CPU state, memory and a label
//! resolver.
//!
//! Symbolic operands are first mapped onto the hardware encoding they
//! would assemble to (see [`size::encoding_mode`]). The effective address
//! is then computed by [`effective_address`], the same routine the binary
//! [`Stepper`](crate::Stepper) uses on raw operand bytes. This is what
//! keeps the two executors and the size calculator in agreement.
//!
//! ## Label resolution order
//!
//! 1. `$hex` and `%binary` literals
//! 2. the injected [`LabelResolver`]
//! 3. plain decimal literals
//!
//! Anything else is [`ExecutionError::UnresolvedLabel`].

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::addressing::AddressingMode;
use crate::cpu::CpuState;
use crate::memory::MemoryBus;
use crate::mnemonic::Mnemonic;
use crate::operand::{Operand, Target};
use crate::size;
use crate::ExecutionError;

/// Maps label text to a numeric value.
///
/// Implemented for hash and B-tree maps keyed by `String` and for any
/// `Fn(&str) -> Option<i32>` closure.
///
/// ```
/// use std::collections::HashMap;
/// use isa6502::LabelResolver;
///
/// let mut labels: HashMap<String, i32> = HashMap::new();
/// labels.insert("OperMode".to_string(), 0x0770);
/// assert_eq!(labels.resolve("OperMode"), Some(0x0770));
///
/// let closure = |name: &str| (name == "Zero").then_some(0_i32);
/// assert_eq!(closure.resolve("Zero"), Some(0));
/// ```
pub trait LabelResolver {
    fn resolve(&self, label: &str) -> Option<i32>;
}

impl<S: BuildHasher> LabelResolver for HashMap<String, i32, S> {
    fn resolve(&self, label: &str) -> Option<i32> {
        self.get(label).copied()
    }
}

impl LabelResolver for BTreeMap<String, i32> {
    fn resolve(&self, label: &str) -> Option<i32> {
        self.get(label).copied()
    }
}

impl<F> LabelResolver for F
where
    F: Fn(&str) -> Option<i32>,
{
    fn resolve(&self, label: &str) -> Option<i32> {
        self(label)
    }
}

/// Resolver that knows no labels; only numeric literals resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabels;

impl LabelResolver for NoLabels {
    fn resolve(&self, _label: &str) -> Option<i32> {
        None
    }
}

/// Outcome of resolving an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Value carried by the instruction itself.
    Immediate(u8),
    /// Memory operand.
    Address {
        /// Effective address after indexing and indirection.
        addr: u16,
        /// The operand is encoded as a zero-page byte.
        zero_page: bool,
        /// Hardware encoding the operand assembles to.
        mode: AddressingMode,
    },
}

impl Resolved {
    pub fn mode(&self) -> AddressingMode {
        match self {
            Resolved::Immediate(_) => AddressingMode::Immediate,
            Resolved::Address { mode, .. } => *mode,
        }
    }
}

/// Parses `$hex`, `%binary` or decimal literal text.
///
/// ```
/// use isa6502::resolver::parse_number;
///
/// assert_eq!(parse_number("$FF"), Some(255));
/// assert_eq!(parse_number("%1010"), Some(10));
/// assert_eq!(parse_number("1234"), Some(1234));
/// assert_eq!(parse_number("Label"), None);
/// ```
pub fn parse_number(s: &str) -> Option<i32> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('$') {
        i32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = s.strip_prefix('%') {
        i32::from_str_radix(bin, 2).ok()
    } else if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse::<i32>().ok()
    } else {
        None
    }
}

/// Looks up label text in resolution order, without any offset.
pub fn lookup(label: &str, labels: &dyn LabelResolver) -> Option<i32> {
    let label = label.trim();
    if label.starts_with('$') || label.starts_with('%') {
        return parse_number(label);
    }
    labels.resolve(label).or_else(|| parse_number(label))
}

/// Resolves a target's label and adds its offset. The result is unmasked.
pub fn target_value(target: &Target, labels: &dyn LabelResolver) -> Option<i32> {
    lookup(&target.label, labels).map(|v| v.wrapping_add(target.offset))
}

fn require(label: &str, value: Option<i32>) -> Result<i32, ExecutionError> {
    value.ok_or_else(|| ExecutionError::UnresolvedLabel(label.to_string()))
}

/// True if a resolved value fits in zero page.
pub fn is_zero_page(value: i32) -> bool {
    (0..=0xFF).contains(&value)
}

/// Computes the effective address for a hardware addressing mode.
///
/// `operand` is the raw operand value: a zero-page byte for the
/// one-byte modes, a 16-bit address otherwise. Returns `None` for modes
/// without a memory operand (implied, accumulator, immediate, relative).
///
/// - zero page indexed modes wrap within page zero
/// - `(zp,X)` and `(zp),Y` read their pointer's high byte from
///   `(zp + 1) & 0xFF`
/// - `(abs)` reproduces the NMOS page-wrap bug: a pointer at `$xxFF`
///   takes its high byte from `$xx00`
pub fn effective_address<M: MemoryBus>(
    mode: AddressingMode,
    operand: u16,
    cpu: &CpuState,
    memory: &M,
) -> Option<u16> {
    let zp = operand as u8;
    match mode {
        AddressingMode::ZeroPage => Some(zp as u16),
        AddressingMode::ZeroPageX => Some(zp.wrapping_add(cpu.x) as u16),
        AddressingMode::ZeroPageY => Some(zp.wrapping_add(cpu.y) as u16),
        AddressingMode::Absolute => Some(operand),
        AddressingMode::AbsoluteX => Some(operand.wrapping_add(cpu.x as u16)),
        AddressingMode::AbsoluteY => Some(operand.wrapping_add(cpu.y as u16)),
        AddressingMode::Indirect => Some(indirect_jump_target(memory, operand)),
        AddressingMode::IndirectX => Some(memory.read_zero_page_word(zp.wrapping_add(cpu.x))),
        AddressingMode::IndirectY => {
            Some(memory.read_zero_page_word(zp).wrapping_add(cpu.y as u16))
        }
        AddressingMode::Implicit
        | AddressingMode::Accumulator
        | AddressingMode::Immediate
        | AddressingMode::Relative => None,
    }
}

/// Reads a JMP ($xxxx) target with the page-boundary bug.
pub fn indirect_jump_target<M: MemoryBus>(memory: &M, pointer: u16) -> u16 {
    let lo = memory.read(pointer) as u16;
    let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
    let hi = memory.read(hi_addr) as u16;
    (hi << 8) | lo
}

/// Resolves a symbolic operand for `mnemonic`.
///
/// Indexed operands wrap within zero page exactly when the instruction
/// would assemble to a zero-page indexed opcode, i.e. the base (label plus
/// offset, before indexing) is below $100, and for `,Y` only when the
/// mnemonic is LDX or STX. Otherwise the index is added to a 16-bit base
/// and may carry into the next page.
///
/// # Errors
///
/// [`ExecutionError::UnresolvedLabel`] when a label or constant has no value.
///
/// # Examples
///
/// ```
/// use isa6502::{resolve, CpuState, MemoryImage, Mnemonic, NoLabels, Operand, Resolved};
/// use isa6502::AddressingMode;
///
/// let mut cpu = CpuState::new();
/// cpu.set_x(3);
/// let mem = MemoryImage::new();
///
/// let r = resolve(Mnemonic::Lda, &Operand::direct_x("$FF"), &cpu, &mem, &NoLabels).unwrap();
/// assert_eq!(r, Resolved::Address { addr: 0x02, zero_page: true, mode: AddressingMode::ZeroPageX });
/// ```
pub fn resolve<M: MemoryBus>(
    mnemonic: Mnemonic,
    operand: &Operand,
    cpu: &CpuState,
    memory: &M,
    labels: &dyn LabelResolver,
) -> Result<Resolved, ExecutionError> {
    match operand {
        Operand::Byte(v) => Ok(Resolved::Immediate(*v)),
        Operand::LowByte(v) => Ok(Resolved::Immediate(*v as u8)),
        Operand::HighByte(v) => Ok(Resolved::Immediate((*v >> 8) as u8)),
        Operand::Constant(name) | Operand::ConstantLow(name) => {
            let value = require(name, lookup(name, labels))?;
            Ok(Resolved::Immediate(value as u8))
        }
        Operand::ConstantHigh(name) => {
            let value = require(name, lookup(name, labels))?;
            Ok(Resolved::Immediate((value >> 8) as u8))
        }
        Operand::Direct(target)
        | Operand::DirectX(target)
        | Operand::DirectY(target)
        | Operand::IndirectX(target)
        | Operand::IndirectY(target)
        | Operand::IndirectAbsolute(target) => {
            let base = require(&target.label, target_value(target, labels))?;
            let eligible = is_zero_page(base);
            let mode = size::encoding_mode(mnemonic, Some(operand.kind()), eligible);
            let raw = base as u16;

            let addr = match mode {
                // Branch and jump targets are the address itself.
                AddressingMode::Relative => raw,
                _ => effective_address(mode, raw, cpu, memory).unwrap_or(raw),
            };
            let zero_page = match operand {
                Operand::Direct(_) => eligible,
                _ => matches!(
                    mode,
                    AddressingMode::ZeroPageX
                        | AddressingMode::ZeroPageY
                        | AddressingMode::IndirectX
                        | AddressingMode::IndirectY
                ),
            };

            Ok(Resolved::Address {
                addr,
                zero_page,
                mode,
            })
        }
    }
}
