//! # Symbolic Operands
//!
//! An upstream assembly parser hands the executor an [`Instruction`]: a
//! mnemonic plus an optional [`Operand`]. Operands keep label text
//! unresolved so the same instruction can be sized during layout (where
//! forward references are unknown) and executed later (where every label
//! must resolve).
//!
//! `None` as the operand means implied or accumulator addressing; which of
//! the two is decided by the mnemonic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mnemonic::Mnemonic;

/// A label reference with an optional literal offset, as in `Table+1`.
///
/// The label may itself be a numeric literal (`$0200`, `%0101`, `16`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub label: String,
    #[serde(default)]
    pub offset: i32,
}

impl Target {
    pub fn new(label: impl Into<String>, offset: i32) -> Self {
        Self {
            label: label.into(),
            offset,
        }
    }

    /// Splits `Name+3` / `Name-1` into base label and offset.
    ///
    /// Text after the first `+` or `-` that is not a decimal (or `$hex`)
    /// number is kept as part of the label.
    ///
    /// ```
    /// use isa6502::operand::Target;
    ///
    /// assert_eq!(Target::parse("Enemy_X+1"), Target::new("Enemy_X", 1));
    /// assert_eq!(Target::parse("Table-$10"), Target::new("Table", -16));
    /// assert_eq!(Target::parse("$0200"), Target::new("$0200", 0));
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        // Skip index 0 so a leading sign stays part of the label text.
        if let Some(split) = text.char_indices().skip(1).find(|(_, c)| *c == '+' || *c == '-') {
            let (label, rest) = text.split_at(split.0);
            let magnitude = match rest[1..].trim() {
                hex if hex.starts_with('$') => i32::from_str_radix(&hex[1..], 16).ok(),
                dec => dec.parse::<i32>().ok(),
            };
            if let Some(magnitude) = magnitude {
                let offset = if rest.starts_with('-') { magnitude.wrapping_neg() } else { magnitude };
                return Self::new(label.trim(), offset);
            }
        }
        Self::new(text, 0)
    }
}

impl From<&str> for Target {
    fn from(text: &str) -> Self {
        Target::parse(text)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => write!(f, "{}", self.label),
            o if o > 0 => write!(f, "{}+{}", self.label, o),
            o => write!(f, "{}{}", self.label, o),
        }
    }
}

/// Symbolic operand of a decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// `#$42`
    Byte(u8),
    /// `#<$1234`: low byte of a 16-bit literal.
    LowByte(u16),
    /// `#>$1234`: high byte of a 16-bit literal.
    HighByte(u16),
    /// `Label`: zero page or absolute, decided by the resolved value.
    Direct(Target),
    /// `Label,X`
    DirectX(Target),
    /// `Label,Y`
    DirectY(Target),
    /// `(Label,X)`
    IndirectX(Target),
    /// `(Label),Y`
    IndirectY(Target),
    /// `(Label)`, JMP only.
    IndirectAbsolute(Target),
    /// `#CONSTANT`
    Constant(String),
    /// `#<CONSTANT`
    ConstantLow(String),
    /// `#>CONSTANT`
    ConstantHigh(String),
}

/// Payload-free discriminant of [`Operand`], all the size calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandKind {
    Byte,
    LowByte,
    HighByte,
    Direct,
    DirectX,
    DirectY,
    IndirectX,
    IndirectY,
    IndirectAbsolute,
    Constant,
    ConstantLow,
    ConstantHigh,
}

impl OperandKind {
    /// Immediate-family kinds never touch memory.
    pub const fn is_immediate(self) -> bool {
        matches!(
            self,
            OperandKind::Byte
                | OperandKind::LowByte
                | OperandKind::HighByte
                | OperandKind::Constant
                | OperandKind::ConstantLow
                | OperandKind::ConstantHigh
        )
    }
}

impl Operand {
    pub fn direct(target: impl Into<Target>) -> Self {
        Operand::Direct(target.into())
    }

    pub fn direct_x(target: impl Into<Target>) -> Self {
        Operand::DirectX(target.into())
    }

    pub fn direct_y(target: impl Into<Target>) -> Self {
        Operand::DirectY(target.into())
    }

    pub fn indirect_x(target: impl Into<Target>) -> Self {
        Operand::IndirectX(target.into())
    }

    pub fn indirect_y(target: impl Into<Target>) -> Self {
        Operand::IndirectY(target.into())
    }

    pub fn indirect(target: impl Into<Target>) -> Self {
        Operand::IndirectAbsolute(target.into())
    }

    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Byte(_) => OperandKind::Byte,
            Operand::LowByte(_) => OperandKind::LowByte,
            Operand::HighByte(_) => OperandKind::HighByte,
            Operand::Direct(_) => OperandKind::Direct,
            Operand::DirectX(_) => OperandKind::DirectX,
            Operand::DirectY(_) => OperandKind::DirectY,
            Operand::IndirectX(_) => OperandKind::IndirectX,
            Operand::IndirectY(_) => OperandKind::IndirectY,
            Operand::IndirectAbsolute(_) => OperandKind::IndirectAbsolute,
            Operand::Constant(_) => OperandKind::Constant,
            Operand::ConstantLow(_) => OperandKind::ConstantLow,
            Operand::ConstantHigh(_) => OperandKind::ConstantHigh,
        }
    }

    /// The label-bearing target, if this operand refers to memory.
    pub fn target(&self) -> Option<&Target> {
        match self {
            Operand::Direct(t)
            | Operand::DirectX(t)
            | Operand::DirectY(t)
            | Operand::IndirectX(t)
            | Operand::IndirectY(t)
            | Operand::IndirectAbsolute(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Byte(v) => write!(f, "#${:02X}", v),
            Operand::LowByte(v) => write!(f, "#<${:04X}", v),
            Operand::HighByte(v) => write!(f, "#>${:04X}", v),
            Operand::Direct(t) => write!(f, "{}", t),
            Operand::DirectX(t) => write!(f, "{},X", t),
            Operand::DirectY(t) => write!(f, "{},Y", t),
            Operand::IndirectX(t) => write!(f, "({},X)", t),
            Operand::IndirectY(t) => write!(f, "({}),Y", t),
            Operand::IndirectAbsolute(t) => write!(f, "({})", t),
            Operand::Constant(name) => write!(f, "#{}", name),
            Operand::ConstantLow(name) => write!(f, "#<{}", name),
            Operand::ConstantHigh(name) => write!(f, "#>{}", name),
        }
    }
}

/// A decoded instruction: mnemonic plus optional operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    #[serde(default)]
    pub operand: Option<Operand>,
}

impl Instruction {
    /// Instruction with implied or accumulator addressing.
    pub fn implied(mnemonic: Mnemonic) -> Self {
        Self {
            mnemonic,
            operand: None,
        }
    }

    pub fn new(mnemonic: Mnemonic, operand: Operand) -> Self {
        Self {
            mnemonic,
            operand: Some(operand),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{} {}", self.mnemonic, operand),
            None => write!(f, "{}", self.mnemonic),
        }
    }
}
