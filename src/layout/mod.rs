//! # Address Layout
//!
//! A single linear pass over parsed program lines that assigns every label
//! the address a real assembler would give it. Instruction lengths come
//! from the [size calculator](crate::size), so the resulting
//! [`AddressMap`] can be checked byte for byte against a ROM image with
//! [`verify_rom`].
//!
//! ## Rules
//!
//! - lines before the first `.org` are ignored
//! - `.org $addr` moves the cursor; a malformed address skips the line
//! - a label is recorded on its first definition only, and only if it
//!   starts with a letter
//! - `.db` counts one byte per value and one byte per string character;
//!   `.dw` counts two bytes per value
//! - zero-page eligibility is decided by the constant table alone, so a
//!   reference to a code label always takes the absolute encoding
//!
//! ```
//! use isa6502::layout::{layout, ProgramLine};
//! use isa6502::{Instruction, Mnemonic, Operand};
//!
//! let lines = vec![
//!     ProgramLine::constant("PlayerX", "$86"),
//!     ProgramLine::org("$8000"),
//!     ProgramLine::label("Reset"),
//!     ProgramLine::instruction(Instruction::new(Mnemonic::Lda, Operand::direct("PlayerX"))),
//!     ProgramLine::label("Loop"),
//! ];
//!
//! let laid_out = layout(&lines);
//! assert_eq!(laid_out.symbols.address_of("Reset"), Some(0x8000));
//! assert_eq!(laid_out.symbols.address_of("Loop"), Some(0x8002));
//! ```

mod address_map;
mod verify;

pub use address_map::AddressMap;
pub use verify::{verify_rom, RomMismatch};

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::operand::{Instruction, Target};
use crate::resolver::{parse_number, target_value};
use crate::size::operand_size;

/// One item of a `.db` / `.dw` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataItem {
    /// Number, label or expression; its value does not affect layout.
    Value(String),
    /// Quoted string, one byte per character.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Data {
    Bytes(Vec<DataItem>),
    Words(Vec<DataItem>),
}

impl Data {
    pub fn size(&self) -> u16 {
        let total: usize = match self {
            Data::Bytes(items) => items
                .iter()
                .map(|item| match item {
                    DataItem::Value(_) => 1,
                    DataItem::Text(text) => text.len(),
                })
                .sum(),
            Data::Words(items) => items.len() * 2,
        };
        total as u16
    }
}

/// A line of parsed program text. Every part is optional; a line may
/// carry a label together with an instruction, for example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramLine {
    pub label: Option<String>,
    pub instruction: Option<Instruction>,
    pub data: Option<Data>,
    /// Operand text of a `.org` directive.
    pub org: Option<String>,
    /// `NAME = value` definition.
    pub constant: Option<(String, String)>,
}

impl ProgramLine {
    pub fn label(name: impl Into<String>) -> Self {
        Self {
            label: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn instruction(instruction: Instruction) -> Self {
        Self {
            instruction: Some(instruction),
            ..Self::default()
        }
    }

    pub fn data(data: Data) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn org(address: impl Into<String>) -> Self {
        Self {
            org: Some(address.into()),
            ..Self::default()
        }
    }

    pub fn constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            constant: Some((name.into(), value.into())),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, name: impl Into<String>) -> Self {
        self.label = Some(name.into());
        self
    }
}

/// An instruction placed at a concrete address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedInstruction {
    pub address: u16,
    pub size: u8,
    pub instruction: Instruction,
}

/// Result of [`layout`].
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub symbols: AddressMap,
    pub instructions: Vec<PlacedInstruction>,
    pub constants: HashMap<String, i32>,
}

/// Collects `NAME = value` lines, in order, into a constant table.
///
/// A value may be a numeric literal or the name of an earlier constant.
/// Values that resolve to neither are left out, so operands using them
/// take the absolute encoding.
pub fn constant_table(lines: &[ProgramLine]) -> HashMap<String, i32> {
    let mut constants: HashMap<String, i32> = HashMap::new();
    for (name, value) in lines.iter().filter_map(|line| line.constant.as_ref()) {
        match target_value(&Target::parse(value), &constants) {
            Some(resolved) => {
                constants.insert(name.clone(), resolved);
            }
            None => warn!("constant {} = {} does not resolve", name, value),
        }
    }
    constants
}

/// Lays out `lines` and returns the label table and instruction addresses.
pub fn layout(lines: &[ProgramLine]) -> Layout {
    let constants = constant_table(lines);
    let mut symbols = AddressMap::new();
    let mut instructions = Vec::new();
    let mut cursor: Option<u16> = None;

    for line in lines {
        if let Some(org) = &line.org {
            match parse_number(org.trim()) {
                Some(addr) => {
                    debug!(".org ${:04X}", addr as u16);
                    cursor = Some(addr as u16);
                }
                None => {
                    warn!("malformed .org operand '{}'; line skipped", org);
                    continue;
                }
            }
        }

        let Some(address) = cursor else {
            continue;
        };

        if let Some(label) = &line.label {
            let name = Target::parse(label).label;
            if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                symbols.insert(name, address);
            }
        }

        let mut size = 0u16;
        if let Some(instruction) = &line.instruction {
            let length = operand_size(instruction.mnemonic, instruction.operand.as_ref(), &constants);
            instructions.push(PlacedInstruction {
                address,
                size: length,
                instruction: instruction.clone(),
            });
            size = size.wrapping_add(length as u16);
        }
        if let Some(data) = &line.data {
            size = size.wrapping_add(data.size());
        }

        cursor = Some(address.wrapping_add(size));
    }

    Layout {
        symbols,
        instructions,
        constants,
    }
}
