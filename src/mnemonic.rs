//! # Instruction Mnemonics
//!
//! The 56 official NMOS 6502 operations as a closed enum. Parsing is
//! case-insensitive, matching how assembly listings mix `lda` and `LDA`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the 56 canonical 6502 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// Returned when text does not name a known 6502 operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown 6502 mnemonic '{0}'")]
pub struct ParseMnemonicError(pub String);

impl Mnemonic {
    /// Every mnemonic, in alphabetical order.
    pub const ALL: [Mnemonic; 56] = [
        Mnemonic::Adc,
        Mnemonic::And,
        Mnemonic::Asl,
        Mnemonic::Bcc,
        Mnemonic::Bcs,
        Mnemonic::Beq,
        Mnemonic::Bit,
        Mnemonic::Bmi,
        Mnemonic::Bne,
        Mnemonic::Bpl,
        Mnemonic::Brk,
        Mnemonic::Bvc,
        Mnemonic::Bvs,
        Mnemonic::Clc,
        Mnemonic::Cld,
        Mnemonic::Cli,
        Mnemonic::Clv,
        Mnemonic::Cmp,
        Mnemonic::Cpx,
        Mnemonic::Cpy,
        Mnemonic::Dec,
        Mnemonic::Dex,
        Mnemonic::Dey,
        Mnemonic::Eor,
        Mnemonic::Inc,
        Mnemonic::Inx,
        Mnemonic::Iny,
        Mnemonic::Jmp,
        Mnemonic::Jsr,
        Mnemonic::Lda,
        Mnemonic::Ldx,
        Mnemonic::Ldy,
        Mnemonic::Lsr,
        Mnemonic::Nop,
        Mnemonic::Ora,
        Mnemonic::Pha,
        Mnemonic::Php,
        Mnemonic::Pla,
        Mnemonic::Plp,
        Mnemonic::Rol,
        Mnemonic::Ror,
        Mnemonic::Rti,
        Mnemonic::Rts,
        Mnemonic::Sbc,
        Mnemonic::Sec,
        Mnemonic::Sed,
        Mnemonic::Sei,
        Mnemonic::Sta,
        Mnemonic::Stx,
        Mnemonic::Sty,
        Mnemonic::Tax,
        Mnemonic::Tay,
        Mnemonic::Tsx,
        Mnemonic::Txa,
        Mnemonic::Txs,
        Mnemonic::Tya,
    ];

    /// Upper-case assembly spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// Conditional branches, whose operand is always a one-byte relative offset.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bmi
                | Mnemonic::Bne
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
        )
    }

    /// Only LDX and STX can encode `zp,Y`; every other `,Y` form is absolute.
    pub const fn has_zero_page_y(self) -> bool {
        matches!(self, Mnemonic::Ldx | Mnemonic::Stx)
    }

    /// JMP and JSR always take a full 16-bit target.
    pub const fn is_absolute_only(self) -> bool {
        matches!(self, Mnemonic::Jmp | Mnemonic::Jsr)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mnemonic {
    type Err = ParseMnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMnemonicError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("lda".parse::<Mnemonic>().unwrap(), Mnemonic::Lda);
        assert_eq!("Jsr".parse::<Mnemonic>().unwrap(), Mnemonic::Jsr);
        assert_eq!(" TXS ".parse::<Mnemonic>().unwrap(), Mnemonic::Txs);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "XYZ".parse::<Mnemonic>().unwrap_err();
        assert_eq!(err, ParseMnemonicError("XYZ".to_string()));
        assert!("".parse::<Mnemonic>().is_err());
    }

    #[test]
    fn test_display_roundtrips_every_mnemonic() {
        for m in Mnemonic::ALL {
            assert_eq!(m.to_string().parse::<Mnemonic>().unwrap(), m);
        }
    }

    #[test]
    fn test_eight_branches() {
        let branches = Mnemonic::ALL.iter().filter(|m| m.is_branch()).count();
        assert_eq!(branches, 8);
        assert!(!Mnemonic::Jmp.is_branch());
    }
}
