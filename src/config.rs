//! Stepper configuration.
//!
//! Harnesses usually load this from a JSON or TOML file next to their test
//! captures, so every field has a default and can be omitted.

use serde::{Deserialize, Serialize};

/// CPU cycles in one NTSC frame (1,789,773 Hz / 60.0988 Hz).
pub const NTSC_CYCLES_PER_FRAME: u64 = 29_780;

/// What the stepper does when it decodes BRK ($00).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrkPolicy {
    /// Set the halted flag and stop. BRK is an end-of-capture sentinel.
    #[default]
    Halt,
    /// Full software interrupt: push PC+2 and status with B set, set I,
    /// load PC from $FFFE/$FFFF.
    Interrupt,
}

/// Power-on contents of internal RAM ($0000-$07FF).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RamInit {
    /// All bytes zero.
    #[default]
    Zero,
    /// Four bytes of $00 then four bytes of $FF, repeating. Matches the
    /// pattern FCEUX uses, which replay captures depend on.
    Fceux,
}

impl RamInit {
    /// Byte this pattern places at `addr`.
    pub const fn byte_at(self, addr: u16) -> u8 {
        match self {
            RamInit::Zero => 0x00,
            RamInit::Fceux => {
                if addr & 0x04 == 0 {
                    0x00
                } else {
                    0xFF
                }
            }
        }
    }
}

/// Binary stepper configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepperConfig {
    #[serde(default)]
    pub brk: BrkPolicy,
    #[serde(default = "default_cycles_per_frame")]
    pub cycles_per_frame: u64,
    #[serde(default)]
    pub ram_init: RamInit,
}

fn default_cycles_per_frame() -> u64 {
    NTSC_CYCLES_PER_FRAME
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            brk: BrkPolicy::default(),
            cycles_per_frame: NTSC_CYCLES_PER_FRAME,
            ram_init: RamInit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StepperConfig::default();
        assert_eq!(config.brk, BrkPolicy::Halt);
        assert_eq!(config.cycles_per_frame, 29_780);
        assert_eq!(config.ram_init, RamInit::Zero);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: StepperConfig = serde_json::from_str(r#"{ "brk": "interrupt" }"#).unwrap();
        assert_eq!(config.brk, BrkPolicy::Interrupt);
        assert_eq!(config.cycles_per_frame, NTSC_CYCLES_PER_FRAME);

        let config: StepperConfig =
            serde_json::from_str(r#"{ "cycles_per_frame": 100, "ram_init": "fceux" }"#).unwrap();
        assert_eq!(config.brk, BrkPolicy::Halt);
        assert_eq!(config.cycles_per_frame, 100);
        assert_eq!(config.ram_init, RamInit::Fceux);
    }

    #[test]
    fn test_fceux_pattern() {
        let bytes: Vec<u8> = (0..8).map(|a| RamInit::Fceux.byte_at(a)).collect();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(RamInit::Zero.byte_at(0x0004), 0x00);
    }
}
