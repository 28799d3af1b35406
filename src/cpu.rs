//! # CPU State
//!
//! Registers and status flags of the 6502, with no memory attached. Both the
//! [`Interpreter`](crate::Interpreter) and the [`Stepper`](crate::Stepper)
//! own one of these and mutate it in place; validation harnesses compare two
//! of them with `==` after running the same code.
//!
//! ## Status byte
//!
//! The packed status byte is `N V 1 B D I Z C`. Bit 5 always reads as 1.
//! The B flag is not stored: it only exists in bytes pushed by PHP and BRK,
//! and is ignored when a byte is pulled back with PLP or RTI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

pub(crate) const FLAG_N: u8 = 0b1000_0000;
pub(crate) const FLAG_V: u8 = 0b0100_0000;
pub(crate) const FLAG_UNUSED: u8 = 0b0010_0000;
pub(crate) const FLAG_B: u8 = 0b0001_0000;
pub(crate) const FLAG_D: u8 = 0b0000_1000;
pub(crate) const FLAG_I: u8 = 0b0000_0100;
pub(crate) const FLAG_Z: u8 = 0b0000_0010;
pub(crate) const FLAG_C: u8 = 0b0000_0001;

/// 6502 register file and status flags.
///
/// `CpuState` is `Copy`, so a snapshot is just a copy:
///
/// ```
/// use isa6502::CpuState;
///
/// let mut cpu = CpuState::new();
/// let before = cpu;
/// cpu.set_a(0x42);
/// assert_ne!(before, cpu);
/// assert_eq!(cpu.a(), 0x42);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CpuState {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Program counter
    pub(crate) pc: u16,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow, clear on borrow)
    pub(crate) flag_c: bool,
}

impl CpuState {
    /// Creates a CPU with every register and flag at zero.
    ///
    /// This is a deliberate baseline, not the hardware power-up state: no
    /// reset vector is read and SP starts at 0x00.
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            flag_n: false,
            flag_v: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
        }
    }

    /// Returns every register and flag to the zero baseline.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: always 1
    /// - Bit 4: B, always 0 here (only set in pushed copies)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// ```
    /// use isa6502::CpuState;
    ///
    /// let mut cpu = CpuState::new();
    /// assert_eq!(cpu.status(), 0b0010_0000);
    /// cpu.set_flag_c(true);
    /// cpu.set_flag_n(true);
    /// assert_eq!(cpu.status(), 0b1010_0001);
    /// ```
    pub fn status(&self) -> u8 {
        let mut status = FLAG_UNUSED;

        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }

        status
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Unpacks a status byte into the individual flags. Bits 4 and 5 are ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & FLAG_N != 0;
        self.flag_v = value & FLAG_V != 0;
        self.flag_d = value & FLAG_D != 0;
        self.flag_i = value & FLAG_I != 0;
        self.flag_z = value & FLAG_Z != 0;
        self.flag_c = value & FLAG_C != 0;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets Z and N from a result byte.
    pub(crate) fn update_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }
}

impl fmt::Display for CpuState {
    /// Single-line register dump, e.g. `PC=$8000 A=$42 X=$00 Y=$00 SP=$FF [N-1-D-ZC]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "PC=${:04X} A=${:02X} X=${:02X} Y=${:02X} SP=${:02X} [{}{}1-{}{}{}{}]",
            self.pc,
            self.a,
            self.x,
            self.y,
            self.sp,
            flag(self.flag_n, 'N'),
            flag(self.flag_v, 'V'),
            flag(self.flag_d, 'D'),
            flag(self.flag_i, 'I'),
            flag(self.flag_z, 'Z'),
            flag(self.flag_c, 'C'),
        )
    }
}
