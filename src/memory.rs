//! # Memory Bus and Memory Image
//!
//! The `MemoryBus` trait decouples both executors from a particular memory
//! layout. [`MemoryImage`] is the implementation the crate ships: a flat 64K
//! byte space with optional read and write intercept hooks, which is how
//! harnesses emulate memory-mapped I/O (PPU registers, controllers) without
//! teaching the CPU about them.
//!
//! The 6502 has no bus errors, so reads and writes never fail. Addresses
//! are `u16`, so wraparound at $FFFF is handled by the type.

use std::fmt;
use std::ops::RangeInclusive;

use crate::config::RamInit;

/// Memory bus trait for the executors to read/write bytes.
///
/// # Examples
///
/// ```
/// use isa6502::{MemoryBus, MemoryImage};
///
/// let mut mem = MemoryImage::new();
/// mem.write_word(0xFFFA, 0x8123);
/// assert_eq!(mem.read(0xFFFA), 0x23);
/// assert_eq!(mem.read(0xFFFB), 0x81);
/// assert_eq!(mem.read_word(0xFFFA), 0x8123);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address. Must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address. Must never panic.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word. The high byte address wraps at $FFFF.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes a little-endian word.
    fn write_word(&mut self, addr: u16, value: u16) {
        self.write(addr, value as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Reads a pointer stored in zero page. The high byte comes from
    /// `(zp + 1) & 0xFF`, so a pointer at $FF takes its high byte from $00.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.read(zp as u16) as u16;
        let hi = self.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}

/// Read intercept: `Some(value)` answers the read, `None` falls through.
///
/// Reads go through `&self`, so the hook is `Fn`. Registers with read
/// side effects keep their state in a `Cell` or `RefCell`.
pub type ReadHook = Box<dyn Fn(u16) -> Option<u8>>;

/// Write intercept: returning `true` marks the write as handled and
/// suppresses the store to the backing array.
pub type WriteHook = Box<dyn FnMut(u16, u8) -> bool>;

/// One byte that differs between two memory images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryDiff {
    pub address: u16,
    pub expected: u8,
    pub actual: u8,
}

impl fmt::Display for MemoryDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${:04X}: expected ${:02X}, got ${:02X}",
            self.address, self.expected, self.actual
        )
    }
}

/// 64KB flat memory with optional I/O hooks.
///
/// Hooks are tried in registration order. The first read hook to answer
/// wins; the first write hook to report "handled" stops the chain and the
/// raw array is left untouched.
///
/// ```
/// use isa6502::{MemoryBus, MemoryImage};
///
/// let mut mem = MemoryImage::new();
/// mem.add_read_hook(|addr| (addr == 0x2002).then_some(0x80));
/// mem.add_write_hook(|addr, _| addr == 0x2000);
///
/// assert_eq!(mem.read(0x2002), 0x80);
/// mem.write(0x2000, 0x10);
/// assert_eq!(mem.peek(0x2000), 0x00);
/// ```
pub struct MemoryImage {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
    read_hooks: Vec<ReadHook>,
    write_hooks: Vec<WriteHook>,
}

impl MemoryImage {
    /// Creates a memory image with all bytes zero and no hooks.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
            read_hooks: Vec::new(),
            write_hooks: Vec::new(),
        }
    }

    /// Registers a read intercept after any existing ones.
    ///
    /// The hook only gets `&self` access, as every [`MemoryBus::read`]
    /// does. A register that changes when read (PPUSTATUS clearing its
    /// vblank bit) captures shared state:
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use isa6502::{MemoryBus, MemoryImage};
    ///
    /// let vblank = Rc::new(Cell::new(true));
    /// let flag = Rc::clone(&vblank);
    ///
    /// let mut mem = MemoryImage::new();
    /// mem.add_read_hook(move |addr| {
    ///     (addr == 0x2002).then(|| if flag.replace(false) { 0x80 } else { 0x00 })
    /// });
    ///
    /// assert_eq!(mem.read(0x2002), 0x80);
    /// assert_eq!(mem.read(0x2002), 0x00);
    /// assert!(!vblank.get());
    /// ```
    pub fn add_read_hook<F>(&mut self, hook: F)
    where
        F: Fn(u16) -> Option<u8> + 'static,
    {
        self.read_hooks.push(Box::new(hook));
    }

    /// Registers a write intercept after any existing ones.
    pub fn add_write_hook<F>(&mut self, hook: F)
    where
        F: FnMut(u16, u8) -> bool + 'static,
    {
        self.write_hooks.push(Box::new(hook));
    }

    /// Drops every registered hook.
    pub fn clear_hooks(&mut self) {
        self.read_hooks.clear();
        self.write_hooks.clear();
    }

    /// Reads the backing array directly, bypassing hooks.
    pub fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Writes the backing array directly, bypassing hooks.
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Copies `program` into memory starting at `start`, wrapping at $FFFF.
    /// Hooks are bypassed: this models loading a ROM, not a bus write.
    pub fn load_program(&mut self, start: u16, program: &[u8]) {
        for (offset, byte) in program.iter().enumerate() {
            let addr = start.wrapping_add(offset as u16);
            self.data[addr as usize] = *byte;
        }
    }

    /// Copies `len` bytes starting at `start` out of the backing array,
    /// wrapping at $FFFF.
    pub fn dump(&self, start: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.data[start.wrapping_add(offset as u16) as usize])
            .collect()
    }

    /// Zeroes internal RAM ($0000-$07FF). Everything above, including any
    /// loaded program, is left alone.
    pub fn reset(&mut self) {
        self.reset_with(RamInit::Zero);
    }

    /// Initialises internal RAM ($0000-$07FF) with the given power-on pattern.
    pub fn reset_with(&mut self, init: RamInit) {
        for (i, byte) in self.data[..0x0800].iter_mut().enumerate() {
            *byte = init.byte_at(i as u16);
        }
    }

    /// Lists every address in `range` whose byte differs from `expected`.
    /// Compares backing arrays only; hooks are not consulted.
    pub fn diff(&self, expected: &MemoryImage, range: RangeInclusive<u16>) -> Vec<MemoryDiff> {
        range
            .filter_map(|address| {
                let want = expected.peek(address);
                let got = self.peek(address);
                (want != got).then_some(MemoryDiff {
                    address,
                    expected: want,
                    actual: got,
                })
            })
            .collect()
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryImage")
            .field("read_hooks", &self.read_hooks.len())
            .field("write_hooks", &self.write_hooks.len())
            .finish_non_exhaustive()
    }
}

impl MemoryBus for MemoryImage {
    fn read(&self, addr: u16) -> u8 {
        self.read_hooks
            .iter()
            .find_map(|hook| hook(addr))
            .unwrap_or(self.data[addr as usize])
    }

    fn write(&mut self, addr: u16, value: u8) {
        for hook in self.write_hooks.iter_mut() {
            if hook(addr, value) {
                return;
            }
        }
        self.data[addr as usize] = value;
    }
}
