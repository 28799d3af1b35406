//! Addressing-mode edge cases, checked through the resolver and both
//! executors.
//!
//! Tests cover:
//! - Zero page indexed wrap versus absolute indexed carry
//! - The zero page ,Y form that only LDX and STX have
//! - Pointer fetches that wrap inside zero page
//! - The JMP ($xxFF) page bug
//! - (zp),Y crossing a page

use isa6502::{
    resolve, AddressingMode, CpuState, Instruction, Interpreter, MemoryBus, MemoryImage, Mnemonic,
    NoLabels, Operand, Resolved, Stepper,
};

fn setup_cpu(x: u8, y: u8) -> CpuState {
    let mut cpu = CpuState::new();
    cpu.set_x(x);
    cpu.set_y(y);
    cpu
}

fn address_of(mnemonic: Mnemonic, operand: Operand, cpu: &CpuState, memory: &MemoryImage) -> Resolved {
    resolve(mnemonic, &operand, cpu, memory, &NoLabels).unwrap()
}

// ========== Direct ==========

#[test]
fn test_direct_zero_page_eligibility() {
    let cpu = CpuState::new();
    let mem = MemoryImage::new();

    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct("$FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x00FF,
            zero_page: true,
            mode: AddressingMode::ZeroPage
        }
    );
    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct("$0100"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0100,
            zero_page: false,
            mode: AddressingMode::Absolute
        }
    );
}

#[test]
fn test_direct_offset() {
    let cpu = CpuState::new();
    let mem = MemoryImage::new();

    // $FF + 1 leaves zero page
    let resolved = address_of(Mnemonic::Sta, Operand::direct("$FF+1"), &cpu, &mem);
    assert_eq!(resolved.mode(), AddressingMode::Absolute);
}

#[test]
fn test_jump_targets_are_absolute() {
    let cpu = CpuState::new();
    let mem = MemoryImage::new();

    assert_eq!(
        address_of(Mnemonic::Jsr, Operand::direct("$0010"), &cpu, &mem).mode(),
        AddressingMode::Absolute
    );
    assert_eq!(
        address_of(Mnemonic::Bne, Operand::direct("$0010"), &cpu, &mem).mode(),
        AddressingMode::Relative
    );
}

// ========== Indexed ==========

#[test]
fn test_zero_page_x_wraps() {
    let cpu = setup_cpu(3, 0);
    let mem = MemoryImage::new();

    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct_x("$FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0002,
            zero_page: true,
            mode: AddressingMode::ZeroPageX
        }
    );
}

#[test]
fn test_absolute_x_carries() {
    let cpu = setup_cpu(3, 0);
    let mem = MemoryImage::new();

    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct_x("$01FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0202,
            zero_page: false,
            mode: AddressingMode::AbsoluteX
        }
    );
    // 16-bit wrap at the top of memory
    let cpu = setup_cpu(0x10, 0);
    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct_x("$FFF8"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0008,
            zero_page: false,
            mode: AddressingMode::AbsoluteX
        }
    );
}

#[test]
fn test_zero_page_y_only_for_ldx_stx() {
    let cpu = setup_cpu(0, 3);
    let mem = MemoryImage::new();

    assert_eq!(
        address_of(Mnemonic::Ldx, Operand::direct_y("$FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0002,
            zero_page: true,
            mode: AddressingMode::ZeroPageY
        }
    );
    // LDA has no zero page,Y form: absolute,Y carries into page one
    assert_eq!(
        address_of(Mnemonic::Lda, Operand::direct_y("$FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x0102,
            zero_page: false,
            mode: AddressingMode::AbsoluteY
        }
    );
}

// ========== Indirect ==========

#[test]
fn test_indexed_indirect_pointer_wraps() {
    let cpu = setup_cpu(2, 0);
    let mut mem = MemoryImage::new();
    // ($FF,X) with X=2 reads the pointer at $01/$02
    mem.write(0x0001, 0x34);
    mem.write(0x0002, 0x12);

    assert_eq!(
        address_of(Mnemonic::Lda, Operand::indirect_x("$FF"), &cpu, &mem),
        Resolved::Address {
            addr: 0x1234,
            zero_page: true,
            mode: AddressingMode::IndirectX
        }
    );
}

#[test]
fn test_indirect_indexed_pointer_at_ff() {
    let cpu = setup_cpu(0, 0);
    let mut mem = MemoryImage::new();
    // ($FF),Y takes the high byte from $00, not $0100
    mem.write(0x00FF, 0x00);
    mem.write(0x0000, 0x30);
    mem.write(0x0100, 0x99);

    let resolved = address_of(Mnemonic::Lda, Operand::indirect_y("$FF"), &cpu, &mem);
    assert_eq!(
        resolved,
        Resolved::Address {
            addr: 0x3000,
            zero_page: true,
            mode: AddressingMode::IndirectY
        }
    );
}

#[test]
fn test_indirect_indexed_crosses_page() {
    let cpu = setup_cpu(0, 2);
    let mut mem = MemoryImage::new();
    mem.write_word(0x0010, 0x10FF);

    let resolved = address_of(Mnemonic::Lda, Operand::indirect_y("$10"), &cpu, &mem);
    assert_eq!(
        resolved,
        Resolved::Address {
            addr: 0x1101,
            zero_page: true,
            mode: AddressingMode::IndirectY
        }
    );
}

#[test]
fn test_jmp_indirect_page_bug() {
    let mut interp = Interpreter::new();
    interp.memory_mut().write(0x10FF, 0x34);
    interp.memory_mut().write(0x1000, 0x12);
    interp.memory_mut().write(0x1100, 0x56);

    interp
        .execute(&Instruction::new(Mnemonic::Jmp, Operand::indirect("$10FF")))
        .unwrap();
    assert_eq!(interp.cpu().pc(), 0x1234);
}

#[test]
fn test_stepper_jmp_indirect_page_bug() {
    let mut mem = MemoryImage::new();
    mem.load_program(0x8000, &[0x6C, 0xFF, 0x10]);
    mem.write(0x10FF, 0x34);
    mem.write(0x1000, 0x12);
    mem.write(0x1100, 0x56);

    let mut stepper = Stepper::new(mem);
    stepper.cpu_mut().set_pc(0x8000);
    assert_eq!(stepper.step(), 5);
    assert_eq!(stepper.cpu().pc(), 0x1234);
}

// ========== Executors agree ==========

#[test]
fn test_interpreter_and_stepper_write_same_address() {
    // STA $F0,X with X=$20 wraps to $10 in both executors
    let mut interp = Interpreter::new();
    interp.cpu_mut().set_a(0xAA);
    interp.cpu_mut().set_x(0x20);
    interp
        .execute(&Instruction::new(Mnemonic::Sta, Operand::direct_x("$F0")))
        .unwrap();

    let mut mem = MemoryImage::new();
    mem.load_program(0x8000, &[0x95, 0xF0]);
    let mut stepper = Stepper::new(mem);
    stepper.cpu_mut().set_pc(0x8000);
    stepper.cpu_mut().set_a(0xAA);
    stepper.cpu_mut().set_x(0x20);
    stepper.step();

    assert_eq!(interp.memory().read(0x0010), 0xAA);
    assert_eq!(stepper.memory().read(0x0010), 0xAA);
    assert!(interp.memory().diff(stepper.memory(), 0x0000..=0x01FF).is_empty());
}
