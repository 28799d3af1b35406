//! Property-based tests for instruction-set invariants.
//!
//! These tests use proptest to check that arithmetic, stack and size rules
//! hold across all input combinations, and that the symbolic interpreter,
//! the binary stepper and the size calculator agree with each other.

use isa6502::size::encoding_mode;
use isa6502::{
    instruction_size, AddressingMode, CpuState, Instruction, Interpreter, MemoryBus, MemoryImage,
    Mnemonic, Operand, OperandKind, Stepper, OPCODE_TABLE,
};
use proptest::prelude::*;

fn setup_interpreter(a: u8, carry: bool, decimal: bool) -> Interpreter {
    let mut interp = Interpreter::new();
    interp.cpu_mut().set_a(a);
    interp.cpu_mut().set_flag_c(carry);
    interp.cpu_mut().set_flag_d(decimal);
    interp
}

fn run_immediate(mnemonic: Mnemonic, a: u8, value: u8, carry: bool, decimal: bool) -> CpuState {
    let mut interp = setup_interpreter(a, carry, decimal);
    interp
        .execute(&Instruction::new(mnemonic, Operand::Byte(value)))
        .unwrap();
    *interp.cpu()
}

/// Symbolic operand kind and zero-page eligibility that select `mode`.
fn operand_shape(mode: AddressingMode) -> (Option<OperandKind>, bool) {
    match mode {
        AddressingMode::Implicit | AddressingMode::Accumulator => (None, false),
        AddressingMode::Immediate => (Some(OperandKind::Byte), false),
        AddressingMode::ZeroPage => (Some(OperandKind::Direct), true),
        AddressingMode::Absolute | AddressingMode::Relative => (Some(OperandKind::Direct), false),
        AddressingMode::ZeroPageX => (Some(OperandKind::DirectX), true),
        AddressingMode::AbsoluteX => (Some(OperandKind::DirectX), false),
        AddressingMode::ZeroPageY => (Some(OperandKind::DirectY), true),
        AddressingMode::AbsoluteY => (Some(OperandKind::DirectY), false),
        AddressingMode::IndirectX => (Some(OperandKind::IndirectX), true),
        AddressingMode::IndirectY => (Some(OperandKind::IndirectY), true),
        AddressingMode::Indirect => (Some(OperandKind::IndirectAbsolute), false),
    }
}

/// Documented opcodes that fall through to the next instruction.
fn sequential_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| match m.mnemonic {
            Some(mnemonic) => {
                !mnemonic.is_branch()
                    && !matches!(
                        mnemonic,
                        Mnemonic::Jmp | Mnemonic::Jsr | Mnemonic::Rts | Mnemonic::Rti | Mnemonic::Brk
                    )
            }
            None => false,
        })
        .map(|(i, _)| i as u8)
        .collect()
}

#[test]
fn test_size_calculator_selects_every_opcode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        let Some(mnemonic) = metadata.mnemonic else {
            continue;
        };
        let (kind, zero_page) = operand_shape(metadata.addressing_mode);

        assert_eq!(
            encoding_mode(mnemonic, kind, zero_page),
            metadata.addressing_mode,
            "opcode ${:02X}",
            opcode
        );
        assert_eq!(instruction_size(mnemonic, kind, zero_page), metadata.size_bytes);
    }
}

proptest! {
    /// Property: binary SBC is ADC of the complemented operand
    #[test]
    fn prop_sbc_is_adc_of_complement_binary(a in 0u8..=255u8, b in 0u8..=255u8, carry in any::<bool>()) {
        let sbc = run_immediate(Mnemonic::Sbc, a, b, carry, false);
        let adc = run_immediate(Mnemonic::Adc, a, !b, carry, false);
        prop_assert_eq!(sbc, adc);
    }

    /// Property: decimal SBC takes C and V from the binary subtraction
    #[test]
    fn prop_sbc_is_adc_of_complement_decimal_flags(a in 0u8..=255u8, b in 0u8..=255u8, carry in any::<bool>()) {
        let sbc = run_immediate(Mnemonic::Sbc, a, b, carry, true);
        let adc = run_immediate(Mnemonic::Adc, a, !b, carry, false);
        prop_assert_eq!(sbc.flag_c(), adc.flag_c());
        prop_assert_eq!(sbc.flag_v(), adc.flag_v());
    }

    /// Property: decimal ADC of valid BCD operands is base-10 addition
    #[test]
    fn prop_decimal_add_of_valid_bcd(
        hi_a in 0u8..10,
        lo_a in 0u8..10,
        hi_b in 0u8..10,
        lo_b in 0u8..10,
        carry in any::<bool>()
    ) {
        let a = (hi_a << 4) | lo_a;
        let b = (hi_b << 4) | lo_b;
        let cpu = run_immediate(Mnemonic::Adc, a, b, carry, true);

        let expected = (hi_a as u32 * 10 + lo_a as u32) + (hi_b as u32 * 10 + lo_b as u32) + carry as u32;
        let digits = expected % 100;
        prop_assert_eq!(cpu.a(), (((digits / 10) << 4) | (digits % 10)) as u8);
        prop_assert_eq!(cpu.flag_c(), expected >= 100);
        prop_assert_eq!(cpu.flag_z(), digits == 0);
    }

    /// Property: the size calculator agrees with the bytes the stepper consumes
    #[test]
    fn prop_size_matches_stepper_length(
        opcode in proptest::sample::select(sequential_opcodes()),
        lo in 0u8..=255u8,
        hi in 0u8..=255u8
    ) {
        let metadata = &OPCODE_TABLE[opcode as usize];
        let mnemonic = metadata.mnemonic.unwrap_or(Mnemonic::Nop);
        let (kind, zero_page) = operand_shape(metadata.addressing_mode);

        let mut memory = MemoryImage::new();
        memory.load_program(0x0400, &[opcode, lo, hi]);
        let mut stepper = Stepper::new(memory);
        stepper.cpu_mut().set_pc(0x0400);
        stepper.cpu_mut().set_sp(0xFF);
        stepper.step();

        let consumed = stepper.cpu().pc().wrapping_sub(0x0400);
        prop_assert_eq!(consumed, instruction_size(mnemonic, kind, zero_page) as u16);
    }

    /// Property: PHP then PLP restores the status byte
    #[test]
    fn prop_php_plp_round_trip(status in 0u8..=255u8, sp in 0u8..=255u8) {
        let mut interp = Interpreter::new();
        interp.cpu_mut().set_status(status);
        interp.cpu_mut().set_sp(sp);
        let before = *interp.cpu();

        interp.execute(&Instruction::implied(Mnemonic::Php)).unwrap();
        let pushed = interp.memory().read(0x0100 | sp as u16);
        interp.execute(&Instruction::implied(Mnemonic::Plp)).unwrap();

        prop_assert_eq!(pushed, before.status() | 0x30);
        prop_assert_eq!(*interp.cpu(), before);
        prop_assert_eq!(interp.cpu().status() & 0x20, 0x20);
    }

    /// Property: any number of NOPs leaves CPU and memory unchanged
    #[test]
    fn prop_nop_changes_nothing(
        a in 0u8..=255u8,
        x in 0u8..=255u8,
        y in 0u8..=255u8,
        sp in 0u8..=255u8,
        status in 0u8..=255u8,
        count in 1usize..32
    ) {
        let mut interp = Interpreter::new();
        interp.cpu_mut().set_a(a);
        interp.cpu_mut().set_x(x);
        interp.cpu_mut().set_y(y);
        interp.cpu_mut().set_sp(sp);
        interp.cpu_mut().set_status(status);
        let before = *interp.cpu();

        for _ in 0..count {
            interp.execute(&Instruction::implied(Mnemonic::Nop)).unwrap();
        }

        prop_assert_eq!(*interp.cpu(), before);
        prop_assert!(interp.memory().diff(&MemoryImage::new(), 0x0000..=0xFFFF).is_empty());
    }

    /// Property: interpreter and stepper compute identical ALU results
    #[test]
    fn prop_executors_agree_on_alu(
        mnemonic in proptest::sample::select(vec![
            Mnemonic::Adc, Mnemonic::Sbc, Mnemonic::And, Mnemonic::Ora,
            Mnemonic::Eor, Mnemonic::Cmp, Mnemonic::Lda,
        ]),
        a in 0u8..=255u8,
        value in 0u8..=255u8,
        status in 0u8..=255u8
    ) {
        let mut interp = Interpreter::new();
        interp.cpu_mut().set_a(a);
        interp.cpu_mut().set_status(status);
        interp.execute(&Instruction::new(mnemonic, Operand::Byte(value))).unwrap();

        let opcode = isa6502::opcodes::opcode_for(mnemonic, AddressingMode::Immediate).unwrap_or(0xEA);
        let mut memory = MemoryImage::new();
        memory.load_program(0x8000, &[opcode, value]);
        let mut stepper = Stepper::new(memory);
        stepper.cpu_mut().set_pc(0x8000);
        stepper.cpu_mut().set_a(a);
        stepper.cpu_mut().set_status(status);
        stepper.step();

        prop_assert_eq!(stepper.cpu().a(), interp.cpu().a());
        prop_assert_eq!(stepper.cpu().status(), interp.cpu().status());
    }
}
