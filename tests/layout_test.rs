//! Layout pass against hand-assembled ROM bytes.
//!
//! The program below is laid out symbolically and also assembled by hand;
//! every computed label address must land on the matching opcode.

use isa6502::layout::{layout, verify_rom, Data, DataItem, ProgramLine, RomMismatch};
use isa6502::{Instruction, Interpreter, MemoryBus, MemoryImage, Mnemonic, Operand, Stepper};

fn ins(mnemonic: Mnemonic, operand: Operand) -> ProgramLine {
    ProgramLine::instruction(Instruction::new(mnemonic, operand))
}

fn implied(mnemonic: Mnemonic) -> ProgramLine {
    ProgramLine::instruction(Instruction::implied(mnemonic))
}

/// Program source and its assembly at $8000.
fn setup_program() -> (Vec<ProgramLine>, Vec<u8>) {
    let lines = vec![
        ProgramLine::constant("FrameCounter", "$09"),
        ProgramLine::constant("OamBuffer", "$0200"),
        ProgramLine::constant("PpuStatus", "$2002"),
        ProgramLine::org("$8000"),
        ins(Mnemonic::Ldx, Operand::Byte(0x00)).with_label("Reset"),
        ins(Mnemonic::Lda, Operand::direct_x("OamBuffer")).with_label("ClearLoop"),
        ins(Mnemonic::Sta, Operand::direct_x("FrameCounter")),
        implied(Mnemonic::Inx),
        ins(Mnemonic::Cpx, Operand::Byte(0x04)),
        ins(Mnemonic::Bne, Operand::direct("ClearLoop")),
        ins(Mnemonic::Lda, Operand::direct("PpuStatus")),
        ins(Mnemonic::Ldx, Operand::direct_y("FrameCounter")),
        ins(Mnemonic::Lda, Operand::direct_y("FrameCounter")),
        ins(Mnemonic::Jsr, Operand::direct("Subroutine")),
        implied(Mnemonic::Brk),
        ProgramLine::label("Palette"),
        ProgramLine::data(Data::Bytes(vec![
            DataItem::Value("$0F".into()),
            DataItem::Text("AB".into()),
        ])),
        ProgramLine::data(Data::Words(vec![DataItem::Value("Reset".into())])),
        ins(Mnemonic::Inc, Operand::direct("FrameCounter")).with_label("Subroutine"),
        implied(Mnemonic::Rts),
    ];

    let rom = vec![
        0xA2, 0x00, // $8000 LDX #$00
        0xBD, 0x00, 0x02, // $8002 LDA $0200,X
        0x95, 0x09, // $8005 STA $09,X
        0xE8, // $8007 INX
        0xE0, 0x04, // $8008 CPX #$04
        0xD0, 0xF6, // $800A BNE $8002
        0xAD, 0x02, 0x20, // $800C LDA $2002
        0xB6, 0x09, // $800F LDX $09,Y
        0xB9, 0x09, 0x00, // $8011 LDA $0009,Y
        0x20, 0x1D, 0x80, // $8014 JSR $801D
        0x00, // $8017 BRK
        0x0F, 0x41, 0x42, // $8018 .db $0F, "AB"
        0x00, 0x80, // $801B .dw Reset
        0xE6, 0x09, // $801D INC $09
        0x60, // $801F RTS
    ];

    (lines, rom)
}

#[test]
fn test_label_addresses() {
    let (lines, _) = setup_program();
    let laid_out = layout(&lines);
    let symbols = &laid_out.symbols;

    assert_eq!(symbols.address_of("Reset"), Some(0x8000));
    assert_eq!(symbols.address_of("ClearLoop"), Some(0x8002));
    assert_eq!(symbols.address_of("Palette"), Some(0x8018));
    assert_eq!(symbols.address_of("Subroutine"), Some(0x801D));
    assert_eq!(symbols.function_name(0x801D).as_deref(), Some("subroutine"));
}

#[test]
fn test_layout_matches_rom() {
    let (lines, rom) = setup_program();
    let laid_out = layout(&lines);

    assert_eq!(verify_rom(&laid_out, &rom, 0x8000), Vec::<RomMismatch>::new());
}

#[test]
fn test_stepper_lands_on_every_instruction() {
    let (lines, rom) = setup_program();
    let laid_out = layout(&lines);

    let mut memory = MemoryImage::new();
    memory.load_program(0x8000, &rom);
    let mut stepper = Stepper::new(memory);
    stepper.cpu_mut().set_pc(0x8000);

    // Straight-line prefix up to the branch
    for placed in laid_out.instructions.iter().take(5) {
        assert_eq!(stepper.cpu().pc(), placed.address);
        stepper.step();
    }
}

#[test]
fn test_drift_is_reported() {
    let (mut lines, rom) = setup_program();
    // Treat FrameCounter as an absolute address: every use grows by a byte
    lines[0] = ProgramLine::constant("FrameCounter", "$0109");

    let laid_out = layout(&lines);
    let mismatches = verify_rom(&laid_out, &rom, 0x8000);

    assert!(!mismatches.is_empty());
    assert_eq!(mismatches[0].address(), 0x8005);
}

#[test]
fn test_address_map_drives_interpreter() {
    let (lines, _) = setup_program();
    let laid_out = layout(&lines);

    let mut interp = Interpreter::new().with_labels(laid_out.symbols);
    interp.cpu_mut().set_pc(0x8014);
    interp.cpu_mut().set_sp(0xFF);
    interp
        .execute(&Instruction::new(Mnemonic::Jsr, Operand::direct("Subroutine")))
        .unwrap();

    assert_eq!(interp.cpu().pc(), 0x801D);
    assert_eq!(interp.memory().read(0x01FE), 0x16);
}
