//! The flag set/clear instructions and NOP.

use sim6502::{AddressBus, Cpu, Ram, Status};

fn ram_machine() -> Cpu {
    let mut bus = AddressBus::new();
    bus.attach(Box::new(Ram::new(0x8000)), 0x0000);
    bus.attach(Box::new(Ram::new(0x8000)), 0x8000);

    let mut cpu = Cpu::new(bus);
    cpu.reset().unwrap();
    cpu
}

#[test]
fn sec_and_clc() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0x38, 0x18], 0x0300).unwrap();

    cpu.step().unwrap();
    assert!(cpu.p().contains(Status::CARRY));

    cpu.step().unwrap();
    assert!(!cpu.p().contains(Status::CARRY));
}

#[test]
fn sed_and_cld() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0xF8, 0xD8], 0x0300).unwrap();

    cpu.step().unwrap();
    assert!(cpu.p().contains(Status::DECIMAL));

    cpu.step().unwrap();
    assert!(!cpu.p().contains(Status::DECIMAL));
}

#[test]
fn sei_and_cli() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0x78, 0x58], 0x0300).unwrap();

    cpu.step().unwrap();
    assert!(cpu.p().contains(Status::IRQ_DISABLE));

    // CLI clears the mask; interrupts are enabled afterwards.
    cpu.step().unwrap();
    assert!(!cpu.p().contains(Status::IRQ_DISABLE));
}

#[test]
fn clv_clears_overflow() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::OVERFLOW, true);
    cpu.load_program(&[0xB8], 0x0300).unwrap();
    cpu.step().unwrap();

    assert!(!cpu.p().contains(Status::OVERFLOW));
}

#[test]
fn nop_only_advances_pc() {
    let mut cpu = ram_machine();
    let before = cpu.p();
    cpu.load_program(&[0xEA], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0301);
    assert_eq!(cpu.p(), before);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn flag_instructions_leave_others_alone() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::NEGATIVE, true);
    cpu.set_flag(Status::ZERO, true);

    cpu.load_program(&[0x38], 0x0300).unwrap(); // SEC
    cpu.step().unwrap();

    assert!(cpu.p().contains(Status::NEGATIVE));
    assert!(cpu.p().contains(Status::ZERO));
    assert!(cpu.p().contains(Status::CARRY));
}
