//! The eight conditional branches. Offsets are signed and relative to the
//! instruction after the branch.

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
fn bcc_taken_forward() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::CARRY, false);
    cpu.load_program(&[0x90, 0x10], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0312); // 0x0302 + 0x10
}

#[test]
fn bcc_not_taken() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::CARRY, true);
    cpu.load_program(&[0x90, 0x10], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0302);
}

#[test]
fn bcc_taken_backward() {
    // BCC -5 from 0x0300 lands at 0x02FD.
    let mut cpu = ram_machine();
    cpu.set_flag(Status::CARRY, false);
    cpu.load_program(&[0x90, 0xFB], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x02FD);
}

#[test]
fn bcs_taken() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::CARRY, true);
    cpu.load_program(&[0xB0, 0x04], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0306);
}

#[test]
fn bne_beq_follow_zero() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::ZERO, false);
    cpu.load_program(&[0xD0, 0x02], 0x0300).unwrap(); // BNE +2
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0304);

    cpu.set_flag(Status::ZERO, true);
    cpu.load_program(&[0xF0, 0x02], 0x0300).unwrap(); // BEQ +2
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0304);

    cpu.load_program(&[0xD0, 0x02], 0x0300).unwrap(); // BNE not taken
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0302);
}

#[test]
fn bpl_bmi_follow_negative() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::NEGATIVE, false);
    cpu.load_program(&[0x10, 0x06], 0x0300).unwrap(); // BPL +6
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0308);

    cpu.set_flag(Status::NEGATIVE, true);
    cpu.load_program(&[0x30, 0x06], 0x0300).unwrap(); // BMI +6
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0308);

    cpu.load_program(&[0x10, 0x06], 0x0300).unwrap(); // BPL not taken
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0302);
}

#[test]
fn bvc_bvs_follow_overflow() {
    let mut cpu = ram_machine();
    cpu.set_flag(Status::OVERFLOW, false);
    cpu.load_program(&[0x50, 0x08], 0x0300).unwrap(); // BVC +8
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x030A);

    cpu.set_flag(Status::OVERFLOW, true);
    cpu.load_program(&[0x70, 0x08], 0x0300).unwrap(); // BVS +8
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x030A);

    cpu.load_program(&[0x50, 0x08], 0x0300).unwrap(); // BVC not taken
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0302);
}

#[test]
fn branch_in_a_countdown_loop() {
    // LDX #$03; DEX; BNE -3: the loop runs until X hits zero.
    let mut cpu = ram_machine();
    cpu.load_program(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD], 0x0300).unwrap();

    cpu.step().unwrap(); // LDX
    for _ in 0..3 {
        cpu.step().unwrap(); // DEX
        cpu.step().unwrap(); // BNE
    }

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x0305);
}
