//! JMP, JSR and RTS.

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
fn jmp_absolute() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0x4C, 0x34, 0x12], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn jmp_indirect() {
    let mut cpu = ram_machine();
    cpu.bus_mut().write_word(0x2000, 0x5678).unwrap();
    cpu.load_program(&[0x6C, 0x00, 0x20], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x5678);
}

#[test]
fn jmp_does_not_touch_flags() {
    let mut cpu = ram_machine();
    let before = cpu.p();
    cpu.load_program(&[0x4C, 0x00, 0x10], 0x0300).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.p(), before);
}

#[test]
fn jsr_pushes_return_address() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0x20, 0x06, 0x03], 0x0300).unwrap(); // JSR $0306
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0306);
    assert_eq!(cpu.sp(), 0xFD);
    // Pushed PC-1: the address of the JSR's own last byte, high then low.
    assert_eq!(cpu.bus_mut().read_byte(0x01FF).unwrap(), 0x03);
    assert_eq!(cpu.bus_mut().read_byte(0x01FE).unwrap(), 0x02);
}

#[test]
fn jsr_rts_round_trip() {
    let mut cpu = ram_machine();
    cpu.load_program(&[0x20, 0x06, 0x03], 0x0300).unwrap(); // JSR $0306
    cpu.bus_mut().write_byte(0x0306, 0x60).unwrap(); // RTS

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0306);
    assert_eq!(cpu.sp(), 0xFD);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0303); // one past the JSR
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn nested_subroutines_unwind_in_order() {
    let mut cpu = ram_machine();
    // 0x0300: JSR $0310 / 0x0310: JSR $0320; RTS / 0x0320: RTS
    cpu.load_program(&[0x20, 0x10, 0x03], 0x0300).unwrap();
    cpu.bus_mut().write_byte(0x0310, 0x20).unwrap();
    cpu.bus_mut().write_byte(0x0311, 0x20).unwrap();
    cpu.bus_mut().write_byte(0x0312, 0x03).unwrap();
    cpu.bus_mut().write_byte(0x0313, 0x60).unwrap();
    cpu.bus_mut().write_byte(0x0320, 0x60).unwrap();

    cpu.step().unwrap(); // JSR $0310
    cpu.step().unwrap(); // JSR $0320
    assert_eq!(cpu.pc(), 0x0320);
    assert_eq!(cpu.sp(), 0xFB);

    cpu.step().unwrap(); // RTS -> 0x0313
    assert_eq!(cpu.pc(), 0x0313);
    cpu.step().unwrap(); // RTS -> 0x0303
    assert_eq!(cpu.pc(), 0x0303);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn rts_survives_stack_safe_work_in_subroutine() {
    let mut cpu = ram_machine();
    cpu.set_a(0x42);
    cpu.load_program(&[0x20, 0x06, 0x03], 0x0300).unwrap();
    // Subroutine: PHA; LDA #$00; PLA; RTS
    cpu.bus_mut().write_byte(0x0306, 0x48).unwrap();
    cpu.bus_mut().write_byte(0x0307, 0xA9).unwrap();
    cpu.bus_mut().write_byte(0x0308, 0x00).unwrap();
    cpu.bus_mut().write_byte(0x0309, 0x68).unwrap();
    cpu.bus_mut().write_byte(0x030A, 0x60).unwrap();

    cpu.steps(5).unwrap();

    assert_eq!(cpu.pc(), 0x0303);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(!cpu.p().contains(Status::ZERO)); // PLA of 0x42 cleared it
}
