//! Klaus Dormann's NMOS 6502 functional test suite.
//!
//! The suite is a 64 KiB memory image that exercises every documented
//! opcode and addressing mode, trapping failures in tight `JMP *` loops.
//! Execution starts at 0x0400; reaching the success loop at 0x3399 means
//! every test passed, while any other fixed point identifies the failing
//! test (look the address up in the suite's listing file).
//!
//! The binary is not committed. Drop it in as
//! `tests/fixtures/6502_functional_test.bin` (from
//! <https://github.com/Klaus2m5/6502_65C02_functional_tests>) and run:
//!
//! ```text
//! cargo test --test functional_klaus -- --ignored
//! ```

use std::fs;

use sim6502::{AddressBus, Cpu, Ram};

const BINARY_PATH: &str = "tests/fixtures/6502_functional_test.bin";
const ENTRY_POINT: u16 = 0x0400;
const SUCCESS_ADDRESS: u16 = 0x3399;

/// Generous budget; the suite finishes in under 100M cycles when healthy.
const MAX_STEPS: u64 = 100_000_000;

fn load_image(cpu: &mut Cpu, image: &[u8]) {
    assert!(
        image.len() <= 0x10000,
        "image is {} bytes, more than the address space",
        image.len()
    );

    for (addr, byte) in image.iter().enumerate() {
        cpu.bus_mut().write_byte(addr as u16, *byte).unwrap();
    }
}

/// Steps until PC stops moving and returns the fixed point.
fn run_to_fixed_point(cpu: &mut Cpu) -> u16 {
    let mut steps = 0u64;

    loop {
        let pc_before = cpu.pc();

        if let Err(e) = cpu.step() {
            panic!("execution failed at 0x{pc_before:04X}: {e}\n{cpu}");
        }

        if cpu.pc() == pc_before {
            return pc_before;
        }

        steps += 1;
        assert!(
            steps < MAX_STEPS,
            "no fixed point after {MAX_STEPS} steps; last PC 0x{:04X}",
            cpu.pc()
        );
    }
}

#[test]
#[ignore = "needs the test binary fixture; takes a few seconds"]
fn klaus_functional_suite_reaches_success_loop() {
    let image = fs::read(BINARY_PATH)
        .unwrap_or_else(|e| panic!("cannot read {BINARY_PATH}: {e} (see module docs)"));

    let mut bus = AddressBus::new();
    bus.attach(Box::new(Ram::new(0x8000)), 0x0000);
    bus.attach(Box::new(Ram::new(0x8000)), 0x8000);
    let mut cpu = Cpu::new(bus);

    load_image(&mut cpu, &image);
    cpu.set_pc(ENTRY_POINT);

    let fixed_point = run_to_fixed_point(&mut cpu);

    assert_eq!(
        fixed_point, SUCCESS_ADDRESS,
        "trapped at 0x{fixed_point:04X}; check the suite listing for the failing test\n{cpu}"
    );
}
