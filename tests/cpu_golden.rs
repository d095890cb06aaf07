// Golden CPU vectors
//
// Each fixture in tests/data/ describes a short program, the register file it
// starts from, optional interrupt requests and the exact state (registers,
// flags, cycle count and selected memory) it must end in.

mod common;

use common::{step_instruction, FlatBus};
use nes_core::{Cpu, CpuState};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct Vector {
    name: String,
    origin: u16,
    program: Vec<u8>,
    initial: CpuState,
    /// Instruction boundaries to run to; an interrupt sequence counts as one
    instructions: usize,
    #[serde(default)]
    memory: Vec<(u16, u8)>,
    /// Raise NMI after this many ticks (0 = before the first tick)
    #[serde(default)]
    nmi_after_tick: Option<u64>,
    #[serde(default)]
    irq_after_tick: Option<u64>,
    expected: CpuState,
    #[serde(default)]
    expected_memory: Vec<(u16, u8)>,
}

fn load_vectors(file: &str) -> Vec<Vector> {
    let path = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), file);
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

fn run_vector(vector: &Vector) {
    let mut bus = FlatBus::new();
    bus.load(vector.origin, &vector.program);
    for &(addr, value) in &vector.memory {
        bus.memory[addr as usize] = value;
    }

    let mut cpu = Cpu::new();
    cpu.set_state(&vector.initial);

    let mut ticks = 0;
    let raise = |cpu: &mut Cpu, ticks: u64| {
        if vector.nmi_after_tick == Some(ticks) {
            cpu.request_nmi();
        }
        if vector.irq_after_tick == Some(ticks) {
            cpu.request_irq();
        }
    };

    raise(&mut cpu, 0);
    for _ in 0..vector.instructions {
        loop {
            cpu.tick(&mut bus);
            ticks += 1;
            raise(&mut cpu, ticks);
            if cpu.at_instruction_boundary() {
                break;
            }
            assert!(ticks < 10_000, "{}: runaway instruction", vector.name);
        }
    }

    assert_eq!(cpu.state(), vector.expected, "{}: final state", vector.name);
    for &(addr, value) in &vector.expected_memory {
        assert_eq!(
            bus.memory[addr as usize], value,
            "{}: memory at ${:04X}",
            vector.name, addr
        );
    }
}

fn run_file(file: &str) {
    common::init_logger();
    let vectors = load_vectors(file);
    assert!(!vectors.is_empty(), "{} holds no vectors", file);
    for vector in &vectors {
        run_vector(vector);
    }
}

#[test]
fn golden_arithmetic() {
    run_file("cpu_arithmetic.json");
}

#[test]
fn golden_logical() {
    run_file("cpu_logical.json");
}

#[test]
fn golden_shift_rotate() {
    run_file("cpu_shift_rotate.json");
}

#[test]
fn golden_branch() {
    run_file("cpu_branch.json");
}

#[test]
fn golden_stack() {
    run_file("cpu_stack.json");
}

#[test]
fn golden_interrupts() {
    run_file("cpu_interrupts.json");
}

#[test]
fn step_helper_counts_cycles() {
    // LDA $10,X with X = 0 takes 4 cycles
    let mut bus = FlatBus::new();
    bus.load(0x8000, &[0xB5, 0x10]);
    let mut cpu = Cpu::new();
    cpu.set_state(&CpuState {
        pc: 0x8000,
        sp: 0xFD,
        p: 0x24,
        ..CpuState::default()
    });

    assert_eq!(step_instruction(&mut cpu, &mut bus), 4);
}
