// Common test utilities for integration tests
//
// Program-loading cartridges, a flat 64KB bus for driving the CPU on its own,
// and logger setup so `RUST_LOG=debug cargo test` shows emulator logs.

#![allow(dead_code)]

use nes_core::{Cpu, Emulator, EmulatorConfig, Mapper0, MemoryMappedDevice, Mirroring};

/// Handler address the NMI vector points at
pub const NMI_HANDLER: u16 = 0x9000;
/// Handler address the IRQ/BRK vector points at
pub const IRQ_HANDLER: u16 = 0xA000;

/// Install `env_logger` once per test binary
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// NROM-256 board with `program` at $8000 and every vector set
///
/// Reset enters the program, NMI lands on $9000 and IRQ on $A000; both
/// handlers are a lone RTI.
pub fn program_cartridge(program: &[u8]) -> Mapper0 {
    program_cartridge_with_nmi(program, &[0x40])
}

/// Like [`program_cartridge`] with `handler` placed at the NMI entry point
pub fn program_cartridge_with_nmi(program: &[u8], handler: &[u8]) -> Mapper0 {
    let mut prg = vec![0xEA; 32 * 1024];
    prg[..program.len()].copy_from_slice(program);
    let nmi = (NMI_HANDLER - 0x8000) as usize;
    prg[nmi..nmi + handler.len()].copy_from_slice(handler);
    prg[(IRQ_HANDLER - 0x8000) as usize] = 0x40;
    prg[0x7FFA..].copy_from_slice(&[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);

    Mapper0::new(prg, vec![], Mirroring::Horizontal).expect("32KB PRG is a valid NROM image")
}

/// Emulator running `program` with the default configuration
pub fn program_emulator(program: &[u8]) -> Emulator {
    program_emulator_with(EmulatorConfig::default(), program)
}

pub fn program_emulator_with(config: EmulatorConfig, program: &[u8]) -> Emulator {
    init_logger();
    Emulator::new(config, Box::new(program_cartridge(program))).expect("valid configuration")
}

/// Run `frames` video frames, draining the audio after each one
pub fn run_frames(emulator: &mut Emulator, frames: usize) {
    for frame in 0..frames {
        emulator
            .run_frame()
            .unwrap_or_else(|e| panic!("frame {}: {}", frame, e));
        emulator.take_samples();
    }
}

/// Flat 64KB memory with the same vectors as [`program_cartridge`]
pub struct FlatBus {
    pub memory: Vec<u8>,
}

impl FlatBus {
    pub fn new() -> Self {
        let mut memory = vec![0; 0x10000];
        memory[0xFFFA..].copy_from_slice(&[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);
        FlatBus { memory }
    }

    pub fn load(&mut self, origin: u16, bytes: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl MemoryMappedDevice for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }
}

/// Tick until the CPU reaches its next instruction boundary
///
/// Returns the number of cycles spent.
pub fn step_instruction(cpu: &mut Cpu, bus: &mut FlatBus) -> u64 {
    let start = cpu.cycles;
    loop {
        cpu.tick(bus);
        if cpu.at_instruction_boundary() {
            return cpu.cycles - start;
        }
        assert!(cpu.cycles - start < 16, "instruction at ${:04X} did not finish", cpu.pc);
    }
}
