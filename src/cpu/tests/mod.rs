//! CPU unit tests
//!
//! Every test drives the CPU one cycle at a time against a flat 64KB memory
//! that records each access, so both results and bus timing can be checked.

use super::*;


// ========================================
// Test Constants
// ========================================

pub(crate) const RESET_TARGET: u16 = 0x8000;
pub(crate) const NMI_TARGET: u16 = 0x9000;
pub(crate) const IRQ_TARGET: u16 = 0xA000;

// ========================================
// Test Bus
// ========================================

/// One recorded bus access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read(u16),
    Write(u16, u8),
}

/// Flat 64KB memory with an access log
pub(crate) struct TestBus {
    pub memory: Vec<u8>,
    pub log: Vec<Access>,
}

impl TestBus {
    /// Memory with the reset, NMI and IRQ vectors pointing at distinct handlers
    pub fn new() -> Self {
        let mut bus = TestBus {
            memory: vec![0; 0x10000],
            log: Vec::new(),
        };
        bus.write_word(NMI_VECTOR, NMI_TARGET);
        bus.write_word(RESET_VECTOR, RESET_TARGET);
        bus.write_word(IRQ_VECTOR, IRQ_TARGET);
        bus
    }

    pub fn load(&mut self, origin: u16, bytes: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.memory[addr as usize] = low;
        self.memory[addr.wrapping_add(1) as usize] = high;
    }

    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                Access::Write(addr, data) => Some((addr, data)),
                Access::Read(_) => None,
            })
            .collect()
    }
}

impl MemoryMappedDevice for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.log.push(Access::Read(addr));
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.log.push(Access::Write(addr, data));
        self.memory[addr as usize] = data;
    }
}

// ========================================
// Test Helper Functions
// ========================================

/// CPU positioned at `origin` with the program loaded there
///
/// The stack pointer starts at $FD as it would after reset.
pub(crate) fn setup(origin: u16, program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::new();
    bus.load(origin, program);

    let mut cpu = Cpu::new();
    cpu.pc = origin;
    cpu.sp = 0xFD;
    (cpu, bus)
}

/// Tick until the next instruction boundary, returning the cycles spent
pub(crate) fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    let mut cycles = 0;
    loop {
        cpu.tick(bus);
        cycles += 1;
        if cpu.at_instruction_boundary() {
            return cycles;
        }
        assert!(cycles < 16, "instruction did not finish");
    }
}

/// Run `count` instructions and return the total cycles
pub(crate) fn run(cpu: &mut Cpu, bus: &mut TestBus, count: usize) -> u32 {
    (0..count).map(|_| step(cpu, bus)).sum()
}

// ========================================
// Power-on and state
// ========================================

#[test]
fn test_power_on_state() {
    let cpu = Cpu::new();
    assert_eq!((cpu.a, cpu.x, cpu.y, cpu.sp, cpu.pc), (0, 0, 0, 0, 0));
    assert_eq!(cpu.status, flags::UNUSED | flags::INTERRUPT_DISABLE);
    assert_eq!(cpu.cycles, 0);
    assert!(cpu.at_instruction_boundary());
    assert!(!cpu.is_halted());
}

#[test]
fn test_state_round_trip() {
    let (mut cpu, mut bus) = setup(0x8000, &[0xA9, 0x42, 0xAA]);
    run(&mut cpu, &mut bus, 2);

    let state = cpu.state();
    assert_eq!(state.a, 0x42);
    assert_eq!(state.x, 0x42);
    assert_eq!(state.pc, 0x8003);
    assert_eq!(state.cycles, 4);

    let mut restored = Cpu::new();
    restored.set_state(&state);
    assert_eq!(restored.state(), state);
    assert!(restored.at_instruction_boundary());
}

#[test]
fn test_state_serializes_to_json() {
    let state = CpuState {
        pc: 0xC000,
        sp: 0xFD,
        a: 1,
        x: 2,
        y: 3,
        p: 0x24,
        cycles: 7,
    };

    let json = serde_json::to_string(&state).unwrap();
    let parsed: CpuState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn test_set_state_keeps_unused_bit() {
    let mut cpu = Cpu::new();
    cpu.set_state(&CpuState {
        p: 0x00,
        ..CpuState::default()
    });
    assert_eq!(cpu.status, flags::UNUSED);
}

#[test]
fn test_tick_counts_cycles() {
    let (mut cpu, mut bus) = setup(0x8000, &[0xEA, 0xEA]);
    cpu.tick(&mut bus);
    assert_eq!(cpu.cycles, 1);
    assert!(!cpu.at_instruction_boundary(), "NOP is still in flight");
    cpu.tick(&mut bus);
    assert_eq!(cpu.cycles, 2);
    assert!(cpu.at_instruction_boundary());
}
