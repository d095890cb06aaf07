// CPU Benchmarks
// Performance benchmarks for cycle-stepped instruction execution

use criterion::{criterion_group, criterion_main, Criterion};
use nes_core::{Cpu, CpuState, MemoryMappedDevice};
use std::hint::black_box;

/// Flat 64KB memory with no side effects
struct FlatMemory(Vec<u8>);

impl MemoryMappedDevice for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.0[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.0[addr as usize] = data;
    }
}

/// CPU at $C000 with `pattern` repeated over the whole page
fn setup(pattern: &[u8]) -> (Cpu, FlatMemory) {
    let mut memory = vec![0xEA; 0x10000];
    for (i, byte) in memory[0xC000..0xC100].iter_mut().enumerate() {
        *byte = pattern[i % pattern.len()];
    }
    // Close the page with JMP $C000
    memory[0xC0FD..0xC100].copy_from_slice(&[0x4C, 0x00, 0xC0]);

    let mut cpu = Cpu::new();
    cpu.set_state(&CpuState {
        pc: 0xC000,
        sp: 0xFD,
        p: 0x24,
        ..CpuState::default()
    });
    (cpu, FlatMemory(memory))
}

/// Tick until the next instruction boundary
fn step(cpu: &mut Cpu, memory: &mut FlatMemory) {
    loop {
        cpu.tick(memory);
        if cpu.at_instruction_boundary() {
            break;
        }
    }
}

/// Benchmark CPU instruction execution
/// Measures dispatch plus the per-cycle micro-step machinery
fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    let patterns: [(&str, &[u8]); 5] = [
        ("nop", &[0xEA]),
        ("lda_immediate", &[0xA9, 0x42]),
        ("adc_immediate", &[0x69, 0x01]),
        ("sta_absolute", &[0x8D, 0x00, 0x02]),
        ("inc_absolute_x", &[0xFE, 0x00, 0x02]),
    ];

    for (name, pattern) in patterns {
        group.bench_function(name, |b| {
            let (mut cpu, mut memory) = setup(pattern);
            b.iter(|| step(&mut cpu, black_box(&mut memory)));
        });
    }

    group.bench_function("jmp_absolute", |b| {
        let (mut cpu, mut memory) = setup(&[0x4C, 0x00, 0xC0]);
        b.iter(|| step(&mut cpu, black_box(&mut memory)));
    });

    group.finish();
}

/// Benchmark a sequence of mixed instructions (realistic workload)
fn bench_instruction_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("instruction_sequences");

    group.bench_function("typical_sequence", |b| {
        // LDA #$00 / STA $0200 / LDX #$05 / INX / DEX / BNE -10
        let (mut cpu, mut memory) = setup(&[
            0xA9, 0x00, 0x8D, 0x00, 0x02, 0xA2, 0x05, 0xE8, 0xCA, 0xD0, 0xF6,
        ]);

        b.iter(|| {
            for _ in 0..6 {
                step(&mut cpu, black_box(&mut memory));
            }
        });
    });

    group.finish();
}

/// Benchmark raw cycle throughput
fn bench_frame_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_execution");
    group.sample_size(20);

    group.bench_function("29780_cycles_one_frame", |b| {
        let (mut cpu, mut memory) = setup(&[0xEA]);

        b.iter(|| {
            for _ in 0..29_780 {
                cpu.tick(black_box(&mut memory));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cpu_instructions,
    bench_instruction_sequence,
    bench_frame_execution
);
criterion_main!(benches);
