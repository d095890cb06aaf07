// CPU module - 6502 processor implementation
//
// The CPU is stepped one bus cycle at a time. Every instruction is split into
// the opcode fetch, the bus cycles of its addressing mode and the bus cycles of
// its body; `tick` performs exactly one of them and remembers where it stopped,
// so the interpreter can be suspended between any two cycles.
//
// Interrupt latches are polled only at an instruction boundary, in the order
// reset, NMI, IRQ.

pub mod addressing;
mod execute;
mod instructions;
pub mod opcodes;

#[cfg(test)]
mod tests;

use crate::bus::{CycleType, MemoryMappedDevice};
use addressing::AddressingResult;
use log::warn;
use opcodes::{Instruction, Opcode, OPCODE_TABLE};
use serde::{Deserialize, Serialize};

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: Negative flag (bit 7)
/// - V: Overflow flag (bit 6)
/// - -: Unused flag (bit 5, always 1)
/// - B: Break command flag (bit 4)
/// - D: Decimal mode flag (bit 3, unused in NES)
/// - I: Interrupt disable flag (bit 2)
/// - Z: Zero flag (bit 1)
/// - C: Carry flag (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D (unused in NES)
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Interrupt vectors
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Hardware interrupt sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Reset,
    Nmi,
    Irq,
}

impl Interrupt {
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// Where the interpreter resumes on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Poll interrupt latches (unless an interrupt sequence just ended) and fetch an opcode
    Fetch,
    /// Seven-cycle hardware interrupt sequence
    Interrupt(Interrupt),
    /// Addressing mode cycles
    Address,
    /// Indexed writes read the effective address once before writing
    DummyRead,
    /// Instruction body cycles
    Execute,
    /// Frozen by HLT until reset
    Halted,
}

/// Outcome of one micro-step of an addressing mode or instruction body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MicroStep {
    /// A bus cycle was performed and more follow
    Next(CycleType),
    /// A bus cycle was performed and it was the last one of the sequence
    Last(CycleType),
    /// The sequence ended without using the bus this cycle
    Done,
}

/// Serializable snapshot of the register file
///
/// Used by tests and front-ends to compare CPU state against known-good traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    /// Total cycles ticked since power-on
    pub cycles: u64,
}

/// CPU structure representing the 6502 processor state
#[derive(Debug, Clone)]
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Total cycles ticked since power-on
    pub cycles: u64,

    // Decoder state
    opcode: u8,
    op: Opcode,
    phase: Phase,
    /// Micro-step index within the current phase
    step: u8,
    /// Whether the next opcode fetch polls the interrupt latches
    poll: bool,

    // Operand state carried between cycles
    operand: AddressingResult,
    /// Zero page pointer of the indexed and indirect modes
    pointer: u8,
    /// Byte carried between cycles (RMW value, vector low byte)
    data: u8,
    /// Vector selected by BRK after checking for a pending NMI
    vector: u16,

    // Interrupt latches
    reset_requested: bool,
    nmi_requested: bool,
    irq_requested: bool,
}

impl Cpu {
    /// Create a new CPU instance in its power-on state
    ///
    /// - All registers (A, X, Y, SP, PC) are set to 0
    /// - Only the Interrupt Disable flag (and the always-set bit 5) is set
    /// - No interrupt is latched
    ///
    /// The program counter is loaded by the reset sequence, which runs once
    /// the reset latch is raised with [`Cpu::request_reset`]. Its three
    /// suppressed pushes leave SP at $FD.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: flags::UNUSED | flags::INTERRUPT_DISABLE,
            cycles: 0,
            opcode: 0,
            op: OPCODE_TABLE[0],
            phase: Phase::Fetch,
            step: 0,
            poll: true,
            operand: AddressingResult::default(),
            pointer: 0,
            data: 0,
            vector: IRQ_VECTOR,
            reset_requested: false,
            nmi_requested: false,
            irq_requested: false,
        }
    }

    // ========================================
    // Stepping
    // ========================================

    /// Perform exactly one bus cycle
    ///
    /// Returns whether the cycle was a read or a write. Cycles that do not
    /// touch the bus (the internal cycles of a halted CPU) report `Read`.
    pub fn tick(&mut self, bus: &mut dyn MemoryMappedDevice) -> CycleType {
        self.cycles = self.cycles.wrapping_add(1);

        loop {
            let step = match self.phase {
                Phase::Fetch => {
                    if let Some(interrupt) = self.poll_interrupts() {
                        self.enter(Phase::Interrupt(interrupt));
                        continue;
                    }
                    self.fetch_opcode(bus);
                    return CycleType::Read;
                }
                Phase::Halted => {
                    if self.reset_requested {
                        self.reset_requested = false;
                        self.enter(Phase::Interrupt(Interrupt::Reset));
                        continue;
                    }
                    return CycleType::Read;
                }
                Phase::Interrupt(interrupt) => self.interrupt_step(bus, interrupt),
                Phase::Address => self.address_step(bus),
                Phase::DummyRead => {
                    bus.read(self.operand.address);
                    MicroStep::Last(CycleType::Read)
                }
                Phase::Execute => self.execute_step(bus),
            };

            match step {
                MicroStep::Next(cycle) => {
                    self.step += 1;
                    return cycle;
                }
                MicroStep::Last(cycle) => {
                    self.complete_phase();
                    return cycle;
                }
                MicroStep::Done => self.complete_phase(),
            }
        }
    }

    /// Whether the next tick starts a new instruction (or the CPU is halted)
    ///
    /// This is the only point at which the CPU can be paused or have its
    /// state captured without losing an in-flight instruction.
    pub fn at_instruction_boundary(&self) -> bool {
        matches!(self.phase, Phase::Fetch | Phase::Halted)
    }

    /// Whether an HLT opcode froze the CPU
    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.step = 0;
    }

    fn complete_phase(&mut self) {
        match self.phase {
            Phase::Address => self.begin_execute(),
            Phase::DummyRead => self.enter(Phase::Execute),
            Phase::Interrupt(_) => {
                // The first opcode of the handler is fetched without polling again
                self.poll = false;
                self.enter(Phase::Fetch);
            }
            _ => self.enter(Phase::Fetch),
        }
    }

    /// Check the latches in priority order, consuming the one that is taken
    fn poll_interrupts(&mut self) -> Option<Interrupt> {
        if !std::mem::replace(&mut self.poll, true) {
            return None;
        }

        if std::mem::take(&mut self.reset_requested) {
            Some(Interrupt::Reset)
        } else if std::mem::take(&mut self.nmi_requested) {
            Some(Interrupt::Nmi)
        } else if std::mem::take(&mut self.irq_requested) {
            // A masked IRQ is still acknowledged
            (!self.get_interrupt_disable()).then_some(Interrupt::Irq)
        } else {
            None
        }
    }

    fn fetch_opcode(&mut self, bus: &mut dyn MemoryMappedDevice) {
        let address = self.pc;
        self.opcode = self.fetch(bus);
        self.op = OPCODE_TABLE[self.opcode as usize];
        self.operand = AddressingResult::default();

        let phase = match self.op.instruction {
            Instruction::Hlt => {
                warn!(
                    "CPU halted by opcode ${:02X} at ${:04X}",
                    self.opcode, address
                );
                Phase::Halted
            }
            // JMP reads its own operand bytes
            Instruction::Jmp => Phase::Execute,
            _ => Phase::Address,
        };
        self.enter(phase);
    }

    fn begin_execute(&mut self) {
        if self.op.instruction.is_branch() && !self.branch_taken() {
            self.enter(Phase::Fetch);
        } else if self.op.instruction.writes_indexed()
            && self.op.mode.is_indexed()
            && !self.operand.page_crossed
        {
            self.enter(Phase::DummyRead);
        } else {
            self.enter(Phase::Execute);
        }
    }

    // ========================================
    // Interrupt latches
    // ========================================

    /// Raise the reset latch; serviced at the next instruction boundary or while halted
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Raise the NMI latch
    pub fn request_nmi(&mut self) {
        self.nmi_requested = true;
    }

    /// Raise the IRQ latch
    ///
    /// The latch is consumed at the next instruction boundary even when the
    /// Interrupt Disable flag masks it, so level-triggered sources must keep
    /// raising it while asserted.
    pub fn request_irq(&mut self) {
        self.irq_requested = true;
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_requested
    }

    pub fn irq_pending(&self) -> bool {
        self.irq_requested
    }

    // ========================================
    // State snapshots
    // ========================================

    pub fn state(&self) -> CpuState {
        CpuState {
            pc: self.pc,
            sp: self.sp,
            a: self.a,
            x: self.x,
            y: self.y,
            p: self.status,
            cycles: self.cycles,
        }
    }

    /// Load registers from a snapshot and resume at an instruction boundary
    pub fn set_state(&mut self, state: &CpuState) {
        self.pc = state.pc;
        self.sp = state.sp;
        self.a = state.a;
        self.x = state.x;
        self.y = state.y;
        self.status = state.p | flags::UNUSED;
        self.cycles = state.cycles;
        self.poll = true;
        self.enter(Phase::Fetch);
    }

    // ========================================
    // Bus helpers
    // ========================================

    /// Read the byte at PC and advance PC
    fn fetch(&mut self, bus: &mut dyn MemoryMappedDevice) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn push(&mut self, bus: &mut dyn MemoryMappedDevice, value: u8) {
        bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn read_stack(&self, bus: &mut dyn MemoryMappedDevice) -> u8 {
        bus.read(0x0100 | self.sp as u16)
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    /// Replace the status register with a value pulled from the stack
    ///
    /// Bit 5 always reads back set and the Break flag does not exist outside
    /// the pushed copy.
    #[inline]
    fn set_status_from_stack(&mut self, value: u8) {
        self.status = (value & !flags::BREAK) | flags::UNUSED;
    }

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn get_break(&self) -> bool {
        self.get_flag(flags::BREAK)
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn set_break(&mut self, value: bool) {
        self.update_flag(flags::BREAK, value);
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative flags based on a value
    /// This is a common pattern after load and arithmetic operations
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
