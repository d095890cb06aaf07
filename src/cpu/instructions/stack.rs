// Stack operation instructions for 6502 CPU
// These instructions handle pushing and pulling values to/from the stack.
//
// The stack lives in page $01 and grows downward. Pushes write at SP and
// then decrement it; pulls increment SP and then read.

use crate::bus::{CycleType, MemoryMappedDevice};
use crate::cpu::opcodes::Instruction;
use crate::cpu::{flags, Cpu, MicroStep};

impl Cpu {
    // ========================================
    // Stack Operation Instructions
    // ========================================

    /// PHA - Push Accumulator / PHP - Push Processor Status
    ///
    /// PHP pushes the status with the Break flag set.
    ///
    /// Cycles: 3
    pub(crate) fn push_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                bus.read(self.pc);
                MicroStep::Next(CycleType::Read)
            }
            _ => {
                let value = match self.op.instruction {
                    Instruction::Php => self.status | flags::BREAK | flags::UNUSED,
                    _ => self.a,
                };
                self.push(bus, value);
                MicroStep::Last(CycleType::Write)
            }
        }
    }

    /// PLA - Pull Accumulator / PLP - Pull Processor Status
    ///
    /// PLA updates Zero and Negative from the pulled value. PLP discards the
    /// Break flag and keeps bit 5 set.
    ///
    /// Cycles: 4
    pub(crate) fn pull_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                bus.read(self.pc);
                MicroStep::Next(CycleType::Read)
            }
            1 => {
                self.read_stack(bus);
                self.sp = self.sp.wrapping_add(1);
                MicroStep::Next(CycleType::Read)
            }
            _ => {
                let value = self.read_stack(bus);
                match self.op.instruction {
                    Instruction::Plp => self.set_status_from_stack(value),
                    _ => {
                        self.a = value;
                        self.update_zero_and_negative_flags(value);
                    }
                }
                MicroStep::Last(CycleType::Read)
            }
        }
    }
}
