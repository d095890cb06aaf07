// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.
//
// Cycles:
// - 2 cycles if branch not taken
// - 3 cycles if branch taken
// - 4 cycles if branch taken and crosses page boundary

use crate::bus::{CycleType, MemoryMappedDevice};
use crate::cpu::addressing::page_crossed;
use crate::cpu::opcodes::Instruction;
use crate::cpu::{Cpu, MicroStep};

impl Cpu {
    // ========================================
    // Branch Instructions
    // ========================================

    /// Condition tested by the current branch opcode
    ///
    /// - BCC / BCS: Carry clear / set
    /// - BNE / BEQ: Zero clear / set
    /// - BPL / BMI: Negative clear / set
    /// - BVC / BVS: Overflow clear / set
    pub(crate) fn branch_taken(&self) -> bool {
        match self.op.instruction {
            Instruction::Bcc => !self.get_carry(),
            Instruction::Bcs => self.get_carry(),
            Instruction::Bne => !self.get_zero(),
            Instruction::Beq => self.get_zero(),
            Instruction::Bpl => !self.get_negative(),
            Instruction::Bmi => self.get_negative(),
            Instruction::Bvc => !self.get_overflow(),
            Instruction::Bvs => self.get_overflow(),
            _ => false,
        }
    }

    /// Cycles of a taken branch
    ///
    /// The offset is relative to the address of the next instruction. The
    /// first cycle reads the next opcode and adds the offset to PCL; a page
    /// crossing costs one more cycle that reads from the unfixed address.
    pub(crate) fn branch_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                bus.read(self.pc);
                let offset = self.operand.value.unwrap_or(0) as i8;
                let target = self.pc.wrapping_add(offset as u16);
                self.operand.address = target;

                if page_crossed(self.pc, target) {
                    self.operand.page_crossed = true;
                    MicroStep::Next(CycleType::Read)
                } else {
                    self.pc = target;
                    MicroStep::Last(CycleType::Read)
                }
            }
            _ => {
                let target = self.operand.address;
                bus.read((self.pc & 0xFF00) | (target & 0x00FF));
                self.pc = target;
                MicroStep::Last(CycleType::Read)
            }
        }
    }
}
