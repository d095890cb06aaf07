// Jump and subroutine instructions for 6502 CPU
// These instructions change the program counter: JMP, JSR, RTS and RTI.

use crate::bus::{CycleType, MemoryMappedDevice};
use crate::cpu::addressing::AddressingMode;
use crate::cpu::{Cpu, MicroStep};

impl Cpu {
    // ========================================
    // Jump Instructions
    // ========================================

    /// JMP - Jump
    ///
    /// JMP reads its own operand. The absolute form takes 3 cycles and the
    /// indirect form 5.
    ///
    /// The indirect form reproduces the 6502 page wrap bug: when the pointer
    /// is at $xxFF the high byte is read from $xx00 instead of the next page.
    ///
    /// # Example
    /// ```text
    /// JMP ($10FF) ; Low byte from $10FF, high byte from $1000
    /// ```
    pub(crate) fn jmp_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match (self.op.mode, self.step) {
            (_, 0) => {
                self.data = self.fetch(bus);
                MicroStep::Next(CycleType::Read)
            }
            (AddressingMode::Indirect, 1) => {
                let high = self.fetch(bus);
                self.operand.address = u16::from_le_bytes([self.data, high]);
                MicroStep::Next(CycleType::Read)
            }
            (AddressingMode::Indirect, 2) => {
                self.data = bus.read(self.operand.address);
                MicroStep::Next(CycleType::Read)
            }
            (AddressingMode::Indirect, _) => {
                let pointer = self.operand.address;
                let high_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let high = bus.read(high_addr);
                self.pc = u16::from_le_bytes([self.data, high]);
                MicroStep::Last(CycleType::Read)
            }
            (_, _) => {
                let high = bus.read(self.pc);
                self.pc = u16::from_le_bytes([self.data, high]);
                MicroStep::Last(CycleType::Read)
            }
        }
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes the address of the last operand byte (return address - 1),
    /// high byte first, then jumps. The target was fetched by the absolute
    /// addressing cycles.
    ///
    /// Cycles: 6
    pub(crate) fn jsr_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                self.read_stack(bus);
                MicroStep::Next(CycleType::Read)
            }
            1 => {
                let [_, high] = self.pc.wrapping_sub(1).to_le_bytes();
                self.push(bus, high);
                MicroStep::Next(CycleType::Write)
            }
            _ => {
                let [low, _] = self.pc.wrapping_sub(1).to_le_bytes();
                self.push(bus, low);
                self.pc = self.operand.address;
                MicroStep::Last(CycleType::Write)
            }
        }
    }

    /// RTS - Return from Subroutine
    ///
    /// Pulls the return address - 1 and increments it.
    ///
    /// Cycles: 6
    pub(crate) fn rts_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                bus.read(self.pc);
            }
            1 => {
                self.read_stack(bus);
                self.sp = self.sp.wrapping_add(1);
            }
            2 => {
                self.data = self.read_stack(bus);
                self.sp = self.sp.wrapping_add(1);
            }
            3 => {
                let high = self.read_stack(bus);
                self.pc = u16::from_le_bytes([self.data, high]);
            }
            _ => {
                bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                return MicroStep::Last(CycleType::Read);
            }
        }
        MicroStep::Next(CycleType::Read)
    }

    /// RTI - Return from Interrupt
    ///
    /// Pulls the status register (Break flag discarded) and then PC.
    ///
    /// Cycles: 6
    pub(crate) fn rti_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                bus.read(self.pc);
            }
            1 => {
                self.read_stack(bus);
                self.sp = self.sp.wrapping_add(1);
            }
            2 => {
                let status = self.read_stack(bus);
                self.set_status_from_stack(status);
                self.sp = self.sp.wrapping_add(1);
            }
            3 => {
                self.data = self.read_stack(bus);
                self.sp = self.sp.wrapping_add(1);
            }
            _ => {
                let high = self.read_stack(bus);
                self.pc = u16::from_le_bytes([self.data, high]);
                return MicroStep::Last(CycleType::Read);
            }
        }
        MicroStep::Next(CycleType::Read)
    }
}
