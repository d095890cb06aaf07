// Flag instructions for 6502 CPU
// These instructions set or clear a single status flag.

use crate::cpu::Cpu;

impl Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.set_carry(false);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.set_carry(true);
    }

    /// CLI - Clear Interrupt Disable
    ///
    /// Takes effect for the poll at the end of this instruction, so a pending
    /// IRQ is serviced right after CLI.
    pub fn cli(&mut self) {
        self.set_interrupt_disable(false);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.set_interrupt_disable(true);
    }

    /// CLD - Clear Decimal Mode
    ///
    /// The flag is stored but has no effect on the 2A03.
    pub fn cld(&mut self) {
        self.set_decimal(false);
    }

    /// SED - Set Decimal Mode
    pub fn sed(&mut self) {
        self.set_decimal(true);
    }

    /// CLV - Clear Overflow Flag
    pub fn clv(&mut self) {
        self.set_overflow(false);
    }
}
