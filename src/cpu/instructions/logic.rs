// Logical instructions for 6502 CPU
// These instructions perform bitwise operations on the accumulator.

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Logical Instructions
    // ========================================

    /// AND - Logical AND
    ///
    /// Operation: A = A & M
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, value: u8) {
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Logical Inclusive OR
    ///
    /// Operation: A = A | M
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, value: u8) {
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Exclusive OR
    ///
    /// Operation: A = A ^ M
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, value: u8) {
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Bit Test
    ///
    /// Tests bits in memory against the accumulator without changing either.
    ///
    /// - Z: Set if A & M is zero
    /// - V: Copied from bit 6 of M
    /// - N: Copied from bit 7 of M
    pub fn bit(&mut self, value: u8) {
        self.set_zero(self.a & value == 0);
        self.set_overflow(value & 0x40 != 0);
        self.set_negative(value & 0x80 != 0);
    }
}
