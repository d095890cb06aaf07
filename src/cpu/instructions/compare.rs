// Comparison instructions for 6502 CPU
// These instructions compare a register with memory by subtraction without
// storing the result.

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Comparison Instructions
    // ========================================

    /// CMP - Compare Accumulator
    ///
    /// Flags affected:
    /// - C: Set if A >= M (unsigned)
    /// - Z: Set if A == M
    /// - N: Bit 7 of (A - M)
    pub fn cmp(&mut self, value: u8) {
        self.compare(self.a, value);
    }

    /// CPX - Compare X Register
    pub fn cpx(&mut self, value: u8) {
        self.compare(self.x, value);
    }

    /// CPY - Compare Y Register
    pub fn cpy(&mut self, value: u8) {
        self.compare(self.y, value);
    }

    fn compare(&mut self, register_value: u8, memory_value: u8) {
        let result = register_value.wrapping_sub(memory_value);
        self.set_carry(register_value >= memory_value);
        self.update_zero_and_negative_flags(result);
    }
}
