// Shift and rotate instructions for 6502 CPU
//
// Each operation takes the old value and returns the new one, so the same
// code serves the accumulator forms and the read-modify-write memory forms.

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Shift and Rotate Instructions
    // ========================================

    /// ASL - Arithmetic Shift Left
    ///
    /// Operation: C <- [76543210] <- 0
    ///
    /// Flags affected: C, Z, N
    pub fn asl(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.set_carry(value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }

    /// LSR - Logical Shift Right
    ///
    /// Operation: 0 -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N (N is always cleared)
    pub fn lsr(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.set_carry(value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }

    /// ROL - Rotate Left
    ///
    /// Operation: C <- [76543210] <- C
    ///
    /// Flags affected: C, Z, N
    pub fn rol(&mut self, value: u8) -> u8 {
        let result = (value << 1) | self.get_carry() as u8;
        self.set_carry(value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }

    /// ROR - Rotate Right
    ///
    /// Operation: C -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N
    pub fn ror(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | ((self.get_carry() as u8) << 7);
        self.set_carry(value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }
}
