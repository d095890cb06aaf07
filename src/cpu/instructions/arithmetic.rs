// Arithmetic instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Arithmetic Instructions
    // ========================================

    /// ADC - Add with Carry
    ///
    /// Adds the value from memory to the accumulator, plus the carry flag.
    /// This is used for multi-byte addition and arithmetic operations.
    ///
    /// Formula: A = A + M + C
    ///
    /// The Overflow (V) flag is set when the sign of the result is incorrect:
    /// - Adding two positive numbers produces a negative result
    /// - Adding two negative numbers produces a positive result
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, value: u8) {
        let carry = self.get_carry() as u16;

        // Perform addition with carry using u16 to detect overflow
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        // Overflow: both operands share a sign that the result does not
        self.set_overflow((self.a ^ result) & (value ^ result) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// SBC - Subtract with Carry
    ///
    /// Subtracts the value from memory from the accumulator, minus (1 - carry).
    ///
    /// Formula: A = A - M - (1 - C)
    ///
    /// Carry is set when no borrow occurred. The NES 2A03 has no decimal mode,
    /// so the Decimal flag never changes the result.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, value: u8) {
        let borrow = (!self.get_carry()) as i16;
        let difference = self.a as i16 - value as i16 - borrow;
        let result = difference as u8;

        self.set_carry(difference >= 0);
        self.set_overflow((self.a ^ result) & (!value ^ result) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// INC - Increment Memory
    ///
    /// Returns the incremented value to be written back.
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.update_zero_and_negative_flags(result);
        result
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.update_zero_and_negative_flags(result);
        result
    }

    /// INX - Increment X Register
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
