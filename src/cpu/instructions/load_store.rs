// Load and store instructions for 6502 CPU

use crate::cpu::opcodes::Instruction;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Load Instructions
    // ========================================
    // Load instructions read a value from memory into a register
    // and update the Zero (Z) and Negative (N) flags.

    /// LDA - Load Accumulator
    ///
    /// Flags affected: Z, N
    pub fn lda(&mut self, value: u8) {
        self.a = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDX - Load X Register
    ///
    /// Flags affected: Z, N
    pub fn ldx(&mut self, value: u8) {
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LDY - Load Y Register
    ///
    /// Flags affected: Z, N
    pub fn ldy(&mut self, value: u8) {
        self.y = value;
        self.update_zero_and_negative_flags(value);
    }

    /// LAX - Load Accumulator and X (undocumented)
    ///
    /// The immediate form loads the operand like the other modes.
    ///
    /// Flags affected: Z, N
    pub fn lax(&mut self, value: u8) {
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    // ========================================
    // Store Instructions
    // ========================================

    /// Value written by STA, STX, STY and SAX
    ///
    /// SAX stores A & X and leaves the flags alone.
    pub(crate) fn store_value(&self, instruction: Instruction) -> u8 {
        match instruction {
            Instruction::Stx => self.x,
            Instruction::Sty => self.y,
            Instruction::Sax => self.a & self.x,
            _ => self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_set_flags() {
        let mut cpu = Cpu::new();
        cpu.lda(0x00);
        assert!(cpu.get_zero());

        cpu.ldx(0x80);
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.get_negative());
        assert!(!cpu.get_zero());

        cpu.ldy(0x01);
        assert_eq!(cpu.y, 0x01);
        assert!(!cpu.get_negative());
    }

    #[test]
    fn test_lax_loads_both_registers() {
        let mut cpu = Cpu::new();
        cpu.lax(0x9C);
        assert_eq!(cpu.a, 0x9C);
        assert_eq!(cpu.x, 0x9C);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_store_values() {
        let mut cpu = Cpu::new();
        cpu.a = 0xF0;
        cpu.x = 0x3C;
        cpu.y = 0x11;
        let status = cpu.status;

        assert_eq!(cpu.store_value(Instruction::Sta), 0xF0);
        assert_eq!(cpu.store_value(Instruction::Stx), 0x3C);
        assert_eq!(cpu.store_value(Instruction::Sty), 0x11);
        assert_eq!(cpu.store_value(Instruction::Sax), 0x30);
        assert_eq!(cpu.status, status);
    }
}
