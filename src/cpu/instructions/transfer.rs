// Register transfer instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Transfer Instructions
    // ========================================
    // All transfers except TXS update the Zero and Negative flags from the
    // value copied.

    /// TAX - Transfer Accumulator to X
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer
    ///
    /// Flags affected: None
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_tay() {
        let mut cpu = Cpu::new();
        cpu.a = 0x80;
        cpu.tax();
        cpu.tay();
        assert_eq!((cpu.x, cpu.y), (0x80, 0x80));
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_txa_tya() {
        let mut cpu = Cpu::new();
        cpu.x = 0x00;
        cpu.txa();
        assert!(cpu.get_zero());

        cpu.y = 0x05;
        cpu.tya();
        assert_eq!(cpu.a, 0x05);
        assert!(!cpu.get_zero());
    }

    #[test]
    fn test_txs_sets_no_flags() {
        let mut cpu = Cpu::new();
        cpu.x = 0x00;
        let status = cpu.status;
        cpu.txs();
        assert_eq!(cpu.sp, 0x00);
        assert_eq!(cpu.status, status);
    }

    #[test]
    fn test_tsx_sets_flags() {
        let mut cpu = Cpu::new();
        cpu.sp = 0xFD;
        cpu.tsx();
        assert_eq!(cpu.x, 0xFD);
        assert!(cpu.get_negative());
    }
}
