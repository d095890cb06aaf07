// Undocumented read-modify-write instructions
//
// Each one runs a shift or increment on memory and then feeds the result
// into an accumulator operation. They return the value written back.

use crate::cpu::Cpu;

impl Cpu {
    /// SLO - ASL memory, then ORA
    pub fn slo(&mut self, value: u8) -> u8 {
        let result = self.asl(value);
        self.ora(result);
        result
    }

    /// RLA - ROL memory, then AND
    pub fn rla(&mut self, value: u8) -> u8 {
        let result = self.rol(value);
        self.and(result);
        result
    }

    /// SRE - LSR memory, then EOR
    pub fn sre(&mut self, value: u8) -> u8 {
        let result = self.lsr(value);
        self.eor(result);
        result
    }

    /// RRA - ROR memory, then ADC with the carry it shifted out
    pub fn rra(&mut self, value: u8) -> u8 {
        let result = self.ror(value);
        self.adc(result);
        result
    }

    /// DCP - DEC memory, then CMP
    pub fn dcp(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.cmp(result);
        result
    }

    /// ISB - INC memory, then SBC
    pub fn isb(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.sbc(result);
        result
    }
}
