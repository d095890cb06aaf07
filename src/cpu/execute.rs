// Instruction body execution
//
// Dispatches the cycles that follow the addressing mode. Instructions fall
// into a handful of bus patterns:
//
// ```text
// read     1 cycle   read operand, update registers
// implied  1 cycle   dummy read of PC, update registers
// store    1 cycle   write register
// rmw      3 cycles  read, write old value back, write new value
// ```
//
// Branches, jumps, stack operations and BRK have their own sequences.

use super::addressing::AddressingMode;
use super::opcodes::Instruction;
use super::{Cpu, MicroStep};
use crate::bus::{CycleType, MemoryMappedDevice};

impl Cpu {
    /// Perform the next bus cycle of the current instruction body
    pub(super) fn execute_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        use Instruction::*;

        let instruction = self.op.instruction;
        match instruction {
            // Read instructions
            Adc | Sbc | And | Ora | Eor | Cmp | Cpx | Cpy | Bit | Lda | Ldx | Ldy | Lax | Nop => {
                let value = self.read_operand(bus);
                self.apply_read(instruction, value);
                MicroStep::Last(CycleType::Read)
            }

            // Accumulator forms of the shifts, and register-only instructions
            Asl | Lsr | Rol | Ror if self.op.mode == AddressingMode::Accumulator => {
                bus.read(self.pc);
                self.a = self.apply_modify(instruction, self.a);
                MicroStep::Last(CycleType::Read)
            }
            Clc | Sec | Cli | Sei | Cld | Sed | Clv | Tax | Tay | Txa | Tya | Tsx | Txs | Inx
            | Iny | Dex | Dey => {
                bus.read(self.pc);
                self.apply_implied(instruction);
                MicroStep::Last(CycleType::Read)
            }

            Sta | Stx | Sty | Sax => {
                bus.write(self.operand.address, self.store_value(instruction));
                MicroStep::Last(CycleType::Write)
            }

            Asl | Lsr | Rol | Ror | Inc | Dec | Slo | Rla | Sre | Rra | Dcp | Isb => {
                self.read_modify_write_step(bus)
            }

            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => self.branch_step(bus),
            Jmp => self.jmp_step(bus),
            Jsr => self.jsr_step(bus),
            Rts => self.rts_step(bus),
            Rti => self.rti_step(bus),
            Pha | Php => self.push_step(bus),
            Pla | Plp => self.pull_step(bus),
            Brk => self.brk_step(bus),

            // Never decoded into this phase
            Hlt => MicroStep::Done,
        }
    }

    /// Read, write the unmodified value back, then write the result
    fn read_modify_write_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        let address = self.operand.address;
        match self.step {
            0 => {
                self.data = bus.read(address);
                MicroStep::Next(CycleType::Read)
            }
            1 => {
                bus.write(address, self.data);
                MicroStep::Next(CycleType::Write)
            }
            _ => {
                let result = self.apply_modify(self.op.instruction, self.data);
                bus.write(address, result);
                MicroStep::Last(CycleType::Write)
            }
        }
    }

    fn apply_read(&mut self, instruction: Instruction, value: u8) {
        match instruction {
            Instruction::Adc => self.adc(value),
            Instruction::Sbc => self.sbc(value),
            Instruction::And => self.and(value),
            Instruction::Ora => self.ora(value),
            Instruction::Eor => self.eor(value),
            Instruction::Cmp => self.cmp(value),
            Instruction::Cpx => self.cpx(value),
            Instruction::Cpy => self.cpy(value),
            Instruction::Bit => self.bit(value),
            Instruction::Lda => self.lda(value),
            Instruction::Ldx => self.ldx(value),
            Instruction::Ldy => self.ldy(value),
            Instruction::Lax => self.lax(value),
            _ => {}
        }
    }

    fn apply_modify(&mut self, instruction: Instruction, value: u8) -> u8 {
        match instruction {
            Instruction::Asl => self.asl(value),
            Instruction::Lsr => self.lsr(value),
            Instruction::Rol => self.rol(value),
            Instruction::Ror => self.ror(value),
            Instruction::Inc => self.inc(value),
            Instruction::Dec => self.dec(value),
            Instruction::Slo => self.slo(value),
            Instruction::Rla => self.rla(value),
            Instruction::Sre => self.sre(value),
            Instruction::Rra => self.rra(value),
            Instruction::Dcp => self.dcp(value),
            Instruction::Isb => self.isb(value),
            _ => value,
        }
    }

    fn apply_implied(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Clc => self.clc(),
            Instruction::Sec => self.sec(),
            Instruction::Cli => self.cli(),
            Instruction::Sei => self.sei(),
            Instruction::Cld => self.cld(),
            Instruction::Sed => self.sed(),
            Instruction::Clv => self.clv(),
            Instruction::Tax => self.tax(),
            Instruction::Tay => self.tay(),
            Instruction::Txa => self.txa(),
            Instruction::Tya => self.tya(),
            Instruction::Tsx => self.tsx(),
            Instruction::Txs => self.txs(),
            Instruction::Inx => self.inx(),
            Instruction::Iny => self.iny(),
            Instruction::Dex => self.dex(),
            Instruction::Dey => self.dey(),
            _ => {}
        }
    }
}
