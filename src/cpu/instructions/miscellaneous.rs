// Miscellaneous instructions for 6502 CPU
// BRK and the hardware interrupt sequence it shares its shape with.

use crate::bus::{CycleType, MemoryMappedDevice};
use crate::cpu::{flags, Cpu, Interrupt, MicroStep, IRQ_VECTOR, NMI_VECTOR};

impl Cpu {
    /// BRK - Force Interrupt
    ///
    /// Skips the padding byte after the opcode, pushes PC and the status
    /// (with the Break flag set), then loads PC from the IRQ vector with
    /// interrupts disabled.
    ///
    /// An NMI pending when the status is pushed hijacks the sequence: the
    /// NMI vector is used instead and the NMI is consumed.
    ///
    /// Flags affected: B, I
    ///
    /// Cycles: 7
    pub(crate) fn brk_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        match self.step {
            0 => {
                self.set_break(true);
                self.fetch(bus);
                MicroStep::Next(CycleType::Read)
            }
            1 => {
                let [_, high] = self.pc.to_le_bytes();
                self.push(bus, high);
                MicroStep::Next(CycleType::Write)
            }
            2 => {
                let [low, _] = self.pc.to_le_bytes();
                self.push(bus, low);
                MicroStep::Next(CycleType::Write)
            }
            3 => {
                self.vector = if std::mem::take(&mut self.nmi_requested) {
                    NMI_VECTOR
                } else {
                    IRQ_VECTOR
                };
                self.push(bus, self.status | flags::BREAK | flags::UNUSED);
                MicroStep::Next(CycleType::Write)
            }
            4 => {
                self.set_interrupt_disable(true);
                self.data = bus.read(self.vector);
                MicroStep::Next(CycleType::Read)
            }
            _ => {
                let high = bus.read(self.vector.wrapping_add(1));
                self.pc = u16::from_le_bytes([self.data, high]);
                MicroStep::Last(CycleType::Read)
            }
        }
    }

    /// Hardware interrupt sequence (reset, NMI, IRQ)
    ///
    /// Two dummy reads of PC, three pushes (PCH, PCL, status with Break
    /// clear), then the vector. Reset turns the pushes into stack reads: the
    /// stack pointer still moves but nothing is written.
    ///
    /// Cycles: 7
    pub(crate) fn interrupt_step(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        interrupt: Interrupt,
    ) -> MicroStep {
        match self.step {
            0 | 1 => {
                if self.step == 0 {
                    self.set_break(false);
                }
                bus.read(self.pc);
                MicroStep::Next(CycleType::Read)
            }
            2..=4 => {
                let [low, high] = self.pc.to_le_bytes();
                let value = match self.step {
                    2 => high,
                    3 => low,
                    _ => (self.status & !flags::BREAK) | flags::UNUSED,
                };

                if interrupt == Interrupt::Reset {
                    self.read_stack(bus);
                    self.sp = self.sp.wrapping_sub(1);
                    MicroStep::Next(CycleType::Read)
                } else {
                    self.push(bus, value);
                    MicroStep::Next(CycleType::Write)
                }
            }
            5 => {
                self.set_interrupt_disable(true);
                self.data = bus.read(interrupt.vector());
                MicroStep::Next(CycleType::Read)
            }
            _ => {
                let high = bus.read(interrupt.vector().wrapping_add(1));
                self.pc = u16::from_le_bytes([self.data, high]);
                MicroStep::Last(CycleType::Read)
            }
        }
    }
}
