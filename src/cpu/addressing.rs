// Addressing modes module for 6502 CPU
// Implements the bus cycles of all 13 addressing modes used by the 6502 processor
//
// Each mode is a short sequence of bus accesses. `address_step` performs one
// of them per call; the instruction body starts once the effective address is
// known. Indexed modes read the unindexed page first and only spend the extra
// cycle when the index carries into the high byte.

use super::{Cpu, MicroStep};
use crate::bus::{CycleType, MemoryMappedDevice};

/// Result of an addressing mode calculation
///
/// Contains information about the effective address, whether a page boundary
/// was crossed (which adds an extra cycle), and the operand value if available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressingResult {
    /// The effective address where the data is located
    pub address: u16,

    /// Whether a page boundary was crossed during address calculation
    ///
    /// For branches this records whether the taken branch lands on another page.
    pub page_crossed: bool,

    /// The operand byte for immediate mode and the offset for relative mode
    /// None for other modes that read from memory
    pub value: Option<u8>,
}

impl AddressingResult {
    /// Create a new addressing result with an address
    pub fn new(address: u16) -> Self {
        Self {
            address,
            page_crossed: false,
            value: None,
        }
    }

    /// Create a new addressing result with an immediate value
    pub fn immediate(value: u8) -> Self {
        Self {
            address: 0, // Not used for immediate mode
            page_crossed: false,
            value: Some(value),
        }
    }

    /// Set the page_crossed flag
    pub fn with_page_cross(mut self, crossed: bool) -> Self {
        self.page_crossed = crossed;
        self
    }
}

/// Addressing modes supported by the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Implied - No operand (e.g., CLC, NOP)
    Implied,

    /// Accumulator - Operate on accumulator (e.g., LSR A)
    Accumulator,

    /// Immediate - 8-bit constant (e.g., LDA #$01)
    Immediate,

    /// Zero Page - Address in zero page $00-$FF (e.g., LDA $80)
    ZeroPage,

    /// Zero Page,X - Zero page address + X register (e.g., LDA $80,X)
    ZeroPageX,

    /// Zero Page,Y - Zero page address + Y register (e.g., LDX $80,Y)
    ZeroPageY,

    /// Relative - Signed 8-bit offset for branches (e.g., BNE label)
    Relative,

    /// Absolute - 16-bit address (e.g., LDA $8000)
    Absolute,

    /// Absolute,X - 16-bit address + X register (e.g., LDA $8000,X)
    AbsoluteX,

    /// Absolute,Y - 16-bit address + Y register (e.g., LDA $8000,Y)
    AbsoluteY,

    /// Indirect - 16-bit pointer (JMP only) (e.g., JMP ($FFFC))
    Indirect,

    /// Indexed Indirect - Zero page pointer + X (e.g., LDA ($40,X))
    IndexedIndirect,

    /// Indirect Indexed - Zero page pointer + Y (e.g., LDA ($40),Y)
    IndirectIndexed,
}

impl AddressingMode {
    /// Modes that add an index to a 16-bit base and may cross a page
    pub fn is_indexed(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectIndexed
        )
    }
}

/// Helper function to check if a page boundary was crossed
///
/// A page boundary is crossed when adding an offset to a base address
/// causes the high byte of the address to change.
#[inline]
pub(super) fn page_crossed(base: u16, target: u16) -> bool {
    (base & 0xFF00) != (target & 0xFF00)
}

impl Cpu {
    /// Perform the next bus cycle of the current addressing mode
    ///
    /// JMP and HLT never get here: JMP reads its own operand and HLT has none.
    pub(super) fn address_step(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        use AddressingMode::*;

        match (self.op.mode, self.step) {
            // No operand, or an operand that the instruction body does not need
            (Implied | Accumulator | Indirect, _) => MicroStep::Done,

            // The operand fetch shares its cycle with the instruction body
            (Immediate, _) => {
                let value = self.fetch(bus);
                self.operand = AddressingResult::immediate(value);
                MicroStep::Done
            }

            (Relative, _) => {
                let offset = self.fetch(bus);
                self.operand = AddressingResult::immediate(offset);
                MicroStep::Last(CycleType::Read)
            }

            (ZeroPage, _) => {
                let address = self.fetch(bus);
                self.operand = AddressingResult::new(address as u16);
                MicroStep::Last(CycleType::Read)
            }

            // ========================================
            // Zero page indexed
            // ========================================
            (ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed, 0) => {
                self.pointer = self.fetch(bus);
                MicroStep::Next(CycleType::Read)
            }
            (ZeroPageX, _) => {
                // Dummy read of the unindexed address; the sum wraps within page zero
                bus.read(self.pointer as u16);
                self.operand = AddressingResult::new(self.pointer.wrapping_add(self.x) as u16);
                MicroStep::Last(CycleType::Read)
            }
            (ZeroPageY, _) => {
                bus.read(self.pointer as u16);
                self.operand = AddressingResult::new(self.pointer.wrapping_add(self.y) as u16);
                MicroStep::Last(CycleType::Read)
            }

            // ========================================
            // Absolute
            // ========================================
            (Absolute | AbsoluteX | AbsoluteY, 0) => {
                let low = self.fetch(bus);
                self.operand = AddressingResult::new(low as u16);
                MicroStep::Next(CycleType::Read)
            }
            (Absolute, _) => {
                let high = self.fetch(bus);
                self.operand.address |= (high as u16) << 8;
                MicroStep::Last(CycleType::Read)
            }
            (AbsoluteX | AbsoluteY, 1) => {
                let high = self.fetch(bus);
                self.operand.address |= (high as u16) << 8;
                let index = if self.op.mode == AbsoluteX { self.x } else { self.y };
                self.apply_index(index)
            }
            (AbsoluteX | AbsoluteY, _) => self.fix_high_byte(bus),

            // ========================================
            // Indirect
            // ========================================
            (IndexedIndirect, 1) => {
                bus.read(self.pointer as u16);
                self.pointer = self.pointer.wrapping_add(self.x);
                MicroStep::Next(CycleType::Read)
            }
            (IndexedIndirect, 2) => {
                let low = bus.read(self.pointer as u16);
                self.operand = AddressingResult::new(low as u16);
                MicroStep::Next(CycleType::Read)
            }
            (IndexedIndirect, _) => {
                let high = bus.read(self.pointer.wrapping_add(1) as u16);
                self.operand.address |= (high as u16) << 8;
                MicroStep::Last(CycleType::Read)
            }

            (IndirectIndexed, 1) => {
                let low = bus.read(self.pointer as u16);
                self.operand = AddressingResult::new(low as u16);
                MicroStep::Next(CycleType::Read)
            }
            (IndirectIndexed, 2) => {
                let high = bus.read(self.pointer.wrapping_add(1) as u16);
                self.operand.address |= (high as u16) << 8;
                self.apply_index(self.y)
            }
            (IndirectIndexed, _) => self.fix_high_byte(bus),
        }
    }

    /// Add an index to the fetched base address
    ///
    /// Ends the addressing sequence unless the index carried into the high byte,
    /// in which case one more cycle reads the unfixed address.
    fn apply_index(&mut self, index: u8) -> MicroStep {
        let base = self.operand.address;
        let target = base.wrapping_add(index as u16);
        self.operand.address = target;

        if page_crossed(base, target) {
            self.operand.page_crossed = true;
            MicroStep::Next(CycleType::Read)
        } else {
            MicroStep::Last(CycleType::Read)
        }
    }

    /// Read the address formed by the base high byte and the indexed low byte
    fn fix_high_byte(&mut self, bus: &mut dyn MemoryMappedDevice) -> MicroStep {
        let target = self.operand.address;
        bus.read((target.wrapping_sub(0x0100) & 0xFF00) | (target & 0x00FF));
        MicroStep::Last(CycleType::Read)
    }
}
