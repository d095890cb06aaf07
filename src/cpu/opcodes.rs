// Opcode decoding table for the 6502
//
// All 256 opcodes decode to an (instruction, addressing mode) pair. The
// undocumented opcodes used by NES software (LAX, SAX, DCP, ISB, SLO, RLA,
// SRE, RRA, the multi-byte NOPs and the alternate SBC at $EB) are regular
// entries. The twelve KIL/JAM opcodes decode to HLT, and the remaining
// unstable opcodes execute as NOPs of the matching length.

use super::addressing::AddressingMode;

/// Instruction executed by an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    // Official instructions
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,

    // Undocumented instructions
    /// LDA + LDX
    Lax,
    /// Store A & X
    Sax,
    /// DEC + CMP
    Dcp,
    /// INC + SBC
    Isb,
    /// ASL + ORA
    Slo,
    /// ROL + AND
    Rla,
    /// LSR + EOR
    Sre,
    /// ROR + ADC
    Rra,
    /// Halts the CPU until reset
    Hlt,
}

impl Instruction {
    /// Conditional branches
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Instruction::Bcc
                | Instruction::Bcs
                | Instruction::Beq
                | Instruction::Bmi
                | Instruction::Bne
                | Instruction::Bpl
                | Instruction::Bvc
                | Instruction::Bvs
        )
    }

    /// Instructions that write through an indexed address
    ///
    /// These always spend the extra indexing cycle: when no page is crossed
    /// they read the effective address once before the write sequence starts.
    pub fn writes_indexed(self) -> bool {
        matches!(
            self,
            Instruction::Sta
                | Instruction::Asl
                | Instruction::Lsr
                | Instruction::Rol
                | Instruction::Ror
                | Instruction::Inc
                | Instruction::Dec
                | Instruction::Slo
                | Instruction::Rla
                | Instruction::Sre
                | Instruction::Rra
                | Instruction::Dcp
                | Instruction::Isb
        )
    }
}

/// Decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddressingMode,
}

const fn op(instruction: Instruction, mode: AddressingMode) -> Opcode {
    Opcode { instruction, mode }
}

use AddressingMode::*;
use Instruction::*;

/// Decoding table indexed by opcode byte
pub const OPCODE_TABLE: [Opcode; 256] = [
    // 00
    op(Brk, Implied), op(Ora, IndexedIndirect), op(Hlt, Implied), op(Slo, IndexedIndirect),
    op(Nop, ZeroPage), op(Ora, ZeroPage), op(Asl, ZeroPage), op(Slo, ZeroPage),
    // 08
    op(Php, Implied), op(Ora, Immediate), op(Asl, Accumulator), op(Nop, Immediate),
    op(Nop, Absolute), op(Ora, Absolute), op(Asl, Absolute), op(Slo, Absolute),
    // 10
    op(Bpl, Relative), op(Ora, IndirectIndexed), op(Hlt, Implied), op(Slo, IndirectIndexed),
    op(Nop, ZeroPageX), op(Ora, ZeroPageX), op(Asl, ZeroPageX), op(Slo, ZeroPageX),
    // 18
    op(Clc, Implied), op(Ora, AbsoluteY), op(Nop, Implied), op(Slo, AbsoluteY),
    op(Nop, AbsoluteX), op(Ora, AbsoluteX), op(Asl, AbsoluteX), op(Slo, AbsoluteX),
    // 20
    op(Jsr, Absolute), op(And, IndexedIndirect), op(Hlt, Implied), op(Rla, IndexedIndirect),
    op(Bit, ZeroPage), op(And, ZeroPage), op(Rol, ZeroPage), op(Rla, ZeroPage),
    // 28
    op(Plp, Implied), op(And, Immediate), op(Rol, Accumulator), op(Nop, Immediate),
    op(Bit, Absolute), op(And, Absolute), op(Rol, Absolute), op(Rla, Absolute),
    // 30
    op(Bmi, Relative), op(And, IndirectIndexed), op(Hlt, Implied), op(Rla, IndirectIndexed),
    op(Nop, ZeroPageX), op(And, ZeroPageX), op(Rol, ZeroPageX), op(Rla, ZeroPageX),
    // 38
    op(Sec, Implied), op(And, AbsoluteY), op(Nop, Implied), op(Rla, AbsoluteY),
    op(Nop, AbsoluteX), op(And, AbsoluteX), op(Rol, AbsoluteX), op(Rla, AbsoluteX),
    // 40
    op(Rti, Implied), op(Eor, IndexedIndirect), op(Hlt, Implied), op(Sre, IndexedIndirect),
    op(Nop, ZeroPage), op(Eor, ZeroPage), op(Lsr, ZeroPage), op(Sre, ZeroPage),
    // 48
    op(Pha, Implied), op(Eor, Immediate), op(Lsr, Accumulator), op(Nop, Immediate),
    op(Jmp, Absolute), op(Eor, Absolute), op(Lsr, Absolute), op(Sre, Absolute),
    // 50
    op(Bvc, Relative), op(Eor, IndirectIndexed), op(Hlt, Implied), op(Sre, IndirectIndexed),
    op(Nop, ZeroPageX), op(Eor, ZeroPageX), op(Lsr, ZeroPageX), op(Sre, ZeroPageX),
    // 58
    op(Cli, Implied), op(Eor, AbsoluteY), op(Nop, Implied), op(Sre, AbsoluteY),
    op(Nop, AbsoluteX), op(Eor, AbsoluteX), op(Lsr, AbsoluteX), op(Sre, AbsoluteX),
    // 60
    op(Rts, Implied), op(Adc, IndexedIndirect), op(Hlt, Implied), op(Rra, IndexedIndirect),
    op(Nop, ZeroPage), op(Adc, ZeroPage), op(Ror, ZeroPage), op(Rra, ZeroPage),
    // 68
    op(Pla, Implied), op(Adc, Immediate), op(Ror, Accumulator), op(Nop, Immediate),
    op(Jmp, Indirect), op(Adc, Absolute), op(Ror, Absolute), op(Rra, Absolute),
    // 70
    op(Bvs, Relative), op(Adc, IndirectIndexed), op(Hlt, Implied), op(Rra, IndirectIndexed),
    op(Nop, ZeroPageX), op(Adc, ZeroPageX), op(Ror, ZeroPageX), op(Rra, ZeroPageX),
    // 78
    op(Sei, Implied), op(Adc, AbsoluteY), op(Nop, Implied), op(Rra, AbsoluteY),
    op(Nop, AbsoluteX), op(Adc, AbsoluteX), op(Ror, AbsoluteX), op(Rra, AbsoluteX),
    // 80
    op(Nop, Immediate), op(Sta, IndexedIndirect), op(Nop, Immediate), op(Sax, IndexedIndirect),
    op(Sty, ZeroPage), op(Sta, ZeroPage), op(Stx, ZeroPage), op(Sax, ZeroPage),
    // 88
    op(Dey, Implied), op(Nop, Immediate), op(Txa, Implied), op(Nop, Immediate),
    op(Sty, Absolute), op(Sta, Absolute), op(Stx, Absolute), op(Sax, Absolute),
    // 90
    op(Bcc, Relative), op(Sta, IndirectIndexed), op(Hlt, Implied), op(Nop, IndirectIndexed),
    op(Sty, ZeroPageX), op(Sta, ZeroPageX), op(Stx, ZeroPageY), op(Sax, ZeroPageY),
    // 98
    op(Tya, Implied), op(Sta, AbsoluteY), op(Txs, Implied), op(Nop, AbsoluteY),
    op(Nop, AbsoluteX), op(Sta, AbsoluteX), op(Nop, AbsoluteY), op(Nop, AbsoluteY),
    // A0
    op(Ldy, Immediate), op(Lda, IndexedIndirect), op(Ldx, Immediate), op(Lax, IndexedIndirect),
    op(Ldy, ZeroPage), op(Lda, ZeroPage), op(Ldx, ZeroPage), op(Lax, ZeroPage),
    // A8
    op(Tay, Implied), op(Lda, Immediate), op(Tax, Implied), op(Lax, Immediate),
    op(Ldy, Absolute), op(Lda, Absolute), op(Ldx, Absolute), op(Lax, Absolute),
    // B0
    op(Bcs, Relative), op(Lda, IndirectIndexed), op(Hlt, Implied), op(Lax, IndirectIndexed),
    op(Ldy, ZeroPageX), op(Lda, ZeroPageX), op(Ldx, ZeroPageY), op(Lax, ZeroPageY),
    // B8
    op(Clv, Implied), op(Lda, AbsoluteY), op(Tsx, Implied), op(Nop, AbsoluteY),
    op(Ldy, AbsoluteX), op(Lda, AbsoluteX), op(Ldx, AbsoluteY), op(Lax, AbsoluteY),
    // C0
    op(Cpy, Immediate), op(Cmp, IndexedIndirect), op(Nop, Immediate), op(Dcp, IndexedIndirect),
    op(Cpy, ZeroPage), op(Cmp, ZeroPage), op(Dec, ZeroPage), op(Dcp, ZeroPage),
    // C8
    op(Iny, Implied), op(Cmp, Immediate), op(Dex, Implied), op(Nop, Immediate),
    op(Cpy, Absolute), op(Cmp, Absolute), op(Dec, Absolute), op(Dcp, Absolute),
    // D0
    op(Bne, Relative), op(Cmp, IndirectIndexed), op(Hlt, Implied), op(Dcp, IndirectIndexed),
    op(Nop, ZeroPageX), op(Cmp, ZeroPageX), op(Dec, ZeroPageX), op(Dcp, ZeroPageX),
    // D8
    op(Cld, Implied), op(Cmp, AbsoluteY), op(Nop, Implied), op(Dcp, AbsoluteY),
    op(Nop, AbsoluteX), op(Cmp, AbsoluteX), op(Dec, AbsoluteX), op(Dcp, AbsoluteX),
    // E0
    op(Cpx, Immediate), op(Sbc, IndexedIndirect), op(Nop, Immediate), op(Isb, IndexedIndirect),
    op(Cpx, ZeroPage), op(Sbc, ZeroPage), op(Inc, ZeroPage), op(Isb, ZeroPage),
    // E8
    op(Inx, Implied), op(Sbc, Immediate), op(Nop, Implied), op(Sbc, Immediate),
    op(Cpx, Absolute), op(Sbc, Absolute), op(Inc, Absolute), op(Isb, Absolute),
    // F0
    op(Beq, Relative), op(Sbc, IndirectIndexed), op(Hlt, Implied), op(Isb, IndirectIndexed),
    op(Nop, ZeroPageX), op(Sbc, ZeroPageX), op(Inc, ZeroPageX), op(Isb, ZeroPageX),
    // F8
    op(Sed, Implied), op(Sbc, AbsoluteY), op(Nop, Implied), op(Isb, AbsoluteY),
    op(Nop, AbsoluteX), op(Sbc, AbsoluteX), op(Inc, AbsoluteX), op(Isb, AbsoluteX),
];
