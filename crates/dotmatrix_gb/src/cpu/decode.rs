//! Opcode decoding.
//!
//! Both opcode spaces are decoded into plain data. The primary table has
//! eleven holes (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD); the CB table is
//! total. Decoding never touches the bus; operands that follow the opcode
//! byte are fetched by the executor.

/// 8-bit operand slot as encoded in the low/middle three opcode bits:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operand {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Operand {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Operand::B,
            1 => Operand::C,
            2 => Operand::D,
            3 => Operand::E,
            4 => Operand::H,
            5 => Operand::L,
            6 => Operand::HlIndirect,
            _ => Operand::A,
        }
    }
}

/// 16-bit register pair used by loads and arithmetic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg16 {
    Bc,
    De,
    Hl,
    Sp,
}

impl Reg16 {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16::Bc,
            1 => Reg16::De,
            2 => Reg16::Hl,
            _ => Reg16::Sp,
        }
    }
}

/// 16-bit register pair used by PUSH/POP (AF replaces SP).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reg16Stack {
    Bc,
    De,
    Hl,
    Af,
}

impl Reg16Stack {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16Stack::Bc,
            1 => Reg16Stack::De,
            2 => Reg16Stack::Hl,
            _ => Reg16Stack::Af,
        }
    }
}

/// Memory operand of `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Indirect {
    Bc,
    De,
    HlInc,
    HlDec,
}

impl Indirect {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Indirect::Bc,
            1 => Indirect::De,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Condition {
    Nz,
    Z,
    Nc,
    C,
}

impl Condition {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Condition::Nz,
            1 => Condition::Z,
            2 => Condition::Nc,
            _ => Condition::C,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Rotate/shift group of the CB table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// A decoded primary-table instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// 0xCB: the next byte is decoded with [`decode_cb`].
    Prefix,

    /// LD rr,d16
    LdR16Imm(Reg16),
    /// LD (rr),A
    LdIndirectA(Indirect),
    /// LD A,(rr)
    LdAIndirect(Indirect),
    /// LD (a16),SP
    LdImm16Sp,
    /// LD r,d8
    LdImm8(Operand),
    /// LD dst,src
    Ld(Operand, Operand),
    /// LDH (a8),A
    LdhImmA,
    /// LDH A,(a8)
    LdhAImm,
    /// LD (C),A
    LdhCA,
    /// LD A,(C)
    LdhAC,
    /// LD (a16),A
    LdImm16A,
    /// LD A,(a16)
    LdAImm16,
    /// LD HL,SP+r8
    LdHlSpImm,
    /// LD SP,HL
    LdSpHl,

    IncR16(Reg16),
    DecR16(Reg16),
    AddHl(Reg16),
    /// ADD SP,r8
    AddSpImm,
    Inc8(Operand),
    Dec8(Operand),
    Alu(AluOp, Operand),
    AluImm(AluOp),

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr(Option<Condition>),
    Jp(Option<Condition>),
    JpHl,
    Call(Option<Condition>),
    Ret(Option<Condition>),
    Reti,
    /// RST to the given vector (0x00, 0x08, ..., 0x38).
    Rst(u8),
    Push(Reg16Stack),
    Pop(Reg16Stack),
}

/// A decoded CB-prefixed instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CbInstruction {
    Shift(ShiftOp, Operand),
    Bit(u8, Operand),
    Res(u8, Operand),
    Set(u8, Operand),
}

const fn decode_primary(opcode: u8) -> Option<Instruction> {
    use Instruction::*;

    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = (opcode >> 4) & 0x03;

    let instr = match opcode {
        0x00 => Nop,
        0x10 => Stop,
        0x76 => Halt,
        0xF3 => Di,
        0xFB => Ei,
        0xCB => Prefix,

        0x01 | 0x11 | 0x21 | 0x31 => LdR16Imm(Reg16::from_bits(p)),
        0x02 | 0x12 | 0x22 | 0x32 => LdIndirectA(Indirect::from_bits(p)),
        0x0A | 0x1A | 0x2A | 0x3A => LdAIndirect(Indirect::from_bits(p)),
        0x08 => LdImm16Sp,
        0x03 | 0x13 | 0x23 | 0x33 => IncR16(Reg16::from_bits(p)),
        0x0B | 0x1B | 0x2B | 0x3B => DecR16(Reg16::from_bits(p)),
        0x09 | 0x19 | 0x29 | 0x39 => AddHl(Reg16::from_bits(p)),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => Inc8(Operand::from_bits(y)),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => Dec8(Operand::from_bits(y)),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => LdImm8(Operand::from_bits(y)),

        0x07 => Rlca,
        0x0F => Rrca,
        0x17 => Rla,
        0x1F => Rra,
        0x27 => Daa,
        0x2F => Cpl,
        0x37 => Scf,
        0x3F => Ccf,

        0x18 => Jr(None),
        0x20 | 0x28 | 0x30 | 0x38 => Jr(Some(Condition::from_bits(y))),

        // 0x76 (HALT) is matched above.
        0x40..=0x7F => Ld(Operand::from_bits(y), Operand::from_bits(z)),
        0x80..=0xBF => Alu(AluOp::from_bits(y), Operand::from_bits(z)),

        0xC0 | 0xC8 | 0xD0 | 0xD8 => Ret(Some(Condition::from_bits(y))),
        0xC9 => Ret(None),
        0xD9 => Reti,
        0xC2 | 0xCA | 0xD2 | 0xDA => Jp(Some(Condition::from_bits(y))),
        0xC3 => Jp(None),
        0xE9 => JpHl,
        0xC4 | 0xCC | 0xD4 | 0xDC => Call(Some(Condition::from_bits(y))),
        0xCD => Call(None),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => Pop(Reg16Stack::from_bits(p)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => Push(Reg16Stack::from_bits(p)),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => Rst(opcode & 0x38),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => AluImm(AluOp::from_bits(y)),

        0xE0 => LdhImmA,
        0xF0 => LdhAImm,
        0xE2 => LdhCA,
        0xF2 => LdhAC,
        0xEA => LdImm16A,
        0xFA => LdAImm16,
        0xE8 => AddSpImm,
        0xF8 => LdHlSpImm,
        0xF9 => LdSpHl,

        // Opcode holes lock up real hardware.
        _ => return None,
    };
    Some(instr)
}

const fn build_primary_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_primary(i as u8);
        i += 1;
    }
    table
}

static PRIMARY_TABLE: [Option<Instruction>; 256] = build_primary_table();

/// Decode a primary-table opcode. Returns `None` for the opcode holes.
#[inline]
pub fn decode(opcode: u8) -> Option<Instruction> {
    PRIMARY_TABLE[opcode as usize]
}

/// Decode the byte following a 0xCB prefix.
#[inline]
pub fn decode_cb(opcode: u8) -> CbInstruction {
    let y = (opcode >> 3) & 0x07;
    let operand = Operand::from_bits(opcode);
    match opcode >> 6 {
        0 => CbInstruction::Shift(ShiftOp::from_bits(y), operand),
        1 => CbInstruction::Bit(y, operand),
        2 => CbInstruction::Res(y, operand),
        _ => CbInstruction::Set(y, operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_table_has_exactly_the_documented_holes() {
        let holes: Vec<u8> = (0..=255u8).filter(|&op| decode(op).is_none()).collect();
        assert_eq!(
            holes,
            vec![0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
    }

    #[test]
    fn halt_is_not_decoded_as_ld_hl_hl() {
        assert_eq!(decode(0x76), Some(Instruction::Halt));
        assert_eq!(
            decode(0x70),
            Some(Instruction::Ld(Operand::HlIndirect, Operand::B))
        );
    }

    #[test]
    fn cb_table_is_split_by_top_two_bits() {
        assert_eq!(decode_cb(0x37), CbInstruction::Shift(ShiftOp::Swap, Operand::A));
        assert_eq!(decode_cb(0x7E), CbInstruction::Bit(7, Operand::HlIndirect));
        assert_eq!(decode_cb(0x80), CbInstruction::Res(0, Operand::B));
        assert_eq!(decode_cb(0xFF), CbInstruction::Set(7, Operand::A));
    }
}
