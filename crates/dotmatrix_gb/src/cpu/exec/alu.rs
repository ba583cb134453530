use crate::cpu::{AluOp, Bus, Cpu, Flags, Instruction, Operand, Reg16, ShiftOp};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, operand: Operand) -> u32 {
        let value = self.read_operand(bus, operand);
        self.alu(op, value);
        if operand == Operand::HlIndirect {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.fetch8(bus);
        self.alu(op, value);
        8
    }

    pub(super) fn exec_add_hl(&mut self, reg: Reg16) -> u32 {
        let value = self.read_r16(reg);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(super) fn exec_rotate_a(&mut self, instr: Instruction) -> u32 {
        let op = match instr {
            Instruction::Rlca => ShiftOp::Rlc,
            Instruction::Rrca => ShiftOp::Rrc,
            Instruction::Rla => ShiftOp::Rl,
            _ => ShiftOp::Rr,
        };
        self.alu_rotate_a(op);
        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flags::N, true);
        self.regs.set_flag(Flags::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.regs.flag(Flags::C);
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::C, !carry);
        4
    }
}
