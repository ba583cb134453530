mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu, Instruction};

impl Cpu {
    /// Execute one decoded instruction and return the number of T-cycles it
    /// took. The opcode byte itself has already been fetched; operand bytes
    /// are fetched here.
    ///
    /// `Prefix` fetches the second byte and runs the CB table.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instr: Instruction) -> u32 {
        use Instruction::*;

        match instr {
            Nop => 4,
            Stop => self.exec_stop(bus),
            Halt => self.exec_halt(bus),
            Di => self.exec_di(),
            Ei => self.exec_ei(),
            Prefix => self.step_cb(bus),

            LdR16Imm(reg) => self.exec_ld_r16_imm(bus, reg),
            LdIndirectA(ind) => self.exec_ld_indirect_a(bus, ind),
            LdAIndirect(ind) => self.exec_ld_a_indirect(bus, ind),
            LdImm16Sp => self.exec_ld_imm16_sp(bus),
            LdImm8(dst) => self.exec_ld_imm8(bus, dst),
            Ld(dst, src) => self.exec_ld(bus, dst, src),
            LdhImmA => self.exec_ldh_imm_a(bus),
            LdhAImm => self.exec_ldh_a_imm(bus),
            LdhCA => self.exec_ldh_c_a(bus),
            LdhAC => self.exec_ldh_a_c(bus),
            LdImm16A => self.exec_ld_imm16_a(bus),
            LdAImm16 => self.exec_ld_a_imm16(bus),
            LdHlSpImm => self.exec_ld_hl_sp_imm(bus),
            LdSpHl => self.exec_ld_sp_hl(),

            IncR16(reg) => self.exec_inc16(reg),
            DecR16(reg) => self.exec_dec16(reg),
            AddHl(reg) => self.exec_add_hl(reg),
            AddSpImm => self.exec_add_sp_imm(bus),
            Inc8(operand) => self.exec_inc8(bus, operand),
            Dec8(operand) => self.exec_dec8(bus, operand),
            Alu(op, operand) => self.exec_alu(bus, op, operand),
            AluImm(op) => self.exec_alu_imm(bus, op),

            Rlca | Rrca | Rla | Rra => self.exec_rotate_a(instr),
            Daa => self.exec_daa(),
            Cpl => self.exec_cpl(),
            Scf => self.exec_scf(),
            Ccf => self.exec_ccf(),

            Jr(cond) => self.exec_jr(bus, cond),
            Jp(cond) => self.exec_jp(bus, cond),
            JpHl => self.exec_jp_hl(),
            Call(cond) => self.exec_call(bus, cond),
            Ret(cond) => self.exec_ret(bus, cond),
            Reti => self.exec_reti(bus),
            Rst(vector) => self.exec_rst(bus, vector),
            Push(reg) => self.exec_push(bus, reg),
            Pop(reg) => self.exec_pop(bus, reg),
        }
    }
}
