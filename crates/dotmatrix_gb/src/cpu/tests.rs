use super::*;
use crate::error::EmuError;

struct TestBus {
    memory: [u8; 0x10000],
    fault: Option<EmuError>,
    ticked: u64,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            fault: None,
            ticked: 0,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn tick(&mut self, cycles: u32) {
        self.ticked += u64::from(cycles);
    }

    fn take_fault(&mut self) -> Option<EmuError> {
        self.fault.take()
    }
}

fn load(bus: &mut TestBus, at: u16, program: &[u8]) {
    let start = at as usize;
    bus.memory[start..start + program.len()].copy_from_slice(program);
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).expect("step should succeed")
}

fn bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

#[test]
fn nop_advances_pc() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();
    // 0x0000: NOP
    bus.memory[0x0000] = 0x00;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(bus.ticked, 4);
}

#[test]
fn boot_state_matches_model() {
    let dmg = Cpu::new();
    assert_eq!(dmg.regs.af(), 0x01B0);
    assert_eq!(dmg.regs.bc(), 0x0013);
    assert_eq!(dmg.regs.de(), 0x00D8);
    assert_eq!(dmg.regs.hl(), 0x014D);
    assert_eq!(dmg.regs.sp, 0xFFFE);
    assert_eq!(dmg.regs.pc, 0x0100);
    assert!(!dmg.ime);

    let cgb = Cpu::with_model(crate::machine::GameBoyModel::Cgb);
    assert_eq!(cgb.regs.a, 0x11);
    assert_eq!(cgb.regs.f, Flags::Z);
}

#[test]
fn flag_register_low_nibble_always_reads_zero() {
    let mut cpu = Cpu::zeroed();
    cpu.regs.set_af(0x12FF);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f.bits(), 0xF0);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn add_sub_cp_set_flags() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // Program:
    // 0x0000: ADD A, 0xC6   (0x3A + 0xC6 = 0x100)
    // 0x0002: LD A, 0x3E
    // 0x0004: SUB 0x0F
    // 0x0006: CP 0x40
    // 0x0008: CP 0x2F
    load(
        &mut bus,
        0x0000,
        &[0xC6, 0xC6, 0x3E, 0x3E, 0xD6, 0x0F, 0xFE, 0x40, 0xFE, 0x2F],
    );
    cpu.regs.a = 0x3A;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);

    step(&mut cpu, &mut bus);
    // SUB 0x0F borrows from bit 4 but not from bit 8.
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x2F);
    assert_eq!(cpu.regs.f, Flags::N | Flags::H);

    // CP 0x40 leaves A alone and borrows.
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x2F);
    assert_eq!(cpu.regs.f, Flags::N | Flags::C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x2F);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N);
}

#[test]
fn adc_and_sbc_use_carry_in() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: ADC A, 0x0F
    // 0x0002: SBC A, 0x10
    load(&mut bus, 0x0000, &[0xCE, 0x0F, 0xDE, 0x10]);
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::C;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.regs.f, Flags::H);

    cpu.regs.set_flag(Flags::C, true);
    step(&mut cpu, &mut bus);
    // 0x10 - 0x10 - 1 = 0xFF with borrows out of both nibbles.
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.f, Flags::N | Flags::H | Flags::C);
}

#[test]
fn logic_ops_set_expected_flags() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: AND 0x0F
    // 0x0002: OR 0x00
    // 0x0004: XOR A
    load(&mut bus, 0x0000, &[0xE6, 0x0F, 0xF6, 0x00, 0xAF]);
    cpu.regs.a = 0xF0;
    cpu.regs.f = Flags::C;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, Flags::Z);

    cpu.regs.a = 0x5A;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z);
}

#[test]
fn inc_dec_8bit_preserve_carry() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: INC B
    // 0x0001: DEC B
    // 0x0002: DEC B
    load(&mut bus, 0x0000, &[0x04, 0x05, 0x05]);
    cpu.regs.b = 0xFF;
    cpu.regs.f = Flags::C;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0xFF);
    assert_eq!(cpu.regs.f, Flags::N | Flags::H | Flags::C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0xFE);
    assert_eq!(cpu.regs.f, Flags::N | Flags::C);
}

#[test]
fn inc_on_hl_memory_costs_twelve() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: INC (HL)
    bus.memory[0x0000] = 0x34;
    bus.memory[0xC000] = 0x0F;
    cpu.regs.set_hl(0xC000);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert!(cpu.regs.flag(Flags::H));
}

#[test]
fn add_hl_sets_half_carry_from_bit_eleven() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: ADD HL, BC
    bus.memory[0x0000] = 0x09;
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = Flags::Z;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    // Z is untouched by 16-bit adds.
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H);
}

#[test]
fn add_sp_signed_offset_flags_from_low_byte() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: ADD SP, 0x08
    // 0x0002: LD HL, SP-1
    load(&mut bus, 0x0000, &[0xE8, 0x08, 0xF8, 0xFF]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.regs.f, Flags::H | Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xFFFF);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.regs.f, Flags::empty());
}

#[test]
fn daa_corrects_every_bcd_addition_and_subtraction() {
    let mut cpu = Cpu::zeroed();

    for x in 0..100u8 {
        for y in 0..100u8 {
            cpu.regs.a = bcd(x);
            cpu.regs.f = Flags::empty();
            cpu.alu(AluOp::Add, bcd(y));
            cpu.alu_daa();
            let sum = u16::from(x) + u16::from(y);
            assert_eq!(cpu.regs.a, bcd((sum % 100) as u8), "{x} + {y}");
            assert_eq!(cpu.regs.flag(Flags::C), sum >= 100, "{x} + {y} carry");
            assert_eq!(cpu.regs.flag(Flags::Z), sum % 100 == 0);
            assert!(!cpu.regs.flag(Flags::H));

            cpu.regs.a = bcd(x);
            cpu.regs.f = Flags::empty();
            cpu.alu(AluOp::Sub, bcd(y));
            cpu.alu_daa();
            let diff = (100 + u16::from(x) - u16::from(y)) % 100;
            assert_eq!(cpu.regs.a, bcd(diff as u8), "{x} - {y}");
            assert_eq!(cpu.regs.flag(Flags::C), x < y, "{x} - {y} borrow");
            assert!(cpu.regs.flag(Flags::N));
        }
    }
}

#[test]
fn cpl_scf_ccf_behaviour() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: CPL
    // 0x0001: SCF
    // 0x0002: CCF
    load(&mut bus, 0x0000, &[0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x42;
    cpu.regs.f = Flags::Z;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, !0x42);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N | Flags::H);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, Flags::Z);
}

#[test]
fn shifts_and_rotates_at_boundary_values() {
    // (op, input, carry in, expected result, expected carry out)
    let cases = [
        (ShiftOp::Rlc, 0x80, false, 0x01, true),
        (ShiftOp::Rlc, 0x00, true, 0x00, false),
        (ShiftOp::Rrc, 0x01, false, 0x80, true),
        (ShiftOp::Rrc, 0xFF, false, 0xFF, true),
        (ShiftOp::Rl, 0x80, false, 0x00, true),
        (ShiftOp::Rl, 0x00, true, 0x01, false),
        (ShiftOp::Rr, 0x01, true, 0x80, true),
        (ShiftOp::Rr, 0x00, false, 0x00, false),
        (ShiftOp::Sla, 0x80, false, 0x00, true),
        (ShiftOp::Sla, 0xFF, false, 0xFE, true),
        (ShiftOp::Sra, 0x80, false, 0xC0, false),
        (ShiftOp::Sra, 0x01, false, 0x00, true),
        (ShiftOp::Srl, 0x80, false, 0x40, false),
        (ShiftOp::Srl, 0x01, false, 0x00, true),
        (ShiftOp::Swap, 0xF0, true, 0x0F, false),
        (ShiftOp::Swap, 0x00, false, 0x00, false),
    ];

    let mut cpu = Cpu::zeroed();
    for (op, input, carry_in, expected, carry_out) in cases {
        cpu.regs.f = if carry_in { Flags::C } else { Flags::empty() };
        let result = cpu.alu_shift(op, input);
        assert_eq!(result, expected, "{op:?} 0x{input:02X}");
        assert_eq!(cpu.regs.flag(Flags::C), carry_out, "{op:?} 0x{input:02X}");
        assert_eq!(cpu.regs.flag(Flags::Z), expected == 0, "{op:?} 0x{input:02X}");
        assert!(!cpu.regs.flag(Flags::N));
        assert!(!cpu.regs.flag(Flags::H));
    }
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: RLCA
    // 0x0001: RLA
    load(&mut bus, 0x0000, &[0x07, 0x17]);
    cpu.regs.a = 0x00;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::empty());

    cpu.regs.a = 0x80;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::C);
}

#[test]
fn cb_prefixed_ops_on_registers_and_hl() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: RLC B
    // 0x0002: BIT 7, (HL)
    // 0x0004: RES 7, (HL)
    // 0x0006: SET 0, (HL)
    load(
        &mut bus,
        0x0000,
        &[0xCB, 0x00, 0xCB, 0x7E, 0xCB, 0xBE, 0xCB, 0xC6],
    );
    cpu.regs.b = 0x85;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.b, 0x0B);
    assert_eq!(cpu.regs.f, Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.f, Flags::H | Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x00);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);
    assert_eq!(cpu.regs.pc, 0x0008);
}

#[test]
fn ld_forms_and_hl_post_increment() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // Program:
    // 0x0000: LD HL, 0xC000
    // 0x0003: LD B, 0x12
    // 0x0005: LD (HL), B
    // 0x0006: LD A, (HL+)
    // 0x0007: LD (HL-), A
    // 0x0008: LDH (0x80), A
    // 0x000A: LD (0xC100), SP
    load(
        &mut bus,
        0x0000,
        &[
            0x21, 0x00, 0xC0, 0x06, 0x12, 0x70, 0x2A, 0x32, 0xE0, 0x80, 0x08, 0x00, 0xC1,
        ],
    );
    cpu.regs.sp = 0xBEEF;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.b, 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC000], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC001], 0x12);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(bus.memory[0xC100], 0xEF);
    assert_eq!(bus.memory[0xC101], 0xBE);
}

#[test]
fn jr_negative_offset_loops_back() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0100: JR -2   (jumps back onto itself)
    load(&mut bus, 0x0100, &[0x18, 0xFE]);
    cpu.regs.pc = 0x0100;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn conditional_jumps_charge_taken_and_not_taken_costs() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: JR NZ, +5   (Z set: not taken)
    // 0x0002: JP Z, 0x1234
    load(&mut bus, 0x0000, &[0x20, 0x05, 0xCA, 0x34, 0x12]);
    cpu.regs.f = Flags::Z;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn call_and_ret_use_the_stack() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: CALL 0x0010
    // 0x0010: RET
    load(&mut bus, 0x0000, &[0xCD, 0x10, 0x00]);
    bus.memory[0x0010] = 0xC9;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x00);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn push_pop_roundtrip_and_pop_af_masks_low_flags() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: PUSH BC
    // 0x0001: POP AF
    load(&mut bus, 0x0000, &[0xC5, 0xF1]);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xCFFE);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.sp, 0xD000);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f.bits(), 0xF0);
}

#[test]
fn unassigned_opcode_is_fatal_and_locks_the_core() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: NOP
    // 0x0001: 0xD3 (no decoding)
    load(&mut bus, 0x0000, &[0x00, 0xD3]);

    step(&mut cpu, &mut bus);
    let expected = EmuError::Decode {
        pc: 0x0001,
        opcode: 0xD3,
        prefixed: false,
    };
    assert_eq!(cpu.step(&mut bus), Err(expected.clone()));
    assert!(cpu.is_locked());

    // Nothing runs until a reset.
    bus.memory[0x0002] = 0x00;
    assert_eq!(cpu.step(&mut bus), Err(expected));
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn bus_fault_is_reported_after_the_instruction() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();
    bus.memory[0x0000] = 0x00;
    bus.fault = Some(EmuError::InvalidBankSelection { bank: 9, banks: 4 });

    assert_eq!(
        cpu.step(&mut bus),
        Err(EmuError::InvalidBankSelection { bank: 9, banks: 4 })
    );
    assert!(cpu.is_locked());
    assert!(cpu.step(&mut bus).is_err());
}

#[test]
fn interrupt_priority_follows_bit_order() {
    assert_eq!(Interrupt::highest_priority(0x00), None);
    assert_eq!(Interrupt::highest_priority(0x1F), Some(Interrupt::VBlank));
    assert_eq!(Interrupt::highest_priority(0x1E), Some(Interrupt::LcdStat));
    assert_eq!(Interrupt::highest_priority(0x1C), Some(Interrupt::Timer));
    assert_eq!(Interrupt::highest_priority(0x18), Some(Interrupt::Serial));
    assert_eq!(Interrupt::highest_priority(0x10), Some(Interrupt::Joypad));
    assert_eq!(Interrupt::Joypad.vector(), 0x0060);
    assert_eq!(Interrupt::LcdStat.mask(), 0x02);
}

#[test]
fn interrupt_dispatch_services_lowest_pending_bit() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: NOP
    bus.memory[0x0000] = 0x00;
    bus.memory[0xFFFF] = 0x1F;
    // Timer and joypad pending.
    bus.memory[0xFF0F] = 0x14;
    cpu.regs.sp = 0xD000;
    cpu.ime = true;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 4 + 20);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x10);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[0xCFFF], 0x00);
    assert_eq!(bus.ticked, 24);
}

#[test]
fn masked_interrupts_are_not_dispatched() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x02;
    cpu.ime = true;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert!(cpu.ime);
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: EI
    // 0x0001: NOP
    // 0x0002: NOP
    load(&mut bus, 0x0000, &[0xFB, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.regs.sp = 0xD000;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0001);

    // The NOP after EI runs, then the V-blank interrupt is taken.
    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xCFFE], 0x02);
    assert_eq!(bus.memory[0xFF0F], 0x00);
}

#[test]
fn di_is_delayed_by_one_instruction() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: DI
    // 0x0001: NOP
    load(&mut bus, 0x0000, &[0xF3, 0x00]);
    cpu.ime = true;

    step(&mut cpu, &mut bus);
    assert!(cpu.ime);

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
}

#[test]
fn reti_enables_interrupts_immediately() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: RETI
    bus.memory[0x0000] = 0xD9;
    cpu.regs.sp = 0xCFFE;
    bus.memory[0xCFFE] = 0x34;
    bus.memory[0xCFFF] = 0x12;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(cpu.ime);
}

#[test]
fn halt_idles_until_an_enabled_interrupt_is_requested() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: HALT
    // 0x0001: NOP
    load(&mut bus, 0x0000, &[0x76, 0x00]);
    bus.memory[0xFFFF] = 0x04;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_halted());

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0001);

    // IME is clear, yet the timer request still wakes the core.
    bus.memory[0xFF0F] = 0x04;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.mode(), CpuMode::Running);
    assert_eq!(cpu.regs.pc, 0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(bus.memory[0xFF0F], 0x04);
}

#[test]
fn halt_with_ime_wakes_into_the_handler() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: HALT
    bus.memory[0x0000] = 0x76;
    bus.memory[0xFFFF] = 0x01;
    cpu.regs.sp = 0xD000;
    cpu.ime = true;

    step(&mut cpu, &mut bus);
    assert!(cpu.is_halted());

    bus.memory[0xFF0F] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert!(!cpu.is_halted());
}

#[test]
fn halt_bug_executes_the_next_byte_twice() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: HALT   (IME clear, V-blank already pending)
    // 0x0001: INC A
    load(&mut bus, 0x0000, &[0x76, 0x3C]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn ei_then_halt_with_pending_interrupt_returns_to_halt() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();
    cpu.regs.sp = 0xD000;

    // 0x0000: EI
    // 0x0001: HALT
    // 0x0002: NOP
    // 0x0040: INC B
    // 0x0041: RETI
    load(&mut bus, 0x0000, &[0xFB, 0x76, 0x00]);
    load(&mut bus, 0x0040, &[0x04, 0xD9]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[0xCFFF], 0x00);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 1);
    assert_eq!(cpu.regs.pc, 0x0041);

    // RETI lands on the HALT byte, which now halts with IF clear.
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0001);
    step(&mut cpu, &mut bus);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.b, 1);
}

#[test]
fn stop_skips_its_padding_byte_and_idles() {
    let mut cpu = Cpu::zeroed();
    let mut bus = TestBus::default();

    // 0x0000: STOP 0x00
    load(&mut bus, 0x0000, &[0x10, 0x00]);

    step(&mut cpu, &mut bus);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);

    // The flat bus never signals a button press.
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);
}
