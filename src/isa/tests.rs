use super::error::IsaError;
use super::model::Isa;
use super::register::Register;

fn load(src: &str) -> Isa {
    Isa::load(src).expect("load description")
}

#[test]
fn ranged_declaration_expands_half_open() {
    let isa = load("registers:\n  r[0:2]: {width: 16}\ninstructions: []\n");
    assert_eq!(
        isa.registers(),
        &[Register::new("r0", 16, 1), Register::new("r1", 16, 1)]
    );
}

#[test]
fn ranged_declaration_yields_end_minus_start_registers() {
    let isa = load("registers:\n  r[0:4]: {width: 32, lanes: 1}\ninstructions: []\n");
    let names: Vec<_> = isa.registers().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["r0", "r1", "r2", "r3"]);
    assert!(isa.registers().iter().all(|r| r.width == 32 && r.lanes == 1));
}

#[test]
fn plain_declaration_is_a_single_register() {
    let isa = load("registers:\n  pc: {width: 64}\ninstructions: []\n");
    assert_eq!(isa.registers(), &[Register::new("pc", 64, 1)]);
}

#[test]
fn mixed_declarations_keep_order() {
    let isa = load(
        "registers:\n  pc: {width: 64}\n  r[0:2]: {width: 64}\n  v[0:2]: {width: 32, lanes: 4}\ninstructions: []\n",
    );
    let names: Vec<_> = isa.registers().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["pc", "r0", "r1", "v0", "v1"]);
}

#[test]
fn lanes_default_to_one() {
    let isa = load("registers:\n  r[0:8]: {width: 32}\ninstructions: []\n");
    assert!(isa.registers().iter().all(|r| r.lanes == 1));
}

#[test]
fn all_register_names_are_unique() {
    let isa = load(
        "registers:\n  r[0:32]: {width: 64}\n  v[0:32]: {width: 32, lanes: 8}\n  pc: {width: 64}\ninstructions: []\n",
    );
    let mut names: Vec<_> = isa.registers().iter().map(|r| r.name.as_str()).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(total, 65);
}

#[test]
fn bank_colliding_with_plain_name_is_rejected() {
    let err = Isa::load("registers:\n  r[0:4]: {width: 32}\n  r2: {width: 32}\ninstructions: []\n")
        .unwrap_err();
    match err {
        IsaError::NameCollision { name, .. } => assert_eq!(name, "r2"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn overlapping_banks_are_rejected() {
    let err =
        Isa::load("registers:\n  r[0:4]: {width: 32}\n  r[2:6]: {width: 32}\ninstructions: []\n")
            .unwrap_err();
    assert!(matches!(err, IsaError::NameCollision { .. }));
}

#[test]
fn inverted_range_is_rejected() {
    let err = Isa::load("registers:\n  r[4:2]: {width: 32}\ninstructions: []\n").unwrap_err();
    assert!(matches!(err, IsaError::MalformedDescription { .. }));
}

#[test]
fn missing_width_is_rejected() {
    let err = Isa::load("registers:\n  pc: {lanes: 2}\ninstructions: []\n").unwrap_err();
    assert!(matches!(err, IsaError::MalformedDescription { .. }));
}

#[test]
fn non_positive_width_is_rejected() {
    for src in [
        "registers:\n  pc: {width: 0}\ninstructions: []\n",
        "registers:\n  pc: {width: -8}\ninstructions: []\n",
    ] {
        let err = Isa::load(src).unwrap_err();
        assert!(matches!(err, IsaError::MalformedDescription { .. }));
    }
}

#[test]
fn zero_lanes_are_rejected() {
    let err = Isa::load("registers:\n  v0: {width: 32, lanes: 0}\ninstructions: []\n").unwrap_err();
    assert!(matches!(err, IsaError::MalformedDescription { .. }));
}

#[test]
fn storage_summary_partitions_scalar_and_vector() {
    let isa = load(
        "registers:\n  r[0:4]: {width: 64}\n  v[0:2]: {width: 32, lanes: 8}\ninstructions: []\n",
    );
    let summary = isa.storage_summary();
    assert_eq!(summary.scalar_bits, 4 * 64);
    assert_eq!(summary.vector_bits, 2 * 32 * 8);
    assert_eq!(summary.total_bits(), 256 + 512);
}

#[test]
fn instructions_are_carried_through_unmodified() {
    let isa = load(
        "registers: {}\ninstructions:\n  - mnemonic: add\n    operands: rD, rA, rB\n    opcode: 0x01\n",
    );
    assert_eq!(isa.instructions().len(), 1);
    assert_eq!(isa.instructions()[0].mnemonic(), Some("add"));
    assert_eq!(isa.instructions()[0].fields.len(), 3);
}

#[test]
fn load_file_reads_description_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("isa.yml");
    std::fs::write(
        &path,
        "registers:\n  r[0:2]: {width: 16}\ninstructions:\n  - mnemonic: add\n",
    )
    .expect("write description");

    let isa = Isa::load_file(&path).expect("load file");
    assert_eq!(isa.registers().len(), 2);
    assert_eq!(isa.instructions().len(), 1);
}
