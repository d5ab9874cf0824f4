use hex_literal::hex;

use isakit::isa::{Isa, Register, report};
use isakit::mem::{Endianness, Radix, decode_words, write_mif};

const DESCRIPTION: &str = "\
# machine description
registers:
  r[0:32]: {width: 64}
  v[0:32]: {width: 32, lanes: 8}
  pc:
    width: 64
instructions:
  - mnemonic: add
    operands: rD, rA, rB
  - mnemonic: lil
    operands: rD, imm
  - mnemonic: Vadd
    operands: vD, vA, vB
";

#[test]
fn loads_a_full_description() {
    let isa = Isa::load(DESCRIPTION).expect("load description");

    assert_eq!(isa.registers().len(), 65);
    assert_eq!(isa.registers()[0], Register::new("r0", 64, 1));
    assert_eq!(isa.registers()[32], Register::new("v0", 32, 8));
    assert_eq!(isa.registers()[64], Register::new("pc", 64, 1));

    let summary = isa.storage_summary();
    assert_eq!(summary.scalar_bits, 32 * 64 + 64);
    assert_eq!(summary.vector_bits, 32 * 32 * 8);
    assert_eq!(summary.total_bits(), summary.scalar_bits + summary.vector_bits);

    let table = report::register_table(&isa);
    assert!(table.contains("r31"));
    assert!(table.contains("v31"));
    assert!(table.contains("pc"));

    let catalog = report::instruction_catalog(&isa).expect("catalog");
    assert_eq!(catalog, "add\nlil\nVadd\n");
}

#[test]
fn binary_image_renders_as_mif() {
    let stream = hex!("0a 00 00 00");
    let words = decode_words(&stream, 32, Endianness::Little).expect("decode");
    assert_eq!(words, vec![10]);

    let mut out = Vec::new();
    write_mif(&mut out, &words, 32, Radix::Hex, Radix::Bin).expect("format");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("WIDTH = 32;\n"));
    assert!(text.contains("DEPTH = 1;\n"));
    assert!(text.contains("ADDRESS_RADIX = HEX;\n"));
    assert!(text.contains("DATA_RADIX = BIN;\n"));
    assert!(
        text.contains("0 : 00000000000000000000000000001010;\n"),
        "unexpected content: {text}"
    );
}

#[test]
fn decoded_words_survive_formatting_exactly() {
    let stream = hex!("de ad be ef 00 11 22 33 44 55 66 77");
    let words = decode_words(&stream, 32, Endianness::Big).expect("decode");
    assert_eq!(words, vec![0xDEAD_BEEF, 0x0011_2233, 0x4455_6677]);

    let mut out = Vec::new();
    write_mif(&mut out, &words, 32, Radix::Hex, Radix::Hex).expect("format");
    let text = String::from_utf8(out).expect("utf8");

    for (address, word) in words.iter().enumerate() {
        let line = format!("{address} : {word:08x};");
        assert!(text.contains(&line), "missing line '{line}' in: {text}");
    }
}
