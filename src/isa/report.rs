//! Display-only summaries of a loaded model. No compatibility contract: the
//! shapes here are free to change.

use std::fmt::Write;

use super::error::IsaError;
use super::model::Isa;

/// Renders the register table followed by the storage totals.
pub fn register_table(isa: &Isa) -> String {
    let mut name_width = "name".len();
    for register in isa.registers() {
        name_width = name_width.max(register.name.len());
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  width  lanes", "name");
    for register in isa.registers() {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>5}  {:>5}",
            register.name, register.width, register.lanes
        );
    }

    let summary = isa.storage_summary();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "total size: {} bits ~ {:.2} kib",
        summary.total_bits(),
        summary.total_bits() as f64 / 1024.0
    );
    let _ = writeln!(
        out,
        " |- scalar: {} bits ~ {:.2} kib",
        summary.scalar_bits,
        summary.scalar_bits as f64 / 1024.0
    );
    let _ = writeln!(
        out,
        " |- vector: {} bits ~ {:.2} kib",
        summary.vector_bits,
        summary.vector_bits as f64 / 1024.0
    );
    out
}

/// Renders one line per instruction. This is the only place a record is
/// required to carry a `mnemonic` field.
pub fn instruction_catalog(isa: &Isa) -> Result<String, IsaError> {
    let mut out = String::new();
    for record in isa.instructions() {
        let Some(mnemonic) = record.mnemonic() else {
            return Err(IsaError::malformed_at(
                "instruction record is missing a 'mnemonic' field",
                record.position,
            ));
        };
        out.push_str(mnemonic);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{instruction_catalog, register_table};
    use crate::isa::Isa;

    #[test]
    fn table_lists_registers_and_totals() {
        let isa = Isa::load(
            "registers:\n  r[0:2]: {width: 64}\n  v[0:2]: {width: 32, lanes: 8}\ninstructions: []\n",
        )
        .expect("load");
        let table = register_table(&isa);
        assert!(table.contains("r0"));
        assert!(table.contains("v1"));
        assert!(table.contains("total size: 640 bits"));
        assert!(table.contains(" |- scalar: 128 bits"));
        assert!(table.contains(" |- vector: 512 bits"));
    }

    #[test]
    fn catalog_lists_mnemonics_in_order() {
        let isa = Isa::load(
            "registers: {}\ninstructions:\n  - mnemonic: add\n  - mnemonic: sub\n",
        )
        .expect("load");
        let catalog = instruction_catalog(&isa).expect("catalog");
        assert_eq!(catalog, "add\nsub\n");
    }

    #[test]
    fn catalog_requires_mnemonic() {
        let isa = Isa::load("registers: {}\ninstructions:\n  - operands: rD, rA\n").expect("load");
        assert!(instruction_catalog(&isa).is_err());
    }
}
