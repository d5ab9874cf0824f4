//! Random scalar-arithmetic stream generation.

use std::io;

use rand::seq::SliceRandom;

use super::{REGISTER_COUNT, StreamParams, hex_immediate, signed_immediate, stream_rng};

const OPS: [&str; 9] = [
    "add", "sub", "mul", "and", "or", "xor", "shr", "shl", "not",
];

/// Emits a register preseed block followed by `count` random scalar
/// operations. Immediates are signed 18-bit values split across `lil`/`lih`.
pub fn emit_scalar_stream<W: io::Write>(out: &mut W, params: &StreamParams) -> io::Result<()> {
    let mut rng = stream_rng(params.seed);

    writeln!(out, ";; preseed values for registers")?;
    for register in 0..REGISTER_COUNT {
        let lo = signed_immediate(&mut rng, 18);
        let hi = signed_immediate(&mut rng, 18);
        writeln!(out, "lil r{register}, {}", hex_immediate(lo))?;
        writeln!(out, "lih r{register}, {}", hex_immediate(hi))?;
    }

    writeln!(out, ";; random scalar arithmetic")?;
    for _ in 0..params.count {
        let op = OPS.choose(&mut rng).expect("non-empty op set");
        let dest = params.selection.choose(&mut rng);
        let lhs = params.selection.choose(&mut rng);
        if *op == "not" {
            writeln!(out, "{op:<4} r{dest}, r{lhs}")?;
        } else {
            let rhs = params.selection.choose(&mut rng);
            writeln!(out, "{op:<4} r{dest}, r{lhs}, r{rhs}")?;
        }
    }
    Ok(())
}
