//! Random vector-operation stream generation.

use std::io;

use rand::seq::SliceRandom;

use super::{REGISTER_COUNT, StreamParams, hex_immediate, signed_immediate, stream_rng};

const OPS: [&str; 12] = [
    "vldi", "vsti", "vldr", "vstr", "Vadd", "Vsub", "Vmult", "Vdiv", "Vdot", "Vdota", "Vindx",
    "Vreduce",
];

/// Emits a vector-register preseed block followed by `count` random
/// three-operand vector operations.
pub fn emit_vector_stream<W: io::Write>(out: &mut W, params: &StreamParams) -> io::Result<()> {
    let mut rng = stream_rng(params.seed);

    writeln!(out, ";; preseed values for registers")?;
    for register in 0..REGISTER_COUNT {
        let value = signed_immediate(&mut rng, 32);
        writeln!(out, "vldi v{register}, {}", hex_immediate(value))?;
    }

    writeln!(out, ";; random vector arithmetic")?;
    for _ in 0..params.count {
        let op = OPS.choose(&mut rng).expect("non-empty op set");
        let dest = params.selection.choose(&mut rng);
        let lhs = params.selection.choose(&mut rng);
        let rhs = params.selection.choose(&mut rng);
        writeln!(out, "{op:<4} v{dest}, v{lhs}, v{rhs}")?;
    }
    Ok(())
}
