//! Command-line entry point for the ISA development toolkit.
//!
//! Thin dispatch over the library: every subcommand loads its inputs, calls
//! one library operation, and writes the result. Errors print to stderr and
//! exit with a non-zero code.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use isakit::isa::{Isa, report};
use isakit::mem::{Endianness, Radix, decode_words, write_mif};
use isakit::smoke::SmokeRunner;
use isakit::testgen::{StreamParams, emit_scalar_stream, emit_vector_stream};

#[derive(Parser)]
#[command(
    name = "isakit",
    version,
    about = "Development toolkit for a custom instruction set"
)]
struct Cli {
    #[command(subcommand)]
    command: CommandKind,
}

#[derive(Subcommand)]
enum CommandKind {
    /// Print the register table and storage totals from the ISA description.
    Registers {
        #[arg(
            short = 'i',
            long = "isa",
            value_name = "FILE",
            default_value = "isa.yml"
        )]
        isa: PathBuf,
    },
    /// Print the instruction catalog from the ISA description.
    Instructions {
        #[arg(
            short = 'i',
            long = "isa",
            value_name = "FILE",
            default_value = "isa.yml"
        )]
        isa: PathBuf,
    },
    /// Convert a raw binary image into a memory-initialization file.
    #[command(name = "bin2mif")]
    Bin2Mif {
        #[arg(value_name = "INFILE")]
        infile: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
        /// Word width in bits. Must be a multiple of 8.
        #[arg(short = 'w', long = "wordsize", value_name = "BITS", default_value_t = 32)]
        wordsize: u32,
        /// Endianness of the source file.
        #[arg(short = 'e', long = "endianness", value_enum, default_value = "little")]
        endianness: EndianArg,
        /// Radix of addresses in the MIF output.
        #[arg(short = 'a', long = "address-radix", value_enum, default_value = "hex")]
        address_radix: RadixArg,
        /// Radix of data in the MIF output.
        #[arg(short = 'd', long = "data-radix", value_enum, default_value = "bin")]
        data_radix: RadixArg,
    },
    /// Emit a random scalar-arithmetic stream for assembler testing.
    GenScalar {
        #[command(flatten)]
        stream: StreamArgs,
    },
    /// Emit a random vector-operation stream for assembler testing.
    GenVector {
        #[command(flatten)]
        stream: StreamArgs,
    },
    /// Run the assembler over a directory of smoke-test sources.
    Smoke {
        #[arg(value_name = "ASSEMBLER")]
        assembler: PathBuf,
        #[arg(long = "tests", value_name = "DIR", default_value = "test/smoketest")]
        tests: PathBuf,
        #[arg(long = "out", value_name = "DIR", default_value = "smoketest-out")]
        out: PathBuf,
    },
}

#[derive(clap::Args)]
struct StreamArgs {
    #[arg(short = 'n', long = "instr-count", value_name = "N", default_value_t = 128)]
    instr_count: usize,
    /// Restrict operands to a register subset: B:T range or a comma list.
    #[arg(long = "constrain-regs", value_name = "REGS")]
    constrain_regs: Option<String>,
    /// Seed for a reproducible stream.
    #[arg(short = 's', long = "seed", value_name = "SEED")]
    seed: Option<u64>,
}

impl StreamArgs {
    fn params(&self) -> Result<StreamParams, Box<dyn Error>> {
        let selection = match &self.constrain_regs {
            Some(regs) => regs.parse()?,
            None => isakit::testgen::Selection::All,
        };
        Ok(StreamParams {
            count: self.instr_count,
            selection,
            seed: self.seed,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EndianArg {
    Little,
    Big,
}

impl From<EndianArg> for Endianness {
    fn from(arg: EndianArg) -> Self {
        match arg {
            EndianArg::Little => Endianness::Little,
            EndianArg::Big => Endianness::Big,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RadixArg {
    Hex,
    Bin,
}

impl From<RadixArg> for Radix {
    fn from(arg: RadixArg) -> Self {
        match arg {
            RadixArg::Hex => Radix::Hex,
            RadixArg::Bin => Radix::Bin,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("isakit: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: CommandKind) -> Result<(), Box<dyn Error>> {
    match command {
        CommandKind::Registers { isa } => {
            let isa = Isa::load_file(isa)?;
            print!("{}", report::register_table(&isa));
        }
        CommandKind::Instructions { isa } => {
            let isa = Isa::load_file(isa)?;
            print!("{}", report::instruction_catalog(&isa)?);
        }
        CommandKind::Bin2Mif {
            infile,
            output,
            wordsize,
            endianness,
            address_radix,
            data_radix,
        } => {
            let bytes = fs::read(&infile)?;
            let words = decode_words(&bytes, wordsize, endianness.into())?;
            let mut out: Box<dyn Write> = match output {
                Some(path) => Box::new(fs::File::create(path)?),
                None => Box::new(io::stdout().lock()),
            };
            write_mif(&mut out, &words, wordsize, address_radix.into(), data_radix.into())?;
        }
        CommandKind::GenScalar { stream } => {
            let params = stream.params()?;
            emit_scalar_stream(&mut io::stdout().lock(), &params)?;
        }
        CommandKind::GenVector { stream } => {
            let params = stream.params()?;
            emit_vector_stream(&mut io::stdout().lock(), &params)?;
        }
        CommandKind::Smoke {
            assembler,
            tests,
            out,
        } => {
            let runner = SmokeRunner::new(assembler, out);
            let sources = isakit::smoke::collect_sources(&tests)?;
            let mut failed = 0usize;
            for source in sources {
                let name = source
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("-> {name}");
                let case = runner.run_case(&source)?;
                if !case.passed {
                    failed += 1;
                    eprintln!("   FAILED: {}", case.source.display());
                }
            }
            if failed > 0 {
                return Err(format!("{failed} smoke test(s) failed").into());
            }
        }
    }
    Ok(())
}
