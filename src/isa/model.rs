//! The validated ISA model: expanded registers plus the opaque instruction
//! catalog, built once per load and read-only afterward.

use std::fs;
use std::path::Path;

use ahash::AHashSet;

use super::ast::{DescriptionDocument, InstructionRecord};
use super::error::IsaError;
use super::parser::parse_document;
use super::register::{Register, RegisterKey};

#[derive(Debug, Clone)]
pub struct Isa {
    registers: Vec<Register>,
    instructions: Vec<InstructionRecord>,
}

impl Isa {
    /// Parses and validates a description document from source text.
    pub fn load(src: &str) -> Result<Self, IsaError> {
        Self::from_document(parse_document(src)?)
    }

    /// Loads a description document from a file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, IsaError> {
        let src = fs::read_to_string(path)?;
        Self::load(&src)
    }

    /// Builds the model from a parsed document: every declaration, ranged or
    /// plain, contributes registers in declaration order, banks expanding
    /// ascending over their half-open range.
    pub fn from_document(doc: DescriptionDocument) -> Result<Self, IsaError> {
        let mut registers = Vec::new();
        let mut seen: AHashSet<String> = AHashSet::new();

        for decl in &doc.registers {
            let key = RegisterKey::parse(&decl.key, decl.position)?;
            let width = match decl.attr("width") {
                Some(width) if width > 0 && width <= u32::MAX as i64 => width as u32,
                Some(width) => {
                    return Err(IsaError::malformed_at(
                        format!("register '{}' has invalid width {width}", decl.key),
                        decl.position,
                    ));
                }
                None => {
                    return Err(IsaError::malformed_at(
                        format!("register '{}' is missing a width", decl.key),
                        decl.position,
                    ));
                }
            };
            let lanes = match decl.attr("lanes") {
                Some(lanes) if lanes > 0 && lanes <= u32::MAX as i64 => lanes as u32,
                Some(lanes) => {
                    return Err(IsaError::malformed_at(
                        format!("register '{}' has invalid lane count {lanes}", decl.key),
                        decl.position,
                    ));
                }
                None => 1,
            };

            for register in key.expand(width, lanes) {
                if !seen.insert(register.name.clone()) {
                    return Err(IsaError::NameCollision {
                        name: register.name,
                        position: Some(decl.position),
                    });
                }
                registers.push(register);
            }
        }

        Ok(Self {
            registers,
            instructions: doc.instructions,
        })
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn instructions(&self) -> &[InstructionRecord] {
        &self.instructions
    }

    /// Partitions register storage into scalar and vector totals.
    pub fn storage_summary(&self) -> StorageSummary {
        let mut summary = StorageSummary::default();
        for register in &self.registers {
            if register.is_scalar() {
                summary.scalar_bits += register.storage_bits();
            } else {
                summary.vector_bits += register.storage_bits();
            }
        }
        summary
    }
}

/// Storage totals in bits, split by scalar vs vector registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageSummary {
    pub scalar_bits: u64,
    pub vector_bits: u64,
}

impl StorageSummary {
    #[inline]
    pub fn total_bits(&self) -> u64 {
        self.scalar_bits + self.vector_bits
    }
}
