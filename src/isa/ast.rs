//! Document nodes produced by the description parser, prior to validation.

use smallvec::SmallVec;

use super::error::SourcePosition;

/// A fully parsed description document. Register declarations keep their raw
/// keys; range expansion and validation happen when the [`Isa`](super::Isa)
/// model is built.
#[derive(Debug, Clone)]
pub struct DescriptionDocument {
    pub registers: Vec<RegisterDecl>,
    pub instructions: Vec<InstructionRecord>,
}

/// One entry of the `registers` mapping, keyed by a plain or ranged name.
#[derive(Debug, Clone)]
pub struct RegisterDecl {
    pub key: String,
    pub attrs: SmallVec<[(String, i64); 2]>,
    pub position: SourcePosition,
}

impl RegisterDecl {
    pub fn attr(&self, name: &str) -> Option<i64> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }
}

/// An opaque instruction record carried through the model unmodified.
#[derive(Debug, Clone)]
pub struct InstructionRecord {
    pub fields: SmallVec<[(String, FieldValue); 4]>,
    pub position: SourcePosition,
}

impl InstructionRecord {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// The mnemonic field, when present. Only rendering requires it.
    pub fn mnemonic(&self) -> Option<&str> {
        match self.field("mnemonic") {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Scalar field value inside an instruction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
}
