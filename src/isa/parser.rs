//! Line-oriented parser for the YAML-like description document.
//!
//! The grammar is the small subset the toolkit actually consumes: two
//! top-level sections (`registers:`, `instructions:`), register entries with
//! inline `{key: value}` maps or indented block maps, and `- ` sequence items
//! for instruction records. Parsing fails eagerly on the first malformed line.

use smallvec::SmallVec;

use super::ast::{DescriptionDocument, FieldValue, InstructionRecord, RegisterDecl};
use super::error::{IsaError, SourcePosition};
use super::register::is_identifier;

pub fn parse_document(src: &str) -> Result<DescriptionDocument, IsaError> {
    let mut parser = Parser::default();
    for (index, raw_line) in src.lines().enumerate() {
        parser.consume_line(index + 1, raw_line)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Registers,
    Instructions,
}

#[derive(Default)]
struct Parser {
    section: Option<Section>,
    registers: Vec<RegisterDecl>,
    instructions: Vec<InstructionRecord>,
    seen_registers: bool,
    seen_instructions: bool,
    // Index and indent of the entry open for block-form continuation lines.
    open_register: Option<(usize, usize)>,
    open_instruction: Option<(usize, usize)>,
}

impl Parser {
    fn consume_line(&mut self, line_no: usize, raw_line: &str) -> Result<(), IsaError> {
        let line = strip_comment(raw_line);
        if line.trim().is_empty() {
            return Ok(());
        }
        if leading_ws_has_tab(line) {
            return Err(IsaError::malformed_at(
                "tab character in indentation",
                SourcePosition::new(line_no, 1),
            ));
        }

        let indent = line.len() - line.trim_start_matches(' ').len();
        let content = line[indent..].trim_end();
        let position = SourcePosition::new(line_no, indent + 1);

        if indent == 0 {
            return self.consume_section_header(content, position);
        }

        match self.section {
            None => Err(IsaError::malformed_at(
                "content before a section header",
                position,
            )),
            Some(Section::Registers) => self.consume_register_line(content, indent, position),
            Some(Section::Instructions) => self.consume_instruction_line(content, indent, position),
        }
    }

    fn consume_section_header(
        &mut self,
        content: &str,
        position: SourcePosition,
    ) -> Result<(), IsaError> {
        let Some((name, rest)) = content.split_once(':') else {
            return Err(IsaError::malformed_at(
                format!("expected a section header, found '{content}'"),
                position,
            ));
        };
        let rest = rest.trim();
        self.open_register = None;
        self.open_instruction = None;
        match name.trim() {
            "registers" => {
                if self.seen_registers {
                    return Err(IsaError::malformed_at(
                        "duplicate 'registers' section",
                        position,
                    ));
                }
                if !(rest.is_empty() || rest == "{}") {
                    return Err(IsaError::malformed_at(
                        "unexpected content after 'registers:'",
                        position,
                    ));
                }
                self.seen_registers = true;
                self.section = Some(Section::Registers);
            }
            "instructions" => {
                if self.seen_instructions {
                    return Err(IsaError::malformed_at(
                        "duplicate 'instructions' section",
                        position,
                    ));
                }
                if !(rest.is_empty() || rest == "[]") {
                    return Err(IsaError::malformed_at(
                        "unexpected content after 'instructions:'",
                        position,
                    ));
                }
                self.seen_instructions = true;
                self.section = Some(Section::Instructions);
            }
            other => {
                return Err(IsaError::malformed_at(
                    format!("unknown top-level section '{other}'"),
                    position,
                ));
            }
        }
        Ok(())
    }

    fn consume_register_line(
        &mut self,
        content: &str,
        indent: usize,
        position: SourcePosition,
    ) -> Result<(), IsaError> {
        if let Some((index, open_indent)) = self.open_register {
            if indent > open_indent {
                let (name, value) = split_attribute(content, position)?;
                push_register_attr(&mut self.registers[index], name, value, position)?;
                return Ok(());
            }
            self.open_register = None;
        }

        let split = split_key_outside_brackets(content).ok_or_else(|| {
            IsaError::malformed_at(
                format!("expected ':' after register name in '{content}'"),
                position,
            )
        })?;
        let (key, rest) = split;
        let key = key.trim();
        let rest = rest.trim();

        let mut decl = RegisterDecl {
            key: key.to_string(),
            attrs: SmallVec::new(),
            position,
        };

        if rest.is_empty() {
            self.registers.push(decl);
            self.open_register = Some((self.registers.len() - 1, indent));
            return Ok(());
        }

        let Some(flow) = rest.strip_prefix('{').and_then(|r| r.strip_suffix('}')) else {
            return Err(IsaError::malformed_at(
                format!("register '{key}' properties must be a {{..}} map or an indented block"),
                position,
            ));
        };
        let flow = flow.trim();
        if !flow.is_empty() {
            for pair in flow.split(',') {
                let (name, value) = split_attribute(pair.trim(), position)?;
                push_register_attr(&mut decl, name, value, position)?;
            }
        }
        self.registers.push(decl);
        Ok(())
    }

    fn consume_instruction_line(
        &mut self,
        content: &str,
        indent: usize,
        position: SourcePosition,
    ) -> Result<(), IsaError> {
        if let Some(item) = content.strip_prefix('-') {
            let item = item.trim_start();
            let mut record = InstructionRecord {
                fields: SmallVec::new(),
                position,
            };
            if !item.is_empty() {
                let (name, value) = split_field(item, position)?;
                record.fields.push((name, value));
            }
            self.instructions.push(record);
            self.open_instruction = Some((self.instructions.len() - 1, indent));
            return Ok(());
        }

        let Some((index, open_indent)) = self.open_instruction else {
            return Err(IsaError::malformed_at(
                "instruction entries must start with '- '",
                position,
            ));
        };
        if indent <= open_indent {
            return Err(IsaError::malformed_at(
                "instruction field is not indented past its '-' item",
                position,
            ));
        }
        let (name, value) = split_field(content, position)?;
        let record = &mut self.instructions[index];
        if record.fields.iter().any(|(key, _)| *key == name) {
            return Err(IsaError::malformed_at(
                format!("duplicate instruction field '{name}'"),
                position,
            ));
        }
        record.fields.push((name, value));
        Ok(())
    }

    fn finish(self) -> Result<DescriptionDocument, IsaError> {
        if !self.seen_registers {
            return Err(IsaError::malformed("missing 'registers' section", None));
        }
        if !self.seen_instructions {
            return Err(IsaError::malformed("missing 'instructions' section", None));
        }
        Ok(DescriptionDocument {
            registers: self.registers,
            instructions: self.instructions,
        })
    }
}

/// Splits `name: value` where the name side may contain a bracketed range
/// (`r[0:32]: ...`); the split colon is the first one at bracket depth zero.
fn split_key_outside_brackets(content: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (offset, ch) in content.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                return Some((&content[..offset], &content[offset + 1..]));
            }
            _ => {}
        }
    }
    None
}

fn split_attribute(pair: &str, position: SourcePosition) -> Result<(String, i64), IsaError> {
    let Some((name, value)) = pair.split_once(':') else {
        return Err(IsaError::malformed_at(
            format!("expected 'name: value' property, found '{pair}'"),
            position,
        ));
    };
    let name = name.trim();
    if !is_identifier(name) {
        return Err(IsaError::malformed_at(
            format!("invalid property name '{name}'"),
            position,
        ));
    }
    let value = value.trim();
    let Some(number) = parse_int(value) else {
        return Err(IsaError::malformed_at(
            format!("property '{name}' requires an integer value, found '{value}'"),
            position,
        ));
    };
    Ok((name.to_string(), number))
}

fn push_register_attr(
    decl: &mut RegisterDecl,
    name: String,
    value: i64,
    position: SourcePosition,
) -> Result<(), IsaError> {
    if decl.attrs.iter().any(|(key, _)| *key == name) {
        return Err(IsaError::malformed_at(
            format!("duplicate property '{name}' on register '{}'", decl.key),
            position,
        ));
    }
    decl.attrs.push((name, value));
    Ok(())
}

fn split_field(content: &str, position: SourcePosition) -> Result<(String, FieldValue), IsaError> {
    let Some((name, value)) = content.split_once(':') else {
        return Err(IsaError::malformed_at(
            format!("expected 'name: value' field, found '{content}'"),
            position,
        ));
    };
    let name = name.trim();
    if !is_identifier(name) {
        return Err(IsaError::malformed_at(
            format!("invalid field name '{name}'"),
            position,
        ));
    }
    let value = value.trim();
    let value = match parse_int(value) {
        Some(number) => FieldValue::Number(number),
        None => FieldValue::Text(unquote(value).to_string()),
    };
    Ok((name.to_string(), value))
}

fn unquote(text: &str) -> &str {
    let stripped = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
    stripped.unwrap_or(text)
}

/// Parses a decimal, `0x` hex, or `0b` binary integer literal with optional
/// `_` separators and an optional leading minus.
fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or(body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = body.strip_prefix("0b").or(body.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, body)
    };
    if digits.is_empty() {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&ch| ch != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = i64::from_str_radix(&cleaned, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (offset, &byte) in bytes.iter().enumerate() {
        if byte == b'#' && (offset == 0 || bytes[offset - 1] == b' ' || bytes[offset - 1] == b'\t')
        {
            return &line[..offset];
        }
    }
    line
}

fn leading_ws_has_tab(line: &str) -> bool {
    line.chars()
        .take_while(|ch| ch.is_whitespace())
        .any(|ch| ch == '\t')
}
