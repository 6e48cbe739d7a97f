//! Reader for the emitted assembly.
//!
//! Reads exactly the subset [`Shader::to_text`](crate::Shader::to_text)
//! writes: header comments, then one instruction per line, each optionally
//! binding `%N = `. Used to check that emitted text re-reads into the same
//! entries, annotations and stream.

use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: missing opcode")]
    MissingOpcode { line: usize },
    #[error("line {line}: malformed id `{token}`")]
    BadId { line: usize, token: String },
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },
    #[error("line {line}: `{opcode}` does not produce a result")]
    UnexpectedResult { line: usize, opcode: String },
}

/// An operand token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParsedOperand {
    /// `%N`
    Id(u32),
    /// `"..."`, stored without quotes.
    Str(String),
    /// Anything else: a number or an enum token.
    Word(String),
}

impl fmt::Display for ParsedOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedOperand::Id(id) => write!(f, "%{id}"),
            ParsedOperand::Str(s) => write!(f, "\"{s}\""),
            ParsedOperand::Word(w) => f.write_str(w),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParsedLine {
    pub result: Option<u32>,
    pub opcode: String,
    pub operands: Vec<ParsedOperand>,
}

impl ParsedLine {
    /// Ids this line reads. For typed instructions this includes the
    /// result type.
    pub fn used_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.operands.iter().filter_map(|op| match op {
            ParsedOperand::Id(id) => Some(*id),
            _ => None,
        })
    }
}

impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result {
            write!(f, "%{result} = ")?;
        }
        f.write_str(&self.opcode)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedModule {
    /// Comment lines, without the leading `;`.
    pub header: Vec<String>,
    pub lines: Vec<ParsedLine>,
}

impl ParsedModule {
    /// Value of a `; Key: value` header line.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header.iter().find_map(|h| {
            let (k, v) = h.trim().split_once(':')?;
            (k.trim() == key).then(|| v.trim())
        })
    }

    pub fn with_opcode<'a>(&'a self, opcode: &'a str) -> impl Iterator<Item = &'a ParsedLine> {
        self.lines.iter().filter(move |l| l.opcode == opcode)
    }

    /// Render back to text in the emitter's format.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for h in &self.header {
            let _ = writeln!(out, ";{h}");
        }
        for line in &self.lines {
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

/// Opcodes that never bind a result id.
const NO_RESULT: &[&str] = &[
    "OpCapability",
    "OpMemoryModel",
    "OpEntryPoint",
    "OpExecutionMode",
    "OpDecorate",
    "OpMemberDecorate",
    "OpStore",
    "OpSelectionMerge",
    "OpBranchConditional",
    "OpBranch",
    "OpReturn",
    "OpFunctionEnd",
];

pub fn parse_module(text: &str) -> Result<ParsedModule, ParseError> {
    let mut module = ParsedModule::default();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix(';') {
            module.header.push(comment.to_owned());
            continue;
        }
        module.lines.push(parse_line(line, line_no)?);
    }
    Ok(module)
}

fn parse_line(line: &str, line_no: usize) -> Result<ParsedLine, ParseError> {
    let mut tokens = tokenize(line, line_no)?.into_iter().peekable();

    let mut result = None;
    if let Some(RawToken::Plain(first)) = tokens.peek() {
        if first.starts_with('%') {
            let first = first.clone();
            tokens.next();
            match tokens.next() {
                Some(RawToken::Plain(eq)) if eq == "=" => {}
                _ => return Err(ParseError::MissingOpcode { line: line_no }),
            }
            result = Some(parse_id(&first, line_no)?);
        }
    }

    let opcode = match tokens.next() {
        Some(RawToken::Plain(op)) if op.starts_with("Op") => op,
        _ => return Err(ParseError::MissingOpcode { line: line_no }),
    };
    if result.is_some() && NO_RESULT.contains(&opcode.as_str()) {
        return Err(ParseError::UnexpectedResult {
            line: line_no,
            opcode,
        });
    }

    let mut operands = Vec::new();
    for token in tokens {
        operands.push(match token {
            RawToken::Str(s) => ParsedOperand::Str(s),
            RawToken::Plain(t) if t.starts_with('%') => ParsedOperand::Id(parse_id(&t, line_no)?),
            RawToken::Plain(t) => ParsedOperand::Word(t),
        });
    }

    Ok(ParsedLine {
        result,
        opcode,
        operands,
    })
}

fn parse_id(token: &str, line_no: usize) -> Result<u32, ParseError> {
    token
        .strip_prefix('%')
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ParseError::BadId {
            line: line_no,
            token: token.to_owned(),
        })
}

enum RawToken {
    Plain(String),
    Str(String),
}

fn tokenize(line: &str, line_no: usize) -> Result<Vec<RawToken>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut s = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => s.push(ch),
                    None => return Err(ParseError::UnterminatedString { line: line_no }),
                }
            }
            tokens.push(RawToken::Str(s));
        } else {
            let mut s = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                s.push(ch);
                chars.next();
            }
            tokens.push(RawToken::Plain(s));
        }
    }
    Ok(tokens)
}
