//! Script op-codes and the op-code container

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use hex;
use self::op_codes::*;
use std::fmt;
use std::io;
use std::io::{Read, Write};
use super::result::{Error, Result};
use super::serdes::Serializable;

#[allow(dead_code)]
pub mod op_codes;

/// Op-code form used to carry a data push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushKind {
    /// The op-code itself is the length, 1 to 75 bytes
    Direct,
    /// OP_PUSHDATA1 followed by a one byte length
    PushData1,
    /// OP_PUSHDATA2 followed by a two byte little-endian length
    PushData2,
    /// OP_PUSHDATA4 followed by a four byte little-endian length
    PushData4,
}

impl PushKind {
    /// Smallest push form able to carry `len` bytes
    fn minimal(len: usize) -> PushKind {
        match len {
            0..=75 => PushKind::Direct,
            76..=255 => PushKind::PushData1,
            256..=65535 => PushKind::PushData2,
            _ => PushKind::PushData4,
        }
    }
}

/// Data carried by a push op-code, together with the form that carried it
///
/// The form is kept so that a parsed script serializes back to the same bytes,
/// even when the push was not minimally encoded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PushData {
    data: Vec<u8>,
    kind: PushKind,
}

impl PushData {
    /// Creates a push of `data` using the smallest push form
    ///
    /// Empty data can't be carried by a push op-code and is pushed with OP_0 instead,
    /// see [`ScriptOp::push`].
    pub fn new(data: &[u8]) -> PushData {
        PushData {
            data: data.to_vec(),
            kind: PushKind::minimal(data.len()),
        }
    }

    /// Pushed bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Push form
    pub fn kind(&self) -> PushKind {
        self.kind
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        let len = self.data.len();
        match self.kind {
            PushKind::Direct => writer.write_u8(OP_PUSH + len as u8)?,
            PushKind::PushData1 => {
                writer.write_u8(OP_PUSHDATA1)?;
                writer.write_u8(len as u8)?;
            }
            PushKind::PushData2 => {
                writer.write_u8(OP_PUSHDATA2)?;
                writer.write_u16::<LittleEndian>(len as u16)?;
            }
            PushKind::PushData4 => {
                writer.write_u8(OP_PUSHDATA4)?;
                writer.write_u32::<LittleEndian>(len as u32)?;
            }
        }
        writer.write_all(&self.data)
    }
}

impl fmt::Debug for PushData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            PushKind::Direct => write!(f, "OP_PUSH+{} ", self.data.len())?,
            PushKind::PushData1 => write!(f, "OP_PUSHDATA1 {} ", self.data.len())?,
            PushKind::PushData2 => write!(f, "OP_PUSHDATA2 {} ", self.data.len())?,
            PushKind::PushData4 => write!(f, "OP_PUSHDATA4 {} ", self.data.len())?,
        }
        f.write_str(&hex::encode(&self.data))
    }
}

/// A single script operation
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ScriptOp {
    /// Push of a non-empty byte payload
    Push(PushData),
    /// Any other op-code, including OP_0 and the small integers
    Code(u8),
}

impl ScriptOp {
    /// Creates the op that pushes `data` in its minimal form
    pub fn push(data: &[u8]) -> ScriptOp {
        if data.is_empty() {
            ScriptOp::Code(OP_0)
        } else {
            ScriptOp::Push(PushData::new(data))
        }
    }

    /// Returns the pushed payload if this is a push operation
    pub fn push_data(&self) -> Option<&[u8]> {
        match self {
            ScriptOp::Push(p) => Some(p.data()),
            ScriptOp::Code(_) => None,
        }
    }
}

impl fmt::Debug for ScriptOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScriptOp::Push(p) => write!(f, "{:?}", p),
            ScriptOp::Code(op) => match op_name(*op) {
                Some(name) => f.write_str(name),
                None => write!(f, "{}", op),
            },
        }
    }
}

/// Transaction script as a sequence of operations
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<ScriptOp>);

impl Script {
    /// Creates a new empty script
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single non-push opcode
    pub fn append(&mut self, op: u8) {
        self.0.push(ScriptOp::Code(op));
    }

    /// Appends the opcodes and provided data that push it onto the stack
    pub fn append_data(&mut self, data: &[u8]) {
        self.0.push(ScriptOp::push(data));
    }

    /// Appends the opcode to push a small integer to the stack
    ///
    /// The number must be in the range [0,16].
    pub fn append_num(&mut self, n: u8) -> Result<()> {
        match small_int_op(n) {
            Some(op) => {
                self.append(op);
                Ok(())
            }
            None => Err(Error::BadArgument(format!("{} is not a small integer", n))),
        }
    }

    /// Appends all operations of another script
    pub fn append_script(&mut self, other: &Script) {
        self.0.extend_from_slice(&other.0);
    }

    /// Operations in order
    pub fn ops(&self) -> &[ScriptOp] {
        &self.0
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the payloads when every operation is a push, None otherwise
    pub fn pushes(&self) -> Option<Vec<&[u8]>> {
        self.0.iter().map(ScriptOp::push_data).collect()
    }

    /// Parses a script from its serialized form
    ///
    /// Fails when a push claims more bytes than the script has left.
    pub fn from_bytes(script: &[u8]) -> Result<Script> {
        let mut ops = Vec::new();
        let mut i = 0;
        while i < script.len() {
            let (kind, header, len) = match script[i] {
                len @ 1..=OP_PUSH_MAX => (PushKind::Direct, 1, len as usize),
                OP_PUSHDATA1 => {
                    need(script, i, 2)?;
                    (PushKind::PushData1, 2, script[i + 1] as usize)
                }
                OP_PUSHDATA2 => {
                    need(script, i, 3)?;
                    let len = LittleEndian::read_u16(&script[i + 1..i + 3]);
                    (PushKind::PushData2, 3, len as usize)
                }
                OP_PUSHDATA4 => {
                    need(script, i, 5)?;
                    let len = LittleEndian::read_u32(&script[i + 1..i + 5]);
                    (PushKind::PushData4, 5, len as usize)
                }
                op => {
                    ops.push(ScriptOp::Code(op));
                    i += 1;
                    continue;
                }
            };
            let start = i + header;
            need(script, start, len)?;
            let data = script[start..start + len].to_vec();
            ops.push(ScriptOp::Push(PushData { data, kind }));
            i = start + len;
        }
        Ok(Script(ops))
    }

    /// Serializes the script
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::new();
        for op in self.0.iter() {
            // Writes into a Vec never fail
            let _ = write_op(op, &mut v);
        }
        v
    }
}

fn need(script: &[u8], i: usize, n: usize) -> Result<()> {
    match i.checked_add(n) {
        Some(end) if end <= script.len() => Ok(()),
        _ => {
            let msg = format!("Script ends at {} but {} more bytes are needed at {}", script.len(), n, i);
            Err(Error::BadData(msg))
        }
    }
}

fn write_op(op: &ScriptOp, writer: &mut dyn Write) -> io::Result<()> {
    match op {
        ScriptOp::Push(p) => p.write(writer),
        ScriptOp::Code(op) => writer.write_u8(*op),
    }
}

impl From<Vec<ScriptOp>> for Script {
    fn from(ops: Vec<ScriptOp>) -> Script {
        Script(ops)
    }
}

impl Serializable<Script> for Script {
    /// Reads until the end of the reader since a script carries no length
    fn read(reader: &mut dyn Read) -> Result<Script> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Script::from_bytes(&bytes)
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        for op in self.0.iter() {
            write_op(op, writer)?;
        }
        Ok(())
    }
}

fn op_name(op: u8) -> Option<&'static str> {
    let name = match op {
        OP_0 => "OP_0",
        OP_1NEGATE => "OP_1NEGATE",
        OP_1 => "OP_1",
        OP_2 => "OP_2",
        OP_3 => "OP_3",
        OP_4 => "OP_4",
        OP_5 => "OP_5",
        OP_6 => "OP_6",
        OP_7 => "OP_7",
        OP_8 => "OP_8",
        OP_9 => "OP_9",
        OP_10 => "OP_10",
        OP_11 => "OP_11",
        OP_12 => "OP_12",
        OP_13 => "OP_13",
        OP_14 => "OP_14",
        OP_15 => "OP_15",
        OP_16 => "OP_16",
        OP_NOP => "OP_NOP",
        OP_IF => "OP_IF",
        OP_NOTIF => "OP_NOTIF",
        OP_ELSE => "OP_ELSE",
        OP_ENDIF => "OP_ENDIF",
        OP_VERIFY => "OP_VERIFY",
        OP_RETURN => "OP_RETURN",
        OP_DROP => "OP_DROP",
        OP_DUP => "OP_DUP",
        OP_EQUAL => "OP_EQUAL",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_RIPEMD160 => "OP_RIPEMD160",
        OP_SHA1 => "OP_SHA1",
        OP_SHA256 => "OP_SHA256",
        OP_HASH160 => "OP_HASH160",
        OP_HASH256 => "OP_HASH256",
        OP_CODESEPARATOR => "OP_CODESEPARATOR",
        OP_CHECKSIG => "OP_CHECKSIG",
        OP_CHECKSIGVERIFY => "OP_CHECKSIGVERIFY",
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG",
        OP_CHECKMULTISIGVERIFY => "OP_CHECKMULTISIGVERIFY",
        OP_CHECKLOCKTIMEVERIFY => "OP_CHECKLOCKTIMEVERIFY",
        OP_CHECKSEQUENCEVERIFY => "OP_CHECKSEQUENCEVERIFY",
        _ => return None,
    };
    Some(name)
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ret = String::new();
        ret.push_str("[");
        for (i, op) in self.0.iter().enumerate() {
            if i != 0 {
                ret.push_str(" ")
            }
            ret.push_str(&format!("{:?}", op));
        }
        ret.push_str(", hex: ");
        ret.push_str(&hex::encode(self.to_bytes()));
        ret.push_str("]");
        f.write_str(&ret)
    }
}
