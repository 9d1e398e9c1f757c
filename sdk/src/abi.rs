//! Minimal Ethereum contract ABI support: parsing a JSON interface
//! description, computing method selectors and packing/unpacking the
//! static argument types actions need.
//!
//! See <https://docs.soliditylang.org/en/latest/abi-spec.html> for the
//! encoding rules.

use serde::Deserialize;
use sha3::{Digest, Keccak256};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AbiError;

/// Length of an ABI word in bytes.
pub const WORD_LENGTH: usize = 32;
/// Length of a method selector in bytes.
pub const SELECTOR_LENGTH: usize = 4;

pub type Selector = [u8; SELECTOR_LENGTH];

/// Returns the selector of a canonical method signature, e.g.
/// `transfer(address,uint256)`.
pub fn selector_of(signature: &str) -> Selector {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; SELECTOR_LENGTH];
    selector.copy_from_slice(&digest[..SELECTOR_LENGTH]);
    selector
}

/// The static parameter types supported by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    /// Signed integer of the given bit width.
    Int(u16),
    /// Unsigned integer of the given bit width.
    Uint(u16),
    Bool,
    Address,
}

impl AbiType {
    fn parse_width(ty: &str, width: &str) -> Result<u16, AbiError> {
        if width.is_empty() {
            return Ok(256);
        }
        match width.parse::<u16>() {
            Ok(w) if w > 0 && w <= 256 && w % 8 == 0 => Ok(w),
            _ => Err(AbiError::UnsupportedType(ty.to_string())),
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(ty: &str) -> Result<Self, Self::Err> {
        match ty {
            "bool" => Ok(AbiType::Bool),
            "address" => Ok(AbiType::Address),
            _ => {
                if let Some(width) = ty.strip_prefix("uint") {
                    Ok(AbiType::Uint(AbiType::parse_width(ty, width)?))
                } else if let Some(width) = ty.strip_prefix("int") {
                    Ok(AbiType::Int(AbiType::parse_width(ty, width)?))
                } else {
                    Err(AbiError::UnsupportedType(ty.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
        }
    }
}

/// A single argument value. Integers wider than 64 bits are accepted as
/// types but values are limited to the 64-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiValue {
    Int(i64),
    Uint(u64),
    Bool(bool),
    Address([u8; 20]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiParam {
    pub name: String,
    pub ty: AbiType,
}

/// A contract method: its name, typed inputs and the selector derived from
/// its canonical signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiMethod {
    name: String,
    inputs: Vec<AbiParam>,
    state_mutability: StateMutability,
    selector: Selector,
}

impl AbiMethod {
    pub fn new(name: &str, inputs: Vec<AbiParam>, state_mutability: StateMutability) -> Self {
        let mut method = AbiMethod {
            name: name.to_string(),
            inputs,
            state_mutability,
            selector: [0u8; SELECTOR_LENGTH],
        };
        method.selector = selector_of(&method.signature());
        method
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[AbiParam] {
        &self.inputs
    }

    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Canonical signature, `name(type1,type2,...)`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// Packs the arguments as a tuple of 32-byte words, without selector.
    pub fn pack_inputs(&self, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        if args.len() != self.inputs.len() {
            return Err(AbiError::ArgumentCount {
                expected: self.inputs.len(),
                got: args.len(),
            });
        }
        let mut buf = Vec::with_capacity(args.len() * WORD_LENGTH);
        for (index, (param, value)) in self.inputs.iter().zip(args).enumerate() {
            buf.extend_from_slice(&pack_word(index, param.ty, value)?);
        }
        Ok(buf)
    }

    /// Selector followed by the packed arguments.
    pub fn encode_call(&self, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let packed = self.pack_inputs(args)?;
        let mut data = Vec::with_capacity(SELECTOR_LENGTH + packed.len());
        data.extend_from_slice(&self.selector);
        data.extend(packed);
        Ok(data)
    }

    /// Reverses `encode_call`, checking the selector and every word.
    pub fn decode_call(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let expected = SELECTOR_LENGTH + self.inputs.len() * WORD_LENGTH;
        if data.len() != expected {
            return Err(AbiError::InvalidLength {
                expected,
                got: data.len(),
            });
        }
        if data[..SELECTOR_LENGTH] != self.selector {
            return Err(AbiError::InvalidSelector(self.name.clone()));
        }
        data[SELECTOR_LENGTH..]
            .chunks_exact(WORD_LENGTH)
            .zip(&self.inputs)
            .enumerate()
            .map(|(index, (word, param))| unpack_word(index, param.ty, word))
            .collect()
    }
}

fn overflow(index: usize, ty: AbiType) -> AbiError {
    AbiError::Overflow {
        index,
        expected: ty.to_string(),
    }
}

fn pack_word(index: usize, ty: AbiType, value: &AbiValue) -> Result<[u8; WORD_LENGTH], AbiError> {
    let mut word = [0u8; WORD_LENGTH];
    match (ty, value) {
        (AbiType::Int(bits), AbiValue::Int(v)) => {
            if bits < 64 {
                let max = (1i64 << (bits - 1)) - 1;
                let min = -(1i64 << (bits - 1));
                if *v < min || *v > max {
                    return Err(overflow(index, ty));
                }
            }
            // sign extension
            if *v < 0 {
                word = [0xff; WORD_LENGTH];
            }
            word[WORD_LENGTH - 8..].copy_from_slice(&v.to_be_bytes());
        }
        (AbiType::Uint(bits), AbiValue::Uint(v)) => {
            if bits < 64 && v >> bits != 0 {
                return Err(overflow(index, ty));
            }
            word[WORD_LENGTH - 8..].copy_from_slice(&v.to_be_bytes());
        }
        (AbiType::Bool, AbiValue::Bool(b)) => word[WORD_LENGTH - 1] = *b as u8,
        (AbiType::Address, AbiValue::Address(addr)) => {
            word[WORD_LENGTH - 20..].copy_from_slice(addr);
        }
        _ => {
            return Err(AbiError::TypeMismatch {
                index,
                expected: ty.to_string(),
            })
        }
    }
    Ok(word)
}

fn unpack_word(index: usize, ty: AbiType, word: &[u8]) -> Result<AbiValue, AbiError> {
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD_LENGTH - 8..]);
    let high = &word[..WORD_LENGTH - 8];
    match ty {
        AbiType::Int(bits) => {
            let v = i64::from_be_bytes(low);
            let ext = if v < 0 { 0xff } else { 0x00 };
            if high.iter().any(|b| *b != ext) {
                return Err(overflow(index, ty));
            }
            if bits < 64 && (v < -(1i64 << (bits - 1)) || v > (1i64 << (bits - 1)) - 1) {
                return Err(overflow(index, ty));
            }
            Ok(AbiValue::Int(v))
        }
        AbiType::Uint(bits) => {
            let v = u64::from_be_bytes(low);
            if high.iter().any(|b| *b != 0) || (bits < 64 && v >> bits != 0) {
                return Err(overflow(index, ty));
            }
            Ok(AbiValue::Uint(v))
        }
        AbiType::Bool => match word[WORD_LENGTH - 1] {
            b @ (0 | 1) if word[..WORD_LENGTH - 1].iter().all(|x| *x == 0) => {
                Ok(AbiValue::Bool(b == 1))
            }
            _ => Err(overflow(index, ty)),
        },
        AbiType::Address => {
            if word[..WORD_LENGTH - 20].iter().any(|b| *b != 0) {
                return Err(overflow(index, ty));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&word[WORD_LENGTH - 20..]);
            Ok(AbiValue::Address(addr))
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<JsonParam>,
    #[serde(default)]
    state_mutability: StateMutability,
}

#[derive(Deserialize)]
struct JsonParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

/// The methods of a contract interface, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct AbiInterface {
    methods: BTreeMap<String, AbiMethod>,
}

impl AbiInterface {
    /// Parses a JSON interface description. Entries other than functions
    /// are ignored. Overloaded names get a numeric suffix in declaration
    /// order (`name`, `name0`, `name1`, ...).
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let entries: Vec<JsonEntry> = serde_json::from_str(json)?;
        let mut methods = BTreeMap::new();
        for entry in entries.into_iter().filter(|e| e.kind == "function") {
            if entry.name.is_empty() {
                return Err(AbiError::InvalidInterface(
                    "function without a name".to_string(),
                ));
            }
            let inputs = entry
                .inputs
                .into_iter()
                .map(|p| {
                    Ok(AbiParam {
                        name: p.name,
                        ty: p.ty.parse()?,
                    })
                })
                .collect::<Result<Vec<_>, AbiError>>()?;
            let method = AbiMethod::new(&entry.name, inputs, entry.state_mutability);

            let mut key = entry.name.clone();
            let mut i = 0;
            while methods.contains_key(&key) {
                key = format!("{}{}", entry.name, i);
                i += 1;
            }
            log::debug!("loaded abi method {} as {}", method.signature(), key);
            methods.insert(key, method);
        }
        Ok(AbiInterface { methods })
    }

    pub fn method(&self, name: &str) -> Result<&AbiMethod, AbiError> {
        self.methods
            .get(name)
            .ok_or_else(|| AbiError::MethodNotFound(name.to_string()))
    }

    /// Takes ownership of a single method, dropping the rest.
    pub fn into_method(mut self, name: &str) -> Result<AbiMethod, AbiError> {
        self.methods
            .remove(name)
            .ok_or_else(|| AbiError::MethodNotFound(name.to_string()))
    }

    pub fn methods(&self) -> impl Iterator<Item = (&String, &AbiMethod)> {
        self.methods.iter()
    }
}
