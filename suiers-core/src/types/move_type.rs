//! Move identifiers and type tags, as they appear in move calls and `MakeMoveVec`.
use super::{ParseAddressError, SuiAddress};
use crate::codec::{check_len, EncodingError, ProtocolLimits, ValidityCheck};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A valid Move identifier: a module, function or struct name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Box<str>);

impl Identifier {
    /// Validates `s` against the Move identifier grammar
    /// (`[A-Za-z][A-Za-z0-9_]*` or `_[A-Za-z0-9_]+`)
    pub fn new(s: impl Into<Box<str>>) -> Result<Self, EncodingError> {
        let s = s.into();
        if is_valid_identifier(&s) {
            Ok(Self(s))
        } else {
            Err(EncodingError::InvalidIdentifier(s.into()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let valid_rest = |c: char| c.is_ascii_alphanumeric() || c == '_';
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(valid_rest),
        // a lone underscore is not an identifier
        Some('_') => !chars.as_str().is_empty() && chars.all(valid_rest),
        _ => false,
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl FromStr for Identifier {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::new(s).map_err(D::Error::custom)
    }
}

impl ValidityCheck for Identifier {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        check_len("identifier", self.0.len(), limits.max_identifier_len)
    }
}

/// A fully qualified struct type such as `0x2::coin::Coin<0x2::sui::SUI>`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: Identifier,
    pub name: Identifier,
    pub type_params: Vec<TypeTag>,
}

/// A Move type, used as a type argument.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

impl TypeTag {
    /// Variant index and name on the wire. Declaration order is the wire order, which is
    /// why the wider integers come last.
    fn variant(&self) -> (u32, &'static str) {
        match self {
            TypeTag::Bool => (0, "bool"),
            TypeTag::U8 => (1, "u8"),
            TypeTag::U64 => (2, "u64"),
            TypeTag::U128 => (3, "u128"),
            TypeTag::Address => (4, "address"),
            TypeTag::Signer => (5, "signer"),
            TypeTag::Vector(_) => (6, "vector"),
            TypeTag::Struct(_) => (7, "struct"),
            TypeTag::U16 => (8, "u16"),
            TypeTag::U32 => (9, "u32"),
            TypeTag::U256 => (10, "u256"),
        }
    }

    /// `depth` counts the vectors and structs enclosing `self`
    fn check_depth(&self, depth: usize, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        let max = limits.max_type_argument_depth;
        match self {
            TypeTag::Vector(inner) => {
                let depth = enter(depth, max)?;
                inner.check_depth(depth, limits)
            }
            TypeTag::Struct(tag) => {
                let depth = enter(depth, max)?;
                tag.check_at(depth, limits)
            }
            _ => Ok(()),
        }
    }
}

fn enter(depth: usize, max: usize) -> Result<usize, EncodingError> {
    let depth = depth + 1;
    if depth > max {
        return Err(EncodingError::TypeTooDeep { depth, max })
    }
    Ok(depth)
}

impl StructTag {
    fn check_at(&self, depth: usize, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        self.module.validity_check(limits)?;
        self.name.validity_check(limits)?;
        check_len("type_params", self.type_params.len(), limits.max_type_arguments)?;
        self.type_params.iter().try_for_each(|param| param.check_depth(depth, limits))
    }
}

impl ValidityCheck for TypeTag {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        self.check_depth(0, limits)
    }
}

impl ValidityCheck for StructTag {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        self.check_at(0, limits)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Error parsing a type tag from its textual form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseTypeTagError {
    #[error("type nests deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error(transparent)]
    Address(#[from] ParseAddressError),
    #[error(transparent)]
    Identifier(#[from] EncodingError),
}

impl FromStr for TypeTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser::new(s);
        let tag = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(tag),
            Some(ch) => Err(ParseTypeTagError::UnexpectedChar { ch, pos: parser.pos }),
        }
    }
}

impl FromStr for StructTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TypeTag>()? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(ParseTypeTagError::UnknownType(other.to_string())),
        }
    }
}

/// Recursive descent over the textual form. Nesting is bounded by the default
/// `max_type_argument_depth`, so a hostile string cannot exhaust the stack.
struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> TypeParser<'a> {
    fn new(src: &'a str) -> Self {
        let max_depth = ProtocolLimits::default().max_type_argument_depth;
        Self { src, pos: 0, depth: 0, max_depth }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn word(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len =
            rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseTypeTagError> {
        if self.eat(token) {
            return Ok(())
        }
        match self.peek() {
            Some(ch) => Err(ParseTypeTagError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(ParseTypeTagError::UnexpectedEnd),
        }
    }

    /// Parses the type arguments between `<` and `>` one level deeper
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseTypeTagError>,
    ) -> Result<T, ParseTypeTagError> {
        if self.depth >= self.max_depth {
            return Err(ParseTypeTagError::TooDeep { max: self.max_depth })
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn parse_type(&mut self) -> Result<TypeTag, ParseTypeTagError> {
        let word = self.word();
        if word.is_empty() {
            return match self.peek() {
                Some(ch) => Err(ParseTypeTagError::UnexpectedChar { ch, pos: self.pos }),
                None => Err(ParseTypeTagError::UnexpectedEnd),
            }
        }

        if !self.rest().starts_with("::") {
            return match word {
                "bool" => Ok(TypeTag::Bool),
                "u8" => Ok(TypeTag::U8),
                "u16" => Ok(TypeTag::U16),
                "u32" => Ok(TypeTag::U32),
                "u64" => Ok(TypeTag::U64),
                "u128" => Ok(TypeTag::U128),
                "u256" => Ok(TypeTag::U256),
                "address" => Ok(TypeTag::Address),
                "signer" => Ok(TypeTag::Signer),
                "vector" => {
                    self.expect("<")?;
                    let inner = self.nested(Self::parse_type)?;
                    self.expect(">")?;
                    Ok(TypeTag::Vector(Box::new(inner)))
                }
                other => Err(ParseTypeTagError::UnknownType(other.to_string())),
            }
        }

        let address: SuiAddress = word.parse()?;
        self.expect("::")?;
        let module = Identifier::new(self.word())?;
        self.expect("::")?;
        let name = Identifier::new(self.word())?;

        let mut type_params = Vec::new();
        if self.eat("<") {
            self.nested(|parser| loop {
                type_params.push(parser.parse_type()?);
                if parser.eat(",") {
                    continue
                }
                return parser.expect(">")
            })?;
        }

        Ok(TypeTag::Struct(Box::new(StructTag { address, module, name, type_params })))
    }
}

/// The textual form for humans, an enum in wire order for binary formats
impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            return s.collect_str(self)
        }
        let (index, name) = self.variant();
        match self {
            TypeTag::Vector(inner) => s.serialize_newtype_variant("TypeTag", index, name, inner),
            TypeTag::Struct(tag) => s.serialize_newtype_variant("TypeTag", index, name, tag),
            _ => s.serialize_unit_variant("TypeTag", index, name),
        }
    }
}

impl Serialize for StructTag {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            return s.collect_str(self)
        }
        (&self.address, &self.module, &self.name, &self.type_params).serialize(s)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, encode_with_limits, ProtocolLimits};

    #[test]
    fn identifier_grammar() {
        for ok in ["sui", "Coin", "request_add_stake", "_x", "a1_"] {
            assert!(Identifier::new(ok).is_ok(), "{ok}");
        }
        for bad in ["", "_", "1abc", "has-dash", "spa ce", "émoji"] {
            assert_eq!(
                Identifier::new(bad).unwrap_err(),
                EncodingError::InvalidIdentifier(bad.to_string()),
            );
        }
    }

    #[test]
    fn parses_nested_struct_tags() {
        let tag: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
        let TypeTag::Struct(coin) = &tag else { panic!("expected struct") };
        assert_eq!(coin.address, SuiAddress::from_u64(2));
        assert_eq!(coin.module.as_str(), "coin");
        assert_eq!(coin.name.as_str(), "Coin");
        assert_eq!(coin.type_params.len(), 1);

        let reparsed: TypeTag = tag.to_string().parse().unwrap();
        assert_eq!(reparsed, tag);
    }

    #[test]
    fn parses_primitives_and_vectors() {
        assert_eq!("u8".parse::<TypeTag>().unwrap(), TypeTag::U8);
        assert_eq!(
            "vector< vector<u64> >".parse::<TypeTag>().unwrap(),
            TypeTag::Vector(Box::new(TypeTag::Vector(Box::new(TypeTag::U64))))
        );
        assert_eq!(
            "0x1::m::T<u8, bool>".parse::<StructTag>().unwrap().type_params,
            vec![TypeTag::U8, TypeTag::Bool]
        );
    }

    #[test]
    fn rejects_malformed_tags() {
        assert_eq!("u9".parse::<TypeTag>(), Err(ParseTypeTagError::UnknownType("u9".into())));
        assert_eq!("vector<u8".parse::<TypeTag>(), Err(ParseTypeTagError::UnexpectedEnd));
        assert!(matches!(
            "u8>".parse::<TypeTag>(),
            Err(ParseTypeTagError::UnexpectedChar { ch: '>', pos: 2 })
        ));
        assert!(matches!("0x2::1bad::T".parse::<TypeTag>(), Err(ParseTypeTagError::Identifier(_))));
    }

    #[test]
    fn wire_discriminants() {
        assert_eq!(encode(&TypeTag::U8).unwrap().to_vec(), vec![1]);
        assert_eq!(encode(&TypeTag::U16).unwrap().to_vec(), vec![8]);
        assert_eq!(encode(&TypeTag::U256).unwrap().to_vec(), vec![10]);
        assert_eq!(
            encode(&TypeTag::Vector(Box::new(TypeTag::Address))).unwrap().to_vec(),
            vec![6, 4]
        );

        let sui: TypeTag = "0x2::sui::SUI".parse().unwrap();
        let mut expected = vec![7u8];
        expected.extend_from_slice(SuiAddress::from_u64(2).as_bytes());
        expected.extend_from_slice(&[3, b's', b'u', b'i', 3, b'S', b'U', b'I', 0]);
        assert_eq!(encode(&sui).unwrap().to_vec(), expected);
    }

    #[test]
    fn depth_is_limited() {
        let mut tag = TypeTag::U8;
        for _ in 0..3 {
            tag = TypeTag::Vector(Box::new(tag));
        }
        let limits = ProtocolLimits { max_type_argument_depth: 2, ..Default::default() };
        assert_eq!(
            encode_with_limits(&tag, limits).unwrap_err(),
            EncodingError::TypeTooDeep { depth: 3, max: 2 }
        );
        assert!(encode(&tag).is_ok());

        // a struct counts as a level as well
        let coin: TypeTag = "0x2::coin::Coin<vector<vector<u8>>>".parse().unwrap();
        assert_eq!(
            encode_with_limits(&coin, limits).unwrap_err(),
            EncodingError::TypeTooDeep { depth: 3, max: 2 }
        );
    }

    fn vectors(depth: usize) -> String {
        format!("{}u8{}", "vector<".repeat(depth), ">".repeat(depth))
    }

    #[test]
    fn parsing_depth_is_limited() {
        let max = ProtocolLimits::default().max_type_argument_depth;
        let deepest: TypeTag = vectors(max).parse().unwrap();
        assert!(encode(&deepest).is_ok());
        assert_eq!(vectors(max + 1).parse::<TypeTag>(), Err(ParseTypeTagError::TooDeep { max }));

        let nested_structs = format!("{}u8{}", "0x1::m::T<".repeat(max + 1), ">".repeat(max + 1));
        assert_eq!(nested_structs.parse::<TypeTag>(), Err(ParseTypeTagError::TooDeep { max }));
    }

    #[test]
    fn hostile_json_type_is_rejected() {
        let json = serde_json::Value::String(vectors(200_000));
        let err = serde_json::from_value::<TypeTag>(json).unwrap_err();
        assert!(err.to_string().contains("deeper than 16 levels"), "{err}");
    }
}
