//! Textual codec: the JSON and YAML surface forms used by the consensus
//! specs and their fixtures.
//!
//! Both forms share one text tree (a `serde_json::Value` with insertion
//! order preserved). Encoding renders a [`Value`] into that tree and then
//! either prints it as compact JSON or emits the single-line YAML flow style
//! fixtures use. Decoding parses either format into the same tree and walks
//! it against the [`Shape`], failing on the first bad field.
//!
//! Rendering rules:
//! - unsigned integers are decimal strings in JSON, bare in YAML
//! - byte and bit sequences are `0x` lowercase hex (bitlists include the
//!   sentinel bit); YAML single-quotes them
//! - containers are objects in declared field order
//! - unions are `{selector, value}` objects

use ethereum_types::U256;
use serde_json::{Map, Number, Value as Json};

use crate::bits::Bits;
use crate::error::{EncodeError, FieldValueError, MalformedEncoding, ShapeMismatch, TextError};
use crate::schema::{Shape, UintWidth};
use crate::validation::validate_value;
use crate::value::Value;

const SELECTOR_KEY: &str = "selector";
const VALUE_KEY: &str = "value";

/// Input format, which decides how lenient scalar parsing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Json,
    Yaml,
    /// A tree handed over by a serde deserializer of unknown format.
    Serde,
}

impl Dialect {
    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Serde => "text",
        }
    }

    /// Whether bare unsigned numbers are accepted for integer fields.
    fn accepts_numbers(self) -> bool {
        !matches!(self, Self::Json)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Render a value as compact JSON.
pub fn to_json(value: &Value, shape: &Shape) -> Result<String, EncodeError> {
    Ok(to_text_tree(value, shape)?.to_string())
}

/// Render a value as a single YAML flow line terminated by `\n`.
pub fn to_yaml(value: &Value, shape: &Shape) -> Result<String, EncodeError> {
    let tree = to_text_tree(value, shape)?;
    let mut out = String::new();
    emit_flow(&tree, &mut out);
    out.push('\n');
    Ok(out)
}

/// Build the shared text tree for a value.
pub fn to_text_tree(value: &Value, shape: &Shape) -> Result<Json, EncodeError> {
    validate_value(value, shape)?;
    render(value, shape)
}

fn render(value: &Value, shape: &Shape) -> Result<Json, EncodeError> {
    Ok(match (shape, value) {
        (Shape::Bool, Value::Bool(b)) => Json::Bool(*b),
        (Shape::Uint(_), Value::U8(n)) => decimal(n),
        (Shape::Uint(_), Value::U16(n)) => decimal(n),
        (Shape::Uint(_), Value::U32(n)) => decimal(n),
        (Shape::Uint(_), Value::U64(n)) => decimal(n),
        (Shape::Uint(_), Value::U128(n)) => decimal(n),
        (Shape::Uint(_), Value::U256(n)) => decimal(n),
        (Shape::ByteVector(_) | Shape::ByteList(_), Value::Bytes(bytes)) => prefixed_hex(bytes),
        (Shape::BitVector(_), Value::Bits(bits)) => prefixed_hex(bits.as_bytes()),
        (Shape::BitList(_), Value::Bits(bits)) => prefixed_hex(&bits.to_bitlist_bytes()),
        (Shape::Vector(element, _) | Shape::List(element, _), Value::List(items)) => Json::Array(
            items
                .iter()
                .map(|item| render(item, element))
                .collect::<Result<_, _>>()?,
        ),
        (Shape::Container(container), Value::Container(fields)) => {
            let mut object = Map::new();
            for (field, value) in container.fields.iter().zip(fields) {
                object.insert(field.name.to_string(), render(value, &field.shape)?);
            }
            Json::Object(object)
        }
        (Shape::Union(variants), Value::Union(selector, inner)) => {
            let rendered = match (variants.get(*selector as usize), inner) {
                (Some(Some(variant)), Some(inner)) => render(inner, variant)?,
                _ => Json::Null,
            };
            let mut object = Map::new();
            object.insert(SELECTOR_KEY.to_string(), decimal(selector));
            object.insert(VALUE_KEY.to_string(), rendered);
            Json::Object(object)
        }
        (shape, value) => {
            return Err(ShapeMismatch {
                expected: shape.name(),
                found: value.kind(),
            }
            .into())
        }
    })
}

fn decimal(n: &impl ToString) -> Json {
    Json::String(n.to_string())
}

fn prefixed_hex(bytes: &[u8]) -> Json {
    Json::String(format!("0x{}", hex::encode(bytes)))
}

/// YAML flow style: `{key: value, ...}`, `[a, b]`, hex single-quoted and
/// decimal strings bare. Integers beyond `u64` are quoted, since YAML
/// parsers read them back as floats.
fn emit_flow(node: &Json, out: &mut String) {
    match node {
        Json::Null => out.push_str("null"),
        Json::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Json::Number(n) => out.push_str(&n.to_string()),
        Json::String(s) if s.starts_with("0x") || s.parse::<u64>().is_err() => {
            out.push('\'');
            out.push_str(s);
            out.push('\'');
        }
        Json::String(s) => out.push_str(s),
        Json::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_flow(item, out);
            }
            out.push(']');
        }
        Json::Object(object) => {
            out.push('{');
            for (i, (key, item)) in object.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                emit_flow(item, out);
            }
            out.push('}');
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Parse JSON text as a value of `shape`.
pub fn from_json(text: &str, shape: &Shape) -> Result<Value, TextError> {
    if text.trim().is_empty() {
        return Err(TextError::UnexpectedEnd);
    }
    let tree: Json = serde_json::from_str(text).map_err(|e| {
        if e.is_eof() {
            TextError::UnexpectedEnd
        } else {
            malformed(Dialect::Json, e.to_string())
        }
    })?;
    from_text_tree(&tree, shape, Dialect::Json)
}

/// Parse YAML text (block or flow style) as a value of `shape`.
pub fn from_yaml(text: &str, shape: &Shape) -> Result<Value, TextError> {
    if text.trim().is_empty() {
        return Err(TextError::UnexpectedEnd);
    }
    let document: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| malformed(Dialect::Yaml, e.to_string()))?;
    if document.is_null() {
        return Err(TextError::UnexpectedEnd);
    }
    let tree = yaml_to_tree(document)?;
    from_text_tree(&tree, shape, Dialect::Yaml)
}

/// Decode an already parsed JSON tree with the strict JSON rules.
pub fn from_json_value(tree: &Json, shape: &Shape) -> Result<Value, TextError> {
    from_text_tree(tree, shape, Dialect::Json)
}

/// Decode a tree produced by an arbitrary serde deserializer.
///
/// Integers may be bare unsigned numbers as well as decimal strings, since
/// the source may be YAML as easily as JSON.
pub fn from_text_value(tree: &Json, shape: &Shape) -> Result<Value, TextError> {
    from_text_tree(tree, shape, Dialect::Serde)
}

fn from_text_tree(tree: &Json, shape: &Shape, dialect: Dialect) -> Result<Value, TextError> {
    let decoder = Decoder { dialect };
    let root = shape.name();
    decoder.node(tree, shape, &root)
}

/// Convert a parsed YAML document into the shared text tree.
fn yaml_to_tree(node: serde_yaml::Value) -> Result<Json, TextError> {
    use serde_yaml::Value as Yaml;

    Ok(match node {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => {
            if let Some(u) = n.as_u64() {
                Json::Number(Number::from(u))
            } else if let Some(i) = n.as_i64() {
                Json::Number(Number::from(i))
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Json::Number)
                    .ok_or_else(|| malformed(Dialect::Yaml, format!("unrepresentable number {n}")))?
            }
        }
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => Json::Array(
            items
                .into_iter()
                .map(yaml_to_tree)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, item) in mapping {
                let Yaml::String(key) = key else {
                    return Err(malformed(Dialect::Yaml, "mapping keys must be strings".into()));
                };
                object.insert(key, yaml_to_tree(item)?);
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_tree(tagged.value)?,
    })
}

fn malformed(dialect: Dialect, message: String) -> TextError {
    TextError::MalformedText {
        format: dialect.name(),
        message,
    }
}

fn json_kind(node: &Json) -> &'static str {
    match node {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

struct Decoder {
    dialect: Dialect,
}

impl Decoder {
    /// Decode one node. `label` names the innermost field for error messages.
    fn node(&self, node: &Json, shape: &Shape, label: &str) -> Result<Value, TextError> {
        match shape {
            Shape::Bool => match node {
                Json::Bool(b) => Ok(Value::Bool(*b)),
                other => Err(self.wrong_kind("boolean", other, label)),
            },
            Shape::Uint(width) => self.uint(node, *width, label),
            Shape::ByteVector(n) => {
                let bytes = self.hex(node, label)?;
                if bytes.len() != *n {
                    return Err(TextError::IncorrectLength {
                        field: label.to_string(),
                        expected: *n,
                        actual: bytes.len(),
                    });
                }
                Ok(Value::Bytes(bytes))
            }
            Shape::ByteList(max) => {
                let bytes = self.hex(node, label)?;
                if bytes.len() > *max {
                    return Err(TextError::ExceedsMaximum {
                        field: label.to_string(),
                        max: *max,
                        actual: bytes.len(),
                    });
                }
                Ok(Value::Bytes(bytes))
            }
            Shape::BitVector(n) => {
                let bytes = self.hex(node, label)?;
                let expected = n.div_ceil(8);
                if bytes.len() != expected {
                    return Err(TextError::IncorrectLength {
                        field: label.to_string(),
                        expected,
                        actual: bytes.len(),
                    });
                }
                Bits::from_packed(bytes, *n)
                    .map(Value::Bits)
                    .map_err(|e| invalid(label, e.into()))
            }
            Shape::BitList(max) => {
                let bytes = self.hex(node, label)?;
                match Bits::from_bitlist_bytes(&bytes, *max) {
                    Ok(bits) => Ok(Value::Bits(bits)),
                    Err(MalformedEncoding::TooManyElements { max, actual }) => {
                        Err(TextError::ExceedsMaximum {
                            field: label.to_string(),
                            max,
                            actual,
                        })
                    }
                    Err(e) => Err(invalid(label, e.into())),
                }
            }
            Shape::Vector(element, n) => {
                let items = self.array(node, label)?;
                if items.len() != *n {
                    return Err(TextError::IncorrectLength {
                        field: label.to_string(),
                        expected: *n,
                        actual: items.len(),
                    });
                }
                self.elements(items, element, label)
            }
            Shape::List(element, max) => {
                let items = self.array(node, label)?;
                if items.len() > *max {
                    return Err(TextError::ExceedsMaximum {
                        field: label.to_string(),
                        max: *max,
                        actual: items.len(),
                    });
                }
                self.elements(items, element, label)
            }
            Shape::Container(container) => {
                let object = self.object(node, label)?;
                let mut fields = Vec::with_capacity(container.fields.len());
                for field in &container.fields {
                    let child = present(object.get(field.name), field.label)?;
                    fields.push(self.node(child, &field.shape, field.label)?);
                }
                Ok(Value::Container(fields))
            }
            Shape::Union(variants) => {
                let object = self.object(node, label)?;
                let selector = present(object.get(SELECTOR_KEY), SELECTOR_KEY)?;
                let selector = self.uint(selector, UintWidth::U8, SELECTOR_KEY)?;
                let Value::U8(selector) = selector else {
                    return Err(self.wrong_kind("selector", node, label));
                };
                let inner = match variants.get(selector as usize) {
                    Some(Some(variant)) => {
                        let child = present(object.get(VALUE_KEY), label)?;
                        Some(Box::new(self.node(child, variant, label)?))
                    }
                    Some(None) if selector == 0 => match object.get(VALUE_KEY) {
                        None | Some(Json::Null) => None,
                        Some(other) => return Err(self.wrong_kind("null", other, label)),
                    },
                    _ => {
                        return Err(invalid(
                            label,
                            MalformedEncoding::InvalidSelector(selector).into(),
                        ))
                    }
                };
                Ok(Value::Union(selector, inner))
            }
        }
    }

    fn elements(&self, items: &[Json], element: &Shape, label: &str) -> Result<Value, TextError> {
        items
            .iter()
            .map(|item| self.node(item, element, label))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    fn uint(&self, node: &Json, width: UintWidth, label: &str) -> Result<Value, TextError> {
        let digits = match node {
            Json::String(s) => s.clone(),
            Json::Number(n) if self.dialect.accepts_numbers() => {
                if n.is_u64() {
                    n.to_string()
                } else {
                    return Err(invalid(
                        label,
                        FieldValueError::Decimal(format!("{n} is not an unsigned integer")),
                    ));
                }
            }
            other => return Err(self.wrong_kind("string", other, label)),
        };
        parse_uint(&digits, width).map_err(|e| invalid(label, e))
    }

    fn hex(&self, node: &Json, label: &str) -> Result<Vec<u8>, TextError> {
        match node {
            Json::String(s) => {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                hex::decode(digits).map_err(|e| invalid(label, e.into()))
            }
            other => Err(self.wrong_kind("hex string", other, label)),
        }
    }

    fn array<'a>(&self, node: &'a Json, label: &str) -> Result<&'a [Json], TextError> {
        match node {
            Json::Array(items) => Ok(items),
            other => Err(self.wrong_kind("array", other, label)),
        }
    }

    fn object<'a>(&self, node: &'a Json, label: &str) -> Result<&'a Map<String, Json>, TextError> {
        match node {
            Json::Object(object) => Ok(object),
            other => Err(self.wrong_kind("object", other, label)),
        }
    }

    fn wrong_kind(&self, expected: &str, found: &Json, label: &str) -> TextError {
        malformed(
            self.dialect,
            format!("expected {expected} for {label}, found {}", json_kind(found)),
        )
    }
}

/// A field that is absent, null or an empty string is missing.
fn present<'a>(node: Option<&'a Json>, label: &str) -> Result<&'a Json, TextError> {
    match node {
        None | Some(Json::Null) => Err(TextError::MissingField(label.to_string())),
        Some(Json::String(s)) if s.is_empty() => Err(TextError::MissingField(label.to_string())),
        Some(node) => Ok(node),
    }
}

fn invalid(label: &str, source: FieldValueError) -> TextError {
    TextError::InvalidFieldValue {
        field: label.to_string(),
        source,
    }
}

fn parse_uint(digits: &str, width: UintWidth) -> Result<Value, FieldValueError> {
    // `str::parse` takes a leading `+`; the textual form is digits only.
    if !digits.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        return Err(FieldValueError::Decimal(format!(
            "{digits} is not an unsigned decimal integer"
        )));
    }
    Ok(match width {
        UintWidth::U8 => Value::U8(digits.parse()?),
        UintWidth::U16 => Value::U16(digits.parse()?),
        UintWidth::U32 => Value::U32(digits.parse()?),
        UintWidth::U64 => Value::U64(digits.parse()?),
        UintWidth::U128 => Value::U128(digits.parse()?),
        UintWidth::U256 => Value::U256(U256::from_dec_str(digits).map_err(|_| {
            FieldValueError::Decimal(format!("{digits} is not a decimal uint256"))
        })?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContainerShape, Field};

    fn deposit_message() -> Shape {
        Shape::Container(ContainerShape::new(
            "DepositMessage",
            vec![
                Field::new("pubkey", "public key", Shape::ByteVector(48)),
                Field::new(
                    "withdrawal_credentials",
                    "withdrawal credentials",
                    Shape::ByteVector(32),
                ),
                Field::new("amount", "amount", Shape::Uint(UintWidth::U64)),
            ],
        ))
    }

    fn sample() -> Value {
        Value::Container(vec![
            Value::Bytes((0x00..0x30).collect()),
            Value::Bytes((0x20..0x40).collect()),
            Value::U64(32_000_000_000),
        ])
    }

    const SAMPLE_JSON: &str = r#"{"pubkey":"0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f","withdrawal_credentials":"0x202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f","amount":"32000000000"}"#;

    #[test]
    fn test_json_encode_matches_fixture_form() {
        assert_eq!(to_json(&sample(), &deposit_message()).unwrap(), SAMPLE_JSON);
    }

    #[test]
    fn test_json_decode_round_trip() {
        let value = from_json(SAMPLE_JSON, &deposit_message()).unwrap();
        assert_eq!(value, sample());
        assert_eq!(to_json(&value, &deposit_message()).unwrap(), SAMPLE_JSON);
    }

    #[test]
    fn test_yaml_form() {
        let yaml = to_yaml(&sample(), &deposit_message()).unwrap();
        assert!(yaml.starts_with("{pubkey: '0x0001"));
        assert!(yaml.ends_with(", amount: 32000000000}\n"));
        assert_eq!(from_yaml(&yaml, &deposit_message()).unwrap(), sample());
    }

    #[test]
    fn test_yaml_block_style_and_quoted_ints() {
        let shape = Shape::Container(ContainerShape::new(
            "Fork",
            vec![
                Field::new("previous_version", "previous version", Shape::ByteVector(4)),
                Field::new("current_version", "current version", Shape::ByteVector(4)),
                Field::new("epoch", "epoch", Shape::Uint(UintWidth::U64)),
            ],
        ));
        let text = "previous_version: '0x00000001'\ncurrent_version: '0x00000002'\nepoch: '7'\n";
        let value = from_yaml(text, &shape).unwrap();
        assert_eq!(
            to_yaml(&value, &shape).unwrap(),
            "{previous_version: '0x00000001', current_version: '0x00000002', epoch: 7}\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(from_json("", &deposit_message()), Err(TextError::UnexpectedEnd)));
        assert!(matches!(from_json("{", &deposit_message()), Err(TextError::UnexpectedEnd)));
        assert!(matches!(from_yaml("  \n", &deposit_message()), Err(TextError::UnexpectedEnd)));
        assert_eq!(
            from_json("", &deposit_message()).unwrap_err().to_string(),
            "unexpected end of input"
        );
    }

    #[test]
    fn test_wrong_top_level_kind() {
        let err = from_json("[]", &deposit_message()).unwrap_err();
        assert!(matches!(err, TextError::MalformedText { format: "JSON", .. }));
        assert!(err.to_string().starts_with("invalid JSON: "));
    }

    #[test]
    fn test_missing_fields() {
        let err = from_json("{}", &deposit_message()).unwrap_err();
        assert_eq!(err.to_string(), "public key missing");

        let no_amount = SAMPLE_JSON.replace(r#","amount":"32000000000""#, "");
        let err = from_json(&no_amount, &deposit_message()).unwrap_err();
        assert_eq!(err.to_string(), "amount missing");

        let empty_key = SAMPLE_JSON.replace(r#""pubkey":"0x0001"#, r#""pubkey":"","x":"0x0001"#);
        let err = from_json(&empty_key, &deposit_message()).unwrap_err();
        assert_eq!(err.to_string(), "public key missing");
    }

    #[test]
    fn test_integer_must_be_string_in_json() {
        let numeric = SAMPLE_JSON.replace(r#""32000000000""#, "32000000000");
        assert!(matches!(
            from_json(&numeric, &deposit_message()),
            Err(TextError::MalformedText { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let bad_amount = SAMPLE_JSON.replace("32000000000", "-1");
        let err = from_json(&bad_amount, &deposit_message()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for amount: invalid decimal: -1 is not an unsigned decimal integer"
        );

        let overflow = SAMPLE_JSON.replace("32000000000", "18446744073709551616");
        let err = from_json(&overflow, &deposit_message()).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for amount: number too large to fit in target type");

        let bad_hex = SAMPLE_JSON.replace("0x000102", "0xzz0102");
        let err = from_json(&bad_hex, &deposit_message()).unwrap_err();
        assert!(matches!(err, TextError::InvalidFieldValue { ref field, .. } if field == "public key"));
    }

    #[test]
    fn test_length_errors() {
        let short = SAMPLE_JSON.replace("0x000102", "0x0102");
        let err = from_json(&short, &deposit_message()).unwrap_err();
        assert!(err.to_string().starts_with("incorrect length for public key"));
        assert!(err.to_string().contains("too short"));

        let long = SAMPLE_JSON.replace("0x000102", "0xff000102");
        let err = from_json(&long, &deposit_message()).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_bitlist_text_includes_sentinel() {
        let shape = Shape::BitList(16);
        let value = Value::Bits(Bits::from_bools(&[true, false, true]));
        assert_eq!(to_json(&value, &shape).unwrap(), r#""0x0d""#);
        assert_eq!(from_json(r#""0x0d""#, &shape).unwrap(), value);
        match from_json(r#""0xffff01""#, &shape).unwrap() {
            Value::Bits(bits) => assert_eq!(bits.len(), 16),
            other => panic!("expected bits, got {other:?}"),
        }
        assert!(matches!(
            from_json(r#""0xffff02""#, &shape),
            Err(TextError::ExceedsMaximum { max: 16, actual: 17, .. })
        ));
        assert!(matches!(
            from_json(r#""0x0500""#, &shape),
            Err(TextError::InvalidFieldValue { .. })
        ));
    }

    #[test]
    fn test_lists_and_unions() {
        let shape = Shape::list(Shape::Uint(UintWidth::U64), 4);
        let value = Value::List(vec![Value::U64(1), Value::U64(22)]);
        assert_eq!(to_json(&value, &shape).unwrap(), r#"["1","22"]"#);
        assert_eq!(to_yaml(&value, &shape).unwrap(), "[1, 22]\n");
        assert_eq!(to_yaml(&Value::List(vec![]), &shape).unwrap(), "[]\n");
        assert!(matches!(
            from_json(r#"["1","2","3","4","5"]"#, &shape),
            Err(TextError::ExceedsMaximum { max: 4, actual: 5, .. })
        ));

        let union = Shape::Union(vec![None, Some(Shape::Uint(UintWidth::U16))]);
        let some = Value::Union(1, Some(Box::new(Value::U16(9))));
        assert_eq!(to_json(&some, &union).unwrap(), r#"{"selector":"1","value":"9"}"#);
        assert_eq!(from_json(r#"{"selector":"1","value":"9"}"#, &union).unwrap(), some);
        assert_eq!(
            to_yaml(&Value::Union(0, None), &union).unwrap(),
            "{selector: 0, value: null}\n"
        );
        assert_eq!(from_yaml("{selector: 0, value: null}", &union).unwrap(), Value::Union(0, None));
        assert!(from_json(r#"{"selector":"2","value":"9"}"#, &union).is_err());
    }

    #[test]
    fn test_uint256_text() {
        let shape = Shape::Uint(UintWidth::U256);
        let big = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let value = from_json(&format!("\"{big}\""), &shape).unwrap();
        assert_eq!(value, Value::U256(U256::max_value()));
        assert_eq!(to_json(&value, &shape).unwrap(), format!("\"{big}\""));
        assert!(from_json(r#""0x10""#, &shape).is_err());

        let yaml = to_yaml(&value, &shape).unwrap();
        assert_eq!(yaml, format!("'{big}'\n"));
        assert_eq!(from_yaml(&yaml, &shape).unwrap(), value);
        assert_eq!(to_yaml(&Value::U256(U256::from(7u64)), &shape).unwrap(), "7\n");
    }

    #[test]
    fn test_sign_prefixed_integers_rejected() {
        for digits in ["+32000000000", " 32000000000"] {
            let text = SAMPLE_JSON.replace("32000000000", digits);
            assert!(
                matches!(
                    from_json(&text, &deposit_message()),
                    Err(TextError::InvalidFieldValue { ref field, .. }) if field == "amount"
                ),
                "{digits:?} should be rejected"
            );
        }

        let shape = Shape::Uint(UintWidth::U256);
        assert!(from_json(r#""+1""#, &shape).is_err());
        assert_eq!(from_json(r#""1""#, &shape).unwrap(), Value::U256(U256::from(1u64)));
    }

    #[test]
    fn test_text_value_accepts_bare_numbers() {
        let numeric = SAMPLE_JSON.replace(r#""32000000000""#, "32000000000");
        let tree: Json = serde_json::from_str(&numeric).unwrap();
        assert_eq!(from_text_value(&tree, &deposit_message()).unwrap(), sample());
        assert!(matches!(
            from_json_value(&tree, &deposit_message()),
            Err(TextError::MalformedText { format: "JSON", .. })
        ));

        let negative: Json = serde_json::from_str("-1").unwrap();
        assert!(from_text_value(&negative, &Shape::Uint(UintWidth::U64)).is_err());
    }
}
