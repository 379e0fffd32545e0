//! Conversions between YAML nodes and typed field values.

use cfmigrate_core::{AttrSpec, FieldKind, FieldValue, Item};
use serde_yaml::{Mapping, Value};

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Reads `value` as a field of type `kind`, normalizing enum aliases.
pub(crate) fn from_yaml(kind: &FieldKind, value: &Value) -> Result<FieldValue, String> {
    match (kind, value) {
        (FieldKind::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Int, Value::Number(n)) => n
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| format!("{} is not an integer", n)),
        (FieldKind::Unsigned, Value::Number(n)) => n
            .as_u64()
            .and_then(|u| i64::try_from(u).ok())
            .map(FieldValue::Int)
            .ok_or_else(|| format!("{} is not an unsigned integer", n)),
        (FieldKind::Str, Value::String(s)) => Ok(FieldValue::Str(s.clone())),
        (FieldKind::StrList, Value::Sequence(values)) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(format!("list entries must be strings, found {}", describe(other))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        (FieldKind::Enum(spec), Value::String(token)) => spec
            .canonicalize(token)
            .map(FieldValue::tag)
            .ok_or_else(|| format!("unknown value {} (expected one of {})", token, spec.tags().join(", "))),
        (FieldKind::Enum(spec), Value::Bool(b)) => spec
            .canonicalize(&b.to_string())
            .map(FieldValue::tag)
            .ok_or_else(|| format!("unknown value {} (expected one of {})", b, spec.tags().join(", "))),
        (FieldKind::Items(attrs), Value::Sequence(values)) => values
            .iter()
            .map(|v| item_from_yaml(attrs, v))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::Items),
        (kind, other) => Err(format!("expected {} but found {}", kind.name(), describe(other))),
    }
}

fn item_from_yaml(attrs: &[AttrSpec], value: &Value) -> Result<Item, String> {
    let Value::Mapping(mapping) = value else {
        return Err(format!("list items must be mappings, found {}", describe(value)));
    };

    for key in mapping.keys() {
        let known = key
            .as_str()
            .is_some_and(|k| attrs.iter().any(|a| a.name == k));
        if !known {
            return Err(format!("unknown item attribute {}", render_key(key)));
        }
    }

    let mut item = Item::new();
    for attr in attrs {
        let value = match mapping.get(attr.name.as_str()) {
            Some(raw) => from_yaml(&attr.kind, raw).map_err(|e| format!("{}: {}", attr.name, e))?,
            None => attr.kind.zero_value(),
        };
        item.set(attr.name.clone(), value);
    }
    Ok(item)
}

pub(crate) fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => describe(other).to_string(),
    }
}

pub(crate) fn to_yaml(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(i) => Value::Number((*i).into()),
        FieldValue::Str(s) | FieldValue::Tag(s) => Value::String(s.clone()),
        FieldValue::List(values) => {
            Value::Sequence(values.iter().cloned().map(Value::String).collect())
        }
        FieldValue::Items(items) => Value::Sequence(
            items
                .iter()
                .map(|item| {
                    let mut mapping = Mapping::new();
                    for (name, value) in item.iter() {
                        mapping.insert(Value::String(name.to_string()), to_yaml(value));
                    }
                    Value::Mapping(mapping)
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfmigrate_core::EnumSpec;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(from_yaml(&FieldKind::Int, &yaml("-2")), Ok(FieldValue::Int(-2)));
        assert!(from_yaml(&FieldKind::Unsigned, &yaml("-2")).is_err());
        assert!(from_yaml(&FieldKind::Bool, &yaml("1")).is_err());
        assert_eq!(
            from_yaml(&FieldKind::Str, &yaml("'^ IWYU pragma:'")),
            Ok(FieldValue::str("^ IWYU pragma:"))
        );
    }

    #[test]
    fn test_enum_tokens() {
        let spec = EnumSpec::new(["Never", "Always"])
            .with_alias("false", "Never")
            .with_alias("true", "Always");
        let kind = FieldKind::Enum(spec);
        assert_eq!(from_yaml(&kind, &yaml("true")), Ok(FieldValue::tag("Always")));
        assert_eq!(from_yaml(&kind, &yaml("Never")), Ok(FieldValue::tag("Never")));
        let err = from_yaml(&kind, &yaml("Sometimes")).unwrap_err();
        assert!(err.contains("Never, Always"));
    }

    #[test]
    fn test_items_fill_missing_attributes() {
        let kind = FieldKind::Items(vec![
            AttrSpec::new("Regex", FieldKind::Str),
            AttrSpec::new("Priority", FieldKind::Int),
        ]);
        let value = from_yaml(&kind, &yaml("- Regex: '^<.*'\n")).unwrap();
        let items = value.as_items().unwrap();
        assert_eq!(items[0].get("Priority"), Some(&FieldValue::Int(0)));

        let err = from_yaml(&kind, &yaml("- Regex: x\n  Weight: 2\n")).unwrap_err();
        assert!(err.contains("Weight"));
    }

    #[test]
    fn test_to_yaml_reads_back() {
        let kind = FieldKind::StrList;
        let value = FieldValue::List(vec!["foreach".to_string(), "Q_FOREACH".to_string()]);
        assert_eq!(from_yaml(&kind, &to_yaml(&value)), Ok(value));
    }
}
