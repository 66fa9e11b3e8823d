use super::print::{print_coerced, print_record};
use super::{CliError, Result};
use crate::args::LiteralKind;
use strongly_typed::{Coercer, Record, RecordType, TypeTag, Value};

pub(super) fn coerce(
    coercer: &Coercer,
    raw: &str,
    to: &str,
    kind: Option<LiteralKind>,
) -> Result<()> {
    let target: TypeTag = to.parse()?;
    let value = read_literal(coercer, raw, kind)?;
    let result = coercer.coerce(&value, target)?;
    print_coerced(&result);
    Ok(())
}

/// Declares a record type from `NAME[:TYPE]` specs and builds one instance.
///
/// Values are handed to the record as plain strings; converting them is the
/// record's job.
pub(super) fn build(
    coercer: &Coercer,
    name: &str,
    attrs: &[String],
    positional: bool,
    values: &[String],
) -> Result<()> {
    let mut definition = RecordType::define(name).coercer(*coercer);
    for attr in attrs {
        match attr.split_once(':') {
            Some((attr_name, type_name)) => definition.declare(attr_name, type_name)?,
            None => definition.declare(attr, TypeTag::Any)?,
        };
    }
    let record_type = definition.build();

    let record = if positional {
        Record::from_positional(&record_type, values.iter().map(String::as_str))?
    } else {
        let pairs = values
            .iter()
            .map(|pair| split_pair(pair))
            .collect::<Result<Vec<_>>>()?;
        Record::from_mapping(&record_type, pairs)?
    };

    print_record(&record);
    Ok(())
}

pub(super) fn read_literal(
    coercer: &Coercer,
    raw: &str,
    kind: Option<LiteralKind>,
) -> Result<Value> {
    let Some(kind) = kind else {
        return Ok(infer_literal(coercer, raw));
    };
    let tag = match kind {
        LiteralKind::Nil => return Ok(Value::Nil),
        LiteralKind::String => return Ok(Value::from(raw)),
        LiteralKind::Bool => TypeTag::Boolean,
        LiteralKind::Integer => TypeTag::Integer,
        LiteralKind::Float => TypeTag::Float,
        LiteralKind::Rational => TypeTag::Rational,
        LiteralKind::Complex => TypeTag::Complex,
        LiteralKind::Symbol => TypeTag::Symbol,
        LiteralKind::Time => TypeTag::Time,
        LiteralKind::Date => TypeTag::Date,
    };
    Ok(coercer.coerce(&Value::from(raw), tag)?)
}

/// Integer first, then float, otherwise the text itself.
fn infer_literal(coercer: &Coercer, raw: &str) -> Value {
    let text = Value::from(raw);
    [TypeTag::Integer, TypeTag::Float]
        .into_iter()
        .find_map(|tag| coercer.coerce(&text, tag).ok())
        .unwrap_or(text)
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| CliError::Usage(format!("expected key=value but got `{}`", pair)))
}
