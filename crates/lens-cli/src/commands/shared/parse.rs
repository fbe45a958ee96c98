//! Parsing of `field=operand` filter flags.

use anyhow::{Context, bail};
use chrono::NaiveDate;
use lens_core::value::parse_date;
use lens_view::FilterCriterion;
use serde_json::Value;

use crate::cli::root_commands::TableArgs;

/// Split `field=operand`, rejecting an empty field.
pub fn split_pair<'a>(raw: &'a str, flag: &str) -> anyhow::Result<(&'a str, &'a str)> {
    let (field, operand) = raw
        .split_once('=')
        .with_context(|| format!("invalid --{flag} '{raw}': expected FIELD=VALUE"))?;
    let field = field.trim();
    if field.is_empty() {
        bail!("invalid --{flag} '{raw}': field is empty");
    }
    Ok((field, operand.trim()))
}

/// `field=min..max`; either bound may be left out.
pub fn parse_range(raw: &str) -> anyhow::Result<FilterCriterion> {
    let (field, operand) = split_pair(raw, "range")?;
    let (min, max) = operand
        .split_once("..")
        .with_context(|| format!("invalid --range '{raw}': expected MIN..MAX"))?;
    Ok(FilterCriterion::range(
        field,
        parse_bound(min, raw)?,
        parse_bound(max, raw)?,
    ))
}

fn parse_bound(raw: &str, whole: &str) -> anyhow::Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .with_context(|| format!("invalid --range '{whole}': '{raw}' is not a number"))?;
    if !value.is_finite() {
        bail!("invalid --range '{whole}': bounds must be finite");
    }
    Ok(Some(value))
}

/// `field=a,b,c`. Items that read as JSON numbers or booleans match typed
/// fields; everything else is matched as text.
pub fn parse_one_of(raw: &str) -> anyhow::Result<FilterCriterion> {
    let (field, operand) = split_pair(raw, "one-of")?;
    let values = operand
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_scalar)
        .collect::<Vec<_>>();
    Ok(FilterCriterion::one_of(field, values))
}

fn parse_scalar(item: &str) -> Value {
    match serde_json::from_str::<Value>(item) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(item.to_string()),
    }
}

/// `field=date` for `--since` and `--until`.
pub fn parse_date_bound<'a>(raw: &'a str, flag: &str) -> anyhow::Result<(&'a str, NaiveDate)> {
    let (field, operand) = split_pair(raw, flag)?;
    let date = parse_date(operand)
        .with_context(|| format!("invalid --{flag} '{raw}': '{operand}' is not a date"))?;
    Ok((field, date))
}

/// Query parameters from repeated `--param key=value`.
pub fn parse_params(raw: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            split_pair(pair, "param").map(|(key, value)| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// All filter criteria of a `lens table` invocation.
///
/// `--since` and `--until` on the same field merge into one date range.
pub fn filters(args: &TableArgs) -> anyhow::Result<Vec<FilterCriterion>> {
    let mut criteria = Vec::new();
    for raw in &args.contains {
        let (field, needle) = split_pair(raw, "contains")?;
        criteria.push(FilterCriterion::contains(field, needle));
    }
    for raw in &args.range {
        criteria.push(parse_range(raw)?);
    }
    for raw in &args.one_of {
        criteria.push(parse_one_of(raw)?);
    }

    let mut dates: Vec<(String, Option<NaiveDate>, Option<NaiveDate>)> = Vec::new();
    for (raw, is_upper) in args
        .since
        .iter()
        .map(|raw| (raw, false))
        .chain(args.until.iter().map(|raw| (raw, true)))
    {
        let (field, date) = parse_date_bound(raw, if is_upper { "until" } else { "since" })?;
        let index = match dates.iter().position(|(name, _, _)| name == field) {
            Some(index) => index,
            None => {
                dates.push((field.to_string(), None, None));
                dates.len() - 1
            }
        };
        if is_upper {
            dates[index].2 = Some(date);
        } else {
            dates[index].1 = Some(date);
        }
    }
    criteria.extend(
        dates
            .into_iter()
            .map(|(field, from, to)| FilterCriterion::date_range(field, from, to)),
    );

    Ok(criteria)
}
