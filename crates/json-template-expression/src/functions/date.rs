//! `timestamp`, `date`.

use crate::error::FunctionError;
use crate::function::{Function, FunctionParameter, NativeFunction};
use crate::value::{Value, ValueType};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, FixedOffset, Local, Months, Utc};
use json_template::Span;

const DEFAULT_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

const UNITS: [&str; 7] = ["years", "months", "weeks", "days", "hours", "minutes", "seconds"];

fn timestamp_eval(_: &NativeFunction, _: Vec<Value>, _: Span) -> Result<Value, FunctionError> {
    Ok(Value::Number(Utc::now().timestamp() as f64))
}

/// `date(time = "now", format = "yyyy-MM-dd HH:mm:ss")`.
///
/// `time` is unix seconds (number or numeric string), `"now"` in local time,
/// or a UTC offset from now such as `"3 days"` or `"-2 hours"`.
fn date_eval(f: &NativeFunction, args: Vec<Value>, span: Span) -> Result<Value, FunctionError> {
    let time = resolve_time(f, &args[0], span)?;
    let pattern = args[1].as_str().unwrap_or(DEFAULT_PATTERN);
    format_time(&time, pattern)
        .map(Value::String)
        .ok_or_else(|| f.error(format!("Invalid date pattern '{pattern}'"), span))
}

fn resolve_time(
    f: &NativeFunction,
    time: &Value,
    span: Span,
) -> Result<DateTime<FixedOffset>, FunctionError> {
    match time {
        Value::Number(seconds) => from_unix(f, *seconds as i64, span),
        Value::String(text) => {
            if let Ok(seconds) = text.parse::<i64>() {
                return from_unix(f, seconds, span);
            }
            if text == "now" {
                return Ok(Local::now().into());
            }
            let parts: Vec<&str> = text.split(' ').collect();
            let [count, unit] = parts.as_slice() else {
                return Err(f.error("Invalid date format", span));
            };
            if !UNITS.contains(unit) {
                return Err(f.error("Invalid date format", span));
            }
            let count: i32 = count
                .parse()
                .map_err(|_| f.error("The first part of the time must be a number", span))?;
            shift(Utc::now(), count, unit)
                .map(Into::into)
                .ok_or_else(|| f.error("Invalid time", span))
        }
        _ => Err(f.error("Invalid time", span)),
    }
}

fn from_unix(
    f: &NativeFunction,
    seconds: i64,
    span: Span,
) -> Result<DateTime<FixedOffset>, FunctionError> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(Into::into)
        .ok_or_else(|| f.error("Invalid time", span))
}

/// Moves `from` by `count` units; `None` when the result is out of range.
fn shift(from: DateTime<Utc>, count: i32, unit: &str) -> Option<DateTime<Utc>> {
    let by_months = |months: i32| {
        let delta = Months::new(months.unsigned_abs());
        if months >= 0 {
            from.checked_add_months(delta)
        } else {
            from.checked_sub_months(delta)
        }
    };
    let count = i64::from(count);
    let delta = match unit {
        "years" => return by_months(i32::try_from(count.checked_mul(12)?).ok()?),
        "months" => return by_months(i32::try_from(count).ok()?),
        "weeks" => Duration::try_weeks(count)?,
        "days" => Duration::try_days(count)?,
        "hours" => Duration::try_hours(count)?,
        "minutes" => Duration::try_minutes(count)?,
        "seconds" => Duration::try_seconds(count)?,
        _ => return None,
    };
    from.checked_add_signed(delta)
}

fn format_time(time: &DateTime<FixedOffset>, pattern: &str) -> Option<String> {
    let strftime = to_strftime(pattern);
    let items: Vec<Item> = StrftimeItems::new(&strftime).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(time.format_with_items(items.into_iter()).to_string())
}

/// Translates a custom date pattern (`yyyy-MM-dd HH:mm:ss`) into strftime.
/// Letters without a meaning are copied, `'...'` and `"..."` quote literals
/// and `\` escapes one character. Fractions (`f`) widen to 3, 6 or 9 digits.
fn to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i += 1;
                while i < chars.len() && chars[i] != c {
                    push_literal(&mut out, chars[i]);
                    i += 1;
                }
                i += 1;
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    push_literal(&mut out, next);
                }
                i += 2;
                continue;
            }
            '%' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let run = chars[i..].iter().take_while(|&&d| d == c).count();
        let directive = match (c, run) {
            ('y', 1) => "%-y",
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', 2) => "%d",
            ('d', 3) => "%a",
            ('d', _) => "%A",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('f', 1..=3) => "%3f",
            ('f', 4..=6) => "%6f",
            ('f', _) => "%9f",
            ('t', _) => "%p",
            ('z', 1 | 2) => "%z",
            ('z', _) | ('K', _) => "%:z",
            _ => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
                i += run;
                continue;
            }
        };
        out.push_str(directive);
        i += run;
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

pub fn functions() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new("timestamp", vec![], timestamp_eval),
        NativeFunction::new(
            "date",
            vec![
                FunctionParameter::optional(
                    "time",
                    &[ValueType::String, ValueType::Number],
                    Some(Value::from("now")),
                ),
                FunctionParameter::optional(
                    "format",
                    &[ValueType::String],
                    Some(Value::from(DEFAULT_PATTERN)),
                ),
            ],
            date_eval,
        ),
    ]
}
