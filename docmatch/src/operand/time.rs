use super::NOW;
use crate::collation::ValueKind;
use crate::error::Error;
use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Weekday};
use serde_json::{json, Value};
use std::fmt::Display;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> { Local::now().fixed_offset() }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> { self.0 }
}

/// The components of a point in time, as used by business-hour rules:
///
/// ```text
/// { "isoDate": "2020-05-21", "isoTime": "13:05", "isoDateTime": "2020-05-21T13:05:00+02:00",
///   "weekday": "thursday", "hour": 13, "epoch": 1590059100 }
/// ```
pub fn time_context<Tz: TimeZone>(at: &DateTime<Tz>) -> Value
where
    Tz::Offset: Display,
{
    json!({
        "isoDate": at.format("%Y-%m-%d").to_string(),
        "isoTime": at.format("%H:%M").to_string(),
        "isoDateTime": at.to_rfc3339(),
        "weekday": weekday_name(at.weekday()),
        "hour": at.hour(),
        "epoch": at.timestamp(),
    })
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// `{"$now": "isoTime"}` becomes that component of [`time_context`] for the clock's current
/// time. `{"$now": null}` becomes the whole object.
pub struct NowOperand<C = SystemClock> {
    clock: C,
}

impl<C: Clock> NowOperand<C> {
    pub fn new(clock: C) -> Self { Self { clock } }

    pub(crate) fn component(&self, argument: &Value) -> Result<Value, Error> {
        let now = time_context(&self.clock.now());
        match argument {
            Value::Null => Ok(now),
            Value::String(name) => now.get(name).cloned().ok_or_else(|| Error::Operand(format!("unknown {} component: {}", NOW, name))),
            other => Err(Error::InvalidOperand { operator: NOW, expected: "string", got: ValueKind::of(other) }),
        }
    }
}

impl<C: Clock> super::OperandEvaluator for NowOperand<C> {
    fn evaluate(&self, operand: &Value, _context: &Value) -> Result<Value, Error> {
        match super::single_entry(operand) {
            Some((NOW, argument)) => self.component(argument),
            _ => Ok(operand.clone()),
        }
    }
}
