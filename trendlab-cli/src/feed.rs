//! CSV bar feeds — TAIFEX's ROC-date export format and a generic ISO format.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use trendlab_core::domain::{Bar, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// TAIFEX daily settlement export: `民國年/MM/DD` date column, ROC calendar.
    Taifex,
    /// `datetime,open,high,low,close,volume` with an ISO-8601 datetime.
    Generic,
}

impl FromStr for FeedFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "taifex" => Ok(FeedFormat::Taifex),
            "generic" => Ok(FeedFormat::Generic),
            other => Err(anyhow::anyhow!("unknown feed format: {other}")),
        }
    }
}

pub fn load_bars(path: &str, format: FeedFormat, symbol: &str) -> anyhow::Result<Vec<Bar>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut bars = Vec::new();
    for record in reader.records() {
        let record = record?;
        let bar = match format {
            FeedFormat::Taifex => parse_taifex_row(&record, symbol)?,
            FeedFormat::Generic => parse_generic_row(&record, symbol)?,
        };
        bars.push(bar);
    }
    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}

/// Columns: roc_date(YYY/MM/DD),time(HH:MM),open,high,low,close,volume
fn parse_taifex_row(record: &csv::StringRecord, symbol: &str) -> anyhow::Result<Bar> {
    let roc_date = record.get(0).ok_or_else(|| anyhow::anyhow!("missing date column"))?;
    let time = record.get(1).ok_or_else(|| anyhow::anyhow!("missing time column"))?;
    let timestamp = parse_roc_datetime(roc_date, time)?;

    Ok(Bar {
        symbol: symbol.to_string(),
        timestamp,
        open: parse_decimal(record, 2)?,
        high: parse_decimal(record, 3)?,
        low: parse_decimal(record, 4)?,
        close: parse_decimal(record, 5)?,
        volume: record.get(6).and_then(|v| v.parse().ok()).unwrap_or(0),
        open_interest: None,
        session: session_for_hour(timestamp),
    })
}

/// Columns: datetime(ISO-8601 "YYYY-MM-DD HH:MM:SS"),open,high,low,close,volume
fn parse_generic_row(record: &csv::StringRecord, symbol: &str) -> anyhow::Result<Bar> {
    let raw = record.get(0).ok_or_else(|| anyhow::anyhow!("missing datetime column"))?;
    let timestamp = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| anyhow::anyhow!("invalid datetime {raw}: {e}"))?;

    Ok(Bar {
        symbol: symbol.to_string(),
        timestamp,
        open: parse_decimal(record, 1)?,
        high: parse_decimal(record, 2)?,
        low: parse_decimal(record, 3)?,
        close: parse_decimal(record, 4)?,
        volume: record.get(5).and_then(|v| v.parse().ok()).unwrap_or(0),
        open_interest: None,
        session: session_for_hour(timestamp),
    })
}

fn parse_decimal(record: &csv::StringRecord, index: usize) -> anyhow::Result<Decimal> {
    let raw = record.get(index).ok_or_else(|| anyhow::anyhow!("missing column {index}"))?;
    Decimal::from_str(raw.trim()).map_err(|e| anyhow::anyhow!("invalid decimal {raw}: {e}"))
}

/// The ROC calendar year is the Gregorian year minus 1911.
fn parse_roc_datetime(roc_date: &str, time: &str) -> anyhow::Result<NaiveDateTime> {
    let parts: Vec<&str> = roc_date.split('/').collect();
    if parts.len() != 3 {
        anyhow::bail!("malformed ROC date: {roc_date}");
    }
    let roc_year: i32 = parts[0].parse()?;
    let month: u32 = parts[1].parse()?;
    let day: u32 = parts[2].parse()?;
    let gregorian_year = roc_year + 1911;

    let date = NaiveDate::from_ymd_opt(gregorian_year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid ROC date: {roc_date}"))?;

    let time_parts: Vec<&str> = time.split(':').collect();
    let hour: u32 = time_parts.first().unwrap_or(&"0").parse().unwrap_or(0);
    let minute: u32 = time_parts.get(1).unwrap_or(&"0").parse().unwrap_or(0);

    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid time: {time}"))
}

fn session_for_hour(timestamp: NaiveDateTime) -> Session {
    use chrono::Timelike;
    let hour = timestamp.hour();
    if (8..14).contains(&hour) {
        Session::Day
    } else {
        Session::Night
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roc_date_converts_to_gregorian() {
        // 113/01/03 -> 2024-01-03
        let ts = parse_roc_datetime("113/01/03", "09:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn feed_format_parses_from_cli_string() {
        assert_eq!("taifex".parse::<FeedFormat>().unwrap(), FeedFormat::Taifex);
        assert_eq!("generic".parse::<FeedFormat>().unwrap(), FeedFormat::Generic);
        assert!("xml".parse::<FeedFormat>().is_err());
    }
}
