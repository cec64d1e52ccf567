use std::io::Write;

use tiers::{Preset, Tier, TierResult, TierTable};

use crate::error::CliError;

/// Write one resolved amount and flush.
///
/// TSV columns: amount, tier index, limit, rate, fee (`-` when none), computed.
pub fn write_result<W: Write>(
    result: &TierResult,
    json_mode: bool,
    buf: &mut String,
    writer: &mut W,
) -> Result<(), CliError> {
    buf.clear();

    if json_mode {
        buf.push_str(&serde_json::to_string(result)?);
    } else {
        push_field(buf, result.amount);
        buf.push('\t');
        push_field(buf, result.index);
        buf.push('\t');
        push_field(buf, result.tier.limit);
        buf.push('\t');
        push_field(buf, result.rate);
        buf.push('\t');
        push_fee(buf, result.fee);
        buf.push('\t');
        push_field(buf, result.computed_amount);
    }

    buf.push('\n');
    writer.write_all(buf.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Write the rows of `table`: one `index, limit, rate, fee` line per tier, or
/// a single JSON array.
pub fn write_table<W: Write>(
    table: &TierTable,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), CliError> {
    let mut buf = String::new();

    if json_mode {
        buf.push_str(&serde_json::to_string_pretty(table)?);
        buf.push('\n');
    } else {
        for (index, tier) in table.iter().enumerate() {
            push_tier(&mut buf, index, tier);
        }
    }

    writer.write_all(buf.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write `name \t tiers \t lowest-tier fee` for every built-in preset.
pub fn write_presets<W: Write>(writer: &mut W) -> Result<(), CliError> {
    let mut buf = String::new();
    for preset in Preset::ALL {
        let table = preset.table()?;
        push_field(&mut buf, preset);
        buf.push('\t');
        push_field(&mut buf, table.len());
        buf.push('\t');
        push_fee(&mut buf, table.lowest().fee);
        buf.push('\n');
    }
    writer.write_all(buf.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn push_tier(buf: &mut String, index: usize, tier: &Tier) {
    push_field(buf, index);
    buf.push('\t');
    push_field(buf, tier.limit);
    buf.push('\t');
    push_field(buf, tier.rate);
    buf.push('\t');
    push_fee(buf, tier.fee);
    buf.push('\n');
}

fn push_field(buf: &mut String, value: impl std::fmt::Display) {
    use std::fmt::Write as _;
    // Writing into a String cannot fail.
    let _ = write!(buf, "{value}");
}

fn push_fee(buf: &mut String, fee: Option<rust_decimal::Decimal>) {
    match fee {
        Some(fee) => push_field(buf, fee),
        None => buf.push('-'),
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        // Only a closed reader (`ratecalc quote | head`) ends output quietly.
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            tracing::debug!("IO error: {}", e);
            CliError::OutputClosed
        } else {
            CliError::Output(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard() -> TierTable {
        Preset::Standard.table().unwrap()
    }

    fn render(result: &TierResult, json: bool) -> String {
        let mut buf = String::new();
        let mut out = Vec::new();
        write_result(result, json, &mut buf, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tsv_lowest_tier() {
        let r = standard().resolve(dec!(500)).unwrap();
        assert_eq!(render(&r, false), "500\t0\t1000\t0.055\t5.5\t33.000\n");
    }

    #[test]
    fn test_tsv_unbounded_tier() {
        let r = standard().resolve(dec!(2000000)).unwrap();
        assert_eq!(
            render(&r, false),
            "2000000\t7\tunbounded\t0.0505\t-\t101000.0000\n"
        );
    }

    #[test]
    fn test_json_line() {
        let r = standard().resolve(dec!(1000.01)).unwrap();
        let line = render(&r, true);
        assert!(line.ends_with('\n'));
        let v: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(v["index"], 1);
        assert_eq!(v["amount"], "1000.01");
        assert_eq!(v["rate"], "0.054");
        assert_eq!(v["computedAmount"], "54.00054");
        assert_eq!(v["tier"]["limit"], "5000");
        assert!(v.get("fee").is_none());
    }

    #[test]
    fn test_buffer_reused_between_lines() {
        let table = standard();
        let mut buf = String::new();
        let mut out = Vec::new();
        write_result(&table.resolve(dec!(1)).unwrap(), false, &mut buf, &mut out).unwrap();
        write_result(&table.resolve(dec!(6000)).unwrap(), false, &mut buf, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("6000\t2\t10000\t0.053\t-\t"));
    }

    #[test]
    fn test_table_tsv() {
        let mut out = Vec::new();
        write_table(&standard(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "0\t1000\t0.055\t5.5");
        assert_eq!(lines[7], "7\tunbounded\t0.0505\t-");
    }

    #[test]
    fn test_table_json_reloads() {
        let mut out = Vec::new();
        write_table(&standard(), true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(tiers::parse_table(&text, false).unwrap(), standard());
    }

    /// Writer that fails every write with `kind`.
    struct FailingWriter(std::io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(self.0, "write failed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_broken_pipe_is_output_closed() {
        let r = standard().resolve(dec!(500)).unwrap();
        let mut out = FailingWriter(std::io::ErrorKind::BrokenPipe);
        let err = write_result(&r, false, &mut String::new(), &mut out).unwrap_err();
        assert!(matches!(err, CliError::OutputClosed));
    }

    #[test]
    fn test_other_write_failures_are_reported() {
        let r = standard().resolve(dec!(500)).unwrap();
        let mut out = FailingWriter(std::io::ErrorKind::PermissionDenied);
        let err = write_result(&r, false, &mut String::new(), &mut out).unwrap_err();
        assert!(matches!(err, CliError::Output(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));

        let mut out = FailingWriter(std::io::ErrorKind::Other);
        assert!(matches!(
            write_table(&standard(), false, &mut out),
            Err(CliError::Output(_))
        ));
    }

    #[test]
    fn test_presets_listing() {
        let mut out = Vec::new();
        write_presets(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "standard\t8\t5.5\npartner\t8\t5\nchannel\t8\t6\n"
        );
    }
}
