//! JSON output for one-shot commands

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a single JSON object line to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(data, &mut io::stdout())
}

fn write_response_to<W: Write>(data: Value, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, &data)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
