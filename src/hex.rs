//! Hex helpers for command-line frames.

use anyhow::{bail, ensure, Result};

pub fn encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Parse hex, ignoring whitespace and `:`/`-` separators and a leading `0x`.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let digits: Vec<u8> = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .map(|c| match c.to_digit(16) {
            Some(d) => Ok(d as u8),
            None => bail!("Invalid hex digit: {:?}", c),
        })
        .collect::<Result<_>>()?;

    ensure!(
        digits.len() % 2 == 0,
        "Odd number of hex digits: {}",
        digits.len()
    );
    Ok(digits.chunks_exact(2).map(|p| (p[0] << 4) | p[1]).collect())
}
