//! Slot label canonicalization.
//!
//! Grid headers carry labels like `9.00-10.00` or `12.00-\n1.00`; the
//! normalized tables want zero-padded 24-hour `HH:MM-HH:MM` strings.

use crate::error::{ExtractError, Result};

/// Canonicalize a raw slot label into `HH:MM-HH:MM`.
///
/// The meridian of each side is inferred from the assumption that the
/// academic day runs 8 AM to 5 PM: an hour below 8 (or exactly 12) must be
/// past noon. A schedule extending outside that window would be
/// mis-classified; see the boundary tests below.
///
/// Fails with [`ExtractError::SlotFormat`] when the label does not split
/// into exactly two `hour.minute` components.
pub fn to_24h(label: &str) -> Result<String> {
    let cleaned = label.replace('\n', "");
    let mut cleaned = cleaned.trim();
    // One known-malformed label in the source grids.
    if cleaned == "12.00-" {
        cleaned = "12.00-1.00";
    }

    let parts: Vec<&str> = cleaned.split('-').collect();
    let [start, end] = parts.as_slice() else {
        return Err(ExtractError::SlotFormat(label.to_string()));
    };

    Ok(format!(
        "{}-{}",
        side_to_24h(start.trim(), label)?,
        side_to_24h(end.trim(), label)?
    ))
}

fn side_to_24h(side: &str, label: &str) -> Result<String> {
    let err = || ExtractError::SlotFormat(label.to_string());

    let (hour, minute) = side.split_once('.').ok_or_else(err)?;
    let hour: u32 = hour.trim().parse().map_err(|_| err())?;
    let minute: u32 = minute.trim().parse().map_err(|_| err())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(err());
    }

    let pm = hour < 8 || hour == 12;
    let hour_24 = match (pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, h) => h,
    };
    Ok(format!("{hour_24:02}:{minute:02}"))
}
