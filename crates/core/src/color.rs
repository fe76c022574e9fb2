//! Stable per-category colors.
//!
//! A handful of well-known categories get fixed colors; everything else is
//! derived from a hash of the name, so the same category keeps its color
//! across frames and sessions.

use f3pie_protocol::Rgb;

const OVERRIDES: &[(&str, u32)] = &[
    ("entities", 0xE4_46_C4),
    ("unspecified", 0x46_CE_66),
    ("blockentities", 0xEC_6E_4E),
    ("destroyentities", 0xCC_6C_46),
    ("prepare", 0x11_13_11),
];

/// Color for a profiler category name.
///
/// Hashed colors keep only alternate bits of each channel and add a fixed
/// floor, so they are never too dark to read against the panel.
pub fn color_for_name(name: &str) -> Rgb {
    if let Some(&(_, packed)) = OVERRIDES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        return Rgb::from_packed(packed);
    }
    let hash = name_hash(name) as u32;
    Rgb::from_packed((hash & 0xAA_AA_AA).wrapping_add(0x44_44_44))
}

/// 31-multiplier string hash over UTF-16 code units, wrapping at 32 bits.
fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
