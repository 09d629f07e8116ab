/// Byte counts in binary units: 1 KiB is 1024 bytes, and each step up is
/// another factor of 1024. Anything under 1 KiB is printed exactly.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut scaled = bytes as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit + 1 < UNITS.len() {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{scaled:.2}{}", UNITS[unit])
}

pub(crate) fn format_ms(v: f64) -> String {
    format!("{v:.2}ms")
}

pub(crate) fn format_pct(v: f64) -> String {
    format!("{v:.2}%")
}
