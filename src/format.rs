use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::CoreFrequency;

/// Format MHz: `2.40 GHz` from 1000 MHz up, `850 MHz` below
pub fn format_mhz(mhz: f64) -> String {
    if mhz >= 1000.0 {
        format!("{:.2} GHz", mhz / 1000.0)
    } else {
        format!("{:.0} MHz", mhz)
    }
}

/// Display text for one frequency slot
pub fn format_core(freq: CoreFrequency) -> String {
    match freq {
        CoreFrequency::Measured(mhz) => format_mhz(mhz),
        CoreFrequency::Unmeasured => "N/A".to_string(),
    }
}

/// Cut `s` to at most `max_width` terminal columns, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mhz() {
        assert_eq!(format_mhz(2400.0), "2.40 GHz");
        assert_eq!(format_mhz(1000.0), "1.00 GHz");
        assert_eq!(format_mhz(999.4), "999 MHz");
        assert_eq!(format_mhz(850.0), "850 MHz");
    }

    #[test]
    fn test_format_core() {
        assert_eq!(format_core(CoreFrequency::Measured(1200.5)), "1.20 GHz");
        assert_eq!(format_core(CoreFrequency::Unmeasured), "N/A");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("bash", 10), "bash");
        assert_eq!(truncate_to_width("kworker/u16:3", 8), "kworker…");
        assert_eq!(truncate_to_width("abc", 0), "");
        // wide chars take two columns
        assert_eq!(truncate_to_width("日本語アプリ", 5), "日本…");
    }
}
