/// 金額轉顯示字串
pub trait AmountFormatter: Send + Sync {
    fn format(&self, amount: f64) -> String;
}

/// 印尼盾格式：`Rp` 前綴、`.` 千分位、不顯示小數
#[derive(Debug, Clone, Copy, Default)]
pub struct RupiahFormatter;

impl AmountFormatter for RupiahFormatter {
    fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return String::new();
        }

        // f64::round 是四捨五入遠離零
        let rounded = amount.round();
        let digits = format!("{:.0}", rounded.abs());
        let grouped = group_thousands(&digits, '.');

        if rounded < 0.0 {
            format!("-Rp{}", grouped)
        } else {
            format!("Rp{}", grouped)
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
