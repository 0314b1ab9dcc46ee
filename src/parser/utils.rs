pub struct FormatTool;

impl FormatTool {
    // 格式化时长，不足一小时只显示分秒
    pub fn format_duration(seconds: f64) -> String {
        let total = seconds.max(0.0).round() as u64;
        let hours = total / 3600;
        let mins = (total % 3600) / 60;
        let secs = total % 60;

        if hours != 0 {
            format!("{:02}:{:02}:{:02}", hours, mins, secs)
        } else {
            format!("{:02}:{:02}", mins, secs)
        }
    }

    // 格式化播放/点赞数，最多保留一位小数，四舍五入后满 1000K 进位到 M
    pub fn format_count(count: u64) -> String {
        if count < 1_000 {
            return count.to_string();
        }
        let thousands = Self::tenths(count, 1_000);
        if thousands < 10_000 {
            format!("{}K", Self::one_decimal(thousands))
        } else {
            format!("{}M", Self::one_decimal(Self::tenths(count, 1_000_000)))
        }
    }

    // 以 unit 为单位、精确到十分位的整数
    fn tenths(count: u64, unit: u64) -> u64 {
        let step = unit / 10;
        (count + step / 2) / step
    }

    fn one_decimal(tenths: u64) -> String {
        let whole = Self::group_digits(tenths / 10);
        match tenths % 10 {
            0 => whole,
            frac => format!("{}.{}", whole, frac),
        }
    }

    // 整数部分按千位加逗号
    fn group_digits(value: u64) -> String {
        let digits = value.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }
}
