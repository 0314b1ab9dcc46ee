use colored::*;

use crate::parser::models::{Stream, StreamKind};

/// 漂亮的命令行输出工具
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示成功消息
    pub fn success(message: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), message.as_ref());
    }

    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        println!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示视频信息
    pub fn video_info(title: impl AsRef<str>, detail: impl AsRef<str>) {
        println!(
            "{} {} ({})",
            "🎬".magenta().bold(),
            title.as_ref().bold(),
            detail.as_ref().cyan()
        );
    }

    /// 显示一条流，Split 流用不同颜色标出
    pub fn stream_entry(label: impl AsRef<str>, stream: &Stream) {
        let kind = match stream.kind() {
            StreamKind::Combined => stream.kind().to_string().green(),
            StreamKind::Split => stream.kind().to_string().yellow(),
        };
        println!(
            "  {} {:<10} {:<8} {:<6} {}",
            "▸".cyan(),
            label.as_ref().bold(),
            stream.short_quality(),
            kind,
            stream.encoding.bright_black()
        );
    }

    /// 显示布尔开关
    pub fn flag(name: impl AsRef<str>, enabled: bool) {
        let mark = if enabled { "✓".green() } else { "✗".red() };
        println!("  {} {}", mark, name.as_ref());
    }

    /// 显示分割线
    pub fn separator() {
        println!("{}", "─".repeat(50).bright_black());
    }

    /// 显示标题
    pub fn title(text: impl AsRef<str>) {
        let text = text.as_ref();
        let width = text.chars().count().min(48);
        let padding = (48 - width) / 2;
        let line = "─".repeat(padding);
        println!(
            "{} {} {}",
            line.bright_black(),
            text.bold(),
            "─".repeat(48 - padding - width).bright_black()
        );
    }
}

/// 便捷宏用于漂亮的日志输出
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::success(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
