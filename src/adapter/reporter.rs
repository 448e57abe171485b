//! Log Failure Reporter
//!
//! 送信失敗をログ（コンソール）に1行ずつ出力する

use log::error;

use crate::domain::repositories::failure_reporter::FailureReporter;

/// 診断メッセージの改行を空白にまとめる
fn single_line(diagnostic: &str) -> String {
    diagnostic
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn failure_line(recipient: &str, diagnostic: &str) -> String {
    format!("{} {}", recipient, single_line(diagnostic))
}

pub struct LogFailureReporter;

impl FailureReporter for LogFailureReporter {
    fn report(&self, recipient: &str, diagnostic: &str) {
        error!("{}", failure_line(recipient, diagnostic));
    }
}
