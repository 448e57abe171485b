//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::application::dto::send_input::SendInput;

/// 受信者ごとのサブディレクトリにあるファイルをMail.appで送信するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "filemailer")]
#[command(
    about = "Mail the files in each recipient-named subdirectory to that recipient",
    long_about = None
)]
pub struct Args {
    /// Sender account (empty: saved default, then Mail.app's default account)
    #[arg(short, long, default_value = "")]
    pub sender: String,

    /// Subject line (empty: "File attached")
    #[arg(long, default_value = "")]
    pub subject: String,

    /// Folder containing one subdirectory per recipient address
    #[arg(short, long, default_value = "")]
    pub folder: String,

    /// Only attach files with this extension, without the dot (empty: saved default)
    #[arg(short, long, default_value = "")]
    pub extension: String,

    /// Attach every non-hidden file, ignoring the saved extension
    #[arg(long, conflicts_with = "extension")]
    pub all_files: bool,

    /// Dry run mode - don't actually send
    #[arg(long)]
    pub dry_run: bool,

    /// Don't remember sender and extension for the next run
    #[arg(long)]
    pub no_save: bool,

    /// Seconds to wait between sends (overrides the config file)
    #[arg(long)]
    pub pause_secs: Option<u64>,

    /// Config file path
    #[arg(short, long, default_value = "~/.config/filemailer/config.json")]
    pub config: String,
}

impl Args {
    /// フォーム入力として扱う値
    pub fn send_input(&self) -> SendInput {
        SendInput::new(
            self.sender.clone(),
            self.subject.clone(),
            self.folder.clone(),
            self.extension.clone(),
        )
        .with_all_files(self.all_files)
    }
}
