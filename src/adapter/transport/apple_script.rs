//! AppleScript Mail Transport
//!
//! Mail.app を AppleScript で操作して送信する（`osascript` 経由）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::entities::send_request::{SendOutcome, SendRequest};
use crate::domain::repositories::mail_transport::MailTransport;

/// メール本文
pub const MESSAGE_BODY: &str = "See attached.\n\n";

/// 添付ファイルの読み込みを待ってから送信するまでの秒数
pub const SEND_DELAY_SECONDS: u64 = 5;

/// AppleScriptの文字列リテラル用にエスケープする
pub fn escape_applescript(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 送信要求からAppleScriptを生成する
///
/// 送信元が空の場合は Mail.app の既定アカウントに任せる
pub fn render_script(request: &SendRequest) -> String {
    let mut script = String::new();

    // POSIX file は tell ブロックの外で解決する
    for (index, path) in request.attachments.iter().enumerate() {
        script.push_str(&format!(
            "set attachment{} to POSIX file \"{}\"\n",
            index + 1,
            escape_applescript(&path.to_string_lossy())
        ));
    }

    let mut properties = format!("subject:\"{}\"", escape_applescript(&request.subject));
    if !request.sender.is_empty() {
        properties.push_str(&format!(
            ", sender:\"{}\"",
            escape_applescript(&request.sender)
        ));
    }
    properties.push_str(&format!(
        ", content:\"{}\", visible:true",
        escape_applescript(MESSAGE_BODY)
    ));

    script.push_str("tell application \"Mail\"\n");
    script.push_str(&format!(
        "    set theNewMessage to make new outgoing message with properties {{{}}}\n",
        properties
    ));
    script.push_str("    tell theNewMessage\n");
    script.push_str(&format!(
        "        make new to recipient at end of to recipients with properties {{address:\"{}\"}}\n",
        escape_applescript(&request.recipient)
    ));
    script.push_str("    end tell\n");
    script.push_str("    tell content of theNewMessage\n");
    for index in 1..=request.attachments.len() {
        script.push_str("        try\n");
        script.push_str(&format!(
            "            make new attachment with properties {{file name:attachment{}}} at after the last word of the last paragraph\n",
            index
        ));
        script.push_str("        on error errmess\n");
        script.push_str("            log errmess\n");
        script.push_str("        end try\n");
    }
    script.push_str("    end tell\n");
    script.push_str(&format!("    delay {}\n", SEND_DELAY_SECONDS));
    script.push_str("    tell theNewMessage\n");
    script.push_str("        send\n");
    script.push_str("    end tell\n");
    script.push_str("end tell\n");

    script
}

/// `osascript` の終了状態と出力から送信結果を作る
fn outcome_from_output(recipient: &str, output: &Output) -> SendOutcome {
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if output.status.success() {
        // 添付に失敗した場合は `log` の出力が stderr に残る
        if !stderr.is_empty() {
            return SendOutcome::failure(recipient, format!("error: {}", stderr));
        }
        if stdout.is_empty() {
            return SendOutcome::success(recipient);
        }
        return SendOutcome::completed(recipient, stdout);
    }

    let diagnostic = if stderr.is_empty() {
        format!("error: osascript exited with {}", output.status)
    } else {
        format!("error: {}", stderr)
    };
    SendOutcome::failure(recipient, diagnostic)
}

/// AppleScriptトランスポート
pub struct AppleScriptTransport {
    osascript_path: String,
}

impl AppleScriptTransport {
    pub fn new(osascript_path: impl Into<String>) -> Self {
        Self {
            osascript_path: osascript_path.into(),
        }
    }

    /// スクリプトを標準入力から渡して実行する
    async fn execute(&self, script: &str) -> Result<Output> {
        let mut child = Command::new(&self.osascript_path)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context(format!("Failed to spawn {}", self.osascript_path))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                // スクリプトを読まずに終了した場合は終了状態で判断する
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to write script to osascript");
                }
            }
        }

        child
            .wait_with_output()
            .await
            .context(format!("Failed to wait for {}", self.osascript_path))
    }
}

impl Default for AppleScriptTransport {
    fn default() -> Self {
        Self::new("osascript")
    }
}

#[async_trait]
impl MailTransport for AppleScriptTransport {
    async fn send(&self, request: &SendRequest) -> SendOutcome {
        let script = render_script(request);
        debug!("AppleScript for {}:\n{}", request.recipient, script);

        match self.execute(&script).await {
            Ok(output) => outcome_from_output(&request.recipient, &output),
            Err(e) => SendOutcome::failure(&request.recipient, format!("error: {:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(attachments: &[&str]) -> SendRequest {
        SendRequest {
            sender: "Grader <grader@example.edu>".to_string(),
            subject: "Graded \"Lab 1\"".to_string(),
            recipient: "bob@example.com".to_string(),
            attachments: attachments.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_applescript("line\nnext"), "line\\nnext");
    }

    #[test]
    fn test_render_script_contains_message_properties() {
        let script = render_script(&request(&["/data/bob@example.com/lab1.pdf"]));

        assert!(script.starts_with(
            "set attachment1 to POSIX file \"/data/bob@example.com/lab1.pdf\"\n"
        ));
        assert!(script.contains(r#"subject:"Graded \"Lab 1\"""#));
        assert!(script.contains(r#"sender:"Grader <grader@example.edu>""#));
        assert!(script.contains(r#"content:"See attached.\n\n""#));
        assert!(script.contains(r#"{address:"bob@example.com"}"#));
        assert!(script.contains("{file name:attachment1}"));
        assert!(script.contains("delay 5"));
        assert!(script.trim_end().ends_with("end tell"));
    }

    #[test]
    fn test_render_script_attaches_every_file_in_order() {
        let script = render_script(&request(&["/d/a.pdf", "/d/b.pdf", "/d/c.pdf"]));

        let first = script.find("POSIX file \"/d/a.pdf\"").unwrap();
        let second = script.find("POSIX file \"/d/b.pdf\"").unwrap();
        let third = script.find("POSIX file \"/d/c.pdf\"").unwrap();
        assert!(first < second && second < third);
        assert_eq!(script.matches("make new attachment").count(), 3);
        assert!(script.contains("{file name:attachment3}"));
    }

    #[test]
    fn test_render_script_omits_empty_sender() {
        let mut req = request(&["/d/a.pdf"]);
        req.sender = String::new();

        let script = render_script(&req);

        assert!(!script.contains("sender:"));
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        fn output(code: i32, stdout: &str, stderr: &str) -> Output {
            Output {
                status: ExitStatus::from_raw(code << 8),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            }
        }

        #[test]
        fn test_outcome_from_output_sentinel() {
            let outcome = outcome_from_output("bob@example.com", &output(0, "true\n", ""));
            assert_eq!(outcome.diagnostic.as_deref(), Some("true"));
            assert!(!outcome.is_failure());
        }

        #[test]
        fn test_outcome_from_output_error() {
            let outcome = outcome_from_output(
                "bob@example.com",
                &output(1, "", "execution error: Mail got an error (-1728)\n"),
            );
            assert!(outcome.is_failure());
            assert_eq!(
                outcome.diagnostic.as_deref(),
                Some("error: execution error: Mail got an error (-1728)")
            );
        }

        #[test]
        fn test_outcome_from_output_logged_attachment_error() {
            let outcome = outcome_from_output(
                "bob@example.com",
                &output(0, "true\n", "File not found: /d/a.pdf\n"),
            );
            assert!(outcome.is_failure());
            assert_eq!(
                outcome.diagnostic.as_deref(),
                Some("error: File not found: /d/a.pdf")
            );
        }

        #[tokio::test]
        async fn test_send_attachment_error_on_stderr_is_failure() {
            use std::os::unix::fs::PermissionsExt;

            let temp_dir = tempfile::TempDir::new().unwrap();
            let interpreter = temp_dir.path().join("osascript");
            std::fs::write(
                &interpreter,
                "#!/bin/sh\ncat > /dev/null\necho 'File not found: /d/a.pdf' >&2\necho true\n",
            )
            .unwrap();
            std::fs::set_permissions(&interpreter, std::fs::Permissions::from_mode(0o755))
                .unwrap();
            let transport = AppleScriptTransport::new(interpreter.to_string_lossy());

            let outcome = transport.send(&request(&["/d/a.pdf"])).await;

            assert!(!outcome.success);
            assert!(outcome.is_failure());
            assert_eq!(
                outcome.diagnostic.as_deref(),
                Some("error: File not found: /d/a.pdf")
            );
            assert!(outcome.into_error().is_some());
        }

        #[tokio::test]
        async fn test_send_pipes_script_to_interpreter() {
            // cat はスクリプトをそのまま返すので、センチネル以外の出力として失敗扱いになる
            let transport = AppleScriptTransport::new("cat");

            let outcome = transport.send(&request(&["/d/a.pdf"])).await;

            assert!(outcome.is_failure());
            let diagnostic = outcome.diagnostic.unwrap();
            assert!(diagnostic.contains(r#"{address:"bob@example.com"}"#));
        }

        #[tokio::test]
        async fn test_send_success_without_output() {
            let transport = AppleScriptTransport::new("true");

            let outcome = transport.send(&request(&["/d/a.pdf"])).await;

            assert_eq!(outcome, SendOutcome::success("bob@example.com"));
        }

        #[tokio::test]
        async fn test_send_non_zero_exit() {
            let transport = AppleScriptTransport::new("false");

            let outcome = transport.send(&request(&["/d/a.pdf"])).await;

            assert!(!outcome.success);
            assert!(outcome.diagnostic.unwrap().contains("exited with"));
        }

        #[tokio::test]
        async fn test_send_missing_interpreter() {
            let transport = AppleScriptTransport::new("/nonexistent/osascript");

            let outcome = transport.send(&request(&["/d/a.pdf"])).await;

            assert!(!outcome.success);
            assert!(outcome
                .diagnostic
                .unwrap()
                .contains("Failed to spawn /nonexistent/osascript"));
        }
    }
}
