use crate::core::{ConfirmPrompt, ConfirmationService, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// 終端機輸入輸出，兼任確認對話框
pub struct Console<R = BufReader<Stdin>> {
    lines: Mutex<Lines<R>>,
}

impl Console {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> Console<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// 輸入結束時回傳 `None`
    pub async fn read_line(&self) -> Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }

    pub async fn prompt(&self, text: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        self.read_line().await
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ConfirmationService for Console<R> {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool> {
        let question = format!(
            "⚠️  {}\n{}\n[y] {}  [N] {}: ",
            prompt.title, prompt.message, prompt.confirm_label, prompt.cancel_label
        );
        let answer = self.prompt(&question).await?;
        Ok(is_affirmative(answer.as_deref().unwrap_or("")))
    }

    async fn acknowledge(&self, title: &str, message: &str) -> Result<()> {
        println!("✅ {} {}", title, message);
        Ok(())
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
