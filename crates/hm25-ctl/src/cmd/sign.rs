//! External-command signing.
//!
//! Key material never enters this process. `--sign-with <CMD>` names a
//! shell command that receives the unsigned transaction as one line of
//! hex on stdin and prints the signed transaction as hex on stdout.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use hm25_client::{Signer, SignerError};

pub struct CommandSigner {
    command: String,
}

impl CommandSigner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl Signer for CommandSigner {
    async fn sign(&self, unsigned_tx: &[u8]) -> Result<Vec<u8>, SignerError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()?;

        let mut stdin = child.stdin.take().ok_or("signer stdin unavailable")?;
        stdin.write_all(hex::encode(unsigned_tx).as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(format!("signing command exited with {}", output.status).into());
        }

        let text = String::from_utf8(output.stdout)?;
        Ok(hex::decode(text.trim())?)
    }
}
