use anyhow::Context;
use serde_json::json;
use summaly_fetch::{Fetcher, HttpClient};

use super::FetchArgs;

/// Fetch any resource and print its body as UTF-8.
#[derive(Debug, clap::Args)]
pub struct Get {
    #[command(flatten)]
    args: FetchArgs,
}

impl Get {
    pub async fn run<C: HttpClient>(self, fetcher: &Fetcher<C>) -> anyhow::Result<()> {
        let (response, body) = fetcher
            .get(&self.args.url, &self.args.options())
            .await
            .with_context(|| format!("failed to get {}", self.args.url))?;

        if self.args.json {
            let out = json!({ "response": response, "body": body });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            print!("{body}");
        }
        Ok(())
    }
}
