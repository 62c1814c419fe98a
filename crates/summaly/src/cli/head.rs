use anyhow::Context;
use summaly_fetch::{Fetcher, HttpClient};

use super::FetchArgs;

/// Print response status and headers without reading a body.
#[derive(Debug, clap::Args)]
pub struct Head {
    #[command(flatten)]
    args: FetchArgs,
}

impl Head {
    pub async fn run<C: HttpClient>(self, fetcher: &Fetcher<C>) -> anyhow::Result<()> {
        let response = fetcher
            .head(&self.args.url, &self.args.options())
            .await
            .with_context(|| format!("failed to fetch headers of {}", self.args.url))?;

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{} {} {}", response.status, response.status_text, response.url);
            for (key, value) in &response.headers {
                println!("{key}: {value}");
            }
        }
        Ok(())
    }
}
