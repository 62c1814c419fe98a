use anyhow::Context;
use serde_json::json;
use summaly_fetch::{Fetcher, HttpClient};

use super::FetchArgs;

/// Fetch an HTML page, strip it and print the decoded text.
#[derive(Debug, clap::Args)]
pub struct Scrape {
    #[command(flatten)]
    args: FetchArgs,
}

impl Scrape {
    pub async fn run<C: HttpClient>(self, fetcher: &Fetcher<C>) -> anyhow::Result<()> {
        let scraped = fetcher
            .scrape(&self.args.url, &self.args.options())
            .await
            .with_context(|| format!("failed to scrape {}", self.args.url))?;

        if self.args.json {
            let out = json!({
                "response": scraped.response,
                "encoding": scraped.encoding.name(),
                "charset_source": scraped.charset_source,
                "text": scraped.text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}", scraped.text);
        }
        Ok(())
    }
}
