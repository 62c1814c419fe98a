pub mod get;
pub mod head;
pub mod scrape;

use std::time::Duration;

use summaly_fetch::{DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_USER_AGENT, ScrapeOptions};

/// Flags shared by every subcommand, one per `ScrapeOptions` field.
#[derive(Debug, clap::Args)]
pub struct FetchArgs {
    /// Absolute http(s) URL to fetch.
    pub url: String,

    /// Sent as Accept-Language.
    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Time allowed until response headers arrive.
    #[arg(long, default_value_t = ScrapeOptions::default().response_timeout_ms)]
    pub response_timeout_ms: u64,

    /// Time allowed for the whole retrieval, body included.
    #[arg(long, default_value_t = ScrapeOptions::default().operation_timeout_ms)]
    pub operation_timeout_ms: u64,

    /// Body size limit in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_CONTENT_LENGTH)]
    pub max_content_length: u64,

    /// Fail when the server does not declare Content-Length.
    #[arg(long)]
    pub content_length_required: bool,

    /// Print a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl FetchArgs {
    pub fn options(&self) -> ScrapeOptions {
        let options = ScrapeOptions::default()
            .user_agent(self.user_agent.as_str())
            .response_timeout(Duration::from_millis(self.response_timeout_ms))
            .operation_timeout(Duration::from_millis(self.operation_timeout_ms))
            .max_content_length(self.max_content_length)
            .content_length_required(self.content_length_required);

        match &self.lang {
            Some(lang) => options.lang(lang.as_str()),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: FetchArgs,
    }

    #[test]
    fn test_defaults_match_library() {
        let harness = Harness::parse_from(["summaly", "https://example.com/"]);
        assert_eq!(harness.args.options(), ScrapeOptions::default());
    }

    #[test]
    fn test_flags_map_onto_options() {
        let harness = Harness::parse_from([
            "summaly",
            "https://example.com/",
            "--lang",
            "ja-JP",
            "--operation-timeout-ms",
            "5000",
            "--max-content-length",
            "1024",
            "--content-length-required",
        ]);
        let options = harness.args.options();

        assert_eq!(options.lang.as_deref(), Some("ja-JP"));
        assert_eq!(options.operation_timeout_ms, 5000);
        assert_eq!(options.max_content_length, 1024);
        assert!(options.content_length_required);
    }
}
