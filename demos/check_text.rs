//! Check Text: submit a snippet and print the issues found.
//!
//! Needs a reachable platform and an API token:
//! ```sh
//! cargo run --example check_text -- https://acme.acrolinx.cloud my-signature my-token "Their is a typo."
//! ```

use std::time::Duration;

use acrolinx::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(url), Some(signature), Some(token)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: check_text <platform-url> <signature> <api-token> [text]");
        std::process::exit(2);
    };
    let text = args
        .next()
        .unwrap_or_else(|| "This sentence have an error in it.".to_string());

    let client = Client::builder(signature.as_str(), url)
        .with_api_token(token)
        .build()?;

    // Pick the default guidance profile the platform advertises.
    let (caps, _) = client
        .checking()
        .get_capabilities(Some(&GetCapabilitiesOptions::with_locale("en")))
        .await?;
    let profile = caps
        .default_guidance_profile()
        .or_else(|| caps.guidance_profiles.first())
        .ok_or("platform advertises no guidance profiles")?;
    println!("Guidance profile: {} ({})", profile.display_name, profile.id);

    let options = SubmitCheckBuilder::new(text)
        .guidance_profile(&profile.id)
        .content_format("TEXT")
        .check_type("interactive")
        .generated_batch_id(&signature)
        .build();
    let (check, _) = client.checking().submit_check(&options).await?;
    println!("Submitted check {}", check.id);

    let result = loop {
        match client.checking().get_check_result(&check).await?.0 {
            CheckStatus::InProgress(progress) => {
                println!("  {}% {}", progress.percent, progress.message);
                tokio::time::sleep(progress.retry_after().max(Duration::from_secs(1))).await;
            }
            CheckStatus::Complete(result) => break result,
        }
    };

    if let Some(quality) = &result.quality {
        println!("Score: {} ({})", quality.score, quality.status);
    }
    for issue in result.all_issues() {
        println!("[{}] {}", issue.goal_id, issue.display_surface);
        for suggestion in &issue.suggestions {
            println!("    -> {}", suggestion.surface);
        }
    }
    if let Some(scorecard) = result.report("scorecard") {
        println!("Scorecard: {}", scorecard.link);
    }

    Ok(())
}
