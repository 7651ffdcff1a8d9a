//! Validate the channel configuration and post classification

use anyhow::Result;

use crate::channels::validate;
use crate::Columnist;

/// Run both advisory validators and print their findings
///
/// Returns an error only when error-level findings exist, so CI can gate on
/// it while warnings stay informational.
pub fn run(app: &Columnist) -> Result<()> {
    let config_findings = validate::validate_config(&app.channels);

    println!("Channel configuration:");
    if config_findings.is_empty() {
        println!("  ok");
    } else {
        for finding in &config_findings {
            println!("  {}", finding);
        }
    }

    let posts = app.query().all_posts_sorted();
    let report = validate::validate_posts(&posts, &app.channels);

    println!("Posts: {}", report.summary());
    for finding in &report.findings {
        println!("  {}", finding);
    }

    let config_errors = config_findings
        .iter()
        .any(|f| f.severity == validate::Severity::Error);
    if config_errors || report.has_errors() {
        anyhow::bail!("validation found errors");
    }

    Ok(())
}
