use console::{style, StyledObject};
use smokesignal_core::{DeployEvent, Reporter};

/// Prints deployment events to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn marker(event: &DeployEvent) -> StyledObject<&'static str> {
        match event {
            DeployEvent::Started { .. } | DeployEvent::FeeEstimated { .. } => style("→").blue(),
            DeployEvent::ConstructorArgs { .. } | DeployEvent::VerificationSkipped => {
                style("ℹ").blue()
            }
            DeployEvent::Deployed { .. } | DeployEvent::VerificationSubmitted { .. } => {
                style("✓").green()
            }
            DeployEvent::VerificationFailed { .. } => style("⚠").yellow(),
        }
    }

    /// Status line for an event; the text is always the event's `Display`
    fn line(event: &DeployEvent) -> String {
        format!("{} {}", Self::marker(event), event)
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &DeployEvent) {
        println!("{}", Self::line(event));
    }
}
