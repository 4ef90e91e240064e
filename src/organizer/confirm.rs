use crate::error::{Error, Result};
use dialoguer::Confirm;

/// Answer to a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

/// Result of resolving a confirmation
#[derive(Debug)]
pub enum Outcome<T> {
    Accepted(T),
    Declined,
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Treat a decline as `Error::Cancelled`
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Accepted(value) => Ok(value),
            Outcome::Declined => Err(Error::Cancelled),
        }
    }
}

/// Source of accept/decline decisions
pub trait Prompt {
    fn decide(&self, title: &str, message: &str, details: &str) -> Result<Decision>;
}

/// Interactive terminal prompt, defaults to decline
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn decide(&self, title: &str, message: &str, details: &str) -> Result<Decision> {
        println!("\n{}", title);
        println!("{}\n", message);
        println!("{}", details);

        let proceed = Confirm::new()
            .with_prompt("Accept and execute?")
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))?;

        Ok(if proceed {
            Decision::Accept
        } else {
            Decision::Decline
        })
    }
}

/// Accepts without asking (`--yes`)
pub struct AutoAccept;

impl Prompt for AutoAccept {
    fn decide(&self, _title: &str, _message: &str, _details: &str) -> Result<Decision> {
        Ok(Decision::Accept)
    }
}

/// A pending preview wrapping a deferred action.
///
/// Accepting or declining consumes the confirmation, so the action runs at most once.
pub struct Confirmation<F> {
    title: String,
    message: String,
    details: String,
    action: F,
}

impl<F, T> Confirmation<F>
where
    F: FnOnce() -> T,
{
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
        action: F,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            details: details.into(),
            action,
        }
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Run the deferred action
    pub fn accept(self) -> T {
        (self.action)()
    }

    /// Drop the deferred action without running it
    pub fn decline(self) {}

    /// Ask `prompt` and either run the action or discard it
    pub fn resolve(self, prompt: &dyn Prompt) -> Result<Outcome<T>> {
        match prompt.decide(&self.title, &self.message, &self.details)? {
            Decision::Accept => Ok(Outcome::Accepted(self.accept())),
            Decision::Decline => {
                tracing::debug!(title = %self.title, "preview declined");
                self.decline();
                Ok(Outcome::Declined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed(Decision);

    impl Prompt for Fixed {
        fn decide(&self, _: &str, _: &str, _: &str) -> Result<Decision> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Prompt for Broken {
        fn decide(&self, _: &str, _: &str, _: &str) -> Result<Decision> {
            Err(Error::Prompt("stdin closed".to_string()))
        }
    }

    #[test]
    fn test_accept_runs_action_once() {
        let runs = Cell::new(0);
        let confirmation = Confirmation::new("Title", "Message", "Move a.txt to X\n", || {
            runs.set(runs.get() + 1);
            42
        });

        let outcome = confirmation.resolve(&Fixed(Decision::Accept)).unwrap();
        assert!(matches!(outcome, Outcome::Accepted(42)));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_decline_skips_action() {
        let runs = Cell::new(0);
        let confirmation = Confirmation::new("Title", "Message", "details", || runs.set(1));

        let outcome = confirmation.resolve(&Fixed(Decision::Decline)).unwrap();
        assert!(!outcome.is_accepted());
        assert!(matches!(outcome.into_result(), Err(Error::Cancelled)));
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_auto_accept() {
        let confirmation = Confirmation::new("T", "M", "D", || "done");
        assert_eq!(confirmation.details(), "D");
        assert!(matches!(
            confirmation.resolve(&AutoAccept).unwrap(),
            Outcome::Accepted("done")
        ));
    }

    #[test]
    fn test_prompt_failure_skips_action() {
        let runs = Cell::new(0);
        let confirmation = Confirmation::new("T", "M", "D", || runs.set(1));
        assert!(matches!(confirmation.resolve(&Broken), Err(Error::Prompt(_))));
        assert_eq!(runs.get(), 0);
    }
}
