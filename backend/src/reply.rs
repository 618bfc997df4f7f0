//! Outcome of a coaching operation
//!
//! External calls (language model, search, data store) may fail during
//! chat, insights and plan generation. Those failures end in `Degraded`
//! and are answered with an apology body instead of an HTTP error.

#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Complete(T),
    Degraded { message: String, reason: String },
}

impl<T> Reply<T> {
    pub fn degraded(message: impl Into<String>, reason: impl ToString) -> Self {
        Reply::Degraded {
            message: message.into(),
            reason: reason.to_string(),
        }
    }

    /// The value, or whatever `fallback` builds from the apology and reason
    pub fn unwrap_or_else(self, fallback: impl FnOnce(String, String) -> T) -> T {
        match self {
            Reply::Complete(value) => value,
            Reply::Degraded { message, reason } => fallback(message, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_reaches_fallback() {
        let reply: Reply<String> = Reply::degraded("sorry", anyhow::anyhow!("timeout"));
        let text = reply.unwrap_or_else(|message, reason| format!("{message} ({reason})"));
        assert_eq!(text, "sorry (timeout)");
    }

    #[test]
    fn test_complete_skips_fallback() {
        let reply = Reply::Complete(8300u32);
        assert_eq!(reply.unwrap_or_else(|_, _| panic!("fallback called")), 8300);
    }
}
