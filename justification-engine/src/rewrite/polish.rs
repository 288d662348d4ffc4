//! Retrying rewrite with a fact gate. Every failure path yields the draft.

use std::{env, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    rewrite::{RewriteError, RewriteService, payload::RewritePayload, prompt::build_prompt},
    validate::{MissingFact, check_facts},
};

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// `REWRITE_MAX_ATTEMPTS` and `REWRITE_BACKOFF_MS`; unset or invalid values
    /// keep the defaults. At least one attempt is always made.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let max_attempts = lookup("REWRITE_MAX_ATTEMPTS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map_or(defaults.max_attempts, |n| n.max(1));
        let backoff = lookup("REWRITE_BACKOFF_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.backoff, Duration::from_millis);
        Self {
            max_attempts,
            backoff,
        }
    }
}

/// Why a row kept its draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Every attempt failed; holds the last error message.
    ServiceFailed(String),
    /// The rewrite dropped or altered a fact.
    FactDrift(MissingFact),
}

/// Where the final text of a row came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Rewritten,
    Draft(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishOutcome {
    pub text: String,
    pub source: TextSource,
}

impl PolishOutcome {
    pub fn is_rewritten(&self) -> bool {
        self.source == TextSource::Rewritten
    }

    fn draft(draft: &str, reason: FallbackReason) -> Self {
        Self {
            text: draft.to_string(),
            source: TextSource::Draft(reason),
        }
    }
}

async fn rewrite_with_retry<R>(
    service: &R,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, RewriteError>
where
    R: RewriteService + Sync,
{
    let attempts = policy.max_attempts.max(1);
    let mut last = RewriteError::Unavailable("no attempt made".to_string());

    for attempt in 1..=attempts {
        match service.rewrite(prompt).await {
            Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
            Ok(_) => last = RewriteError::EmptyResponse,
            Err(e) => last = e,
        }
        debug!(attempt, attempts, error = %last, "rewrite attempt failed");
        if attempt < attempts {
            sleep(policy.backoff).await;
        }
    }
    Err(last)
}

/// Rewrites one draft and keeps the candidate only if every fact survived.
pub async fn polish_one<R>(
    service: &R,
    payload: &RewritePayload,
    draft: &str,
    policy: &RetryPolicy,
) -> PolishOutcome
where
    R: RewriteService + Sync,
{
    let candidate = match build_prompt(payload, draft) {
        Ok(prompt) => rewrite_with_retry(service, &prompt, policy).await,
        Err(e) => Err(e),
    };

    let candidate = match candidate {
        Ok(c) => c,
        Err(e) => {
            warn!(component = ?payload.component, error = %e, "rewrite failed, keeping draft");
            return PolishOutcome::draft(draft, FallbackReason::ServiceFailed(e.to_string()));
        }
    };

    match check_facts(&candidate, payload) {
        Ok(()) => PolishOutcome {
            text: candidate,
            source: TextSource::Rewritten,
        },
        Err(missing) => {
            warn!(
                component = ?payload.component,
                %missing,
                "rewrite dropped a fact, keeping draft"
            );
            PolishOutcome::draft(draft, FallbackReason::FactDrift(missing))
        }
    }
}

/// Polishes `(payload, draft)` pairs in order; one outcome per pair.
pub async fn polish_all<'a, R, I>(service: &R, rows: I, policy: &RetryPolicy) -> Vec<PolishOutcome>
where
    R: RewriteService + Sync,
    I: IntoIterator<Item = (&'a RewritePayload, &'a str)>,
{
    let mut out = Vec::new();
    for (payload, draft) in rows {
        out.push(polish_one(service, payload, draft, policy).await);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use super::*;
    use crate::rules::stats::Level;

    struct Scripted {
        replies: Mutex<Vec<Result<String, RewriteError>>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(mut replies: Vec<Result<String, RewriteError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                calls: AtomicU32::new(0),
            }
        }
    }

    impl RewriteService for Scripted {
        async fn rewrite(&self, _prompt: &str) -> Result<String, RewriteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(RewriteError::Unavailable("script exhausted".into())))
        }
    }

    fn payload() -> RewritePayload {
        RewritePayload {
            component: Some("V-7".into()),
            risk_category: "MEDIUM".into(),
            pof: Some(4),
            int_corr_rate: Some(0.12),
            ext_corr_rate: Some(0.04),
            inspection_priority: None,
            flamm_cat: "B".into(),
            tox_cat: "C".into(),
            prod_cat: "D".into(),
            governing_cof: Some("B".into()),
            governing_sources: vec!["flammable"],
            inventory_level: Level::Medium,
            flamm_area_level: Level::Medium,
            fluid_type: None,
            fluid: None,
            phase: None,
            toxic: None,
        }
    }

    const GOOD: &str = "MEDIUM risk with PoF = 4, Category B governing (B/C/D), rates 0.12 and 0.04.";
    const DRAFT: &str = "draft";

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn faithful_rewrite_is_kept() {
        let svc = Scripted::new(vec![Ok(format!("  {GOOD}\n"))]);
        let out = polish_one(&svc, &payload(), DRAFT, &fast()).await;
        assert!(out.is_rewritten());
        assert_eq!(out.text, GOOD);
    }

    #[tokio::test]
    async fn retries_once_then_succeeds() {
        let svc = Scripted::new(vec![Ok("   ".into()), Ok(GOOD.into())]);
        let out = polish_one(&svc, &payload(), DRAFT, &fast()).await;
        assert!(out.is_rewritten());
        assert_eq!(svc.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_keep_draft() {
        let svc = Scripted::new(vec![
            Err(RewriteError::Unavailable("down".into())),
            Err(RewriteError::Unavailable("still down".into())),
        ]);
        let out = polish_one(&svc, &payload(), DRAFT, &RetryPolicy::default()).await;
        assert_eq!(out.text, DRAFT);
        assert_eq!(
            out.source,
            TextSource::Draft(FallbackReason::ServiceFailed(
                "rewrite unavailable: still down".into()
            ))
        );
        assert_eq!(svc.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn drifted_rate_keeps_draft() {
        let svc = Scripted::new(vec![Ok(GOOD.replace("0.04", "0.4"))]);
        let out = polish_one(&svc, &payload(), DRAFT, &fast()).await;
        assert_eq!(out.text, DRAFT);
        assert!(matches!(out.source, TextSource::Draft(FallbackReason::FactDrift(_))));
    }

    #[tokio::test]
    async fn polish_all_preserves_order_and_length() {
        let svc = Scripted::new(vec![Ok(GOOD.into()), Ok("nonsense".into())]);
        let p = payload();
        let rows = vec![(&p, "first"), (&p, "second"), (&p, "third")];
        let out = polish_all(&svc, rows, &RetryPolicy { max_attempts: 1, ..fast() }).await;

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].text, GOOD);
        assert_eq!(out[1].text, "second");
        assert_eq!(out[2].text, "third");
    }

    #[test]
    fn policy_from_lookup() {
        let p = RetryPolicy::from_lookup(|name| match name {
            "REWRITE_MAX_ATTEMPTS" => Some("0".into()),
            "REWRITE_BACKOFF_MS" => Some("250".into()),
            _ => None,
        });
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.backoff, Duration::from_millis(250));

        let d = RetryPolicy::from_lookup(|_| Some("junk".into()));
        assert_eq!(d, RetryPolicy::default());
    }
}
