use super::sequencing::{CompletionPolicy, OutcomeSlot, RequestToken};
use crate::config::ClientConfig;
use crate::domain::{CoercionPolicy, FeatureField, FormRecord, PredictionOutcome, PredictionRequest};
use crate::prelude::ClientResult;
use crate::transport::{prediction_outcome, HttpReply};
use log::{debug, info, warn};

/// A prediction request the caller must send, tagged with its token.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDispatch {
    pub token: RequestToken,
    pub request: PredictionRequest,
}

/// Owns the feature form and the outcome of the latest submissions.
#[derive(Debug, Clone)]
pub struct PredictionController {
    form: FormRecord,
    slot: OutcomeSlot<PredictionOutcome>,
    coercion: CoercionPolicy,
}

impl PredictionController {
    pub fn new(coercion: CoercionPolicy, completion: CompletionPolicy) -> Self {
        Self {
            form: FormRecord::new(),
            slot: OutcomeSlot::new(completion),
            coercion,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.coercion, config.completion)
    }

    /// Stores raw input verbatim. The outcome is left alone.
    pub fn edit_field(&mut self, field: FeatureField, raw: impl Into<String>) {
        self.form.set(field, raw.into());
    }

    pub fn edit_field_named(&mut self, name: &str, raw: impl Into<String>) -> ClientResult<()> {
        let field = name.parse::<FeatureField>()?;
        self.edit_field(field, raw);
        Ok(())
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    /// Moves to `Pending` and returns the request to send.
    ///
    /// Under [`CoercionPolicy::Strict`] a form that does not coerce fails
    /// immediately and nothing is returned.
    pub fn submit(&mut self) -> Option<PredictionDispatch> {
        match self.coercion.coerce(&self.form) {
            Ok(request) => {
                let token = self.slot.begin(PredictionOutcome::Pending);
                info!("prediction {token} dispatched");
                Some(PredictionDispatch { token, request })
            }
            Err(err) => {
                warn!("prediction rejected before dispatch: {err}");
                self.slot.replace(PredictionOutcome::Failed(err.to_string()));
                None
            }
        }
    }

    /// Feeds the reply for `token` back in. Returns whether it became visible.
    pub fn complete(&mut self, token: RequestToken, reply: ClientResult<HttpReply>) -> bool {
        let outcome = prediction_outcome(reply);
        let applied = self.slot.settle(token, outcome);
        if applied {
            debug!("prediction {token} applied: {:?}", self.slot.outcome());
        } else {
            debug!(
                "prediction {token} discarded, {} is newer",
                self.slot.latest()
            );
        }
        applied
    }

    pub fn current_outcome(&self) -> &PredictionOutcome {
        self.slot.outcome()
    }

    pub fn latest_token(&self) -> RequestToken {
        self.slot.latest()
    }
}

impl Default for PredictionController {
    fn default() -> Self {
        Self::new(CoercionPolicy::default(), CompletionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GENERIC_FAILURE;
    use crate::prelude::ClientError;

    fn ok(status: u16, body: &str) -> ClientResult<HttpReply> {
        Ok(HttpReply::new(status, body.as_bytes().to_vec()))
    }

    #[test]
    fn edits_never_touch_the_outcome() {
        let mut controller = PredictionController::default();
        controller.edit_field(FeatureField::NewCases, "10");
        assert_eq!(controller.current_outcome(), &PredictionOutcome::Idle);

        let dispatch = controller.submit().unwrap();
        controller.edit_field(FeatureField::NewCases, "11");
        assert!(controller.current_outcome().is_pending());

        controller.complete(dispatch.token, ok(200, r#"{"Predicted_new_deaths": 4.0}"#));
        controller.edit_field(FeatureField::DeathRate, "abc");
        assert_eq!(controller.current_outcome(), &PredictionOutcome::Succeeded(4.0));
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let mut controller = PredictionController::default();
        assert!(controller.edit_field_named("New_cases", "3").is_ok());
        assert!(matches!(
            controller.edit_field_named("Recoveries", "3"),
            Err(ClientError::UnknownField(_))
        ));
        assert_eq!(controller.form().get(FeatureField::NewCases), "3");
    }

    #[test]
    fn submit_is_pending_synchronously_and_keeps_the_form() {
        let mut controller = PredictionController::default();
        for field in FeatureField::ALL {
            controller.edit_field(field, "0");
        }
        let dispatch = controller.submit().unwrap();

        assert_eq!(controller.current_outcome(), &PredictionOutcome::Pending);
        assert!(dispatch.request.iter().all(|(_, value)| value == 0.0));
        assert_eq!(controller.form().get(FeatureField::CaseGrowthRate), "0");
    }

    #[test]
    fn server_message_survives_into_the_outcome() {
        let mut controller = PredictionController::default();
        let dispatch = controller.submit().unwrap();
        controller.complete(dispatch.token, ok(500, r#"{"message":"model unavailable"}"#));
        assert_eq!(
            controller.current_outcome(),
            &PredictionOutcome::Failed("model unavailable".into())
        );
    }

    #[test]
    fn transport_failure_uses_generic_message_and_stays_usable() {
        let mut controller = PredictionController::default();
        let first = controller.submit().unwrap();
        controller.complete(first.token, Err(ClientError::Config("unreachable".into())));
        assert_eq!(
            controller.current_outcome(),
            &PredictionOutcome::Failed(GENERIC_FAILURE.into())
        );

        let second = controller.submit().unwrap();
        assert!(controller.current_outcome().is_pending());
        controller.complete(second.token, ok(200, r#"{"Predicted_new_deaths": 1.5}"#));
        assert_eq!(controller.current_outcome(), &PredictionOutcome::Succeeded(1.5));
    }

    #[test]
    fn late_first_reply_overwrites_second_by_default() {
        let mut controller = PredictionController::default();
        let first = controller.submit().unwrap();
        let second = controller.submit().unwrap();

        assert!(controller.complete(second.token, ok(200, r#"{"Predicted_new_deaths": 2.0}"#)));
        assert!(controller.complete(first.token, ok(200, r#"{"Predicted_new_deaths": 1.0}"#)));
        assert_eq!(controller.current_outcome(), &PredictionOutcome::Succeeded(1.0));
    }

    #[test]
    fn latest_dispatch_policy_ignores_stale_replies() {
        let mut controller =
            PredictionController::new(CoercionPolicy::Permissive, CompletionPolicy::LatestDispatch);
        let first = controller.submit().unwrap();
        let second = controller.submit().unwrap();

        assert!(controller.complete(second.token, ok(200, r#"{"Predicted_new_deaths": 2.0}"#)));
        assert!(!controller.complete(first.token, ok(200, r#"{"Predicted_new_deaths": 1.0}"#)));
        assert_eq!(controller.current_outcome(), &PredictionOutcome::Succeeded(2.0));
    }

    #[test]
    fn strict_policy_fails_without_dispatching() {
        let mut controller =
            PredictionController::new(CoercionPolicy::Strict, CompletionPolicy::LastCompletion);
        controller.edit_field(FeatureField::NewCases, "many");

        assert!(controller.submit().is_none());
        match controller.current_outcome() {
            PredictionOutcome::Failed(message) => assert!(message.starts_with("New_cases")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
