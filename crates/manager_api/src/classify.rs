//! Translation of transport outcomes into [`ApiError`]s.
//!
//! This is the only place HTTP status codes are interpreted. Hooks fire as side effects of
//! classification and never change its result.

use std::{fmt, rc::Rc};

use serde_json::Value;

use crate::error::{ApiError, ApiErrorKind};

/// Callback invoked on a forbidden or unknown outcome.
pub type OutcomeHook = Rc<dyn Fn()>;
/// Callback invoked on a server failure with the backend's `detail`, if any.
pub type ServerErrorHook = Rc<dyn Fn(Option<&Value>)>;

#[derive(Clone, Default)]
/// Optional notification callbacks supplied when the client is built.
pub struct ErrorHooks {
    /// Fired on `403`.
    pub on_forbidden: Option<OutcomeHook>,
    /// Fired on `500` with the response `detail`.
    pub on_server: Option<ServerErrorHook>,
    /// Fired on any unexpected status and when no response arrived.
    pub on_unknown: Option<OutcomeHook>,
}

impl ErrorHooks {
    /// Sets the forbidden hook.
    pub fn on_forbidden(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_forbidden = Some(Rc::new(hook));
        self
    }

    /// Sets the server-failure hook.
    pub fn on_server(mut self, hook: impl Fn(Option<&Value>) + 'static) -> Self {
        self.on_server = Some(Rc::new(hook));
        self
    }

    /// Sets the unknown-outcome hook.
    pub fn on_unknown(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unknown = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for ErrorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHooks")
            .field("on_forbidden", &self.on_forbidden.is_some())
            .field("on_server", &self.on_server.is_some())
            .field("on_unknown", &self.on_unknown.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
/// Maps status codes and missing responses onto [`ApiErrorKind`]s.
pub struct ErrorClassifier {
    hooks: ErrorHooks,
}

impl ErrorClassifier {
    /// Creates a classifier that notifies `hooks`.
    pub fn new(hooks: ErrorHooks) -> Self {
        Self { hooks }
    }

    /// Classifies a non-success response from its status and decoded body.
    pub fn classify(&self, status: u16, body: &Value) -> ApiError {
        match status {
            400 => match body.get("detail") {
                Some(detail) => ApiError::with_detail(ApiErrorKind::Validation, detail.clone()),
                None => ApiError::new(ApiErrorKind::Validation),
            },
            422 => match first_validation_message(body) {
                Some(msg) => ApiError::with_detail(ApiErrorKind::Validation, msg.clone()),
                None => ApiError::new(ApiErrorKind::Validation),
            },
            403 => {
                if let Some(hook) = &self.hooks.on_forbidden {
                    hook();
                }
                ApiError::new(ApiErrorKind::Forbidden)
            }
            404 => ApiError::new(ApiErrorKind::NotFound),
            500 => {
                if let Some(hook) = &self.hooks.on_server {
                    hook(body.get("detail"));
                }
                ApiError::new(ApiErrorKind::Server)
            }
            _ => self.unknown(),
        }
    }

    /// Classifies a request that never produced a response (network failure, timeout).
    pub fn classify_no_response(&self) -> ApiError {
        self.unknown()
    }

    fn unknown(&self) -> ApiError {
        if let Some(hook) = &self.hooks.on_unknown {
            hook();
        }
        ApiError::new(ApiErrorKind::Unknown)
    }
}

/// `detail[0].msg` of a request-validation failure body.
fn first_validation_message(body: &Value) -> Option<&Value> {
    body.get("detail")?.as_array()?.first()?.get("msg")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct HookLog {
        forbidden: RefCell<usize>,
        server: RefCell<Vec<Option<Value>>>,
        unknown: RefCell<usize>,
    }

    fn recording_classifier() -> (ErrorClassifier, Rc<HookLog>) {
        let log = Rc::new(HookLog::default());
        let (forbidden, server, unknown) = (log.clone(), log.clone(), log.clone());
        let hooks = ErrorHooks::default()
            .on_forbidden(move || *forbidden.forbidden.borrow_mut() += 1)
            .on_server(move |detail| server.server.borrow_mut().push(detail.cloned()))
            .on_unknown(move || *unknown.unknown.borrow_mut() += 1);
        (ErrorClassifier::new(hooks), log)
    }

    fn assert_no_hooks(log: &HookLog) {
        assert_eq!(*log.forbidden.borrow(), 0);
        assert!(log.server.borrow().is_empty());
        assert_eq!(*log.unknown.borrow(), 0);
    }

    #[test]
    fn bad_request_keeps_detail_verbatim() {
        let (classifier, log) = recording_classifier();
        let err = classifier.classify(400, &json!({"detail": "bad field"}));
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.detail(), Some(&json!("bad field")));

        let structured = json!({"detail": {"field": "private_key", "reason": "format"}});
        let err = classifier.classify(400, &structured);
        assert_eq!(err.detail(), Some(&structured["detail"]));
        assert_no_hooks(&log);
    }

    #[test]
    fn unprocessable_entity_takes_first_message_only() {
        let (classifier, log) = recording_classifier();
        let body = json!({"detail": [
            {"loc": ["body", "amount"], "msg": "must be positive"},
            {"loc": ["body", "name"], "msg": "field required"}
        ]});
        let err = classifier.classify(422, &body);
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.detail_text(), Some("must be positive"));
        assert_no_hooks(&log);
    }

    #[test]
    fn validation_without_usable_detail_has_no_detail() {
        let (classifier, _) = recording_classifier();
        for (status, body) in [
            (400, json!({})),
            (422, json!({"detail": []})),
            (422, json!({"detail": "not a list"})),
            (422, json!({})),
        ] {
            let err = classifier.classify(status, &body);
            assert_eq!(err.kind(), ApiErrorKind::Validation, "status {status}");
            assert_eq!(err.detail(), None, "status {status}");
        }
    }

    #[test]
    fn forbidden_fires_hook_once_regardless_of_body() {
        let (classifier, log) = recording_classifier();
        let err = classifier.classify(403, &json!({"detail": "ignored"}));
        assert_eq!(err.kind(), ApiErrorKind::Forbidden);
        assert_eq!(err.detail(), None);
        assert_eq!(*log.forbidden.borrow(), 1);
        assert!(log.server.borrow().is_empty());
        assert_eq!(*log.unknown.borrow(), 0);
    }

    #[test]
    fn not_found_fires_no_hook() {
        let (classifier, log) = recording_classifier();
        let err = classifier.classify(404, &json!({}));
        assert_eq!(err.kind(), ApiErrorKind::NotFound);
        assert_no_hooks(&log);
    }

    #[test]
    fn server_error_passes_detail_to_hook() {
        let (classifier, log) = recording_classifier();
        let err = classifier.classify(500, &json!({"detail": "stack trace..."}));
        assert_eq!(err.kind(), ApiErrorKind::Server);
        assert_eq!(*log.server.borrow(), vec![Some(json!("stack trace..."))]);

        classifier.classify(500, &json!({}));
        assert_eq!(log.server.borrow().len(), 2);
        assert_eq!(log.server.borrow()[1], None);
    }

    #[test]
    fn other_statuses_and_missing_responses_are_unknown() {
        let (classifier, log) = recording_classifier();
        for status in [201, 301, 401, 409, 502, 503] {
            assert_eq!(
                classifier.classify(status, &json!({})).kind(),
                ApiErrorKind::Unknown
            );
        }
        assert_eq!(*log.unknown.borrow(), 6);

        assert_eq!(
            classifier.classify_no_response().kind(),
            ApiErrorKind::Unknown
        );
        assert_eq!(*log.unknown.borrow(), 7);
    }

    #[test]
    fn missing_hooks_are_a_normal_state() {
        let classifier = ErrorClassifier::default();
        assert_eq!(
            classifier.classify(403, &json!({})).kind(),
            ApiErrorKind::Forbidden
        );
        assert_eq!(
            classifier.classify(500, &json!({})).kind(),
            ApiErrorKind::Server
        );
        assert_eq!(
            classifier.classify_no_response().kind(),
            ApiErrorKind::Unknown
        );
        assert_eq!(
            format!("{:?}", ErrorHooks::default()),
            "ErrorHooks { on_forbidden: false, on_server: false, on_unknown: false }"
        );
    }
}
