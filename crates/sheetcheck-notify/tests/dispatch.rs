//! Integration tests for notification decisions and dispatch.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use sheetcheck_model::{Finding, FindingCode, Severity, ValidationReport};
use sheetcheck_notify::{
    BusinessUnit, DispatchOutcome, Dispatcher, LogTransport, MailTransport, NotificationPayload,
    NotificationPolicy, NotifyError, RecipientError, RecipientMap, TransportError, should_notify,
};
use sheetcheck_report::MessageContext;

#[derive(Default)]
struct RecordingTransport {
    sent: RefCell<Vec<NotificationPayload>>,
    fail: bool,
}

impl MailTransport for RecordingTransport {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError> {
        if self.fail {
            let source = "not-an-address"
                .parse::<lettre::Address>()
                .expect_err("invalid address");
            return Err(TransportError::Address {
                address: "not-an-address".to_string(),
                source,
            });
        }
        self.sent.borrow_mut().push(payload.clone());
        Ok(())
    }
}

fn finding(severity: Severity, column: &str) -> Finding {
    Finding::new(
        severity,
        FindingCode::NullValue,
        Some(column.to_string()),
        Some(0),
        format!("Row 1: column '{column}' is empty"),
    )
}

fn recipient_map() -> RecipientMap {
    RecipientMap {
        default: vec!["data@example.com".to_string()],
        default_cc: Vec::new(),
        units: BTreeMap::from([(
            "finance".to_string(),
            BusinessUnit {
                name: "Finance".to_string(),
                emails: vec!["fin@example.com".to_string()],
                cc: Vec::new(),
            },
        )]),
        columns: BTreeMap::from([("Amount".to_string(), "finance".to_string())]),
    }
}

fn context() -> MessageContext {
    MessageContext::new("ledger.xlsx").with_sheet("2024")
}

#[test]
fn should_notify_follows_status() {
    assert!(!should_notify(&ValidationReport::new(Vec::new(), 3, 2)));
    assert!(should_notify(&ValidationReport::new(
        vec![finding(Severity::Warning, "Amount")],
        3,
        2
    )));
    assert!(should_notify(&ValidationReport::new(
        vec![finding(Severity::Error, "Amount")],
        3,
        2
    )));
}

#[test]
fn passed_report_is_skipped_by_default() {
    let dispatcher = Dispatcher::new(recipient_map(), NotificationPolicy::default());
    let transport = RecordingTransport::default();
    let outcome = dispatcher
        .dispatch(&ValidationReport::new(Vec::new(), 3, 2), &context(), &transport)
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Skipped);
    assert!(transport.sent.borrow().is_empty());
}

#[test]
fn passed_report_sends_completion_when_enabled() {
    let policy = NotificationPolicy {
        notify_on_success: true,
    };
    let dispatcher = Dispatcher::new(recipient_map(), policy);
    let payload = dispatcher
        .prepare(&ValidationReport::new(Vec::new(), 3, 2), &context())
        .unwrap()
        .expect("completion payload");

    assert_eq!(
        payload.recipients.to,
        BTreeSet::from(["data@example.com".to_string()])
    );
    assert!(payload.subject.contains("No Issues Found"));
}

#[test]
fn failed_report_is_routed_and_greets_the_unit() {
    let dispatcher = Dispatcher::new(recipient_map(), NotificationPolicy::default());
    let transport = RecordingTransport::default();
    let report = ValidationReport::new(vec![finding(Severity::Error, "Amount")], 3, 2);

    let outcome = dispatcher.dispatch(&report, &context(), &transport).unwrap();

    let DispatchOutcome::Sent(payload) = outcome else {
        panic!("expected a sent notification");
    };
    assert_eq!(
        payload.recipients.to,
        BTreeSet::from(["fin@example.com".to_string()])
    );
    assert!(payload.text_body.starts_with("Dear Finance,"));
    assert_eq!(
        payload.subject,
        "Data Validation Alert - Errors Found: ledger.xlsx (2024)"
    );
    assert_eq!(transport.sent.borrow().len(), 1);
}

#[test]
fn missing_recipients_is_a_configuration_error() {
    let dispatcher = Dispatcher::new(RecipientMap::default(), NotificationPolicy::default());
    let report = ValidationReport::new(vec![finding(Severity::Error, "Other")], 1, 1);

    let err = dispatcher
        .dispatch(&report, &context(), &LogTransport::new())
        .unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Recipients(RecipientError::NoRecipients)
    ));
}

#[test]
fn transport_failure_is_distinct_and_payload_can_be_resent() {
    let dispatcher = Dispatcher::new(recipient_map(), NotificationPolicy::default());
    let report = ValidationReport::new(vec![finding(Severity::Error, "Amount")], 1, 1);
    let failing = RecordingTransport {
        fail: true,
        ..RecordingTransport::default()
    };

    let err = dispatcher.dispatch(&report, &context(), &failing).unwrap_err();
    assert!(matches!(err, NotifyError::Transport(_)));

    let payload = dispatcher
        .prepare(&report, &context())
        .unwrap()
        .expect("payload");
    let retry = RecordingTransport::default();
    retry.send(&payload).unwrap();
    retry.send(&payload).unwrap();
    assert_eq!(retry.sent.borrow().len(), 2);
}

#[test]
fn log_transport_accepts_everything() {
    let dispatcher = Dispatcher::new(recipient_map(), NotificationPolicy::default());
    let report = ValidationReport::new(vec![finding(Severity::Warning, "Amount")], 1, 1);
    let outcome = dispatcher.dispatch(&report, &context(), &LogTransport::new()).unwrap();
    assert!(matches!(outcome, DispatchOutcome::Sent(_)));
}
