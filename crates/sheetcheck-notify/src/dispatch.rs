use serde::Serialize;
use tracing::{info, info_span};

use sheetcheck_model::{ValidationReport, ValidationStatus};
use sheetcheck_report::{MessageContext, render_message};

use crate::error::{NotifyError, RecipientError};
use crate::recipients::{RecipientMap, Recipients, route};
use crate::transport::MailTransport;

/// Whether a report warrants an alert: anything but a clean pass.
pub fn should_notify(report: &ValidationReport) -> bool {
    report.status() != ValidationStatus::Passed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NotificationPolicy {
    /// Also send a completion message for passed reports.
    pub notify_on_success: bool,
}

/// A rendered message with its resolved recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub recipients: Recipients,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The policy did not call for a message.
    Skipped,
    Sent(NotificationPayload),
}

/// Decides whether a report is sent and to whom.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    recipients: RecipientMap,
    policy: NotificationPolicy,
}

impl Dispatcher {
    pub fn new(recipients: RecipientMap, policy: NotificationPolicy) -> Self {
        Self { recipients, policy }
    }

    pub fn recipients(&self) -> &RecipientMap {
        &self.recipients
    }

    pub fn policy(&self) -> NotificationPolicy {
        self.policy
    }

    /// Build the payload for a report, or `None` when nothing is due.
    ///
    /// When the context has no unit name and the findings route to exactly
    /// one business unit, that unit's name is used in the greeting.
    pub fn prepare(
        &self,
        report: &ValidationReport,
        context: &MessageContext,
    ) -> Result<Option<NotificationPayload>, RecipientError> {
        if !should_notify(report) && !self.policy.notify_on_success {
            return Ok(None);
        }
        let recipients = route(report, &self.recipients)?;

        let mut context = context.clone();
        if context.unit_name.is_none() && recipients.units.len() == 1 {
            context.unit_name = recipients.units.first().cloned();
        }
        let message = render_message(report, &context);
        Ok(Some(NotificationPayload {
            subject: message.subject,
            html_body: message.html_body,
            text_body: message.text_body,
            recipients,
        }))
    }

    /// Prepare and send in one step.
    pub fn dispatch<T>(
        &self,
        report: &ValidationReport,
        context: &MessageContext,
        transport: &T,
    ) -> Result<DispatchOutcome, NotifyError>
    where
        T: MailTransport + ?Sized,
    {
        let span = info_span!("dispatch", file = %context.file_name, status = report.status().as_str());
        let _guard = span.enter();

        let Some(payload) = self.prepare(report, context)? else {
            info!("no notification due");
            return Ok(DispatchOutcome::Skipped);
        };
        transport.send(&payload)?;
        info!(
            recipients = payload.recipients.to.len() + payload.recipients.cc.len(),
            "notification dispatched"
        );
        Ok(DispatchOutcome::Sent(payload))
    }
}
