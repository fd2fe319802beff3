//! Customer-care reports from the contact form, newest first.

use log::info;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::collection::{PersistedCollection, Renderer};
use crate::local_store::KeyValueStore;
use crate::record_id::{create_id, REPORT_PREFIX};
use crate::records::{Report, REPORTS_KEY};
use crate::timestamps::timestamp;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub email: String,
    pub message: String,
}

pub fn confirmation_message(report: &Report) -> String {
    format!("Report submitted. Reference ID: {}", report.id)
}

pub struct Reports<'s> {
    reports: PersistedCollection<'s, Report>,
}

impl<'s> Reports<'s> {
    pub fn new(store: &'s dyn KeyValueStore, renderer: Option<&'s Renderer<Report>>) -> Self {
        Self {
            reports: PersistedCollection::new(store, REPORTS_KEY).with_renderer(renderer),
        }
    }

    pub fn submit(&self, submission: &ReportSubmission) -> Result<Report, AppResponse> {
        let email = submission.email.trim();
        let message = submission.message.trim();
        if email.is_empty() || message.is_empty() {
            return Err(AppResponse::validation("Please provide email and message."));
        }

        let report = Report {
            id: create_id(REPORT_PREFIX),
            email: email.to_string(),
            message: message.to_string(),
            date: timestamp(),
        };
        self.reports.prepend(report.clone())?;
        info!("Report {} submitted", report.id);
        Ok(report)
    }

    pub fn list(&self) -> Vec<Report> {
        self.reports.load()
    }
}
