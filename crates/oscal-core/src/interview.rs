//! Control interview review.
//!
//! The interview step shows a subset of catalog controls; for each one the
//! user may select it and write an implementation narrative. Review turns the
//! raw responses into findings, the selected ids and a preview.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ControlSummary;
use crate::validate::Finding;

pub const NARRATIVE_REQUIRED: &str = "Provide a narrative for selected controls.";

/// Raw answer for one control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub narrative: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPreview {
    pub control_id: String,
    pub title: String,
    pub narrative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewReview {
    pub findings: Vec<Finding>,
    pub selected: Vec<String>,
    pub preview: Vec<ControlPreview>,
}

impl InterviewReview {
    pub fn is_complete(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Form field name of a control's narrative.
pub fn narrative_field(control_id: &str) -> String {
    format!("control_{control_id}_narrative")
}

/// Review responses for `controls`, in control order.
///
/// Responses for controls not in the list are ignored; a control with no
/// response counts as unselected.
pub fn review_interview(
    controls: &[ControlSummary],
    responses: &BTreeMap<String, ControlResponse>,
) -> InterviewReview {
    let mut review = InterviewReview::default();

    for control in controls {
        let Some(response) = responses.get(&control.control_id) else {
            continue;
        };
        if !response.selected {
            continue;
        }
        let narrative = response.narrative.trim();
        if narrative.is_empty() {
            review
                .findings
                .push(Finding::error(NARRATIVE_REQUIRED, narrative_field(&control.control_id)));
        }
        review.selected.push(control.control_id.clone());
        review.preview.push(ControlPreview {
            control_id: control.control_id.clone(),
            title: control.title.clone(),
            narrative: narrative.to_string(),
        });
    }

    review
}
