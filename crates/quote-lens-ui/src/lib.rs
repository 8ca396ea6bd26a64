#![warn(missing_docs)]
//! # quote-lens-ui
//!
//! ## Purpose
//! Defines the page controller and the request-lifecycle state machine for
//! `quote-lens`.
//!
//! ## Responsibilities
//! - Dispatch every page event through one controller.
//! - Model the submit lifecycle with explicit legal transitions.
//! - Emit side effects as data for an outer driver to execute.
//!
//! ## Data flow
//! Driver input -> [`PageEvent`] -> [`PageController::handle_event`] ->
//! [`PageEffect`] list -> driver executes against its mount points.
//!
//! ## Ownership and lifetimes
//! Events and effects carry owned payloads so pending asynchronous work never
//! borrows controller state.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Illegal inputs
//! (a duplicate submit, a stale decode, a spurious resolution) are ignored
//! and produce no effects.
//!
//! ## Security and privacy notes
//! Controller state holds the user's selected file bytes for the duration of
//! the page session only; nothing is persisted.

use quote_lens_analysis_contract::AnalysisResult;
use quote_lens_core::{AnalysisRequest, LocationFields, QuoteImage};
use quote_lens_preview::{PreviewContent, PreviewController, PreviewPlan, PreviewThumbnail};
use quote_lens_projection::{RenderedSections, project};

/// Message shown when submit is pressed with no file selected.
pub const NO_FILE_MESSAGE: &str = "No file selected";

/// Lifecycle of the single in-flight analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestLifecycle {
    /// No request has been issued yet, or the last cycle finished.
    Idle,
    /// A request is in flight; submission is locked.
    Submitting,
    /// The last request resolved with a rendered result.
    Success(AnalysisResult),
    /// The last request resolved with a failure message.
    Failure(String),
}

/// Resolution of one in-flight request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// The endpoint returned a well-formed analysis result.
    Success(AnalysisResult),
    /// The request failed; the message is ready for the error panel.
    Failure(String),
}

/// Submit lifecycle machine with explicit legal transitions.
///
/// Exactly one instance exists per page session. `begin` refuses re-entry
/// while a request is in flight; `resolve` is ignored unless one is.
#[derive(Debug, Clone)]
pub struct SubmitLifecycle {
    state: RequestLifecycle,
}

impl SubmitLifecycle {
    /// Creates a machine in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: RequestLifecycle::Idle,
        }
    }

    /// Returns the current lifecycle state snapshot.
    pub fn state(&self) -> &RequestLifecycle {
        &self.state
    }

    /// Returns `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, RequestLifecycle::Submitting)
    }

    /// Attempts the `-> Submitting` transition.
    ///
    /// Returns `false` when a request is already in flight; the caller must
    /// not dispatch another one.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = RequestLifecycle::Submitting;
        true
    }

    /// Applies the resolution transition out of `Submitting`.
    ///
    /// Returns `false` when no request was in flight; such resolutions are
    /// spurious and must not re-enable the submit control a second time.
    pub fn resolve(&mut self, outcome: RequestOutcome) -> bool {
        if !self.is_busy() {
            return false;
        }
        self.state = match outcome {
            RequestOutcome::Success(result) => RequestLifecycle::Success(result),
            RequestOutcome::Failure(message) => RequestLifecycle::Failure(message),
        };
        true
    }
}

impl Default for SubmitLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// One page-level input event.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The picker selection changed; `None` clears the selection.
    FileSelected(Option<QuoteImage>),
    /// Files were dropped onto the upload box.
    FilesDropped(Vec<QuoteImage>),
    /// A drag entered the upload box.
    DragEntered,
    /// A drag left the upload box.
    DragLeft,
    /// The form was submitted with the current location fields.
    SubmitRequested(LocationFields),
    /// A previously dispatched request resolved.
    RequestResolved(RequestOutcome),
    /// A previously planned preview decode finished.
    PreviewDecoded {
        /// Selection sequence number the decode was tagged with.
        seq: u64,
        /// Decoded thumbnail bitmap.
        thumbnail: PreviewThumbnail,
        /// File-name caption for the thumbnail.
        caption: String,
    },
}

/// One side effect for the driver to execute.
///
/// Effects are plain data; executing them is the driver's job, which keeps
/// every transition in this crate testable without a display.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    /// Toggle the drop-target highlight. Purely cosmetic.
    SetDropHighlight(bool),
    /// Empty the preview mount point.
    ClearPreview,
    /// Replace the preview mount point's content.
    ShowPreview(PreviewContent),
    /// Decode the image off the event loop, then feed back
    /// [`PageEvent::PreviewDecoded`] with the same sequence number.
    DecodePreview {
        /// Selection sequence number tagging the decode.
        seq: u64,
        /// Owned copy of the selection to decode.
        image: QuoteImage,
    },
    /// Hide the results panel.
    HideResults,
    /// Hide the error panel.
    HideError,
    /// Disable/enable the submit control and swap its label with the
    /// loading indicator.
    SetSubmitBusy(bool),
    /// Issue the request, then feed back [`PageEvent::RequestResolved`].
    DispatchRequest(AnalysisRequest),
    /// Show the rendered result sections.
    ShowResults(RenderedSections),
    /// Scroll the results panel into view.
    ScrollToResults,
    /// Show a message in the error panel.
    ShowError(String),
    /// Scroll the error panel into view.
    ScrollToError,
}

/// Single controller owning all transient page state.
///
/// Constructed once per page mount; there is no ambient global state.
#[derive(Debug, Default)]
pub struct PageController {
    preview: PreviewController,
    lifecycle: SubmitLifecycle,
    selection: Option<QuoteImage>,
}

impl PageController {
    /// Creates a controller with an empty selection and an idle lifecycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current lifecycle state.
    pub fn lifecycle(&self) -> &RequestLifecycle {
        self.lifecycle.state()
    }

    /// Returns the current selection, if any.
    pub fn selection(&self) -> Option<&QuoteImage> {
        self.selection.as_ref()
    }

    /// Handles one page event and returns the effects to execute, in order.
    pub fn handle_event(&mut self, event: PageEvent) -> Vec<PageEffect> {
        match event {
            PageEvent::FileSelected(file) => self.apply_selection(file),
            PageEvent::FilesDropped(files) => {
                // Only the first dropped file becomes the selection.
                let mut effects = vec![PageEffect::SetDropHighlight(false)];
                if let Some(file) = files.into_iter().next() {
                    effects.extend(self.apply_selection(Some(file)));
                }
                effects
            }
            PageEvent::DragEntered => vec![PageEffect::SetDropHighlight(true)],
            PageEvent::DragLeft => vec![PageEffect::SetDropHighlight(false)],
            PageEvent::SubmitRequested(location) => self.apply_submit(location),
            PageEvent::RequestResolved(outcome) => self.apply_resolution(outcome),
            PageEvent::PreviewDecoded {
                seq,
                thumbnail,
                caption,
            } => match self.preview.apply_decoded(seq, thumbnail, caption) {
                Some(content) => vec![PageEffect::ShowPreview(content.clone())],
                // Stale decode of a superseded selection; discard.
                None => Vec::new(),
            },
        }
    }

    fn apply_selection(&mut self, file: Option<QuoteImage>) -> Vec<PageEffect> {
        let plan = self.preview.on_file_chosen(file.as_ref());
        self.selection = file;

        let mut effects = vec![PageEffect::ClearPreview];
        match plan {
            PreviewPlan::Cleared => {}
            PreviewPlan::ShowCaption(caption) => {
                effects.push(PageEffect::ShowPreview(PreviewContent::Caption(caption)));
            }
            PreviewPlan::DecodeImage { seq } => {
                if let Some(image) = self.selection.clone() {
                    effects.push(PageEffect::DecodePreview { seq, image });
                }
            }
        }
        effects
    }

    fn apply_submit(&mut self, location: LocationFields) -> Vec<PageEffect> {
        let Some(image) = self.selection.clone() else {
            return vec![
                PageEffect::HideResults,
                PageEffect::ShowError(NO_FILE_MESSAGE.to_string()),
                PageEffect::ScrollToError,
            ];
        };

        // Sole concurrency guard: one in-flight request at a time.
        if !self.lifecycle.begin() {
            return Vec::new();
        }

        vec![
            PageEffect::HideResults,
            PageEffect::HideError,
            PageEffect::SetSubmitBusy(true),
            PageEffect::DispatchRequest(AnalysisRequest::new(image, location)),
        ]
    }

    fn apply_resolution(&mut self, outcome: RequestOutcome) -> Vec<PageEffect> {
        if !self.lifecycle.resolve(outcome.clone()) {
            return Vec::new();
        }

        // The busy release comes before any rendering effect, on both paths:
        // a rendering failure must not leave the submit control stuck.
        let mut effects = vec![PageEffect::SetSubmitBusy(false)];
        match outcome {
            RequestOutcome::Success(result) => {
                effects.push(PageEffect::ShowResults(project(&result)));
                effects.push(PageEffect::ScrollToResults);
            }
            RequestOutcome::Failure(message) => {
                effects.push(PageEffect::ShowError(message));
                effects.push(PageEffect::ScrollToError);
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for lifecycle transition guards.

    use super::*;

    #[test]
    fn begin_refuses_reentry_while_submitting() {
        let mut lifecycle = SubmitLifecycle::new();
        assert!(lifecycle.begin());
        assert!(!lifecycle.begin());
    }

    #[test]
    fn resolve_is_ignored_when_nothing_is_in_flight() {
        let mut lifecycle = SubmitLifecycle::new();
        assert!(!lifecycle.resolve(RequestOutcome::Failure("late".to_string())));
        assert!(matches!(lifecycle.state(), RequestLifecycle::Idle));
    }

    #[test]
    fn cycle_returns_to_submittable_state_after_failure() {
        let mut lifecycle = SubmitLifecycle::new();
        assert!(lifecycle.begin());
        assert!(lifecycle.resolve(RequestOutcome::Failure("boom".to_string())));
        assert!(lifecycle.begin());
    }
}
