//! # Screen State
//!
//! Explicit view state for the two sponsor screens. Each dialog flag owns
//! the form it shows, so "dialog open" and "form exists" cannot disagree.
//!
//! ```text
//! SponsorsScreen                       SponsorDetailScreen
//! ──────────────                       ───────────────────
//! add dialog    ──► SponsorForm::new   edit dialog ──► SponsorForm::from_record
//! edit dialog   ──► SponsorForm::from_record           task form   ──► TaskForm
//! (one sponsor id at a time)           full screen toggle
//! ```

use chrono::NaiveDate;
use sponsor_core::{SponsorForm, SponsorSubmission, TaskForm, TaskSubmission};
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::store::DataStore;

// =============================================================================
// Sponsors List Screen
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct SponsorsScreen {
    add_form: Option<SponsorForm>,
    editing: Option<(u32, SponsorForm)>,
}

impl SponsorsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dialog_open(&self) -> bool {
        self.add_form.is_some()
    }

    /// Sponsor currently open in the edit dialog.
    pub fn editing_sponsor(&self) -> Option<u32> {
        self.editing.as_ref().map(|(id, _)| *id)
    }

    /// Opens the add dialog with an empty form. Reopening keeps the draft.
    pub fn open_add_dialog(&mut self) -> &mut SponsorForm {
        self.add_form.get_or_insert_with(SponsorForm::new)
    }

    pub fn add_form(&mut self) -> Option<&mut SponsorForm> {
        self.add_form.as_mut()
    }

    /// Discards the add dialog and its draft.
    pub fn close_add_dialog(&mut self) {
        self.add_form = None;
    }

    /// Submits the add form; the dialog closes only on success.
    pub fn submit_add_dialog(&mut self) -> DashboardResult<Option<SponsorSubmission>> {
        let submission = match &self.add_form {
            Some(form) => form.submit()?,
            None => return Ok(None),
        };
        self.add_form = None;
        Ok(Some(submission))
    }

    /// Opens the edit dialog for sponsor `id`, prefilled from the store.
    pub fn start_editing(&mut self, store: &DataStore, id: u32) -> DashboardResult<&mut SponsorForm> {
        let form = SponsorForm::from_record(store.sponsor(id)?)?;
        debug!(sponsor_id = id, "editing sponsor");
        let (_, form) = self.editing.insert((id, form));
        Ok(form)
    }

    pub fn edit_form(&mut self) -> Option<&mut SponsorForm> {
        self.editing.as_mut().map(|(_, form)| form)
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }
}

// =============================================================================
// Sponsor Detail Screen
// =============================================================================

#[derive(Debug, Clone)]
pub struct SponsorDetailScreen {
    sponsor_id: u32,
    edit_form: Option<SponsorForm>,
    task_form: Option<TaskForm>,
    full_screen: bool,
}

impl SponsorDetailScreen {
    /// Opens the detail view for sponsor `id`; fails if it does not exist.
    pub fn open(store: &DataStore, id: u32) -> DashboardResult<Self> {
        store.sponsor(id)?;
        Ok(SponsorDetailScreen {
            sponsor_id: id,
            edit_form: None,
            task_form: None,
            full_screen: false,
        })
    }

    pub fn sponsor_id(&self) -> u32 {
        self.sponsor_id
    }

    pub fn edit_dialog_open(&self) -> bool {
        self.edit_form.is_some()
    }

    pub fn task_form_open(&self) -> bool {
        self.task_form.is_some()
    }

    pub fn full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn toggle_full_screen(&mut self) -> bool {
        self.full_screen = !self.full_screen;
        self.full_screen
    }

    pub fn open_edit_dialog(&mut self, store: &DataStore) -> DashboardResult<&mut SponsorForm> {
        let form = SponsorForm::from_record(store.sponsor(self.sponsor_id)?)?;
        Ok(self.edit_form.insert(form))
    }

    pub fn close_edit_dialog(&mut self) {
        self.edit_form = None;
    }

    /// Opens the task form, due on `due_date` by default.
    pub fn open_task_form(&mut self, due_date: NaiveDate) -> &mut TaskForm {
        self.task_form.get_or_insert_with(|| TaskForm::new(due_date))
    }

    pub fn task_form(&mut self) -> Option<&mut TaskForm> {
        self.task_form.as_mut()
    }

    pub fn close_task_form(&mut self) {
        self.task_form = None;
    }

    /// Submits the task form for this sponsor; the form closes only on success.
    pub fn submit_task(&mut self) -> DashboardResult<TaskSubmission> {
        let form = self
            .task_form
            .as_ref()
            .ok_or(DashboardError::FormClosed("task"))?;
        let submission = form.submit(self.sponsor_id)?;
        self.task_form = None;
        Ok(submission)
    }
}
