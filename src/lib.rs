pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod logging;
pub mod state;
pub mod theme;
pub mod tui;
pub mod types;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::app::run_modal;
use crate::config::PickConfig;
use crate::state::{ResolveState, WalkerState};
use crate::types::{ConflictUnit, ExtractedItem, ResolutionOutcome, WalkOutcome};

/// Guidance attached to the cancelled outcome when no UI can be shown.
pub const NO_TERMINAL_MESSAGE: &str = "No interactive terminal available; resolve manually.";

/// What a caller hands to [`invoke`].
#[derive(Debug, Clone)]
pub enum Request {
    Conflict(ConflictUnit),
    Items(Vec<ExtractedItem>),
}

/// Exactly one per [`invoke`]. Serializes as the inner outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Resolution(ResolutionOutcome),
    Walk(WalkOutcome),
}

impl Outcome {
    /// The cancelled result a caller substitutes when no terminal is attached.
    pub fn fallback(request: &Request) -> Self {
        match request {
            Request::Conflict(_) => Outcome::Resolution(ResolutionOutcome::cancelled()),
            Request::Items(_) => Outcome::Walk(WalkOutcome::Cancelled),
        }
    }

    /// The assembled walker document, if one was submitted.
    pub fn document(&self) -> Option<&str> {
        match self {
            Outcome::Walk(outcome) => outcome.document(),
            Outcome::Resolution(_) => None,
        }
    }
}

/// Open the matching modal on the terminal and wait for its outcome.
///
/// The caller is responsible for checking
/// [`tui::interactive_terminal_available`] first.
pub async fn invoke(request: Request, config: &PickConfig) -> Result<Outcome> {
    match request {
        Request::Conflict(unit) => Ok(Outcome::Resolution(resolve_conflict(unit, config).await?)),
        Request::Items(items) => Ok(Outcome::Walk(walk_items(items, config).await?)),
    }
}

pub async fn resolve_conflict(unit: ConflictUnit, config: &PickConfig) -> Result<ResolutionOutcome> {
    info!(unit = %unit.identifier, "resolution session opened");
    let mut state = ResolveState::new(unit, config.theme.clone(), config.ui.clone());

    let mut terminal = tui::init()?;
    let result = run_modal(&mut terminal, &mut state).await;
    tui::restore()?;

    let outcome = result?.unwrap_or_else(ResolutionOutcome::cancelled);
    info!(choice = outcome.chosen_option.label(), "resolution session closed");
    Ok(outcome)
}

/// An empty item list never opens the UI and yields `Cancelled`.
pub async fn walk_items(items: Vec<ExtractedItem>, config: &PickConfig) -> Result<WalkOutcome> {
    let count = items.len();
    let Some(mut state) = WalkerState::new(items, config.theme.clone(), config.ui.clone()) else {
        info!("walker invoked with no items");
        return Ok(WalkOutcome::Cancelled);
    };
    info!(items = count, "walker opened");

    let mut terminal = tui::init()?;
    let result = run_modal(&mut terminal, &mut state).await;
    tui::restore()?;

    let outcome = result?.unwrap_or(WalkOutcome::Cancelled);
    info!(
        submitted = outcome.document().is_some(),
        "walker closed"
    );
    Ok(outcome)
}
