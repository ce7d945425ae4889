//! Analysis host: the document store queries run against.
//!
//! [`AnalysisHost`] holds the latest published [`TranslationUnit`] of every
//! document. Re-analysis builds a fresh unit and publishes it as a new
//! generation; [`Analysis`] snapshots keep their own generation alive, so a
//! query never observes a half-rebuilt graph.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::base::{FileId, LineCol};
use crate::hir::{Element, TranslationUnit};

use super::config::AnalysisConfig;
use super::highlight::{Highlight, document_highlights};
use super::references::{Reference, find_references};

/// Owner of the per-document units.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    config: AnalysisConfig,
    units: RwLock<IndexMap<FileId, Arc<TranslationUnit>>>,
}

impl AnalysisHost {
    /// Create a host with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with a custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            units: RwLock::default(),
        }
    }

    /// Get the host configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Start a new unit for `text` with the configured built-ins. Bind it,
    /// then hand it to [`publish`](Self::publish).
    pub fn create_unit(&self, file: FileId, text: &str) -> TranslationUnit {
        TranslationUnit::new(file, text, &self.config.builtins)
    }

    /// Publish a bound unit as the current generation of its file.
    ///
    /// Returns the generation it replaces. Snapshots taken earlier keep
    /// seeing the old one.
    pub fn publish(&self, unit: TranslationUnit) -> Option<Arc<TranslationUnit>> {
        let file = unit.file();
        let previous = self.units.write().insert(file, Arc::new(unit));
        debug!("published {} (replaced: {})", file, previous.is_some());
        previous
    }

    /// Drop a closed document; returns its last published unit.
    pub fn remove_file(&self, file: FileId) -> Option<Arc<TranslationUnit>> {
        let removed = self.units.write().shift_remove(&file);
        debug!("removed {} (present: {})", file, removed.is_some());
        removed
    }

    /// Take a consistent snapshot of every published unit.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            config: self.config.clone(),
            units: self.units.read().clone(),
        }
    }
}

/// A read-only snapshot for running queries.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
    units: IndexMap<FileId, Arc<TranslationUnit>>,
}

impl Analysis {
    /// Get the unit published for `file`.
    pub fn unit(&self, file: FileId) -> Option<&TranslationUnit> {
        self.units.get(&file).map(Arc::as_ref)
    }

    /// Files in publication order.
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.units.keys().copied()
    }

    /// The element whose name covers `position`.
    pub fn element_at(&self, file: FileId, position: LineCol) -> Option<Element> {
        let unit = self.unit(file)?;
        let offset = unit.line_index().offset(position)?;
        unit.element_at(offset)
    }

    /// Highlights for the symbol at `position`.
    ///
    /// `None` when cancelled, when nothing is under the cursor, or when the
    /// element is a placeholder such as `void`.
    pub fn document_highlights(
        &self,
        file: FileId,
        position: LineCol,
        cancel: &CancellationToken,
    ) -> Option<Vec<Highlight>> {
        if cancel.is_cancelled() {
            debug!("document highlights at {} in {} cancelled", position, file);
            return None;
        }
        let unit = self.unit(file)?;
        let element = self.element_at(file, position)?;
        let highlights = document_highlights(unit, element, &self.config);
        debug!(
            "document highlights at {} in {}: {:?} results",
            position,
            file,
            highlights.as_ref().map(Vec::len)
        );
        highlights
    }

    /// References to the symbol at `position`.
    ///
    /// `None` when cancelled or when nothing is under the cursor.
    pub fn find_references(
        &self,
        file: FileId,
        position: LineCol,
        cancel: &CancellationToken,
    ) -> Option<Vec<Reference>> {
        if cancel.is_cancelled() {
            debug!("find references at {} in {} cancelled", position, file);
            return None;
        }
        let unit = self.unit(file)?;
        let element = self.element_at(file, position)?;
        let references = find_references(unit, element, &self.config);
        debug!("find references at {} in {}: {} results", position, file, references.len());
        Some(references)
    }
}
