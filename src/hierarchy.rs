//! Annotation hierarchy reconciliation
//!
//! The host owns an annotation hierarchy; this module only defines the
//! narrow interface the client needs (query by classification, bulk remove,
//! bulk add) and the reconciliation rule applied after a successful
//! prediction: unclassified annotations are provisional scaffolding and are
//! discarded, classified ones are user-confirmed and never touched, and every
//! predicted object is inserted unchanged.
//!
//! The hierarchy pre-exists the call, is mutated in place, and outlives the
//! request. The host guarantees single-threaded access; no locking happens
//! here.

use tracing::info;

use crate::protocol::PredictedObject;

/// Classification state of a stored annotation
///
/// An explicit tagged state rather than a nullable label, so the
/// reconciliation rule (discard `Unclassified`, preserve `Classified`) is
/// visible in the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// No classification assigned; treated as provisional and disposable
    Unclassified,
    /// User- or service-assigned class name; never removed by reconciliation
    Classified(String),
}

impl Classification {
    /// Whether this annotation is provisional
    pub fn is_unclassified(&self) -> bool {
        matches!(self, Classification::Unclassified)
    }
}

/// Narrow view of the host's annotation hierarchy
///
/// Annotation ids are opaque strings chosen by the store; [`reconcile`] only
/// passes them back verbatim.
pub trait AnnotationStore {
    /// Ids of all annotations whose classification matches the predicate
    fn query_by_classification(&self, predicate: &dyn Fn(&Classification) -> bool) -> Vec<String>;

    /// Remove exactly the given annotations; returns how many were removed
    fn remove(&mut self, ids: &[String]) -> usize;

    /// Insert predicted objects as new annotations; returns how many were added
    fn add(&mut self, objects: &[PredictedObject]) -> usize;
}

/// What a reconciliation pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Unclassified annotations removed
    pub removed: usize,
    /// Predicted objects inserted
    pub added: usize,
}

/// Replace the provisional subset of the store with the new predictions
///
/// Step 1: remove every currently unclassified annotation (and only those).
/// Step 2: insert all predicted objects, preserving whatever ids and geometry
/// the service assigned. There is no merge or diff against classified
/// annotations.
pub fn reconcile(
    store: &mut dyn AnnotationStore,
    predicted: &[PredictedObject],
) -> ReconcileSummary {
    let stale = store.query_by_classification(&Classification::is_unclassified);
    let removed = store.remove(&stale);
    let added = store.add(predicted);
    info!(removed, added, "reconciled annotation hierarchy");
    ReconcileSummary { removed, added }
}
