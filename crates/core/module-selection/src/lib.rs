//! Module selection for the configuration console.
//!
//! A [`Reconciler`] holds the module [`Catalog`] of one (branch, product)
//! pair, the baseline of modules already configured there, and the operator's
//! working selection. From those it derives the filtered display list, the
//! kept / to-add / to-remove [`Partition`], and the serialized id list that is
//! submitted back to the console.
//!
//! ```
//! use console_async::types::AvailableModule;
//! use module_selection::{LoadOutcome, Reconciler};
//!
//! let mut r = Reconciler::default();
//! let ticket = r.begin_load(3, 7).unwrap();
//! let outcome = r.complete_load(
//!     ticket,
//!     Ok(vec![
//!         AvailableModule { id: 1, name: "Auth".into(), is_configured: true },
//!         AvailableModule { id: 2, name: "Billing".into(), is_configured: false },
//!     ]),
//! );
//! assert!(matches!(outcome, LoadOutcome::Loaded { .. }));
//!
//! r.toggle(2, true);
//! assert_eq!(r.serialize(), "1,2");
//! assert_eq!(r.partition().to_add.len(), 1);
//! ```

pub mod cascade;
pub mod catalog;
pub mod error;
pub mod provider;
pub mod reconciler;
pub mod selection;

pub use cascade::{CascadeSelector, ScopeChange};
pub use catalog::{Catalog, DEFAULT_SEQUENCE, Module, SequenceMap};
pub use error::LoadFailure;
pub use provider::CatalogProvider;
pub use reconciler::{
    Badge, DEFAULT_LOAD_TIMEOUT, DisplayRow, LoadOutcome, LoadTicket, Partition, PartitionEntry,
    Reconciler, Submission,
};
pub use selection::{Preselection, SelectionSet, parse_id_list};
