//! # FlowFM Inspector Core
//!
//! Platform-neutral building blocks shared by the native client and the
//! browser UI of the FlowFM inspector:
//!
//! - **Schema / Model**: wire types for the per-section MDU schema and model
//! - **Row Mapper**: schema properties to typed row descriptors
//! - **Inputs**: typed input variants and the array controller
//! - **Debounce**: clock-agnostic trailing debounce used by both propagators
//! - **API**: endpoint table and request/response bodies of the local API
//!
//! Nothing in this crate performs I/O or owns a timer, so it compiles for
//! native targets and `wasm32` alike.

pub mod api;
pub mod array;
pub mod debounce;
pub mod form;
pub mod input;
pub mod model;
pub mod panel;
pub mod schema;
pub mod sections;
pub mod value;

pub use api::{ApiError, Endpoints};
pub use array::{ArrayController, ArrayElement, ArrayError};
pub use debounce::{Debounce, SlotKey, SlotKind, SlotSequence, Ticket};
pub use form::{build_forms, FormRow, SectionForm};
pub use input::{BaseInput, ElementId, InputError, TypedInput, ValueChanged};
pub use model::{Model, ProjectModel};
pub use panel::PanelState;
pub use schema::{rows, RowDescriptor, Schema, ValueDescription, ValueType};
pub use sections::MDU_SECTIONS;
pub use value::{FieldValue, PathValue, ScalarValue};
