// Section registry, editor facet and the ordering/visibility engine.

pub mod editor;
pub mod handlers;
pub mod ordering;
pub mod registry;
