mod compile;
mod model;
mod parse;
mod source;

pub use model::{
    ConstraintRow, ModelShape, OntologyCallDescriptor, OntologyCatalog, PropertyConstraint,
    SP_CODE_CLASS, SP_NS, model_class_iri,
};
pub use parse::parse_ontology;
pub use source::{BUNDLED_ONTOLOGY, shared_catalog};
