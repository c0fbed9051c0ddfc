//! Component catalog: named, instantiable units plus the configuration
//! descriptors that describe their editable properties.

pub mod descriptor;
pub mod error;
pub mod key;
pub mod loader;

pub use descriptor::ConfigDescriptor;
pub use descriptor::ControlKind;
pub use descriptor::DeclaredProperty;
pub use descriptor::DeclaredType;
pub use descriptor::ExampleGroup;
pub use descriptor::PropertySpec;
pub use descriptor::Unit;
pub use error::CatalogError;
pub use error::ResolveError;
pub use key::ComponentKey;
pub use loader::Loader;
pub use loader::StaticResolver;
pub use loader::SynthesisConfig;
pub use loader::UnitResolver;
