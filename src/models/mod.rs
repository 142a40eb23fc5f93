//! Bundled schema models
//!
//! Each schema module declares its namespace constant and model type.
//! Nothing is registered implicitly: call [`register_all`] once at startup,
//! or register individual namespaces with
//! [`register_namespace`](crate::core::namespace::register_namespace).

pub mod dc;
pub mod xmp_base;
pub mod xmp_dm;
pub mod xmp_mm;

use crate::core::error::XmpResult;
use crate::core::namespace::{register_namespace, Namespace};

/// Namespaces of all bundled schemas
pub fn namespaces() -> [Namespace; 4] {
    [dc::NS_DC, xmp_base::NS_XMP, xmp_mm::NS_XMP_MM, xmp_dm::NS_XMP_DM]
}

/// Register all bundled schemas in the global registry.
///
/// Safe to call more than once.
pub fn register_all() -> XmpResult<()> {
    for ns in namespaces() {
        register_namespace(ns)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::{lookup_namespace, ns};

    #[test]
    fn test_register_all_is_idempotent() {
        register_all().unwrap();
        register_all().unwrap();
        for prefix in [ns::DC_PREFIX, ns::XMP_PREFIX, ns::XMP_MM_PREFIX, ns::XMP_DM_PREFIX] {
            let found = lookup_namespace(prefix).unwrap();
            assert!(found.has_factory(), "{} has no factory", prefix);
        }
    }
}
