//! Super-class key resolution.

use crate::error::{OrmError, Result};
use crate::meta::key::ObjectKey;
use crate::meta::registry::ClassRegistry;
use crate::object::PropertySource;

/// Resolve the key an object holds in its parent's table.
///
/// With propagated identity this equals the object's own key value, bound
/// to the parent's key property names. An explicit link column
/// (`SuperClassDef::id`) redirects the lookup to that property instead.
///
/// # Errors
///
/// - [`OrmError::NoSuperClass`] when the class has no superclass.
/// - [`OrmError::Config`] when an explicit link column is combined with a
///   composite parent key.
pub fn super_class_key(
    registry: &ClassRegistry,
    object: &dyn PropertySource,
) -> Result<ObjectKey> {
    let class = registry.require(object.class_name())?;
    let sc = class
        .super_class
        .as_ref()
        .ok_or_else(|| OrmError::NoSuperClass(class.class.clone()))?;

    let parent_key = registry.effective_primary_key(&sc.class)?;
    if sc.id.is_some() && parent_key.props.len() > 1 {
        return Err(OrmError::config(format!(
            "Class '{}' declares a single link column but superclass '{}' has a composite key",
            class.class, sc.class
        )));
    }

    let mut key = ObjectKey::new();
    for pk in &parent_key.props {
        let source = sc.id.as_deref().unwrap_or(&pk.name);
        key.push(pk.name.clone(), object.property_value(source)?);
    }
    Ok(key)
}
