//! Mapping levels: the flattened view of an inheritance chain.
//!
//! Generators never walk superclass pointers themselves. [`MappingPlan`]
//! walks the chain once, iteratively, and hands back an explicit array of
//! [`MappingLevel`]s — one per physical table that participates in
//! persisting the object:
//!
//! - class-table links contribute a level per ancestor,
//! - concrete-table links fold the ancestor's properties into the leaf
//!   level,
//! - single-table links retarget the level onto the root's table and fix
//!   the discriminator.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{OrmError, Result};
use crate::meta::class::{ClassDef, InheritanceMapping};
use crate::meta::property::PropDef;
use crate::meta::registry::{ClassRegistry, ResolvedKey};

/// Discriminator column and value for a single-table level.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    /// Column holding the concrete type name.
    pub column: String,
    /// Value written for this concrete class.
    pub value: String,
}

/// One statement-producing level of the chain.
#[derive(Debug, Clone)]
pub struct MappingLevel {
    /// Class this level was built for.
    pub class: String,

    /// Physical table the level's statement targets.
    pub table: String,

    /// Key columns of this level's table, in key order.
    pub key_props: Vec<PropDef>,

    /// Declared non-key properties persisted at this level.
    pub props: Vec<PropDef>,

    /// Child-side join columns toward the next (parent) level. Empty on
    /// the topmost level and whenever the level has no class-table parent.
    pub link_props: Vec<PropDef>,

    /// Key property groups of ancestors folded into this level by
    /// concrete-table or single-table links. Each group matches the leaf
    /// key's arity and receives the propagated identity alongside the
    /// level's own key.
    pub absorbed_keys: Vec<Vec<PropDef>>,

    /// Discriminator, set only on a single-table level.
    pub discriminator: Option<Discriminator>,
}

impl MappingLevel {
    fn has_prop(&self, name: &str) -> bool {
        self.key_props.iter().any(|p| p.name == name) || self.props.iter().any(|p| p.name == name)
    }
}

/// The full level array for one concrete class, leaf level first.
#[derive(Debug, Clone)]
pub struct MappingPlan {
    /// Concrete class the plan was built for.
    pub class: String,

    /// Levels in leaf→root order.
    pub levels: Vec<MappingLevel>,

    /// The leaf's effective primary key. Its value is computed once per
    /// object and shared by every level (key propagation).
    pub key: ResolvedKey,
}

impl MappingPlan {
    /// Build the plan for a class by walking its chain leaf→root.
    ///
    /// # Errors
    ///
    /// Configuration defects surface here: unknown classes, missing key or
    /// link properties, inheritance cycles.
    pub fn build(registry: &ClassRegistry, class: &str) -> Result<Self> {
        let leaf = registry.require(class)?;
        let key = registry.effective_primary_key(class)?;

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(leaf.class.clone());

        let mut levels = vec![MappingLevel {
            class: leaf.class.clone(),
            table: leaf.table.clone(),
            key_props: key.props.clone(),
            props: declared_props(leaf, &key.props),
            link_props: Vec::new(),
            absorbed_keys: Vec::new(),
            discriminator: None,
        }];

        let mut current = leaf;
        while let Some(sc) = &current.super_class {
            let parent = registry.require(&sc.class)?;
            if !visited.insert(parent.class.clone()) {
                return Err(OrmError::InheritanceCycle(parent.class.clone()));
            }

            match sc.mapping {
                InheritanceMapping::ClassTable => {
                    let parent_key = registry.effective_primary_key(&parent.class)?;
                    check_key_arity(class, key.props.len(), &parent.class, parent_key.props.len())?;

                    // The level below the boundary joins upward through its
                    // explicit link column or its own key.
                    let child_level = levels.last_mut().expect("plan always has a leaf level");
                    let link = match &sc.id {
                        Some(id) => vec![current.require_prop(id)?.clone()],
                        None => child_level.key_props.clone(),
                    };
                    if link.len() != parent_key.props.len() {
                        return Err(OrmError::config(format!(
                            "Class '{}' links to superclass '{}' through {} column(s) but the parent key has {}",
                            current.class,
                            parent.class,
                            link.len(),
                            parent_key.props.len()
                        )));
                    }
                    child_level.link_props = link;

                    levels.push(MappingLevel {
                        class: parent.class.clone(),
                        table: parent.table.clone(),
                        key_props: parent_key.props.clone(),
                        props: declared_props(parent, &parent_key.props),
                        link_props: Vec::new(),
                        absorbed_keys: Vec::new(),
                        discriminator: None,
                    });
                }
                InheritanceMapping::ConcreteTable | InheritanceMapping::SingleTable => {
                    let level = levels.last_mut().expect("plan always has a leaf level");

                    if sc.mapping == InheritanceMapping::SingleTable {
                        level.table = parent.table.clone();
                        if level.discriminator.is_none() {
                            // The leaf-most single-table link owns the
                            // discriminator.
                            level.discriminator = Some(Discriminator {
                                column: sc
                                    .discriminator
                                    .clone()
                                    .unwrap_or_else(|| format!("{}Type", sc.class)),
                                value: sc
                                    .discriminator_value
                                    .clone()
                                    .unwrap_or_else(|| class.to_string()),
                            });
                        }
                    }

                    for prop in parent.properties.iter() {
                        if !level.has_prop(&prop.name) {
                            level.props.push(prop.clone());
                        }
                    }

                    // An absorbed ancestor's own key lands among the plain
                    // columns; track it so the shared identity reaches it.
                    if let Some(pk) = &parent.primary_key {
                        if key.owner != parent.class {
                            check_key_arity(class, key.props.len(), &parent.class, pk.props.len())?;
                            let group = pk
                                .props
                                .iter()
                                .map(|name| parent.require_prop(name).cloned())
                                .collect::<Result<Vec<_>>>()?;
                            level.absorbed_keys.push(group);
                        }
                    }
                }
            }

            current = parent;
        }

        debug!(
            class = %class,
            levels = levels.len(),
            "built mapping plan"
        );

        Ok(Self {
            class: class.to_string(),
            levels,
            key,
        })
    }
}

/// Identity is shared across the whole chain, so every key in it must have
/// the same number of columns as the leaf's effective key.
fn check_key_arity(
    class: &str,
    leaf_arity: usize,
    parent_class: &str,
    parent_arity: usize,
) -> Result<()> {
    if leaf_arity != parent_arity {
        return Err(OrmError::config(format!(
            "Class '{}' persists under a {}-column key but superclass '{}' declares a {}-column key",
            class, leaf_arity, parent_class, parent_arity
        )));
    }
    Ok(())
}

/// A class's declared properties minus its key properties.
fn declared_props(class: &ClassDef, key_props: &[PropDef]) -> Vec<PropDef> {
    class
        .properties
        .iter()
        .filter(|p| !key_props.iter().any(|k| k.name == p.name))
        .cloned()
        .collect()
}
