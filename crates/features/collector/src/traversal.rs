//! The per-call graph walk behind property retrieval.
//!
//! Seeding resolves every object spec's root and its traversal paths; visiting pops references
//! off an explicit stack, so objects are emitted in depth-first pre-order of discovery. The
//! collected set makes every reference appear at most once and bounds the walk on cyclic
//! graphs. All state lives in [`Traversal`] and is dropped when the call returns.

use crate::error::{CollectorError, ResolveError};
use crate::resolver::{collect_all, references_in, resolve};
use fxhash::FxHashSet;
use tracing::{debug, trace};
use vsim_domain::methods::{MissingProperty, ObjectContent, PropertyFilterSpec};
use vsim_domain::reflect::{ManagedObject, Reflect as _};
use vsim_domain::{DynamicProperty, ManagedObjectReference};
use vsim_kernel::Schema;
use vsim_registry::Registry;

/// A reference waiting to be visited. Absence is judged by the flag of the filter that
/// discovered it.
#[derive(Debug)]
struct Pending {
    reference: ManagedObjectReference,
    report_missing: bool,
}

#[derive(Debug)]
pub struct Traversal<'a> {
    registry: &'a Registry,
    schema: &'a Schema,
    filters: &'a [PropertyFilterSpec],
    recursive: FxHashSet<&'a str>,
    collected: FxHashSet<ManagedObjectReference>,
    objects: Vec<ObjectContent>,
}

impl<'a> Traversal<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry, schema: &'a Schema, filters: &'a [PropertyFilterSpec]) -> Self {
        Self {
            registry,
            schema,
            filters,
            recursive: FxHashSet::default(),
            collected: FxHashSet::default(),
            objects: Vec::new(),
        }
    }

    /// Walks the graph and returns one object content per visited reference.
    ///
    /// # Errors
    /// [`CollectorError::ObjectNotFound`] for the first absent object whose filter does not
    /// report missing objects.
    pub fn run(mut self) -> Result<Vec<ObjectContent>, CollectorError> {
        let seeds = self.seed()?;
        let mut frontier: Vec<Pending> = seeds.into_iter().rev().collect();

        while let Some(Pending { reference, report_missing }) = frontier.pop() {
            if self.collected.contains(&reference) {
                continue;
            }

            let Some(object) = self.registry.get(&reference) else {
                if report_missing {
                    debug!(%reference, "skipping missing object");
                    continue;
                }
                return Err(CollectorError::ObjectNotFound { obj: reference, context: None });
            };

            let (content, next) = {
                let guard = object.read();
                self.extract(&reference, &*guard)
            };
            trace!(%reference, props = content.prop_set.len(), next = next.len(), "collected");

            self.collected.insert(reference);
            self.objects.push(content);
            frontier.extend(next.into_iter().rev().map(|reference| Pending { reference, report_missing }));
        }

        Ok(self.objects)
    }

    fn seed(&mut self) -> Result<Vec<Pending>, CollectorError> {
        let mut seeds = Vec::new();

        for filter in self.filters {
            let report_missing = filter.reports_missing_objects();

            for spec in &filter.object_set {
                let Some(root) = self.registry.get(&spec.obj) else {
                    if report_missing {
                        debug!(reference = %spec.obj, "skipping missing root");
                        continue;
                    }
                    return Err(CollectorError::ObjectNotFound { obj: spec.obj.clone(), context: None });
                };

                // `skip` is ignored without traversal steps.
                if spec.select_set.is_empty() || !spec.skip.unwrap_or(false) {
                    seeds.push(Pending { reference: spec.obj.clone(), report_missing });
                }

                let root = root.read();
                for step in &spec.select_set {
                    if step.is_recursive() {
                        self.recursive.insert(step.path.as_str());
                    }
                    if let Ok(value) = resolve(&*root, &step.path) {
                        seeds.extend(references_in(&value).into_iter().map(|reference| Pending { reference, report_missing }));
                    }
                }
            }
        }

        Ok(seeds)
    }

    /// Applies every matching property spec to one object. Returns its content and the
    /// references found under recursive paths.
    fn extract(&self, reference: &ManagedObjectReference, object: &dyn ManagedObject) -> (ObjectContent, Vec<ManagedObjectReference>) {
        let descriptor = object.descriptor();
        let mut content = ObjectContent::new(reference.clone());
        let mut next = Vec::new();

        let specs = self.filters.iter().flat_map(|f| &f.prop_set);
        for spec in specs {
            if reference.r#type != spec.r#type && !self.schema.matches(descriptor, &spec.r#type) {
                continue;
            }

            if spec.is_all() {
                content.prop_set.extend(collect_all(object));
                continue;
            }

            for path in &spec.path_set {
                match resolve(object, path) {
                    Ok(val) => {
                        if self.recursive.contains(path.as_str()) {
                            next.extend(references_in(&val));
                        }
                        content.prop_set.push(DynamicProperty { name: path.clone(), val });
                    },
                    Err(ResolveError::EmptyField { .. }) => {},
                    Err(ResolveError::MissingField { .. }) => content.missing_set.push(MissingProperty::invalid(path.as_str())),
                }
            }
        }

        (content, next)
    }
}
