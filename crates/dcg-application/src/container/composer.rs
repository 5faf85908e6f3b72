//! Container assembly and validation
//!
//! The [`Composer`] collects per-role binding declarations, enforces the
//! exactly-one-binding-per-role rule, validates the declared dependency
//! graph, and only then produces a [`Container`]. Every failure mode is
//! reported here, at composition time; a built container cannot fail to
//! resolve a role for wiring reasons.

use std::collections::HashMap;

use dcg_domain::binding::Role;
use dcg_domain::error::{CompositionError, CompositionResult};

use super::config::{BindingDecl, ComponentConfig};
use super::resolver::{BindingSet, Container};
use super::settings::BindingSettings;

/// Collects binding declarations and assembles the container
///
/// Installing the same declaration twice is a no-op; installing a
/// different declaration for an already-declared role is a duplicate
/// binding. [`Composer::build`] performs the remaining validation.
pub struct Composer {
    installed: Vec<ComponentConfig>,
    settings: BindingSettings,
}

impl Composer {
    /// Create a composer with default settings
    pub fn new() -> Self {
        Self::with_settings(BindingSettings::default())
    }

    /// Create a composer with explicit settings
    pub fn with_settings(settings: BindingSettings) -> Self {
        Self {
            installed: Vec::new(),
            settings,
        }
    }

    /// Install one role's binding declaration
    ///
    /// # Errors
    /// Returns `DuplicateBinding` when a different declaration is already
    /// installed for the same role.
    pub fn install(&mut self, config: ComponentConfig) -> CompositionResult<()> {
        if let Some(existing) = self.installed.iter().find(|c| c.role() == config.role()) {
            if existing.is_same_entry(&config) {
                return Ok(());
            }
            return Err(CompositionError::duplicate(
                config.role(),
                vec![existing.binding_name(), config.binding_name()],
            ));
        }
        self.installed.push(config);
        Ok(())
    }

    /// Declarations installed so far
    pub fn installed(&self) -> &[ComponentConfig] {
        &self.installed
    }

    /// Validate the declarations and assemble the container
    ///
    /// # Errors
    /// * `UnsatisfiedBinding` - a role has no installed declaration
    /// * `CyclicDependency` - declared dependencies admit no construction
    ///   order
    pub fn build(self) -> CompositionResult<Container> {
        let mut source = None;
        let mut topics = None;
        let mut destination = None;
        let mut control = None;
        let mut events = None;
        for config in &self.installed {
            match config.decl() {
                BindingDecl::Source(entry) => source = Some(entry),
                BindingDecl::Topics(entry) => topics = Some(entry),
                BindingDecl::Destination(entry) => destination = Some(entry),
                BindingDecl::Control(entry) => control = Some(entry),
                BindingDecl::Events(entry) => events = Some(entry),
            }
        }
        let bindings = BindingSet {
            source: source.ok_or(CompositionError::unsatisfied(Role::SourceFactory))?,
            topics: topics.ok_or(CompositionError::unsatisfied(Role::DataTopicContainer))?,
            destination: destination
                .ok_or(CompositionError::unsatisfied(Role::DestinationFactory))?,
            control: control.ok_or(CompositionError::unsatisfied(Role::ControlServiceFactory))?,
            events: events.ok_or(CompositionError::unsatisfied(Role::EventsServiceFactory))?,
        };

        let edges: Vec<(Role, &[Role])> = self
            .installed
            .iter()
            .map(|c| (c.role(), c.requires()))
            .collect();
        let order = validate_acyclic(&edges)?;

        Ok(Container::from_parts(bindings, self.settings, order))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate that declared role dependencies admit a construction order
///
/// Takes `(role, declared dependencies)` pairs and returns the roles in
/// dependency-first order. Roles that appear only as dependencies are
/// treated as leaves. The reported cycle path walks the cycle once, with
/// the entry role repeated at the end.
pub fn validate_acyclic(edges: &[(Role, &[Role])]) -> CompositionResult<Vec<Role>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        Visiting,
        Done,
    }

    fn visit(
        role: Role,
        adjacency: &HashMap<Role, &[Role]>,
        marks: &mut HashMap<Role, Mark>,
        stack: &mut Vec<Role>,
        order: &mut Vec<Role>,
    ) -> CompositionResult<()> {
        match marks.get(&role).copied().unwrap_or(Mark::Unvisited) {
            Mark::Done => return Ok(()),
            Mark::Visiting => {
                let start = stack.iter().position(|r| *r == role).unwrap_or(0);
                let mut path: Vec<Role> = stack[start..].to_vec();
                path.push(role);
                return Err(CompositionError::cyclic(path));
            }
            Mark::Unvisited => {}
        }
        marks.insert(role, Mark::Visiting);
        stack.push(role);
        if let Some(requires) = adjacency.get(&role) {
            for dep in *requires {
                visit(*dep, adjacency, marks, stack, order)?;
            }
        }
        stack.pop();
        marks.insert(role, Mark::Done);
        order.push(role);
        Ok(())
    }

    let adjacency: HashMap<Role, &[Role]> = edges.iter().map(|(role, deps)| (*role, *deps)).collect();
    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    let mut order = Vec::new();
    for (role, _) in edges {
        visit(*role, &adjacency, &mut marks, &mut stack, &mut order)?;
    }
    Ok(order)
}
