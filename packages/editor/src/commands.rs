//! # Commands
//!
//! A [`Command`] is a typed tag. Handlers are registered against it with a
//! [`CommandPriority`]; dispatch walks them from the highest priority down
//! and stops at the first one that reports the command handled.
//!
//! Registering hands back a [`Registration`]. Revoking it removes exactly the
//! handlers it covers, so plugins can tear down cleanly.

use crate::errors::EditorError;
use crate::update::Update;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

/// Declare a [`Command`].
///
/// Each invocation is its own command: two declarations never share
/// handlers, even with the same name and payload type.
///
/// ```
/// use vellum_editor::{create_command, Command};
///
/// const SAVE: Command<String> = create_command!("SAVE");
/// assert_eq!(SAVE.name(), "SAVE");
/// ```
#[macro_export]
macro_rules! create_command {
    ($name:expr) => {
        $crate::Command::declared($name, concat!(module_path!(), ":", line!(), ":", column!()))
    };
}

/// Typed command tag, created with [`create_command!`]. Commands are told
/// apart by declaration site and payload type; the name is for display.
pub struct Command<P> {
    name: &'static str,
    site: &'static str,
    payload: PhantomData<fn(P)>,
}

impl<P> Command<P> {
    #[doc(hidden)]
    pub const fn declared(name: &'static str, site: &'static str) -> Self {
        Self {
            name,
            site,
            payload: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<P: 'static> Command<P> {
    pub(crate) fn id(&self) -> CommandId {
        CommandId {
            site: self.site,
            payload: TypeId::of::<P>(),
        }
    }
}

impl<P> fmt::Debug for Command<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&self.name).finish()
    }
}

/// Handler order, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandPriority {
    Editor = 0,
    Low = 1,
    Normal = 2,
    High = 3,
    Critical = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CommandId {
    site: &'static str,
    payload: TypeId,
}

pub(crate) type Handler = Rc<dyn Fn(&dyn Any, &mut Update<'_>) -> Result<bool, EditorError>>;

struct HandlerEntry {
    id: u64,
    priority: CommandPriority,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct CommandRegistry {
    handlers: HashMap<CommandId, Vec<HandlerEntry>>,
    next_id: u64,
}

impl CommandRegistry {
    pub(crate) fn register(&mut self, command: CommandId, priority: CommandPriority, handler: Handler) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.handlers.entry(command).or_default().push(HandlerEntry {
            id,
            priority,
            handler,
        });
        id
    }

    pub(crate) fn unregister(&mut self, command: CommandId, id: u64) -> bool {
        let Some(entries) = self.handlers.get_mut(&command) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.handlers.remove(&command);
        }
        removed
    }

    /// Handlers by descending priority, registration order within a priority
    pub(crate) fn handlers_for(&self, command: CommandId) -> Vec<Handler> {
        let Some(entries) = self.handlers.get(&command) else {
            return Vec::new();
        };
        let mut ordered: Vec<&HandlerEntry> = entries.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered.into_iter().map(|entry| Rc::clone(&entry.handler)).collect()
    }

    pub(crate) fn handler_count(&self, command: CommandId) -> usize {
        self.handlers.get(&command).map_or(0, Vec::len)
    }
}

/// Undo handle for one or more registrations.
///
/// Dropping it leaves the handlers in place; call [`Registration::revoke`] to
/// remove them.
#[must_use = "call revoke() to remove the registered handlers"]
pub struct Registration {
    revokers: Vec<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn empty() -> Self {
        Self { revokers: Vec::new() }
    }

    pub(crate) fn for_handler(registry: &Rc<RefCell<CommandRegistry>>, command: CommandId, id: u64) -> Self {
        let registry: Weak<RefCell<CommandRegistry>> = Rc::downgrade(registry);
        let revoker: Box<dyn FnOnce()> = Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().unregister(command, id);
            }
        });
        Self {
            revokers: vec![revoker],
        }
    }

    /// Combine registrations so they are revoked together
    pub fn merge(registrations: impl IntoIterator<Item = Registration>) -> Self {
        Self {
            revokers: registrations
                .into_iter()
                .flat_map(|registration| registration.revokers)
                .collect(),
        }
    }

    pub fn revoke(self) {
        for revoker in self.revokers {
            revoker();
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("handlers", &self.revokers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PING: Command<u32> = crate::create_command!("PING");

    fn handler(result: bool) -> Handler {
        Rc::new(move |_: &dyn Any, _: &mut Update<'_>| -> Result<bool, EditorError> { Ok(result) })
    }

    #[test]
    fn test_priority_order_is_stable() {
        let mut registry = CommandRegistry::default();
        let low = registry.register(PING.id(), CommandPriority::Low, handler(false));
        registry.register(PING.id(), CommandPriority::Critical, handler(true));
        registry.register(PING.id(), CommandPriority::Low, handler(true));

        assert_eq!(registry.handler_count(PING.id()), 3);
        assert_eq!(registry.handlers_for(PING.id()).len(), 3);
        assert!(registry.unregister(PING.id(), low));
        assert!(!registry.unregister(PING.id(), low));
        assert_eq!(registry.handler_count(PING.id()), 2);
    }

    #[test]
    fn test_commands_differ_by_payload_type() {
        const PING_TEXT: Command<String> = crate::create_command!("PING");
        assert_ne!(PING.id(), PING_TEXT.id());
    }

    #[test]
    fn test_same_name_and_payload_are_distinct_commands() {
        const OTHER_PING: Command<u32> = crate::create_command!("PING");
        assert_eq!(OTHER_PING.name(), PING.name());
        assert_ne!(OTHER_PING.id(), PING.id());

        let mut registry = CommandRegistry::default();
        registry.register(PING.id(), CommandPriority::Editor, handler(true));
        assert_eq!(registry.handler_count(PING.id()), 1);
        assert_eq!(registry.handler_count(OTHER_PING.id()), 0);
    }

    #[test]
    fn test_copies_of_a_command_share_handlers() {
        let mut registry = CommandRegistry::default();
        registry.register(PING.id(), CommandPriority::Editor, handler(true));
        let alias = &PING;
        assert_eq!(registry.handler_count(alias.id()), 1);
    }

    #[test]
    fn test_merged_registration_revokes_all() {
        let registry = Rc::new(RefCell::new(CommandRegistry::default()));
        let a = registry.borrow_mut().register(PING.id(), CommandPriority::Editor, handler(true));
        let b = registry.borrow_mut().register(PING.id(), CommandPriority::High, handler(true));

        let registration = Registration::merge([
            Registration::for_handler(&registry, PING.id(), a),
            Registration::for_handler(&registry, PING.id(), b),
        ]);
        registration.revoke();

        assert_eq!(registry.borrow().handler_count(PING.id()), 0);
    }

    #[test]
    fn test_revoke_after_registry_dropped() {
        let registry = Rc::new(RefCell::new(CommandRegistry::default()));
        let id = registry.borrow_mut().register(PING.id(), CommandPriority::Editor, handler(true));
        let registration = Registration::for_handler(&registry, PING.id(), id);
        drop(registry);
        registration.revoke();
    }
}
