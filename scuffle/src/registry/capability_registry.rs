use std::rc::Rc;

use hashbrown::HashMap;
use scuffle_data::Id;

/// Creates a behavior instance from its construction context.
pub type Constructor<T, C> = Box<dyn Fn(&C) -> Rc<T>>;

/// A table of behavior constructors for one capability family, keyed by symbol.
///
/// Lookups never fail: a symbol with no registered constructor resolves to the family's
/// fallback constructor, which produces a behavior that does nothing special.
pub struct CapabilityRegistry<T, C>
where
    T: ?Sized,
    C: ?Sized,
{
    family: &'static str,
    constructors: HashMap<Id, Constructor<T, C>>,
    fallback: Constructor<T, C>,
}

impl<T, C> CapabilityRegistry<T, C>
where
    T: ?Sized,
    C: ?Sized,
{
    /// Creates an empty registry for the named family.
    pub fn new<F>(family: &'static str, fallback: F) -> Self
    where
        F: Fn(&C) -> Rc<T> + 'static,
    {
        Self {
            family,
            constructors: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    pub fn family(&self) -> &str {
        self.family
    }

    /// Registers a constructor for the symbol.
    ///
    /// Registering the same symbol again replaces the earlier constructor.
    pub fn register<I, F>(&mut self, symbol: I, constructor: F)
    where
        I: Into<Id>,
        F: Fn(&C) -> Rc<T> + 'static,
    {
        let symbol = symbol.into();
        if self
            .constructors
            .insert(symbol.clone(), Box::new(constructor))
            .is_some()
        {
            ::log::trace!("{} registry: replaced constructor for {symbol}", self.family);
        }
    }

    pub fn contains(&self, symbol: &Id) -> bool {
        self.constructors.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Creates the behavior registered for the symbol, or the fallback behavior.
    pub fn create(&self, symbol: &Id, context: &C) -> Rc<T> {
        match self.constructors.get(symbol) {
            Some(constructor) => constructor(context),
            None => {
                ::log::debug!(
                    "{} registry: no behavior for {symbol}, using fallback",
                    self.family
                );
                (self.fallback)(context)
            }
        }
    }
}
