use std::{
    fmt,
    fmt::Display,
};

/// A single battle event.
///
/// Prefer the [`log_event`][crate::log_event] macro for construction, which keeps argument
/// names consistent with field names at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    title: &'static str,
    args: Vec<(&'static str, String)>,
    flags: Vec<&'static str>,
}

impl Event {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            args: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// The message identifier.
    pub fn title(&self) -> &str {
        self.title
    }

    /// Looks up an interpolation argument.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Checks if the event carries the given flag.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(&flag)
    }

    /// Sets an argument, replacing any earlier value for the same key.
    pub fn set<V>(&mut self, key: &'static str, value: V)
    where
        V: Display,
    {
        let value = value.to_string();
        match self.args.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => *existing = value,
            None => self.args.push((key, value)),
        }
    }

    pub fn with<V>(mut self, key: &'static str, value: V) -> Self
    where
        V: Display,
    {
        self.set(key, value);
        self
    }

    /// Sets an argument if a value is present.
    pub fn with_opt<V>(self, key: &'static str, value: Option<V>) -> Self
    where
        V: Display,
    {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Adds a valueless flag, such as `noanim`.
    pub fn flag(mut self, flag: &'static str) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for (key, value) in &self.args {
            write!(f, "|{key}:{value}")?;
        }
        for flag in &self.flags {
            write!(f, "|{flag}")?;
        }
        Ok(())
    }
}

/// Constructs an [`Event`] from a title and named arguments.
///
/// ```
/// let event = scuffle::log_event!("turn", turn: 2);
/// assert_eq!(event.to_string(), "turn|turn:2");
/// ```
#[macro_export]
macro_rules! log_event {
    ($title:expr $(, $key:ident : $value:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut event = $crate::log::Event::new($title);
        $(event.set(stringify!($key), $value);)*
        event
    }};
}

#[cfg(test)]
mod event_test {
    use crate::log::Event;

    #[test]
    fn renders_arguments_then_flags() {
        let event = log_event!("damage", mon: "Squirtle,player-1,1", health: "10/44")
            .with_opt("from", Some("item:Life Orb"))
            .with_opt::<&str>("of", None)
            .flag("silent");
        assert_eq!(
            event.to_string(),
            "damage|mon:Squirtle,player-1,1|health:10/44|from:item:Life Orb|silent"
        );
        assert_eq!(event.get("health"), Some("10/44"));
        assert!(event.has_flag("silent"));
    }

    #[test]
    fn replaces_repeated_keys() {
        let mut event = Event::new("weather");
        event.set("weather", "Rain");
        event.set("weather", "Sun");
        assert_eq!(event.to_string(), "weather|weather:Sun");
    }
}
